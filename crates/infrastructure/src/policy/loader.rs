use chrono::{DateTime, Utc};
use dnsguard_domain::{DomainError, Policy, PolicyDocument, PolicySnapshot};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

const POLICY_FILE_EXTENSION: &str = "json";

/// Result of scanning a configuration root.
#[derive(Debug, Default)]
pub struct LoadedPolicies {
    pub snapshot: PolicySnapshot,
    pub files_loaded: usize,
    pub files_skipped: usize,
}

/// Builds a fresh snapshot from every `*.json` file under `root`.
///
/// Files are processed in lexicographic path order; when two files list the
/// same address the later file wins. Unreadable or malformed files are
/// skipped. Only an unreadable `root` fails the build.
pub fn build_snapshot(root: &Path) -> Result<LoadedPolicies, DomainError> {
    let mut files = Vec::new();
    collect_policy_files(root, &mut files).map_err(|e| DomainError::PolicyRootUnavailable {
        path: root.display().to_string(),
        reason: e.to_string(),
    })?;
    files.sort();

    let mut loaded = LoadedPolicies::default();

    for path in &files {
        match load_policy_file(path) {
            Ok(policies) => {
                debug!(path = %path.display(), policies = policies.len(), "Policy file loaded");
                for policy in policies {
                    if let Some(previous) = loaded.snapshot.insert(policy) {
                        debug!(
                            address = %previous.network_address,
                            replaced_from = %previous.source,
                            "Policy address redefined by later file"
                        );
                    }
                }
                loaded.files_loaded += 1;
            }
            Err(e) => {
                warn!(error = %e, "Skipping policy file");
                loaded.files_skipped += 1;
            }
        }
    }

    Ok(loaded)
}

fn collect_policy_files(dir: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            // Subdirectory failures only lose that subtree.
            if let Err(e) = collect_policy_files(&path, files) {
                warn!(error = %e, path = %path.display(), "Skipping unreadable policy directory");
            }
        } else if is_policy_file(&path) {
            files.push(path);
        }
    }

    Ok(())
}

fn is_policy_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == POLICY_FILE_EXTENSION)
}

/// Parses one customer file and flattens it into per-address policies.
pub fn load_policy_file(path: &Path) -> Result<Vec<Policy>, DomainError> {
    let path_display = path.display().to_string();

    let contents = std::fs::read(path).map_err(|e| DomainError::PolicyFileRead {
        path: path_display.clone(),
        reason: e.to_string(),
    })?;

    let document: PolicyDocument =
        serde_json::from_slice(&contents).map_err(|e| DomainError::PolicyFileParse {
            path: path_display.clone(),
            reason: e.to_string(),
        })?;

    let last_updated = std::fs::metadata(path)
        .and_then(|m| m.modified())
        .map(DateTime::<Utc>::from)
        .unwrap_or_else(|_| Utc::now());

    let customer_id: Arc<str> = Arc::from(document.customer_id.as_str());
    let source: Arc<str> = Arc::from(path_display.as_str());

    let mut policies = Vec::new();
    for (index, rule) in document.policies.iter().enumerate() {
        match rule.expand(&customer_id, &source, last_updated) {
            Ok(expanded) => {
                if expanded.is_empty() {
                    warn!(path = %path_display, rule = index, "Policy rule lists no addresses");
                }
                policies.extend(expanded);
            }
            Err(e) => {
                warn!(error = %e, path = %path_display, rule = index, "Skipping policy rule");
            }
        }
    }

    Ok(policies)
}
