//! Line-oriented JSON exchange with the classification daemon.
//!
//! Request: `{"url/getinfo":{"urls":["<name>"],"a1cat":1,"reputation":1}}\r\n`
//! Response: a JSON array of verdict objects terminated by `\n`.

use dnsguard_domain::{DomainError, Verdict};
use serde_json::json;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};

const REQUEST_TERMINATOR: &[u8] = b"\r\n";

pub fn encode_request(query_name: &str) -> Vec<u8> {
    let body = json!({
        "url/getinfo": {
            "urls": [query_name],
            "a1cat": 1,
            "reputation": 1,
        }
    });

    let mut bytes = body.to_string().into_bytes();
    bytes.extend_from_slice(REQUEST_TERMINATOR);
    bytes
}

/// Decodes one response line and returns its first verdict.
pub fn decode_response(line: &[u8]) -> Result<Verdict, DomainError> {
    let verdicts: Vec<Verdict> = serde_json::from_slice(line.trim_ascii())
        .map_err(|e| DomainError::InvalidDaemonResponse(e.to_string()))?;

    verdicts
        .into_iter()
        .next()
        .ok_or(DomainError::EmptyDaemonResponse)
}

pub(crate) async fn write_request<S>(stream: &mut S, request: &[u8]) -> Result<(), DomainError>
where
    S: AsyncWrite + Unpin,
{
    stream
        .write_all(request)
        .await
        .map_err(|e| DomainError::IoError(format!("Failed to write daemon request: {}", e)))?;
    stream
        .flush()
        .await
        .map_err(|e| DomainError::IoError(format!("Failed to flush daemon request: {}", e)))?;

    Ok(())
}

/// Reads bytes up to and including the first `\n`, never more than `limit`.
pub(crate) async fn read_response_line<S>(
    stream: &mut S,
    limit: usize,
    server: &str,
) -> Result<Vec<u8>, DomainError>
where
    S: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(stream.take(limit as u64));
    let mut line = Vec::with_capacity(512);

    reader
        .read_until(b'\n', &mut line)
        .await
        .map_err(|e| DomainError::IoError(format!("Failed to read daemon response: {}", e)))?;

    if line.last() == Some(&b'\n') {
        return Ok(line);
    }

    if line.len() >= limit {
        return Err(DomainError::DaemonResponseTooLarge { limit });
    }

    Err(DomainError::DaemonClosed {
        server: server.to_string(),
    })
}
