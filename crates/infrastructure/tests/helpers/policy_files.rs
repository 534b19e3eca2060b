#![allow(dead_code)]
use std::path::{Path, PathBuf};

pub fn customer_json(customer: &str, addrs: &[&str], reputation: i32, categories: &[i32], redirect: &str) -> String {
    let (v4, v6): (Vec<&str>, Vec<&str>) = addrs.iter().copied().partition(|a| !a.contains(':'));
    let list = |items: &[&str]| {
        items
            .iter()
            .map(|s| format!("\"{}\"", s))
            .collect::<Vec<_>>()
            .join(",")
    };
    let cats = categories
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(",");

    format!(
        r#"{{"Version":1,"CustomerId":"{}","Policies":[{{"Ipv4Addrs":[{}],"Ipv6Addrs":[{}],"BlockCategories":[{}],"BlockReputation":{},"RedirectIp":"{}"}}]}}"#,
        customer,
        list(v4.as_slice()),
        list(v6.as_slice()),
        cats,
        reputation,
        redirect
    )
}

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, contents).unwrap();
    path
}
