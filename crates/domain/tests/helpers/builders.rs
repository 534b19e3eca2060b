#![allow(dead_code)]

pub fn customer_document(customer: &str, v4: &[&str], v6: &[&str], redirect: &str) -> String {
    let quote = |items: &[&str]| {
        items
            .iter()
            .map(|s| format!("\"{}\"", s))
            .collect::<Vec<_>>()
            .join(",")
    };

    format!(
        r#"{{"Version":3,"CustomerId":"{}","Policies":[{{"Ipv4Addrs":[{}],"Ipv6Addrs":[{}],"BlockCategories":[2,4,6],"BlockReputation":20,"RedirectIp":"{}"}}]}}"#,
        customer,
        quote(v4),
        quote(v6),
        redirect
    )
}
