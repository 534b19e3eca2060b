use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PolicyConfig {
    /// Directory scanned recursively for `*.json` customer files.
    #[serde(default = "default_config_root")]
    pub config_root: PathBuf,

    /// Answer for A queries when the policy's block address is IPv6.
    #[serde(default = "default_block_ipv4")]
    pub block_ipv4: String,

    /// Answer for AAAA queries when the policy's block address is IPv4.
    #[serde(default = "default_block_ipv6")]
    pub block_ipv6: String,

    #[serde(default = "default_true")]
    pub watch: bool,

    #[serde(default = "default_reload_debounce_ms")]
    pub reload_debounce_ms: u64,
}

impl PolicyConfig {
    pub fn block_ipv4_addr(&self) -> Option<IpAddr> {
        self.block_ipv4.parse::<IpAddr>().ok().filter(IpAddr::is_ipv4)
    }

    pub fn block_ipv6_addr(&self) -> Option<IpAddr> {
        self.block_ipv6.parse::<IpAddr>().ok().filter(IpAddr::is_ipv6)
    }

    pub fn reload_debounce(&self) -> Duration {
        Duration::from_millis(self.reload_debounce_ms)
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            config_root: default_config_root(),
            block_ipv4: default_block_ipv4(),
            block_ipv6: default_block_ipv6(),
            watch: true,
            reload_debounce_ms: default_reload_debounce_ms(),
        }
    }
}

fn default_config_root() -> PathBuf {
    PathBuf::from("/etc/dnsproxy")
}

fn default_block_ipv4() -> String {
    "0.1.2.3".to_string()
}

fn default_block_ipv6() -> String {
    "1:2:3:4::1234".to_string()
}

fn default_true() -> bool {
    true
}

fn default_reload_debounce_ms() -> u64 {
    250
}
