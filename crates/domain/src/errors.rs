use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Classification daemon timeout connecting to {server}")]
    DaemonConnectTimeout { server: String },

    #[error("Classification daemon unreachable at {server}: {reason}")]
    DaemonUnreachable { server: String, reason: String },

    #[error("Classification daemon at {server} did not answer within the read timeout")]
    DaemonReadTimeout { server: String },

    #[error("Classification daemon at {server} closed the connection without a response")]
    DaemonClosed { server: String },

    #[error("Classification daemon response exceeded {limit} bytes")]
    DaemonResponseTooLarge { limit: usize },

    #[error("Invalid classification response: {0}")]
    InvalidDaemonResponse(String),

    #[error("Classification response contained no verdicts")]
    EmptyDaemonResponse,

    #[error("Failed to read policy file {path}: {reason}")]
    PolicyFileRead { path: String, reason: String },

    #[error("Failed to parse policy file {path}: {reason}")]
    PolicyFileParse { path: String, reason: String },

    #[error("Policy configuration root unavailable {path}: {reason}")]
    PolicyRootUnavailable { path: String, reason: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
