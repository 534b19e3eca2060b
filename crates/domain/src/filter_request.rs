use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    AAAA,
    Other(u16),
}

impl RecordType {
    pub fn is_address(&self) -> bool {
        matches!(self, RecordType::A | RecordType::AAAA)
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A" => Ok(RecordType::A),
            "AAAA" => Ok(RecordType::AAAA),
            _ => Err(format!("Unsupported record type: {}", s)),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordType::A => write!(f, "A"),
            RecordType::AAAA => write!(f, "AAAA"),
            RecordType::Other(code) => write!(f, "TYPE{}", code),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryClass {
    /// INET
    IN,
    Other(u16),
}

/// Query handed over by the dispatcher.
#[derive(Debug, Clone)]
pub struct FilterRequest {
    pub query_name: Arc<str>,
    pub client_address: Arc<str>,
    pub query_class: QueryClass,
    pub record_type: RecordType,
}

impl FilterRequest {
    pub fn new(query_name: &str, client_address: &str, record_type: RecordType) -> Self {
        Self {
            query_name: Arc::from(query_name),
            client_address: Arc::from(client_address),
            query_class: QueryClass::IN,
            record_type,
        }
    }

    pub fn with_class(mut self, query_class: QueryClass) -> Self {
        self.query_class = query_class;
        self
    }

    /// Only INET A/AAAA queries are subject to filtering.
    pub fn is_filterable(&self) -> bool {
        self.query_class == QueryClass::IN && self.record_type.is_address()
    }
}

/// What the dispatcher should do with the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    /// No opinion; continue normal resolution.
    PassThrough,
    /// Answer the query with this address.
    Answer(IpAddr),
}

impl FilterOutcome {
    pub fn is_blocked(&self) -> bool {
        matches!(self, FilterOutcome::Answer(_))
    }
}

impl fmt::Display for FilterOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterOutcome::PassThrough => write!(f, "pass"),
            FilterOutcome::Answer(addr) => write!(f, "block -> {}", addr),
        }
    }
}
