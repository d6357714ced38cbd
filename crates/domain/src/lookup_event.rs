use crate::{ResolvedRecord, ServerEndpoint};
use serde::Serialize;
use std::fmt;

/// A failed per-server query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupError {
    pub message: String,

    /// `None` only when there was no server to ask at all.
    pub server: Option<ServerEndpoint>,

    pub query_name: String,

    /// Set when the failing query was a CNAME follow-up.
    pub chase: bool,
}

impl LookupError {
    pub fn new(message: impl Into<String>, server: ServerEndpoint, query_name: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            server: Some(server),
            query_name: query_name.into(),
            chase: false,
        }
    }

    pub fn no_servers() -> Self {
        Self {
            message: "no DNS servers configured".to_string(),
            server: None,
            query_name: String::new(),
            chase: false,
        }
    }

    pub fn as_chase(mut self) -> Self {
        self.chase = true;
        self
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.server {
            Some(server) => write!(f, "{} ({} @{})", self.message, self.query_name, server)?,
            None => write!(f, "{}", self.message)?,
        }
        if self.chase {
            write!(f, " [cname]")?;
        }
        Ok(())
    }
}

impl std::error::Error for LookupError {}

/// Outcome of a reverse lookup: the server that answered and its PTR names,
/// or the last server tried and no names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PtrResult {
    pub server: ServerEndpoint,

    pub names: Vec<String>,
}

impl PtrResult {
    pub fn new(server: ServerEndpoint, names: Vec<String>) -> Self {
        Self { server, names }
    }

    pub fn is_resolved(&self) -> bool {
        !self.names.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LookupSummary {
    pub hosts: usize,

    pub servers: usize,

    pub queries: usize,

    pub records: usize,

    pub errors: usize,

    pub cancelled: bool,
}

/// One message of the bulk lookup stream. `Complete` is always the last one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum LookupEvent {
    Record(ResolvedRecord),
    Error(LookupError),
    Complete(LookupSummary),
}

impl LookupEvent {
    pub fn is_complete(&self) -> bool {
        matches!(self, LookupEvent::Complete(_))
    }
}
