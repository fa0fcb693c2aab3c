use std::fmt;

pub type RequestId = u64;

/// One generated card. Identity is positional; duplicate terms are allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashcardRecord {
    pub emoji: String,
    pub term: String,
    pub definition: String,
}

/// A `term: definition` line from user-supplied input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermDefinitionPair {
    pub term: String,
    pub definition: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    GenerationCompleted {
        request_id: RequestId,
        result: Result<Vec<FlashcardRecord>, GenerationError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("topic is empty")]
    EmptyTopic,
    #[error("invalid term:definition format")]
    Validation,
    #[error("no flashcards could be produced")]
    NoFlashcards,
    #[error("text generation failed: {0}")]
    Service(#[from] ServiceError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ServiceError {
    pub kind: ServiceFailure,
    pub message: String,
}

impl ServiceError {
    pub fn new(kind: ServiceFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceFailure {
    InvalidEndpoint,
    HttpStatus(u16),
    Timeout,
    Network,
    MalformedResponse,
    EmptyResponse,
}

impl fmt::Display for ServiceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceFailure::InvalidEndpoint => write!(f, "invalid endpoint"),
            ServiceFailure::HttpStatus(code) => write!(f, "http status {code}"),
            ServiceFailure::Timeout => write!(f, "timeout"),
            ServiceFailure::Network => write!(f, "network error"),
            ServiceFailure::MalformedResponse => write!(f, "malformed response"),
            ServiceFailure::EmptyResponse => write!(f, "empty response"),
        }
    }
}
