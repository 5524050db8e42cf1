use fractic_server_error::ServerError;

/// Store-wide monotonic tag attached to every dispatched request. A slice only
/// lets the settlement of its latest request touch `loading`/`error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestSeq(pub(crate) u64);

#[derive(Debug, Clone, PartialEq)]
pub enum RequestPhase<P> {
    Pending,
    Fulfilled(P),
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Request<P> {
    pub seq: RequestSeq,
    pub phase: RequestPhase<P>,
}

impl<P> Request<P> {
    pub fn pending(seq: RequestSeq) -> Self {
        Self {
            seq,
            phase: RequestPhase::Pending,
        }
    }

    pub fn fulfilled(seq: RequestSeq, payload: P) -> Self {
        Self {
            seq,
            phase: RequestPhase::Fulfilled(payload),
        }
    }

    pub fn rejected(seq: RequestSeq, message: impl Into<String>) -> Self {
        Self {
            seq,
            phase: RequestPhase::Rejected(message.into()),
        }
    }
}

/// A remote call that did not succeed. `message` is the human-readable text
/// recorded on the slice; `error` keeps the full diagnostic.
#[derive(Debug)]
pub struct RequestFailure {
    message: String,
    error: ServerError,
}

impl RequestFailure {
    /// Message recorded when the server could not be reached at all.
    pub const NETWORK_ERROR: &'static str = "Network Error";

    pub fn new(message: impl Into<String>, error: ServerError) -> Self {
        Self {
            message: message.into(),
            error,
        }
    }

    pub fn network(error: ServerError) -> Self {
        Self::new(Self::NETWORK_ERROR, error)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn error(&self) -> &ServerError {
        &self.error
    }
}

/// Local failures (token storage, response validation) carry no separate
/// user-facing text.
impl From<ServerError> for RequestFailure {
    fn from(error: ServerError) -> Self {
        Self {
            message: error.to_string(),
            error,
        }
    }
}

impl std::fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
