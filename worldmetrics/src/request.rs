//! Request outcomes and last-request-wins tracking.

use std::collections::HashMap;

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Outcome of an asynchronous request.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState<T = ()> {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// Request sent, no response yet.
    Pending,
    /// Response received and applied.
    Succeeded(T),
    /// Request failed; the reason is shown to the user.
    Failed(String),
}

impl<T> RequestState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending)
    }

    /// The successful payload, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            RequestState::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    /// The failure reason, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

impl<T> From<Result<T, String>> for RequestState<T> {
    fn from(result: Result<T, String>) -> Self {
        match result {
            Ok(value) => RequestState::Succeeded(value),
            Err(reason) => RequestState::Failed(reason),
        }
    }
}

/// Hands out request ids and remembers which one is current.
///
/// Starting a request supersedes every earlier one, so a response is applied
/// only if it belongs to the most recently started request.
#[derive(Debug, Default)]
pub struct RequestTracker {
    issued: u64,
    current: Option<RequestId>,
}

impl RequestTracker {
    /// Start a new request, superseding any outstanding one.
    pub fn begin(&mut self) -> RequestId {
        self.issued += 1;
        let id = RequestId(self.issued);
        self.current = Some(id);
        id
    }

    /// Whether `id` is the outstanding request.
    pub fn is_current(&self, id: RequestId) -> bool {
        self.current == Some(id)
    }

    /// Settle a response. Returns `false` for stale responses, which must be dropped.
    pub fn finish(&mut self, id: RequestId) -> bool {
        if self.is_current(id) {
            self.current = None;
            true
        } else {
            false
        }
    }

    /// The outstanding request, if any.
    pub fn current(&self) -> Option<RequestId> {
        self.current
    }

    /// Total number of requests started.
    pub fn issued(&self) -> u64 {
        self.issued
    }
}

/// Last-request-wins tracking for independent keys, one outstanding request per key.
///
/// Ids are unique across keys and survive [`clear`](Self::clear), so a response
/// issued before a clear never matches a later request for the same key.
#[derive(Debug, Default)]
pub struct KeyedRequestTracker {
    issued: u64,
    current: HashMap<String, RequestId>,
}

impl KeyedRequestTracker {
    /// Start a request for `key`, superseding the outstanding one for that key.
    pub fn begin(&mut self, key: &str) -> RequestId {
        self.issued += 1;
        let id = RequestId(self.issued);
        self.current.insert(key.to_string(), id);
        id
    }

    /// The outstanding request for `key`, if any.
    pub fn current(&self, key: &str) -> Option<RequestId> {
        self.current.get(key).copied()
    }

    /// Settle a response for `key`. Returns `false` for stale responses.
    pub fn finish(&mut self, key: &str, id: RequestId) -> bool {
        if self.current(key) == Some(id) {
            self.current.remove(key);
            true
        } else {
            false
        }
    }

    /// Supersede every outstanding request.
    pub fn clear(&mut self) {
        self.current.clear();
    }
}
