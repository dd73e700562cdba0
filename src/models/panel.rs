//! Per-panel view state.
//!
//! Every panel owns one `PanelState`: the collection it renders, the error
//! messages to show above it, and a request generation. A fetch result is
//! only applied when it belongs to the most recent request of a panel that
//! is still open, so a slow response can never overwrite a newer one.

use std::future::Future;

use crate::api::ApiError;

/// Proof that a request was started; returned by [`PanelState::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct RequestTicket {
    generation: u64,
}

#[derive(Debug)]
pub struct PanelState<T> {
    data: T,
    errors: Vec<String>,
    generation: u64,
    closed: bool,
}

impl<T: Default> Default for PanelState<T> {
    fn default() -> Self {
        Self {
            data: T::default(),
            errors: Vec::new(),
            generation: 0,
            closed: false,
        }
    }
}

impl<T: Default> PanelState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request; any ticket handed out earlier becomes stale.
    pub fn begin(&mut self) -> RequestTicket {
        self.generation += 1;
        RequestTicket { generation: self.generation }
    }

    /// Apply the outcome of the request identified by `ticket`.
    ///
    /// Returns `false` (and leaves the state untouched) when the ticket is
    /// stale or the panel was closed. A failed fetch empties the collection
    /// and records a message naming `what` was being loaded.
    pub fn finish(&mut self, ticket: RequestTicket, result: Result<T, ApiError>, what: &str) -> bool {
        if self.closed || ticket.generation != self.generation {
            log::debug!(
                "Discarding stale {what} response (request #{}, latest #{}, closed: {})",
                ticket.generation,
                self.generation,
                self.closed
            );
            return false;
        }

        match result {
            Ok(data) => self.data = data,
            Err(e) => {
                log::error!("Failed to load {what}: {e}");
                self.data = T::default();
                self.errors.push(format!("Could not load {what}: {}", e.user_message()));
            }
        }
        true
    }

    /// Begin a request, await `fetch` and apply its result.
    pub async fn load<F>(&mut self, what: &str, fetch: F) -> bool
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        let ticket = self.begin();
        let result = fetch.await;
        self.finish(ticket, result, what)
    }

    /// Record a failed create/update/delete. The collection is left as is.
    pub fn mutation_failed(&mut self, action: &str, err: &ApiError) {
        self.errors.push(mutation_error(action, err));
    }

    /// Record messages that never reached the API (e.g. blank fields).
    pub fn reject(&mut self, messages: Vec<String>) {
        self.errors.extend(messages);
    }

    /// Stop accepting results; everything still in flight is discarded.
    ///
    /// Request handlers render and drop their panel within one request, so
    /// they never need this. It is for a caller that keeps a panel alive
    /// across fetches and abandons it before a result lands.
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_parts(self) -> (T, Vec<String>) {
        (self.data, self.errors)
    }
}

/// Log a failed create/update/delete and word it for the operator.
pub fn mutation_error(action: &str, err: &ApiError) -> String {
    log::error!("Failed to {action}: {err}");
    format!("Could not {action}: {}", err.user_message())
}
