// src/app/state.rs
//! Per-screen request lifecycle.

/// What a screen shows for its backend call.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ScreenState<T> {
    #[default]
    Idle,
    Submitting,
    Success(T),
    Failed(String),
}

/// Identifies one submission; completions carrying an older ticket are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// A screen's single request slot: at most one submission is in flight.
#[derive(Debug, Clone, Default)]
pub struct Request<T> {
    state: ScreenState<T>,
    issued: u64,
}

impl<T> Request<T> {
    pub fn new() -> Self {
        Request { state: ScreenState::Idle, issued: 0 }
    }

    pub fn state(&self) -> &ScreenState<T> {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, ScreenState::Submitting)
    }

    pub fn result(&self) -> Option<&T> {
        match &self.state {
            ScreenState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ScreenState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    /// Moves to `Submitting`. Refused while a submission is in flight.
    pub fn begin(&mut self) -> Option<Ticket> {
        if self.is_busy() {
            return None;
        }
        self.issued += 1;
        self.state = ScreenState::Submitting;
        Some(Ticket(self.issued))
    }

    /// Applies a completion. Returns false, leaving the state alone, when the
    /// ticket is stale or nothing is in flight.
    pub fn complete(&mut self, ticket: Ticket, outcome: Result<T, String>) -> bool {
        if !self.is_busy() || ticket.0 != self.issued {
            tracing::debug!(ticket = ticket.0, current = self.issued, "dropping stale completion");
            return false;
        }
        self.state = match outcome {
            Ok(value) => ScreenState::Success(value),
            Err(msg) => ScreenState::Failed(msg),
        };
        true
    }

    /// Back to `Idle`. An in-flight completion arriving later is discarded.
    pub fn reset(&mut self) {
        self.state = ScreenState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut req: Request<u32> = Request::new();
        assert_eq!(req.state(), &ScreenState::Idle);

        let ticket = req.begin().unwrap();
        assert!(req.is_busy());
        assert!(req.complete(ticket, Ok(7)));
        assert_eq!(req.result(), Some(&7));
    }

    #[test]
    fn test_single_in_flight() {
        let mut req: Request<u32> = Request::new();
        let _ticket = req.begin().unwrap();
        assert!(req.begin().is_none());
    }

    #[test]
    fn test_failure_then_resubmit() {
        let mut req: Request<u32> = Request::new();
        let first = req.begin().unwrap();
        req.complete(first, Err("Server responded with 500".into()));
        assert_eq!(req.error(), Some("Server responded with 500"));

        let second = req.begin().unwrap();
        assert_ne!(first, second);
        assert!(!req.complete(first, Ok(1)));
        assert!(req.complete(second, Ok(2)));
        assert_eq!(req.result(), Some(&2));
    }

    #[test]
    fn test_reset_discards_in_flight_result() {
        let mut req: Request<u32> = Request::new();
        let ticket = req.begin().unwrap();
        req.reset();
        assert!(!req.complete(ticket, Ok(1)));
        assert_eq!(req.state(), &ScreenState::Idle);
    }
}
