//! Sequential page fetch task.
//!
//! [`PageFetcher`] walks pages `1..=page_count` one request at a time. It owns no
//! I/O: every transition returns a [`FetchStep`] telling the host what to do
//! next (sleep, issue a request, append a page), and the host feeds timer and
//! response events back in.
//!
//! ```text
//! Idle ──start──▶ WarmingUp ──timer──▶ Awaiting(1) ──2xx──▶ Awaiting(2) ─ … ─▶ Completed
//!                                          │
//!                                          └──non-2xx──▶ Aborted
//! any ──cancel──▶ Cancelled
//! ```
//!
//! Responses are matched against the ticket of the page currently awaited.
//! Anything else is stale or foreign and is ignored, which also covers events
//! that arrive after [`PageFetcher::cancel`].

use super::request::{FetchSettings, FetchTicket, PageRequest, RequestBuilder};
use crate::domain::payload::{decode_page, PageDecode};
use crate::domain::{Result, TagTableError};

/// Longest slice of a failed response body kept in the error message.
const ERROR_BODY_LIMIT: usize = 200;

/// Lifecycle of a fetch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    /// Not started.
    Idle,
    /// Waiting out the warm-up delay.
    WarmingUp,
    /// Request for `page` is outstanding.
    Awaiting { page: u32 },
    /// Every page was attempted successfully.
    Completed,
    /// A request failed; remaining pages were not requested.
    Aborted,
    /// Torn down by the host.
    Cancelled,
}

impl FetchPhase {
    /// Whether no further steps will ever be produced.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Aborted | Self::Cancelled)
    }
}

/// What the host must do after a transition.
#[derive(Debug)]
pub enum FetchStep {
    /// Schedule a timer and report back via [`PageFetcher::on_timer`].
    Wait { seconds: f64 },
    /// Issue this request and report back via [`PageFetcher::on_response`].
    Request(PageRequest),
    /// Append `decoded`, then issue `next`. `None` means the run completed.
    Deliver {
        page: u32,
        decoded: PageDecode,
        next: Option<PageRequest>,
    },
    /// Nothing to fetch: the run completed without requests.
    Complete,
    /// The run aborted on a failed request.
    Abort(TagTableError),
    /// The event did not belong to the current run.
    Ignore,
}

/// Strictly sequential fetcher over a fixed page range.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    run: u64,
    page_count: u32,
    warmup_seconds: f64,
    requests: RequestBuilder,
    phase: FetchPhase,
}

impl PageFetcher {
    /// Creates a fetcher for one run.
    ///
    /// `run` must differ between fetchers that can be alive in the same plugin
    /// instance; it is how responses are told apart.
    ///
    /// # Errors
    ///
    /// Returns [`TagTableError::Endpoint`] if the configured endpoint is not a
    /// valid absolute URL.
    pub fn new(settings: &FetchSettings, run: u64) -> Result<Self> {
        Ok(Self {
            run,
            page_count: settings.page_count,
            warmup_seconds: settings.warmup_seconds,
            requests: RequestBuilder::new(settings)?,
            phase: FetchPhase::Idle,
        })
    }

    #[must_use]
    pub const fn phase(&self) -> FetchPhase {
        self.phase
    }

    #[must_use]
    pub const fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Starts the run with the warm-up delay.
    ///
    /// A non-positive delay skips straight to the first request. Calling
    /// `start` on a run that already left `Idle` is ignored.
    pub fn start(&mut self) -> FetchStep {
        if self.phase != FetchPhase::Idle {
            return FetchStep::Ignore;
        }

        if self.warmup_seconds > 0.0 {
            tracing::debug!(seconds = self.warmup_seconds, run = self.run, "fetch warm-up");
            self.phase = FetchPhase::WarmingUp;
            FetchStep::Wait {
                seconds: self.warmup_seconds,
            }
        } else {
            self.request_first()
        }
    }

    /// Warm-up delay elapsed.
    pub fn on_timer(&mut self) -> FetchStep {
        if self.phase != FetchPhase::WarmingUp {
            return FetchStep::Ignore;
        }
        self.request_first()
    }

    /// Feeds a web response back into the run.
    ///
    /// `ticket` is whatever was recovered from the response context; responses
    /// without one, or for another page or run, are ignored.
    pub fn on_response(&mut self, ticket: Option<FetchTicket>, status: u16, body: &[u8]) -> FetchStep {
        let FetchPhase::Awaiting { page } = self.phase else {
            tracing::debug!(phase = ?self.phase, ticket = ?ticket, "response outside awaiting phase ignored");
            return FetchStep::Ignore;
        };

        let expected = FetchTicket { run: self.run, page };
        if ticket != Some(expected) {
            tracing::debug!(expected = ?expected, ticket = ?ticket, "stale or foreign response ignored");
            return FetchStep::Ignore;
        }

        if !is_success(status) {
            self.phase = FetchPhase::Aborted;
            let message = truncate_body(body);
            tracing::debug!(page, status, "page request failed, aborting run");
            return FetchStep::Abort(TagTableError::Http {
                page,
                status,
                message,
            });
        }

        let decoded = decode_page(body);
        tracing::debug!(
            page,
            items = decoded.items.len(),
            dropped = decoded.dropped,
            malformed = decoded.malformed,
            "page received"
        );

        let next = if page < self.page_count {
            self.phase = FetchPhase::Awaiting { page: page + 1 };
            Some(self.requests.page(self.run, page + 1))
        } else {
            self.phase = FetchPhase::Completed;
            None
        };

        FetchStep::Deliver {
            page,
            decoded,
            next,
        }
    }

    /// Tears the run down. Later events produce no steps.
    pub fn cancel(&mut self) {
        if !self.phase.is_terminal() {
            tracing::debug!(run = self.run, phase = ?self.phase, "fetch cancelled");
            self.phase = FetchPhase::Cancelled;
        }
    }

    fn request_first(&mut self) -> FetchStep {
        if self.page_count == 0 {
            self.phase = FetchPhase::Completed;
            return FetchStep::Complete;
        }
        self.phase = FetchPhase::Awaiting { page: 1 };
        FetchStep::Request(self.requests.page(self.run, 1))
    }
}

fn is_success(status: u16) -> bool {
    http::StatusCode::from_u16(status).is_ok_and(|s| s.is_success())
}

fn truncate_body(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    match text.char_indices().nth(ERROR_BODY_LIMIT) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(page_count: u32, warmup_seconds: f64) -> FetchSettings {
        FetchSettings {
            page_count,
            warmup_seconds,
            ..FetchSettings::default()
        }
    }

    fn page_body(name: &str) -> Vec<u8> {
        format!(r#"{{"items":[{{"name":"{name}","count":1}}]}}"#).into_bytes()
    }

    fn expect_request(step: FetchStep) -> PageRequest {
        match step {
            FetchStep::Request(request) => request,
            other => panic!("expected request, got {other:?}"),
        }
    }

    #[test]
    fn warms_up_before_first_request() {
        let mut fetcher = PageFetcher::new(&settings(3, 10.0), 1).unwrap();

        assert!(matches!(fetcher.start(), FetchStep::Wait { seconds } if (seconds - 10.0).abs() < f64::EPSILON));
        assert_eq!(fetcher.phase(), FetchPhase::WarmingUp);

        let request = expect_request(fetcher.on_timer());
        assert_eq!(request.ticket, FetchTicket { run: 1, page: 1 });
        assert_eq!(fetcher.phase(), FetchPhase::Awaiting { page: 1 });
    }

    #[test]
    fn zero_warmup_requests_immediately() {
        let mut fetcher = PageFetcher::new(&settings(3, 0.0), 1).unwrap();
        let request = expect_request(fetcher.start());
        assert_eq!(request.ticket.page, 1);
    }

    #[test]
    fn requests_pages_in_order_one_at_a_time() {
        let mut fetcher = PageFetcher::new(&settings(3, 0.0), 9).unwrap();
        let mut request = expect_request(fetcher.start());
        let mut delivered = vec![];

        loop {
            match fetcher.on_response(Some(request.ticket), 200, &page_body("x")) {
                FetchStep::Deliver { page, next, .. } => {
                    delivered.push(page);
                    match next {
                        Some(next) => {
                            assert_eq!(next.ticket.page, page + 1);
                            request = next;
                        }
                        None => break,
                    }
                }
                other => panic!("unexpected step {other:?}"),
            }
        }

        assert_eq!(delivered, [1, 2, 3]);
        assert_eq!(fetcher.phase(), FetchPhase::Completed);
    }

    #[test]
    fn failed_request_aborts_without_retry() {
        let mut fetcher = PageFetcher::new(&settings(5, 0.0), 1).unwrap();
        let first = expect_request(fetcher.start());
        let FetchStep::Deliver { next: Some(second), .. } =
            fetcher.on_response(Some(first.ticket), 200, &page_body("a"))
        else {
            panic!("expected delivery of page 1");
        };

        match fetcher.on_response(Some(second.ticket), 503, b"throttled") {
            FetchStep::Abort(TagTableError::Http { page, status, message }) => {
                assert_eq!(page, 2);
                assert_eq!(status, 503);
                assert_eq!(message, "throttled");
            }
            other => panic!("expected abort, got {other:?}"),
        }
        assert_eq!(fetcher.phase(), FetchPhase::Aborted);

        // A late duplicate of the failed page must not revive the run.
        assert!(matches!(
            fetcher.on_response(Some(second.ticket), 200, &page_body("b")),
            FetchStep::Ignore
        ));
    }

    #[test]
    fn malformed_success_body_still_advances() {
        let mut fetcher = PageFetcher::new(&settings(2, 0.0), 1).unwrap();
        let first = expect_request(fetcher.start());

        match fetcher.on_response(Some(first.ticket), 200, b"<html>") {
            FetchStep::Deliver { decoded, next, .. } => {
                assert!(decoded.malformed);
                assert!(decoded.items.is_empty());
                assert_eq!(next.map(|r| r.ticket.page), Some(2));
            }
            other => panic!("expected delivery, got {other:?}"),
        }
    }

    #[test]
    fn stale_and_foreign_responses_are_ignored() {
        let mut fetcher = PageFetcher::new(&settings(3, 0.0), 5).unwrap();
        let first = expect_request(fetcher.start());

        let other_run = FetchTicket { run: 4, page: 1 };
        assert!(matches!(fetcher.on_response(Some(other_run), 200, b"{}"), FetchStep::Ignore));
        assert!(matches!(fetcher.on_response(None, 200, b"{}"), FetchStep::Ignore));
        let wrong_page = FetchTicket { run: 5, page: 2 };
        assert!(matches!(fetcher.on_response(Some(wrong_page), 200, b"{}"), FetchStep::Ignore));

        assert_eq!(fetcher.phase(), FetchPhase::Awaiting { page: first.ticket.page });
    }

    #[test]
    fn cancel_silences_later_events() {
        let mut fetcher = PageFetcher::new(&settings(3, 10.0), 1).unwrap();
        let _ = fetcher.start();
        fetcher.cancel();

        assert_eq!(fetcher.phase(), FetchPhase::Cancelled);
        assert!(matches!(fetcher.on_timer(), FetchStep::Ignore));
        let ticket = FetchTicket { run: 1, page: 1 };
        assert!(matches!(fetcher.on_response(Some(ticket), 200, b"{}"), FetchStep::Ignore));
    }

    #[test]
    fn cancel_after_completion_keeps_completed() {
        let mut fetcher = PageFetcher::new(&settings(0, 0.0), 1).unwrap();
        assert!(matches!(fetcher.start(), FetchStep::Complete));
        fetcher.cancel();
        assert_eq!(fetcher.phase(), FetchPhase::Completed);
    }

    #[test]
    fn start_twice_is_ignored() {
        let mut fetcher = PageFetcher::new(&settings(1, 1.0), 1).unwrap();
        let _ = fetcher.start();
        assert!(matches!(fetcher.start(), FetchStep::Ignore));
    }

    #[test]
    fn long_error_bodies_are_truncated() {
        let body = "e".repeat(500);
        let message = truncate_body(body.as_bytes());
        assert_eq!(message.len(), ERROR_BODY_LIMIT + 3);
        assert!(message.ends_with("..."));
    }
}
