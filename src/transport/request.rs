//! A single outgoing BOSH request and its bookkeeping.
//!
//! [`Request`] is a plain record owned by the connection manager. It holds
//! the stanza and its serialized bytes (snapshotted at construction), the
//! BOSH `rid` correlating it to the session's request sequence, and the
//! retry and timing state the manager needs to honor BOSH's
//! exactly-once-delivery-with-retransmission contract: how many times the
//! payload went out, when it last went out, when it was declared dead, and
//! whether it has been aborted.
//!
//! Nothing here performs I/O. Sending, retrying, and destroying requests is
//! the manager's job; this type only keeps the books and decodes response
//! bodies.

use crate::error::Result;
use crate::xml::{self, Element};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::error;

/// Process-wide request id sequence. Starts at 0, never reset, never reused.
static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Draw the next request id from the process-wide sequence.
///
/// Ids are unique and increase monotonically, including under concurrent
/// request creation. This is the only way to obtain one.
pub fn next_request_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Callback invoked by the connection manager when a request's state
/// changes, carrying the decoded response element when one is available.
pub type StateHandler = Box<dyn FnMut(Option<&Element>) + Send>;

/// One outgoing BOSH exchange.
///
/// # Lifecycle
///
/// 1. Created when a stanza is queued; the stanza is serialized immediately
///    and both forms are kept as an immutable snapshot.
/// 2. The manager stamps each transmission via [`mark_sent`](Request::mark_sent)
///    (the same object is re-sent on retry rather than recreated).
/// 3. On a dead connection the manager stamps [`mark_dead`](Request::mark_dead);
///    [`abort`](Request::abort) cooperatively stops further retransmission.
/// 4. The manager drops the request once acknowledged or permanently failed.
pub struct Request {
    id: u64,
    stanza: Element,
    body: String,
    rid: String,
    sends: u32,
    sent_at: Option<Instant>,
    died_at: Option<Instant>,
    aborted: bool,
    on_state_change: StateHandler,
}

impl Request {
    /// Create a request for `stanza`, serializing it immediately.
    ///
    /// `rid` is the BOSH request id assigned by the session, not generated
    /// here. The send count starts at zero; use
    /// [`with_sends`](Request::with_sends) when resuming a partially
    /// transmitted exchange.
    pub fn new(stanza: Element, on_state_change: StateHandler, rid: impl Into<String>) -> Self {
        Self::with_sends(stanza, on_state_change, rid, 0)
    }

    /// Like [`new`](Request::new), with a caller-supplied initial send count.
    pub fn with_sends(
        stanza: Element,
        on_state_change: StateHandler,
        rid: impl Into<String>,
        sends: u32,
    ) -> Self {
        let body = stanza.to_string();
        Request {
            id: next_request_id(),
            stanza,
            body,
            rid: rid.into(),
            sends,
            sent_at: None,
            died_at: None,
            aborted: false,
            on_state_change,
        }
    }

    /// Process-unique id of this request.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The BOSH `rid` correlating this request to the session sequence.
    pub fn rid(&self) -> &str {
        &self.rid
    }

    /// The stanza as built.
    pub fn stanza(&self) -> &Element {
        &self.stanza
    }

    /// The wire-ready serialized form of the stanza.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// How many times this exact payload has been transmitted.
    pub fn sends(&self) -> u32 {
        self.sends
    }

    /// When the payload last went out, if ever.
    pub fn sent_at(&self) -> Option<Instant> {
        self.sent_at
    }

    /// When the request was declared dead, if ever.
    pub fn died_at(&self) -> Option<Instant> {
        self.died_at
    }

    /// Record one transmission: stamps `sent_at` and bumps the send count.
    pub fn mark_sent(&mut self) {
        self.sent_at = Some(Instant::now());
        self.sends += 1;
    }

    /// Record that the connection carrying this request died.
    pub fn mark_dead(&mut self) {
        self.died_at = Some(Instant::now());
    }

    /// Override the last-sent timestamp. The manager owns this field; the
    /// request only reads it back through [`age`](Request::age).
    pub fn set_sent_at(&mut self, at: Option<Instant>) {
        self.sent_at = at;
    }

    /// Override the died timestamp, read back through
    /// [`time_dead`](Request::time_dead).
    pub fn set_died_at(&mut self, at: Option<Instant>) {
        self.died_at = at;
    }

    /// Cooperatively cancel: the manager must not retransmit once set.
    pub fn abort(&mut self) {
        self.aborted = true;
    }

    /// Whether this request has been aborted.
    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    /// Elapsed time since the last transmission, or zero if never sent.
    ///
    /// Backed by [`Instant`], so repeated calls are non-decreasing while
    /// `sent_at` is fixed.
    pub fn age(&self) -> Duration {
        match self.sent_at {
            Some(at) => at.elapsed(),
            None => Duration::ZERO,
        }
    }

    /// Elapsed time since the request was declared dead, or zero if it
    /// never died. Measured from `died_at`, independent of `sent_at`.
    pub fn time_dead(&self) -> Duration {
        match self.died_at {
            Some(at) => at.elapsed(),
            None => Duration::ZERO,
        }
    }

    /// Invoke the state-change handler with an optional decoded response.
    pub fn notify(&mut self, response: Option<&Element>) {
        (self.on_state_change)(response);
    }

    /// Decode a raw response body into its root element.
    ///
    /// This is the only point where malformed server output is detected, so
    /// a failure is logged with the diagnostic and the raw body before the
    /// error propagates. A failed decode never yields a partial element.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::BoshError::XmlParse`] when `raw` is not
    /// well-formed XML or contains no root element.
    pub fn decode_response(&self, raw: &str) -> Result<Element> {
        xml::parse(raw).map_err(|e| {
            error!(
                request_id = self.id,
                rid = %self.rid,
                error = %e,
                body = raw,
                "failed to decode response body"
            );
            e
        })
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("id", &self.id)
            .field("rid", &self.rid)
            .field("sends", &self.sends)
            .field("sent_at", &self.sent_at)
            .field("died_at", &self.died_at)
            .field("aborted", &self.aborted)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}
