//! BOSH transport request bookkeeping.
//!
//! This module models the client side of one BOSH exchange. The actual HTTP
//! transport and the scheduling policy (when to send, retry, or give up)
//! live outside this crate; what lives here is the state those collaborators
//! share: request identity, retry counters, timing, and response decoding.
//!
//! # Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Request`] | One outgoing stanza with its BOSH bookkeeping |
//! | [`StateHandler`] | Manager callback invoked on state changes |
//! | [`next_request_id`] | The process-wide monotonic id sequence |

mod request;

pub use request::{next_request_id, Request, StateHandler};
