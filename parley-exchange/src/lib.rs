//! Mechanism-agnostic negotiation engine for challenge-response
//! authentication exchanges.
//!
//! This crate is intentionally IO-free:
//! - No network calls
//! - No filesystem operations
//! - No outer-protocol parsing
//! - No credential storage
//!
//! The per-algorithm step logic is injected via a trait:
//! - [`Mechanism`] - token generation for the opening message and for each
//!   answer to a server challenge
//!
//! An external transport layer owns an [`Exchange`] and drives it forward
//! one received challenge at a time with [`Exchange::step`], ships the bytes
//! in [`Exchange::response`] after each step, and decides when to terminate
//! the session based on the returned round-trip flag and error.
//!
//! # Example
//!
//! ```
//! use parley_exchange::{Exchange, ExchangeError, FnMechanism, Phase, Response};
//!
//! // A toy single-round mechanism: send an identity token, then expect the
//! // server to acknowledge it.
//! let mechanism = FnMechanism::new(
//!     |_phase| Ok(Response::expecting_more(b"user\x00token")),
//!     |_phase, challenge: &[u8]| {
//!         if challenge == b"ok" {
//!             Ok(Response::last(Vec::new()))
//!         } else {
//!             Err(ExchangeError::AuthenticationFailed)
//!         }
//!     },
//! );
//!
//! let mut exchange = Exchange::new("TOY", &mechanism);
//!
//! // The first step always runs the initiator; the challenge is ignored.
//! let more = exchange.step(&[])?;
//! assert!(more);
//! assert_eq!(exchange.response(), b"user\x00token");
//! assert_eq!(exchange.phase(), Phase::INITIATOR_TOKEN_SENT);
//!
//! // Feed the server's reply back in to finish the attempt.
//! let more = exchange.step(b"ok")?;
//! assert!(!more);
//! # Ok::<(), parley_exchange::ExchangeError>(())
//! ```

pub mod exchange;
pub mod mechanism;

pub use exchange::{Exchange, ExchangeError, Phase};
pub use mechanism::{FnMechanism, Mechanism, Response};
