//! Negotiation state machine and step driver.

mod error;
mod phase;

pub use error::ExchangeError;
pub use phase::Phase;

use zeroize::Zeroizing;

use crate::mechanism::{Mechanism, Response};

/// A single challenge-response authentication attempt.
///
/// The exchange enforces the legal order of steps and carries the
/// mechanism's output between the transport layer's send and receive calls.
/// It performs no I/O itself: the owning transport repeatedly feeds the last
/// received challenge to [`Exchange::step`] and ships the bytes in
/// [`Exchange::response`] after each call.
///
/// One exchange drives exactly one attempt. There is deliberately no reset;
/// recovering from a failed negotiation means constructing a fresh exchange,
/// so a half-stepped attempt can never be silently resumed.
///
/// # Security
///
/// The response buffer may hold credential-derived token material. It is
/// zeroized when replaced and on drop, and `Exchange` implements neither
/// `Debug` nor `Clone` so tokens cannot leak into logs or a forked attempt.
///
/// # Thread Safety
///
/// An exchange is single-owner mutable state with no internal
/// synchronization. `step` takes `&mut self`, so Rust ownership already
/// serializes callers; a negotiation is inherently sequential anyway, since
/// each step needs the previous step's output.
pub struct Exchange<'m> {
    name: String,
    mechanism: &'m dyn Mechanism,
    phase: Phase,
    response: Zeroizing<Vec<u8>>,
    error: Option<ExchangeError>,
}

impl<'m> Exchange<'m> {
    /// Bind a negotiation algorithm name and its mechanism to a new attempt.
    ///
    /// The name is an opaque label carried for the transport layer's
    /// benefit; the core never interprets it. The mechanism is borrowed, not
    /// owned, and is assumed to be well-formed: the core does not validate
    /// its step logic.
    #[must_use]
    pub fn new(name: impl Into<String>, mechanism: &'m dyn Mechanism) -> Self {
        Self {
            name: name.into(),
            mechanism,
            phase: Phase::INITIAL,
            response: Zeroizing::new(Vec::new()),
            error: None,
        }
    }

    /// Advance the negotiation by one step.
    ///
    /// Dispatches to the mechanism's initiator on the first call (the
    /// challenge bytes are ignored) and to its continuer on every later
    /// call, handing over the pre-transition phase. The phase advances even
    /// when the mechanism fails, so a repeated call never re-runs a step.
    ///
    /// Returns whether the mechanism expects another round trip; the new
    /// token bytes are available from [`Exchange::response`].
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::InvalidState`] if the phase tag has been
    /// corrupted, without invoking the mechanism or advancing the phase.
    /// Any other error comes from the mechanism verbatim and becomes the
    /// sticky [`Exchange::last_error`], after which this exchange is dead.
    ///
    /// # Panics
    ///
    /// Panics when called after a sticky error. Stepping a failed
    /// negotiation is a contract violation, not a recoverable condition:
    /// continuing could leak authentication state or retry with stale data.
    /// Construct a new exchange instead.
    pub fn step(&mut self, challenge: &[u8]) -> Result<bool, ExchangeError> {
        if let Some(error) = self.error {
            panic!(
                "exchange {} stepped after a fatal error: {error}",
                self.name
            );
        }

        let phase = self.phase;
        let produced = match phase {
            Phase::INITIAL => {
                let produced = self.mechanism.start(phase);
                self.phase = Phase::INITIATOR_TOKEN_SENT;
                produced
            }
            Phase::INITIATOR_TOKEN_SENT => {
                let produced = self.mechanism.next(phase, challenge);
                self.phase = Phase::RESPONSE_SENT;
                produced
            }
            Phase::RESPONSE_SENT => {
                let produced = self.mechanism.next(phase, challenge);
                self.phase = Phase::SERVER_VALIDATED;
                produced
            }
            Phase::SERVER_VALIDATED => self.mechanism.next(phase, challenge),
            _ => return Err(ExchangeError::InvalidState),
        };

        match produced {
            Ok(Response { bytes, more }) => {
                self.response = Zeroizing::new(bytes);
                tracing::trace!(
                    mechanism = %self.name,
                    phase = %self.phase,
                    more,
                    "exchange advanced"
                );
                Ok(more)
            }
            Err(error) => {
                self.response = Zeroizing::new(Vec::new());
                self.error = Some(error);
                tracing::debug!(
                    mechanism = %self.name,
                    phase = %self.phase,
                    %error,
                    "mechanism reported failure"
                );
                Err(error)
            }
        }
    }

    /// Identifying name of the negotiation algorithm in use.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current phase, for transport-layer branching and logging.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Token bytes produced by the most recent step.
    ///
    /// A read-only snapshot: the buffer is replaced wholesale by the next
    /// step, so callers must not hold onto the slice across steps.
    #[must_use]
    pub fn response(&self) -> &[u8] {
        &self.response
    }

    /// The sticky error recorded by a failed step, `None` until one fails.
    #[must_use]
    pub fn last_error(&self) -> Option<ExchangeError> {
        self.error
    }

    /// Force the phase tag, bypassing normal sequencing.
    #[cfg(test)]
    pub(crate) fn force_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }
}
