//! Mechanism-supplied step logic.
//!
//! A mechanism encapsulates one concrete challenge-response algorithm's
//! token generation. The exchange core owns sequencing; the mechanism owns
//! the bytes.

use crate::exchange::{ExchangeError, Phase};

/// One outgoing message produced by a mechanism.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    /// Raw token bytes for the transport layer to frame and send.
    pub bytes: Vec<u8>,
    /// Whether the mechanism expects another round trip after this message.
    pub more: bool,
}

impl Response {
    /// A message after which the mechanism expects another server round trip.
    #[must_use]
    pub fn expecting_more(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            more: true,
        }
    }

    /// The mechanism's final message for this attempt.
    #[must_use]
    pub fn last(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            more: false,
        }
    }
}

/// A concrete challenge-response authentication algorithm.
///
/// Implementations produce opaque token bytes; how they are framed and moved
/// across the wire is the transport layer's concern. The exchange passes the
/// pre-transition phase to every call so a mechanism can branch on where the
/// negotiation stands without tracking position itself.
///
/// # Interior Mutability
///
/// Both methods take `&self` so a mechanism can be borrowed by an exchange
/// for the duration of an attempt. Implementations that accumulate
/// per-attempt state (nonces, proofs, round counters) should use interior
/// mutability; this is sound because an exchange is single-owner and
/// serializes all mechanism calls.
pub trait Mechanism {
    /// Produce the opening token. Called exactly once, before any challenge
    /// has been received; `phase` is always [`Phase::INITIAL`].
    ///
    /// # Errors
    ///
    /// Returns the mechanism's failure verbatim; the exchange records it as
    /// its sticky error.
    fn start(&self, phase: Phase) -> Result<Response, ExchangeError>;

    /// Produce the next token given the latest server challenge.
    ///
    /// # Errors
    ///
    /// Returns the mechanism's failure verbatim; the exchange records it as
    /// its sticky error.
    fn next(&self, phase: Phase, challenge: &[u8]) -> Result<Response, ExchangeError>;
}

/// A [`Mechanism`] backed by a pair of closures.
///
/// Keeps one-off mechanisms and test fixtures free of boilerplate: the first
/// closure is the initiator, the second the continuer.
pub struct FnMechanism<S, N> {
    start: S,
    next: N,
}

impl<S, N> FnMechanism<S, N>
where
    S: Fn(Phase) -> Result<Response, ExchangeError>,
    N: Fn(Phase, &[u8]) -> Result<Response, ExchangeError>,
{
    /// Bundle an initiator and a continuer closure into a mechanism.
    #[must_use]
    pub fn new(start: S, next: N) -> Self {
        Self { start, next }
    }
}

impl<S, N> Mechanism for FnMechanism<S, N>
where
    S: Fn(Phase) -> Result<Response, ExchangeError>,
    N: Fn(Phase, &[u8]) -> Result<Response, ExchangeError>,
{
    fn start(&self, phase: Phase) -> Result<Response, ExchangeError> {
        (self.start)(phase)
    }

    fn next(&self, phase: Phase, challenge: &[u8]) -> Result<Response, ExchangeError> {
        (self.next)(phase, challenge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_constructors_set_the_more_flag() {
        let open = Response::expecting_more(b"abc");
        assert!(open.more);
        assert_eq!(open.bytes, b"abc");

        let closing = Response::last(Vec::new());
        assert!(!closing.more);
        assert!(closing.bytes.is_empty());
    }

    #[test]
    fn fn_mechanism_dispatches_to_the_matching_closure() {
        let mechanism = FnMechanism::new(
            |phase| {
                assert_eq!(phase, Phase::INITIAL);
                Ok(Response::expecting_more(b"opening"))
            },
            |phase, challenge: &[u8]| {
                assert_eq!(phase, Phase::INITIATOR_TOKEN_SENT);
                assert_eq!(challenge, b"nonce");
                Ok(Response::last(b"answer"))
            },
        );

        let opening = mechanism.start(Phase::INITIAL).unwrap();
        assert_eq!(opening.bytes, b"opening");

        let answer = mechanism
            .next(Phase::INITIATOR_TOKEN_SENT, b"nonce")
            .unwrap();
        assert_eq!(answer.bytes, b"answer");
        assert!(!answer.more);
    }

    #[test]
    fn fn_mechanism_propagates_closure_failures() {
        let mechanism = FnMechanism::new(
            |_phase| Err(ExchangeError::AuthenticationFailed),
            |_phase, _challenge: &[u8]| Err(ExchangeError::AuthorizationFailed),
        );

        assert_eq!(
            mechanism.start(Phase::INITIAL).unwrap_err(),
            ExchangeError::AuthenticationFailed
        );
        assert_eq!(
            mechanism.next(Phase::RESPONSE_SENT, b"").unwrap_err(),
            ExchangeError::AuthorizationFailed
        );
    }
}
