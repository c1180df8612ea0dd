//! Negotiation error vocabulary.

/// Errors surfaced while stepping a negotiation exchange.
///
/// Apart from [`ExchangeError::InvalidState`], every variant originates in
/// the mechanism and is stored and returned verbatim; the core never
/// interprets, maps, or retries mechanism failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ExchangeError {
    /// The exchange phase tag is outside the known set. Signals a bug in the
    /// core rather than a failed negotiation; never recorded as sticky.
    #[error("invalid exchange state")]
    InvalidState,

    /// The mechanism rejected the peer's credentials or response.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The authenticated identity is not permitted the requested role or
    /// identity.
    #[error("authorization failed")]
    AuthorizationFailed,

    /// The mechanism's protocol-defined step limit was exceeded. Reserved
    /// for mechanism implementations; the core never generates it.
    #[error("step called too many times")]
    TooManySteps,
}
