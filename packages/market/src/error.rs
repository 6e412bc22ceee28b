//! Error taxonomy shared by the backend seam and the dispatcher.

use thiserror::Error;

/// Fallback shown when the server rejects a request without a message.
pub const DEFAULT_REJECTION: &str = "요청을 처리하지 못했습니다.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarketError {
    /// The request never produced a usable response: network failure, a
    /// non-JSON body, or a payload that did not decode.
    #[error("transport error: {0}")]
    Transport(String),
    /// The server answered `success: false`.
    #[error("{0}")]
    Rejected(String),
    /// Blocked on the client before any request was sent.
    #[error("{0}")]
    Invalid(String),
}

impl MarketError {
    /// Build a rejection from an optional server message.
    pub fn rejected(message: Option<String>) -> Self {
        match message {
            Some(m) if !m.is_empty() => Self::Rejected(m),
            _ => Self::Rejected(DEFAULT_REJECTION.to_string()),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

pub type MarketResult<T> = Result<T, MarketError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_falls_back_on_missing_message() {
        assert_eq!(
            MarketError::rejected(None),
            MarketError::Rejected(DEFAULT_REJECTION.to_string())
        );
        assert_eq!(
            MarketError::rejected(Some(String::new())).to_string(),
            DEFAULT_REJECTION
        );
        assert_eq!(
            MarketError::rejected(Some("권한이 없습니다.".into())).to_string(),
            "권한이 없습니다."
        );
    }
}
