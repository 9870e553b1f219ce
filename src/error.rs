use thiserror::Error;

/// The pipeline is deliberately permissive: most malformed input is
/// normalized to a logged default. Only the two cases below are hard
/// errors, surfaced by the caller as 4xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid XP amount {amount}: must be non-negative")]
    InvalidAmount { amount: i64 },
    #[error("invalid progress event: {0}")]
    InvalidProgressEvent(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = EngineError::InvalidAmount { amount: -5 };
        assert!(err.to_string().contains("-5"));
    }
}
