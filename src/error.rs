use thiserror::Error;

/// Errors produced while driving an evaluation run.
///
/// There is no retry policy: any failed model call aborts the run and the
/// error propagates to the caller unchanged.
#[derive(Debug, Error)]
pub enum EvalError {
    /// The inference endpoint could not be reached at all.
    #[error("model endpoint unreachable at {endpoint}: {reason}")]
    ModelUnavailable { endpoint: String, reason: String },

    /// A chat call failed mid-run (transport or API error).
    #[error("inference request failed: {0}")]
    Inference(String),

    /// The endpoint answered but the response carried no usable content.
    /// Callers treat this the same as an inference failure.
    #[error("malformed model response: {0}")]
    MalformedResponse(String),

    /// A zero-length prompt or question table was requested.
    #[error("empty sample set: {0}")]
    EmptySampleSet(&'static str),

    /// More performance samples were requested than the fixture table holds.
    #[error("requested {requested} performance samples but only {available} prompts are available")]
    InsufficientFixtures { requested: usize, available: usize },

    /// Total elapsed time across all calls was zero, so throughput is
    /// undefined.
    #[error("total elapsed time was zero; cannot compute throughput")]
    ZeroElapsedTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = EvalError::ModelUnavailable {
            endpoint: "http://localhost:11434/v1".to_string(),
            reason: "connection refused".to_string(),
        };
        assert!(err.to_string().contains("http://localhost:11434/v1"));
        assert!(err.to_string().contains("connection refused"));

        let err = EvalError::EmptySampleSet("mmlu questions");
        assert!(err.to_string().contains("mmlu questions"));

        let err = EvalError::InsufficientFixtures {
            requested: 20,
            available: 10,
        };
        assert!(err.to_string().contains("20"));
        assert!(err.to_string().contains("10"));
    }
}
