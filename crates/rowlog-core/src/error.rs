//! Error types for rowlog-core

use thiserror::Error;

/// Errors raised while decoding a line of log text
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A line starting with `{`, `"` or `[` was not valid JSON
    #[error("Malformed JSON line: {0}")]
    Json(String),
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        CodecError::Json(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_conversion() {
        let err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let codec_err: CodecError = err.into();
        assert!(matches!(codec_err, CodecError::Json(_)));
        assert!(codec_err.to_string().starts_with("Malformed JSON line"));
    }
}
