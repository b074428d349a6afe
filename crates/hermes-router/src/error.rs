//! Route compilation errors.

use thiserror::Error;

/// Errors raised while compiling a route definition.
///
/// All variants are configuration-load-time failures: a table that fails
/// to compile aborts application startup and is never retried.
#[derive(Error, Debug)]
pub enum RouteCompileError {
    /// A `(` without a matching `)`, or a stray `)`.
    #[error("unbalanced group in pattern `{pattern}` at byte {position}")]
    UnbalancedGroup {
        /// The offending pattern as authored.
        pattern: String,
        /// Byte offset of the unmatched parenthesis.
        position: usize,
    },

    /// A `:` not followed by a valid parameter name.
    #[error("missing or invalid parameter name in pattern `{pattern}` at byte {position}")]
    InvalidParamName {
        /// The offending pattern as authored.
        pattern: String,
        /// Byte offset of the `:` marker.
        position: usize,
    },

    /// The same parameter name appears more than once, including across
    /// nested optional groups.
    #[error("duplicate parameter `:{name}` in pattern `{pattern}`")]
    DuplicateParam {
        /// The offending pattern as authored.
        pattern: String,
        /// The repeated parameter name.
        name: String,
    },

    /// A `*` splat somewhere other than the final position.
    #[error("`*` must be the final token of pattern `{pattern}`")]
    SplatNotLast {
        /// The offending pattern as authored.
        pattern: String,
    },

    /// A per-parameter constraint that is not a valid regular expression.
    #[error("invalid constraint for parameter `:{name}`: {source}")]
    InvalidConstraint {
        /// The constrained parameter name.
        name: String,
        /// The regex compilation failure.
        #[source]
        source: Box<regex::Error>,
    },

    /// The assembled matcher failed to compile.
    #[error("failed to compile matcher for pattern `{pattern}`: {source}")]
    Matcher {
        /// The offending pattern as authored.
        pattern: String,
        /// The regex compilation failure.
        #[source]
        source: Box<regex::Error>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_pattern() {
        let err = RouteCompileError::DuplicateParam {
            pattern: "(:id)/x/(:id)".to_string(),
            name: "id".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains(":id"));
        assert!(text.contains("(:id)/x/(:id)"));
    }
}
