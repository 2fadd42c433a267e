use std::fmt;

/// Error codes for all elaboration diagnostics.
///
/// Format: E#### where the first digit indicates the class:
/// - E1xxx: errors in the user's source
/// - E9xxx: internal compiler errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // User Errors (E1xxx)
    /// Array range value is non-integer or non-constant
    E1001,
    /// Loop bound is non-integer or non-constant
    E1002,
    /// Attribute value is not a constant
    E1003,
    /// Transistor size is not a numeric constant
    E1004,
    /// Identifier does not denote a scalar variable
    E1005,
    /// Tree fan-in is not an integer constant
    E1006,
    /// Loop exceeds the unroll limit
    E1007,
    /// Expression could not be evaluated
    E1008,

    // Internal Errors (E9xxx)
    /// Array model invariant violated
    E9001,
    /// Scope binding invariant violated
    E9002,
    /// Evaluator invariant violated
    E9003,
}

impl ErrorCode {
    /// Get the string representation of this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            // User
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E1008 => "E1008",
            // Internal
            ErrorCode::E9001 => "E9001",
            ErrorCode::E9002 => "E9002",
            ErrorCode::E9003 => "E9003",
        }
    }

    /// Check if this is an internal compiler error (E9xxx range).
    pub fn is_internal(&self) -> bool {
        self.as_str().starts_with("E9")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E1001.to_string(), "E1001");
        assert_eq!(ErrorCode::E9002.as_str(), "E9002");
    }

    #[test]
    fn test_is_internal() {
        assert!(!ErrorCode::E1007.is_internal());
        assert!(ErrorCode::E9001.is_internal());
    }
}
