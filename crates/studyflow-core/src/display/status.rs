//! Status and confirmation message types for operation feedback.

use std::fmt;

/// Wrapper type for displaying operation feedback with no resource to show,
/// such as pointer reads that come back empty.
///
/// Success statuses render as the bare message; failures carry an `Error:`
/// prefix so they stand out in tool output.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    /// Create a new success status.
    pub fn success(message: String) -> Self {
        Self {
            message,
            success: true,
        }
    }

    /// Create a new failure status.
    pub fn failure(message: String) -> Self {
        Self {
            message,
            success: false,
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.success {
            writeln!(f, "{}", self.message)
        } else {
            writeln!(f, "Error: {}", self.message)
        }
    }
}
