//! Error handling utilities for MCP server

use rmcp::ErrorData;
use studyflow_core::StudyError;

/// Helper to convert planner errors to MCP errors
pub fn to_mcp_error(message: &str, error: &StudyError) -> ErrorData {
    ErrorData::internal_error(format!("{}: {}", message, error), None)
}
