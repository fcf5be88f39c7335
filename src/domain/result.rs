//! Result type alias for Salesledger

use super::errors::LedgerError;

/// Result type alias for Salesledger operations
///
/// # Examples
///
/// ```
/// use salesledger::domain::result::Result;
/// use salesledger::domain::errors::LedgerError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(LedgerError::Configuration("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, LedgerError>;
