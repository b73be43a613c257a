//! Result type alias for client operations.

use super::tabby_error::TabbyError;

/// Type alias for Results using TabbyError.
///
/// # Example
///
/// ```ignore
/// use tabby_client::error::TabbyResult;
///
/// async fn current_model(client: &Client) -> TabbyResult<String> {
///     Ok(client.models().get().await?.id)
/// }
/// ```
pub type TabbyResult<T> = Result<T, TabbyError>;
