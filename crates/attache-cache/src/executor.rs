//! Query executor trait definition.

use async_trait::async_trait;
use attache_core::{QueryOutput, QueryRequest, Result};

/// Runs the real read against the host data store.
///
/// The adapter only tweaks request parameters; it relies on the executor
/// to honour them as performance hints:
///
/// - `fields = "ids"` returns [`QueryOutput::Ids`] instead of hydrated records
/// - `no_found_rows = true` skips counting the total number of matches
/// - `update_post_meta_cache` / `update_term_meta_cache = false` skip
///   metadata priming
///
/// # Example
///
/// ```ignore
/// use attache_cache::QueryExecutor;
/// use attache_core::{QueryOutput, QueryRequest, Result};
///
/// struct WpQuery;
///
/// #[async_trait]
/// impl QueryExecutor for WpQuery {
///     async fn execute(&self, request: &QueryRequest) -> Result<QueryOutput> {
///         // Run the query against the database
///     }
///
///     fn name(&self) -> &str {
///         "wp-query"
///     }
/// }
/// ```
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Executes the query described by `request`.
    ///
    /// # Errors
    ///
    /// Returns `AttacheError::Executor` if the underlying read fails.
    async fn execute(&self, request: &QueryRequest) -> Result<QueryOutput>;

    /// Returns the name of this executor.
    ///
    /// This is used for logging and identification purposes.
    fn name(&self) -> &str {
        "query-executor"
    }
}
