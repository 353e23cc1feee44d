//! Well-known query parameter names understood by the host executor.
//!
//! The adapter only sets these; interpreting them is the executor's job.

/// Which fields the executor should return. `"ids"` skips hydration.
pub const FIELDS: &str = "fields";

/// Value of [`FIELDS`] requesting identifiers only.
pub const FIELDS_IDS: &str = "ids";

/// Skip counting the total number of matching rows.
pub const NO_FOUND_ROWS: &str = "no_found_rows";

/// Whether to prime the per-record metadata cache.
pub const UPDATE_POST_META_CACHE: &str = "update_post_meta_cache";

/// Whether to prime the per-term metadata cache.
pub const UPDATE_TERM_META_CACHE: &str = "update_term_meta_cache";

/// Entity type filter.
pub const POST_TYPE: &str = "post_type";

/// Entity status filter.
pub const POST_STATUS: &str = "post_status";
