//! Utility functions

pub mod pagination;
pub mod time;
pub mod validation;

pub use pagination::{Paginated, PaginationMeta, paginate};
pub use time::{format_timestamp, now_utc};
pub use validation::{flatten_validation_errors, validate_recent_results, validate_sex};
