//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Default maximum accepted request body size in bytes (64 KiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

// =============================================================================
// DATA SOURCE
// =============================================================================

/// Default location of the seed document loaded at startup
pub const DEFAULT_SEED_PATH: &str = "data/players.json";

// =============================================================================
// REQUEST CONTEXT
// =============================================================================

/// Header carrying the correlation id, inbound and outbound
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest caller-supplied correlation id accepted verbatim
pub const MAX_REQUEST_ID_LENGTH: usize = 128;

// =============================================================================
// PLAYERS
// =============================================================================

/// Accepted values for a player's sex
pub mod sexes {
    pub const MALE: &str = "M";
    pub const FEMALE: &str = "F";

    /// All accepted values
    pub const ALL: &[&str] = &[MALE, FEMALE];
}

/// Upper bound of the numeric performance fields
pub const MAX_PLAYER_METRIC: i64 = u32::MAX as i64;

/// Decimal places kept for the top country's win ratio
pub const WIN_RATIO_DECIMALS: u32 = 3;

/// Decimal places kept for the average BMI
pub const BMI_DECIMALS: u32 = 2;

// =============================================================================
// ERROR CODES
// =============================================================================

/// Stable machine-readable error codes
pub mod error_codes {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const INVALID_PLAYER_PAYLOAD: &str = "INVALID_PLAYER_PAYLOAD";
    pub const DUPLICATE_PLAYER_ID: &str = "DUPLICATE_PLAYER_ID";
    pub const PAYLOAD_TOO_LARGE: &str = "PAYLOAD_TOO_LARGE";
    pub const DATA_SOURCE_UNAVAILABLE: &str = "DATA_SOURCE_UNAVAILABLE";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Message surfaced to clients for any server-class failure
pub const GENERIC_ERROR_MESSAGE: &str = "Unexpected error";

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page size for paginated results
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Maximum page size for paginated results
pub const MAX_PAGE_SIZE: u32 = 100;
