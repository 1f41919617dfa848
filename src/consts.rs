/// Session history timestamp format: "2025-01-15 14:30"
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Timestamp suffix used in default export base names: "20250115_1430"
pub(crate) const BASE_NAME_STAMP_FORMAT: &str = "%Y%m%d_%H%M";

/// Placeholder interpolated into the prompt for optional fields left empty
pub(crate) const NOT_AVAILABLE: &str = "N/A";

/// Environment variable holding the completion API key
pub(crate) const API_KEY_ENV: &str = "OPENAI_API_KEY";

pub(crate) const DEFAULT_MODEL: &str = "gpt-4";
pub(crate) const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Delivery MIME type; every format is served as a generic download
pub(crate) const OCTET_STREAM: &str = "application/octet-stream";
