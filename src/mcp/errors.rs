pub const INVALID_INPUT: &str = "invalid_input";
pub const TOO_LARGE: &str = "too_large";
pub const NOT_FOUND: &str = "not_found";
pub const UNSUPPORTED_FORMAT: &str = "unsupported_format";
pub const READ_ERROR: &str = "read_error";
pub const CONVERSION_FAILED: &str = "conversion_failed";
