//! Process exit codes.

/// Normal completion
pub const SUCCESS: i32 = 0;
/// Fewer than two models available for a runnable command
pub const NOT_ENOUGH_MODELS: i32 = 1;
/// Usage or runtime error
pub const ERROR: i32 = 2;
