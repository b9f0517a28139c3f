// Exit codes for CLI automation
pub const SUCCESS: i32 = 0;
pub const ERROR: i32 = 1;
pub const INVALID_INPUT: i32 = 3;
pub const CANCELLED: i32 = 130;
