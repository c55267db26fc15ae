//! Application-wide constants

pub const DEFAULT_PORT: u16 = 4019;
pub const ROOT_DEPTH: i32 = 0;
pub const FIRST_ORDER: i32 = 1;
pub const MIN_MENU_NAME_LENGTH: u64 = 1;
pub const MAX_MENU_NAME_LENGTH: u64 = 100;
pub const DEFAULT_LOG_FILTER: &str = "info,menu_api=debug,menu_core=debug";
