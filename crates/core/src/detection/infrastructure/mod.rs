pub mod centered_locator;
pub mod hold_last_locator;
