pub mod log;
pub mod progress;
pub mod select;
pub mod spin;
