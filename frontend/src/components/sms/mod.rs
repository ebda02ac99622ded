pub mod logs;
pub mod providers;
