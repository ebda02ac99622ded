pub mod log;
pub mod provider;
pub mod template;
