//! Shared, platform-independent core of the Messages and SMS administration
//! modules.
//!
//! The `frontend` crate renders these types; everything here runs natively so
//! the data-handling rules can be tested without a browser.

pub mod config;
pub mod error;
pub mod logs;
pub mod model;
pub mod notify;
pub mod providers;
pub mod requests;
pub mod templates;
