pub mod messages;
pub mod sms;
