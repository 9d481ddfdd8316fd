pub mod auth_handlers;
pub mod extractors;
pub mod message_handlers;
pub mod user_handlers;
