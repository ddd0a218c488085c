pub mod config;
pub mod events;
pub mod preset;
pub mod preview;
pub mod session;
pub mod store;
pub mod sys;
