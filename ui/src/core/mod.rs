pub mod auth;
pub mod client;
pub mod config;
pub mod format;
pub mod hooks;
pub mod platform;
pub mod storage;
pub mod timing;
