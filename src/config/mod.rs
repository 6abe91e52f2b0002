pub mod config;
pub mod session_auth;
