pub mod auth;
pub mod league;
