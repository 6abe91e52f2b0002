pub mod league;
pub mod response;
pub mod schema;
pub mod session;
pub mod user;
