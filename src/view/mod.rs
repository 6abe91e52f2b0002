use serde_json::Value;
use thiserror::Error;

pub mod html;

pub const DASHBOARD: &str = "dashboard";
pub const LOGIN: &str = "login";
pub const REGISTER: &str = "register";
pub const TEAMS: &str = "teams";
pub const PLAYERS: &str = "players";
pub const MATCHES: &str = "matches";
pub const STADIUMS: &str = "stadiums";
pub const NOT_FOUND: &str = "not_found";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("unknown view: {0}")]
    UnknownView(String),
    #[error("could not serialize the page context: {0}")]
    Context(#[from] serde_json::Error),
}

/// Turns a view name and its data payload into markup.
pub trait Renderer: Send + Sync {
    fn render(&self, view: &str, context: &Value) -> Result<String, RenderError>;
}
