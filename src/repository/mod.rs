use crate::model::league::{Match, Player, Stadium, Team};
use crate::model::user::{NewUser, User};
use async_trait::async_trait;
use thiserror::Error;

pub mod database;
#[cfg(test)]
pub mod memory;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("could not connect to the database: {0}")]
    Connection(String),
    #[error("query failed: {0}")]
    Query(#[from] diesel::result::Error),
    #[error("username already exists")]
    UsernameTaken,
}

/// Username/password-hash pairs.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>>;

    /// Fails with [`RepositoryError::UsernameTaken`] when the username is
    /// already present, whichever request got there first.
    async fn insert_user(&self, new_user: NewUser) -> RepositoryResult<User>;
}

/// Read-only listings. Foreign references are resolved with left joins, so
/// rows whose reference is missing are still returned.
#[async_trait]
pub trait LeagueRepository: Send + Sync {
    /// Ordered by team name.
    async fn list_teams(&self) -> RepositoryResult<Vec<Team>>;

    /// Ordered by player name.
    async fn list_players(&self) -> RepositoryResult<Vec<Player>>;

    /// Most recent first: date descending, then time descending.
    async fn list_matches(&self) -> RepositoryResult<Vec<Match>>;

    /// Ordered by stadium name.
    async fn list_stadiums(&self) -> RepositoryResult<Vec<Stadium>>;
}
