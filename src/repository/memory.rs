//! In-memory storage for tests.
//!
//! Mirrors the ordering and left-join behavior of the SQL queries so handler
//! tests can run without a database.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::model::league::{Match, Player, Stadium, Team};
use crate::model::user::{NewUser, User};
use crate::repository::{CredentialStore, LeagueRepository, RepositoryError, RepositoryResult};

#[derive(Debug, Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    teams: Vec<Team>,
    players: Vec<Player>,
    matches: Vec<Match>,
    stadiums: Vec<Stadium>,
    unreachable: bool,
    credential_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails as if the database were down.
    pub fn unreachable() -> Self {
        MemoryStore {
            unreachable: true,
            ..Self::default()
        }
    }

    pub fn with_league(
        teams: Vec<Team>,
        players: Vec<Player>,
        matches: Vec<Match>,
        stadiums: Vec<Stadium>,
    ) -> Self {
        MemoryStore {
            teams,
            players,
            matches,
            stadiums,
            ..Self::default()
        }
    }

    /// Number of calls made through [`CredentialStore`].
    pub fn credential_calls(&self) -> usize {
        self.credential_calls.load(Ordering::SeqCst)
    }

    pub fn count_username(&self, username: &str) -> usize {
        self.users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.username == username)
            .count()
    }

    fn check_reachable(&self) -> RepositoryResult<()> {
        if self.unreachable {
            return Err(RepositoryError::Connection(
                "connection refused".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>> {
        self.credential_calls.fetch_add(1, Ordering::SeqCst);
        self.check_reachable()?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn insert_user(&self, new_user: NewUser) -> RepositoryResult<User> {
        self.credential_calls.fetch_add(1, Ordering::SeqCst);
        self.check_reachable()?;
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == new_user.username) {
            return Err(RepositoryError::UsernameTaken);
        }
        let user = User {
            id: users.len() as i32 + 1,
            username: new_user.username,
            password: new_user.password,
        };
        users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl LeagueRepository for MemoryStore {
    async fn list_teams(&self) -> RepositoryResult<Vec<Team>> {
        self.check_reachable()?;
        let mut rows = self.teams.clone();
        rows.sort_by(|a, b| a.team_name.cmp(&b.team_name));
        Ok(rows)
    }

    async fn list_players(&self) -> RepositoryResult<Vec<Player>> {
        self.check_reachable()?;
        let mut rows = self.players.clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn list_matches(&self) -> RepositoryResult<Vec<Match>> {
        self.check_reachable()?;
        let mut rows = self.matches.clone();
        // NULL times sort last, like the SQL query.
        rows.sort_by(|a, b| {
            b.match_date
                .cmp(&a.match_date)
                .then_with(|| b.match_time.cmp(&a.match_time))
        });
        Ok(rows)
    }

    async fn list_stadiums(&self) -> RepositoryResult<Vec<Stadium>> {
        self.check_reachable()?;
        let mut rows = self.stadiums.clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }
}
