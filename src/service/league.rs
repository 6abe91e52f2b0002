use crate::model::league::{Match, Player, Stadium, Team};
use crate::model::response::Notice;
use crate::repository::{LeagueRepository, RepositoryResult};
use log::error;

/// Rows for a listing page, plus a notice when the store could not be read.
#[derive(Debug)]
pub struct Listing<T> {
    pub rows: Vec<T>,
    pub notice: Option<Notice>,
}

fn into_listing<T>(entity: &str, result: RepositoryResult<Vec<T>>) -> Listing<T> {
    match result {
        Ok(rows) => Listing { rows, notice: None },
        Err(err) => {
            error!("An error occurred while fetching {}. The error: {:?}", entity, err);
            Listing {
                rows: Vec::new(),
                notice: Some(Notice::error(format!("Error fetching {entity}: {err}"))),
            }
        }
    }
}

pub async fn list_teams_service(repo: &dyn LeagueRepository) -> Listing<Team> {
    into_listing("teams", repo.list_teams().await)
}

pub async fn list_players_service(repo: &dyn LeagueRepository) -> Listing<Player> {
    into_listing("players", repo.list_players().await)
}

pub async fn list_matches_service(repo: &dyn LeagueRepository) -> Listing<Match> {
    into_listing("matches", repo.list_matches().await)
}

pub async fn list_stadiums_service(repo: &dyn LeagueRepository) -> Listing<Stadium> {
    into_listing("stadiums", repo.list_stadiums().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::response::NoticeLevel;
    use crate::repository::memory::MemoryStore;
    use chrono::{NaiveDate, NaiveTime};

    fn player(id: i32, name: &str, team: Option<&str>) -> Player {
        Player {
            id,
            name: name.to_string(),
            team: team.map(str::to_string),
            position: None,
            age: None,
            nationality: None,
        }
    }

    fn fixture(id: i32, date: (i32, u32, u32), time: Option<(u32, u32)>) -> Match {
        Match {
            id,
            home_team: Some("Ajax".to_string()),
            away_team: None,
            match_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            match_time: time.map(|(h, m)| NaiveTime::from_hms_opt(h, m, 0).unwrap()),
            stadium: None,
            score: None,
        }
    }

    #[actix_web::test]
    async fn player_without_team_is_listed_with_absent_team() {
        let store = MemoryStore::with_league(
            vec![],
            vec![player(1, "Zidane", Some("Real Madrid")), player(2, "Anon", None)],
            vec![],
            vec![],
        );
        let listing = list_players_service(&store).await;
        assert!(listing.notice.is_none());
        assert_eq!(listing.rows.len(), 2);
        assert_eq!(listing.rows[0].name, "Anon");
        assert_eq!(listing.rows[0].team, None);
        assert_eq!(listing.rows[1].team.as_deref(), Some("Real Madrid"));
    }

    #[actix_web::test]
    async fn matches_are_most_recent_first() {
        let store = MemoryStore::with_league(
            vec![],
            vec![],
            vec![
                fixture(1, (2024, 1, 10), Some((15, 0))),
                fixture(2, (2024, 3, 2), Some((12, 30))),
                fixture(3, (2024, 3, 2), Some((20, 45))),
            ],
            vec![],
        );
        let ids: Vec<i32> = list_matches_service(&store)
            .await
            .rows
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[actix_web::test]
    async fn stadiums_are_listed_by_name() {
        let stadium = |id: i32, name: &str| Stadium {
            id,
            name: name.to_string(),
            city: None,
            country: None,
            capacity: Some(50_000),
            year_built: None,
        };
        let store = MemoryStore::with_league(
            vec![],
            vec![],
            vec![],
            vec![stadium(1, "Wembley"), stadium(2, "Anfield"), stadium(3, "Old Trafford")],
        );
        let names: Vec<String> = list_stadiums_service(&store)
            .await
            .rows
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Anfield", "Old Trafford", "Wembley"]);
    }

    #[actix_web::test]
    async fn store_failure_yields_empty_rows_and_an_error_notice() {
        let store = MemoryStore::unreachable();
        let listing = list_teams_service(&store).await;
        assert!(listing.rows.is_empty());
        let notice = listing.notice.unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.message.starts_with("Error fetching teams:"));
    }
}
