use chrono::{NaiveDate, NaiveTime};
use diesel::sql_types::{Date, Int4, Nullable, Time, Varchar};
use diesel::{Queryable, QueryableByName};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, Queryable, PartialEq, Eq)]
pub struct Team {
    pub id: i32,
    pub team_name: String,
    pub country: Option<String>,
    pub founded_year: Option<i32>,
    pub league: Option<String>,
}

/// A player row with the team foreign key resolved to the team name.
#[derive(Debug, Clone, Serialize, Queryable, PartialEq, Eq)]
pub struct Player {
    pub id: i32,
    pub name: String,
    pub team: Option<String>,
    pub position: Option<String>,
    pub age: Option<i32>,
    pub nationality: Option<String>,
}

/// A match row with both team references and the stadium reference
/// resolved to display names.
#[derive(Debug, Clone, Serialize, QueryableByName, PartialEq, Eq)]
pub struct Match {
    #[diesel(sql_type = Int4)]
    pub id: i32,
    #[diesel(sql_type = Nullable<Varchar>)]
    pub home_team: Option<String>,
    #[diesel(sql_type = Nullable<Varchar>)]
    pub away_team: Option<String>,
    #[diesel(sql_type = Date)]
    pub match_date: NaiveDate,
    #[diesel(sql_type = Nullable<Time>)]
    pub match_time: Option<NaiveTime>,
    #[diesel(sql_type = Nullable<Varchar>)]
    pub stadium: Option<String>,
    #[diesel(sql_type = Nullable<Varchar>)]
    pub score: Option<String>,
}

#[derive(Debug, Clone, Serialize, Queryable, PartialEq, Eq)]
pub struct Stadium {
    pub id: i32,
    pub name: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub capacity: Option<i32>,
    pub year_built: Option<i32>,
}
