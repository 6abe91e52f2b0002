use crate::config::config::Config;
use crate::model::league::{Match, Player, Stadium, Team};
use crate::model::schema::{players, stadiums, teams, users};
use crate::model::user::{NewUser, User};
use crate::repository::{CredentialStore, LeagueRepository, RepositoryError, RepositoryResult};
use async_trait::async_trait;
use deadpool::managed::Object;
use deadpool::Runtime;
use diesel::dsl::{Asc, LeftJoin, Nullable, Order, Select};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::{ExpressionMethods, NullableExpressionMethods, OptionalExtension, QueryDsl};
use diesel_async::{
    pooled_connection::{deadpool::Pool, AsyncDieselConnectionManager},
    AsyncPgConnection, RunQueryDsl,
};
use log::error;

pub type DBPool = Pool<AsyncPgConnection>;

const MATCHES_QUERY: &str = "\
    SELECT m.id, \
           ht.team_name AS home_team, \
           at.team_name AS away_team, \
           m.match_date, \
           m.match_time, \
           s.name AS stadium, \
           m.score \
    FROM matches m \
    LEFT JOIN teams ht ON m.home_team_id = ht.id \
    LEFT JOIN teams at ON m.away_team_id = at.id \
    LEFT JOIN stadiums s ON m.stadium_id = s.id \
    ORDER BY m.match_date DESC, m.match_time DESC NULLS LAST";

type TeamColumns = (
    teams::id,
    teams::team_name,
    teams::country,
    teams::founded_year,
    teams::league,
);
type TeamsQuery = Order<Select<teams::table, TeamColumns>, Asc<teams::team_name>>;

type PlayerColumns = (
    players::id,
    players::name,
    Nullable<teams::team_name>,
    players::position,
    players::age,
    players::nationality,
);
type PlayersQuery =
    Order<Select<LeftJoin<players::table, teams::table>, PlayerColumns>, Asc<players::name>>;

type StadiumColumns = (
    stadiums::id,
    stadiums::name,
    stadiums::city,
    stadiums::country,
    stadiums::capacity,
    stadiums::year_built,
);
type StadiumsQuery = Order<Select<stadiums::table, StadiumColumns>, Asc<stadiums::name>>;

fn teams_query() -> TeamsQuery {
    teams::table
        .select((
            teams::id,
            teams::team_name,
            teams::country,
            teams::founded_year,
            teams::league,
        ))
        .order(teams::team_name.asc())
}

/// Players without a team are kept; their team name comes back NULL.
fn players_query() -> PlayersQuery {
    players::table
        .left_join(teams::table)
        .select((
            players::id,
            players::name,
            teams::team_name.nullable(),
            players::position,
            players::age,
            players::nationality,
        ))
        .order(players::name.asc())
}

fn stadiums_query() -> StadiumsQuery {
    stadiums::table
        .select((
            stadiums::id,
            stadiums::name,
            stadiums::city,
            stadiums::country,
            stadiums::capacity,
            stadiums::year_built,
        ))
        .order(stadiums::name.asc())
}

pub struct Database {
    pool: DBPool,
}

impl Database {
    /// Builds the pool lazily; no connection is opened until the first query.
    pub fn new(config: &Config) -> RepositoryResult<Self> {
        let manager =
            AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.database_url.as_str());
        let pool = Pool::builder(manager)
            .max_size(config.database_pool_max_size)
            .wait_timeout(Some(config.database_pool_timeout))
            .create_timeout(Some(config.database_pool_timeout))
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;
        Ok(Database { pool })
    }

    async fn get_db_conn(
        &self,
    ) -> RepositoryResult<Object<AsyncDieselConnectionManager<AsyncPgConnection>>> {
        self.pool.get().await.map_err(|e| {
            error!("Couldn't acquire a database connection. The error: {:?}", e);
            RepositoryError::Connection(e.to_string())
        })
    }
}

fn map_insert_error(err: DieselError) -> RepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            RepositoryError::UsernameTaken
        }
        other => RepositoryError::Query(other),
    }
}

#[async_trait]
impl CredentialStore for Database {
    async fn find_user_by_username(&self, user_name: &str) -> RepositoryResult<Option<User>> {
        let mut conn = self.get_db_conn().await?;
        let user = users::table
            .filter(users::username.eq(user_name))
            .select((users::id, users::username, users::password))
            .first::<User>(&mut conn)
            .await
            .optional()?;
        Ok(user)
    }

    async fn insert_user(&self, new_user: NewUser) -> RepositoryResult<User> {
        let mut conn = self.get_db_conn().await?;
        diesel::insert_into(users::table)
            .values(&new_user)
            .returning((users::id, users::username, users::password))
            .get_result::<User>(&mut conn)
            .await
            .map_err(map_insert_error)
    }
}

#[async_trait]
impl LeagueRepository for Database {
    async fn list_teams(&self) -> RepositoryResult<Vec<Team>> {
        let mut conn = self.get_db_conn().await?;
        let rows = teams_query().load::<Team>(&mut conn).await?;
        Ok(rows)
    }

    async fn list_players(&self) -> RepositoryResult<Vec<Player>> {
        let mut conn = self.get_db_conn().await?;
        let rows = players_query().load::<Player>(&mut conn).await?;
        Ok(rows)
    }

    async fn list_matches(&self) -> RepositoryResult<Vec<Match>> {
        let mut conn = self.get_db_conn().await?;
        let rows = diesel::sql_query(MATCHES_QUERY)
            .load::<Match>(&mut conn)
            .await?;
        Ok(rows)
    }

    async fn list_stadiums(&self) -> RepositoryResult<Vec<Stadium>> {
        let mut conn = self.get_db_conn().await?;
        let rows = stadiums_query().load::<Stadium>(&mut conn).await?;
        Ok(rows)
    }
}
