use diesel::{Insertable, Queryable};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Queryable, PartialEq, Eq)]
#[diesel(table_name = crate::model::schema::users)]
pub struct User {
    pub id: i32,
    pub username: String,
    /// argon2 PHC string, never the plain password.
    pub password: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::model::schema::users)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct RegisterUserSchema {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Absent fields read as empty strings and fail like any other bad login.
#[derive(Debug, Deserialize, Clone)]
pub struct LoginUserSchema {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}
