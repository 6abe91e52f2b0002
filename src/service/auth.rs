use crate::model::session::Identity;
use crate::model::user::{LoginUserSchema, NewUser, RegisterUserSchema, User};
use crate::repository::{CredentialStore, RepositoryError};
use crate::util::password::{hash_password, verify_password, PasswordError};
use actix_web::error::BlockingError;
use actix_web::web;
use log::info;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

#[derive(Error, Debug)]
pub enum AuthError {
    /// Covers both an unknown username and a wrong password.
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Username already exists")]
    UsernameTaken,
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error("credential store error: {0}")]
    Store(RepositoryError),
    #[error("password worker failed: {0}")]
    Blocking(String),
}

impl From<RepositoryError> for AuthError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::UsernameTaken => AuthError::UsernameTaken,
            other => AuthError::Store(other),
        }
    }
}

impl From<BlockingError> for AuthError {
    fn from(err: BlockingError) -> Self {
        AuthError::Blocking(err.to_string())
    }
}

fn validation_message(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .map(|e| {
            e.message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| e.code.to_string())
        })
        .collect();
    messages.sort();
    messages.join(" ")
}

/// Checks the credentials and returns the identity to store in the session.
pub async fn authenticate_user_service(
    store: &dyn CredentialStore,
    login_user: LoginUserSchema,
) -> Result<Identity, AuthError> {
    let user = match store.find_user_by_username(&login_user.username).await? {
        Some(user) => user,
        None => {
            info!("Login rejected: unknown username");
            return Err(AuthError::InvalidCredentials);
        }
    };

    let stored_hash = user.password.clone();
    let verified =
        web::block(move || verify_password(&login_user.password, &stored_hash)).await??;
    if !verified {
        info!("Login rejected: wrong password for user id {}", user.id);
        return Err(AuthError::InvalidCredentials);
    }

    Ok(Identity::User {
        user_id: user.id,
        username: user.username,
    })
}

/// Creates the account. The pre-check only saves a hash on the common
/// duplicate path; uniqueness itself is enforced by the store's insert.
pub async fn register_user_service(
    store: &dyn CredentialStore,
    new_user: RegisterUserSchema,
) -> Result<User, AuthError> {
    new_user
        .validate()
        .map_err(|e| AuthError::Validation(validation_message(&e)))?;

    if store
        .find_user_by_username(&new_user.username)
        .await?
        .is_some()
    {
        return Err(AuthError::UsernameTaken);
    }

    let RegisterUserSchema { username, password } = new_user;
    let hashed_password = web::block(move || hash_password(&password)).await??;

    let user = store
        .insert_user(NewUser {
            username,
            password: hashed_password,
        })
        .await?;
    info!("Registered user id {}", user.id);
    Ok(user)
}
