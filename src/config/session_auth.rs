use crate::config::config::Config;
use crate::model::session::Identity;
use crate::util::token::{self, TokenError};
use crate::AppState;
use actix_web::cookie::{time::Duration as ActixWebDuration, Cookie, SameSite};
use actix_web::error::{ErrorInternalServerError, InternalError};
use actix_web::http::header;
use actix_web::{dev::Payload, web, Error as ActixWebError};
use actix_web::{FromRequest, HttpRequest, HttpResponse};
use log::debug;
use std::future::{ready, Ready};

pub const SESSION_COOKIE: &str = "session";
pub const LOGIN_PATH: &str = "/login";

/// Per-request session context, decoded from the signed session cookie.
///
/// A missing, tampered or expired cookie yields an empty session rather than
/// an error.
#[derive(Debug, Clone, Default)]
pub struct Session {
    identity: Option<Identity>,
}

impl Session {
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Cookie carrying a freshly signed session for `identity`.
    pub fn establish(identity: &Identity, config: &Config) -> Result<Cookie<'static>, TokenError> {
        let token = token::generate_session_token(
            identity,
            config.session_max_age,
            &config.session_secret,
        )?;
        Ok(Cookie::build(SESSION_COOKIE, token)
            .path("/")
            .max_age(ActixWebDuration::seconds(config.session_max_age))
            .http_only(true)
            .same_site(SameSite::Lax)
            .finish())
    }

    /// Cookie that makes the client drop its session.
    pub fn clear() -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE, "")
            .path("/")
            .max_age(ActixWebDuration::new(-1, 0))
            .http_only(true)
            .same_site(SameSite::Lax)
            .finish()
    }

    fn from_http_request(req: &HttpRequest) -> Result<Self, ActixWebError> {
        let data = req
            .app_data::<web::Data<AppState>>()
            .ok_or_else(|| ErrorInternalServerError("application state is not configured"))?;

        let identity = req.cookie(SESSION_COOKIE).and_then(|cookie| {
            match token::verify_session_token(&data.config.session_secret, cookie.value()) {
                Ok(claims) => claims.identity(),
                Err(e) => {
                    debug!("Ignoring session cookie: {}", e);
                    None
                }
            }
        });

        Ok(Session { identity })
    }
}

impl FromRequest for Session {
    type Error = ActixWebError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Session::from_http_request(req))
    }
}

/// Access guard for protected routes. Resolves to the session identity
/// (authenticated user or guest); anything else is answered with a redirect
/// to the login page and the handler never runs.
#[derive(Debug, Clone)]
pub struct LoginRequired {
    pub identity: Identity,
}

fn redirect_to_login() -> ActixWebError {
    InternalError::from_response(
        "login required",
        HttpResponse::Found()
            .insert_header((header::LOCATION, LOGIN_PATH))
            .finish(),
    )
    .into()
}

impl FromRequest for LoginRequired {
    type Error = ActixWebError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let session = match Session::from_http_request(req) {
            Ok(session) => session,
            Err(e) => return ready(Err(e)),
        };

        match session.identity {
            Some(identity) => ready(Ok(LoginRequired { identity })),
            None => {
                debug!("No session for {}, redirecting to {}", req.path(), LOGIN_PATH);
                ready(Err(redirect_to_login()))
            }
        }
    }
}
