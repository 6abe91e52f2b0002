use serde::{Deserialize, Serialize};

pub const GUEST_USERNAME: &str = "Guest";

/// Who the current client is, once a session has been established.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    User { user_id: i32, username: String },
    Guest,
}

impl Identity {
    pub fn username(&self) -> &str {
        match self {
            Identity::User { username, .. } => username,
            Identity::Guest => GUEST_USERNAME,
        }
    }

    pub fn user_id(&self) -> Option<i32> {
        match self {
            Identity::User { user_id, .. } => Some(*user_id),
            Identity::Guest => None,
        }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, Identity::Guest)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<i32>,
    #[serde(default)]
    pub guest: bool,
    pub iat: usize,
    pub exp: usize,
}

impl SessionClaims {
    pub fn new(identity: &Identity, iat: usize, exp: usize) -> Self {
        SessionClaims {
            sub: identity.username().to_string(),
            uid: identity.user_id(),
            guest: identity.is_guest(),
            iat,
            exp,
        }
    }

    /// A guest flag wins over a user id; claims carrying neither hold no identity.
    pub fn identity(&self) -> Option<Identity> {
        if self.guest {
            return Some(Identity::Guest);
        }
        self.uid.map(|user_id| Identity::User {
            user_id,
            username: self.sub.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_without_user_or_guest_hold_no_identity() {
        let claims = SessionClaims {
            sub: "nobody".to_string(),
            uid: None,
            guest: false,
            iat: 0,
            exp: 1,
        };
        assert_eq!(claims.identity(), None);
    }

    #[test]
    fn guest_claims_always_read_back_as_guest() {
        let claims = SessionClaims::new(&Identity::Guest, 0, 1);
        assert_eq!(claims.sub, "Guest");
        assert_eq!(claims.uid, None);
        assert_eq!(claims.identity(), Some(Identity::Guest));
    }

    #[test]
    fn user_claims_carry_id_and_name() {
        let identity = Identity::User {
            user_id: 7,
            username: "alice".to_string(),
        };
        let claims = SessionClaims::new(&identity, 0, 1);
        assert_eq!(claims.identity(), Some(identity));
    }
}
