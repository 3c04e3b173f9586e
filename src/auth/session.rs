use chrono::{DateTime, Utc};
use jsonwebtoken::dangerous::insecure_decode;
use serde::Deserialize;

use crate::{
    error::{ClientError, ClientResult},
    models::User,
    storage::KeyValueStore,
};

pub const TOKEN_KEY: &str = "token";
pub const MY_INFO_KEY: &str = "myInfo";

#[derive(Debug, Deserialize)]
struct ExpiryClaims {
    exp: i64,
}

/// Reads the `exp` claim without checking the signature; the server is the
/// one that validates tokens.
pub fn token_expiry(token: &str) -> Option<DateTime<Utc>> {
    let data = insecure_decode::<ExpiryClaims>(strip_bearer(token)).ok()?;
    DateTime::from_timestamp(data.claims.exp, 0)
}

fn strip_bearer(token: &str) -> &str {
    let token = token.trim();
    token.strip_prefix("Bearer ").unwrap_or(token).trim()
}

#[derive(Debug)]
pub struct AuthSession<S> {
    store: S,
    token: Option<String>,
    user: Option<User>,
}

impl<S: KeyValueStore> AuthSession<S> {
    pub async fn load(store: S) -> ClientResult<Self> {
        let mut session = Self {
            store,
            token: None,
            user: None,
        };

        let token = session.store.get(TOKEN_KEY).await?;
        let my_info = session.store.get(MY_INFO_KEY).await?;
        if let (Some(token), Some(my_info)) = (token, my_info) {
            match serde_json::from_str::<User>(&my_info) {
                Ok(user) => {
                    session.token = Some(token);
                    session.user = Some(user);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "dropping unreadable stored session");
                    session.store.remove(TOKEN_KEY).await?;
                    session.store.remove(MY_INFO_KEY).await?;
                }
            }
        }

        Ok(session)
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated_at(Utc::now())
    }

    pub fn is_authenticated_at(&self, now: DateTime<Utc>) -> bool {
        let (Some(token), Some(_)) = (&self.token, &self.user) else {
            return false;
        };
        match token_expiry(token) {
            Some(expires_at) => expires_at >= now,
            None => false,
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        if self.is_authenticated() {
            self.user.as_ref()
        } else {
            None
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Token and user for a call that needs a logged-in session.
    pub fn require(&self) -> ClientResult<(&str, &User)> {
        match (self.token.as_deref(), self.current_user()) {
            (Some(token), Some(user)) => Ok((token, user)),
            _ => Err(ClientError::Unauthorized),
        }
    }

    pub async fn set_token_and_user(&mut self, token: &str, user: User) -> ClientResult<()> {
        let token = strip_bearer(token).to_string();
        self.store.set(TOKEN_KEY, &token).await?;
        self.store
            .set(MY_INFO_KEY, &serde_json::to_string(&user)?)
            .await?;
        tracing::info!(user_id = %user.id, role = %user.role, "session stored");
        self.token = Some(token);
        self.user = Some(user);
        Ok(())
    }

    /// Refreshes the cached user, keeping the current token.
    pub async fn update_user(&mut self, user: User) -> ClientResult<()> {
        self.store
            .set(MY_INFO_KEY, &serde_json::to_string(&user)?)
            .await?;
        self.user = Some(user);
        Ok(())
    }

    pub async fn clear(&mut self) -> ClientResult<()> {
        self.store.remove(TOKEN_KEY).await?;
        self.store.remove(MY_INFO_KEY).await?;
        self.token = None;
        self.user = None;
        Ok(())
    }
}
