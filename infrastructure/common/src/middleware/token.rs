use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use architecture::UserInfo;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::SessionConfig;

/// Session token payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: Uuid,
    pub email: String,
    pub name: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and resolves stateless HS256 session tokens.
///
/// A token stays valid until `exp` even after the client drops its cookie.
#[derive(Clone)]
pub struct SessionKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
    cookie_name: String,
    secure_cookie: bool,
}

impl SessionKeys {
    pub fn new(config: &SessionConfig) -> Self {
        let secret = if config.secret().is_empty() {
            tracing::warn!(
                "No session secret configured, using a random one. Sessions will not survive a restart."
            );
            rand::thread_rng()
                .sample_iter(&Alphanumeric)
                .take(64)
                .map(char::from)
                .collect()
        } else {
            config.secret().clone()
        };
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_secs: *config.ttl_secs(),
            cookie_name: config.cookie_name().clone(),
            secure_cookie: *config.secure_cookie(),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub fn issue(&self, user: &UserInfo) -> anyhow::Result<IssuedToken> {
        self.issue_at(user, Utc::now())
    }

    fn issue_at(&self, user: &UserInfo, now: DateTime<Utc>) -> anyhow::Result<IssuedToken> {
        let expires_at = now + Duration::seconds(self.ttl_secs);
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            name: user.full_name.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(IssuedToken { token, expires_at })
    }

    /// Verifies signature and expiry.
    pub fn resolve(&self, token: &str) -> anyhow::Result<UserInfo> {
        let claims =
            jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)?.claims;
        Ok(UserInfo {
            id: claims.sub,
            email: claims.email,
            full_name: claims.name,
        })
    }

    /// HttpOnly, SameSite=Lax cookie carrying `token`.
    pub fn cookie(&self, token: &IssuedToken) -> Cookie<'static> {
        let max_age = (token.expires_at - Utc::now()).num_seconds().max(0);
        Cookie::build(self.cookie_name.clone(), token.token.clone())
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure_cookie)
            .max_age(CookieDuration::seconds(max_age))
            .finish()
    }

    /// Expired cookie that makes the browser drop the session.
    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(self.cookie_name.clone(), "")
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure_cookie)
            .finish();
        cookie.make_removal();
        cookie
    }
}
