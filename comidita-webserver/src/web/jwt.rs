use anyhow::{anyhow, Result};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Claims of the access tokens issued by the hosted auth provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The user id
    pub sub: String,
    /// Expiry time as Unix timestamp
    pub exp: usize,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

pub struct JwtState {
    decoding_key: Option<DecodingKey>,
    validation: Validation,
}

impl JwtState {
    pub fn new(secret: Option<&str>) -> Self {
        let decoding_key = secret
            .filter(|s| !s.is_empty())
            .map(|s| DecodingKey::from_secret(s.as_bytes()));
        let mut validation = Validation::new(Algorithm::HS256);
        // Tokens of the auth provider carry an audience
        // that differs between deployments.
        validation.validate_aud = false;
        Self {
            decoding_key,
            validation,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.decoding_key.is_some()
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let key = self
            .decoding_key
            .as_ref()
            .ok_or_else(|| anyhow!("Token validation is disabled"))?;
        let data = decode::<Claims>(token, key, &self.validation)?;
        if data.claims.sub.trim().is_empty() {
            return Err(anyhow!("Token without subject"));
        }
        Ok(data.claims)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    pub const SECRET: &str = "super-secret-jwt-token-with-at-least-32-characters";

    pub fn generate_token(secret: &str, sub: &str, valid_secs: i64) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64;
        let claims = Claims {
            sub: sub.into(),
            exp: (now + valid_secs) as usize,
            email: Some(format!("{sub}@example.com")),
            user_metadata: UserMetadata {
                full_name: Some("Ana Rosarina".into()),
                ..Default::default()
            },
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn validate_token_of_auth_provider() {
        let state = JwtState::new(Some(SECRET));
        let claims = state
            .validate_token(&generate_token(SECRET, "u1", 3600))
            .unwrap();
        assert_eq!("u1", claims.sub);
        assert_eq!(Some("u1@example.com"), claims.email.as_deref());
        assert_eq!(
            Some("Ana Rosarina"),
            claims.user_metadata.full_name.as_deref()
        );
    }

    #[test]
    fn reject_expired_and_foreign_tokens() {
        let state = JwtState::new(Some(SECRET));
        assert!(state
            .validate_token(&generate_token(SECRET, "u1", -3600))
            .is_err());
        assert!(state
            .validate_token(&generate_token("another-secret", "u1", 3600))
            .is_err());
        assert!(state.validate_token("dubidubidu").is_err());
    }

    #[test]
    fn disabled_without_secret() {
        let state = JwtState::new(None);
        assert!(!state.is_enabled());
        assert!(state
            .validate_token(&generate_token(SECRET, "u1", 3600))
            .is_err());
        assert!(!JwtState::new(Some("")).is_enabled());
    }
}
