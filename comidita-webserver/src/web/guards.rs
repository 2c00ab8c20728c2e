use std::{ops::Deref, sync::Arc};

use comidita_db_sqlite::Connections as ConnectionPool;
use rocket::{
    self,
    outcome::try_outcome,
    request::{FromRequest, Outcome, Request},
    State,
};

use crate::{
    core::{
        entities::{Id, User},
        gateways::{PhotoStorageGateway, PlacesGateway},
    },
    web::jwt,
};
use comidita_application::error::AppError;
use comidita_core::usecases::Error as ParameterError;

type Result<T> = std::result::Result<T, AppError>;

fn get_bearer_token(auth_header_val: &str) -> Option<&str> {
    let (scheme, token) = auth_header_val.trim().split_once(' ')?;
    (scheme == "Bearer" && !token.trim().is_empty()).then(|| token.trim())
}

// Wrapper to be able to implement `FromRequest`
#[derive(Clone)]
pub struct Db(ConnectionPool);

impl From<ConnectionPool> for Db {
    fn from(pool: ConnectionPool) -> Self {
        Self(pool)
    }
}

impl Deref for Db {
    type Target = ConnectionPool;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Db {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let db = try_outcome!(request.guard::<&State<Db>>().await);
        Outcome::Success(db.inner().clone())
    }
}

/// The signed in user as stated by a valid access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Id,
    pub email: Option<String>,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

impl From<jwt::Claims> for AuthUser {
    fn from(claims: jwt::Claims) -> Self {
        let jwt::Claims {
            sub,
            email,
            user_metadata,
            ..
        } = claims;
        Self {
            id: sub.into(),
            email,
            name: user_metadata.full_name.or(user_metadata.name),
            avatar_url: user_metadata.avatar_url,
        }
    }
}

impl From<AuthUser> for User {
    fn from(from: AuthUser) -> Self {
        let AuthUser {
            id,
            email,
            name,
            avatar_url,
        } = from;
        Self {
            email,
            name,
            avatar_url,
            ..User::new(id)
        }
    }
}

/// Optional authentication, never fails.
#[derive(Debug)]
pub struct Auth {
    user: Option<AuthUser>,
}

impl Auth {
    pub fn user_id(&self) -> Option<Id> {
        self.user.as_ref().map(|u| u.id.clone())
    }

    pub fn account(&self) -> Result<&AuthUser> {
        self.user
            .as_ref()
            .ok_or_else(|| ParameterError::Unauthenticated.into())
    }

    async fn user_from_jwt_in_header(request: &Request<'_>) -> Option<AuthUser> {
        let jwt_state = request.guard::<&State<jwt::JwtState>>().await.succeeded()?;
        if !jwt_state.is_enabled() {
            return None;
        }
        request
            .headers()
            .get("Authorization")
            .filter_map(get_bearer_token)
            .find_map(|token| match jwt_state.validate_token(token) {
                Ok(claims) => Some(claims.into()),
                Err(err) => {
                    debug!("Rejected access token: {err}");
                    None
                }
            })
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Auth {
    type Error = ();
    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let user = Self::user_from_jwt_in_header(request).await;
        Outcome::Success(Self { user })
    }
}

/// Identifies the client for rate limiting.
///
/// Only the header configured as `ip_header` of rocket is trusted,
/// which must be set by a reverse proxy. Otherwise the remote
/// address of the connection is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientId(pub String);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for ClientId {
    type Error = ();
    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let id = request
            .client_ip()
            .map_or_else(|| "unknown".to_owned(), |ip| ip.to_string());
        Outcome::Success(ClientId(id))
    }
}

pub struct Version(pub &'static str);

/// Absent if no API key for the places provider is configured.
pub struct PlacesGw(pub Option<Arc<dyn PlacesGateway + Send + Sync>>);

pub struct PhotoStorage(pub Arc<dyn PhotoStorageGateway + Send + Sync>);

impl Deref for PhotoStorage {
    type Target = dyn PhotoStorageGateway;
    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bearer_token() {
        assert_eq!(Some("abc"), get_bearer_token("Bearer abc"));
        assert_eq!(None, get_bearer_token("Basic abc"));
        assert_eq!(None, get_bearer_token("Bearer "));
        assert_eq!(None, get_bearer_token("abc"));
    }

    #[test]
    fn prefer_full_name_of_token() {
        let user = AuthUser::from(jwt::Claims {
            sub: "u1".into(),
            exp: 0,
            email: None,
            user_metadata: jwt::UserMetadata {
                name: Some("ana".into()),
                full_name: Some("Ana Rosarina".into()),
                avatar_url: None,
            },
        });
        assert_eq!(Some("Ana Rosarina"), user.name.as_deref());
        let user = User::from(user);
        assert_eq!("u1", user.id.as_str());
        assert_eq!(0, user.points);
    }
}
