//! Identity Resolver — the access-control gate for user-scoped operations.
//!
//! The authentication provider itself is external; by the time a request
//! reaches this service the provider has resolved the subject and attached
//! it as the `x-user-id` header. Handlers that mutate data on behalf of a
//! user extract `CurrentUser` (hard 401 on absence); the enhancement flow
//! extracts `MaybeUser` and maps absence to a login redirect instead.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The subject resolved for the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurrentUser {
    pub user_id: Uuid,
}

fn resolve_current_user(parts: &Parts) -> Option<CurrentUser> {
    let raw = parts.headers.get(USER_ID_HEADER)?.to_str().ok()?;
    let user_id = Uuid::parse_str(raw).ok()?;
    Some(CurrentUser { user_id })
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        resolve_current_user(parts).ok_or(AppError::Unauthorized)
    }
}

/// Optional variant of `CurrentUser` for flows that decide for themselves
/// how to answer an unauthenticated caller.
#[derive(Debug, Clone, Copy)]
pub struct MaybeUser(pub Option<CurrentUser>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(resolve_current_user(parts)))
    }
}

/// Short-circuits unauthenticated callers with a login redirect.
/// Used by the enhancement proxy before any LLM call is attempted.
pub fn ensure_authenticated(user: Option<CurrentUser>) -> Result<CurrentUser, AppError> {
    user.ok_or(AppError::LoginRequired)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_authenticated_passes_user_through() {
        let user = CurrentUser {
            user_id: Uuid::new_v4(),
        };
        assert_eq!(ensure_authenticated(Some(user)).unwrap(), user);
    }

    #[test]
    fn test_ensure_authenticated_redirects_to_login() {
        let err = ensure_authenticated(None).unwrap_err();
        assert!(matches!(err, AppError::LoginRequired));
    }
}
