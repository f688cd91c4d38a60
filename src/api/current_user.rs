//! Current user service
//!
//! Get the current user from the request based on the Authorization header. Tokens are
//! issued by the identity provider, Scribbly only verifies them.

use std::ops::Deref;
use std::sync::Arc;

use axum::Extension;
use axum::RequestPartsExt;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use jsonwebtoken::DecodingKey;
use serde::Deserialize;
use serde::Serialize;

use crate::api::Error;
use crate::users::Identity;
use crate::users::UserId;

/// The key used for verifying JWT tokens
#[derive(Clone)]
pub struct JwtKeys {
    /// The decoding key
    decoding: DecodingKey,
}

impl JwtKeys {
    /// Create a new decoding key, derived from the secret shared with the identity provider
    pub fn new(secret: &[u8]) -> Self {
        Self {
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

/// The JWT claims identifying a user
#[derive(Debug, Deserialize, Serialize)]
pub struct Claims {
    /// The user ID
    pub sub: String,

    /// When does the token expire, seconds since the epoch
    pub exp: i64,

    /// Email address of the user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Display name of the user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Claims {
    fn into_identity(self) -> Identity {
        Identity {
            id: UserId::from(self.sub),
            email: self.email,
            display_name: self.name,
        }
    }
}

/// Current user service
#[derive(Clone, Debug)]
pub struct CurrentUser {
    /// The signed in identity
    identity: Arc<Identity>,
}

impl CurrentUser {
    /// Create the current user from an identity
    fn new(identity: Identity) -> Self {
        Self {
            identity: Arc::new(identity),
        }
    }
}

impl Deref for CurrentUser {
    type Target = Identity;

    fn deref(&self) -> &Self::Target {
        &self.identity
    }
}

impl<B> FromRequestParts<B> for CurrentUser
where
    B: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &B) -> Result<Self, Self::Rejection> {
        use jsonwebtoken::Validation;
        use jsonwebtoken::decode;

        // Extract the token from the authorization header
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| Error::forbidden("Missing API token"))?;

        let Extension(jwt_keys) = parts
            .extract::<Extension<JwtKeys>>()
            .await
            .map_err(|_| Error::internal_server_error("Could not get JWT keys"))?;

        let validation = Validation::default();

        // Decode the user data
        let token_data = decode::<Claims>(bearer.token(), &jwt_keys.decoding, &validation)
            .map_err(|err| Error::forbidden(format!("Invalid token: {err}")))?;

        if token_data.claims.sub.is_empty() {
            return Err(Error::forbidden("Invalid token: missing user"));
        }

        Ok(CurrentUser::new(token_data.claims.into_identity()))
    }
}
