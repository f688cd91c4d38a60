//! Authenticated users
//!
//! Users are managed by an external identity provider, Scribbly only ever sees who is
//! signed in.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Opaque user identifier handed out by the identity provider
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The signed in user
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    /// Unique ID of the user
    pub id: UserId,

    /// Email address, when the provider shares it
    pub email: Option<String>,

    /// Display name, when the provider shares it
    pub display_name: Option<String>,
}

impl Identity {
    /// Identity with just an ID
    pub fn new<I>(id: I) -> Self
    where
        I: Into<UserId>,
    {
        Self {
            id: id.into(),
            email: None,
            display_name: None,
        }
    }
}
