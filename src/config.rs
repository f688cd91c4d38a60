//! Configuration from the environment
//!
//! Empty variables count as not set.

use std::env::var;
use std::net::SocketAddr;

use anyhow::Context;
use anyhow::Result;
use uuid::Uuid;

const DEFAULT_ADDRESS: &str = "0.0.0.0:6000";

/// Runtime configuration
pub struct Config {
    /// Address to listen on
    pub address: SocketAddr,

    /// Secret shared with the identity provider to verify tokens
    pub jwt_secret: String,
}

impl Config {
    /// Read the configuration from the environment
    ///
    /// # Errors
    ///
    /// Will return `Err` when `ADDRESS` or `PORT` can not be parsed
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            address: address()?,
            jwt_secret: jwt_secret(),
        })
    }
}

/// Get the value of ENV var, or a default
///
/// Only when:
/// - It is set
/// - It is not empty
pub fn env_var_or_else<F>(var_name: &'static str, or_else: F) -> String
where
    F: FnOnce() -> String,
{
    match var(var_name) {
        Ok(value) if !value.is_empty() => value,
        _ => or_else(),
    }
}

fn address() -> Result<SocketAddr> {
    let address = env_var_or_else("ADDRESS", || String::from(DEFAULT_ADDRESS));
    let mut address = address
        .parse::<SocketAddr>()
        .with_context(|| format!("Invalid `ADDRESS`: {address}"))?;

    // optional override of just the port
    let port = env_var_or_else("PORT", String::new);
    if !port.is_empty() {
        let port = port
            .parse::<u16>()
            .with_context(|| format!("Invalid `PORT`: {port}"))?;

        address.set_port(port);
    }

    Ok(address)
}

fn jwt_secret() -> String {
    env_var_or_else("JWT_SECRET", || {
        let jwt_secret = Uuid::new_v4().simple().to_string();
        tracing::info!("`JWT_SECRET` is not set, generating temporary one: {jwt_secret}");
        jwt_secret
    })
}
