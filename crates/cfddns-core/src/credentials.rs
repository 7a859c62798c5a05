// # Credential Resolver
//
// Turns explicit arguments plus whatever the environment holds into one
// `Credentials` value for the provider client.
//
// ## Precedence
//
// 1. Explicit arguments. A secret with no identity is an API token, and the
//    environment is not consulted at all.
// 2. `CF_API_TOKEN`. Replaces any key pair found in the environment and
//    forces the identity unset.
// 3. Identity / key variables, canonical name first, then the two legacy
//    generations.
//
// The identity `x` is a placeholder some NAS GUIs require for the user field
// and is read as "no identity".
//
// Nothing is written back to the process environment.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fmt;

/// Identity placeholder accepted from GUIs that require a non-empty user field
pub const IDENTITY_SENTINEL: &str = "x";

/// Token-style variable
pub const TOKEN_VAR: &str = "CF_API_TOKEN";

/// Identity variables, canonical first
pub const IDENTITY_VARS: &[&str] = &["CF_API_EMAIL", "CF_EMAIL", "CLOUDFLARE_EMAIL"];

/// Secret variables, canonical first
pub const SECRET_VARS: &[&str] = &["CF_API_KEY", "CF_KEY", "CLOUDFLARE_API_KEY"];

/// Read-only view of environment variables
pub trait Environment {
    /// Value of `name`, if set
    fn var(&self, name: &str) -> Option<String>;
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Credentials for the provider API
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Scoped API token, sent as a bearer token
    ApiToken(String),

    /// Account email plus global API key
    GlobalKey {
        /// Account email
        email: String,
        /// Global API key
        key: String,
    },
}

// Secrets never reach logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::ApiToken(_) => f.debug_tuple("ApiToken").field(&"<REDACTED>").finish(),
            Credentials::GlobalKey { email, .. } => f
                .debug_struct("GlobalKey")
                .field("email", email)
                .field("key", &"<REDACTED>")
                .finish(),
        }
    }
}

impl Credentials {
    /// Resolve credentials from explicit arguments and the environment
    ///
    /// # Parameters
    ///
    /// - `identity`: account email from the command line, if any
    /// - `secret`: API key or token from the command line, if any
    /// - `env`: environment to fall back on
    ///
    /// # Returns
    ///
    /// - `Ok(Credentials)`: exactly one consistent credential
    /// - `Err(Error::Authentication)`: no secret anywhere
    pub fn resolve(
        identity: Option<&str>,
        secret: Option<&str>,
        env: &impl Environment,
    ) -> Result<Self> {
        let identity = normalize_identity(identity.map(str::to_string));

        if let Some(secret) = non_empty(secret.map(str::to_string)) {
            tracing::debug!("Using credentials passed explicitly");
            return Ok(Self::from_parts(identity, secret));
        }

        let (env_identity, env_secret) = match lookup(env, &[TOKEN_VAR]) {
            Some(token) => {
                tracing::debug!("Using API token from {}", TOKEN_VAR);
                (None, Some(token))
            }
            None => (
                normalize_identity(lookup(env, IDENTITY_VARS)),
                lookup(env, SECRET_VARS),
            ),
        };

        let secret = env_secret.ok_or_else(|| {
            Error::auth(format!(
                "no API key or token given; pass --key or set {} or {}",
                TOKEN_VAR, SECRET_VARS[0]
            ))
        })?;

        Ok(Self::from_parts(identity.or(env_identity), secret))
    }

    fn from_parts(identity: Option<String>, secret: String) -> Self {
        match identity {
            Some(email) => Credentials::GlobalKey { email, key: secret },
            None => Credentials::ApiToken(secret),
        }
    }

    /// Account email, when using a global key
    pub fn identity(&self) -> Option<&str> {
        match self {
            Credentials::ApiToken(_) => None,
            Credentials::GlobalKey { email, .. } => Some(email),
        }
    }

    /// Reject empty secrets
    pub fn validate(&self) -> Result<()> {
        let secret = match self {
            Credentials::ApiToken(token) => token,
            Credentials::GlobalKey { key, .. } => key,
        };
        if secret.is_empty() {
            return Err(Error::auth("API key or token cannot be empty"));
        }
        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn normalize_identity(value: Option<String>) -> Option<String> {
    non_empty(value).filter(|v| v != IDENTITY_SENTINEL)
}

// First non-empty variable wins
fn lookup(env: &impl Environment, names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| non_empty(env.var(name)))
}
