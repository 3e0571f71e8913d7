//! Deployment environments.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A deployment environment. Used purely for naming and namespacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    Qa,
    Staging,
    Prod,
}

/// Account tier an environment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    NonProd,
    Prod,
}

/// Error returned when parsing an unknown environment name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown environment '{0}' (expected one of: dev, qa, staging, prod)")]
pub struct ParseEnvironmentError(pub String);

impl Environment {
    /// Every environment, in declaration order.
    pub const ALL: [Environment; 4] = [
        Environment::Dev,
        Environment::Qa,
        Environment::Staging,
        Environment::Prod,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Qa => "qa",
            Environment::Staging => "staging",
            Environment::Prod => "prod",
        }
    }

    pub fn tier(&self) -> Tier {
        match self {
            Environment::Prod => Tier::Prod,
            _ => Tier::NonProd,
        }
    }

    /// Returns true if this environment declares the resources shared by its tier.
    ///
    /// `dev` owns the nonprod tables and auth service; `qa` and `staging`
    /// only reference them.
    pub fn owns_shared_resources(&self) -> bool {
        matches!(self, Environment::Dev | Environment::Prod)
    }
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::NonProd => "nonprod",
            Tier::Prod => "prod",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ParseEnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" => Ok(Environment::Dev),
            "qa" => Ok(Environment::Qa),
            "staging" => Ok(Environment::Staging),
            "prod" => Ok(Environment::Prod),
            _ => Err(ParseEnvironmentError(s.to_string())),
        }
    }
}
