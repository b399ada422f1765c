//! Runtime configuration

use {
    crate::feeds::{CARBON_INTENSITY_API_BASE, OCTOPUS_API_BASE},
    anyhow::{Context, Result as AnyResult},
    reqwest::Url,
    std::{env, net::SocketAddr, str::FromStr},
};

pub(crate) const DEFAULT_ADDR: &str = "127.0.0.1:8080";

/// Configuration loaded from environment variables. Unset or empty variables
/// fall back to their defaults.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Config {
    /// Address the function runtime listens on (`GET_DATA_ADDR`)
    pub(crate) addr: SocketAddr,
    /// Base URL of the Octopus Energy API (`OCTOPUS_API_BASE`)
    pub(crate) octopus_api_base: Url,
    /// Base URL of the Carbon Intensity API (`CARBON_INTENSITY_API_BASE`)
    pub(crate) carbon_intensity_api_base: Url,
}

impl Config {
    pub(crate) fn from_env() -> AnyResult<Self> {
        Ok(Self {
            addr: env_or("GET_DATA_ADDR", DEFAULT_ADDR)?,
            octopus_api_base: env_or("OCTOPUS_API_BASE", OCTOPUS_API_BASE)?,
            carbon_intensity_api_base: env_or(
                "CARBON_INTENSITY_API_BASE",
                CARBON_INTENSITY_API_BASE,
            )?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            octopus_api_base: Url::parse(OCTOPUS_API_BASE).expect("Default URL must be valid"),
            carbon_intensity_api_base: Url::parse(CARBON_INTENSITY_API_BASE)
                .expect("Default URL must be valid"),
        }
    }
}

fn env_or<T>(name: &str, default: &str) -> AnyResult<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string());

    value
        .parse()
        .with_context(|| format!("Invalid value for {name}: '{value}'"))
}
