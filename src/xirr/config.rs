//! Solver settings for XIRR
//!
//! Defaults reproduce the calculator behaviour: 10% starting guess, 100
//! Newton-Raphson iterations, 1e-6 tolerance on both NPV and its derivative.
//! Each setting can be overridden from the environment:
//!   XIRR_GUESS, XIRR_MAX_ITERATIONS, XIRR_TOLERANCE, XIRR_BISECTION_FALLBACK

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_GUESS: f64 = 0.10;
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Lowest annual rate the solver will visit (-99%)
pub const RATE_FLOOR: f64 = -0.99;
/// Highest annual rate the solver will visit (+1000%)
pub const RATE_CEILING: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XirrConfig {
    /// Starting annual rate as a decimal (0.10 = 10%)
    pub guess: f64,
    pub max_iterations: u32,
    /// Convergence threshold on |NPV|, also the near-zero threshold for dNPV
    pub tolerance: f64,
    /// Retry with bisection over the rate band when Newton-Raphson fails
    pub bisection_fallback: bool,
}

impl Default for XirrConfig {
    fn default() -> Self {
        Self {
            guess: DEFAULT_GUESS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
            bisection_fallback: false,
        }
    }
}

impl XirrConfig {
    pub fn with_guess(guess: f64) -> Self {
        Self {
            guess,
            ..Self::default()
        }
    }

    /// Defaults overridden by any XIRR_* environment variables that are set
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`XirrConfig::from_env`] with a custom variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            guess: parse_or("XIRR_GUESS", &lookup, defaults.guess)?,
            max_iterations: parse_or("XIRR_MAX_ITERATIONS", &lookup, defaults.max_iterations)?,
            tolerance: parse_or("XIRR_TOLERANCE", &lookup, defaults.tolerance)?,
            bisection_fallback: match lookup("XIRR_BISECTION_FALLBACK") {
                Some(value) => parse_flag("XIRR_BISECTION_FALLBACK", &value)?,
                None => defaults.bisection_fallback,
            },
        })
    }
}

fn parse_or<T, F>(key: &str, lookup: &F, default: T) -> Result<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| Error::invalid_config(key, value)),
        None => Ok(default),
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::invalid_config(key, value)),
    }
}
