//! Wallet configuration: TOML file plus environment variable overrides.
//!
//! Priority: environment variables > config file > defaults.
//!
//! ```toml
//! [derivation]
//! path = "m/44'/118'/0'/0/0"
//! address_prefix = "cosmos"
//!
//! [keystore]
//! kdf_iterations = 100000
//! ```

use std::path::Path;

use bitcoin::bip32::DerivationPath;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::address::{bech32ify, DEFAULT_ADDRESS_PREFIX};
use crate::crypto::{KdfParams, DEFAULT_KDF_ITERATIONS};
use crate::keys::DEFAULT_DERIVATION_PATH;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse TOML config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level wallet configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Key derivation and address settings
    #[serde(default)]
    pub derivation: DerivationConfig,

    /// Keystore encryption settings
    #[serde(default)]
    pub keystore: KeystoreConfig,
}

/// Key derivation and address settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivationConfig {
    /// BIP-32 path of the account key
    #[serde(default = "default_derivation_path")]
    pub path: String,

    /// Bech32 prefix for derived addresses
    #[serde(default = "default_address_prefix")]
    pub address_prefix: String,
}

impl Default for DerivationConfig {
    fn default() -> Self {
        Self {
            path: default_derivation_path(),
            address_prefix: default_address_prefix(),
        }
    }
}

/// Keystore encryption settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeystoreConfig {
    /// PBKDF2 iteration count
    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,
}

impl Default for KeystoreConfig {
    fn default() -> Self {
        Self {
            kdf_iterations: default_kdf_iterations(),
        }
    }
}

impl KeystoreConfig {
    pub fn kdf_params(&self) -> KdfParams {
        KdfParams::new(self.kdf_iterations)
    }
}

// ============================================================================
// Default value functions
// ============================================================================

fn default_derivation_path() -> String {
    DEFAULT_DERIVATION_PATH.to_string()
}

fn default_address_prefix() -> String {
    DEFAULT_ADDRESS_PREFIX.to_string()
}

fn default_kdf_iterations() -> u32 {
    DEFAULT_KDF_ITERATIONS
}

// ============================================================================
// Loading & environment override
// ============================================================================

impl WalletConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `COSMWALLET_DERIVATION_PATH`
    /// - `COSMWALLET_ADDRESS_PREFIX`
    /// - `COSMWALLET_KDF_ITERATIONS`
    pub fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("COSMWALLET_DERIVATION_PATH") {
            self.derivation.path = v;
        }
        if let Ok(v) = std::env::var("COSMWALLET_ADDRESS_PREFIX") {
            self.derivation.address_prefix = v;
        }
        if let Ok(v) = std::env::var("COSMWALLET_KDF_ITERATIONS") {
            match v.parse::<u32>() {
                Ok(iterations) => self.keystore.kdf_iterations = iterations,
                Err(_) => log::warn!("Ignoring non-numeric COSMWALLET_KDF_ITERATIONS={}", v),
            }
        }
    }

    /// Validate that the configuration is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.derivation
            .path
            .parse::<DerivationPath>()
            .map_err(|e| ConfigError::Invalid(format!("derivation.path: {}", e)))?;

        if self.derivation.address_prefix.is_empty() {
            return Err(ConfigError::Invalid(
                "derivation.address_prefix must not be empty".to_string(),
            ));
        }
        bech32ify(&[0u8; 20], &self.derivation.address_prefix)
            .map_err(|e| ConfigError::Invalid(format!("derivation.address_prefix: {}", e)))?;

        self.keystore
            .kdf_params()
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("keystore.kdf_iterations: {}", e)))?;

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
