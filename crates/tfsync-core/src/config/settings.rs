//! Resolved process settings

use std::fmt;

use tfsync_remote::{ClientConfig, DEFAULT_ADDRESS};

use super::file::FileConfig;
use crate::{Error, Result};

pub const TOKEN_ENV: &str = "ATLAS_TOKEN";
pub const ORGANIZATION_ENV: &str = "ATLAS_ORGANIZATION";
pub const ADDRESS_ENV: &str = "ATLAS_ADDRESS";
pub const OAUTH_TOKEN_ENV: &str = "ATLAS_OAUTH_TOKEN_ID";

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub token: Option<String>,
    pub organization: Option<String>,
    pub address: Option<String>,
}

/// Credential values injected into newly created variables
///
/// Each reserved variable name is looked up under a primary name and then a
/// secondary fallback name.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialOverrides {
    access_key: Option<String>,
    secret_key: Option<String>,
}

impl CredentialOverrides {
    pub const ACCESS_KEY: &'static str = "aws_access_key";
    pub const SECRET_KEY: &'static str = "aws_secret_key";

    const ACCESS_KEY_SOURCES: [&'static str; 2] = ["TF_VAR_aws_access_key", "AWS_ACCESS_KEY_ID"];
    const SECRET_KEY_SOURCES: [&'static str; 2] =
        ["TF_VAR_aws_secret_key", "AWS_SECRET_ACCESS_KEY"];

    pub fn new(access_key: Option<String>, secret_key: Option<String>) -> Self {
        Self {
            access_key,
            secret_key,
        }
    }

    /// Capture overrides through an environment lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let first = |names: [&str; 2]| names.into_iter().find_map(|name| non_empty(lookup(name)));
        Self {
            access_key: first(Self::ACCESS_KEY_SOURCES),
            secret_key: first(Self::SECRET_KEY_SOURCES),
        }
    }

    /// Override value for a variable name, if it is reserved and one was found
    pub fn value_for(&self, name: &str) -> Option<&str> {
        match name {
            Self::ACCESS_KEY => self.access_key.as_deref(),
            Self::SECRET_KEY => self.secret_key.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Debug for CredentialOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialOverrides")
            .field("access_key", &self.access_key.as_ref().map(|_| "<redacted>"))
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Settings shared by every command
#[derive(Clone)]
pub struct Settings {
    pub address: String,
    pub token: String,
    pub organization: String,
    pub oauth_token_id: Option<String>,
    pub credentials: CredentialOverrides,
}

impl Settings {
    /// Merge flags, environment and config file
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredentials`] when no source provides the
    /// access token or the organization.
    pub fn resolve(
        overrides: &SettingsOverrides,
        file: &FileConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let pick = |flag: &Option<String>, env: &str, file: &Option<String>| {
            non_empty(flag.clone())
                .or_else(|| non_empty(lookup(env)))
                .or_else(|| non_empty(file.clone()))
        };

        let token = pick(&overrides.token, TOKEN_ENV, &file.token).ok_or(
            Error::MissingCredentials {
                what: "access token",
                flag: "--tf_key",
                env: TOKEN_ENV,
            },
        )?;
        let organization = pick(&overrides.organization, ORGANIZATION_ENV, &file.organization)
            .ok_or(Error::MissingCredentials {
                what: "organization",
                flag: "--organization",
                env: ORGANIZATION_ENV,
            })?;
        let address = pick(&overrides.address, ADDRESS_ENV, &file.address)
            .unwrap_or_else(|| DEFAULT_ADDRESS.to_string());
        let oauth_token_id = pick(&None, OAUTH_TOKEN_ENV, &file.oauth_token_id);

        Ok(Self {
            address,
            token,
            organization,
            oauth_token_id,
            credentials: CredentialOverrides::from_lookup(&lookup),
        })
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            address: self.address.clone(),
            token: self.token.clone(),
            organization: self.organization.clone(),
            oauth_token_id: self.oauth_token_id.clone(),
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("address", &self.address)
            .field("token", &"<redacted>")
            .field("organization", &self.organization)
            .field("oauth_token_id", &self.oauth_token_id)
            .field("credentials", &self.credentials)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
