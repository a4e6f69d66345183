//! Process configuration
//!
//! Everything the commands need from the environment is read once, at
//! startup, into a [`Settings`] value. Sources, highest precedence first:
//!
//! 1. **Command-line flags** - `--tf_key`, `--organization`, `--address`
//! 2. **Environment** - `ATLAS_TOKEN`, `ATLAS_ORGANIZATION`, `ATLAS_ADDRESS`, `ATLAS_OAUTH_TOKEN_ID`
//! 3. **Config file** - `<config dir>/tfsync/config.toml`
//! 4. **Built-in default** - address only
//!
//! Credential overrides for `aws_access_key` / `aws_secret_key` are captured
//! in the same pass so the sync engine never touches the environment.

mod file;
mod settings;

pub use file::FileConfig;
pub use settings::{
    ADDRESS_ENV, CredentialOverrides, OAUTH_TOKEN_ENV, ORGANIZATION_ENV, Settings,
    SettingsOverrides, TOKEN_ENV,
};
