//! Credential resolution: flags and environment first, then the credentials file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use palgate_token::{SessionSecret, TokenType};
use serde::Deserialize;

/// File written by the device-linking flow.
pub const DEFAULT_FILE_NAME: &str = ".palgate-cli.json";

/// Credentials as stored on disk. Every field is optional so flags can fill gaps.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsFile {
    pub phone_number: Option<PhoneField>,
    pub token: Option<String>,
    pub token_type: Option<TokenType>,
}

/// Linking responses carry the phone number either as a number or a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PhoneField {
    Number(u64),
    Text(String),
}

impl PhoneField {
    fn to_u64(&self) -> Result<u64> {
        match self {
            PhoneField::Number(n) => Ok(*n),
            PhoneField::Text(s) => s
                .trim()
                .parse()
                .with_context(|| format!("phone number {s:?} is not an unsigned integer")),
        }
    }
}

/// Values supplied on the command line or through the environment.
#[derive(Debug, Default)]
pub struct Overrides {
    pub secret_hex: Option<String>,
    pub phone_number: Option<u64>,
    pub token_type: Option<TokenType>,
}

/// Fully resolved inputs for a derivation.
#[derive(Debug)]
pub struct Credentials {
    pub secret: SessionSecret,
    pub phone_number: u64,
    pub token_type: TokenType,
}

/// Home-directory credentials path, when a home directory is known.
pub fn default_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().join(DEFAULT_FILE_NAME))
}

/// Loads the credentials file.
///
/// An explicitly requested file must exist; the default one is optional.
pub fn load_file(path: &Path, required: bool) -> Result<CredentialsFile> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound && !required => {
            tracing::debug!(path = %path.display(), "no credentials file");
            return Ok(CredentialsFile::default());
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            bail!("credentials file {} not found", path.display());
        }
        Err(err) => return Err(err).with_context(|| format!("read {}", path.display())),
    };
    if text.trim().is_empty() {
        tracing::warn!(path = %path.display(), "credentials file is empty, ignoring");
        return Ok(CredentialsFile::default());
    }
    let file = serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded credentials file");
    Ok(file)
}

/// Merges overrides over the file, naming the first missing parameter.
pub fn resolve(overrides: Overrides, file: CredentialsFile) -> Result<Credentials> {
    let secret_hex = match overrides.secret_hex.or(file.token) {
        Some(hex) => hex,
        None => bail!("missing required parameter: --secret (or PALGATE_SECRET)"),
    };
    let phone_number = match (overrides.phone_number, file.phone_number) {
        (Some(n), _) => n,
        (None, Some(field)) => field.to_u64()?,
        (None, None) => bail!("missing required parameter: --phone (or PALGATE_PHONE)"),
    };
    let token_type = match overrides.token_type.or(file.token_type) {
        Some(ty) => ty,
        None => bail!("missing required parameter: --token-type (or PALGATE_TOKEN_TYPE)"),
    };
    let secret = SessionSecret::from_hex(&secret_hex).context("decode session secret")?;
    Ok(Credentials {
        secret,
        phone_number,
        token_type,
    })
}
