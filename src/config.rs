use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{tlog_debug, Error, Result};

pub const DEFAULT_GITHUB_USER: &str = "douglascunha1";
pub const DEFAULT_CONTACT_EMAIL: &str = "contact.dougcunha.dev@gmail.com";
pub const DEFAULT_GITHUB_API: &str = "https://api.github.com";
pub const DEFAULT_PRICE_API: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_QUOTE_API: &str = "https://dummyjson.com";
const DEFAULT_TIMEOUT_MS: u64 = 8_000;

/// User configuration loaded from `~/.termfolio/termfolio.toml`.
///
/// Every field is optional; the `effective_*` accessors supply defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub github_user: Option<String>,
    pub contact_email: Option<String>,
    pub default_theme: Option<String>,
    pub request_timeout_ms: Option<u64>,
    pub github_api: Option<String>,
    pub price_api: Option<String>,
    pub quote_api: Option<String>,
}

impl Config {
    pub fn termfolio_dir() -> Result<PathBuf> {
        Ok(dirs::home_dir().ok_or(Error::NoHomeDir)?.join(".termfolio"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::termfolio_dir()?.join("termfolio.toml"))
    }

    pub fn prefs_path() -> Result<PathBuf> {
        Ok(Self::termfolio_dir()?.join("prefs.json"))
    }

    pub fn effective_github_user(&self) -> &str {
        self.github_user.as_deref().unwrap_or(DEFAULT_GITHUB_USER)
    }

    pub fn effective_contact_email(&self) -> &str {
        self.contact_email.as_deref().unwrap_or(DEFAULT_CONTACT_EMAIL)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS))
    }

    pub fn github_api(&self) -> &str {
        trim_base(self.github_api.as_deref().unwrap_or(DEFAULT_GITHUB_API))
    }

    pub fn price_api(&self) -> &str {
        trim_base(self.price_api.as_deref().unwrap_or(DEFAULT_PRICE_API))
    }

    pub fn quote_api(&self) -> &str {
        trim_base(self.quote_api.as_deref().unwrap_or(DEFAULT_QUOTE_API))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        tlog_debug!("Config::load path={}", path.display());
        if !path.exists() {
            tlog_debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }
        let config: Self = toml::from_str(&fs::read_to_string(path)?)?;
        tlog_debug!(
            "Config loaded: github_user={:?} default_theme={:?} timeout_ms={:?}",
            config.github_user,
            config.default_theme,
            config.request_timeout_ms
        );
        Ok(config)
    }

    /// Every field set to its default, for writing a starter file.
    pub fn filled() -> Self {
        Self {
            github_user: Some(DEFAULT_GITHUB_USER.to_string()),
            contact_email: Some(DEFAULT_CONTACT_EMAIL.to_string()),
            default_theme: Some(crate::theme::DEFAULT_THEME.to_string()),
            request_timeout_ms: Some(DEFAULT_TIMEOUT_MS),
            github_api: Some(DEFAULT_GITHUB_API.to_string()),
            price_api: Some(DEFAULT_PRICE_API.to_string()),
            quote_api: Some(DEFAULT_QUOTE_API.to_string()),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        tlog_debug!("Config saved to {}", path.display());
        Ok(())
    }
}

fn trim_base(url: &str) -> &str {
    url.trim_end_matches('/')
}
