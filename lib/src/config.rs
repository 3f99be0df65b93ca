use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, Chainable};

/// Site configuration, read from a TOML file.
///
/// ```toml
/// docs_dir = "docs"
/// site_name = "Hermes"
///
/// [extra]
/// version = "dev"
/// raw_url_tpl = "https://raw.githubusercontent.com/org/repo/{version}/{path}"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "Config::default_docs_dir")]
    pub docs_dir: PathBuf,
    #[serde(default)]
    pub templates_dir: Option<PathBuf>,
    #[serde(default)]
    pub site_name: Option<String>,
    pub extra: Extra,
}

/// The `[extra]` table. Every key in it is also exposed to templates as a
/// top-level variable.
///
/// `hermes_version` and `github_raw_url_tpl` are accepted in place of
/// `version` and `raw_url_tpl`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Extra {
    #[serde(alias = "hermes_version")]
    pub version: String,
    #[serde(default, alias = "github_raw_url_tpl", skip_serializing_if = "Option::is_none")]
    pub raw_url_tpl: Option<String>,
    #[serde(flatten)]
    pub variables: toml::Table,
}

impl Config {
    pub const DEFAULT_DOCS_DIR: &'static str = "docs";
    pub const DEFAULT_TEMPLATES_DIR: &'static str = "templates";

    fn default_docs_dir() -> PathBuf {
        PathBuf::from(Self::DEFAULT_DOCS_DIR)
    }

    /// Reads the configuration at `path`. Relative directories in the file are
    /// resolved against the directory containing it.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let string = fs::read_to_string(path).chain_with(|| error! {
            "failed to read configuration file",
            "path" => path.display(),
        })?;

        let root = path.parent().unwrap_or(Path::new(""));
        Self::parse(&string, root).chain_with(|| error! {
            "invalid configuration file",
            "path" => path.display(),
        })
    }

    /// Parses a configuration from `string`, resolving relative directories
    /// against `root`.
    pub fn parse<R: AsRef<Path>>(string: &str, root: R) -> Result<Self> {
        let mut config: Config = toml::from_str(string)?;
        let root = root.as_ref();
        config.docs_dir = root.join(&config.docs_dir);
        config.templates_dir = match config.templates_dir.take() {
            Some(dir) => Some(root.join(dir)),
            None => Some(root.join(Self::DEFAULT_TEMPLATES_DIR)).filter(|dir| dir.is_dir()),
        };

        Ok(config)
    }
}
