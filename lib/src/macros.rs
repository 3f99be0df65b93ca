//! Documentation macros and filters exposed to templates.
//!
//! | kind     | name             |                                           |
//! |----------|------------------|-------------------------------------------|
//! | variable | `version`        | `extra.version`, with `dev` as `master`   |
//! | variable | `hermes_version` | same as `version`                         |
//! | macro    | `raw_github_url` | `extra.raw_url_tpl` with version and path |
//! | macro    | `import_file`    | contents of a file in `docs_dir`          |
//! | filter   | `urlencode`      | [`encode_plus()`]                         |

use std::{fs, io};
use std::path::PathBuf;
use std::sync::Arc;

use minijinja::{Environment, Error as TemplateError, ErrorKind};
use minijinja::value::Value;
use rustc_hash::FxHashMap;

use crate::config::Config;
use crate::error::Result;
use crate::format::format_named;
use crate::url::encode_plus;

/// The version that tracks the development branch.
pub const DEV_VERSION: &str = "dev";

/// What [`DEV_VERSION`] resolves to.
pub const DEV_ALIAS: &str = "master";

pub const VERSION: &str = "version";
pub const RAW_URL_TPL: &str = "raw_url_tpl";

/// Older names for [`VERSION`] and [`RAW_URL_TPL`], exposed alongside them.
pub const LEGACY_VERSION: &str = "hermes_version";
pub const LEGACY_RAW_URL_TPL: &str = "github_raw_url_tpl";

pub const RAW_URL: &str = "raw_github_url";
pub const IMPORT_FILE: &str = "import_file";
pub const URLENCODE: &str = "urlencode";

/// How a helper is exposed to templates.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Helper {
    /// Callable: `{{ name(args) }}`.
    Macro,
    /// Pipeline stage: `{{ value | name }}`.
    Filter,
}

impl Helper {
    pub fn key(&self) -> &'static str {
        match self {
            Helper::Macro => "macros",
            Helper::Filter => "filters",
        }
    }
}

/// Resolves the configured version: [`DEV_VERSION`] becomes [`DEV_ALIAS`],
/// anything else is returned as-is.
pub fn resolve_version(version: &str) -> &str {
    match version {
        DEV_VERSION => DEV_ALIAS,
        version => version,
    }
}

/// The state behind the documentation helpers. Immutable once built.
#[derive(Debug)]
pub struct MacroEnv {
    docs_dir: PathBuf,
    version: Arc<str>,
    raw_url_tpl: Option<Arc<str>>,
    variables: FxHashMap<String, Value>,
}

impl MacroEnv {
    pub fn new(config: &Config) -> Self {
        let version: Arc<str> = resolve_version(&config.extra.version).into();

        let mut variables = FxHashMap::default();
        variables.insert("config".into(), Value::from_serialize(config));
        variables.insert("extra".into(), Value::from_serialize(&config.extra));
        for (key, value) in &config.extra.variables {
            variables.insert(key.clone(), Value::from_serialize(value));
        }

        if let Some(tpl) = &config.extra.raw_url_tpl {
            variables.insert(RAW_URL_TPL.into(), Value::from(tpl.as_str()));
            variables.insert(LEGACY_RAW_URL_TPL.into(), Value::from(tpl.as_str()));
        }

        variables.insert(VERSION.into(), Value::from(&*version));
        variables.insert(LEGACY_VERSION.into(), Value::from(&*version));
        tracing::debug!(%version, docs_dir = %config.docs_dir.display(), "macro environment ready");

        MacroEnv {
            docs_dir: config.docs_dir.clone(),
            raw_url_tpl: config.extra.raw_url_tpl.as_deref().map(Arc::from),
            version,
            variables,
        }
    }

    /// Every helper this environment registers, by kind and name.
    pub fn helpers() -> &'static [(Helper, &'static str)] {
        &[
            (Helper::Macro, RAW_URL),
            (Helper::Macro, IMPORT_FILE),
            (Helper::Filter, URLENCODE),
        ]
    }

    /// The resolved version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Template globals: `config`, `extra`, each `extra` key, the raw URL
    /// template and `version`, the last two also under their legacy names.
    pub fn variables(&self) -> &FxHashMap<String, Value> {
        &self.variables
    }

    /// Formats the raw URL template with the resolved version and `path`.
    ///
    /// Fails if no template is configured or if the template is malformed.
    pub fn raw_url(&self, path: &str) -> Result<String> {
        let tpl = self.raw_url_tpl.as_deref().ok_or_else(|| error! {
            "no raw URL template configured",
            "expected key" => "extra.raw_url_tpl",
        })?;

        format_named(tpl, &[(VERSION, self.version()), ("path", path)])
    }

    /// Returns the contents of `path`, relative to the docs directory.
    ///
    /// Filesystem errors are returned unmodified.
    pub fn import_file(&self, path: &str) -> io::Result<String> {
        let path = self.docs_dir.join(path);
        tracing::trace!(path = %path.display(), "importing file");
        fs::read_to_string(path)
    }

    /// Installs the variables, macros and filters into `env`.
    pub fn register(self: &Arc<Self>, env: &mut Environment<'static>) {
        for (name, value) in &self.variables {
            env.add_global(name.clone(), value.clone());
        }

        for &(kind, name) in Self::helpers() {
            tracing::trace!(kind = kind.key(), name, "registering helper");
            match name {
                RAW_URL => {
                    let this = self.clone();
                    env.add_function(name, move |path: String| {
                        this.raw_url(&path).map_err(|e| {
                            TemplateError::new(ErrorKind::InvalidOperation, e.to_string())
                        })
                    });
                }
                IMPORT_FILE => {
                    let this = self.clone();
                    env.add_function(name, move |path: String| {
                        this.import_file(&path).map_err(|e| {
                            let msg = format!("failed to import `{path}`: {e}");
                            TemplateError::new(ErrorKind::InvalidOperation, msg).with_source(e)
                        })
                    });
                }
                URLENCODE => env.add_filter(name, urlencode),
                _ => unreachable!("unhandled helper {name}"),
            }
        }
    }
}

fn urlencode(value: &str) -> String {
    encode_plus(value)
}
