use std::path::PathBuf;

use figment::{Figment, Profile, Provider, Metadata, error::Result};
use figment::providers::{Serialized, Env, Toml, Format};
use figment::value::{Map, Dict};
use serde::{Deserialize, Serialize};
use yansi::Paint;

use crate::logger::LogLevel;

/// Quip configuration.
///
/// # Defaults
///
/// All configuration values have a default, documented in the
/// [fields](#fields) section below. [`Config::debug_default()`] returns the
/// default values for the debug profile while [`Config::release_default()`]
/// the default values for the release profile. The two differ only in
/// `log_level`, which is `normal` in `debug` and `critical` in `release`.
///
/// # Provider Details
///
/// `Config` is a Figment [`Provider`] with the following characteristics:
///
///   * **Profile**
///
///     The selected profile is the value of the `QUIP_PROFILE` environment
///     variable. If it is not set, the profile is `debug` in debug builds and
///     `release` in release builds.
///
///   * **Metadata**
///
///     This provider is named `Quip Config`.
///
///   * **Data**
///
///     The keys and values corresponding to the fields of the structure,
///     emitted to the "default" meta-profile.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Directory views are resolved against. Relative paths are relative to
    /// the current working directory. **(default: `views`)**
    pub views: PathBuf,
    /// Subdirectory of `views` partials are resolved against.
    /// **(default: `partials`)**
    pub partials: String,
    /// Name of the default layout, without extension. **(default: `layout`)**
    pub layout: String,
    /// Extension appended to views that have none. **(default: none)**
    pub view_engine: Option<String>,
    /// Max level to log. **(default: _debug_ `normal` / _release_ `critical`)**
    pub log_level: LogLevel,
    /// Whether to use colors when logging. **(default: `true`)**
    #[serde(deserialize_with = "figment::util::bool_from_str_or_int")]
    pub cli_colors: bool,
}

impl Default for Config {
    /// Returns the default configuration based on the compilation profile.
    /// This is [`Config::debug_default()`] in `debug` and
    /// [`Config::release_default()`] in `release`.
    fn default() -> Config {
        #[cfg(debug_assertions)] { Config::debug_default() }
        #[cfg(not(debug_assertions))] { Config::release_default() }
    }
}

impl Config {
    /// The default "debug" profile.
    pub const DEBUG_PROFILE: Profile = Profile::const_new("debug");

    /// The default "release" profile.
    pub const RELEASE_PROFILE: Profile = Profile::const_new("release");

    /// The default profile: "debug" on `debug`, "release" on `release`.
    #[cfg(debug_assertions)]
    pub const DEFAULT_PROFILE: Profile = Self::DEBUG_PROFILE;

    /// The default profile: "debug" on `debug`, "release" on `release`.
    #[cfg(not(debug_assertions))]
    pub const DEFAULT_PROFILE: Profile = Self::RELEASE_PROFILE;

    /// Returns the default configuration for the `debug` profile.
    pub fn debug_default() -> Config {
        Config {
            views: PathBuf::from("views"),
            partials: "partials".into(),
            layout: "layout".into(),
            view_engine: None,
            log_level: LogLevel::Normal,
            cli_colors: true,
        }
    }

    /// Returns the default configuration for the `release` profile.
    pub fn release_default() -> Config {
        Config {
            log_level: LogLevel::Critical,
            ..Config::debug_default()
        }
    }

    /// Returns the default provider figment.
    ///
    /// The default figment reads from the following sources, in ascending
    /// priority order:
    ///
    ///   1. [`Config::default()`] (see [Defaults](#defaults))
    ///   2. `Quip.toml` _or_ filename in `QUIP_CONFIG` environment variable
    ///   3. `QUIP_` prefixed environment variables
    ///
    /// # Example
    ///
    /// ```rust
    /// use quip::Config;
    ///
    /// let config: Config = Config::figment().extract().expect("config");
    /// ```
    pub fn figment() -> Figment {
        Figment::from(Config::default())
            .merge(Toml::file(Env::var_or("QUIP_CONFIG", "Quip.toml")).nested())
            .merge(Env::prefixed("QUIP_").ignore(&["PROFILE", "CONFIG"]).global())
    }

    /// Attempts to extract a `Config` from `provider`.
    pub fn try_from<T: Provider>(provider: T) -> Result<Self> {
        Figment::from(&provider).extract::<Self>()
    }

    /// Extracts a `Config` from `provider`.
    ///
    /// # Panics
    ///
    /// If extraction fails, prints an error message indicating the failure
    /// and panics.
    pub fn from<T: Provider>(provider: T) -> Self {
        Self::try_from(provider).unwrap_or_else(|e| {
            pretty_print_error(e);
            panic!("aborting due to configuration error(s)")
        })
    }

    /// Returns `views` made absolute against the current working directory.
    pub fn views_root(&self) -> PathBuf {
        if self.views.is_absolute() {
            return self.views.clone();
        }

        match std::env::current_dir() {
            Ok(cwd) => cwd.join(&self.views),
            Err(e) => {
                warn_!("Unable to read the working directory: {}", e);
                self.views.clone()
            }
        }
    }

    pub(crate) fn pretty_print(&self) {
        info!("Configured views.");
        info_!("views: {}", self.views_root().display().bold());
        info_!("partials: {}", self.partials.bold());
        info_!("layout: {}", self.layout.bold());
        let view_engine = self.view_engine.as_deref().unwrap_or("none");
        info_!("view engine: {}", view_engine.bold());
    }
}

impl Provider for Config {
    fn metadata(&self) -> Metadata {
        Metadata::named("Quip Config")
    }

    #[track_caller]
    fn data(&self) -> Result<Map<Profile, Dict>> {
        Serialized::defaults(self).data()
    }

    fn profile(&self) -> Option<Profile> {
        Some(Profile::from_env_or("QUIP_PROFILE", Self::DEFAULT_PROFILE))
    }
}

#[doc(hidden)]
pub fn pretty_print_error(error: figment::Error) {
    for e in error {
        error!("{}", e.kind);

        if let (Some(ref profile), Some(ref md)) = (&e.profile, &e.metadata) {
            if !e.path.is_empty() {
                let key = md.interpolate(profile, &e.path);
                info_!("for key {}", key.white());
            }
        }

        if let Some(md) = &e.metadata {
            if let Some(source) = &md.source {
                info_!("in {} {}", source.white(), md.name);
            } else {
                info_!("in {}", md.name.white());
            }
        }
    }
}
