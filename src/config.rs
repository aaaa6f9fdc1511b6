use std::path::PathBuf;

use crate::types::DaemonProperties;

/// Environment variable overriding the skeleton location. Empty means unset.
pub const ENV_SKELETON: &str = "INITD_FORGE_SKELETON";
/// Environment variable overriding the init script directory.
pub const ENV_INIT_DIR: &str = "INITD_FORGE_INIT_DIR";
/// Environment variable re-rooting marker file lookups.
pub const ENV_ROOT: &str = "INITD_FORGE_ROOT";

/// Filesystem locations used when forging and writing.
///
/// Unset locations fall back to the defaults of the detected distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForgeConfig {
    pub(crate) skeleton: Option<PathBuf>,
    pub(crate) init_dir: Option<PathBuf>,
    pub(crate) root: PathBuf,
}

impl Default for ForgeConfig {
    fn default() -> Self { Self::new() }
}

impl ForgeConfig {
    pub fn new() -> Self {
        ForgeConfig {
            skeleton: None,
            init_dir: None,
            root: PathBuf::from("/"),
        }
    }

    /// Reads overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads overrides through `lookup`, keyed by the `ENV_*` names.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();
        if let Some(skeleton) = lookup(ENV_SKELETON) {
            config.skeleton = Some(PathBuf::from(skeleton));
        }
        if let Some(dir) = lookup(ENV_INIT_DIR).filter(|d| !d.is_empty()) {
            config.init_dir = Some(PathBuf::from(dir));
        }
        if let Some(root) = lookup(ENV_ROOT).filter(|r| !r.is_empty()) {
            config.root = PathBuf::from(root);
        }
        config
    }

    // --- Builder Methods ---

    /// Uses `path` as the skeleton instead of the distribution default.
    /// An empty path marks the skeleton as unset.
    pub fn skeleton<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.skeleton = Some(path.into());
        self
    }

    /// Writes init scripts into `dir` instead of the distribution default.
    pub fn init_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.init_dir = Some(dir.into());
        self
    }

    /// Prefix for marker file lookups.
    pub fn root<P: Into<PathBuf>>(mut self, root: P) -> Self { self.root = root.into(); self }

    // --- Public Getters ---

    pub fn skeleton_override(&self) -> Option<&PathBuf> { self.skeleton.as_ref() }
    pub fn init_dir_override(&self) -> Option<&PathBuf> { self.init_dir.as_ref() }
    pub fn root_path(&self) -> &PathBuf { &self.root }
}

// =========================================================================
// Ambient property sources
// =========================================================================

/// Supplies daemon properties when the caller passes none.
pub trait PropertySource {
    fn daemon_properties(&self) -> Option<DaemonProperties>;
}

impl PropertySource for DaemonProperties {
    fn daemon_properties(&self) -> Option<DaemonProperties> { Some(self.clone()) }
}

impl<F> PropertySource for F
where
    F: Fn() -> Option<DaemonProperties>,
{
    fn daemon_properties(&self) -> Option<DaemonProperties> { self() }
}

/// Reads daemon properties from `DAEMON_*` environment variables.
///
/// Yields nothing unless `DAEMON_APP_NAME`, `DAEMON_APP_DIR` and
/// `DAEMON_APP_EXECUTABLE` are all set.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvPropertySource;

impl EnvPropertySource {
    pub(crate) fn collect<F>(lookup: F) -> Option<DaemonProperties>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).unwrap_or_default();
        DaemonProperties::builder()
            .app_name(&lookup("DAEMON_APP_NAME")?)
            .app_dir(lookup("DAEMON_APP_DIR")?)
            .app_executable(&lookup("DAEMON_APP_EXECUTABLE")?)
            .app_description(&get("DAEMON_APP_DESCRIPTION"))
            .author_name(&get("DAEMON_AUTHOR_NAME"))
            .author_email(&get("DAEMON_AUTHOR_EMAIL"))
            .build()
            .inspect_err(|e| {
                tracing::debug!(error = %e, "ignoring incomplete DAEMON_* environment")
            })
            .ok()
    }
}

impl PropertySource for EnvPropertySource {
    fn daemon_properties(&self) -> Option<DaemonProperties> {
        Self::collect(|key| std::env::var(key).ok())
    }
}
