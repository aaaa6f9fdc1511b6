use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::config::{ForgeConfig, PropertySource};
use crate::error::{ForgeError, ForgeResult};
use crate::os;
use crate::sys;
use crate::template::InitStyle;
use crate::types::{DaemonProperties, OsIdentity};

/// Forges and installs init scripts for one host identity.
///
/// The identity is passed in explicitly; [`InitScriptForge::detect`] uses the
/// cached host identity.
pub struct InitScriptForge {
    pub(crate) identity: OsIdentity,
    pub(crate) config: ForgeConfig,
    pub(crate) source: Option<Box<dyn PropertySource>>,
}

impl fmt::Debug for InitScriptForge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InitScriptForge")
            .field("identity", &self.identity)
            .field("config", &self.config)
            .field("source", &if self.source.is_some() { "Some(PropertySource)" } else { "None" })
            .finish()
    }
}

impl InitScriptForge {
    /// Creates a forge for `identity` with default locations.
    pub fn new(identity: OsIdentity) -> Self {
        InitScriptForge {
            identity,
            config: ForgeConfig::new(),
            source: None,
        }
    }

    /// Creates a forge for the running host.
    ///
    /// When `config` re-roots marker lookups, the host is probed under that
    /// root instead of using the process-wide cache.
    pub fn detect(config: ForgeConfig) -> Self {
        let identity = if config.root == PathBuf::from("/") {
            os::identify().clone()
        } else {
            os::probe(&sys::kernel_name(), &config.root)
        };
        InitScriptForge {
            identity,
            config,
            source: None,
        }
    }

    // --- Builder Methods ---

    /// Replaces the location configuration.
    pub fn config(mut self, config: ForgeConfig) -> Self { self.config = config; self }

    /// Sets where properties come from when a call passes none.
    pub fn property_source<S: PropertySource + 'static>(mut self, source: S) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // --- Public Getters ---

    pub fn identity(&self) -> &OsIdentity { &self.identity }
    pub fn forge_config(&self) -> &ForgeConfig { &self.config }

    /// Init script path for `props` on this distribution.
    pub fn location(&self, props: &DaemonProperties) -> ForgeResult<PathBuf> {
        let style = InitStyle::require(&self.identity).inspect_err(ForgeError::report)?;
        let dir = self
            .config
            .init_dir
            .clone()
            .or_else(|| style.default_init_dir())
            .ok_or_else(|| self.unsupported())
            .inspect_err(ForgeError::report)?;
        Ok(dir.join(props.app_name()))
    }

    /// Produces the init script body for `props`, or for the ambient
    /// properties when `props` is `None`.
    pub fn forge(&self, props: Option<&DaemonProperties>) -> ForgeResult<String> {
        let props = self.resolve_properties(props)?;
        self.forge_body(&props).inspect_err(ForgeError::report)
    }

    pub(crate) fn resolve_properties(
        &self,
        props: Option<&DaemonProperties>,
    ) -> ForgeResult<DaemonProperties> {
        props
            .cloned()
            .or_else(|| self.source.as_ref().and_then(|s| s.daemon_properties()))
            .ok_or(ForgeError::NoProperties)
            .inspect_err(ForgeError::report)
    }

    fn forge_body(&self, props: &DaemonProperties) -> ForgeResult<String> {
        let daemon_path = props.daemon_path();
        if !daemon_path.exists() {
            return Err(ForgeError::MissingExecutable { path: daemon_path });
        }
        if !sys::is_executable(&daemon_path) {
            return Err(ForgeError::NotExecutable { path: daemon_path });
        }

        let mut empty = props
            .missing_text_fields()
            .into_iter()
            .map(|property| ForgeError::EmptyProperty { property });
        if let Some(first) = empty.next() {
            for other in empty {
                other.report();
            }
            return Err(first);
        }

        let style = InitStyle::require(&self.identity)?;
        let skeleton_path = self
            .config
            .skeleton
            .clone()
            .or_else(|| style.default_skeleton())
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| ForgeError::SkeletonUnset {
                distribution: self.identity.distribution().to_owned(),
            })?;
        if !skeleton_path.is_file() {
            return Err(ForgeError::SkeletonMissing {
                distribution: self.identity.distribution().to_owned(),
                path: skeleton_path,
            });
        }
        let skeleton = fs::read_to_string(&skeleton_path).map_err(|source| {
            ForgeError::SkeletonUnreadable { path: skeleton_path.clone(), source }
        })?;
        tracing::debug!(skeleton = %skeleton_path.display(), "skeleton loaded");

        let replacements = style.replacements(props, &daemon_path);
        Ok(replacements.apply(&skeleton))
    }

    fn unsupported(&self) -> ForgeError {
        ForgeError::UnsupportedPlatform {
            family: self.identity.family(),
            distribution: self.identity.distribution().to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::types::OsFamily;

    fn debian() -> OsIdentity { OsIdentity::new(OsFamily::Linux, "Debian", "12.5") }

    fn props() -> DaemonProperties {
        DaemonProperties::builder()
            .app_name("mydaemon")
            .app_dir("/nonexistent/dir")
            .app_executable("mydaemon")
            .build()
            .unwrap()
    }

    #[test]
    fn location_uses_distribution_default() {
        let forge = InitScriptForge::new(debian());
        assert_eq!(forge.location(&props()).unwrap(), PathBuf::from("/etc/init.d/mydaemon"));
    }

    #[test]
    fn location_honours_init_dir_override() {
        let forge =
            InitScriptForge::new(debian()).config(ForgeConfig::new().init_dir("/srv/init.d"));
        assert_eq!(forge.location(&props()).unwrap(), PathBuf::from("/srv/init.d/mydaemon"));
    }

    #[test]
    fn location_is_gated_on_distribution() {
        let forge = InitScriptForge::new(OsIdentity::new(OsFamily::Linux, "SuSE", "15"));
        let err = forge.location(&props()).unwrap_err();
        assert_eq!(err.kind(), FailureKind::UnsupportedPlatform);
    }

    #[test]
    fn forge_without_any_properties_fails() {
        let err = InitScriptForge::new(debian()).forge(None).unwrap_err();
        assert!(matches!(err, ForgeError::NoProperties));
        assert_eq!(err.kind(), FailureKind::InvalidProperties);
    }

    #[test]
    fn ambient_source_is_consulted() {
        let forge = InitScriptForge::new(debian()).property_source(props());
        let err = forge.forge(None).unwrap_err();
        assert_eq!(err.kind(), FailureKind::MissingExecutable);
    }

    #[test]
    fn detect_under_custom_root_probes_markers() {
        let root = tempfile::tempdir().unwrap();
        let forge = InitScriptForge::detect(ForgeConfig::new().root(root.path()));
        if cfg!(target_os = "linux") {
            assert_eq!(forge.identity().family(), OsFamily::Linux);
            assert_eq!(forge.identity().distribution(), "");
        }
    }
}
