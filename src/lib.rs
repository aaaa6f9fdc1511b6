//! # initd_forge
//!
//! **initd_forge** identifies the host operating system and forges a SysV
//! `init.d` startup script for a daemon from the distribution's own skeleton.
//!
//! Only the Debian family (Debian, Ubuntu) has a skeleton strategy. Every other
//! platform fails with [`FailureKind::UnsupportedPlatform`] instead of writing
//! anything.
//!
//! ```no_run
//! use initd_forge::{DaemonProperties, ForgeConfig, InitScriptForge};
//!
//! let props = DaemonProperties::builder()
//!     .app_name("logparser")
//!     .app_description("Parses logs in the background")
//!     .author_name("Jane Doe")
//!     .author_email("jane@example.com")
//!     .app_dir("/opt/logparser")
//!     .app_executable("logparser")
//!     .build()?;
//!
//! let forge = InitScriptForge::detect(ForgeConfig::from_env());
//! let path = forge.write(Some(&props), false)?;
//! println!("installed {}", path.display());
//! # Ok::<(), initd_forge::ForgeError>(())
//! ```
//!
//! Failures are logged through `tracing` and returned; nothing is printed.

mod config;
mod error;
mod forge;
mod os;
mod sys;
mod template;
mod types;
mod writer;

// Re-export public types to keep the API flat
pub use config::{
    ENV_INIT_DIR, ENV_ROOT, ENV_SKELETON, EnvPropertySource, ForgeConfig, PropertySource,
};
pub use error::{FailureKind, ForgeError, ForgeResult, Severity};
pub use forge::InitScriptForge;
pub use os::{identify, probe, MARKER_FILES};
pub use template::{InitStyle, Replacements};
pub use types::{DaemonProperties, DaemonPropertiesBuilder, OsFamily, OsIdentity};
pub use writer::INIT_SCRIPT_MODE;
