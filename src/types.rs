use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{ForgeError, ForgeResult};

// =========================================================================
// OS Identity
// =========================================================================

/// Broad operating system family, decided from the kernel name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsFamily {
    Windows,
    Bsd,
    Linux,
    Unknown,
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OsFamily::Windows => "Windows",
            OsFamily::Bsd => "BSD",
            OsFamily::Linux => "Linux",
            OsFamily::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// The `(family, distribution, version)` triple of the host.
///
/// An `Unknown` family always carries an empty distribution and version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsIdentity {
    family: OsFamily,
    distribution: String,
    version: String,
}

impl OsIdentity {
    /// Builds an identity from its parts.
    pub fn new(family: OsFamily, distribution: &str, version: &str) -> Self {
        if family == OsFamily::Unknown {
            return Self::unknown();
        }
        OsIdentity {
            family,
            distribution: distribution.to_owned(),
            version: version.to_owned(),
        }
    }

    /// The sentinel for an unrecognized platform.
    pub fn unknown() -> Self {
        OsIdentity {
            family: OsFamily::Unknown,
            distribution: String::new(),
            version: String::new(),
        }
    }

    pub fn family(&self) -> OsFamily { self.family }
    pub fn distribution(&self) -> &str { &self.distribution }
    pub fn version(&self) -> &str { &self.version }

    pub fn is_unknown(&self) -> bool { self.family == OsFamily::Unknown }
}

impl fmt::Display for OsIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.family)?;
        if !self.distribution.is_empty() {
            write!(f, " / {}", self.distribution)?;
        }
        if !self.version.is_empty() {
            write!(f, " {}", self.version)?;
        }
        Ok(())
    }
}

// =========================================================================
// Daemon Properties
// =========================================================================

/// Describes the daemon an init script is forged for.
///
/// Name, directory and executable are checked when the record is built.
/// The textual header fields may be empty here; forging rejects them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonProperties {
    app_name: String,
    app_description: String,
    author_name: String,
    author_email: String,
    app_dir: PathBuf,
    app_executable: String,
}

impl DaemonProperties {
    /// Starts an empty builder.
    pub fn builder() -> DaemonPropertiesBuilder { DaemonPropertiesBuilder::default() }

    pub fn app_name(&self) -> &str { &self.app_name }
    pub fn app_description(&self) -> &str { &self.app_description }
    pub fn author_name(&self) -> &str { &self.author_name }
    pub fn author_email(&self) -> &str { &self.author_email }
    pub fn app_dir(&self) -> &Path { &self.app_dir }
    pub fn app_executable(&self) -> &str { &self.app_executable }

    /// Absolute location of the daemon binary: `app_dir/app_executable`.
    pub fn daemon_path(&self) -> PathBuf { self.app_dir.join(&self.app_executable) }

    /// Names of the header fields that are empty, each checked on its own.
    /// Whitespace-only values count as present.
    pub fn missing_text_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.author_name.is_empty() {
            missing.push("author_name");
        }
        if self.author_email.is_empty() {
            missing.push("author_email");
        }
        if self.app_description.is_empty() {
            missing.push("app_description");
        }
        missing
    }
}

/// Builder for [`DaemonProperties`].
#[derive(Debug, Clone, Default)]
pub struct DaemonPropertiesBuilder {
    app_name: Option<String>,
    app_description: String,
    author_name: String,
    author_email: String,
    app_dir: Option<PathBuf>,
    app_executable: Option<String>,
}

impl DaemonPropertiesBuilder {
    /// Sets the daemon name. Also used as the init script file name.
    pub fn app_name(mut self, name: &str) -> Self { self.app_name = Some(name.to_owned()); self }

    /// Sets the one-line service description.
    pub fn app_description(mut self, desc: &str) -> Self {
        self.app_description = desc.to_owned();
        self
    }

    pub fn author_name(mut self, name: &str) -> Self { self.author_name = name.to_owned(); self }
    pub fn author_email(mut self, email: &str) -> Self {
        self.author_email = email.to_owned();
        self
    }

    /// Sets the directory that holds the daemon binary.
    pub fn app_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.app_dir = Some(dir.into());
        self
    }

    /// Sets the binary's file name inside `app_dir`.
    pub fn app_executable(mut self, exe: &str) -> Self {
        self.app_executable = Some(exe.to_owned());
        self
    }

    /// Validates that every structural field is present.
    pub fn build(self) -> ForgeResult<DaemonProperties> {
        let app_name = self
            .app_name
            .filter(|n| !n.trim().is_empty())
            .ok_or(ForgeError::MissingProperty("app_name"))?;
        if app_name.contains('/') {
            return Err(ForgeError::InvalidAppName(app_name));
        }
        let app_dir = self.app_dir.ok_or(ForgeError::MissingProperty("app_dir"))?;
        let app_executable = self
            .app_executable
            .filter(|e| !e.is_empty())
            .ok_or(ForgeError::MissingProperty("app_executable"))?;

        Ok(DaemonProperties {
            app_name,
            app_description: self.app_description,
            author_name: self.author_name,
            author_email: self.author_email,
            app_dir,
            app_executable,
        })
    }
}
