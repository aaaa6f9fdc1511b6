use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::OsFamily;

/// Custom error type for init script forging.
/// Every variant names the path, property or distribution that caused it.
#[derive(Debug, Error)]
pub enum ForgeError {
    /// The OS family or distribution has no init script strategy.
    #[error("init scripts for {family} distribution '{distribution}' are currently not supported")]
    UnsupportedPlatform { family: OsFamily, distribution: String },
    /// Neither the caller nor the ambient property source provided daemon properties.
    #[error("no daemon properties to forge an init script from")]
    NoProperties,
    /// A required builder field was never set.
    #[error("daemon property '{0}' is required")]
    MissingProperty(&'static str),
    /// The daemon name cannot be used as a file name.
    #[error("daemon name '{0}' must not contain a path separator")]
    InvalidAppName(String),
    /// `appDir/appExecutable` does not exist.
    #[error(
        "daemon executable '{}' does not exist, try setting a valid app_dir or app_executable",
        path.display()
    )]
    MissingExecutable { path: PathBuf },
    /// `appDir/appExecutable` exists but cannot be executed.
    #[error("daemon executable '{}' needs to be executable first", path.display())]
    NotExecutable { path: PathBuf },
    /// A textual property required by the script header is empty.
    #[error("daemon property '{property}' must not be empty")]
    EmptyProperty { property: &'static str },
    /// No skeleton location is configured for the distribution.
    #[error("no skeleton file configured for distribution '{distribution}'")]
    SkeletonUnset { distribution: String },
    /// The skeleton location is configured but the file is absent.
    #[error("skeleton file for distribution '{distribution}' not found at '{}'", path.display())]
    SkeletonMissing { distribution: String, path: PathBuf },
    /// The skeleton exists but could not be read.
    #[error("skeleton file '{}' could not be read", path.display())]
    SkeletonUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The init script is already present and overwriting was not requested.
    #[error("init script '{}' already exists", path.display())]
    DestinationExists { path: PathBuf },
    /// The init script directory does not exist.
    #[error(
        "init script directory '{}' does not exist, can this be a correct path?",
        dir.display()
    )]
    DirectoryMissing { dir: PathBuf },
    /// The init script directory exists but is read-only for this process.
    #[error(
        "init script directory '{}' cannot be written to, check the permissions",
        dir.display()
    )]
    DirectoryNotWritable { dir: PathBuf },
    /// Writing the script body failed.
    #[error("init script '{}' cannot be written", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Setting the executable bits failed.
    #[error("init script '{}' cannot be chmodded, check the permissions", path.display())]
    PermissionFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Flat failure taxonomy, one tag per class of problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    UnsupportedPlatform,
    MissingExecutable,
    NotExecutable,
    InvalidProperties,
    TemplateUnavailable,
    DestinationExists,
    DestinationUnwritable,
    IoFailure,
}

/// How loudly a failure should be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// The script could not be forged at all.
    Critical,
    /// The script was forged but could not be installed.
    Error,
}

impl ForgeError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ForgeError::UnsupportedPlatform { .. } => FailureKind::UnsupportedPlatform,
            ForgeError::MissingExecutable { .. } => FailureKind::MissingExecutable,
            ForgeError::NotExecutable { .. } => FailureKind::NotExecutable,
            ForgeError::NoProperties
            | ForgeError::MissingProperty(_)
            | ForgeError::InvalidAppName(_)
            | ForgeError::EmptyProperty { .. } => FailureKind::InvalidProperties,
            ForgeError::SkeletonUnset { .. }
            | ForgeError::SkeletonMissing { .. }
            | ForgeError::SkeletonUnreadable { .. } => FailureKind::TemplateUnavailable,
            ForgeError::DestinationExists { .. } => FailureKind::DestinationExists,
            ForgeError::DirectoryMissing { .. } | ForgeError::DirectoryNotWritable { .. } => {
                FailureKind::DestinationUnwritable
            }
            ForgeError::WriteFailed { .. } | ForgeError::PermissionFailed { .. } => {
                FailureKind::IoFailure
            }
        }
    }

    pub fn severity(&self) -> Severity {
        match self.kind() {
            FailureKind::DestinationExists
            | FailureKind::DestinationUnwritable
            | FailureKind::IoFailure => Severity::Error,
            _ => Severity::Critical,
        }
    }

    /// Hands the failure to the installed `tracing` subscriber.
    pub fn report(&self) {
        match self.severity() {
            Severity::Critical => tracing::error!(kind = ?self.kind(), "{}", self),
            Severity::Error => tracing::warn!(kind = ?self.kind(), "{}", self),
        }
    }
}

/// A specialized Result type for init script operations.
pub type ForgeResult<T> = Result<T, ForgeError>;
