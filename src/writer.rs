use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{ForgeError, ForgeResult};
use crate::forge::InitScriptForge;
use crate::sys;
use crate::types::DaemonProperties;

/// Mode given to every installed init script.
pub const INIT_SCRIPT_MODE: u32 = 0o777;

impl InitScriptForge {
    /// Forges the init script and installs it at [`InitScriptForge::location`].
    ///
    /// The body is staged in a temporary file next to the destination and
    /// renamed into place, so a failed write never leaves a partial script.
    /// Returns the path written.
    pub fn write(&self, props: Option<&DaemonProperties>, overwrite: bool) -> ForgeResult<PathBuf> {
        let props = self.resolve_properties(props)?;
        let location = self.location(&props)?;
        let body = self.forge(Some(&props))?;

        install(&location, &body, overwrite).inspect_err(ForgeError::report)?;

        tracing::info!(
            path = %location.display(),
            identity = %self.identity,
            "init script written"
        );
        Ok(location)
    }
}

fn install(location: &Path, body: &str, overwrite: bool) -> ForgeResult<()> {
    install_checked(location, body, overwrite, sys::is_writable)
}

/// `install` with the directory writability check supplied by the caller.
fn install_checked(
    location: &Path,
    body: &str,
    overwrite: bool,
    is_writable: fn(&Path) -> bool,
) -> ForgeResult<()> {
    // std::fs does not cache metadata, every check below hits the filesystem.
    if !overwrite && location.exists() {
        return Err(ForgeError::DestinationExists { path: location.to_path_buf() });
    }

    let dir = location.parent().map(PathBuf::from).unwrap_or_default();
    if !dir.is_dir() {
        return Err(ForgeError::DirectoryMissing { dir });
    }
    if !is_writable(&dir) {
        return Err(ForgeError::DirectoryNotWritable { dir });
    }

    let write_failed = |source: io::Error| ForgeError::WriteFailed {
        path: location.to_path_buf(),
        source,
    };

    let mut staged = tempfile::Builder::new()
        .prefix(".initd-forge-")
        .tempfile_in(&dir)
        .map_err(write_failed)?;
    staged.write_all(body.as_bytes()).map_err(write_failed)?;
    staged.as_file().sync_all().map_err(write_failed)?;

    sys::set_mode(staged.path(), INIT_SCRIPT_MODE).map_err(|source| {
        ForgeError::PermissionFailed { path: location.to_path_buf(), source }
    })?;

    let persisted = if overwrite {
        staged.persist(location)
    } else {
        staged.persist_noclobber(location)
    };
    match persisted {
        Ok(_) => Ok(()),
        Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
            Err(ForgeError::DestinationExists { path: location.to_path_buf() })
        }
        Err(e) => Err(write_failed(e.error)),
    }
}
