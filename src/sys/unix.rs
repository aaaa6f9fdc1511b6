use std::ffi::{CStr, CString};
use std::fs::{self, Permissions};
use std::io;
use std::mem::MaybeUninit;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

/// Kernel name as reported by `uname(2)`, e.g. `Linux` or `Darwin`.
///
/// Falls back to the compile-time target name if the call fails.
pub(crate) fn kernel_name() -> String {
    let mut uts = MaybeUninit::<libc::utsname>::zeroed();
    if unsafe { libc::uname(uts.as_mut_ptr()) } < 0 {
        tracing::debug!(
            error = %io::Error::last_os_error(),
            "uname failed, using target os name"
        );
        return std::env::consts::OS.to_owned();
    }
    let uts = unsafe { uts.assume_init() };
    let sysname = unsafe { CStr::from_ptr(uts.sysname.as_ptr()) };
    sysname.to_string_lossy().into_owned()
}

/// Regular file that the effective user may execute.
pub(crate) fn is_executable(path: &Path) -> bool {
    path.is_file() && access(path, libc::X_OK)
}

/// Directory or file the effective user may write to.
pub(crate) fn is_writable(path: &Path) -> bool {
    access(path, libc::W_OK)
}

pub(crate) fn set_mode(path: &Path, mode: u32) -> io::Result<()> {
    fs::set_permissions(path, Permissions::from_mode(mode))
}

fn access(path: &Path, mode: libc::c_int) -> bool {
    let Ok(cpath) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    unsafe { libc::access(cpath.as_ptr(), mode) == 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn kernel_name_is_not_empty() {
        let name = kernel_name();
        assert!(!name.is_empty());
        #[cfg(target_os = "linux")]
        assert_eq!(name, "Linux");
    }

    #[test]
    fn execute_bit_decides_executability() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("daemon");
        let mut f = fs::File::create(&path).unwrap();
        writeln!(f, "#!/bin/sh").unwrap();

        set_mode(&path, 0o644).unwrap();
        assert!(!is_executable(&path));

        set_mode(&path, 0o755).unwrap();
        assert!(is_executable(&path));
    }

    #[test]
    fn directories_are_never_executables() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_executable(dir.path()));
        assert!(is_writable(dir.path()));
    }

    #[test]
    fn interior_nul_is_not_accessible() {
        assert!(!is_writable(Path::new("/tmp/bad\0path")));
    }
}
