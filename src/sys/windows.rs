use std::fs;
use std::io;
use std::path::Path;

const EXECUTABLE_EXTENSIONS: &[&str] = &["exe", "bat", "cmd", "com"];

/// Windows exposes no `uname`; mirror what scripting runtimes report.
pub(crate) fn kernel_name() -> String {
    std::env::var("OS").unwrap_or_else(|_| "WINNT".to_owned())
}

pub(crate) fn is_executable(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| EXECUTABLE_EXTENSIONS.iter().any(|x| x.eq_ignore_ascii_case(e)))
            .unwrap_or(false)
}

pub(crate) fn is_writable(path: &Path) -> bool {
    fs::metadata(path).map(|m| !m.permissions().readonly()).unwrap_or(false)
}

/// Only the read-only flag exists here; any write bit clears it.
pub(crate) fn set_mode(path: &Path, mode: u32) -> io::Result<()> {
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_readonly(mode & 0o222 == 0);
    fs::set_permissions(path, perms)
}
