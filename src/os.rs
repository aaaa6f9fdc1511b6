use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::sys;
use crate::types::{OsFamily, OsIdentity};

/// Distribution marker files, most specific first.
///
/// Ubuntu also ships `/etc/debian_version`, so it has to be probed before
/// Debian. The first marker found wins.
pub const MARKER_FILES: &[(&str, &str)] = &[
    ("Mandrake", "/etc/mandrake-release"),
    ("SuSE", "/etc/SuSE-release"),
    ("RedHat", "/etc/redhat-release"),
    ("Ubuntu", "/etc/lsb-release"),
    ("Debian", "/etc/debian_version"),
];

static IDENTITY: OnceLock<OsIdentity> = OnceLock::new();

/// Identifies the running host.
///
/// Computed on first use and cached for the life of the process. Never
/// fails: an unrecognized platform yields [`OsIdentity::unknown`].
pub fn identify() -> &'static OsIdentity {
    IDENTITY.get_or_init(|| {
        let identity = probe(&sys::kernel_name(), Path::new("/"));
        tracing::debug!(%identity, "host operating system identified");
        identity
    })
}

/// Classifies `kernel` and, on Linux, resolves the distribution from the
/// marker files found under `root`.
pub fn probe(kernel: &str, root: &Path) -> OsIdentity {
    let lower = kernel.to_ascii_lowercase();

    if lower.starts_with("win") {
        OsIdentity::new(OsFamily::Windows, kernel, "")
    } else if lower.contains("darwin") {
        OsIdentity::new(OsFamily::Bsd, "Mac OSX", "")
    } else if lower.contains("linux") {
        match linux_distribution(root) {
            Some((distro, version)) => OsIdentity::new(OsFamily::Linux, distro, &version),
            None => {
                tracing::debug!(root = %root.display(), "no distribution marker file found");
                OsIdentity::new(OsFamily::Linux, "", "")
            }
        }
    } else {
        tracing::debug!(kernel, "unrecognized kernel");
        OsIdentity::unknown()
    }
}

fn linux_distribution(root: &Path) -> Option<(&'static str, String)> {
    MARKER_FILES.iter().find_map(|&(distro, marker)| {
        let path = rooted(root, marker);
        if !path.exists() {
            return None;
        }
        // An unreadable marker still identifies the distribution.
        let version = fs::read(&path)
            .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_owned())
            .unwrap_or_default();
        Some((distro, version))
    })
}

/// Re-anchors an absolute path below `root`.
pub(crate) fn rooted(root: &Path, path: &str) -> PathBuf {
    root.join(path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_markers(markers: &[(&str, &str)]) -> tempfile::TempDir {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("etc")).unwrap();
        for (marker, contents) in markers {
            fs::write(rooted(root.path(), marker), contents).unwrap();
        }
        root
    }

    #[test]
    fn windows_keeps_raw_kernel_name() {
        let id = probe("WINNT", Path::new("/nonexistent"));
        assert_eq!(id.family(), OsFamily::Windows);
        assert_eq!(id.distribution(), "WINNT");
        assert_eq!(id.version(), "");

        let id = probe("Windows_NT", Path::new("/nonexistent"));
        assert_eq!(id.family(), OsFamily::Windows);
    }

    #[test]
    fn darwin_is_mac_osx() {
        let id = probe("Darwin", Path::new("/nonexistent"));
        assert_eq!(id.family(), OsFamily::Bsd);
        assert_eq!(id.distribution(), "Mac OSX");
        assert_eq!(id.version(), "");
    }

    #[test]
    fn each_marker_is_recognized() {
        for &(distro, marker) in MARKER_FILES {
            let root = with_markers(&[(marker, " 1.2.3\n")]);
            let id = probe("Linux", root.path());
            assert_eq!(id.family(), OsFamily::Linux);
            assert_eq!(id.distribution(), distro);
            assert_eq!(id.version(), "1.2.3");
        }
    }

    #[test]
    fn derivative_wins_over_base() {
        let root = with_markers(&[
            ("/etc/debian_version", "trixie/sid\n"),
            ("/etc/lsb-release", "DISTRIB_ID=Ubuntu\n"),
        ]);
        let id = probe("Linux", root.path());
        assert_eq!(id.distribution(), "Ubuntu");
        assert_eq!(id.version(), "DISTRIB_ID=Ubuntu");
    }

    #[test]
    fn first_match_wins_across_the_whole_table() {
        let root = with_markers(&[
            ("/etc/redhat-release", "Fedora release 40"),
            ("/etc/lsb-release", "x"),
            ("/etc/debian_version", "y"),
        ]);
        assert_eq!(probe("Linux", root.path()).distribution(), "RedHat");
    }

    #[test]
    fn non_utf8_marker_keeps_its_version() {
        let root = with_markers(&[]);
        fs::write(rooted(root.path(), "/etc/debian_version"), b"12.5 \xff\n").unwrap();
        let id = probe("Linux", root.path());
        assert_eq!(id.distribution(), "Debian");
        assert_eq!(id.version(), "12.5 \u{fffd}");
    }

    #[test]
    fn linux_without_markers_has_no_distribution() {
        let root = with_markers(&[]);
        let id = probe("Linux", root.path());
        assert_eq!(id.family(), OsFamily::Linux);
        assert_eq!(id.distribution(), "");
    }

    #[test]
    fn unknown_kernel_is_the_sentinel() {
        let id = probe("SunOS", Path::new("/"));
        assert!(id.is_unknown());
        assert_eq!(id, OsIdentity::unknown());
    }

    #[test]
    fn identify_is_cached() {
        let first = identify();
        let second = identify();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first, second);
    }
}
