use std::path::{Path, PathBuf};

use crate::error::{ForgeError, ForgeResult};
use crate::types::{DaemonProperties, OsIdentity};

/// Init script flavour for a distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitStyle {
    /// Debian and Ubuntu: LSB headers, `/etc/init.d/skeleton`.
    DebianFamily,
    /// Anything without a skeleton strategy.
    Unsupported,
}

impl InitStyle {
    /// Picks the strategy for an identity. Distribution names compare
    /// case-insensitively.
    pub fn for_identity(identity: &OsIdentity) -> Self {
        match identity.distribution().to_ascii_lowercase().as_str() {
            "debian" | "ubuntu" => InitStyle::DebianFamily,
            _ => InitStyle::Unsupported,
        }
    }

    /// Same as [`InitStyle::for_identity`] but turns `Unsupported` into an error.
    pub fn require(identity: &OsIdentity) -> ForgeResult<Self> {
        match Self::for_identity(identity) {
            InitStyle::Unsupported => Err(ForgeError::UnsupportedPlatform {
                family: identity.family(),
                distribution: identity.distribution().to_owned(),
            }),
            style => Ok(style),
        }
    }

    /// Where the distribution keeps its skeleton, if it has one.
    pub fn default_skeleton(&self) -> Option<PathBuf> {
        match self {
            InitStyle::DebianFamily => Some(PathBuf::from("/etc/init.d/skeleton")),
            InitStyle::Unsupported => None,
        }
    }

    /// Directory the service manager reads init scripts from.
    pub fn default_init_dir(&self) -> Option<PathBuf> {
        match self {
            InitStyle::DebianFamily => Some(PathBuf::from("/etc/init.d")),
            InitStyle::Unsupported => None,
        }
    }

    /// Placeholder table for this flavour's skeleton.
    pub fn replacements(&self, props: &DaemonProperties, daemon_path: &Path) -> Replacements {
        let mut table = Replacements::new();
        if let InitStyle::DebianFamily = self {
            let path = daemon_path.to_string_lossy();
            table
                .push("Foo Bar", props.author_name())
                .push("foobar@baz.org", props.author_email())
                .push("daemonexecutablename", props.app_name())
                .push("Example", props.app_name())
                .push("skeleton", props.app_name())
                .push("/usr/sbin/$NAME", &path)
                .push("Description of the service", props.app_description())
                .push(" --name $NAME", "")
                .push("--options args", "")
                .push("# Please remove the \"Author\" lines above and replace them", "")
                .push("# with your own name if you copy and modify this script.", "");
        }
        table
    }
}

/// Ordered list of literal `(pattern, replacement)` pairs.
///
/// Order is significant: pairs are applied one after another, and text
/// produced by an earlier pair is never matched by a later one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Replacements {
    pairs: Vec<(String, String)>,
}

impl Replacements {
    pub fn new() -> Self { Self::default() }

    /// Appends a pair. Empty patterns are ignored.
    pub fn push(&mut self, pattern: &str, replacement: &str) -> &mut Self {
        if !pattern.is_empty() {
            self.pairs.push((pattern.to_owned(), replacement.to_owned()));
        }
        self
    }

    pub fn len(&self) -> usize { self.pairs.len() }
    pub fn is_empty(&self) -> bool { self.pairs.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(p, r)| (p.as_str(), r.as_str()))
    }

    /// Applies every pair to `template`.
    pub fn apply(&self, template: &str) -> String {
        // Each segment is either untouched template text (`true`) or an
        // inserted replacement (`false`); only the former is searched.
        let mut segments: Vec<(String, bool)> = vec![(template.to_owned(), true)];

        for (pattern, replacement) in &self.pairs {
            let mut next = Vec::with_capacity(segments.len());
            for (text, original) in segments {
                if !original || !text.contains(pattern.as_str()) {
                    next.push((text, original));
                    continue;
                }
                let mut pieces = text.split(pattern.as_str()).peekable();
                while let Some(piece) = pieces.next() {
                    if !piece.is_empty() {
                        next.push((piece.to_owned(), true));
                    }
                    if pieces.peek().is_some() && !replacement.is_empty() {
                        next.push((replacement.clone(), false));
                    }
                }
            }
            segments = next;
        }

        segments.into_iter().map(|(text, _)| text).collect()
    }
}
