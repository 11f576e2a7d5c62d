//! Normalized archive entry path.

use std::path::Path;
use std::path::PathBuf;

/// Why an archive entry name was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The name contains a `..` component.
    ParentTraversal,
    /// Nothing is left once root markers and `.` components are removed.
    Empty,
    /// The name contains a NUL byte.
    NullByte,
    /// The name has more components than allowed.
    TooDeep {
        /// Number of components found.
        depth: usize,
        /// Configured maximum.
        max: usize,
    },
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ParentTraversal => write!(f, "parent directory traversal"),
            Self::Empty => write!(f, "empty path"),
            Self::NullByte => write!(f, "null byte in path"),
            Self::TooDeep { depth, max } => write!(f, "path depth {depth} exceeds maximum {max}"),
        }
    }
}

/// A relative entry path that is safe to join onto a destination directory.
///
/// `SafePath` is built from the raw name stored in a zip entry. Both `/` and
/// `\` count as separators, leading root markers and drive prefixes are
/// stripped, and `.` components are dropped. Any `..` component rejects the
/// whole name, wherever it appears.
///
/// # Security Properties
///
/// - Can ONLY be constructed through [`SafePath::from_entry_name`]
/// - NO `From<PathBuf>` implementation
/// - Contains only normal components, so it never resolves outside the
///   directory it is joined onto
///
/// # Examples
///
/// ```
/// use logpull_core::types::SafePath;
///
/// let safe = SafePath::from_entry_name("/logs/logcat.dump.20160101000001.log", 32).unwrap();
/// assert_eq!(safe.as_path(), std::path::Path::new("logs/logcat.dump.20160101000001.log"));
///
/// assert!(SafePath::from_entry_name("../../etc/passwd", 32).is_err());
/// assert!(SafePath::from_entry_name("a\\..\\..\\evil", 32).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SafePath(PathBuf);

impl SafePath {
    /// Normalizes a stored entry name.
    ///
    /// # Errors
    ///
    /// Returns the [`Rejection`] reason when the name traverses upwards, is
    /// empty after normalization, contains a NUL byte, or is deeper than
    /// `max_depth` components.
    pub fn from_entry_name(name: &str, max_depth: usize) -> Result<Self, Rejection> {
        if name.contains('\0') {
            return Err(Rejection::NullByte);
        }

        let mut normalized = PathBuf::new();
        let mut depth = 0;

        for (index, component) in name.split(['/', '\\']).enumerate() {
            match component {
                "" | "." => {}
                ".." => return Err(Rejection::ParentTraversal),
                // Drive prefix such as `C:` at the start of the name
                drive if index == 0 && is_drive_prefix(drive) => {}
                normal => {
                    depth += 1;
                    normalized.push(normal);
                }
            }
        }

        if depth == 0 {
            return Err(Rejection::Empty);
        }

        if depth > max_depth {
            return Err(Rejection::TooDeep {
                depth,
                max: max_depth,
            });
        }

        Ok(Self(normalized))
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Converts into the inner `PathBuf`.
    #[inline]
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

fn is_drive_prefix(component: &str) -> bool {
    let bytes = component.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
