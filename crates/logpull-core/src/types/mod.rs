//! Type-safe wrappers for extraction paths.
//!
//! Entry names read from an archive only reach the filesystem as a
//! [`SafePath`] joined onto a [`DestDir`]; there is no conversion from a raw
//! `PathBuf` into either type.

pub mod dest_dir;
pub mod safe_path;

pub use dest_dir::DestDir;
pub use safe_path::Rejection;
pub use safe_path::SafePath;
