//! Merging of timestamped log fragments into one file.

mod merger;
mod pattern;

pub use merger::merge_fragments;
pub use merger::merge_logcat;
pub use pattern::FragmentPattern;
pub use pattern::LOGCAT_FRAGMENT;
