//! Path handling for the traversal root.
//!
//! The root is normalized once before the walk:
//! - `~` and `~/path` expand to the home directory
//! - relative paths become absolute against the current directory
//! - `.` and `..` are resolved lexically
//!
//! The walker's visited set is keyed by paths built from this normalized
//! root, so two spellings of the same root cannot produce two walks.

pub mod normalize;

pub use normalize::{expand_tilde, normalize, resolve_components};
