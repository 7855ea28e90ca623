//! Tag history sources
//!
//! The resolver never talks to version control itself. Callers obtain the
//! tag list through a [TagSource]:
//!
//! - [repository::Git2TagSource]: tags of a real repository via the `git2` crate
//! - [mock::InMemoryTags]: an explicit list, for `--tag` arguments and tests
//!
//! ```rust
//! # use release_version::git::{InMemoryTags, TagSource};
//! let source = InMemoryTags::new(["v1.0.0", "v1.0.1"]);
//! let tags = source.list_tags().unwrap();
//! assert_eq!(tags.len(), 2);
//! ```

pub mod mock;
pub mod repository;

pub use mock::InMemoryTags;
pub use repository::Git2TagSource;

use crate::error::Result;

/// Supplies the tag names known for a repository
///
/// ## Thread Safety
///
/// Implementors must be `Send + Sync` so a source can be shared across threads.
///
/// ## Error Handling
///
/// Implementations map their underlying failures (like `git2::Error`) to
/// [crate::error::ReleaseVersionError] variants.
pub trait TagSource: Send + Sync {
    /// All tag names, in no particular order
    fn list_tags(&self) -> Result<Vec<String>>;
}
