//! Render conventional commits into a Markdown changelog, and split existing
//! changelogs back into their releases.
//!
//! ```
//! # use chlog::{Changelog, NoLookup, git::{Author, Commit}};
//! # futures::executor::block_on(async {
//! let commits = vec![
//!     Commit::new("fix", "handle empty input").author(Author::new("Jane Doe", "j@x.com")),
//! ];
//! let md = Changelog::new()
//!     .types([("fix", "Bug Fixes")])
//!     .render(&commits, &NoLookup)
//!     .await
//!     .unwrap();
//!
//! assert!(md.contains("### Bug Fixes\n\n- Handle empty input by Jane Doe"));
//! # });
//! ```

#[macro_use]
mod macros;
pub mod authors;
mod changelog;
pub mod config;
pub mod error;
pub mod fmt;
pub mod git;
pub mod gitmoji;
mod link_style;
pub mod lookup;
pub mod release;
mod sectionmap;

pub use changelog::{render, Changelog};
pub use link_style::LinkStyle;
pub use lookup::{IdentityLookup, NoLookup};
pub use release::{parse_releases, prepend_release, ReleaseSection};
pub use sectionmap::SectionMap;

// The default config file
const DEFAULT_CONFIG_FILE: &str = ".chlog.toml";
