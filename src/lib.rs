//! Sake: tasks as code.
//!
//! Finds a project's `Sakefile.swift`, links it against the task-description
//! library, and compiles-and-runs it with the caller's arguments.
//!
//! The [`collab`] helpers cover the external steps a release task performs:
//!
//! ```no_run
//! use sake::collab::{docs, formula, git::Git, shell, version::Version};
//! use std::path::Path;
//!
//! fn release() -> Result<(), Box<dyn std::error::Error>> {
//!     let git = Git::new(Path::new("."));
//!     if git.any_changes()? {
//!         return Err("commit all your changes before starting the release".into());
//!     }
//!     let next = git.last_tag()?.parse::<Version>()?.bumping_minor()?;
//!     let branch = format!("release/{}", next);
//!
//!     shell::run_and_print("swift build")?;
//!     docs::generate(docs::SWIFT_DOC_COMMANDS)?;
//!     git.add_all()?;
//!     git.commit_all(&format!("[{}] Bump version", branch))?;
//!     git.tag(&next.to_string())?;
//!     git.push("origin", &branch, true)?;
//!
//!     let url = format!("https://github.com/example/sake/archive/{}.tar.gz", next);
//!     formula::update_formula(Path::new("Formula/sake.rb"), &url)?;
//!     git.add(&["Formula/sake.rb"])?;
//!     git.commit(&format!("[{}] Update formula", branch))?;
//!     git.push("origin", &branch, false)?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod collab;
pub mod core;
pub mod transport;
