//! SK-020: Collaborator commands used by release automation.
//!
//! Plain sequential external calls. A failing command surfaces as
//! `ErrorKind::CollaboratorFailed` and is never retried.

pub mod docs;
pub mod formula;
pub mod git;
pub mod shell;
pub mod version;
