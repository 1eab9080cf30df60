//! SK-025: Documentation generation.

use super::shell;
use crate::core::error::SakeError;

/// Generator commands for a Swift package.
pub const SWIFT_DOC_COMMANDS: &[&str] = &[
    "swift package generate-xcodeproj",
    "bundle exec jazzy --clean --sdk macosx --xcodebuild-arguments -scheme,sake --skip-undocumented",
];

/// Run each generator command in order, stopping at the first failure.
pub fn generate(commands: &[&str]) -> Result<(), SakeError> {
    for command in commands {
        shell::run_and_print(command)?;
    }
    Ok(())
}
