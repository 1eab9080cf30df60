//! SK-022: Semantic version tags.

use std::fmt;
use std::str::FromStr;

/// `MAJOR.MINOR.PATCH`, parsed from tags like `1.4.0` or `v1.4.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self { major, minor, patch }
    }

    pub fn bumping_major(&self) -> Result<Self, String> {
        Ok(Self::new(bump(self.major, "major")?, 0, 0))
    }

    pub fn bumping_minor(&self) -> Result<Self, String> {
        Ok(Self::new(self.major, bump(self.minor, "minor")?, 0))
    }

    pub fn bumping_patch(&self) -> Result<Self, String> {
        Ok(Self::new(self.major, self.minor, bump(self.patch, "patch")?))
    }
}

fn bump(component: u64, name: &str) -> Result<u64, String> {
    component
        .checked_add(1)
        .ok_or_else(|| format!("cannot bump {} component past {}", name, component))
}

impl FromStr for Version {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let bare = trimmed.strip_prefix('v').unwrap_or(trimmed);
        let parts: Vec<&str> = bare.split('.').collect();
        if parts.len() != 3 {
            return Err(format!("invalid version \"{}\": expected MAJOR.MINOR.PATCH", s));
        }
        let num = |p: &str| {
            p.parse::<u64>()
                .map_err(|_| format!("invalid version \"{}\": \"{}\" is not a number", s, p))
        };
        Ok(Self::new(num(parts[0])?, num(parts[1])?, num(parts[2])?))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
