// SPDX-License-Identifier: MIT

//! Security levels and the mixing policy each one selects.
use crate::error::Error;

use alloc::string::ToString;
use core::{fmt, str::FromStr};

/// How much defense-in-depth the byte generator applies on top of the
/// OS entropy source.
///
/// Levels are ordered by cost. Output length and statistical quality
/// are identical across levels; higher levels only add mixing passes,
/// each of which draws fresh entropy.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SecurityLevel {
    /// OS entropy is returned as-is.
    Medium,
    /// One mixing pass.
    #[default]
    High,
    /// Three mixing passes.
    Paranoid,
}

/// Parameters consumed by the mixing function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MixPolicy {
    /// Number of fresh-entropy mixing passes applied after the initial
    /// draw.
    pub passes: u32,
}

impl SecurityLevel {
    pub const ALL: [SecurityLevel; 3] = [Self::Medium, Self::High, Self::Paranoid];

    pub fn policy(self) -> MixPolicy {
        let passes = match self {
            Self::Medium => 0,
            Self::High => 1,
            Self::Paranoid => 3,
        };
        MixPolicy { passes }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Medium => "medium",
            Self::High => "high",
            Self::Paranoid => "paranoid",
        }
    }
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SecurityLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownSecurityLevel(s.to_string()))
    }
}
