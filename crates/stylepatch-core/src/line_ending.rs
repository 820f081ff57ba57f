//! Line terminators used when writing patched files.

use serde::{Deserialize, Serialize};
use tracing::info;

/// The terminator written after every line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// The platform default (`\r\n` on Windows, `\n` elsewhere).
    #[default]
    System,
    /// `\r\n`
    Crlf,
    /// `\n`
    Lf,
    /// `\r`
    Cr,
}

impl LineEnding {
    /// Returns the literal terminator.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => {
                if cfg!(windows) {
                    "\r\n"
                } else {
                    "\n"
                }
            }
            Self::Crlf => "\r\n",
            Self::Lf => "\n",
            Self::Cr => "\r",
        }
    }

    /// Parses a configuration value (case-insensitive).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "system" => Some(Self::System),
            "crlf" => Some(Self::Crlf),
            "lf" => Some(Self::Lf),
            "cr" => Some(Self::Cr),
            _ => None,
        }
    }

    /// Resolves an optional configuration value.
    ///
    /// Missing or unrecognised values fall back to [`LineEnding::System`].
    #[must_use]
    pub fn resolve(value: Option<&str>) -> Self {
        match value {
            Some(raw) => Self::parse(raw).unwrap_or_else(|| {
                info!("Unrecognised line ending {raw:?}, using the system line separator instead");
                Self::System
            }),
            None => {
                info!("No line ending configured, using the system line separator");
                Self::System
            }
        }
    }
}

impl std::fmt::Display for LineEnding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::System => write!(f, "system"),
            Self::Crlf => write!(f, "crlf"),
            Self::Lf => write!(f, "lf"),
            Self::Cr => write!(f, "cr"),
        }
    }
}
