use std::fmt;
use std::str::FromStr;

/// Which generator feeds the output.
///
/// Persisted as a single integer: 0 = None, 1 = White, 2 = Brown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GeneratorKind {
    /// Silence: refills are suspended
    None,
    White,
    #[default]
    Brown,
}

impl GeneratorKind {
    /// All kinds in stored-value order
    pub const ALL: [GeneratorKind; 3] = [Self::None, Self::White, Self::Brown];

    /// Resolve a stored value. Anything out of range falls back to the default.
    pub fn from_stored(value: u32) -> Self {
        match value {
            0 => Self::None,
            1 => Self::White,
            2 => Self::Brown,
            _ => Self::default(),
        }
    }

    /// Value written to the preference store
    pub fn as_stored(self) -> u32 {
        match self {
            Self::None => 0,
            Self::White => 1,
            Self::Brown => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::White => "white",
            Self::Brown => "brown",
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognized generator name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown generator kind '{0}' (expected none, white or brown)")]
pub struct ParseKindError(pub String);

impl FromStr for GeneratorKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "off" | "silent" => Ok(Self::None),
            "white" => Ok(Self::White),
            "brown" => Ok(Self::Brown),
            _ => Err(ParseKindError(s.to_string())),
        }
    }
}
