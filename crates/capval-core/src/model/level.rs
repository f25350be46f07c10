use std::fmt;

/// Property key holding an element's decomposition levels
pub const LEVEL_PROPERTY: &str = "Level";

/// A supported abstraction-decomposition level (0 through 4)
///
/// Levels are string-encoded in the host model. Tags outside the supported
/// range are kept verbatim in the population but never become a `Level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(u8);

impl Level {
    /// Highest supported level
    pub const MAX: u8 = 4;

    /// Every supported level, ascending
    pub const ALL: [Level; 5] = [Level(0), Level(1), Level(2), Level(3), Level(4)];

    /// Create a level, rejecting values above [`Level::MAX`]
    pub fn new(value: u8) -> Option<Self> {
        (value <= Self::MAX).then_some(Self(value))
    }

    /// Parse a level tag exactly as the host stores it (`"0"` .. `"4"`)
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == tag)
    }

    /// Numeric value
    pub fn value(self) -> u8 {
        self.0
    }

    /// The level a composition parent of this level must carry
    pub fn parent(self) -> Option<Self> {
        self.0.checked_sub(1).map(Self)
    }

    /// String encoding used in the population and in rule literals
    pub fn as_str(self) -> &'static str {
        match self.0 {
            0 => "0",
            1 => "1",
            2 => "2",
            3 => "3",
            _ => "4",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
