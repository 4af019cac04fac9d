//! Dasha nesting levels.
//!
//! Only the three outer levels of the Vimshottari hierarchy take part in
//! synthesis. Period arithmetic lives with the caller.

use serde::{Deserialize, Serialize};

/// Maximum nesting depth consumed.
pub const MAX_DASHA_DEPTH: u8 = 3;

/// Hierarchical dasha levels, outermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum DashaLevel {
    Mahadasha = 0,
    Antardasha = 1,
    Pratyantardasha = 2,
}

pub const ALL_DASHA_LEVELS: [DashaLevel; 3] = [
    DashaLevel::Mahadasha,
    DashaLevel::Antardasha,
    DashaLevel::Pratyantardasha,
];

impl DashaLevel {
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mahadasha => "Mahadasha",
            Self::Antardasha => "Antardasha",
            Self::Pratyantardasha => "Pratyantardasha",
        }
    }

    /// Whether this level is included at the given depth (1 = Mahadasha only).
    pub const fn within_depth(self, depth: u8) -> bool {
        self.index() < depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered_outer_to_inner() {
        let indices: Vec<u8> = ALL_DASHA_LEVELS.iter().map(|l| l.index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(DashaLevel::Antardasha.name(), "Antardasha");
    }

    #[test]
    fn depth_filter() {
        assert!(DashaLevel::Mahadasha.within_depth(1));
        assert!(!DashaLevel::Antardasha.within_depth(1));
        assert!(DashaLevel::Pratyantardasha.within_depth(MAX_DASHA_DEPTH));
    }
}
