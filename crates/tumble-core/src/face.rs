//! The six faces of the die.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// One face of a six-sided die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Face {
    /// One pip. Shown at mount.
    #[default]
    One,
    /// Two pips.
    Two,
    /// Three pips.
    Three,
    /// Four pips.
    Four,
    /// Five pips.
    Five,
    /// Six pips.
    Six,
}

impl Face {
    /// All faces in ascending order.
    pub const ALL: [Face; 6] = [
        Face::One,
        Face::Two,
        Face::Three,
        Face::Four,
        Face::Five,
        Face::Six,
    ];

    /// Number of pips on this face.
    pub fn value(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
            Self::Six => 6,
        }
    }

    /// The face showing `n` pips, if there is one.
    pub fn from_value(n: u32) -> Option<Self> {
        match n {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            4 => Some(Self::Four),
            5 => Some(Self::Five),
            6 => Some(Self::Six),
            _ => None,
        }
    }

    /// Map a drawn number to a face. Anything outside 1..=6 shows [`Face::One`].
    pub fn from_roll(n: u32) -> Self {
        Self::from_value(n).unwrap_or_default()
    }

    /// Draw a uniformly random face.
    pub fn roll<R: Rng>(rng: &mut R) -> Self {
        Self::from_roll(rng.random_range(1..=6))
    }

    /// Name of the image asset for this face.
    pub fn asset_name(self) -> &'static str {
        match self {
            Self::One => "DiceOne",
            Self::Two => "DiceTwo",
            Self::Three => "DiceThree",
            Self::Four => "DiceFour",
            Self::Five => "DiceFive",
            Self::Six => "DiceSix",
        }
    }

    /// Pip positions as `(column, row)` on a 3x3 grid.
    pub fn pips(self) -> &'static [(u8, u8)] {
        match self {
            Self::One => &[(1, 1)],
            Self::Two => &[(0, 0), (2, 2)],
            Self::Three => &[(0, 0), (1, 1), (2, 2)],
            Self::Four => &[(0, 0), (2, 0), (0, 2), (2, 2)],
            Self::Five => &[(0, 0), (2, 0), (1, 1), (0, 2), (2, 2)],
            Self::Six => &[(0, 0), (0, 1), (0, 2), (2, 0), (2, 1), (2, 2)],
        }
    }

    /// Index of this face in [`Face::ALL`].
    pub fn index(self) -> usize {
        usize::from(self.value() - 1)
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn default_face_is_one() {
        assert_eq!(Face::default(), Face::One);
        assert_eq!(Face::default().asset_name(), "DiceOne");
    }

    #[test]
    fn values_round_trip() {
        for face in Face::ALL {
            assert_eq!(Face::from_value(u32::from(face.value())), Some(face));
            assert_eq!(Face::ALL[face.index()], face);
        }
    }

    #[test]
    fn out_of_range_rolls_fall_back_to_one() {
        assert_eq!(Face::from_roll(0), Face::One);
        assert_eq!(Face::from_roll(7), Face::One);
        assert_eq!(Face::from_roll(u32::MAX), Face::One);
        assert_eq!(Face::from_roll(4), Face::Four);
    }

    #[test]
    fn pip_count_matches_value() {
        for face in Face::ALL {
            assert_eq!(face.pips().len(), usize::from(face.value()));
            assert!(face.pips().iter().all(|&(c, r)| c < 3 && r < 3));
        }
    }

    #[test]
    fn roll_covers_every_face() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; 6];
        for _ in 0..600 {
            seen[Face::roll(&mut rng).index()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn display_shows_pip_count() {
        assert_eq!(Face::Five.to_string(), "5");
    }
}
