use std::fmt;

use serde::{Deserialize, Serialize};

/// A slot in the nine-man batting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BattingPosition {
    #[default]
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    Eighth,
    Ninth,
}

impl BattingPosition {
    pub const ALL: [BattingPosition; 9] = [
        BattingPosition::First,
        BattingPosition::Second,
        BattingPosition::Third,
        BattingPosition::Fourth,
        BattingPosition::Fifth,
        BattingPosition::Sixth,
        BattingPosition::Seventh,
        BattingPosition::Eighth,
        BattingPosition::Ninth,
    ];

    /// The batter due up next; the ninth slot wraps to the leadoff hitter.
    pub fn next(self) -> BattingPosition {
        Self::ALL[usize::from(self.as_number()) % Self::ALL.len()]
    }

    pub fn as_number(self) -> u8 {
        match self {
            BattingPosition::First => 1,
            BattingPosition::Second => 2,
            BattingPosition::Third => 3,
            BattingPosition::Fourth => 4,
            BattingPosition::Fifth => 5,
            BattingPosition::Sixth => 6,
            BattingPosition::Seventh => 7,
            BattingPosition::Eighth => 8,
            BattingPosition::Ninth => 9,
        }
    }

    pub fn from_number(number: u8) -> Option<BattingPosition> {
        match number {
            1..=9 => Some(Self::ALL[usize::from(number) - 1]),
            _ => None,
        }
    }
}

impl fmt::Display for BattingPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_number() {
        assert_eq!(BattingPosition::First.as_number(), 1);
        assert_eq!(BattingPosition::Ninth.as_number(), 9);
    }

    #[test]
    fn test_next_wraps() {
        assert_eq!(BattingPosition::First.next(), BattingPosition::Second);
        assert_eq!(BattingPosition::Eighth.next(), BattingPosition::Ninth);
        assert_eq!(BattingPosition::Ninth.next(), BattingPosition::First);
    }

    #[test]
    fn test_full_rotation() {
        let mut position = BattingPosition::Fourth;
        for _ in 0..9 {
            position = position.next();
        }
        assert_eq!(position, BattingPosition::Fourth);
    }

    #[test]
    fn test_from_number() {
        assert_eq!(BattingPosition::from_number(4), Some(BattingPosition::Fourth));
        assert_eq!(BattingPosition::from_number(0), None);
        assert_eq!(BattingPosition::from_number(10), None);
        for position in BattingPosition::ALL {
            assert_eq!(BattingPosition::from_number(position.as_number()), Some(position));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(BattingPosition::Seventh.to_string(), "#7");
    }
}
