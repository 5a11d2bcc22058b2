//! Fixed identifier sets: chapters, hearts and stars

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::consts::{TOTAL_HEARTS, TOTAL_STARS};

/// A chapter of the story, in reading order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chapter {
    Childhood,
    Texts,
    Hola,
    Night,
    Diary,
    Timeline,
    Album,
    Salonighar,
    NewYear,
}

impl Chapter {
    /// Every chapter in story order
    pub const ALL: [Chapter; 9] = [
        Chapter::Childhood,
        Chapter::Texts,
        Chapter::Hola,
        Chapter::Night,
        Chapter::Diary,
        Chapter::Timeline,
        Chapter::Album,
        Chapter::Salonighar,
        Chapter::NewYear,
    ];

    /// Stable id used in storage, DOM data attributes and page names
    pub fn as_str(&self) -> &'static str {
        match self {
            Chapter::Childhood => "childhood",
            Chapter::Texts => "texts",
            Chapter::Hola => "hola",
            Chapter::Night => "night",
            Chapter::Diary => "diary",
            Chapter::Timeline => "timeline",
            Chapter::Album => "album",
            Chapter::Salonighar => "salonighar",
            Chapter::NewYear => "newyear",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl fmt::Display for Chapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A hidden heart, numbered 1..=15
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HeartId(u8);

impl HeartId {
    pub fn new(n: u8) -> Option<Self> {
        (1..=TOTAL_HEARTS as u8).contains(&n).then_some(Self(n))
    }

    /// Parse the `data-heart` / storage form. Only canonical decimal ids
    /// ("7", not "07" or "+7") are accepted.
    pub fn from_str(s: &str) -> Option<Self> {
        let n: u8 = s.parse().ok()?;
        let heart = Self::new(n)?;
        (heart.to_string() == s).then_some(heart)
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    /// All hearts in numeric order
    pub fn all() -> impl Iterator<Item = HeartId> {
        (1..=TOTAL_HEARTS as u8).map(HeartId)
    }
}

impl fmt::Display for HeartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hearts travel as their string id, same as in storage
impl Serialize for HeartId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One of the star widgets (index 0..5). Stars are only told apart for
/// animation; the easter egg counts clicks, not distinct stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StarId(u8);

impl StarId {
    pub fn new(index: usize) -> Option<Self> {
        (index < TOTAL_STARS).then_some(Self(index as u8))
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chapter_ids_round_trip() {
        for chapter in Chapter::ALL {
            assert_eq!(Chapter::from_str(chapter.as_str()), Some(chapter));
        }
        assert_eq!(Chapter::from_str("NewYear"), None);
        assert_eq!(Chapter::from_str("epilogue"), None);
    }

    #[test]
    fn test_chapter_serde_matches_storage_ids() {
        let json = serde_json::to_string(&Chapter::NewYear).unwrap();
        assert_eq!(json, "\"newyear\"");
        let back: Chapter = serde_json::from_str("\"salonighar\"").unwrap();
        assert_eq!(back, Chapter::Salonighar);
    }

    #[test]
    fn test_heart_ids() {
        assert_eq!(HeartId::from_str("1").map(|h| h.number()), Some(1));
        assert_eq!(HeartId::from_str("15").map(|h| h.number()), Some(15));
        assert_eq!(HeartId::from_str("0"), None);
        assert_eq!(HeartId::from_str("16"), None);
        assert_eq!(HeartId::from_str("07"), None);
        assert_eq!(HeartId::from_str("+7"), None);
        assert_eq!(HeartId::from_str("seven"), None);
        assert_eq!(HeartId::all().count(), TOTAL_HEARTS);
    }

    #[test]
    fn test_star_ids() {
        assert!(StarId::new(0).is_some());
        assert_eq!(StarId::new(4).map(|s| s.index()), Some(4));
        assert!(StarId::new(5).is_none());
    }
}
