use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Catalog genre code to name mapping (the standard TMDB movie genres).
/// Codes outside this table are silently dropped by consumers.
pub const GENRE_TABLE: [(u32, &str); 19] = [
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (14, "Fantasy"),
    (36, "History"),
    (27, "Horror"),
    (10402, "Music"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (878, "Science Fiction"),
    (10770, "TV Movie"),
    (53, "Thriller"),
    (10752, "War"),
    (37, "Western"),
];

pub fn genre_name(code: u32) -> Option<&'static str> {
    GENRE_TABLE
        .iter()
        .find(|(id, _)| *id == code)
        .map(|(_, name)| *name)
}

/// Closed genre enumeration for Movie Notes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NoteGenre {
    Action,
    Adventure,
    Animation,
    Comedy,
    Crime,
    Documentary,
    Drama,
    Family,
    Fantasy,
    Horror,
    Music,
    Mystery,
    Romance,
    #[serde(rename = "Science Fiction")]
    ScienceFiction,
    Thriller,
    War,
    Western,
}

impl NoteGenre {
    pub const ALL: [NoteGenre; 17] = [
        NoteGenre::Action,
        NoteGenre::Adventure,
        NoteGenre::Animation,
        NoteGenre::Comedy,
        NoteGenre::Crime,
        NoteGenre::Documentary,
        NoteGenre::Drama,
        NoteGenre::Family,
        NoteGenre::Fantasy,
        NoteGenre::Horror,
        NoteGenre::Music,
        NoteGenre::Mystery,
        NoteGenre::Romance,
        NoteGenre::ScienceFiction,
        NoteGenre::Thriller,
        NoteGenre::War,
        NoteGenre::Western,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NoteGenre::Action => "Action",
            NoteGenre::Adventure => "Adventure",
            NoteGenre::Animation => "Animation",
            NoteGenre::Comedy => "Comedy",
            NoteGenre::Crime => "Crime",
            NoteGenre::Documentary => "Documentary",
            NoteGenre::Drama => "Drama",
            NoteGenre::Family => "Family",
            NoteGenre::Fantasy => "Fantasy",
            NoteGenre::Horror => "Horror",
            NoteGenre::Music => "Music",
            NoteGenre::Mystery => "Mystery",
            NoteGenre::Romance => "Romance",
            NoteGenre::ScienceFiction => "Science Fiction",
            NoteGenre::Thriller => "Thriller",
            NoteGenre::War => "War",
            NoteGenre::Western => "Western",
        }
    }
}

impl fmt::Display for NoteGenre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoteGenre {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NoteGenre::ALL
            .iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("unknown genre: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_resolve() {
        assert_eq!(genre_name(28), Some("Action"));
        assert_eq!(genre_name(878), Some("Science Fiction"));
        assert_eq!(genre_name(10770), Some("TV Movie"));
    }

    #[test]
    fn unknown_codes_resolve_to_none() {
        assert_eq!(genre_name(0), None);
        assert_eq!(genre_name(99999), None);
    }

    #[test]
    fn note_genre_round_trips_through_its_display_name() {
        for genre in NoteGenre::ALL {
            assert_eq!(genre.as_str().parse::<NoteGenre>().unwrap(), genre);
        }
        assert_eq!(
            "science fiction".parse::<NoteGenre>().unwrap(),
            NoteGenre::ScienceFiction
        );
        assert!("Polka".parse::<NoteGenre>().is_err());
    }

    #[test]
    fn note_genre_serializes_as_display_name() {
        let json = serde_json::to_string(&NoteGenre::ScienceFiction).unwrap();
        assert_eq!(json, "\"Science Fiction\"");
    }
}
