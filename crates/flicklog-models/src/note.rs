use crate::genre::NoteGenre;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Freeform journal entry, independent of the watchlist and watched
/// collections. Keyed by creation timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieNote {
    /// Creation timestamp in milliseconds, doubles as the record key.
    pub id: i64,
    #[serde(rename = "movieTitle")]
    pub title: String,
    pub director: String,
    pub genre: NoteGenre,
    /// 1-5, required (0 is rejected at validation time).
    pub rating: u8,
    pub notes: String,
    #[serde(rename = "watchDate")]
    pub watch_date: NaiveDate,
    #[serde(rename = "dateAdded")]
    pub date_added: DateTime<Utc>,
}
