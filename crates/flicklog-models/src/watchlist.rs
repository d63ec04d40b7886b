use crate::movie::MovieSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A movie the user intends to watch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchlistEntry {
    #[serde(flatten)]
    pub movie: MovieSummary,
    /// Set at insertion, never mutated.
    #[serde(rename = "dateAdded")]
    pub date_added: DateTime<Utc>,
}

impl WatchlistEntry {
    pub fn new(movie: MovieSummary, added_at: DateTime<Utc>) -> Self {
        Self {
            movie,
            date_added: added_at,
        }
    }
}
