use crate::movie::MovieSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A movie the user has watched, optionally rated and reviewed.
///
/// A `user_rating` of 0 is the "unrated" sentinel; actual ratings are 1-5.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchedEntry {
    #[serde(flatten)]
    pub movie: MovieSummary,
    #[serde(rename = "dateWatched")]
    pub date_watched: DateTime<Utc>,
    #[serde(rename = "userRating", default)]
    pub user_rating: u8,
    #[serde(rename = "userComment", default)]
    pub user_comment: String,
    /// Stamped whenever the rating or comment is saved.
    #[serde(rename = "reviewDate", default, skip_serializing_if = "Option::is_none")]
    pub review_date: Option<DateTime<Utc>>,
}

impl WatchedEntry {
    /// Fresh entry as created by the mark-watched transition: unrated, no
    /// comment, no review date.
    pub fn new(movie: MovieSummary, watched_at: DateTime<Utc>) -> Self {
        Self {
            movie,
            date_watched: watched_at,
            user_rating: 0,
            user_comment: String::new(),
            review_date: None,
        }
    }

    pub fn is_rated(&self) -> bool {
        self.user_rating > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::MovieId;

    fn summary(id: u64) -> MovieSummary {
        MovieSummary {
            id: MovieId::from(id),
            title: format!("Movie {}", id),
            poster_path: None,
            release_date: None,
            genre_ids: None,
            genres: None,
        }
    }

    #[test]
    fn fresh_entry_is_unrated() {
        let entry = WatchedEntry::new(summary(1), Utc::now());
        assert_eq!(entry.user_rating, 0);
        assert!(!entry.is_rated());
        assert_eq!(entry.user_comment, "");
        assert!(entry.review_date.is_none());
    }

    #[test]
    fn legacy_entries_without_review_fields_deserialize() {
        let json = r#"{"id": 1, "title": "Old", "dateWatched": "2024-01-01T00:00:00Z"}"#;
        let entry: WatchedEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.user_rating, 0);
        assert!(entry.review_date.is_none());
    }
}
