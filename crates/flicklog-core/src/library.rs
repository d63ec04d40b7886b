use crate::backend::StorageBackend;
use crate::notes::{validate, FieldError, NoteDraft};
use crate::store::{Collection, RecordStore};
use anyhow::Result;
use chrono::Utc;
use flicklog_models::{MovieId, MovieNote, MovieSummary, WatchedEntry, WatchlistEntry};
use tracing::{debug, info, warn};

/// Result of a watchlist add: a second add of the same id performs no store
/// write.
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    Added(WatchlistEntry),
    AlreadyPresent,
}

/// Result of the mark-watched transition.
#[derive(Debug, Clone, PartialEq)]
pub enum WatchOutcome {
    Marked(WatchedEntry),
    AlreadyWatched(WatchedEntry),
}

#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    #[error("movie note validation failed")]
    Invalid(Vec<FieldError>),
    #[error("no movie note with id {0}")]
    NotFound(i64),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// User status for one movie across both collections. There is no foreign
/// key between them; correlation is by identifier comparison only.
#[derive(Debug, Clone, PartialEq)]
pub struct UserStatus {
    pub in_watchlist: bool,
    pub watched: Option<WatchedEntry>,
}

/// The mutation layer every command goes through: load on entry, mutate the
/// full collection, persist, re-load before rendering.
pub struct Library<B: StorageBackend> {
    store: RecordStore<B>,
}

impl<B: StorageBackend> Library<B> {
    pub fn new(backend: B) -> Self {
        Self {
            store: RecordStore::new(backend),
        }
    }

    pub fn store(&self) -> &RecordStore<B> {
        &self.store
    }

    pub fn watchlist(&self) -> Result<Vec<WatchlistEntry>> {
        self.store.load(Collection::Watchlist)
    }

    pub fn watched(&self) -> Result<Vec<WatchedEntry>> {
        self.store.load(Collection::Watched)
    }

    pub fn notes(&self) -> Result<Vec<MovieNote>> {
        self.store.load(Collection::MovieNotes)
    }

    /// Add a search result to the watchlist, deduplicated by identifier.
    pub fn add_to_watchlist(&self, movie: MovieSummary) -> Result<AddOutcome> {
        let mut watchlist = self.watchlist()?;
        if watchlist.iter().any(|e| e.movie.id == movie.id) {
            debug!(id = %movie.id, "watchlist add skipped, already present");
            return Ok(AddOutcome::AlreadyPresent);
        }

        let entry = WatchlistEntry::new(movie, Utc::now());
        watchlist.push(entry.clone());
        self.store.save(Collection::Watchlist, &watchlist)?;
        info!(id = %entry.movie.id, title = %entry.movie.title, "added to watchlist");
        Ok(AddOutcome::Added(entry))
    }

    /// Move a watchlist entry into the watched collection.
    ///
    /// Removal and insertion happen under one logical operation: the watched
    /// append is persisted first and rolled back if the watchlist removal
    /// fails to persist, so callers never observe one postcondition without
    /// the other.
    pub fn mark_watched(&self, id: &MovieId) -> Result<Option<WatchOutcome>> {
        let watchlist = self.watchlist()?;
        let Some(entry) = watchlist.iter().find(|e| &e.movie.id == id).cloned() else {
            return Ok(None);
        };
        self.transition_to_watched(entry.movie).map(Some)
    }

    /// Mark a movie watched directly from a search result or detail view,
    /// whether or not it ever sat in the watchlist.
    pub fn record_watched(&self, movie: MovieSummary) -> Result<WatchOutcome> {
        self.transition_to_watched(movie)
    }

    fn transition_to_watched(&self, movie: MovieSummary) -> Result<WatchOutcome> {
        let original_watched = self.watched()?;
        let mut watchlist = self.watchlist()?;
        let before = watchlist.len();
        watchlist.retain(|e| e.movie.id != movie.id);
        let removed_from_watchlist = watchlist.len() != before;

        // Mutual exclusion: an id already in watched is never re-appended;
        // a stray watchlist duplicate is still cleaned up.
        if let Some(existing) = original_watched.iter().find(|e| e.movie.id == movie.id) {
            if removed_from_watchlist {
                self.store.save(Collection::Watchlist, &watchlist)?;
                warn!(id = %movie.id, "removed watchlist entry that was already watched");
            }
            return Ok(WatchOutcome::AlreadyWatched(existing.clone()));
        }

        let entry = WatchedEntry::new(movie, Utc::now());
        let mut watched = original_watched.clone();
        watched.push(entry.clone());

        self.store.save(Collection::Watched, &watched)?;
        if let Err(e) = self.store.save(Collection::Watchlist, &watchlist) {
            // Roll the append back so the movie does not end up in both
            // collections after a partial failure.
            if let Err(rollback) = self.store.save(Collection::Watched, &original_watched) {
                warn!(error = %rollback, "rollback of watched append failed");
            }
            return Err(e);
        }

        info!(id = %entry.movie.id, title = %entry.movie.title, "marked as watched");
        Ok(WatchOutcome::Marked(entry))
    }

    /// Save a rating (1-5) and comment on a watched entry, stamping the
    /// review date.
    pub fn save_review(&self, id: &MovieId, rating: u8, comment: &str) -> Result<WatchedEntry> {
        anyhow::ensure!(
            (1..=5).contains(&rating),
            "rating must be between 1 and 5, got {}",
            rating
        );

        let mut watched = self.watched()?;
        let entry = watched
            .iter_mut()
            .find(|e| &e.movie.id == id)
            .ok_or_else(|| anyhow::anyhow!("movie {} is not in the watched list", id))?;

        entry.user_rating = rating;
        entry.user_comment = comment.to_string();
        entry.review_date = Some(Utc::now());
        let updated = entry.clone();

        self.store.save(Collection::Watched, &watched)?;
        info!(id = %id, rating, "review saved");
        Ok(updated)
    }

    /// Remove by id. Returns false when nothing matched (no store write).
    pub fn remove_from_watchlist(&self, id: &MovieId) -> Result<bool> {
        let mut watchlist = self.watchlist()?;
        let before = watchlist.len();
        watchlist.retain(|e| &e.movie.id != id);
        if watchlist.len() == before {
            return Ok(false);
        }
        self.store.save(Collection::Watchlist, &watchlist)?;
        info!(id = %id, "removed from watchlist");
        Ok(true)
    }

    pub fn remove_from_watched(&self, id: &MovieId) -> Result<bool> {
        let mut watched = self.watched()?;
        let before = watched.len();
        watched.retain(|e| &e.movie.id != id);
        if watched.len() == before {
            return Ok(false);
        }
        self.store.save(Collection::Watched, &watched)?;
        info!(id = %id, "removed from watched list");
        Ok(true)
    }

    /// Cross-collection lookup for the detail view.
    pub fn status(&self, id: &MovieId) -> Result<UserStatus> {
        let in_watchlist = self
            .store
            .exists(Collection::Watchlist, |e: &WatchlistEntry| &e.movie.id == id)?;
        let watched = self
            .watched()?
            .into_iter()
            .find(|e| &e.movie.id == id);
        Ok(UserStatus {
            in_watchlist,
            watched,
        })
    }

    pub fn add_note(&self, draft: NoteDraft) -> Result<MovieNote, NoteError> {
        let now = Utc::now();
        let (genre, watch_date) = validated_fields(&draft)?;
        let note = MovieNote {
            id: now.timestamp_millis(),
            title: draft.title.trim().to_string(),
            director: draft.director.trim().to_string(),
            genre,
            rating: draft.rating,
            notes: draft.notes.trim().to_string(),
            watch_date,
            date_added: now,
        };

        let mut notes = self.notes().map_err(NoteError::Storage)?;
        notes.push(note.clone());
        self.store
            .save(Collection::MovieNotes, &notes)
            .map_err(NoteError::Storage)?;
        info!(id = note.id, title = %note.title, "movie note added");
        Ok(note)
    }

    pub fn update_note(&self, id: i64, draft: NoteDraft) -> Result<MovieNote, NoteError> {
        let (genre, watch_date) = validated_fields(&draft)?;
        let mut notes = self.notes().map_err(NoteError::Storage)?;
        let note = notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(NoteError::NotFound(id))?;

        note.title = draft.title.trim().to_string();
        note.director = draft.director.trim().to_string();
        note.genre = genre;
        note.rating = draft.rating;
        note.notes = draft.notes.trim().to_string();
        note.watch_date = watch_date;
        let updated = note.clone();

        self.store
            .save(Collection::MovieNotes, &notes)
            .map_err(NoteError::Storage)?;
        info!(id, "movie note updated");
        Ok(updated)
    }

    pub fn delete_note(&self, id: i64) -> Result<bool> {
        let mut notes = self.notes()?;
        let before = notes.len();
        notes.retain(|n| n.id != id);
        if notes.len() == before {
            return Ok(false);
        }
        self.store.save(Collection::MovieNotes, &notes)?;
        info!(id, "movie note deleted");
        Ok(true)
    }

}

/// Run draft validation and hand back the fields that validation proved
/// present, so construction below needs no unwraps.
fn validated_fields(
    draft: &NoteDraft,
) -> Result<(flicklog_models::NoteGenre, chrono::NaiveDate), NoteError> {
    let errors = validate(draft, Utc::now().date_naive());
    if !errors.is_empty() {
        return Err(NoteError::Invalid(errors));
    }
    // Validation guarantees both fields are present once it passes.
    let (Some(genre), Some(date)) = (draft.genre, draft.watch_date) else {
        return Err(NoteError::Invalid(validate(draft, Utc::now().date_naive())));
    };
    Ok((genre, date))
}
