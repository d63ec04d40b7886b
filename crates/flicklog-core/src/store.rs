use crate::backend::StorageBackend;
use anyhow::Result;
use flicklog_models::UserProfile;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

/// Current persisted schema version, written alongside the collections.
/// The original layout carried no version field; readers stay lenient about
/// unknown versions rather than refusing to load.
pub const SCHEMA_VERSION: u32 = 1;

const SCHEMA_VERSION_KEY: &str = "schemaVersion";
const CURRENT_USER_KEY: &str = "currentUser";

/// The three persisted collections, under their stable storage keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Watchlist,
    Watched,
    MovieNotes,
}

impl Collection {
    pub const ALL: [Collection; 3] =
        [Collection::Watchlist, Collection::Watched, Collection::MovieNotes];

    pub fn key(&self) -> &'static str {
        match self {
            Collection::Watchlist => "watchlist",
            Collection::Watched => "watched",
            Collection::MovieNotes => "movieNotes",
        }
    }
}

/// Durable, synchronous key-value persistence for the named collections.
///
/// Every `save` overwrites the whole collection; callers read-modify-write.
/// There is no change notification: consumers re-`load` explicitly.
pub struct RecordStore<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> RecordStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Load a collection. An absent or unparsable payload yields an empty
    /// vec via the lenient-read fallback; only backend I/O errors propagate.
    pub fn load<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>> {
        let Some(payload) = self.backend.read(collection.key())? else {
            debug!(collection = collection.key(), "collection absent, loading empty");
            return Ok(Vec::new());
        };
        match serde_json::from_str(&payload) {
            Ok(records) => Ok(records),
            Err(e) => Ok(lenient_empty(collection, &e)),
        }
    }

    /// Overwrite the whole collection. No partial or merge semantics.
    pub fn save<T: Serialize>(&self, collection: Collection, records: &[T]) -> Result<()> {
        let payload = serde_json::to_string(records)?;
        self.backend.write(collection.key(), &payload)?;
        self.ensure_schema_version()?;
        Ok(())
    }

    /// True if any record in the collection satisfies the predicate.
    pub fn exists<T, P>(&self, collection: Collection, predicate: P) -> Result<bool>
    where
        T: DeserializeOwned,
        P: FnMut(&T) -> bool,
    {
        let mut predicate = predicate;
        Ok(self.load::<T>(collection)?.iter().any(|r| predicate(r)))
    }

    pub fn load_profile(&self) -> Result<Option<UserProfile>> {
        let Some(payload) = self.backend.read(CURRENT_USER_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&payload) {
            Ok(profile) => Ok(Some(profile)),
            Err(e) => {
                warn!(error = %e, "stored profile failed to parse, treating as logged out");
                Ok(None)
            }
        }
    }

    pub fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        self.backend
            .write(CURRENT_USER_KEY, &serde_json::to_string(profile)?)
    }

    pub fn clear_profile(&self) -> Result<()> {
        self.backend.remove(CURRENT_USER_KEY)
    }

    /// Remove the three collections, leaving the profile in place.
    pub fn clear_collections(&self) -> Result<()> {
        for collection in Collection::ALL {
            self.backend.remove(collection.key())?;
        }
        Ok(())
    }

    /// Remove every collection and the profile.
    pub fn clear_all(&self) -> Result<()> {
        self.clear_collections()?;
        self.backend.remove(CURRENT_USER_KEY)?;
        self.backend.remove(SCHEMA_VERSION_KEY)?;
        Ok(())
    }

    pub fn schema_version(&self) -> Result<Option<u32>> {
        let Some(payload) = self.backend.read(SCHEMA_VERSION_KEY)? else {
            return Ok(None);
        };
        match payload.trim().parse() {
            Ok(v) => Ok(Some(v)),
            Err(_) => {
                warn!(payload, "unreadable schema version, ignoring");
                Ok(None)
            }
        }
    }

    fn ensure_schema_version(&self) -> Result<()> {
        if self.schema_version()?.is_none() {
            self.backend
                .write(SCHEMA_VERSION_KEY, &SCHEMA_VERSION.to_string())?;
        }
        Ok(())
    }
}

/// The lenient-read policy: a persisted collection that fails to parse is
/// treated as empty and never surfaced to the user, so a corrupted store
/// cannot lock anyone out of the app. Deliberate, see the store contract.
fn lenient_empty<T>(collection: Collection, err: &serde_json::Error) -> Vec<T> {
    warn!(
        collection = collection.key(),
        error = %err,
        "persisted collection failed to parse, falling back to empty"
    );
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use flicklog_models::{MovieId, MovieSummary, WatchlistEntry};

    fn summary(id: u64, title: &str) -> MovieSummary {
        MovieSummary {
            id: MovieId::from(id),
            title: title.to_string(),
            poster_path: None,
            release_date: None,
            genre_ids: None,
            genres: None,
        }
    }

    #[test]
    fn absent_collection_loads_empty() {
        let store = RecordStore::new(MemoryBackend::new());
        let entries: Vec<WatchlistEntry> = store.load(Collection::Watchlist).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn corrupt_collection_loads_empty_and_stays_writable() {
        let backend = MemoryBackend::new();
        backend.seed("watchlist", "{not valid json!");
        let store = RecordStore::new(backend);

        let entries: Vec<WatchlistEntry> = store.load(Collection::Watchlist).unwrap();
        assert!(entries.is_empty());

        let entry = WatchlistEntry::new(summary(1, "Recovered"), chrono::Utc::now());
        store.save(Collection::Watchlist, &[entry]).unwrap();
        let reloaded: Vec<WatchlistEntry> = store.load(Collection::Watchlist).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded[0].movie.title, "Recovered");
    }

    #[test]
    fn save_is_a_whole_collection_overwrite() {
        let store = RecordStore::new(MemoryBackend::new());
        let a = WatchlistEntry::new(summary(1, "A"), chrono::Utc::now());
        let b = WatchlistEntry::new(summary(2, "B"), chrono::Utc::now());

        store.save(Collection::Watchlist, &[a.clone(), b]).unwrap();
        store.save(Collection::Watchlist, &[a]).unwrap();

        let reloaded: Vec<WatchlistEntry> = store.load(Collection::Watchlist).unwrap();
        assert_eq!(reloaded.len(), 1);
    }

    #[test]
    fn exists_matches_by_predicate() {
        let store = RecordStore::new(MemoryBackend::new());
        let entry = WatchlistEntry::new(summary(603, "The Matrix"), chrono::Utc::now());
        store.save(Collection::Watchlist, &[entry]).unwrap();

        let target = MovieId::from(603u64);
        assert!(store
            .exists(Collection::Watchlist, |e: &WatchlistEntry| e.movie.id == target)
            .unwrap());
        let other = MovieId::from("tt001");
        assert!(!store
            .exists(Collection::Watchlist, |e: &WatchlistEntry| e.movie.id == other)
            .unwrap());
    }

    #[test]
    fn profile_round_trips_under_current_user_key() {
        let store = RecordStore::new(MemoryBackend::new());
        assert!(store.load_profile().unwrap().is_none());

        store.save_profile(&UserProfile::new("ada")).unwrap();
        assert_eq!(store.load_profile().unwrap().unwrap().username, "ada");

        store.clear_profile().unwrap();
        assert!(store.load_profile().unwrap().is_none());
    }

    #[test]
    fn clearing_collections_keeps_the_profile() {
        let store = RecordStore::new(MemoryBackend::new());
        let entry = WatchlistEntry::new(summary(1, "A"), chrono::Utc::now());
        store.save(Collection::Watchlist, &[entry]).unwrap();
        store.save_profile(&UserProfile::new("ada")).unwrap();

        store.clear_collections().unwrap();
        let reloaded: Vec<WatchlistEntry> = store.load(Collection::Watchlist).unwrap();
        assert!(reloaded.is_empty());
        assert_eq!(store.load_profile().unwrap().unwrap().username, "ada");

        store.clear_all().unwrap();
        assert!(store.load_profile().unwrap().is_none());
    }

    #[test]
    fn first_save_stamps_the_schema_version() {
        let store = RecordStore::new(MemoryBackend::new());
        assert_eq!(store.schema_version().unwrap(), None);
        store
            .save::<WatchlistEntry>(Collection::Watchlist, &[])
            .unwrap();
        assert_eq!(store.schema_version().unwrap(), Some(SCHEMA_VERSION));
    }
}
