pub mod backend;
pub mod library;
pub mod notes;
pub mod stats;
pub mod store;

pub use backend::{JsonFileBackend, MemoryBackend, StorageBackend};
pub use library::{AddOutcome, Library, NoteError, UserStatus, WatchOutcome};
pub use notes::{validate, FieldError, NoteDraft};
pub use stats::{compute, GenreCount, LibraryStats, NO_DATA};
pub use store::{Collection, RecordStore, SCHEMA_VERSION};
