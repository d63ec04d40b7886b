pub mod genre;
pub mod id;
pub mod movie;
pub mod note;
pub mod profile;
pub mod watched;
pub mod watchlist;

pub use genre::{genre_name, NoteGenre, GENRE_TABLE};
pub use id::MovieId;
pub use movie::{Genre, MovieDetail, MovieSummary};
pub use note::MovieNote;
pub use profile::UserProfile;
pub use watched::WatchedEntry;
pub use watchlist::WatchlistEntry;
