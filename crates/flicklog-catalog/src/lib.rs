pub mod client;
pub mod error;
pub mod guard;

pub use client::CatalogClient;
pub use error::CatalogError;
pub use guard::DetailFetchGuard;
