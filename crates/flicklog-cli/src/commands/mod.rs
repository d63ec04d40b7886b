pub mod clear;
pub mod config;
pub mod notes;
pub mod profile;
pub mod prompts;
pub mod search;
pub mod show;
pub mod stats;
pub mod watched;
pub mod watchlist;

use crate::output::Output;
use color_eyre::Result;
use flicklog_catalog::CatalogClient;
use flicklog_config::{Config, CredentialStore, PathManager};
use flicklog_core::{JsonFileBackend, Library};

/// Everything a command needs: resolved paths, loaded config, and the
/// library over the file-backed store.
pub struct AppContext {
    pub paths: PathManager,
    pub config: Config,
    pub library: Library<JsonFileBackend>,
}

impl AppContext {
    pub fn init() -> Result<Self> {
        let paths = PathManager::default();
        paths.ensure_directories().map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
        let config = Config::load(&paths.config_file()).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
        let library = Library::new(JsonFileBackend::new(paths.library_dir()).map_err(|e| color_eyre::eyre::eyre!("{}", e))?);
        Ok(Self {
            paths,
            config,
            library,
        })
    }

    /// Build the catalog client. A missing API key is a configuration
    /// error: reported once through the output, operation aborted, no
    /// partial state change.
    pub fn catalog_client(&self, output: &Output) -> Result<Option<CatalogClient>> {
        let mut credentials = CredentialStore::new(self.paths.credentials_file());
        credentials.load().map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
        let api_key = credentials.catalog_api_key().unwrap_or_default();

        match CatalogClient::with_base_url(api_key, &self.config.catalog.base_url) {
            Ok(client) => Ok(Some(client)),
            Err(e) => {
                output.error(e.to_string());
                Ok(None)
            }
        }
    }
}
