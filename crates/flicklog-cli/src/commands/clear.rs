use super::prompts::confirm;
use super::AppContext;
use crate::output::Output;
use color_eyre::Result;
use flicklog_config::CredentialStore;

pub fn run_clear(
    all: bool,
    library: bool,
    credentials: bool,
    assume_yes: bool,
    output: &Output,
) -> Result<()> {
    let ctx = AppContext::init()?;

    if !all && !library && !credentials {
        output.warn("No clear option specified. Use --library, --credentials, or --all");
        output.println("\nExample: flicklog clear --library");
        return Ok(());
    }

    if (all || library)
        && confirm(
            "Delete all watchlist, watched, and note data?",
            assume_yes || !output.is_human(),
        )?
    {
        // --library leaves the profile alone; only --all logs the user out.
        if all {
            ctx.library.store().clear_all().map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
        } else {
            ctx.library.store().clear_collections().map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
        }
        output.success("Library data cleared");
    }

    if all || credentials {
        let mut store = CredentialStore::new(ctx.paths.credentials_file());
        store.load().map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
        store.remove("tmdb_api_key");
        store.save().map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
        output.success("Stored credentials cleared");
    }

    Ok(())
}
