use super::prompts::{confirm, select};
use super::search::render_results;
use super::show::fetch_detail;
use super::AppContext;
use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use comfy_table::{presets::UTF8_FULL, Table};
use flicklog_core::AddOutcome;
use flicklog_models::MovieId;
use serde_json::json;

pub fn run_list(output: &Output) -> Result<()> {
    let ctx = AppContext::init()?;
    let watchlist = ctx.library.watchlist().map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    if watchlist.is_empty() {
        output.info("Your watchlist is empty. Add movies with `flicklog watchlist add`.");
        return Ok(());
    }

    match output.format() {
        OutputFormat::Human => {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["ID", "Title", "Year", "Added"]);
            for entry in &watchlist {
                table.add_row(vec![
                    entry.movie.id.to_string(),
                    entry.movie.title.clone(),
                    entry.movie.release_year().unwrap_or("Unknown").to_string(),
                    entry.date_added.format("%Y-%m-%d").to_string(),
                ]);
            }
            output.println(table.to_string());
            output.info(format!("{} movies in your watchlist", watchlist.len()));
        }
        _ => {
            output.json(&json!({
                "type": "watchlist",
                "count": watchlist.len(),
                "entries": watchlist,
            }));
        }
    }
    Ok(())
}

/// Add by catalog id, or search-and-pick with `--search`.
pub async fn run_add(id: Option<String>, search: Option<String>, output: &Output) -> Result<()> {
    let ctx = AppContext::init()?;
    let Some(client) = ctx.catalog_client(output)? else {
        return Ok(());
    };

    let movie = if let Some(query) = search {
        let results = match client.search(&query).await {
            Ok(results) => results,
            Err(e) => {
                output.error(format!("Failed to search movies: {}", e));
                return Ok(());
            }
        };
        if results.is_empty() {
            output.info("No movies found for your search");
            return Ok(());
        }
        render_results(&results, output);

        let labels: Vec<String> = results
            .iter()
            .map(|m| {
                format!(
                    "{} ({})",
                    m.title,
                    m.release_year().unwrap_or("Unknown")
                )
            })
            .collect();
        let Some(index) = select("Which movie do you want to add?", &labels)? else {
            output.info("Nothing added");
            return Ok(());
        };
        results[index].clone()
    } else if let Some(id) = id {
        let Some(detail) = fetch_detail(&client, MovieId::from(id), output).await? else {
            return Ok(());
        };
        detail.to_summary()
    } else {
        output.error("Provide a movie id or --search <query>");
        return Ok(());
    };

    let title = movie.title.clone();
    match ctx.library.add_to_watchlist(movie) {
        Ok(AddOutcome::Added(_)) => {
            output.success(format!("\"{}\" added to your watchlist!", title));
        }
        Ok(AddOutcome::AlreadyPresent) => {
            output.info("Movie already in watchlist");
        }
        Err(e) => {
            output.error(format!("Failed to add movie to watchlist: {}", e));
        }
    }
    Ok(())
}

pub fn run_remove(id: String, assume_yes: bool, output: &Output) -> Result<()> {
    let ctx = AppContext::init()?;
    let id = MovieId::from(id);

    if !confirm("Remove this movie from your watchlist?", assume_yes || !output.is_human())? {
        output.info("Nothing removed");
        return Ok(());
    }

    match ctx.library.remove_from_watchlist(&id) {
        Ok(true) => output.success("Movie removed from watchlist"),
        Ok(false) => output.info(format!("Movie {} is not in your watchlist", id)),
        Err(e) => output.error(format!("Failed to remove movie: {}", e)),
    }
    Ok(())
}
