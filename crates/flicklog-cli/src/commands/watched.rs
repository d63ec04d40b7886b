use super::prompts::confirm;
use super::show::fetch_detail;
use super::AppContext;
use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use comfy_table::{presets::UTF8_FULL, Table};
use flicklog_core::WatchOutcome;
use flicklog_models::MovieId;
use serde_json::json;

/// Mark a movie watched. A watchlist entry transitions in place; anything
/// else is fetched from the catalog and recorded directly.
pub async fn run_watch(id: String, output: &Output) -> Result<()> {
    let ctx = AppContext::init()?;
    let id = MovieId::from(id);

    let outcome = match ctx.library.mark_watched(&id) {
        Ok(Some(outcome)) => outcome,
        Ok(None) => {
            // Not in the watchlist: build the entry from the catalog.
            let Some(client) = ctx.catalog_client(output)? else {
                return Ok(());
            };
            let Some(detail) = fetch_detail(&client, id, output).await? else {
                return Ok(());
            };
            match ctx.library.record_watched(detail.to_summary()) {
                Ok(outcome) => outcome,
                Err(e) => {
                    output.error(format!("Failed to mark movie as watched: {}", e));
                    return Ok(());
                }
            }
        }
        Err(e) => {
            output.error(format!("Failed to mark movie as watched: {}", e));
            return Ok(());
        }
    };

    match outcome {
        WatchOutcome::Marked(entry) => {
            output.success("Movie marked as watched");
            output.info(format!(
                "Rate it with `flicklog rate {} --rating <1-5>`",
                entry.movie.id
            ));
        }
        WatchOutcome::AlreadyWatched(entry) => {
            output.info(format!("You've already watched \"{}\"", entry.movie.title));
        }
    }
    Ok(())
}

pub fn run_list(output: &Output) -> Result<()> {
    let ctx = AppContext::init()?;
    let watched = ctx.library.watched().map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    if watched.is_empty() {
        output.info("You haven't marked anything watched yet.");
        return Ok(());
    }

    match output.format() {
        OutputFormat::Human => {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["ID", "Title", "Watched", "Rating", "Review"]);
            for entry in &watched {
                let rating = if entry.is_rated() {
                    format!("{}/5", entry.user_rating)
                } else {
                    "unrated".to_string()
                };
                table.add_row(vec![
                    entry.movie.id.to_string(),
                    entry.movie.title.clone(),
                    entry.date_watched.format("%Y-%m-%d").to_string(),
                    rating,
                    truncate(&entry.user_comment, 40),
                ]);
            }
            output.println(table.to_string());
            output.info(format!("{} movies watched", watched.len()));
        }
        _ => {
            output.json(&json!({
                "type": "watched",
                "count": watched.len(),
                "entries": watched,
            }));
        }
    }
    Ok(())
}

pub fn run_remove(id: String, assume_yes: bool, output: &Output) -> Result<()> {
    let ctx = AppContext::init()?;
    let id = MovieId::from(id);

    if !confirm(
        "Remove this movie from your watched list?",
        assume_yes || !output.is_human(),
    )? {
        output.info("Nothing removed");
        return Ok(());
    }

    match ctx.library.remove_from_watched(&id) {
        Ok(true) => output.success("Movie removed from watched list"),
        Ok(false) => output.info(format!("Movie {} is not in your watched list", id)),
        Err(e) => output.error(format!("Failed to remove movie: {}", e)),
    }
    Ok(())
}

pub fn run_rate(id: String, rating: u8, comment: Option<String>, output: &Output) -> Result<()> {
    let ctx = AppContext::init()?;
    let id = MovieId::from(id);

    match ctx
        .library
        .save_review(&id, rating, comment.as_deref().unwrap_or(""))
    {
        Ok(_) => output.success("Rating and review saved successfully!"),
        Err(e) => output.error(format!("Failed to save rating and review: {}", e)),
    }
    Ok(())
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", truncated)
}
