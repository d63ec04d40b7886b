use super::AppContext;
use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use flicklog_catalog::{CatalogClient, DetailFetchGuard};
use flicklog_core::UserStatus;
use flicklog_models::{MovieDetail, MovieId};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde_json::json;
use std::time::Duration;

pub async fn run_show(id: String, output: &Output) -> Result<()> {
    let ctx = AppContext::init()?;
    let Some(client) = ctx.catalog_client(output)? else {
        return Ok(());
    };

    let Some(detail) = fetch_detail(&client, MovieId::from(id), output).await? else {
        return Ok(());
    };

    let status = ctx.library.status(&detail.id).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    render_detail(&detail, &status, output);
    Ok(())
}

/// Guarded detail fetch with the blocking loading indicator active for the
/// whole span between fetch-start and fetch-settle. A failure is reported
/// as a notification and yields None; nothing local changes.
pub async fn fetch_detail(
    client: &CatalogClient,
    id: MovieId,
    output: &Output,
) -> Result<Option<MovieDetail>> {
    let spinner = loading_spinner(output);
    let mut guard = DetailFetchGuard::new();
    let result = guard.load(client, id).await.map(|d| d.cloned());
    if let Some(spinner) = &spinner {
        spinner.finish_and_clear();
    }

    match result {
        Ok(detail) => Ok(detail),
        Err(e) => {
            output.error(format!("Failed to load movie details: {}", e));
            Ok(None)
        }
    }
}

fn loading_spinner(output: &Output) -> Option<ProgressBar> {
    if !output.is_human() || output.is_quiet() {
        return None;
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Loading movie details...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    Some(spinner)
}

pub fn render_detail(detail: &MovieDetail, status: &UserStatus, output: &Output) {
    if output.format() != OutputFormat::Human {
        output.json(&json!({
            "type": "movie_detail",
            "movie": detail,
            "in_watchlist": status.in_watchlist,
            "watched": status.watched,
        }));
        return;
    }

    let year = detail
        .release_date
        .as_deref()
        .and_then(|d| d.get(..4))
        .unwrap_or("Unknown");
    let genres = detail
        .genres
        .iter()
        .map(|g| g.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    output.println(format!("{} ({})", detail.title.bold(), year));
    if !genres.is_empty() {
        output.println(format!("Genres: {}", genres));
    }
    if !detail.overview.is_empty() {
        output.println("");
        output.println(&detail.overview);
    }
    output.println("");

    if status.in_watchlist {
        output.println(format!("{} This movie is in your watchlist", "●".blue()));
    }
    match &status.watched {
        Some(entry) => {
            output.println(format!("{} You've watched this movie", "✓".green()));
            if entry.is_rated() {
                output.println(format!(
                    "Your rating: {} ({}/5 stars)",
                    "★".repeat(entry.user_rating as usize).yellow(),
                    entry.user_rating
                ));
            }
            if !entry.user_comment.is_empty() {
                output.println(format!("Your review: {}", entry.user_comment));
            }
        }
        None if !status.in_watchlist => {
            output.println("Not in your library yet. Add it with `flicklog watchlist add`.");
        }
        None => {}
    }
}
