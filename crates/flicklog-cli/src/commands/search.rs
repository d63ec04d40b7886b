use super::AppContext;
use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use comfy_table::{presets::UTF8_FULL, Table};
use flicklog_models::{genre_name, MovieSummary};
use serde_json::json;

pub async fn run_search(query: String, output: &Output) -> Result<()> {
    let query = query.trim().to_string();
    if query.is_empty() {
        output.error("Search query cannot be empty");
        return Ok(());
    }

    let ctx = AppContext::init()?;
    let Some(client) = ctx.catalog_client(output)? else {
        return Ok(());
    };

    let results = match client.search(&query).await {
        Ok(results) => results,
        Err(e) => {
            // Search degrades to zero results on catalog failure; the error
            // is reported once and nothing local changes.
            output.error(format!("Failed to search movies: {}", e));
            return Ok(());
        }
    };

    if results.is_empty() {
        output.info("No movies found for your search");
        return Ok(());
    }

    render_results(&results, output);
    Ok(())
}

pub fn render_results(results: &[MovieSummary], output: &Output) {
    match output.format() {
        OutputFormat::Human => {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["ID", "Title", "Year", "Genres"]);
            for movie in results {
                table.add_row(vec![
                    movie.id.to_string(),
                    movie.title.clone(),
                    movie.release_year().unwrap_or("Unknown").to_string(),
                    genre_names(movie),
                ]);
            }
            output.println(table.to_string());
            output.info(format!("Found {} movies", results.len()));
        }
        _ => {
            output.json(&json!({
                "type": "search_results",
                "count": results.len(),
                "results": results,
            }));
        }
    }
}

fn genre_names(movie: &MovieSummary) -> String {
    if let Some(genres) = &movie.genres {
        return genres
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
    }
    movie
        .genre_ids
        .as_deref()
        .unwrap_or_default()
        .iter()
        .filter_map(|&code| genre_name(code))
        .collect::<Vec<_>>()
        .join(", ")
}
