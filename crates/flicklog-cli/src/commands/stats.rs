use super::AppContext;
use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use flicklog_core::stats;
use owo_colors::OwoColorize;

pub fn run_stats(output: &Output) -> Result<()> {
    let ctx = AppContext::init()?;
    let watched = ctx.library.watched().map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    let watchlist = ctx.library.watchlist().map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    let stats = stats::compute(&watched, watchlist.len(), chrono::Utc::now());

    if output.format() != OutputFormat::Human {
        output.json(&serde_json::to_value(&stats)?);
        return Ok(());
    }

    output.println(format!("{}", "Your Movie Statistics".bold()));
    output.println("");
    output.println(format!("Total watched:   {}", stats.total_watched));
    output.println(format!("This week:       {}", stats.watched_this_week));
    output.println(format!("This month:      {}", stats.watched_this_month));
    output.println(format!("In watchlist:    {}", stats.total_watchlist));
    output.println("");
    output.println(format!(
        "Average rating:  {} ({} rated)",
        stats.average_rating, stats.rated_movies
    ));

    if stats.favorite_genres.is_empty() {
        if stats.total_watched > 0 {
            output.println("Favorite genres: genre data not available for your movies");
        } else {
            output.println("Favorite genres: watch more movies to see your favorites!");
        }
    } else {
        output.println("Favorite genres:");
        for (index, item) in stats.favorite_genres.iter().enumerate() {
            let crown = if index == 0 { " ♛" } else { "" };
            output.println(format!("  {} ({}){}", item.genre, item.count, crown));
        }
    }

    output.println(format!("Most active day: {}", stats.most_productive_day));
    Ok(())
}
