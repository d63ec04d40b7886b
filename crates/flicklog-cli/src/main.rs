use clap::{ArgAction, Parser, Subcommand};

mod commands;
mod logging;
mod output;

use commands::{clear, config, notes, profile, search, show, stats, watched, watchlist};

#[derive(Parser)]
#[command(name = "flicklog")]
#[command(about = "flicklog - track what you watch, rate it, and keep notes")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Skip confirmation prompts
    #[arg(short = 'y', long, global = true)]
    yes: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set the display name shown in your library (cosmetic, no real auth)
    Login {
        /// Display name
        username: String,
    },
    /// Clear the stored display name
    Logout,
    /// Show the current display name
    Whoami,
    /// Search the movie catalog by title
    Search {
        /// Title text to search for
        query: String,
    },
    /// Manage your watchlist
    Watchlist {
        #[command(subcommand)]
        cmd: WatchlistCommands,
    },
    /// Mark a movie as watched (moves it out of the watchlist)
    Watch {
        /// Catalog movie id
        id: String,
    },
    /// Manage your watched list
    Watched {
        #[command(subcommand)]
        cmd: WatchedCommands,
    },
    /// Rate and review a watched movie
    Rate {
        /// Catalog movie id
        id: String,

        /// Rating from 1 to 5 stars
        #[arg(long)]
        rating: u8,

        /// Review text
        #[arg(long)]
        comment: Option<String>,
    },
    /// Show full details for a movie, with your watch status and review
    Show {
        /// Catalog movie id
        id: String,
    },
    /// Show statistics derived from your watched list
    Stats,
    /// Keep freeform movie notes, independent of the watchlist
    Notes {
        #[command(subcommand)]
        cmd: NotesCommands,
    },
    /// View or change configuration
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
    /// Clear stored data
    Clear {
        /// Clear everything: library data and credentials
        #[arg(long, action = ArgAction::SetTrue)]
        all: bool,

        /// Clear watchlist, watched, and note collections
        #[arg(long, action = ArgAction::SetTrue)]
        library: bool,

        /// Clear the stored catalog API key
        #[arg(long, action = ArgAction::SetTrue)]
        credentials: bool,
    },
}

#[derive(Subcommand)]
enum WatchlistCommands {
    /// List everything on your watchlist
    List,
    /// Add a movie by catalog id, or pick one with --search
    Add {
        /// Catalog movie id
        id: Option<String>,

        /// Search the catalog and pick from the results
        #[arg(long, value_name = "QUERY", conflicts_with = "id")]
        search: Option<String>,
    },
    /// Remove a movie from the watchlist
    Remove {
        /// Catalog movie id
        id: String,
    },
}

#[derive(Subcommand)]
enum WatchedCommands {
    /// List everything you've watched
    List,
    /// Remove a movie from the watched list
    Remove {
        /// Catalog movie id
        id: String,
    },
}

#[derive(Subcommand)]
enum NotesCommands {
    /// List your movie notes
    List,
    /// Add a new movie note
    Add {
        #[command(flatten)]
        fields: notes::NoteFields,
    },
    /// Edit an existing movie note
    Edit {
        /// Note id
        id: i64,

        #[command(flatten)]
        fields: notes::NoteFields,
    },
    /// Delete a movie note
    Delete {
        /// Note id
        id: i64,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show,
    /// Store the catalog (TMDB) API key
    SetKey {
        /// API key (prompts when omitted)
        #[arg(long)]
        api_key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet, cli.log_file.clone())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "flicklog starting");

    match cli.command {
        Commands::Login { username } => profile::run_login(username, &output),
        Commands::Logout => profile::run_logout(&output),
        Commands::Whoami => profile::run_whoami(&output),
        Commands::Search { query } => search::run_search(query, &output).await,
        Commands::Watchlist { cmd } => match cmd {
            WatchlistCommands::List => watchlist::run_list(&output),
            WatchlistCommands::Add { id, search } => {
                watchlist::run_add(id, search, &output).await
            }
            WatchlistCommands::Remove { id } => watchlist::run_remove(id, cli.yes, &output),
        },
        Commands::Watch { id } => watched::run_watch(id, &output).await,
        Commands::Watched { cmd } => match cmd {
            WatchedCommands::List => watched::run_list(&output),
            WatchedCommands::Remove { id } => watched::run_remove(id, cli.yes, &output),
        },
        Commands::Rate {
            id,
            rating,
            comment,
        } => watched::run_rate(id, rating, comment, &output),
        Commands::Show { id } => show::run_show(id, &output).await,
        Commands::Stats => stats::run_stats(&output),
        Commands::Notes { cmd } => match cmd {
            NotesCommands::List => notes::run_list(&output),
            NotesCommands::Add { fields } => notes::run_add(fields, &output),
            NotesCommands::Edit { id, fields } => notes::run_edit(id, fields, &output),
            NotesCommands::Delete { id } => notes::run_delete(id, cli.yes, &output),
        },
        Commands::Config { cmd } => match cmd.unwrap_or(ConfigCommands::Show) {
            ConfigCommands::Show => config::run_show(&output),
            ConfigCommands::SetKey { api_key } => config::run_set_key(api_key, &output),
        },
        Commands::Clear {
            all,
            library,
            credentials,
        } => clear::run_clear(all, library, credentials, cli.yes, &output),
    }
}
