use super::prompts::confirm;
use super::AppContext;
use crate::output::{Output, OutputFormat};
use chrono::NaiveDate;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{presets::UTF8_FULL, Table};
use flicklog_core::{NoteDraft, NoteError};
use flicklog_models::NoteGenre;
use serde_json::json;

#[derive(Debug, Clone, clap::Args)]
pub struct NoteFields {
    /// Movie title
    #[arg(long)]
    pub title: Option<String>,

    /// Director name
    #[arg(long)]
    pub director: Option<String>,

    /// Genre (e.g. Drama, Science Fiction)
    #[arg(long)]
    pub genre: Option<String>,

    /// Rating from 1 to 5
    #[arg(long, default_value_t = 0)]
    pub rating: u8,

    /// Your notes (at least 10 characters)
    #[arg(long)]
    pub notes: Option<String>,

    /// Watch date (YYYY-MM-DD, not in the future)
    #[arg(long, value_name = "DATE")]
    pub watch_date: Option<String>,
}

impl NoteFields {
    /// Build an unvalidated draft; the library performs the field-level
    /// validation and blocks persistence until every error is resolved.
    fn into_draft(self, output: &Output) -> Result<NoteDraft> {
        let genre = match self.genre.as_deref() {
            Some(raw) => match raw.parse::<NoteGenre>() {
                Ok(genre) => Some(genre),
                Err(_) => {
                    let options: Vec<&str> = NoteGenre::ALL.iter().map(|g| g.as_str()).collect();
                    output.error(format!(
                        "Unknown genre \"{}\". Valid genres: {}",
                        raw,
                        options.join(", ")
                    ));
                    return Err(eyre!("invalid genre"));
                }
            },
            None => None,
        };

        let watch_date = match self.watch_date.as_deref() {
            Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => {
                    output.error(format!("Invalid watch date \"{}\", expected YYYY-MM-DD", raw));
                    return Err(eyre!("invalid watch date"));
                }
            },
            None => None,
        };

        Ok(NoteDraft {
            title: self.title.unwrap_or_default(),
            director: self.director.unwrap_or_default(),
            genre,
            rating: self.rating,
            notes: self.notes.unwrap_or_default(),
            watch_date,
        })
    }
}

pub fn run_list(output: &Output) -> Result<()> {
    let ctx = AppContext::init()?;
    let notes = ctx.library.notes().map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    if notes.is_empty() {
        output.info("No movie notes yet. Add one with `flicklog notes add`.");
        return Ok(());
    }

    match output.format() {
        OutputFormat::Human => {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["ID", "Title", "Director", "Genre", "Rating", "Watched"]);
            for note in &notes {
                table.add_row(vec![
                    note.id.to_string(),
                    note.title.clone(),
                    note.director.clone(),
                    note.genre.to_string(),
                    format!("{}/5", note.rating),
                    note.watch_date.to_string(),
                ]);
            }
            output.println(table.to_string());
            output.info(format!("{} movie notes", notes.len()));
        }
        _ => {
            output.json(&json!({
                "type": "movie_notes",
                "count": notes.len(),
                "notes": notes,
            }));
        }
    }
    Ok(())
}

pub fn run_add(fields: NoteFields, output: &Output) -> Result<()> {
    let ctx = AppContext::init()?;
    let draft = fields.into_draft(output)?;

    match ctx.library.add_note(draft) {
        Ok(note) => {
            output.success("Movie note added successfully!");
            output.info(format!("Note id: {}", note.id));
            Ok(())
        }
        Err(e) => report_note_error(e, output),
    }
}

pub fn run_edit(id: i64, fields: NoteFields, output: &Output) -> Result<()> {
    let ctx = AppContext::init()?;
    let draft = fields.into_draft(output)?;

    match ctx.library.update_note(id, draft) {
        Ok(_) => {
            output.success("Movie note updated successfully!");
            Ok(())
        }
        Err(e) => report_note_error(e, output),
    }
}

pub fn run_delete(id: i64, assume_yes: bool, output: &Output) -> Result<()> {
    let ctx = AppContext::init()?;

    if !confirm(
        "Are you sure you want to delete this movie note?",
        assume_yes || !output.is_human(),
    )? {
        output.info("Nothing deleted");
        return Ok(());
    }

    match ctx.library.delete_note(id) {
        Ok(true) => output.success("Movie note deleted successfully!"),
        Ok(false) => output.info(format!("No movie note with id {}", id)),
        Err(e) => output.error(format!("Failed to delete movie note: {}", e)),
    }
    Ok(())
}

fn report_note_error(error: NoteError, output: &Output) -> Result<()> {
    match error {
        NoteError::Invalid(field_errors) => {
            for field_error in &field_errors {
                output.error(format!("{}: {}", field_error.field, field_error.message));
            }
            output.error("Please fix the validation errors");
            Ok(())
        }
        NoteError::NotFound(id) => {
            output.error(format!("No movie note with id {}", id));
            Ok(())
        }
        NoteError::Storage(e) => {
            output.error(format!("Failed to save movie note: {}", e));
            Ok(())
        }
    }
}
