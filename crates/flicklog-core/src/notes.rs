use chrono::NaiveDate;
use flicklog_models::NoteGenre;
use serde::Serialize;

const MIN_NOTES_LEN: usize = 10;
const MIN_NAME_LEN: usize = 2;

/// Unvalidated Movie Note form input.
#[derive(Debug, Clone, Default)]
pub struct NoteDraft {
    pub title: String,
    pub director: String,
    pub genre: Option<NoteGenre>,
    pub rating: u8,
    pub notes: String,
    pub watch_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a draft against the Movie Note rules. Empty result means valid;
/// nothing is persisted while any error remains.
pub fn validate(draft: &NoteDraft, today: NaiveDate) -> Vec<FieldError> {
    let mut errors = Vec::new();

    let title = draft.title.trim();
    if title.is_empty() {
        errors.push(FieldError::new("title", "Movie title is required"));
    } else if title.chars().count() < MIN_NAME_LEN {
        errors.push(FieldError::new(
            "title",
            "Movie title must be at least 2 characters",
        ));
    }

    let director = draft.director.trim();
    if director.is_empty() {
        errors.push(FieldError::new("director", "Director name is required"));
    } else if director.chars().count() < MIN_NAME_LEN {
        errors.push(FieldError::new(
            "director",
            "Director name must be at least 2 characters",
        ));
    }

    if draft.genre.is_none() {
        errors.push(FieldError::new("genre", "Genre is required"));
    }

    if draft.rating == 0 {
        errors.push(FieldError::new("rating", "Please provide a rating"));
    } else if draft.rating > 5 {
        errors.push(FieldError::new("rating", "Rating must be between 1 and 5"));
    }

    let notes = draft.notes.trim();
    if notes.is_empty() {
        errors.push(FieldError::new("notes", "Notes are required"));
    } else if notes.chars().count() < MIN_NOTES_LEN {
        errors.push(FieldError::new(
            "notes",
            "Notes must be at least 10 characters",
        ));
    }

    match draft.watch_date {
        None => errors.push(FieldError::new("watch_date", "Watch date is required")),
        Some(date) if date > today => errors.push(FieldError::new(
            "watch_date",
            "Watch date cannot be in the future",
        )),
        Some(_) => {}
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn valid_draft() -> NoteDraft {
        NoteDraft {
            title: "Heat".to_string(),
            director: "Michael Mann".to_string(),
            genre: Some(NoteGenre::Crime),
            rating: 5,
            notes: "The diner scene alone earns it.".to_string(),
            watch_date: Some(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()),
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert!(validate(&valid_draft(), today()).is_empty());
    }

    #[test]
    fn every_missing_field_is_reported() {
        let errors = validate(&NoteDraft::default(), today());
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["title", "director", "genre", "rating", "notes", "watch_date"]
        );
    }

    #[test]
    fn short_fields_are_rejected() {
        let mut draft = valid_draft();
        draft.title = "H".to_string();
        draft.notes = "too short".to_string(); // 9 chars
        let errors = validate(&draft, today());
        assert!(errors.iter().any(|e| e.field == "title"));
        assert!(errors.iter().any(|e| e.field == "notes"));
    }

    #[test]
    fn exactly_ten_note_characters_pass() {
        let mut draft = valid_draft();
        draft.notes = "0123456789".to_string();
        assert!(validate(&draft, today()).is_empty());
    }

    #[test]
    fn future_watch_date_is_rejected() {
        let mut draft = valid_draft();
        draft.watch_date = Some(NaiveDate::from_ymd_opt(2025, 6, 16).unwrap());
        let errors = validate(&draft, today());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "watch_date");
    }

    #[test]
    fn watch_date_today_is_allowed() {
        let mut draft = valid_draft();
        draft.watch_date = Some(today());
        assert!(validate(&draft, today()).is_empty());
    }
}
