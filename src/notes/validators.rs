use super::models::{CreateNoteRequest, UpdateNoteRequest};
use crate::common::validation::meets_min_len;
use crate::common::{ValidationResult, Validator};

pub const MIN_NOTES_LEN: usize = 3;
pub const MIN_TITLE_LEN: usize = 3;

fn validate_note_fields(notes: &str, title: Option<&str>) -> ValidationResult {
    let mut result = ValidationResult::new();

    if !meets_min_len(notes, MIN_NOTES_LEN) {
        result.add_error("notes", "Notes is too short");
    }

    if let Some(title) = title {
        if !meets_min_len(title, MIN_TITLE_LEN) {
            result.add_error("title", "Title is too short");
        }
    }

    result
}

impl Validator<CreateNoteRequest> for CreateNoteRequest {
    fn validate(&self, data: &CreateNoteRequest) -> ValidationResult {
        validate_note_fields(&data.notes, data.title.as_deref())
    }
}

impl Validator<UpdateNoteRequest> for UpdateNoteRequest {
    fn validate(&self, data: &UpdateNoteRequest) -> ValidationResult {
        let mut result = validate_note_fields(&data.notes, data.title.as_deref());

        if data.id.trim().is_empty() {
            result.add_error("id", "Notes ID not found");
        }

        result
    }
}
