//! Single free-text note a clinician leaves for the patient.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SuggestionError {
    #[error("suggestion is empty; nothing was sent")]
    Empty,
}

#[derive(Debug, Clone, Default)]
pub struct SuggestionSlot {
    text: Option<String>,
}

impl SuggestionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored suggestion. Blank text is rejected and leaves the
    /// previous suggestion in place.
    pub fn write(&mut self, text: &str) -> Result<(), SuggestionError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SuggestionError::Empty);
        }
        self.text = Some(trimmed.to_string());
        Ok(())
    }

    pub fn read(&self) -> Option<&str> {
        self.text.as_deref()
    }
}
