//! Error modeling for board events surfaced in the desktop GUI.

use shared::error::{BoardError, ErrorCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Validation,
    NotFound,
    Conflict,
    Queue,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    event: &'static str,
    message: String,
}

impl UiError {
    pub fn from_board_error(event: &'static str, err: &BoardError) -> Self {
        let category = match err.code() {
            ErrorCode::Validation => UiErrorCategory::Validation,
            ErrorCode::NotFound => UiErrorCategory::NotFound,
            ErrorCode::Conflict => UiErrorCategory::Conflict,
        };
        Self {
            category,
            event,
            message: err.to_string(),
        }
    }

    pub fn queue(event: &'static str, message: impl Into<String>) -> Self {
        Self {
            category: UiErrorCategory::Queue,
            event,
            message: message.into(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn event(&self) -> &'static str {
        self.event
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Banner text shown to the user.
    pub fn banner_text(&self) -> String {
        format!("{}: {}", err_label(self.category), self.message)
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Validation => "Invalid input",
        UiErrorCategory::NotFound => "Missing order",
        UiErrorCategory::Conflict => "Nothing selected",
        UiErrorCategory::Queue => "Event queue",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_unknown_column_as_validation() {
        let err = UiError::from_board_error(
            "edit_submit",
            &BoardError::UnknownColumn("pantry".to_string()),
        );
        assert_eq!(err.category(), UiErrorCategory::Validation);
        assert_eq!(err.event(), "edit_submit");
        assert!(err.banner_text().starts_with("Invalid input: unknown column 'pantry'"));
    }

    #[test]
    fn classifies_missing_selection_as_conflict() {
        let err = UiError::from_board_error("edit_submit", &BoardError::NoOrderSelected);
        assert_eq!(err.category(), UiErrorCategory::Conflict);
        assert_eq!(err.message(), "no order is selected for editing");
    }
}
