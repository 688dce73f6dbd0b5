//! Application state definitions

use super::donation::Donation;
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// The four-step donation form
    #[default]
    Wizard,
    /// The donor's submitted donations
    Donations,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Wizard => "Donate Food",
            Self::Donations => "My Donations",
        }
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,

    // Data
    pub donations: Vec<Donation>,

    // Selection
    pub selected_index: usize,
    pub scroll_offset: usize,

    // Feedback
    pub status_message: Option<String>,
    errors: VecDeque<String>,
}

impl AppState {
    /// Move selection down
    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Reset selection
    pub fn reset_selection(&mut self) {
        self.selected_index = 0;
        self.scroll_offset = 0;
    }

    pub fn selected_donation(&self) -> Option<&Donation> {
        self.donations.get(self.selected_index)
    }

    /// Replace the listing, keeping the selection in range
    pub fn set_donations(&mut self, donations: Vec<Donation>) {
        self.donations = donations;
        if self.selected_index >= self.donations.len() {
            self.selected_index = self.donations.len().saturating_sub(1);
        }
    }

    /// Queue an error for the modal error dialog
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push_back(message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Error currently shown, oldest first
    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }
}
