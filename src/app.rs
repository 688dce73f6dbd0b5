//! Application state and core logic

use crate::config::DonationConfig;
use crate::error::SubmitError;
use crate::platform::is_shortcut;
use crate::service::{DonationClient, DonationServiceTrait};
use crate::state::{
    AppState, CreatedDonation, DonationWizard, DraftStorage, FileStorage, Form,
    FormSessionStore, Step, View, WizardForm,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

type SubmitOutcome = Result<CreatedDonation>;

/// Main application struct
pub struct App<S: DraftStorage = FileStorage> {
    /// Current application state
    pub state: AppState,
    /// The donation wizard and its persisted draft
    pub wizard: DonationWizard<S>,
    /// Focus and raw input of the wizard screen
    pub form: WizardForm,
    /// Donation service handle
    pub client: DonationClient,
    /// Whether the app should quit
    quit: bool,
    submit_tx: mpsc::UnboundedSender<SubmitOutcome>,
    submit_rx: mpsc::UnboundedReceiver<SubmitOutcome>,
    submit_task: Option<JoinHandle<()>>,
}

impl App<FileStorage> {
    /// Create a new App instance from the user's configuration
    pub async fn new(config: &DonationConfig) -> Result<Self> {
        let storage = FileStorage::new(config.draft_dir());
        tracing::info!("Using draft directory {}", storage.dir().display());

        let store = FormSessionStore::open(storage);
        let wizard = DonationWizard::new(store, config.validator());
        let client = DonationClient::with_history_file(config.history_file()).await?;

        Ok(Self::with_parts(wizard, client))
    }
}

impl<S: DraftStorage> App<S> {
    pub fn with_parts(wizard: DonationWizard<S>, client: DonationClient) -> Self {
        let (submit_tx, submit_rx) = mpsc::unbounded_channel();
        let mut form = WizardForm::new();
        form.enter_step(wizard.current_step(), wizard.draft());

        Self {
            state: AppState::default(),
            wizard,
            form,
            client,
            quit: false,
            submit_tx,
            submit_rx,
            submit_task: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message);
    }

    /// Handle keyboard input
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Clear any status messages on key press
        self.state.status_message = None;

        match self.state.current_view {
            View::Wizard => self.handle_wizard_key(key).await?,
            View::Donations => self.handle_donations_key(key).await?,
        }

        Ok(())
    }

    /// Handle keys in the wizard view
    async fn handle_wizard_key(&mut self, key: KeyEvent) -> Result<()> {
        if is_shortcut(key.modifiers) {
            match key.code {
                KeyCode::Char('a') => {
                    self.form.add_item(&mut self.wizard);
                }
                KeyCode::Char('d') => {
                    self.form.remove_item(&mut self.wizard);
                }
                KeyCode::Char('x') => self.cancel_wizard(),
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Tab => self.form.next_field(),
            KeyCode::BackTab => self.form.prev_field(),
            KeyCode::Enter => self.advance(),
            KeyCode::Esc => self.step_back().await,
            KeyCode::Left => {
                self.form.cycle(&mut self.wizard, false);
            }
            KeyCode::Right => {
                self.form.cycle(&mut self.wizard, true);
            }
            KeyCode::Char(' ') if !self.active_field_takes_text() => {
                self.form.activate(&mut self.wizard);
            }
            KeyCode::Char(c) => self.form.input_char(c, &mut self.wizard),
            KeyCode::Backspace => self.form.backspace(&mut self.wizard),
            _ => {}
        }
        Ok(())
    }

    fn active_field_takes_text(&self) -> bool {
        self.form
            .active_key()
            .map(|k| k.kind().accepts_text())
            .unwrap_or(false)
    }

    /// Enter: next step, or submit from the review step
    fn advance(&mut self) {
        if self.wizard.is_submitting() {
            return;
        }
        if self.wizard.current_step().is_last() {
            self.start_submit();
            return;
        }
        match self.wizard.next() {
            Ok(step) => self.form.enter_step(step, self.wizard.draft()),
            Err(errors) => {
                self.form.focus_first_error(&errors);
            }
        }
    }

    /// Esc: previous step, or leave to the listing from the first step
    async fn step_back(&mut self) {
        if self.wizard.is_submitting() {
            return;
        }
        if self.wizard.current_step().is_first() {
            self.show_donations().await;
            return;
        }
        let step = self.wizard.previous();
        self.form.enter_step(step, self.wizard.draft());
    }

    /// Drop the draft, aborting any submission in flight
    fn cancel_wizard(&mut self) {
        if let Some(task) = self.submit_task.take() {
            task.abort();
        }
        self.wizard.cancel();
        self.form.reset(self.wizard.current_step(), self.wizard.draft());
        self.state.status_message = Some("Donation draft discarded".to_string());
    }

    /// Run the final guard and hand the record to a background task
    fn start_submit(&mut self) {
        let record = match self.wizard.begin_submit() {
            Ok(record) => record,
            Err(SubmitError::Invalid(errors)) => {
                self.form.focus_first_error(&errors);
                return;
            }
            Err(e) => {
                tracing::debug!("Submit refused: {e}");
                return;
            }
        };

        let mut client = self.client.clone();
        let tx = self.submit_tx.clone();
        self.submit_task = Some(tokio::spawn(async move {
            let outcome = client.create_donation(&record).await;
            // Receiver is gone only when the app is shutting down
            let _ = tx.send(outcome);
        }));
    }

    /// Apply any submission outcome that has arrived
    pub async fn poll_submission(&mut self) {
        while let Ok(outcome) = self.submit_rx.try_recv() {
            self.apply_submit_outcome(outcome).await;
        }
    }

    async fn apply_submit_outcome(&mut self, outcome: SubmitOutcome) {
        self.submit_task = None;
        if !self.wizard.is_submitting() {
            // Cancelled while the request was out; the draft is already gone
            if let Ok(created) = &outcome {
                tracing::info!(id = %created.id, "Donation created after cancellation");
            }
            return;
        }

        match self.wizard.finish_submit(outcome) {
            Ok(created) => {
                self.form
                    .reset(self.wizard.current_step(), self.wizard.draft());
                self.show_donations().await;
                self.state.status_message = Some(format!("Donation {} submitted", created.id));
            }
            Err(e) => self.push_error(e.user_message()),
        }
    }

    /// Handle keys in the donations listing
    async fn handle_donations_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('n') => self.open_wizard(),
            KeyCode::Char('r') => self.refresh_donations().await,
            KeyCode::Down | KeyCode::Char('j') => {
                let count = self.state.donations.len();
                self.state.move_selection_down(count);
            }
            KeyCode::Up | KeyCode::Char('k') => self.state.move_selection_up(),
            _ => {}
        }
        Ok(())
    }

    /// Resume the wizard where the draft left off
    fn open_wizard(&mut self) {
        self.state.current_view = View::Wizard;
        self.form
            .enter_step(self.wizard.current_step(), self.wizard.draft());
    }

    async fn show_donations(&mut self) {
        self.state.current_view = View::Donations;
        self.state.reset_selection();
        self.refresh_donations().await;
    }

    async fn refresh_donations(&mut self) {
        match self.client.list_donations().await {
            Ok(donations) => self.state.set_donations(donations),
            Err(e) => self.push_error(format!("Failed to load donations: {e:#}")),
        }
    }

    pub fn current_step(&self) -> Step {
        self.wizard.current_step()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{
        local_today, Address, DraftPatch, FieldKey, FoodItem, FoodType, MemoryStorage,
        StepValidator, SubmissionState, TimeSlotId,
    };
    use anyhow::anyhow;
    use chrono::Days;
    use crossterm::event::KeyModifiers;

    fn app() -> App<MemoryStorage> {
        let store = FormSessionStore::open(MemoryStorage::new());
        App::with_parts(
            DonationWizard::new(store, StepValidator::default()),
            DonationClient::new(),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    async fn type_text(app: &mut App<MemoryStorage>, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
    }

    fn fill_complete_draft(app: &mut App<MemoryStorage>) {
        let tomorrow = local_today().checked_add_days(Days::new(1));
        let patch = DraftPatch::new()
            .food_type(FoodType::Perishable)
            .items(vec![FoodItem {
                name: "Apples".to_string(),
                category: "Produce".to_string(),
                quantity: "10".to_string(),
                unit: "lbs".to_string(),
                ..FoodItem::with_id("item-1")
            }])
            .pickup_address(Address {
                street: "1 Main St".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                zip: "62701".to_string(),
            })
            .pickup_date(tomorrow)
            .pickup_time_slot(Some(TimeSlotId::Morning))
            .terms_accepted(true);
        assert!(app.wizard.update_draft(patch));
    }

    async fn go_to_review(app: &mut App<MemoryStorage>) {
        for _ in 0..3 {
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
        }
        assert_eq!(app.current_step(), Step::Review);
    }

    #[tokio::test]
    async fn test_enter_on_invalid_step_stays_and_shows_errors() {
        let mut app = app();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();

        assert_eq!(app.current_step(), Step::FoodType);
        assert_eq!(app.wizard.errors().get("foodType"), Some("Please select a food type"));
    }

    #[tokio::test]
    async fn test_space_selects_food_type_and_enter_advances() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char(' '))).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();

        assert_eq!(app.wizard.draft().food_type, Some(FoodType::Perishable));
        assert_eq!(app.current_step(), Step::ItemDetails);
    }

    #[tokio::test]
    async fn test_add_item_and_type_name() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char(' '))).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();

        app.handle_key(ctrl('a')).await.unwrap();
        type_text(&mut app, "Bread loaf").await;

        assert_eq!(app.wizard.draft().items.len(), 1);
        assert_eq!(app.wizard.draft().items[0].name, "Bread loaf");
    }

    #[tokio::test]
    async fn test_invalid_items_focus_first_error() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char(' '))).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        app.handle_key(ctrl('a')).await.unwrap();
        type_text(&mut app, "Milk").await;

        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.current_step(), Step::ItemDetails);
        assert_eq!(app.form.active_key(), Some(FieldKey::ItemCategory(0)));
    }

    #[tokio::test]
    async fn test_esc_on_first_step_opens_listing_and_keeps_draft() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char(' '))).await.unwrap();
        app.handle_key(key(KeyCode::Esc)).await.unwrap();

        assert_eq!(app.state.current_view, View::Donations);
        assert_eq!(app.wizard.draft().food_type, Some(FoodType::Perishable));

        app.handle_key(key(KeyCode::Char('n'))).await.unwrap();
        assert_eq!(app.state.current_view, View::Wizard);
    }

    #[tokio::test]
    async fn test_esc_goes_back_a_step() {
        let mut app = app();
        fill_complete_draft(&mut app);
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        assert_eq!(app.current_step(), Step::FoodType);
        assert_eq!(app.state.current_view, View::Wizard);
    }

    #[tokio::test]
    async fn test_cancel_discards_draft() {
        let mut app = app();
        fill_complete_draft(&mut app);
        app.handle_key(key(KeyCode::Enter)).await.unwrap();

        app.handle_key(ctrl('x')).await.unwrap();
        assert_eq!(app.current_step(), Step::FoodType);
        assert!(app.wizard.draft().is_empty());
        assert_eq!(app.form.active_key(), Some(FieldKey::FoodType));
    }

    #[tokio::test]
    async fn test_submit_success_shows_listing() {
        let mut app = app();
        fill_complete_draft(&mut app);
        go_to_review(&mut app).await;

        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert!(app.wizard.is_submitting());

        let outcome = app.submit_rx.recv().await.unwrap();
        app.apply_submit_outcome(outcome).await;

        assert_eq!(app.state.current_view, View::Donations);
        assert_eq!(app.state.donations.len(), 1);
        assert!(app.wizard.draft().is_empty());
        assert_eq!(app.current_step(), Step::FoodType);
        assert!(app
            .state
            .status_message
            .as_deref()
            .is_some_and(|m| m.starts_with("Donation don-")));
    }

    #[tokio::test]
    async fn test_enter_while_pending_is_ignored() {
        let mut app = app();
        fill_complete_draft(&mut app);
        go_to_review(&mut app).await;

        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();

        let _ = app.submit_rx.recv().await.unwrap();
        assert!(app.submit_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_submit_failure_shows_error_dialog() {
        let mut app = app();
        fill_complete_draft(&mut app);
        go_to_review(&mut app).await;
        app.wizard.begin_submit().unwrap();

        app.apply_submit_outcome(Err(anyhow!("service unavailable"))).await;

        assert_eq!(
            app.state.current_error(),
            Some("Submission failed: service unavailable. Please try again.")
        );
        assert_eq!(
            app.wizard.submission(),
            &SubmissionState::Failed("service unavailable".to_string())
        );
        assert_eq!(app.current_step(), Step::Review);
        assert!(app.wizard.draft().terms_accepted);

        // Any of Enter/Esc dismisses the dialog before keys reach the wizard
        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        assert!(!app.state.has_errors());
        assert_eq!(app.current_step(), Step::Review);
    }

    #[tokio::test]
    async fn test_esc_while_pending_keeps_review_step() {
        let mut app = app();
        fill_complete_draft(&mut app);
        go_to_review(&mut app).await;
        app.wizard.begin_submit().unwrap();

        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        assert_eq!(app.current_step(), Step::Review);

        app.apply_submit_outcome(Err(anyhow!("service unavailable"))).await;
        assert_eq!(app.current_step(), Step::Review);
        assert!(app.state.has_errors());
    }

    #[tokio::test]
    async fn test_late_outcome_after_cancel_is_dropped() {
        let mut app = app();
        fill_complete_draft(&mut app);
        go_to_review(&mut app).await;
        app.wizard.begin_submit().unwrap();
        app.handle_key(ctrl('x')).await.unwrap();

        app.apply_submit_outcome(Err(anyhow!("too late"))).await;
        assert!(!app.state.has_errors());
        assert_eq!(app.state.current_view, View::Wizard);
    }

    #[tokio::test]
    async fn test_q_quits_from_listing_only() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('q'))).await.unwrap();
        assert!(!app.should_quit());

        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        app.handle_key(key(KeyCode::Char('q'))).await.unwrap();
        assert!(app.should_quit());
    }
}
