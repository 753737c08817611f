//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Service integration

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use crate::adapters::LogisticModel;
use crate::application::AssessmentService;
use crate::ports::StrokeClassifier;

use super::ui::{
    form::{render_patient_form, PatientFormState},
    render_disclaimer,
    result::{render_result, ResultState},
};

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    PatientForm,
    Result,
}

/// Main application state
pub struct App<C = LogisticModel>
where
    C: StrokeClassifier,
{
    /// Current screen
    screen: Screen,

    /// Whether the app should quit
    should_quit: bool,

    /// Assessment pipeline over the artifacts loaded at startup
    service: AssessmentService<C>,

    /// Shown under every screen
    model_description: String,

    patient_form_state: PatientFormState,

    result_state: ResultState,
}

impl<C> App<C>
where
    C: StrokeClassifier,
{
    /// Create the application around an already-loaded service.
    pub fn new(service: AssessmentService<C>) -> Self {
        Self {
            screen: Screen::PatientForm,
            should_quit: false,
            model_description: service.model_description(),
            service,
            patient_form_state: PatientFormState::default(),
            result_state: ResultState::default(),
        }
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Main loop
        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            // Handle input (short poll to stay responsive)
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn draw(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(f.area());

        match self.screen {
            Screen::PatientForm => render_patient_form(f, chunks[0], &self.patient_form_state),
            Screen::Result => render_result(f, chunks[0], &self.result_state),
        }

        render_disclaimer(f, chunks[1], &self.model_description);
    }

    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::PatientForm => self.handle_patient_form_key(key),
            Screen::Result => self.handle_result_key(key),
        }
    }

    fn handle_patient_form_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up | KeyCode::BackTab => {
                self.patient_form_state.prev_field();
            }
            KeyCode::Down | KeyCode::Tab => {
                self.patient_form_state.next_field();
            }
            KeyCode::Left => {
                self.patient_form_state.cycle_option(false);
            }
            KeyCode::Right => {
                self.patient_form_state.cycle_option(true);
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.patient_form_state.load_sample_data();
            }
            KeyCode::Char(c) => {
                self.patient_form_state.input_char(c);
            }
            KeyCode::Backspace => {
                self.patient_form_state.delete_char();
            }
            KeyCode::Delete => {
                self.patient_form_state.clear_field();
            }
            KeyCode::Enter => {
                self.submit_patient_form();
            }
            _ => {}
        }
    }

    fn handle_result_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.result_state = ResultState::Idle;
                self.screen = Screen::PatientForm;
            }
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn submit_patient_form(&mut self) {
        // Unselected fields are reported before any number problem
        let outcome = match self.patient_form_state.form.collect() {
            Err(incomplete) => {
                tracing::warn!(missing = ?incomplete.missing, "Submission blocked, fields unselected");
                Err(incomplete.into())
            }
            Ok(_) => match self.patient_form_state.commit() {
                Ok(form) => self.service.run(form),
                Err(e) => Err(e),
            },
        };

        match outcome {
            Ok(assessment) => {
                self.patient_form_state.clear_sensitive();
                self.result_state = ResultState::Complete { assessment };
                self.screen = Screen::Result;
            }
            // Unselected fields or a bad number: stay on the form
            Err(e) if e.is_recoverable() => {
                self.patient_form_state.warning = Some(e.to_string());
            }
            Err(e) => {
                tracing::error!("Assessment failed: {}", e);
                self.patient_form_state.clear_sensitive();
                self.result_state = ResultState::Error {
                    message: e.to_string(),
                };
                self.screen = Screen::Result;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EncodedFeatureVector, FeatureSchema, RiskLabel, SchemaPolicy, FEATURE_NAMES};
    use crate::ports::ClassifierError;
    use ratatui::backend::TestBackend;
    use std::sync::Arc;

    struct FixedClassifier(f64);

    impl StrokeClassifier for FixedClassifier {
        fn predict_proba(
            &self,
            _features: &EncodedFeatureVector,
        ) -> Result<[f64; 2], ClassifierError> {
            if self.0.is_nan() {
                return Err(ClassifierError::Inference("model crashed".to_string()));
            }
            Ok([1.0 - self.0, self.0])
        }

        fn describe(&self) -> String {
            "fixed".to_string()
        }
    }

    fn app(positive: f64) -> App<FixedClassifier> {
        let schema = Arc::new(FeatureSchema::new(FEATURE_NAMES).expect("valid schema"));
        let service = AssessmentService::new(
            Arc::new(FixedClassifier(positive)),
            schema,
            SchemaPolicy::ZeroFill,
        );
        App::new(service)
    }

    fn press(app: &mut App<FixedClassifier>, key: KeyCode) {
        app.handle_key(key, KeyModifiers::NONE);
    }

    #[test]
    fn test_submit_incomplete_form_warns() {
        let mut app = app(0.42);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.screen(), Screen::PatientForm);
        let warning = app.patient_form_state.warning.clone().expect("warning shown");
        assert!(warning.starts_with("Please select all fields before prediction"));
    }

    #[test]
    fn test_incomplete_warning_wins_over_bad_number() {
        let mut app = app(0.42);
        for _ in 0..7 {
            press(&mut app, KeyCode::Down);
        }
        for _ in 0..5 {
            press(&mut app, KeyCode::Backspace);
        }
        press(&mut app, KeyCode::Char('9'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.screen(), Screen::PatientForm);
        let warning = app.patient_form_state.warning.clone().expect("warning shown");
        assert!(warning.starts_with("Please select all fields before prediction"));
        assert!(warning.contains("Gender"));
    }

    #[test]
    fn test_bad_number_warns_once_fields_are_selected() {
        let mut app = app(0.42);
        press(&mut app, KeyCode::Char('s'));
        for _ in 0..7 {
            press(&mut app, KeyCode::Down);
        }
        for _ in 0..5 {
            press(&mut app, KeyCode::Backspace);
        }
        press(&mut app, KeyCode::Char('9'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.screen(), Screen::PatientForm);
        let warning = app.patient_form_state.warning.clone().expect("warning shown");
        assert!(!warning.starts_with("Please select"));
    }

    #[test]
    fn test_submit_sample_shows_elevated_result() {
        let mut app = app(0.42);
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.screen(), Screen::Result);
        match &app.result_state {
            ResultState::Complete { assessment } => {
                assert_eq!(assessment.label, RiskLabel::Elevated);
                assert_eq!(assessment.percent_display(), "42.00%");
            }
            other => panic!("unexpected result state: {other:?}"),
        }
        // Form is wiped for the next patient
        assert!(app.patient_form_state.form.gender.is_none());
    }

    #[test]
    fn test_classifier_failure_shows_error_view() {
        let mut app = app(f64::NAN);
        press(&mut app, KeyCode::Char('S'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.screen(), Screen::Result);
        assert!(matches!(app.result_state, ResultState::Error { .. }));

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen(), Screen::PatientForm);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app(0.1);
        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit());

        let mut app = app_on_result();
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit());
    }

    fn app_on_result() -> App<FixedClassifier> {
        let mut app = app(0.05);
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen(), Screen::Result);
        app
    }

    #[test]
    fn test_draw_both_screens() {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).expect("terminal");
        let mut app = app(0.05);
        terminal.draw(|f| app.draw(f)).expect("draw form");

        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Enter);
        terminal.draw(|f| app.draw(f)).expect("draw result");
    }
}
