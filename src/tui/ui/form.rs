//! Patient input form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::domain::{
    AgeGroup, Category, Gender, NumericRange, PatientForm, ResidenceType, SmokingStatus,
    WorkType, YesNo, AVG_GLUCOSE_RANGE, BMI_RANGE,
};
use crate::tui::styles::ClinicalTheme;

/// Form fields in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Gender,
    AgeGroup,
    Hypertension,
    HeartDisease,
    EverMarried,
    WorkType,
    ResidenceType,
    AvgGlucose,
    Bmi,
    SmokingStatus,
}

pub const FIELDS: [Field; 10] = [
    Field::Gender,
    Field::AgeGroup,
    Field::Hypertension,
    Field::HeartDisease,
    Field::EverMarried,
    Field::WorkType,
    Field::ResidenceType,
    Field::AvgGlucose,
    Field::Bmi,
    Field::SmokingStatus,
];

impl Field {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Gender => "Gender",
            Self::AgeGroup => "Age Group",
            Self::Hypertension => "Hypertension",
            Self::HeartDisease => "Heart Disease",
            Self::EverMarried => "Ever Married",
            Self::WorkType => "Work Type",
            Self::ResidenceType => "Residence Type",
            Self::AvgGlucose => "Average Glucose Level",
            Self::Bmi => "BMI",
            Self::SmokingStatus => "Smoking Status",
        }
    }

    fn numeric(self) -> Option<(NumericRange, f64)> {
        match self {
            Self::AvgGlucose => Some((AVG_GLUCOSE_RANGE, 1.0)),
            Self::Bmi => Some((BMI_RANGE, 0.5)),
            _ => None,
        }
    }
}

/// Step through `[placeholder, options...]`, wrapping at both ends.
fn cycle<C: Category>(current: Option<C>, forward: bool) -> Option<C> {
    let len = C::ALL.len() + 1;
    let pos = current
        .and_then(|c| C::ALL.iter().position(|o| *o == c))
        .map_or(0, |i| i + 1);
    let next = if forward {
        (pos + 1) % len
    } else {
        (pos + len - 1) % len
    };
    next.checked_sub(1).map(|i| C::ALL[i])
}

fn display<C: Category>(value: Option<C>) -> (&'static str, bool) {
    match value {
        Some(v) => (v.label(), true),
        None => (C::PLACEHOLDER, false),
    }
}

fn format_number(value: f64) -> String {
    format!("{value:.1}")
}

/// Form screen state
pub struct PatientFormState {
    pub form: PatientForm,
    pub selected_field: usize,
    glucose_input: String,
    bmi_input: String,
    /// Recoverable problem with the last submit (unselected field, bad number)
    pub warning: Option<String>,
}

impl Default for PatientFormState {
    fn default() -> Self {
        let form = PatientForm::default();
        Self {
            glucose_input: format_number(form.avg_glucose_level()),
            bmi_input: format_number(form.bmi()),
            form,
            selected_field: 0,
            warning: None,
        }
    }
}

impl PatientFormState {
    #[must_use]
    pub fn current_field(&self) -> Field {
        FIELDS[self.selected_field]
    }

    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % FIELDS.len();
    }

    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = FIELDS.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    fn numeric_buffer(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::AvgGlucose => Some(&mut self.glucose_input),
            Field::Bmi => Some(&mut self.bmi_input),
            _ => None,
        }
    }

    /// Left/Right: pick the previous/next option, or step a numeric field.
    pub fn cycle_option(&mut self, forward: bool) {
        let field = self.current_field();
        let form = &mut self.form;
        match field {
            Field::Gender => form.gender = cycle::<Gender>(form.gender, forward),
            Field::AgeGroup => form.age_group = cycle::<AgeGroup>(form.age_group, forward),
            Field::Hypertension => {
                form.hypertension = cycle::<YesNo>(form.hypertension, forward)
            }
            Field::HeartDisease => {
                form.heart_disease = cycle::<YesNo>(form.heart_disease, forward)
            }
            Field::EverMarried => form.ever_married = cycle::<YesNo>(form.ever_married, forward),
            Field::WorkType => form.work_type = cycle::<WorkType>(form.work_type, forward),
            Field::ResidenceType => {
                form.residence_type = cycle::<ResidenceType>(form.residence_type, forward)
            }
            Field::SmokingStatus => {
                form.smoking_status = cycle::<SmokingStatus>(form.smoking_status, forward)
            }
            field @ (Field::AvgGlucose | Field::Bmi) => self.step_numeric(field, forward),
        }
        self.warning = None;
    }

    fn step_numeric(&mut self, field: Field, up: bool) {
        let Some((range, step)) = field.numeric() else {
            return;
        };
        let Some(buffer) = self.numeric_buffer(field) else {
            return;
        };
        let current = buffer.parse::<f64>().unwrap_or(range.default);
        let next = if up { current + step } else { current - step };
        buffer.zeroize();
        buffer.push_str(&format_number(next.clamp(range.min, range.max)));
    }

    /// Type into a numeric field. Ignored on option fields.
    pub fn input_char(&mut self, c: char) {
        let field = self.current_field();
        if let Some(buffer) = self.numeric_buffer(field) {
            if c.is_ascii_digit() || c == '.' {
                buffer.push(c);
                self.warning = None;
            }
        }
    }

    pub fn delete_char(&mut self) {
        let field = self.current_field();
        if let Some(buffer) = self.numeric_buffer(field) {
            buffer.pop();
        }
    }

    /// Reset the current field to its placeholder or default.
    pub fn clear_field(&mut self) {
        match self.current_field() {
            Field::Gender => self.form.gender = None,
            Field::AgeGroup => self.form.age_group = None,
            Field::Hypertension => self.form.hypertension = None,
            Field::HeartDisease => self.form.heart_disease = None,
            Field::EverMarried => self.form.ever_married = None,
            Field::WorkType => self.form.work_type = None,
            Field::ResidenceType => self.form.residence_type = None,
            Field::SmokingStatus => self.form.smoking_status = None,
            field @ (Field::AvgGlucose | Field::Bmi) => {
                let default = field.numeric().map(|(range, _)| range.default);
                if let (Some(default), Some(buffer)) = (default, self.numeric_buffer(field)) {
                    buffer.zeroize();
                    buffer.push_str(&format_number(default));
                }
            }
        }
    }

    /// Parse the numeric buffers into the form.
    ///
    /// # Errors
    /// Returns `StrokeError::Validation` for an unparsable or out-of-range number.
    pub fn commit(&mut self) -> crate::Result<&PatientForm> {
        let glucose = parse_field(&self.glucose_input, AVG_GLUCOSE_RANGE)?;
        let bmi = parse_field(&self.bmi_input, BMI_RANGE)?;
        self.form.set_avg_glucose_level(glucose)?;
        self.form.set_bmi(bmi)?;
        Ok(&self.form)
    }

    /// Wipe typed input and reset every field.
    ///
    /// Called after each assessment so nothing from the previous patient
    /// stays in the UI.
    pub fn clear_sensitive(&mut self) {
        self.glucose_input.zeroize();
        self.bmi_input.zeroize();
        *self = Self::default();
    }

    /// Load sample data for testing (the reference high-risk patient)
    pub fn load_sample_data(&mut self) {
        self.form.gender = Some(Gender::Female);
        self.form.age_group = Some(AgeGroup::Senior);
        self.form.hypertension = Some(YesNo::Yes);
        self.form.heart_disease = Some(YesNo::No);
        self.form.ever_married = Some(YesNo::Yes);
        self.form.work_type = Some(WorkType::Private);
        self.form.residence_type = Some(ResidenceType::Urban);
        self.form.smoking_status = Some(SmokingStatus::Smokes);
        self.glucose_input.zeroize();
        self.glucose_input.push_str(&format_number(250.0));
        self.bmi_input.zeroize();
        self.bmi_input.push_str(&format_number(35.0));
        self.warning = None;
    }

    fn value_of(&self, field: Field) -> (String, bool) {
        let (text, chosen) = match field {
            Field::Gender => display(self.form.gender),
            Field::AgeGroup => display(self.form.age_group),
            Field::Hypertension => display(self.form.hypertension),
            Field::HeartDisease => display(self.form.heart_disease),
            Field::EverMarried => display(self.form.ever_married),
            Field::WorkType => display(self.form.work_type),
            Field::ResidenceType => display(self.form.residence_type),
            Field::SmokingStatus => display(self.form.smoking_status),
            Field::AvgGlucose => return (self.glucose_input.clone(), true),
            Field::Bmi => return (self.bmi_input.clone(), true),
        };
        (text.to_string(), chosen)
    }
}

fn parse_field(input: &str, range: NumericRange) -> crate::Result<f64> {
    let value: f64 = input.trim().parse().map_err(|_| {
        crate::StrokeError::Validation(format!("{}: Invalid number", range.label))
    })?;
    range.check(value)
}

/// Render the patient form
pub fn render_patient_form(f: &mut Frame, area: Rect, state: &PatientFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(3), // Footer/warning
        ])
        .split(area);

    render_form_header(f, chunks[0]);
    render_form_fields(f, chunks[1], state);
    render_form_footer(f, chunks[2], state);
}

fn render_form_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", ClinicalTheme::text()),
        Span::styled("Heart Stroke Detection", ClinicalTheme::title()),
        Span::styled(
            " │ Enter patient details to predict stroke risk",
            ClinicalTheme::text_secondary(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(ClinicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &PatientFormState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let mid = FIELDS.len().div_ceil(2);
    render_field_column(f, columns[0], state, 0..mid);
    render_field_column(f, columns[1], state, mid..FIELDS.len());
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    state: &PatientFormState,
    indices: std::ops::Range<usize>,
) {
    let constraints: Vec<Constraint> = indices
        .clone()
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (row, index) in indices.enumerate() {
        let field = FIELDS[index];
        let is_selected = index == state.selected_field;
        let (value, chosen) = state.value_of(field);

        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", field.label()),
                if is_selected {
                    ClinicalTheme::focused()
                } else {
                    ClinicalTheme::text_secondary()
                },
            ))
            .borders(Borders::ALL)
            .border_style(if is_selected {
                ClinicalTheme::border_focused()
            } else {
                ClinicalTheme::border()
            });

        let value_style = if chosen {
            ClinicalTheme::text()
        } else {
            ClinicalTheme::text_muted()
        };
        let mut spans = vec![Span::raw(" ")];
        if is_selected {
            spans.push(Span::styled("◀ ", ClinicalTheme::cursor()));
        }
        spans.push(Span::styled(value, value_style));
        if is_selected {
            spans.push(Span::styled(" ▶", ClinicalTheme::cursor()));
        }

        f.render_widget(Paragraph::new(Line::from(spans)).block(block), chunks[row]);
    }
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &PatientFormState) {
    let content = if let Some(warning) = &state.warning {
        Line::from(vec![
            Span::styled("⚠ ", ClinicalTheme::warning()),
            Span::styled(warning.clone(), ClinicalTheme::warning()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", ClinicalTheme::key_hint()),
            Span::styled("Navigate ", ClinicalTheme::key_desc()),
            Span::styled("[←→] ", ClinicalTheme::key_hint()),
            Span::styled("Choose ", ClinicalTheme::key_desc()),
            Span::styled("[Enter] ", ClinicalTheme::key_hint()),
            Span::styled("Predict Stroke Risk ", ClinicalTheme::key_desc()),
            Span::styled("[S] ", ClinicalTheme::key_hint()),
            Span::styled("Sample ", ClinicalTheme::key_desc()),
            Span::styled("[Esc] ", ClinicalTheme::key_hint()),
            Span::styled("Quit", ClinicalTheme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(ClinicalTheme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_wraps_through_placeholder() {
        let mut value: Option<YesNo> = None;
        value = cycle(value, true);
        assert_eq!(value, Some(YesNo::No));
        value = cycle(value, true);
        assert_eq!(value, Some(YesNo::Yes));
        value = cycle(value, true);
        assert_eq!(value, None);
        assert_eq!(cycle::<YesNo>(None, false), Some(YesNo::Yes));
    }

    #[test]
    fn test_new_form_shows_placeholders() {
        let state = PatientFormState::default();
        assert_eq!(state.value_of(Field::Gender), ("Select Gender".to_string(), false));
        assert_eq!(state.value_of(Field::AvgGlucose), ("120.0".to_string(), true));
        assert!(state.form.collect().is_err());
    }

    #[test]
    fn test_sample_data_replaces_typed_numbers() {
        let mut state = PatientFormState::default();
        state.selected_field = 7; // Average Glucose
        state.input_char('9');
        state.load_sample_data();
        assert_eq!(state.value_of(Field::AvgGlucose), ("250.0".to_string(), true));
        assert_eq!(state.value_of(Field::Bmi), ("35.0".to_string(), true));
        assert!(state.commit().is_ok());
    }

    #[test]
    fn test_typing_only_touches_numeric_fields() {
        let mut state = PatientFormState::default();
        state.input_char('7');
        assert_eq!(state.form.gender, None);

        state.selected_field = 8; // BMI
        assert_eq!(state.current_field(), Field::Bmi);
        state.clear_field();
        assert_eq!(state.value_of(Field::Bmi).0, "25.0");
        for _ in 0..4 {
            state.delete_char();
        }
        state.input_char('2');
        state.input_char('3');
        state.input_char('x');
        assert_eq!(state.value_of(Field::Bmi).0, "23");
    }

    #[test]
    fn test_commit_rejects_out_of_range() {
        let mut state = PatientFormState::default();
        state.load_sample_data();
        state.glucose_input = "301".to_string();
        assert!(state.commit().is_err());
        state.glucose_input = "abc".to_string();
        assert!(state.commit().is_err());
        state.glucose_input = "250".to_string();
        let form = state.commit().expect("valid");
        assert!((form.avg_glucose_level() - 250.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_step_numeric_clamps() {
        let mut state = PatientFormState::default();
        state.selected_field = 7; // glucose
        state.glucose_input = "299.5".to_string();
        state.cycle_option(true);
        state.cycle_option(true);
        assert_eq!(state.glucose_input, "300.0");
    }

    #[test]
    fn test_clear_sensitive_resets_form() {
        let mut state = PatientFormState::default();
        state.load_sample_data();
        state.selected_field = 4;
        state.clear_sensitive();
        assert_eq!(state.selected_field, 0);
        assert_eq!(state.form, PatientForm::default());
        assert_eq!(state.bmi_input, "25.0");
    }
}
