//! Risk assessment result view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::domain::{RiskAssessment, RiskLabel};
use crate::tui::styles::ClinicalTheme;

/// Result screen state
#[derive(Debug, Clone, Default)]
pub enum ResultState {
    /// Nothing assessed yet
    #[default]
    Idle,
    /// Assessment for the last submission
    Complete { assessment: RiskAssessment },
    /// The pipeline failed after validation passed
    Error { message: String },
}

/// Render the result screen
pub fn render_result(f: &mut Frame, area: Rect, state: &ResultState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_result_header(f, chunks[0]);
    match state {
        ResultState::Idle => render_idle(f, chunks[1]),
        ResultState::Complete { assessment } => render_assessment(f, chunks[1], assessment),
        ResultState::Error { message } => render_error(f, chunks[1], message),
    }
    render_result_footer(f, chunks[2], state);
}

fn render_result_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", ClinicalTheme::text()),
        Span::styled("Stroke Risk Assessment Result", ClinicalTheme::title()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(ClinicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_idle(f: &mut Frame, area: Rect) {
    let content = Paragraph::new(Line::from(Span::styled(
        "Enter patient details to begin",
        ClinicalTheme::text_muted(),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(ClinicalTheme::border()),
    );

    f.render_widget(content, area);
}

/// Lines of the result panel, in display order.
#[must_use]
pub fn assessment_lines(assessment: &RiskAssessment) -> Vec<String> {
    let icon = match assessment.label {
        RiskLabel::Elevated => "⚠",
        RiskLabel::Low => "✓",
    };
    vec![
        format!("{icon} {}", assessment.label.headline()),
        assessment.label.summary().to_string(),
        format!("Estimated Risk: {}", assessment.percent_display()),
        assessment.label.recommendation().to_string(),
    ]
}

fn render_assessment(f: &mut Frame, area: Rect, assessment: &RiskAssessment) {
    let label_style = ClinicalTheme::risk_label(assessment.label);
    let block = Block::default()
        .borders(Borders::LEFT)
        .border_style(label_style.add_modifier(Modifier::BOLD))
        .style(ClinicalTheme::risk_panel(assessment.label));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Message
            Constraint::Length(3), // Gauge
            Constraint::Min(0),
        ])
        .margin(1)
        .split(inner);

    let lines = assessment_lines(assessment);
    let message = Paragraph::new(vec![
        Line::from(Span::styled(
            lines[0].clone(),
            label_style.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(lines[1].clone(), ClinicalTheme::text())),
        Line::from(""),
        Line::from(Span::styled(
            lines[2].clone(),
            ClinicalTheme::text().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(lines[3].clone(), label_style)),
    ])
    .wrap(Wrap { trim: true });
    f.render_widget(message, chunks[0]);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(" Stroke Probability ", ClinicalTheme::text_secondary()))
                .borders(Borders::ALL)
                .border_style(ClinicalTheme::border()),
        )
        .gauge_style(label_style)
        .ratio(assessment.probability.clamp(0.0, 1.0))
        .label(assessment.percent_display());
    f.render_widget(gauge, chunks[1]);
}

fn render_error(f: &mut Frame, area: Rect, message: &str) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("! Assessment failed", ClinicalTheme::danger())),
        Line::from(""),
        Line::from(Span::styled(message, ClinicalTheme::text())),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(ClinicalTheme::danger()),
    );

    f.render_widget(content, area);
}

fn render_result_footer(f: &mut Frame, area: Rect, state: &ResultState) {
    let content = match state {
        ResultState::Error { .. } => Line::from(vec![
            Span::styled("[Enter] ", ClinicalTheme::key_hint()),
            Span::styled("Back to Form ", ClinicalTheme::key_desc()),
            Span::styled("[Esc] ", ClinicalTheme::key_hint()),
            Span::styled("Quit", ClinicalTheme::key_desc()),
        ]),
        _ => Line::from(vec![
            Span::styled("[Enter] ", ClinicalTheme::key_hint()),
            Span::styled("New Patient ", ClinicalTheme::key_desc()),
            Span::styled("[Esc] ", ClinicalTheme::key_hint()),
            Span::styled("Quit", ClinicalTheme::key_desc()),
        ]),
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(ClinicalTheme::border()),
    );

    f.render_widget(footer, area);
}
