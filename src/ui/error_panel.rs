use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Heading shown when the configuration could not be loaded.
pub const ERROR_HEADING: &str = "Fehler beim Laden der Seite";

/// Build the panel body: heading, German and English explanation, the
/// resolved resource location and the raw error message.
pub fn panel_lines(location: &str, message: &str) -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(Span::styled(
            ERROR_HEADING,
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(
            "Beim Laden der Konfiguration ist ein Fehler aufgetreten. Bitte prüfen Sie, \
             ob die Datei config.json unter dem angegebenen Pfad existiert und gültiges \
             JSON enthält."
                .to_string(),
        ),
        Line::from(""),
        Line::from(Span::styled(
            "The page configuration could not be loaded. Please check that config.json \
             exists at the location below and contains valid JSON."
                .to_string(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            location.to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Details: {}", message),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
    ]
}

/// Render the full-frame error panel. The caller renders nothing else, so
/// the page is completely replaced while the failure stands.
pub fn render_error_panel(frame: &mut Frame, area: Rect, location: &str, message: &str) {
    let panel = Paragraph::new(panel_lines(location, message))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );

    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(16),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(2),
            Constraint::Length(64.min(area.width)),
            Constraint::Min(2),
        ])
        .split(vertical_chunks[1]);

    frame.render_widget(panel, horizontal_chunks[1]);
}
