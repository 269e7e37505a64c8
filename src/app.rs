use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::SetTitle;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::{
    config::{ConfigLoader, SiteConfig, source_for_base},
    error::Result,
    nav::{IntersectionObserver, MenuController, ScrollSpy, Viewport},
    page::{Document, hydrate},
    ui::{Spinner, render_error_panel},
    view::{HEADER_HEIGHT, PageLayout, layout_page},
};

const STATUSBAR_HEIGHT: u16 = 4;

/// Where the configuration fetch currently stands. While `Pending` the
/// page renders with its template text; `Failed` replaces the whole frame
/// with the error panel.
#[derive(Debug)]
enum Hydration {
    Pending,
    Ready,
    Failed { location: String, message: String },
}

#[derive(Debug)]
struct ConfigMessage {
    location: String,
    result: Result<SiteConfig>,
}

pub struct App {
    running: bool,
    base: String,

    document: Document,
    layout: PageLayout,
    menu: MenuController,
    spy: ScrollSpy,
    observer: IntersectionObserver,

    hydration: Hydration,
    spinner: Spinner,
    scroll_offset: u16,
    width: u16,
    height: u16,

    needs_render: bool,
    config_receiver: Option<mpsc::Receiver<ConfigMessage>>,
}

impl App {
    pub fn new(base: String) -> Self {
        let document = Document::housing_onepager();
        let menu = MenuController::bind(&document);
        let spy = ScrollSpy::bind(&document);
        let observer = IntersectionObserver::new(HEADER_HEIGHT);

        Self {
            running: false,
            base,
            document,
            layout: PageLayout::default(),
            menu,
            spy,
            observer,
            hydration: Hydration::Pending,
            spinner: Spinner::new(),
            scroll_offset: 0,
            width: 0,
            height: 0,
            needs_render: true, // Initial render needed
            config_receiver: None,
        }
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        self.running = true;

        let size = terminal.size()?;
        self.resize(size.width, size.height);
        self.apply_title()?;

        self.spawn_config_fetch();

        while self.running {
            // Check for the fetch result from the background task
            self.check_config_updates()?;

            // Only render if needed (state changed, user input, etc.)
            if self.needs_render {
                terminal.draw(|frame| self.render(frame))?;
                self.needs_render = false;
            }

            // Poll for user input with timeout
            if let Ok(true) = event::poll(std::time::Duration::from_millis(100)) {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    Event::Resize(width, height) => self.resize(width, height),
                    _ => {}
                }
            } else if matches!(self.hydration, Hydration::Pending) {
                self.spinner.advance();
                self.needs_render = true;
            }
        }

        Ok(())
    }

    /// Kick off the single configuration fetch in the background. The
    /// result comes back over the channel so the input loop never blocks.
    fn spawn_config_fetch(&mut self) {
        let (tx, rx) = mpsc::channel(1);
        self.config_receiver = Some(rx);

        let base = self.base.clone();
        tokio::spawn(async move {
            let source = source_for_base(&base);
            let location = source.location();
            debug!("Fetching site configuration from {}", location);

            let result = ConfigLoader::load(source.as_ref()).await;
            let _ = tx.send(ConfigMessage { location, result }).await;
        });
    }

    fn check_config_updates(&mut self) -> Result<()> {
        let Some(receiver) = &mut self.config_receiver else {
            return Ok(());
        };
        let Ok(msg) = receiver.try_recv() else {
            return Ok(());
        };
        self.config_receiver = None;

        match msg.result {
            Ok(config) => {
                self.apply_config(&config);
                self.apply_title()?;
            }
            Err(e) => {
                error!("Could not load config data from {}: {}", msg.location, e);
                self.hydration = Hydration::Failed {
                    location: msg.location,
                    message: e.to_string(),
                };
            }
        }
        self.needs_render = true;
        Ok(())
    }

    fn apply_config(&mut self, config: &SiteConfig) {
        hydrate(&mut self.document, config);
        self.hydration = Hydration::Ready;
        self.relayout();
    }

    fn apply_title(&self) -> Result<()> {
        crossterm::execute!(std::io::stdout(), SetTitle(&self.document.title))?;
        Ok(())
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.relayout();
    }

    /// Rebuild the flattened page for the current width, then re-subscribe
    /// the observer to the fresh extents and poll immediately so the
    /// active link survives the relayout.
    fn relayout(&mut self) {
        let content_width = self.width.saturating_sub(2);
        self.layout = layout_page(&self.document, content_width);
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
        self.observer.observe(self.layout.extents.clone());
        self.poll_sections();
        self.needs_render = true;
    }

    fn viewport(&self) -> Viewport {
        Viewport {
            top: self.scroll_offset,
            height: self.height,
        }
    }

    fn poll_sections(&mut self) {
        let batch = self.observer.poll(self.viewport());
        self.spy.apply_batch(&batch);
    }

    fn content_height(&self) -> u16 {
        self.height.saturating_sub(HEADER_HEIGHT + STATUSBAR_HEIGHT)
    }

    fn max_scroll(&self) -> u16 {
        self.layout.height().saturating_sub(self.content_height())
    }

    fn scroll_to(&mut self, row: u16) {
        if self.menu.scroll_locked() {
            return;
        }
        self.scroll_offset = row.min(self.max_scroll());
        self.poll_sections();
        self.needs_render = true;
    }

    fn scroll_by(&mut self, delta: i32) {
        let target = (i32::from(self.scroll_offset) + delta).max(0);
        self.scroll_to(target.min(i32::from(self.max_scroll())) as u16);
    }

    /// Activate the n-th nav link: close the menu if it is open, then
    /// scroll so the section starts right below the header.
    fn activate_link(&mut self, index: usize) {
        let Some(fragment) = self
            .document
            .nav
            .as_ref()
            .and_then(|nav| nav.links.get(index))
            .map(|link| link.fragment.clone())
        else {
            return;
        };

        self.menu.link_activated();
        if let Some(extent) = self.layout.extents.iter().find(|e| e.id == fragment) {
            self.scroll_to(extent.top);
        }
        self.needs_render = true;
    }

    fn toggle_menu(&mut self) {
        self.menu.toggle();
        debug!(
            "Menu toggled, aria-expanded={}",
            self.menu.aria_expanded()
        );
        self.needs_render = true;
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => {
                self.running = false;
                return;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
                return;
            }
            _ => {}
        }

        // Once the error panel is up, only the quit keys stay live.
        if matches!(self.hydration, Hydration::Failed { .. }) {
            if key.code == KeyCode::Esc {
                self.running = false;
            }
            return;
        }

        // While the overlay is open it captures movement keys, and page
        // scrolling stays suppressed.
        if self.menu.is_open() {
            match key.code {
                KeyCode::Char('j') | KeyCode::Down => {
                    self.menu.select_next();
                    self.needs_render = true;
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    self.menu.select_prev();
                    self.needs_render = true;
                }
                KeyCode::Enter => self.activate_link(self.menu.selected()),
                KeyCode::Char('m') | KeyCode::Tab => self.toggle_menu(),
                KeyCode::Esc => {
                    self.menu.close();
                    self.needs_render = true;
                }
                KeyCode::Char(c @ '1'..='9') => {
                    self.activate_link(c as usize - '1' as usize);
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.scroll_by(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_by(-1),
            KeyCode::PageDown | KeyCode::Char(' ') => {
                self.scroll_by(i32::from(self.content_height()));
            }
            KeyCode::PageUp => self.scroll_by(-i32::from(self.content_height())),
            KeyCode::Char('g') | KeyCode::Home => self.scroll_to(0),
            KeyCode::Char('G') | KeyCode::End => self.scroll_to(self.max_scroll()),
            KeyCode::Char('m') | KeyCode::Tab => self.toggle_menu(),
            KeyCode::Char(c @ '1'..='9') => self.activate_link(c as usize - '1' as usize),
            KeyCode::Esc => self.running = false,
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        if let Hydration::Failed { location, message } = &self.hydration {
            render_error_panel(frame, area, location, message);
            return;
        }

        let chunks = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT), // Fixed header
            Constraint::Min(0),                // Page content
            Constraint::Length(STATUSBAR_HEIGHT), // Status bar
        ])
        .split(area);

        self.render_header(frame, chunks[0]);
        self.render_content(frame, chunks[1]);
        self.render_statusbar(frame, chunks[2]);

        // Render the menu overlay on top if open
        if self.menu.is_open() {
            self.render_menu_overlay(frame, area);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let Some(header) = &self.document.header else {
            return;
        };

        let mut brand_spans = vec![Span::styled(
            header.brand.content(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )];
        if header.toggle.is_some() && self.menu.is_enabled() {
            let glyph = if self.menu.toggle_active() { "×" } else { "≡" };
            brand_spans.push(Span::styled(
                format!("  [{}]", glyph),
                Style::default().fg(Color::Yellow),
            ));
        }

        let mut nav_spans = Vec::new();
        if let Some(nav) = &self.document.nav {
            for (idx, link) in nav.links.iter().enumerate() {
                if idx > 0 {
                    nav_spans.push(Span::raw("   "));
                }
                let style = if self.spy.active() == Some(link.fragment.as_str()) {
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                nav_spans.push(Span::styled(format!("{} {}", idx + 1, link.label), style));
            }
        }

        let page_header = Paragraph::new(vec![Line::from(brand_spans), Line::from(nav_spans)])
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(page_header, area);
    }

    fn render_content(&self, frame: &mut Frame, area: Rect) {
        let inner = area.inner(Margin {
            horizontal: 1,
            vertical: 0,
        });
        let top = usize::from(self.scroll_offset);
        let bottom = (top + usize::from(inner.height)).min(self.layout.lines.len());
        let visible = if top < bottom {
            self.layout.lines[top..bottom].to_vec()
        } else {
            Vec::new()
        };

        frame.render_widget(Paragraph::new(visible), inner);
    }

    fn render_statusbar(&self, frame: &mut Frame, area: Rect) {
        let state_info = if matches!(self.hydration, Hydration::Pending) {
            format!("{} Loading configuration", self.spinner.current_char())
        } else {
            format!(
                "Line {}/{}",
                self.scroll_offset + 1,
                self.layout.height().max(1)
            )
        };

        let link_count = self.document.nav.as_ref().map_or(0, |n| n.links.len());
        let hints = if self.menu.is_open() {
            String::from("j/k: Move  |  Enter: Open  |  m/ESC: Close  |  q: Quit")
        } else if self.menu.is_enabled() {
            format!(
                "j/k: Scroll  |  Space: Page  |  g/G: Top/Bottom  |  1-{}: Jump  |  m: Menu  |  q: Quit",
                link_count
            )
        } else {
            String::from("j/k: Scroll  |  Space: Page  |  g/G: Top/Bottom  |  q: Quit")
        };

        let nav_line = Line::from(vec![
            Span::styled(
                state_info,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::styled(hints, Style::default().fg(Color::White)),
        ]);

        let section_line = match self.active_link_label() {
            Some(label) => Line::from(vec![
                Span::styled("Section: ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    label,
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            None => Line::from(""),
        };

        let status = Paragraph::new(vec![nav_line, section_line])
            .style(Style::default().fg(Color::White))
            .block(Block::default().borders(Borders::ALL).title("Status"));

        frame.render_widget(status, area);
    }

    fn active_link_label(&self) -> Option<String> {
        let fragment = self.spy.active()?;
        self.document.nav.as_ref().and_then(|nav| {
            nav.links
                .iter()
                .find(|link| link.fragment == fragment)
                .map(|link| link.label.clone())
        })
    }

    fn render_menu_overlay(&self, frame: &mut Frame, area: Rect) {
        let Some(nav) = &self.document.nav else {
            return;
        };

        let popup_width = 36.min(area.width.saturating_sub(4));
        let popup_height = (nav.links.len() as u16 + 5).min(area.height.saturating_sub(2));
        let popup_x = (area.width.saturating_sub(popup_width)) / 2;
        let popup_y = (area.height.saturating_sub(popup_height)) / 2;

        let popup_area = Rect {
            x: popup_x,
            y: popup_y,
            width: popup_width,
            height: popup_height,
        };

        // Clear the background area to hide content behind
        frame.render_widget(Clear, popup_area);

        let mut menu_lines = vec![Line::from("")];
        for (idx, link) in nav.links.iter().enumerate() {
            let selected = idx == self.menu.selected();
            let style = if selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let marker = if selected { "▶" } else { " " };
            menu_lines.push(Line::from(Span::styled(
                format!(" {} {} {}", marker, idx + 1, link.label),
                style,
            )));
        }
        menu_lines.push(Line::from(""));
        menu_lines.push(Line::from(Span::styled(
            " Enter: Open  ESC: Close",
            Style::default().fg(Color::DarkGray),
        )));

        let menu_box = Paragraph::new(menu_lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .style(Style::default().bg(Color::Black))
                .title("Navigation"),
        );

        frame.render_widget(menu_box, popup_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PageError;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        let mut app = App::new(String::from("."));
        app.resize(40, 24);
        app
    }

    #[test]
    fn test_digit_jumps_to_section_top() {
        let mut app = app();
        let target = app.layout.extents[1].top;

        app.handle_key(key(KeyCode::Char('2')));
        assert_eq!(app.scroll_offset, target.min(app.max_scroll()));
    }

    #[test]
    fn test_open_menu_captures_movement_keys() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('m')));
        assert!(app.menu.is_open());

        app.handle_key(key(KeyCode::Char('j')));
        assert_eq!(app.scroll_offset, 0);
        assert_eq!(app.menu.selected(), 1);
    }

    #[test]
    fn test_enter_activates_selected_link_and_closes_menu() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('m')));
        app.handle_key(key(KeyCode::Char('j')));
        app.handle_key(key(KeyCode::Enter));

        assert!(!app.menu.is_open());
        let target = app.layout.extents[1].top;
        assert_eq!(app.scroll_offset, target.min(app.max_scroll()));
    }

    #[test]
    fn test_esc_closes_menu_before_quitting() {
        let mut app = app();
        app.running = true;

        app.handle_key(key(KeyCode::Char('m')));
        app.handle_key(key(KeyCode::Esc));
        assert!(!app.menu.is_open());
        assert!(app.running);

        app.handle_key(key(KeyCode::Esc));
        assert!(!app.running);
    }

    #[test]
    fn test_scroll_clamps_at_document_end() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('G')));
        assert_eq!(app.scroll_offset, app.max_scroll());

        app.handle_key(key(KeyCode::Char('j')));
        assert_eq!(app.scroll_offset, app.max_scroll());
    }

    #[test]
    fn test_failed_hydration_ignores_everything_but_quit() {
        let mut app = app();
        app.running = true;
        app.hydration = Hydration::Failed {
            location: String::from("./config.json"),
            message: String::from("boom"),
        };

        app.handle_key(key(KeyCode::Char('j')));
        assert_eq!(app.scroll_offset, 0);
        app.handle_key(key(KeyCode::Char('m')));
        assert!(!app.menu.is_open());

        app.handle_key(key(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn test_fetch_error_becomes_the_failed_state() {
        let mut app = app();
        let (tx, rx) = mpsc::channel(1);
        app.config_receiver = Some(rx);
        app.needs_render = false;
        tx.try_send(ConfigMessage {
            location: String::from("https://example.org/config.json"),
            result: Err(PageError::ConfigFetch {
                status: 404,
                location: String::from("https://example.org/config.json"),
            }),
        })
        .unwrap();

        app.check_config_updates().unwrap();

        let Hydration::Failed { location, message } = &app.hydration else {
            panic!("expected failed hydration");
        };
        assert_eq!(location, "https://example.org/config.json");
        assert!(message.contains("404"));
        assert!(app.needs_render);
        // One-shot delivery: the channel is gone after the first message.
        assert!(app.config_receiver.is_none());
    }

    #[test]
    fn test_fetched_config_hydrates_the_page() {
        let mut app = app();
        let (tx, rx) = mpsc::channel(1);
        app.config_receiver = Some(rx);
        let config: SiteConfig =
            serde_json::from_str(r#"{"data-lastname": "Schmidt", "data-city": "Leipzig"}"#)
                .unwrap();
        tx.try_send(ConfigMessage {
            location: String::from("./config.json"),
            result: Ok(config),
        })
        .unwrap();

        app.check_config_updates().unwrap();

        assert!(matches!(app.hydration, Hydration::Ready));
        assert_eq!(app.document.title, "Wohnungssuche: Familie Schmidt");
        assert_eq!(app.document.slot_text("data-city-jobcenter"), Some("Leipzig"));
    }
}
