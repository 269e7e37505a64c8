//! Flattens the document into styled terminal lines.
//!
//! The header is not part of the flattened column; it is rendered as a
//! fixed chunk above the content, so document row 0 is the first hero row
//! and section extents are measured in the same coordinates the scroll
//! offset uses.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::nav::SectionExtent;
use crate::page::Document;

/// Rendered height of the fixed header block, borders included. The band
/// used for active-section tracking starts right below this.
pub const HEADER_HEIGHT: u16 = 4;

/// One styled line per document row, plus the row ranges the sections
/// ended up occupying at this width.
#[derive(Debug, Default)]
pub struct PageLayout {
    pub lines: Vec<Line<'static>>,
    pub extents: Vec<SectionExtent>,
}

impl PageLayout {
    /// Total document height in rows.
    pub fn height(&self) -> u16 {
        self.lines.len() as u16
    }
}

/// Lay the page out at the given content width.
pub fn layout_page(doc: &Document, width: u16) -> PageLayout {
    let wrap_width = usize::from(width.max(16));
    let heading_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let quiet = Style::default().fg(Color::DarkGray);

    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut extents = Vec::new();

    for (idx, hero_line) in doc.hero.iter().enumerate() {
        let style = if idx == 0 {
            heading_style
        } else {
            Style::default()
        };
        for wrapped in wrap_text(&hero_line.content(), wrap_width) {
            lines.push(Line::from(Span::styled(wrapped, style)).centered());
        }
    }

    for section in &doc.sections {
        lines.push(Line::from(""));
        let start = lines.len();
        lines.push(Line::from(Span::styled("─".repeat(wrap_width), quiet)));
        lines.push(Line::from(Span::styled(
            section.heading.clone(),
            heading_style,
        )));
        lines.push(Line::from(""));
        for body_line in &section.body {
            for wrapped in wrap_text(&body_line.content(), wrap_width) {
                lines.push(Line::from(wrapped));
            }
        }
        extents.push(SectionExtent::new(
            section.id.clone(),
            start as u16,
            (lines.len() - start) as u16,
        ));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("─".repeat(wrap_width), quiet)));
    for footer_line in &doc.footer.lines {
        for wrapped in wrap_text(&footer_line.content(), wrap_width) {
            lines.push(Line::from(Span::styled(wrapped, quiet)).centered());
        }
    }

    PageLayout { lines, extents }
}

/// Word wrap using display width, so wide glyphs count for the columns
/// they occupy. Words wider than the line are split at glyph boundaries.
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;

    for word in text.split_whitespace() {
        let word_width = word.width();

        if word_width > max_width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            let mut chunk = String::new();
            let mut chunk_width = 0usize;
            for ch in word.chars() {
                let ch_width = ch.width().unwrap_or(0);
                if chunk_width + ch_width > max_width && !chunk.is_empty() {
                    lines.push(std::mem::take(&mut chunk));
                    chunk_width = 0;
                }
                chunk.push(ch);
                chunk_width += ch_width;
            }
            if !chunk.is_empty() {
                lines.push(chunk);
            }
            continue;
        }

        let needed = if current.is_empty() {
            word_width
        } else {
            word_width + 1
        };
        if current_width + needed <= max_width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_width += needed;
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current.push_str(word);
            current_width = word_width;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
