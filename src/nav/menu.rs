//! The overlay menu state machine.

use tracing::warn;

use crate::page::Document;
use crate::page::document::{MAIN_NAV, MENU_TOGGLE};

/// Menu visibility. Everything the renderer shows for the menu (overlay,
/// toggle marker, `aria-expanded`, scroll lock) is a projection of this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Default)]
pub struct MenuController {
    state: MenuState,
    selected: usize,
    link_count: usize,
    enabled: bool,
}

impl MenuController {
    /// Bind to the toggle control and nav container by id. If either is
    /// absent the menu is disabled and every transition becomes a no-op.
    pub fn bind(doc: &Document) -> Self {
        let toggle_bound = doc
            .header
            .as_ref()
            .and_then(|h| h.toggle.as_ref())
            .is_some_and(|t| t.id == MENU_TOGGLE);
        let nav_bound = doc.nav.as_ref().is_some_and(|n| n.id == MAIN_NAV);
        if !toggle_bound || !nav_bound {
            warn!("Menu disabled: toggle control or nav container not found");
            return Self::default();
        }
        Self {
            state: MenuState::Closed,
            selected: 0,
            link_count: doc.nav.as_ref().map_or(0, |n| n.links.len()),
            enabled: true,
        }
    }

    /// Toggle activation: Closed -> Open -> Closed. Opening starts with
    /// the first link highlighted.
    pub fn toggle(&mut self) {
        if !self.enabled {
            return;
        }
        self.state = match self.state {
            MenuState::Closed => {
                self.selected = 0;
                MenuState::Open
            }
            MenuState::Open => MenuState::Closed,
        };
    }

    /// Link activation closes an open menu; while closed it has no
    /// menu-state effect.
    pub fn link_activated(&mut self) {
        if self.state == MenuState::Open {
            self.state = MenuState::Closed;
        }
    }

    pub fn close(&mut self) {
        self.state = MenuState::Closed;
    }

    pub fn select_next(&mut self) {
        if self.link_count == 0 {
            return;
        }
        self.selected = (self.selected + 1) % self.link_count;
    }

    pub fn select_prev(&mut self) {
        if self.link_count == 0 {
            return;
        }
        self.selected = (self.selected + self.link_count - 1) % self.link_count;
    }

    /// Index of the highlighted link while the overlay is open.
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn is_open(&self) -> bool {
        self.state == MenuState::Open
    }

    /// Marker shown on the toggle control itself.
    pub fn toggle_active(&self) -> bool {
        self.is_open()
    }

    /// Literal attribute value mirrored for assistive output.
    pub fn aria_expanded(&self) -> &'static str {
        if self.is_open() { "true" } else { "false" }
    }

    /// Page scrolling is suppressed while the overlay covers the content.
    pub fn scroll_locked(&self) -> bool {
        self.is_open()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
