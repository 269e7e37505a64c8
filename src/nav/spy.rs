//! Active-link tracking driven by band visibility batches.

use tracing::warn;

use crate::page::Document;

use super::observer::IntersectionEntry;

/// Keeps at most one navigation link marked active, following whichever
/// section currently occupies the band. The active marker lives here, not
/// on the links themselves.
#[derive(Debug, Default)]
pub struct ScrollSpy {
    fragments: Vec<String>,
    active: Option<String>,
    enabled: bool,
}

impl ScrollSpy {
    /// Bind to the document's nav links, sections and header. Missing any
    /// of the three disables the spy; every later call is then a no-op.
    pub fn bind(doc: &Document) -> Self {
        let Some(nav) = doc.nav.as_ref() else {
            warn!("Scroll spy disabled: no nav container in the document");
            return Self::default();
        };
        if doc.header.is_none() || doc.sections.is_empty() {
            warn!("Scroll spy disabled: header or sections missing");
            return Self::default();
        }
        Self {
            fragments: nav.links.iter().map(|l| l.fragment.clone()).collect(),
            active: None,
            enabled: true,
        }
    }

    /// Apply one transition batch. The last entry reporting a move *into*
    /// the band wins; the active marker is cleared and re-set to the link
    /// whose fragment matches that section. A batch with no entering
    /// section leaves the current marker untouched, and an entering
    /// section without a matching link clears it.
    pub fn apply_batch(&mut self, batch: &[IntersectionEntry]) {
        if !self.enabled {
            return;
        }
        let Some(entering) = batch.iter().rev().find(|e| e.is_intersecting) else {
            return;
        };
        self.active = self
            .fragments
            .iter()
            .find(|f| **f == entering.section_id)
            .cloned();
    }

    /// Fragment of the currently active link, if any.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
