//! Generic text binding: locate slots by id or class and set their text.
//! Side effects are confined to slot text; the document structure is never
//! mutated here.

use tracing::warn;

use super::document::Document;

impl Document {
    /// Set the text of the single slot with the given id. A missing id is
    /// non-fatal: it is logged and the binding is skipped. Returns whether
    /// a slot was written.
    pub fn set_text(&mut self, id: &str, text: &str) -> bool {
        match self.slots_mut().find(|slot| slot.id.as_deref() == Some(id)) {
            Some(slot) => {
                slot.text = text.to_string();
                true
            }
            None => {
                warn!("Element with id \"{}\" not found", id);
                false
            }
        }
    }

    /// Set the text of every slot carrying the given class. Zero matches is
    /// silently a no-op: classes are optional decorative hooks. Returns the
    /// number of slots written.
    pub fn set_text_by_class(&mut self, class: &str, text: &str) -> usize {
        let mut written = 0;
        for slot in self.slots_mut().filter(|slot| slot.has_class(class)) {
            slot.text = text.to_string();
            written += 1;
        }
        written
    }

    #[cfg(test)]
    pub fn slot_text(&self, id: &str) -> Option<&str> {
        self.slots()
            .find(|slot| slot.id.as_deref() == Some(id))
            .map(|slot| slot.text.as_str())
    }
}
