//! Band visibility tracking for page sections.
//!
//! The observer watches section extents against the active band, the
//! screen-row interval starting below the fixed header and ending at the
//! vertical midpoint of the frame. Polling yields batches of visibility
//! transitions; re-subscribing restarts the sequence.

/// Scrolled row window over the laid-out document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// First document row visible below the header.
    pub top: u16,
    /// Full frame height in rows, header included.
    pub height: u16,
}

/// A section's row range in document coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionExtent {
    pub id: String,
    pub top: u16,
    pub height: u16,
}

impl SectionExtent {
    pub fn new(id: impl Into<String>, top: u16, height: u16) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }
}

/// One visibility transition reported by [`IntersectionObserver::poll`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntersectionEntry {
    pub section_id: String,
    pub is_intersecting: bool,
}

/// Pull-based observer over section/band intersection.
///
/// `observe` (re)subscribes to a section set and clears all remembered
/// statuses. Each `poll` compares the current band intersection of every
/// observed section against its remembered status and returns only the
/// transitions, in observation order. The first poll after a subscription
/// therefore reports every section's initial status; later polls return an
/// empty batch when nothing changed.
#[derive(Debug, Default)]
pub struct IntersectionObserver {
    header_height: u16,
    extents: Vec<SectionExtent>,
    states: Vec<Option<bool>>,
}

impl IntersectionObserver {
    pub fn new(header_height: u16) -> Self {
        Self {
            header_height,
            extents: Vec::new(),
            states: Vec::new(),
        }
    }

    /// Subscribe to a section extent list, replacing any previous one.
    /// All remembered statuses are cleared, so the next poll reports the
    /// full current picture.
    pub fn observe(&mut self, extents: Vec<SectionExtent>) {
        self.states = vec![None; extents.len()];
        self.extents = extents;
    }

    /// Report every visibility transition since the previous poll.
    pub fn poll(&mut self, viewport: Viewport) -> Vec<IntersectionEntry> {
        let mut batch = Vec::new();
        for (extent, state) in self.extents.iter().zip(self.states.iter_mut()) {
            let now = in_band(extent, viewport, self.header_height);
            if *state != Some(now) {
                *state = Some(now);
                batch.push(IntersectionEntry {
                    section_id: extent.id.clone(),
                    is_intersecting: now,
                });
            }
        }
        batch
    }
}

/// A section intersects when its screen rows overlap the band
/// `[header_height, frame_height / 2)`. Frames too short to leave a band
/// below the header intersect nothing.
fn in_band(extent: &SectionExtent, viewport: Viewport, header_height: u16) -> bool {
    let band_top = i32::from(header_height);
    let band_bottom = i32::from(viewport.height) / 2;
    if band_bottom <= band_top {
        return false;
    }
    let screen_top = band_top + i32::from(extent.top) - i32::from(viewport.top);
    let screen_bottom = screen_top + i32::from(extent.height);
    screen_top < band_bottom && screen_bottom > band_top
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extents() -> Vec<SectionExtent> {
        vec![
            SectionExtent::new("ueber-uns", 0, 8),
            SectionExtent::new("wohnungswunsch", 8, 10),
            SectionExtent::new("kontakt", 18, 6),
        ]
    }

    fn viewport(top: u16) -> Viewport {
        // Header of 4 rows, band [4, 15).
        Viewport { top, height: 30 }
    }

    #[test]
    fn test_first_poll_reports_initial_statuses() {
        let mut observer = IntersectionObserver::new(4);
        observer.observe(extents());

        let batch = observer.poll(viewport(0));
        assert_eq!(batch.len(), 3);
        assert_eq!(batch[0].section_id, "ueber-uns");
        assert!(batch[0].is_intersecting);
        assert!(batch[1].is_intersecting);
        assert!(!batch[2].is_intersecting);
    }

    #[test]
    fn test_later_polls_report_only_transitions() {
        let mut observer = IntersectionObserver::new(4);
        observer.observe(extents());
        observer.poll(viewport(0));

        assert!(observer.poll(viewport(0)).is_empty());

        // Scrolling far enough pushes the first section out of the band
        // and pulls the last one in.
        let batch = observer.poll(viewport(12));
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].section_id, "ueber-uns");
        assert!(!batch[0].is_intersecting);
        assert_eq!(batch[1].section_id, "kontakt");
        assert!(batch[1].is_intersecting);
    }

    #[test]
    fn test_observe_restarts_the_sequence() {
        let mut observer = IntersectionObserver::new(4);
        observer.observe(extents());
        observer.poll(viewport(0));
        assert!(observer.poll(viewport(0)).is_empty());

        observer.observe(extents());
        assert_eq!(observer.poll(viewport(0)).len(), 3);
    }

    #[test]
    fn test_band_boundaries_are_half_open() {
        let mut observer = IntersectionObserver::new(4);
        // Band is [4, 15). Scrolled to row 6: a section ending exactly at
        // the band top is out, one starting exactly at the band bottom is
        // out, one row inside is in.
        observer.observe(vec![
            SectionExtent::new("ends-at-band-top", 2, 4),
            SectionExtent::new("starts-at-band-bottom", 17, 5),
            SectionExtent::new("inside", 12, 1),
        ]);

        let batch = observer.poll(viewport(6));
        let status: Vec<bool> = batch.iter().map(|e| e.is_intersecting).collect();
        assert_eq!(status, vec![false, false, true]);
    }

    #[test]
    fn test_tiny_frame_has_no_band() {
        let mut observer = IntersectionObserver::new(4);
        observer.observe(extents());

        // Midpoint (3) sits above the header bottom (4): empty band.
        let batch = observer.poll(Viewport { top: 0, height: 7 });
        assert!(batch.iter().all(|e| !e.is_intersecting));
    }
}
