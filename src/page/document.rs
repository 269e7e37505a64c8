//! The static page model: a one-pager document whose text slots are filled
//! in by hydration. Structure mirrors the deployed site: fixed header with
//! brand, nav and menu toggle, a hero banner, id-addressed sections, footer.

/// A bindable text slot, addressable by id and/or classes.
#[derive(Debug, Clone, Default)]
pub struct Element {
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub text: String,
}

impl Element {
    /// Empty slot addressed by id.
    pub fn slot(id: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            ..Self::default()
        }
    }

    /// Empty slot addressed by class only (one of possibly many).
    pub fn classed(class: &str) -> Self {
        Self {
            classes: vec![class.to_string()],
            ..Self::default()
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// One run of a body line: static copy or a bindable slot.
#[derive(Debug, Clone)]
pub enum Run {
    Static(String),
    Slot(Element),
}

/// One line of page copy, a sequence of runs.
#[derive(Debug, Clone, Default)]
pub struct TextLine {
    pub runs: Vec<Run>,
}

impl TextLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// A line made of a single static run.
    pub fn plain(text: &str) -> Self {
        Self::new().text(text)
    }

    pub fn text(mut self, text: &str) -> Self {
        self.runs.push(Run::Static(text.to_string()));
        self
    }

    pub fn slot(mut self, element: Element) -> Self {
        self.runs.push(Run::Slot(element));
        self
    }

    /// Concatenated text content of the line.
    pub fn content(&self) -> String {
        self.runs
            .iter()
            .map(|run| match run {
                Run::Static(text) => text.as_str(),
                Run::Slot(element) => element.text.as_str(),
            })
            .collect()
    }

    pub fn slots(&self) -> impl Iterator<Item = &Element> {
        self.runs.iter().filter_map(|run| match run {
            Run::Slot(element) => Some(element),
            Run::Static(_) => None,
        })
    }

    pub fn slots_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.runs.iter_mut().filter_map(|run| match run {
            Run::Slot(element) => Some(element),
            Run::Static(_) => None,
        })
    }
}

/// The menu toggle control ("burger"). Carries no text of its own; its
/// rendered glyph and `aria-expanded` attribute are projections of the
/// menu controller's state.
#[derive(Debug, Clone)]
pub struct MenuToggle {
    pub id: String,
}

/// A navigation link targeting a section by its fragment id.
#[derive(Debug, Clone)]
pub struct NavLink {
    pub label: String,
    pub fragment: String,
}

impl NavLink {
    pub fn new(label: &str, fragment: &str) -> Self {
        Self {
            label: label.to_string(),
            fragment: fragment.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Nav {
    pub id: String,
    pub links: Vec<NavLink>,
}

/// The fixed page header: brand line plus the menu toggle control.
#[derive(Debug, Clone)]
pub struct Header {
    pub id: String,
    pub brand: TextLine,
    pub toggle: Option<MenuToggle>,
}

/// A top-level page section with a stable id, targeted by nav fragments.
#[derive(Debug, Clone)]
pub struct Section {
    pub id: String,
    pub heading: String,
    pub body: Vec<TextLine>,
}

#[derive(Debug, Clone, Default)]
pub struct Footer {
    pub lines: Vec<TextLine>,
}

/// The whole page. Fields are plain data; controllers and the renderer
/// hold their own state and treat the document as the thing they project
/// onto the terminal.
#[derive(Debug, Clone)]
pub struct Document {
    pub title: String,
    pub header: Option<Header>,
    pub nav: Option<Nav>,
    pub hero: Vec<TextLine>,
    pub sections: Vec<Section>,
    pub footer: Footer,
}

/// Element id of the fixed page header.
pub const MAIN_HEADER: &str = "main-header";
/// Element id of the navigation container.
pub const MAIN_NAV: &str = "main-nav";
/// Element id of the menu toggle control.
pub const MENU_TOGGLE: &str = "mobile-menu-toggle";
/// Class shared by every slot that mirrors the city value.
pub const CITY_CLASS: &str = "data-city-dynamic";

impl Document {
    /// The built-in one-pager: a family's housing-search page. All slot ids
    /// and the shared city class match the configuration contract; the copy
    /// itself is static template text.
    pub fn housing_onepager() -> Self {
        let header = Header {
            id: MAIN_HEADER.to_string(),
            brand: TextLine::new()
                .text("Familie ")
                .slot(Element::slot("data-lastname-nav")),
            toggle: Some(MenuToggle {
                id: MENU_TOGGLE.to_string(),
            }),
        };

        let nav = Nav {
            id: MAIN_NAV.to_string(),
            links: vec![
                NavLink::new("Über uns", "ueber-uns"),
                NavLink::new("Wohnungswunsch", "wohnungswunsch"),
                NavLink::new("Kontakt", "kontakt"),
            ],
        };

        let hero = vec![
            TextLine::new().slot(Element::slot("data-fullname")),
            TextLine::new()
                .text("Wir suchen ein neues Zuhause in ")
                .slot(Element::classed(CITY_CLASS))
                .text("."),
            TextLine::plain("· · ·"),
            TextLine::new().slot(Element::slot("data-fullname-hero")),
        ];

        let sections = vec![
            Section {
                id: "ueber-uns".to_string(),
                heading: "Über uns".to_string(),
                body: vec![
                    TextLine::new()
                        .text("Wir sind ")
                        .slot(Element::slot("data-name1"))
                        .text(" und ")
                        .slot(Element::slot("data-name2"))
                        .text(", ein ruhiges und zuverlässiges Paar."),
                    TextLine::new()
                        .slot(Element::slot("data-name1-study"))
                        .text(" studiert ")
                        .slot(Element::slot("data-study-field"))
                        .text(" und arbeitet nebenher in ")
                        .slot(Element::classed(CITY_CLASS))
                        .text("."),
                    TextLine::new()
                        .slot(Element::slot("data-name2-hobby"))
                        .text(" verbringt die Freizeit am liebsten mit ")
                        .slot(Element::slot("data-hobby-person2"))
                        .text("."),
                ],
            },
            Section {
                id: "wohnungswunsch".to_string(),
                heading: "Unser Wohnungswunsch".to_string(),
                body: vec![
                    TextLine::new()
                        .text("Wir suchen eine 2- bis 3-Zimmer-Wohnung in ")
                        .slot(Element::classed(CITY_CLASS))
                        .text(" und Umgebung (")
                        .slot(Element::slot("data-region"))
                        .text(")."),
                    TextLine::new()
                        .text("Die Kaltmiete sollte ")
                        .slot(Element::slot("data-rent-limit"))
                        .text(" Euro nicht übersteigen."),
                    TextLine::new()
                        .text("Die Mietübernahme ist durch das Jobcenter ")
                        .slot(Element::slot("data-city-jobcenter"))
                        .text(" gesichert."),
                ],
            },
            Section {
                id: "kontakt".to_string(),
                heading: "Kontakt".to_string(),
                body: vec![
                    TextLine::new()
                        .text("Sie erreichen Familie ")
                        .slot(Element::slot("data-lastname"))
                        .text(" jederzeit:"),
                    TextLine::new()
                        .text("Telefon: ")
                        .slot(Element::slot("data-phone")),
                    TextLine::new()
                        .text("E-Mail: ")
                        .slot(Element::slot("data-email")),
                ],
            },
        ];

        let footer = Footer {
            lines: vec![
                TextLine::new()
                    .text("© ")
                    .slot(Element::slot("data-year"))
                    .text(" Familie ")
                    .slot(Element::slot("data-lastname-footer")),
                TextLine::plain("Vielen Dank fürs Vorbeischauen!"),
            ],
        };

        Self {
            title: "Wohnungssuche".to_string(),
            header: Some(header),
            nav: Some(nav),
            hero,
            sections,
            footer,
        }
    }

    /// All text slots of the page in document order.
    pub fn slots(&self) -> impl Iterator<Item = &Element> {
        let header = self.header.iter().flat_map(|h| h.brand.slots());
        let hero = self.hero.iter().flat_map(|line| line.slots());
        let sections = self
            .sections
            .iter()
            .flat_map(|section| section.body.iter().flat_map(|line| line.slots()));
        let footer = self.footer.lines.iter().flat_map(|line| line.slots());

        header.chain(hero).chain(sections).chain(footer)
    }

    /// All text slots of the page in document order, mutably.
    pub fn slots_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        let header = self.header.iter_mut().flat_map(|h| h.brand.slots_mut());
        let hero = self.hero.iter_mut().flat_map(|line| line.slots_mut());
        let sections = self
            .sections
            .iter_mut()
            .flat_map(|section| section.body.iter_mut().flat_map(|line| line.slots_mut()));
        let footer = self
            .footer
            .lines
            .iter_mut()
            .flat_map(|line| line.slots_mut());

        header.chain(hero).chain(sections).chain(footer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_template_slot_ids_are_unique_and_complete() {
        let doc = Document::housing_onepager();

        let ids: Vec<&str> = doc.slots().filter_map(|s| s.id.as_deref()).collect();
        let unique: HashSet<&&str> = ids.iter().collect();
        assert_eq!(ids.len(), unique.len(), "duplicate slot id in template");

        for id in [
            "data-name1",
            "data-name2",
            "data-lastname",
            "data-region",
            "data-rent-limit",
            "data-study-field",
            "data-hobby-person2",
            "data-phone",
            "data-email",
            "data-name1-study",
            "data-name2-hobby",
            "data-city-jobcenter",
            "data-lastname-nav",
            "data-lastname-footer",
            "data-fullname",
            "data-fullname-hero",
            "data-year",
        ] {
            assert!(ids.contains(&id), "template is missing slot {id}");
        }
    }

    #[test]
    fn test_template_city_class_is_shared() {
        let doc = Document::housing_onepager();
        let city_slots = doc.slots().filter(|s| s.has_class(CITY_CLASS)).count();
        assert!(city_slots >= 2, "city value must appear in multiple places");
    }

    #[test]
    fn test_template_nav_fragments_match_section_ids() {
        let doc = Document::housing_onepager();
        let section_ids: HashSet<&str> =
            doc.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(section_ids.len(), doc.sections.len());

        for link in &doc.nav.as_ref().unwrap().links {
            assert!(
                section_ids.contains(link.fragment.as_str()),
                "nav link {} targets no section",
                link.label
            );
        }
    }

    #[test]
    fn test_template_anchors_present() {
        let doc = Document::housing_onepager();
        let header = doc.header.as_ref().unwrap();
        assert_eq!(header.id, MAIN_HEADER);
        assert_eq!(header.toggle.as_ref().unwrap().id, MENU_TOGGLE);
        assert_eq!(doc.nav.as_ref().unwrap().id, MAIN_NAV);
    }

    #[test]
    fn test_line_content_concatenates_runs() {
        let line = TextLine::new()
            .text("Hallo ")
            .slot(Element::slot("wer"))
            .text("!");
        assert_eq!(line.content(), "Hallo !");
    }
}
