//! Hydration: inject the fetched configuration into the page document.
//! Binding order and defaulting mirror the page contract: eleven direct
//! bindings, then the city, last-name and full-name special cases, then
//! the footer year.

use chrono::Datelike;

use crate::config::{DIRECT_KEYS, SiteConfig, keys};

use super::document::{CITY_CLASS, Document};

/// Literal city shown when the configuration provides none.
pub const DEFAULT_CITY: &str = "Stadt";
/// Literal family name shown when the configuration provides none.
pub const DEFAULT_LASTNAME: &str = "Mustermann";

/// Populate every bound slot of the page from the configuration.
pub fn hydrate(doc: &mut Document, config: &SiteConfig) {
    hydrate_at(doc, config, chrono::Local::now().year());
}

/// Same as [`hydrate`] with the footer year passed in.
pub fn hydrate_at(doc: &mut Document, config: &SiteConfig, year: i32) {
    // The eleven fixed bindings; config key and slot id share the name.
    // No defaulting here: an absent key renders empty.
    for key in DIRECT_KEYS {
        doc.set_text(key, &config.get_str(key));
    }

    // City: defaulted, bound to the Jobcenter line and every mirror slot.
    let city = config.get_or(keys::CITY, DEFAULT_CITY);
    doc.set_text("data-city-jobcenter", &city);
    doc.set_text_by_class(CITY_CLASS, &city);

    // Last name: defaulted, reflected in the title, nav brand and footer.
    let lastname = config.get_or(keys::LASTNAME, DEFAULT_LASTNAME);
    doc.title = format!("Wohnungssuche: Familie {}", lastname);
    doc.set_text("data-lastname-nav", &lastname);
    doc.set_text("data-lastname-footer", &lastname);

    // Full name: identical content in the hero banner and photo caption.
    let name1 = config.get_or(keys::NAME1, "");
    let name2 = config.get_or(keys::NAME2, "");
    let fullname = compose_full_name(&name1, &name2, &lastname);
    doc.set_text("data-fullname", &fullname);
    doc.set_text("data-fullname-hero", &fullname);

    // Footer year comes from the clock, not the configuration.
    doc.set_text("data-year", &year.to_string());
}

/// `"<name1> & <name2> <lastname>"`, trimmed. The `" & "` joiner appears
/// only between two non-empty names, so empty names reduce the result to
/// the bare last name instead of leaving a dangling ampersand.
pub fn compose_full_name(name1: &str, name2: &str, lastname: &str) -> String {
    let names = match (name1.is_empty(), name2.is_empty()) {
        (false, false) => format!("{} & {}", name1, name2),
        (false, true) => name1.to_string(),
        (true, false) => name2.to_string(),
        (true, true) => String::new(),
    };
    format!("{} {}", names, lastname).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hydrated(json: &str) -> Document {
        let config: SiteConfig = serde_json::from_str(json).unwrap();
        let mut doc = Document::housing_onepager();
        hydrate_at(&mut doc, &config, 2026);
        doc
    }

    #[test]
    fn test_missing_city_defaults_everywhere() {
        let doc = hydrated(r#"{"data-name1": "Anna"}"#);

        assert_eq!(doc.slot_text("data-city-jobcenter"), Some(DEFAULT_CITY));
        for slot in doc.slots().filter(|s| s.has_class(CITY_CLASS)) {
            assert_eq!(slot.text, DEFAULT_CITY);
        }
    }

    #[test]
    fn test_city_from_config_reaches_every_mirror() {
        let doc = hydrated(r#"{"data-city": "Leipzig"}"#);

        assert_eq!(doc.slot_text("data-city-jobcenter"), Some("Leipzig"));
        let mirrors = doc
            .slots()
            .filter(|s| s.has_class(CITY_CLASS))
            .filter(|s| s.text == "Leipzig")
            .count();
        assert!(mirrors >= 2);
    }

    #[test]
    fn test_missing_lastname_defaults_title() {
        let doc = hydrated("{}");
        assert_eq!(doc.title, "Wohnungssuche: Familie Mustermann");
        assert_eq!(doc.slot_text("data-lastname-nav"), Some(DEFAULT_LASTNAME));
        assert_eq!(
            doc.slot_text("data-lastname-footer"),
            Some(DEFAULT_LASTNAME)
        );
    }

    #[test]
    fn test_lastname_from_config_updates_three_places() {
        let doc = hydrated(r#"{"data-lastname": "Schmidt"}"#);
        assert_eq!(doc.title, "Wohnungssuche: Familie Schmidt");
        assert_eq!(doc.slot_text("data-lastname-nav"), Some("Schmidt"));
        assert_eq!(doc.slot_text("data-lastname-footer"), Some("Schmidt"));
    }

    #[test]
    fn test_direct_lastname_slot_is_not_defaulted() {
        // The contact section shows the raw value; only title, nav and
        // footer fall back to the default.
        let doc = hydrated("{}");
        assert_eq!(doc.slot_text("data-lastname"), Some(""));
        assert_eq!(doc.slot_text("data-lastname-nav"), Some(DEFAULT_LASTNAME));
    }

    #[test]
    fn test_compose_full_name() {
        assert_eq!(
            compose_full_name("Anna", "Max", "Schmidt"),
            "Anna & Max Schmidt"
        );
        assert_eq!(compose_full_name("", "", "Schmidt"), "Schmidt");
        assert_eq!(compose_full_name("Anna", "", "Schmidt"), "Anna Schmidt");
        assert_eq!(compose_full_name("", "Max", "Schmidt"), "Max Schmidt");
    }

    #[test]
    fn test_falsy_name_drops_out_of_the_composition() {
        let doc =
            hydrated(r#"{"data-name1": 0, "data-name2": "Max", "data-lastname": "Schmidt"}"#);

        assert_eq!(doc.slot_text("data-fullname"), Some("Max Schmidt"));
        // the direct slot still shows the raw value
        assert_eq!(doc.slot_text("data-name1"), Some("0"));
    }

    #[test]
    fn test_fullname_slots_receive_identical_content() {
        let doc = hydrated(
            r#"{"data-name1": "Anna", "data-name2": "Max", "data-lastname": "Schmidt"}"#,
        );
        assert_eq!(doc.slot_text("data-fullname"), Some("Anna & Max Schmidt"));
        assert_eq!(
            doc.slot_text("data-fullname"),
            doc.slot_text("data-fullname-hero")
        );
    }

    #[test]
    fn test_direct_keys_bind_and_absent_keys_render_empty() {
        let doc = hydrated(r#"{"data-region": "Sachsen", "data-rent-limit": 650}"#);
        assert_eq!(doc.slot_text("data-region"), Some("Sachsen"));
        assert_eq!(doc.slot_text("data-rent-limit"), Some("650"));
        assert_eq!(doc.slot_text("data-phone"), Some(""));
        assert_eq!(doc.slot_text("data-email"), Some(""));
    }

    #[test]
    fn test_footer_year_comes_from_clock() {
        let doc = hydrated("{}");
        assert_eq!(doc.slot_text("data-year"), Some("2026"));
    }
}
