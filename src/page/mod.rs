pub mod binder;
pub mod document;
pub mod hydrate;

pub use document::{CITY_CLASS, Document, Element, Header, Nav, NavLink, Run, Section, TextLine};
pub use hydrate::{DEFAULT_CITY, DEFAULT_LASTNAME, compose_full_name, hydrate};
