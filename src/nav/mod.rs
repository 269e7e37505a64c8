pub mod menu;
pub mod observer;
pub mod spy;

pub use menu::{MenuController, MenuState};
pub use observer::{IntersectionEntry, IntersectionObserver, SectionExtent, Viewport};
pub use spy::ScrollSpy;
