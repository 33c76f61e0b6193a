//! Page inventory (element ids, selectors, class names) shared by the wasm
//! adapter and host-side tests.
//!
//! The markup is authored outside this crate; these names are the contract
//! with it.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    Navbar,
    NavMenu,
    MobileToggle,
    ContactForm,
    Name,
    Email,
    Phone,
    Plan,
    Message,
    BmiForm,
    Weight,
    Height,
    BmiResult,
    BmiValue,
    BmiStatus,
    BmiMessage,
    BmiMarker,
    ScrollToTop,
    SiteConfig,
}

impl ElementId {
    pub fn id(self) -> &'static str {
        match self {
            ElementId::Navbar => "navbar",
            ElementId::NavMenu => "navMenu",
            ElementId::MobileToggle => "mobileToggle",
            ElementId::ContactForm => "contactForm",
            ElementId::Name => "name",
            ElementId::Email => "email",
            ElementId::Phone => "phone",
            ElementId::Plan => "plan",
            ElementId::Message => "message",
            ElementId::BmiForm => "bmiForm",
            ElementId::Weight => "weight",
            ElementId::Height => "height",
            ElementId::BmiResult => "bmiResult",
            ElementId::BmiValue => "bmiValue",
            ElementId::BmiStatus => "bmiStatus",
            ElementId::BmiMessage => "bmiMessage",
            ElementId::BmiMarker => "bmiMarker",
            ElementId::ScrollToTop => "scrollToTop",
            ElementId::SiteConfig => "siteConfig",
        }
    }

    pub fn all() -> &'static [ElementId] {
        &[
            ElementId::Navbar,
            ElementId::NavMenu,
            ElementId::MobileToggle,
            ElementId::ContactForm,
            ElementId::Name,
            ElementId::Email,
            ElementId::Phone,
            ElementId::Plan,
            ElementId::Message,
            ElementId::BmiForm,
            ElementId::Weight,
            ElementId::Height,
            ElementId::BmiResult,
            ElementId::BmiValue,
            ElementId::BmiStatus,
            ElementId::BmiMessage,
            ElementId::BmiMarker,
            ElementId::ScrollToTop,
            ElementId::SiteConfig,
        ]
    }
}

pub const NAV_LINK_SELECTOR: &str = ".nav-link";
pub const SECTION_SELECTOR: &str = "section[id]";
pub const REVEAL_SELECTOR: &str = ".reveal-on-scroll";
pub const VIDEO_ITEM_SELECTOR: &str = ".video-item";
pub const VIDEO_OVERLAY_SELECTOR: &str = ".video-overlay";
pub const VIDEO_SELECTOR: &str = "video";

pub mod class {
    pub const ACTIVE: &str = "active";
    pub const SCROLLED: &str = "scrolled";
    pub const REVEALED: &str = "revealed";
    pub const HIDDEN: &str = "hidden";
    pub const BMI_STATUS: &str = "bmi-status";
}

/// Selector for the nav link pointing at `#section_id`.
pub fn nav_link_selector_for(section_id: &str) -> String {
    format!("{NAV_LINK_SELECTOR}[href=\"#{section_id}\"]")
}

/// Independently wired page features. A feature whose elements are missing
/// is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    MobileMenu,
    SmoothScroll,
    ScrollReveal,
    NavbarScroll,
    ScrollToTop,
    ContactForm,
    BmiCalculator,
    VideoGallery,
}

impl Feature {
    pub fn label(self) -> &'static str {
        match self {
            Feature::MobileMenu => "mobile_menu",
            Feature::SmoothScroll => "smooth_scroll",
            Feature::ScrollReveal => "scroll_reveal",
            Feature::NavbarScroll => "navbar_scroll",
            Feature::ScrollToTop => "scroll_to_top",
            Feature::ContactForm => "contact_form",
            Feature::BmiCalculator => "bmi_calculator",
            Feature::VideoGallery => "video_gallery",
        }
    }

    /// Ids that must be present for the feature to wire.
    pub fn required_ids(self) -> &'static [ElementId] {
        match self {
            Feature::MobileMenu => &[ElementId::MobileToggle, ElementId::NavMenu],
            Feature::NavbarScroll => &[ElementId::Navbar],
            Feature::ContactForm => &[ElementId::ContactForm],
            Feature::BmiCalculator => &[ElementId::BmiForm],
            Feature::SmoothScroll
            | Feature::ScrollReveal
            | Feature::ScrollToTop
            | Feature::VideoGallery => &[],
        }
    }

    /// Required ids for which `present` is false. Empty means the feature
    /// can be wired.
    pub fn missing_ids(self, present: impl Fn(ElementId) -> bool) -> Vec<ElementId> {
        self.required_ids()
            .iter()
            .copied()
            .filter(|&id| !present(id))
            .collect()
    }

    pub fn all() -> &'static [Feature] {
        &[
            Feature::MobileMenu,
            Feature::SmoothScroll,
            Feature::ScrollReveal,
            Feature::NavbarScroll,
            Feature::ScrollToTop,
            Feature::ContactForm,
            Feature::BmiCalculator,
            Feature::VideoGallery,
        ]
    }
}
