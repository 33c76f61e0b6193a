//! # athletic
//!
//! Interaction core for the Athletic Gym marketing site.
//!
//! Everything in this crate is plain data in, plain data out. The browser
//! adapter (`athletic_web`) owns element lookups and DOM mutation; the logic
//! it calls lives here so it can be unit-tested on the host.
//!
//! ## Quick Start
//!
//! ```
//! use athletic::prelude::*;
//!
//! let result = classify(70.0, 175.0).unwrap();
//! assert_eq!(result.category, BmiCategory::Normal);
//! assert_eq!(result.display_value(), "22.9");
//!
//! let submission = ContactSubmission {
//!     name: "Ana".into(),
//!     email: "a@b.com".into(),
//!     phone: "0991234567".into(),
//!     plan: "Premium".into(),
//!     note: String::new(),
//! };
//! let link = submission.validate().unwrap().deep_link("593969476858");
//! assert!(link.url.starts_with("https://wa.me/593969476858?text="));
//! ```
//!
//! ## Modules
//!
//! - [`bmi`]: body-mass-index classifier and gauge marker
//! - [`contact`]: contact form validation, deep link, submit handler
//! - [`notice`]: single-slot transient notice lifecycle
//! - [`debounce`]: scheduler capability and trailing-edge debounce
//! - [`nav`]: menu state and scroll-position math
//! - [`video`]: video gallery overlay commands
//! - [`config`]: site configuration

#[path = "core/bmi.rs"]
pub mod bmi;

#[path = "core/config.rs"]
pub mod config;

#[path = "core/contact.rs"]
pub mod contact;

#[path = "core/debounce.rs"]
pub mod debounce;

#[path = "core/fmt.rs"]
pub mod fmt;

#[path = "core/nav.rs"]
pub mod nav;

#[path = "core/notice.rs"]
pub mod notice;

#[path = "core/video.rs"]
pub mod video;

#[cfg(test)]
#[path = "core/testing.rs"]
pub(crate) mod testing;

/// Prelude module for convenient imports.
///
/// ```
/// use athletic::prelude::*;
/// ```
pub mod prelude {
    pub use crate::bmi::{
        classify, marker_percent, Advice, BmiCategory, BmiResult, Measurement, MeasurementError,
        PlanTag,
    };
    pub use crate::config::{ConfigError, SiteConfig};
    pub use crate::contact::{
        ContactHandler, ContactPage, ContactSubmission, DeepLink, Field, Reason, SubmitOutcome,
        ValidContact, ValidationError, ValidationErrors,
    };
    pub use crate::debounce::{debounce, Debounced, Scheduler};
    pub use crate::nav::{MenuState, ScrollThresholds, SectionBounds};
    pub use crate::notice::{Notice, NoticeController, NoticeId, NoticeKind, NoticePhase};
    pub use crate::video::{VideoCommand, VideoGallery};
}
