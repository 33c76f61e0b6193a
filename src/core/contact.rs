//! Contact form: validation, WhatsApp deep link and the submit handler.

use std::fmt;
use std::rc::Rc;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::config::SiteConfig;
use crate::debounce::Scheduler;
use crate::notice::{NoticeController, NoticeKind};

pub const SUCCESS_NOTICE: &str = "¡Gracias! Te estamos redirigiendo a WhatsApp...";

const MIN_NAME_CHARS: usize = 2;
const MIN_PHONE_CHARS: usize = 7;

static EMAIL_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));

/// Length the way the browser reports `value.length` (UTF-16 code units).
fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
    Plan,
}

impl Field {
    /// Element id of the input on the page.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Plan => "plan",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
    InvalidName,
    InvalidEmail,
    InvalidPhone,
    MissingPlan,
}

impl Reason {
    pub fn message(self) -> &'static str {
        match self {
            Reason::InvalidName => "Por favor ingresa un nombre válido.",
            Reason::InvalidEmail => "Por favor ingresa un email válido.",
            Reason::InvalidPhone => "Por favor ingresa un teléfono válido.",
            Reason::MissingPlan => "Por favor selecciona un plan.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{}", .reason.message())]
pub struct ValidationError {
    pub field: Field,
    pub reason: Reason,
}

/// Every rule that failed, in field order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn as_slice(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, reason: Reason) -> bool {
        self.0.iter().any(|e| e.reason == reason)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.iter().map(|e| e.field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Raw values read from the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Selected plan; empty when nothing was chosen.
    pub plan: String,
    /// Free-text message.
    pub note: String,
}

impl ContactSubmission {
    /// Checks every rule (no short-circuit) and returns the trimmed values on
    /// success.
    pub fn validate(&self) -> Result<ValidContact, ValidationErrors> {
        let name = self.name.trim();
        let email = self.email.trim();
        let phone = self.phone.trim();

        let mut errors = Vec::new();
        if utf16_len(name) < MIN_NAME_CHARS {
            errors.push(ValidationError {
                field: Field::Name,
                reason: Reason::InvalidName,
            });
        }
        if !is_valid_email(email) {
            errors.push(ValidationError {
                field: Field::Email,
                reason: Reason::InvalidEmail,
            });
        }
        if utf16_len(phone) < MIN_PHONE_CHARS {
            errors.push(ValidationError {
                field: Field::Phone,
                reason: Reason::InvalidPhone,
            });
        }
        if self.plan.is_empty() {
            errors.push(ValidationError {
                field: Field::Plan,
                reason: Reason::MissingPlan,
            });
        }

        if !errors.is_empty() {
            return Err(ValidationErrors(errors));
        }
        Ok(ValidContact {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            plan: self.plan.clone(),
            note: self.note.clone(),
        })
    }
}

pub fn is_valid_email(email: &str) -> bool {
    match &*EMAIL_RE {
        Ok(re) => re.is_match(email),
        Err(e) => {
            tracing::error!("email pattern failed to compile: {e}");
            false
        }
    }
}

/// A submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub plan: String,
    pub note: String,
}

impl ValidContact {
    pub fn message(&self) -> String {
        format!(
            "Hola Athletic Gym, mi nombre es {}. Me interesa el {} (Plan Básico/Premium/Elite). {}",
            self.name, self.plan, self.note
        )
    }

    pub fn deep_link(&self, phone_id: &str) -> DeepLink {
        let message = self.message();
        let url = format!(
            "https://wa.me/{phone_id}?text={}",
            urlencoding::encode(&message)
        );
        DeepLink { url, message }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepLink {
    pub url: String,
    /// Unencoded message text.
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Success notice shown; the link opens after the redirect delay.
    Redirecting(DeepLink),
    /// Error notice shown; nothing else happens.
    Rejected(ValidationErrors),
}

/// Page capabilities the submit handler needs after a successful submit.
pub trait ContactPage {
    /// Opens `url` in a new browsing context.
    fn open_link(&self, url: &str);
    fn reset_form(&self);
}

/// Submit handler for the contact form. Holds no per-submission state, so
/// repeated valid submits each produce their own redirect.
pub struct ContactHandler<S: Scheduler, P: ContactPage> {
    scheduler: S,
    page: Rc<P>,
    notices: NoticeController<S>,
    phone_id: String,
    redirect_delay: std::time::Duration,
}

impl<S, P> ContactHandler<S, P>
where
    S: Scheduler + 'static,
    P: ContactPage + 'static,
{
    pub fn new(scheduler: S, page: P, notices: NoticeController<S>, config: &SiteConfig) -> Self {
        Self {
            scheduler,
            page: Rc::new(page),
            notices,
            phone_id: config.whatsapp_number.clone(),
            redirect_delay: config.redirect_delay(),
        }
    }

    pub fn submit(&self, submission: &ContactSubmission) -> SubmitOutcome {
        match submission.validate() {
            Ok(contact) => {
                let link = contact.deep_link(&self.phone_id);
                tracing::debug!(plan = %contact.plan, "contact form accepted");
                self.notices.show(NoticeKind::Success, SUCCESS_NOTICE);

                let page = Rc::clone(&self.page);
                let url = link.url.clone();
                self.scheduler.schedule(
                    self.redirect_delay,
                    Box::new(move || {
                        page.open_link(&url);
                        page.reset_form();
                    }),
                );
                SubmitOutcome::Redirecting(link)
            }
            Err(errors) => {
                tracing::debug!(errors = errors.len(), "contact form rejected");
                self.notices.show(NoticeKind::Error, errors.to_string());
                SubmitOutcome::Rejected(errors)
            }
        }
    }

    pub fn notices(&self) -> &NoticeController<S> {
        &self.notices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::NoticePhase;
    use crate::testing::VirtualClock;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum PageEvent {
        Open(String),
        Reset,
    }

    #[derive(Default)]
    struct RecordingPage {
        events: Rc<RefCell<Vec<PageEvent>>>,
    }

    impl ContactPage for RecordingPage {
        fn open_link(&self, url: &str) {
            self.events.borrow_mut().push(PageEvent::Open(url.to_string()));
        }

        fn reset_form(&self) {
            self.events.borrow_mut().push(PageEvent::Reset);
        }
    }

    fn valid() -> ContactSubmission {
        ContactSubmission {
            name: "Ana".into(),
            email: "a@b.com".into(),
            phone: "0991234567".into(),
            plan: "Premium".into(),
            note: String::new(),
        }
    }

    fn handler(
        clock: &Rc<VirtualClock>,
    ) -> (
        ContactHandler<Rc<VirtualClock>, RecordingPage>,
        Rc<RefCell<Vec<PageEvent>>>,
    ) {
        let cfg = SiteConfig::default();
        let page = RecordingPage::default();
        let events = Rc::clone(&page.events);
        let notices = NoticeController::from_config(Rc::clone(clock), &cfg, |_| {});
        (
            ContactHandler::new(Rc::clone(clock), page, notices, &cfg),
            events,
        )
    }

    #[test]
    fn all_rules_reported_together() {
        let sub = ContactSubmission {
            name: "A".into(),
            email: "bad".into(),
            phone: "123".into(),
            plan: String::new(),
            note: String::new(),
        };
        let errs = sub.validate().unwrap_err();
        assert_eq!(errs.len(), 4);
        for r in [
            Reason::InvalidName,
            Reason::InvalidEmail,
            Reason::InvalidPhone,
            Reason::MissingPlan,
        ] {
            assert!(errs.contains(r), "missing {r:?}");
        }
        assert_eq!(
            errs.fields().collect::<Vec<_>>(),
            vec![Field::Name, Field::Email, Field::Phone, Field::Plan]
        );
        assert_eq!(
            errs.to_string(),
            "Por favor ingresa un nombre válido.\n\
             Por favor ingresa un email válido.\n\
             Por favor ingresa un teléfono válido.\n\
             Por favor selecciona un plan."
        );
    }

    #[test]
    fn fields_are_trimmed_before_checks() {
        let sub = ContactSubmission {
            name: "  A  ".into(),
            email: "  a@b.co  ".into(),
            phone: " 12345 6 ".into(),
            plan: "Elite".into(),
            note: String::new(),
        };
        let errs = sub.validate().unwrap_err();
        assert_eq!(
            errs.fields().collect::<Vec<_>>(),
            vec![Field::Name]
        );
        assert_eq!(errs.to_string(), "Por favor ingresa un nombre válido.");
    }

    #[test]
    fn email_pattern_is_permissive() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@sub.domain.ec"));
        assert!(is_valid_email("x@y.z"));
        assert!(!is_valid_email("bad"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@@b.com"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn email_pattern_compiles() {
        assert!(EMAIL_RE.is_ok());
    }

    #[test]
    fn lengths_count_utf16_units() {
        let mut sub = valid();
        // One astral character is two UTF-16 units, same as a two-letter name.
        sub.name = "😀".into();
        assert!(sub.validate().is_ok());
        sub.phone = "+59399".into();
        assert!(sub.validate().unwrap_err().contains(Reason::InvalidPhone));
        sub.phone = "😀😀😀9".into();
        assert!(sub.validate().is_ok());
    }

    #[test]
    fn name_length_counts_characters_not_bytes() {
        let mut sub = valid();
        sub.name = "Ñ".into();
        assert!(sub.validate().unwrap_err().contains(Reason::InvalidName));
        sub.name = "Ña".into();
        assert!(sub.validate().is_ok());
    }

    #[test]
    fn deep_link_encodes_message() {
        let mut sub = valid();
        sub.note = "¿Horarios?".into();
        let link = sub.validate().unwrap().deep_link("593969476858");
        assert!(link.url.starts_with("https://wa.me/593969476858?text="));
        assert!(link.url.contains("Ana"));
        assert!(link.url.contains("Premium"));
        assert!(!link.url.contains(' '));
        assert_eq!(
            link.message,
            "Hola Athletic Gym, mi nombre es Ana. Me interesa el Premium (Plan Básico/Premium/Elite). ¿Horarios?"
        );
        let text = link.url.split("text=").nth(1).unwrap();
        assert_eq!(urlencoding::decode(text).unwrap(), link.message);
    }

    #[test]
    fn valid_submit_redirects_after_delay_then_resets() {
        let clock = Rc::new(VirtualClock::new());
        let (h, events) = handler(&clock);

        let out = h.submit(&valid());
        let SubmitOutcome::Redirecting(link) = out else {
            panic!("expected redirect");
        };
        let notice = h.notices().current().unwrap();
        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(notice.text, SUCCESS_NOTICE);

        clock.advance(1499);
        assert!(events.borrow().is_empty());
        clock.advance(1);
        assert_eq!(
            *events.borrow(),
            vec![PageEvent::Open(link.url), PageEvent::Reset]
        );
        assert_eq!(h.notices().current().unwrap().phase, NoticePhase::Visible);
    }

    #[test]
    fn invalid_submit_shows_error_without_redirect() {
        let clock = Rc::new(VirtualClock::new());
        let (h, events) = handler(&clock);

        let out = h.submit(&ContactSubmission::default());
        let SubmitOutcome::Rejected(errs) = out else {
            panic!("expected rejection");
        };
        assert_eq!(errs.len(), 4);
        let notice = h.notices().current().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.text.lines().count(), 4);

        clock.advance(10_000);
        assert!(events.borrow().is_empty());
        assert!(h.notices().current().is_none());
    }

    #[test]
    fn repeated_valid_submits_each_redirect() {
        let clock = Rc::new(VirtualClock::new());
        let (h, events) = handler(&clock);

        let first = h.submit(&valid());
        let second = h.submit(&valid());
        assert_eq!(first, second);

        clock.advance(1500);
        let opens = events
            .borrow()
            .iter()
            .filter(|e| matches!(e, PageEvent::Open(_)))
            .count();
        assert_eq!(opens, 2);
    }
}
