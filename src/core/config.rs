//! Site configuration.
//!
//! Every field has a default, so an empty JSON object (or no config at all)
//! yields the stock behavior of the live site. The web adapter reads an
//! optional inline `<script id="siteConfig" type="application/json">` block.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Phone id used in the `wa.me` deep link (digits only, with country code).
    pub whatsapp_number: String,
    /// Delay between the success notice and opening the deep link.
    pub redirect_delay_ms: u32,
    /// How long a notice stays fully visible.
    pub notice_ttl_ms: u32,
    /// Length of the notice exit animation.
    pub notice_exit_ms: u32,

    pub active_link_debounce_ms: u32,
    pub navbar_debounce_ms: u32,
    pub scroll_top_debounce_ms: u32,

    /// Scroll offset past which the navbar gets `scrolled`.
    pub navbar_scrolled_px: f64,
    /// Scroll offset past which the scroll-to-top button shows.
    pub scroll_top_visible_px: f64,
    /// Extra look-ahead below the navbar when picking the active section.
    pub active_link_offset_px: f64,

    pub reveal_threshold: f64,
    pub reveal_root_margin: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            whatsapp_number: "593969476858".to_string(),
            redirect_delay_ms: 1500,
            notice_ttl_ms: 5000,
            notice_exit_ms: 300,
            active_link_debounce_ms: 100,
            navbar_debounce_ms: 10,
            scroll_top_debounce_ms: 100,
            navbar_scrolled_px: 50.0,
            scroll_top_visible_px: 300.0,
            active_link_offset_px: 100.0,
            reveal_threshold: 0.1,
            reveal_root_margin: "0px 0px -50px 0px".to_string(),
        }
    }
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: SiteConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parses `raw` if present, falling back to defaults on absence or error.
    pub fn from_json_or_default(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        match Self::from_json(raw) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!("ignoring site config: {e}");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.whatsapp_number.is_empty()
            || !self.whatsapp_number.chars().all(|c| c.is_ascii_digit())
        {
            return Err(ConfigError::Invalid(format!(
                "whatsapp_number must be digits only, got {:?}",
                self.whatsapp_number
            )));
        }
        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            return Err(ConfigError::Invalid(format!(
                "reveal_threshold must be within [0, 1], got {}",
                self.reveal_threshold
            )));
        }
        Ok(())
    }

    pub fn redirect_delay(&self) -> Duration {
        ms(self.redirect_delay_ms)
    }

    pub fn notice_ttl(&self) -> Duration {
        ms(self.notice_ttl_ms)
    }

    pub fn notice_exit(&self) -> Duration {
        ms(self.notice_exit_ms)
    }

    pub fn active_link_debounce(&self) -> Duration {
        ms(self.active_link_debounce_ms)
    }

    pub fn navbar_debounce(&self) -> Duration {
        ms(self.navbar_debounce_ms)
    }

    pub fn scroll_top_debounce(&self) -> Duration {
        ms(self.scroll_top_debounce_ms)
    }
}

fn ms(v: u32) -> Duration {
    Duration::from_millis(u64::from(v))
}
