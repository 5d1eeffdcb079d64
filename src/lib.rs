//! Recognize social media profile URLs.
//!
//! ```
//! use slinky::Service;
//!
//! let parsed = slinky::parse("https://github.com/alice")?;
//! assert_eq!(parsed.service(), Service::GitHub);
//! assert_eq!(parsed.kind(), "User");
//! assert_eq!(parsed.id(), "alice");
//! # Ok::<(), slinky::SlinkyError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use url::Url;

mod decoder;
mod error;
#[cfg(feature = "logging")]
mod logging;
mod parser;
mod registry;
pub mod services;
mod utils;

pub use decoder::{Alphabet, Decoder, Grammar, HostRule, Shape, Source};
pub use error::{InvalidReason, SlinkyError};
#[cfg(feature = "logging")]
pub use logging::{log_error_card, log_social_card, setup_logging, LogConfig, LogLevelGuard};
pub use parser::{parse, Parser, ParserConfig, DEFAULT_MAX_WILDCARDS};
pub use registry::{default_registry, host_patterns, Registry};
pub use services::mastodon;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Service {
    Facebook,
    FLOSSSocial,
    Fosstodon,
    GitHub,
    Instagram,
    LinkedIn,
    Messenger,
    Pinterest,
    Reddit,
    Telegram,
    Twitch,
    Twitter,
    YouTube,
}

impl Service {
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Facebook => "Facebook",
            Service::FLOSSSocial => "FLOSSSocial",
            Service::Fosstodon => "Fosstodon",
            Service::GitHub => "GitHub",
            Service::Instagram => "Instagram",
            Service::LinkedIn => "LinkedIn",
            Service::Messenger => "Messenger",
            Service::Pinterest => "Pinterest",
            Service::Reddit => "Reddit",
            Service::Telegram => "Telegram",
            Service::Twitch => "Twitch",
            Service::Twitter => "Twitter",
            Service::YouTube => "YouTube",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A social media identity recognized from a URL.
///
/// `id` is always one of the values in `attributes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialUrl {
    service: Service,
    #[serde(rename = "type")]
    kind: String,
    id: String,
    attributes: BTreeMap<String, String>,
    url: Url,
}

impl SocialUrl {
    /// Builds a result whose `id` is stored under `attribute`.
    pub fn new(
        service: Service,
        kind: impl Into<String>,
        attribute: impl Into<String>,
        id: impl Into<String>,
        url: Url,
    ) -> Self {
        let id = id.into();
        let mut attributes = BTreeMap::new();
        attributes.insert(attribute.into(), id.clone());
        Self {
            service,
            kind: kind.into(),
            id,
            attributes,
            url,
        }
    }

    /// Adds an auxiliary attribute such as `platform`. Existing attributes are
    /// never replaced.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes
            .entry(name.into())
            .or_insert_with(|| value.into());
        self
    }

    pub fn service(&self) -> Service {
        self.service
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// The source URL, with `http` upgraded to `https`.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl fmt::Display for SocialUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.service, self.kind, self.id)
    }
}
