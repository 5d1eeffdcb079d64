use crate::registry::default_registry;
use crate::utils::is_relative_reference;
use crate::{Registry, SlinkyError, SocialUrl};
#[cfg(feature = "logging")]
use tracing::instrument;
use url::{ParseError, Url};

/// How many leading host labels may be replaced by wildcards in production.
pub const DEFAULT_MAX_WILDCARDS: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    pub max_wildcards: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_wildcards: DEFAULT_MAX_WILDCARDS,
        }
    }
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_wildcards(mut self, max_wildcards: usize) -> Self {
        self.max_wildcards = max_wildcards;
        self
    }
}

/// Parses raw URL strings and dispatches them through a [`Registry`].
#[derive(Debug, Clone, Copy)]
pub struct Parser<'r> {
    registry: &'r Registry,
    config: ParserConfig,
}

impl Default for Parser<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser<'static> {
    /// A parser over the built-in services.
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self::with_registry(default_registry(), config)
    }
}

impl<'r> Parser<'r> {
    pub fn with_registry(registry: &'r Registry, config: ParserConfig) -> Self {
        Self { registry, config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses `raw`, which must be an absolute URL.
    #[cfg_attr(feature = "logging", instrument(level = "debug", skip(self), err))]
    pub fn parse(&self, raw: &str) -> Result<SocialUrl, SlinkyError> {
        let url = match Url::parse(raw) {
            Ok(url) => url,
            Err(ParseError::RelativeUrlWithoutBase) if is_relative_reference(raw) => {
                return Err(SlinkyError::NotAbsolute);
            }
            Err(e) => return Err(SlinkyError::MalformedInput(e)),
        };
        self.registry.dispatch(url, self.config.max_wildcards)
    }
}

/// Parses `raw` against the built-in services.
///
/// ```
/// use slinky::{SlinkyError, Service};
///
/// let parsed = slinky::parse("https://t.me/+100000000000001")?;
/// assert_eq!(parsed.service(), Service::Telegram);
/// assert_eq!(parsed.attribute("phoneNumber"), Some("+100000000000001"));
///
/// assert_eq!(slinky::parse("/relative/path"), Err(SlinkyError::NotAbsolute));
/// # Ok::<(), SlinkyError>(())
/// ```
pub fn parse(raw: &str) -> Result<SocialUrl, SlinkyError> {
    Parser::new().parse(raw)
}
