use crate::{services, Decoder, Service, SlinkyError, SocialUrl};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};
#[cfg(feature = "logging")]
use tracing::debug;
use url::Url;

static DEFAULT_REGISTRY: LazyLock<Registry> = LazyLock::new(|| {
    Registry::new()
        .with_all(
            &[
                "facebook.com",
                "www.facebook.com",
                "web.facebook.com",
                "m.facebook.com",
                "fb.me",
            ],
            services::facebook(),
        )
        .with("floss.social", services::mastodon(Service::FLOSSSocial, "floss.social"))
        .with("fosstodon.org", services::mastodon(Service::Fosstodon, "fosstodon.org"))
        .with_all(&["github.com", "www.github.com", "*.github.io"], services::github())
        .with_all(&["instagram.com", "www.instagram.com"], services::instagram())
        .with_all(&["linkedin.com", "www.linkedin.com"], services::linkedin())
        .with_all(&["m.me", "www.m.me"], services::messenger())
        .with_all(&["pinterest.com", "www.pinterest.com"], services::pinterest())
        .with_all(
            &["reddit.com", "www.reddit.com", "old.reddit.com"],
            services::reddit(),
        )
        .with_all(&["t.me", "telegram.me"], services::telegram())
        .with_all(&["twitch.tv", "www.twitch.tv", "m.twitch.tv"], services::twitch())
        .with_all(
            &[
                "x.com",
                "www.x.com",
                "twitter.com",
                "www.twitter.com",
                "mobile.twitter.com",
            ],
            services::twitter(),
        )
        .with_all(
            &["youtube.com", "www.youtube.com", "m.youtube.com"],
            services::youtube(),
        )
});

/// The registry of built-in services, built on first use.
pub fn default_registry() -> &'static Registry {
    &DEFAULT_REGISTRY
}

/// Candidate registry keys for `host`, most specific first.
///
/// The first `i` labels are replaced by `*` for `i` up to `max_wildcards`,
/// always keeping at least the last label.
///
/// ```
/// assert_eq!(
///     slinky::host_patterns("alice.github.io", 1),
///     vec!["alice.github.io", "*.github.io"],
/// );
/// ```
pub fn host_patterns(host: &str, max_wildcards: usize) -> Vec<String> {
    let labels: Vec<&str> = host.split('.').collect();
    let depth = max_wildcards.min(labels.len() - 1);

    let mut patterns = Vec::with_capacity(depth + 1);
    patterns.push(host.to_string());
    for i in 1..=depth {
        patterns.push(format!("{}{}", "*.".repeat(i), labels[i..].join(".")));
    }
    patterns
}

/// Maps host patterns to decoders.
///
/// Built up front and only read afterwards; several patterns may share one
/// decoder.
#[derive(Clone, Default)]
pub struct Registry {
    decoders: HashMap<String, Arc<dyn Decoder>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `decoder` for `pattern`, replacing any previous entry.
    pub fn with(self, pattern: &str, decoder: impl Decoder + 'static) -> Self {
        self.with_shared(pattern, Arc::new(decoder))
    }

    /// Registers one decoder for several patterns.
    pub fn with_all(self, patterns: &[&str], decoder: impl Decoder + 'static) -> Self {
        let decoder: Arc<dyn Decoder> = Arc::new(decoder);
        patterns.iter().fold(self, |registry, pattern| {
            registry.with_shared(pattern, Arc::clone(&decoder))
        })
    }

    pub fn with_shared(mut self, pattern: &str, decoder: Arc<dyn Decoder>) -> Self {
        self.decoders.insert(pattern.to_string(), decoder);
        self
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.decoders.contains_key(pattern)
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }

    /// Finds the decoder for the first registered candidate pattern of `host`.
    pub fn lookup(&self, host: &str, max_wildcards: usize) -> Option<(String, &dyn Decoder)> {
        host_patterns(host, max_wildcards)
            .into_iter()
            .find_map(|pattern| {
                let decoder = self.decoders.get(&pattern)?;
                Some((pattern, decoder.as_ref()))
            })
    }

    /// Hands `url` to the decoder chosen by its host.
    ///
    /// The first matching pattern decides the service: a decoder failure is
    /// returned as is, broader patterns are not tried.
    pub fn dispatch(&self, url: Url, max_wildcards: usize) -> Result<SocialUrl, SlinkyError> {
        let host = url.host_str().unwrap_or_default().to_string();

        let Some((_pattern, decoder)) = self.lookup(&host, max_wildcards) else {
            #[cfg(feature = "logging")]
            debug!(host = %host, "No registered pattern matched host");
            return Err(SlinkyError::UnknownService(host));
        };

        #[cfg(feature = "logging")]
        debug!(host = %host, pattern = %_pattern, "Dispatching to decoder");

        decoder.decode(url)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut patterns: Vec<&str> = self.decoders.keys().map(String::as_str).collect();
        patterns.sort_unstable();
        f.debug_struct("Registry").field("patterns", &patterns).finish()
    }
}
