use crate::utils::trim_trailing_slash;
use crate::{InvalidReason, Service, SlinkyError, SocialUrl};
use std::ops::RangeInclusive;
use url::Url;

/// Turns a URL whose host selected this decoder into a [`SocialUrl`].
///
/// Decoders receive their own copy of the URL and must not depend on any
/// other decoder.
pub trait Decoder: Send + Sync {
    fn decode(&self, url: Url) -> Result<SocialUrl, SlinkyError>;
}

impl<F> Decoder for F
where
    F: Fn(Url) -> Result<SocialUrl, SlinkyError> + Send + Sync,
{
    fn decode(&self, url: Url) -> Result<SocialUrl, SlinkyError> {
        self(url)
    }
}

/// Characters allowed in an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alphabet {
    letters: bool,
    digits: bool,
    extra: &'static str,
}

impl Alphabet {
    /// ASCII letters and digits plus `extra`.
    pub const fn alphanumeric(extra: &'static str) -> Self {
        Self {
            letters: true,
            digits: true,
            extra,
        }
    }

    pub const fn digits() -> Self {
        Self {
            letters: false,
            digits: true,
            extra: "",
        }
    }

    pub fn contains(&self, c: char) -> bool {
        (self.letters && c.is_ascii_alphabetic())
            || (self.digits && c.is_ascii_digit())
            || self.extra.contains(c)
    }
}

/// One entry of a service's host allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostRule {
    Exact(&'static str),
    /// Exactly one label in front of the parent domain, e.g. `alice.github.io`.
    Subdomain(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum HostMatch {
    Exact,
    Subdomain(String),
}

impl HostRule {
    fn matches(&self, host: &str) -> Option<HostMatch> {
        match self {
            HostRule::Exact(expected) => (host == *expected).then_some(HostMatch::Exact),
            HostRule::Subdomain(parent) => host
                .strip_suffix(parent)
                .and_then(|rest| rest.strip_suffix('.'))
                .filter(|label| !label.is_empty() && !label.contains('.'))
                .map(|label| HostMatch::Subdomain(label.to_owned())),
        }
    }
}

/// Where a shape reads its identifier from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// The rest of the path after this prefix. Exact hosts only.
    Path(&'static str),
    /// A query parameter on a fixed path. Exact hosts only.
    Query {
        path: &'static str,
        param: &'static str,
    },
    /// The label matched by a [`HostRule::Subdomain`]; the path must be empty.
    Subdomain,
}

/// One recognized URL form of a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    kind: &'static str,
    source: Source,
    attribute: &'static str,
    length: RangeInclusive<usize>,
    alphabet: Alphabet,
    marker: &'static str,
}

impl Shape {
    pub fn new(
        kind: &'static str,
        source: Source,
        attribute: &'static str,
        length: RangeInclusive<usize>,
        alphabet: Alphabet,
    ) -> Self {
        Self {
            kind,
            source,
            attribute,
            length,
            alphabet,
            marker: "",
        }
    }

    pub fn path(
        kind: &'static str,
        prefix: &'static str,
        attribute: &'static str,
        length: RangeInclusive<usize>,
        alphabet: Alphabet,
    ) -> Self {
        Self::new(kind, Source::Path(prefix), attribute, length, alphabet)
    }

    /// Prepends `marker` to the identifier when building the result. The
    /// marker is not subject to the length or alphabet checks.
    pub fn with_marker(mut self, marker: &'static str) -> Self {
        self.marker = marker;
        self
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn source(&self) -> Source {
        self.source
    }

    /// Whether every URL this shape accepts would already be taken by `earlier`.
    fn is_shadowed_by(&self, earlier: &Shape) -> bool {
        match (earlier.source, self.source) {
            (Source::Path(a), Source::Path(b)) => b.starts_with(a),
            (Source::Query { path: a, .. }, Source::Query { path: b, .. }) => a == b,
            (Source::Subdomain, Source::Subdomain) => true,
            _ => false,
        }
    }

    fn extract(&self, host: &HostMatch, path: &str, url: &Url) -> Option<String> {
        match (self.source, host) {
            (Source::Path(prefix), HostMatch::Exact) => path.strip_prefix(prefix).map(str::to_owned),
            (Source::Query { path: expected, param }, HostMatch::Exact) if path == expected => {
                Some(
                    url.query_pairs()
                        .find(|(key, _)| key == param)
                        .map(|(_, value)| value.into_owned())
                        .unwrap_or_default(),
                )
            }
            (Source::Subdomain, HostMatch::Subdomain(label)) if path.is_empty() => {
                Some(label.clone())
            }
            _ => None,
        }
    }
}

/// The data driving the shared decoding pipeline for one service.
///
/// ```
/// use slinky::{Alphabet, Decoder, Grammar, HostRule, Service, Shape};
/// use url::Url;
///
/// let grammar = Grammar::new(Service::Twitch)
///     .host(HostRule::Exact("twitch.tv"))
///     .shape(Shape::path("Channel", "/", "username", 4..=25, Alphabet::alphanumeric("_")));
///
/// let parsed = grammar.decode(Url::parse("http://twitch.tv/some_streamer/").unwrap())?;
/// assert_eq!(parsed.id(), "some_streamer");
/// assert_eq!(parsed.url().scheme(), "https");
/// # Ok::<(), slinky::SlinkyError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    service: Service,
    hosts: Vec<HostRule>,
    shapes: Vec<Shape>,
    platform: Option<&'static str>,
}

impl Grammar {
    pub fn new(service: Service) -> Self {
        Self {
            service,
            hosts: Vec::new(),
            shapes: Vec::new(),
            platform: None,
        }
    }

    pub fn host(mut self, rule: HostRule) -> Self {
        self.hosts.push(rule);
        self
    }

    /// Appends a shape. Shapes are tried in the order they were added.
    pub fn shape(mut self, shape: Shape) -> Self {
        debug_assert!(
            !self.shapes.iter().any(|earlier| shape.is_shadowed_by(earlier)),
            "{} shape {:?} is unreachable",
            self.service,
            shape.source
        );
        self.shapes.push(shape);
        self
    }

    /// Marks the service as one deployment of a federated platform.
    pub fn platform(mut self, platform: &'static str) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn service(&self) -> Service {
        self.service
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    fn invalid(&self, reason: InvalidReason) -> SlinkyError {
        SlinkyError::invalid(self.service, reason)
    }

    fn normalize_scheme(&self, url: &mut Url) -> Result<(), SlinkyError> {
        if url.scheme() == "http" && url.set_scheme("https").is_err() {
            return Err(self.invalid(InvalidReason::Scheme(url.scheme().to_owned())));
        }
        if url.scheme() != "https" {
            return Err(self.invalid(InvalidReason::Scheme(url.scheme().to_owned())));
        }
        Ok(())
    }

    fn match_host(&self, url: &Url) -> Result<HostMatch, SlinkyError> {
        let host = url.host_str().unwrap_or_default();
        if let Some(port) = url.port() {
            return Err(self.invalid(InvalidReason::Host(format!("{host}:{port}"))));
        }
        self.hosts
            .iter()
            .find_map(|rule| rule.matches(host))
            .ok_or_else(|| self.invalid(InvalidReason::Host(host.to_owned())))
    }
}

impl Decoder for Grammar {
    fn decode(&self, mut url: Url) -> Result<SocialUrl, SlinkyError> {
        self.normalize_scheme(&mut url)?;
        let host = self.match_host(&url)?;

        let path = trim_trailing_slash(url.path());
        let (shape, raw) = self
            .shapes
            .iter()
            .find_map(|shape| shape.extract(&host, path, &url).map(|raw| (shape, raw)))
            .ok_or_else(|| self.invalid(InvalidReason::Path(path.to_owned())))?;

        let len = raw.chars().count();
        if !shape.length.contains(&len) {
            return Err(self.invalid(InvalidReason::Length {
                len,
                min: *shape.length.start(),
                max: *shape.length.end(),
            }));
        }
        if !raw.chars().all(|c| shape.alphabet.contains(c)) {
            return Err(self.invalid(InvalidReason::Characters(raw)));
        }

        let id = format!("{}{}", shape.marker, raw);
        let parsed = SocialUrl::new(self.service, shape.kind, shape.attribute, id, url);
        Ok(match self.platform {
            Some(platform) => parsed.with_attribute("platform", platform),
            None => parsed,
        })
    }
}
