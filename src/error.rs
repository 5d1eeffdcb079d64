use crate::Service;
use std::fmt;
use thiserror::Error;
#[cfg(feature = "logging")]
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlinkyError {
    #[error("Failed to parse URL: {0}")]
    MalformedInput(#[from] url::ParseError),

    #[error("URL is not absolute")]
    NotAbsolute,

    #[error("URL belongs to an unknown service: host `{0}`")]
    UnknownService(String),

    #[error("Invalid {service} URL: {reason}")]
    InvalidUrl {
        service: Service,
        reason: InvalidReason,
    },
}

/// Why a decoder rejected a URL whose host it was chosen for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidReason {
    Scheme(String),
    Host(String),
    Path(String),
    Length { len: usize, min: usize, max: usize },
    Characters(String),
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::Scheme(scheme) => write!(f, "unsupported scheme `{scheme}`"),
            InvalidReason::Host(host) => write!(f, "unsupported host `{host}`"),
            InvalidReason::Path(path) => write!(f, "unrecognized path `{path}`"),
            InvalidReason::Length { len, min, max } => {
                write!(f, "identifier length {len} outside {min}..={max}")
            }
            InvalidReason::Characters(id) => {
                write!(f, "identifier `{id}` contains disallowed characters")
            }
        }
    }
}

impl SlinkyError {
    pub(crate) fn invalid(service: Service, reason: InvalidReason) -> Self {
        SlinkyError::InvalidUrl { service, reason }
    }

    /// The decoder-level reason, if this error came from a decoder.
    pub fn reason(&self) -> Option<&InvalidReason> {
        match self {
            SlinkyError::InvalidUrl { reason, .. } => Some(reason),
            _ => None,
        }
    }

    #[cfg(feature = "logging")]
    pub fn log(&self) {
        match self {
            SlinkyError::MalformedInput(e) => {
                warn!(error = %e, "URL parsing failed");
            }
            SlinkyError::NotAbsolute => {
                warn!("Relative URL rejected");
            }
            SlinkyError::UnknownService(host) => {
                warn!(host = %host, "No decoder registered for host");
            }
            SlinkyError::InvalidUrl { service, reason } => {
                warn!(
                    service = %service,
                    reason = %reason,
                    "URL failed service validation"
                );
            }
        }
    }
}
