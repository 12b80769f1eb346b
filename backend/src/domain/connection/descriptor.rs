//! Connection descriptors and credential redaction.

use std::fmt;

use url::Url;

/// Mask written in place of a password.
pub const REDACTED: &str = "***";

const UNPARSEABLE: &str = "<unparseable descriptor>";

/// A non-empty connection string naming a store endpoint and credentials.
///
/// `Display` and `Debug` both redact, so a descriptor can be logged directly.
///
/// # Examples
/// ```
/// use ms_app::domain::connection::Descriptor;
///
/// let descriptor = Descriptor::new("postgres://app:s3cret@db:5432/app").expect("non-empty");
/// assert!(!descriptor.to_string().contains("s3cret"));
/// assert!(Descriptor::new("   ").is_none());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Descriptor(String);

impl Descriptor {
    /// Wrap `raw`, returning `None` for blank input so callers can skip it.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    /// The raw connection string, credentials included.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Connection string with the password masked.
    pub fn redacted(&self) -> String {
        redact_credentials(&self.0)
    }

    /// Best-effort classification of the endpoint behind this descriptor.
    pub fn route(&self) -> StoreRoute {
        StoreRoute::classify(&self.0)
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Descriptor").field(&self.redacted()).finish()
    }
}

/// Replace the password in a URL-style connection string with [`REDACTED`].
///
/// Both the userinfo password and a `password` query parameter are masked.
/// Input that does not parse as a URL is replaced wholesale, since its
/// secret cannot be located reliably.
pub fn redact_credentials(raw: &str) -> String {
    let Ok(mut url) = Url::parse(raw) else {
        return UNPARSEABLE.to_owned();
    };

    if url.password().is_some() && url.set_password(Some(REDACTED)).is_err() {
        return UNPARSEABLE.to_owned();
    }

    let has_password_param = url.query_pairs().any(|(key, _)| key == "password");
    if has_password_param {
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(key, value)| {
                let value = if key == "password" {
                    REDACTED.to_owned()
                } else {
                    value.into_owned()
                };
                (key.into_owned(), value)
            })
            .collect();
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }

    url.to_string()
}

/// Which part of the replicated deployment a descriptor points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreRoute {
    /// TCP load balancer spreading connections across primary and replicas.
    LoadBalancer,
    /// The write-capable primary, addressed directly.
    Primary,
    /// A read replica, addressed directly.
    Replica,
    /// Anything else, e.g. a local instance.
    Direct,
}

impl StoreRoute {
    fn classify(raw: &str) -> Self {
        let host = Url::parse(raw)
            .ok()
            .and_then(|url| url.host_str().map(str::to_ascii_lowercase))
            .unwrap_or_default();

        if host.contains("haproxy") || host.contains("balancer") {
            Self::LoadBalancer
        } else if host.contains("master") || host.contains("primary") {
            Self::Primary
        } else if host.contains("slave") || host.contains("replica") {
            Self::Replica
        } else {
            Self::Direct
        }
    }
}

impl fmt::Display for StoreRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::LoadBalancer => "load balancer",
            Self::Primary => "primary",
            Self::Replica => "replica",
            Self::Direct => "direct",
        };
        f.write_str(label)
    }
}
