//! Store URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::path::PathBuf;
use std::str::FromStr;
use url::{Host, Url};

use crate::error::{Error, InvalidInputError};

/// Where a store URL points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreKind {
    /// A directory of JSON files (`file://`).
    Directory(PathBuf),
    /// A hosted database reached over its REST API.
    Hosted,
}

/// A validated record store URL.
///
/// `file:///...` names a directory store. `https://...` names a hosted
/// database; plain `http://` is accepted for loopback hosts only, so an
/// emulator can run locally.
///
/// # Example
///
/// ```
/// use parish_core::StoreUrl;
/// use parish_core::types::StoreKind;
///
/// let hosted: StoreUrl = "https://parish-default-rtdb.firebaseio.com".parse().unwrap();
/// assert_eq!(hosted.node_url("priests/abc"),
///            "https://parish-default-rtdb.firebaseio.com/priests/abc.json");
///
/// let local: StoreUrl = "file:///var/lib/parish".parse().unwrap();
/// assert!(matches!(local.kind(), StoreKind::Directory(_)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StoreUrl(Url);

impl StoreUrl {
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let invalid = |reason: &str| -> Error {
            InvalidInputError::StoreUrl {
                value: s.to_string(),
                reason: reason.to_string(),
            }
            .into()
        };

        let url = Url::parse(s).map_err(|e| invalid(&e.to_string()))?;
        match url.scheme() {
            "file" => {
                if url.path().trim_matches('/').is_empty() {
                    return Err(invalid("a directory store needs a path"));
                }
            }
            "https" | "http" => {
                let Some(host) = url.host() else {
                    return Err(invalid("a hosted store needs a host"));
                };
                if url.scheme() == "http" && !is_loopback(&host) {
                    return Err(invalid("plain http is only allowed for loopback hosts"));
                }
                if url.query().is_some() || url.fragment().is_some() {
                    return Err(invalid("query and fragment are not allowed"));
                }
            }
            other => return Err(invalid(&format!("unsupported scheme '{}'", other))),
        }

        Ok(Self(url))
    }

    /// Which backend serves this URL.
    ///
    /// A `file://` URL that does not map to a local path is reported as
    /// hosted, so opening it fails at the first request rather than here.
    pub fn kind(&self) -> StoreKind {
        match self.0.scheme() {
            "file" => self
                .0
                .to_file_path()
                .map(StoreKind::Directory)
                .unwrap_or(StoreKind::Hosted),
            _ => StoreKind::Hosted,
        }
    }

    /// REST address of the JSON node at `path`: `{base}/{path}.json`.
    ///
    /// Each `/`-separated segment is percent-encoded, so a key holding `?`,
    /// `#` or `%` still names its own node.
    pub fn node_url(&self, path: &str) -> String {
        let mut url = self.0.clone();
        let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let last = format!("{}.json", segments.pop().unwrap_or_default());

        if let Ok(mut parts) = url.path_segments_mut() {
            parts.pop_if_empty().extend(segments).push(&last);
        }
        url.into()
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

fn is_loopback(host: &Host<&str>) -> bool {
    match host {
        Host::Domain(name) => name.eq_ignore_ascii_case("localhost"),
        Host::Ipv4(addr) => *addr == Ipv4Addr::LOCALHOST,
        Host::Ipv6(addr) => *addr == Ipv6Addr::LOCALHOST,
    }
}

impl fmt::Display for StoreUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl FromStr for StoreUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for StoreUrl {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<StoreUrl> for String {
    fn from(url: StoreUrl) -> Self {
        url.0.into()
    }
}

impl AsRef<str> for StoreUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}
