//! Canonical identity of a remote githost server
//!
//! A [`HostAddress`] is produced from whatever string a user typed (a bare
//! host, a browser URL, a credential-store key) and canonicalizes it to a
//! normalized host name plus the derived API, web and credential-key forms.
//! Two addresses are equal exactly when their normalized hosts are equal.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Normalized host of the public githost instance
const DOTCOM_HOST: &str = "github.com";

/// Canonical identity of a remote githost server
///
/// Construct via [`HostAddress::create`], which never fails: any input
/// normalizes to *some* address. Blank input canonicalizes to the public
/// default host. The type is an immutable value; equality and hashing are
/// defined purely on the normalized host.
#[derive(Debug, Clone)]
pub struct HostAddress {
    normalized_host: String,
    web_uri: String,
    api_uri: String,
}

impl HostAddress {
    /// Canonicalizing factory
    ///
    /// Accepts bare hosts (`ghe.io`), full URLs (`https://ghe.io/org/repo`)
    /// and credential-key forms (`login:git:ghe.io/`). The public API and
    /// gist hosts fold into the default `github.com` address.
    pub fn create(raw: &str) -> Self {
        let normalized_host = normalize(raw);

        let api_uri = if normalized_host == DOTCOM_HOST {
            "https://api.github.com/".to_string()
        } else {
            format!("https://{normalized_host}/api/v3/")
        };

        Self {
            web_uri: format!("https://{normalized_host}/"),
            api_uri,
            normalized_host,
        }
    }

    /// The address of the public githost instance
    pub fn github_com() -> Self {
        Self::create(DOTCOM_HOST)
    }

    /// The normalized host (`github.com`, `ghe.io`)
    pub fn host(&self) -> &str {
        &self.normalized_host
    }

    /// Base URI for web access, with trailing slash (`https://ghe.io/`)
    pub fn web_uri(&self) -> &str {
        &self.web_uri
    }

    /// Base URI for API access (`https://api.github.com/` for the public
    /// host, `https://<host>/api/v3/` for enterprise installations)
    pub fn api_uri(&self) -> &str {
        &self.api_uri
    }

    /// Key under which secrets for this host are stored in a login cache
    pub fn credential_cache_key(&self) -> String {
        format!("{}/", self.normalized_host)
    }

    /// Whether this is the public default host
    pub fn is_github_dot_com(&self) -> bool {
        self.normalized_host == DOTCOM_HOST
    }
}

impl PartialEq for HostAddress {
    fn eq(&self, other: &Self) -> bool {
        self.normalized_host == other.normalized_host
    }
}

impl Eq for HostAddress {}

impl Hash for HostAddress {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized_host.hash(state);
    }
}

impl fmt::Display for HostAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized_host)
    }
}

/// Reduce a raw input string to a bare, lower-case host name
fn normalize(raw: &str) -> String {
    let mut s = raw.trim().to_ascii_lowercase();

    if let Some(rest) = s.strip_prefix("login:") {
        s = rest.to_string();
    }

    // "https://host", "git://host" and friends: keep everything after the
    // scheme separator. The bare "git:host" credential-key form has no
    // separator and is handled by a plain prefix strip.
    if let Some(idx) = s.find("://") {
        s = s[idx + 3..].to_string();
    } else if let Some(rest) = s.strip_prefix("git:") {
        s = rest.to_string();
    }

    // Drop any path component, then userinfo.
    if let Some(idx) = s.find('/') {
        s.truncate(idx);
    }
    if let Some(idx) = s.rfind('@') {
        s = s[idx + 1..].to_string();
    }

    if s.is_empty() {
        return DOTCOM_HOST.to_string();
    }

    // The public API and gist hosts are aliases of the dotcom address.
    if s == "api.github.com" || s == "gist.github.com" {
        return DOTCOM_HOST.to_string();
    }

    s
}
