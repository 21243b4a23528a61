//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Token signing and refresh-cookie configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// RSA private key for access tokens (PEM, base64 PEM, or PEM with `\n` escapes).
    pub jwt_access_key: String,
    /// RSA private key for refresh tokens. Must differ from the access key.
    pub jwt_refresh_key: String,
    /// Issuer claim written into and required from every token.
    #[serde(default = "default_issuer")]
    pub issuer: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: i64,
    /// Refresh token TTL in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_days: i64,
    /// Clock skew tolerated when checking `exp`, in seconds.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
    /// Refresh token cookie settings.
    #[serde(default)]
    pub cookie: CookieConfig,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_access_key", &"[REDACTED]")
            .field("jwt_refresh_key", &"[REDACTED]")
            .field("issuer", &self.issuer)
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .field("refresh_ttl_days", &self.refresh_ttl_days)
            .field("leeway_seconds", &self.leeway_seconds)
            .field("cookie", &self.cookie)
            .finish()
    }
}

/// Attributes of the cookie that carries the refresh token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CookieConfig {
    /// Cookie name.
    #[serde(default = "default_cookie_name")]
    pub name: String,
    /// Whether the cookie is restricted to HTTPS.
    #[serde(default = "default_secure")]
    pub secure: bool,
    /// `SameSite` policy: `"strict"`, `"lax"`, or `"none"`.
    #[serde(default = "default_same_site")]
    pub same_site: String,
    /// Cookie path.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: default_cookie_name(),
            secure: default_secure(),
            same_site: default_same_site(),
            path: default_path(),
        }
    }
}

fn default_issuer() -> String {
    "user-service".to_string()
}

fn default_access_ttl() -> i64 {
    2
}

fn default_refresh_ttl() -> i64 {
    30
}

fn default_leeway() -> u64 {
    5
}

fn default_cookie_name() -> String {
    "refresh_token".to_string()
}

fn default_secure() -> bool {
    true
}

fn default_same_site() -> String {
    "strict".to_string()
}

fn default_path() -> String {
    "/".to_string()
}
