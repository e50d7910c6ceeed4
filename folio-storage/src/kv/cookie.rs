//! Request-scoped store over HTTP cookies.
//!
//! Reads come from the request's `Cookie` header. Writes are recorded and
//! rendered as `Set-Cookie` values for the response.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::RwLock;

use folio_core::{StorageError, StorageResult};

use super::KeyValueStore;

/// `SameSite` cookie attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attributes attached to every cookie this store writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieOptions {
    pub path: String,
    /// `None` makes a session cookie.
    pub max_age_secs: Option<u64>,
    pub same_site: SameSite,
    pub secure: bool,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            max_age_secs: Some(60 * 60 * 24 * 365),
            same_site: SameSite::Lax,
            secure: false,
        }
    }
}

#[derive(Debug, Default)]
struct CookieJar {
    incoming: BTreeMap<String, String>,
    outgoing: BTreeMap<String, String>,
}

/// Cookie-backed store for one request/response exchange.
#[derive(Debug, Default)]
pub struct CookieStore {
    options: CookieOptions,
    jar: RwLock<CookieJar>,
}

impl CookieStore {
    /// Parse a `Cookie` request header (`a=1; b=2`).
    ///
    /// Malformed pairs are skipped. On duplicate names the first one wins,
    /// matching how browsers order more specific paths first.
    pub fn from_header(header: Option<&str>, options: CookieOptions) -> Self {
        let mut incoming = BTreeMap::new();
        for pair in header.unwrap_or_default().split(';') {
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            let value = value.trim().trim_matches('"');
            incoming
                .entry(name.to_string())
                .or_insert_with(|| value.to_string());
        }
        Self {
            options,
            jar: RwLock::new(CookieJar {
                incoming,
                outgoing: BTreeMap::new(),
            }),
        }
    }

    pub fn options(&self) -> &CookieOptions {
        &self.options
    }

    /// `Set-Cookie` header values for every write, ordered by cookie name.
    pub fn set_cookie_headers(&self) -> StorageResult<Vec<String>> {
        let jar = self.jar.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(jar
            .outgoing
            .iter()
            .map(|(name, value)| self.render(name, value))
            .collect())
    }

    fn render(&self, name: &str, value: &str) -> String {
        let mut header = format!("{}={}; Path={}", name, value, self.options.path);
        if let Some(max_age) = self.options.max_age_secs {
            header.push_str(&format!("; Max-Age={}", max_age));
        }
        header.push_str(&format!("; SameSite={}", self.options.same_site));
        if self.options.secure || self.options.same_site == SameSite::None {
            header.push_str("; Secure");
        }
        header
    }
}

impl KeyValueStore for CookieStore {
    fn label(&self) -> &str {
        "cookie"
    }

    fn get_string(&self, key: &str) -> StorageResult<Option<String>> {
        let jar = self.jar.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(jar
            .outgoing
            .get(key)
            .or_else(|| jar.incoming.get(key))
            .cloned())
    }

    fn set_string(&self, key: &str, value: &str) -> StorageResult<()> {
        if !is_cookie_safe(key) || !is_cookie_safe(value) {
            return Err(StorageError::Serialization {
                reason: format!("Cannot store {:?}={:?} in a cookie", key, value),
            });
        }
        let mut jar = self.jar.write().map_err(|_| StorageError::LockPoisoned)?;
        jar.outgoing.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

fn is_cookie_safe(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_ascii_graphic() && !matches!(c, ';' | ',' | '"' | '\\' | '='))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header() -> StorageResult<()> {
        let store = CookieStore::from_header(
            Some("theme-name=galaxy; theme-mode=light; session=abc"),
            CookieOptions::default(),
        );
        assert_eq!(store.get_string("theme-name")?, Some("galaxy".to_string()));
        assert_eq!(store.get_string("theme-mode")?, Some("light".to_string()));
        assert_eq!(store.get_string("missing")?, None);
        Ok(())
    }

    #[test]
    fn test_parse_tolerates_garbage() -> StorageResult<()> {
        let store = CookieStore::from_header(
            Some(";;novalue; =x; theme-name=\"forest\"; theme-name=ocean"),
            CookieOptions::default(),
        );
        assert_eq!(store.get_string("theme-name")?, Some("forest".to_string()));
        assert_eq!(store.get_string("novalue")?, None);

        let empty = CookieStore::from_header(None, CookieOptions::default());
        assert_eq!(empty.get_string("theme-name")?, None);
        Ok(())
    }

    #[test]
    fn test_writes_shadow_request_cookies() -> StorageResult<()> {
        let store = CookieStore::from_header(Some("theme-name=galaxy"), CookieOptions::default());
        store.set_string("theme-name", "ocean")?;
        assert_eq!(store.get_string("theme-name")?, Some("ocean".to_string()));
        Ok(())
    }

    #[test]
    fn test_set_cookie_rendering() -> StorageResult<()> {
        let store = CookieStore::from_header(None, CookieOptions::default());
        assert!(store.set_cookie_headers()?.is_empty());

        store.set_string("theme-name", "galaxy")?;
        store.set_string("theme-mode", "dark")?;

        let headers = store.set_cookie_headers()?;
        assert_eq!(
            headers,
            vec![
                "theme-mode=dark; Path=/; Max-Age=31536000; SameSite=Lax".to_string(),
                "theme-name=galaxy; Path=/; Max-Age=31536000; SameSite=Lax".to_string(),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_session_cookie_and_secure() -> StorageResult<()> {
        let options = CookieOptions {
            path: "/app".to_string(),
            max_age_secs: None,
            same_site: SameSite::None,
            secure: false,
        };
        let store = CookieStore::from_header(None, options);
        store.set_string("theme-mode", "light")?;
        assert_eq!(
            store.set_cookie_headers()?,
            vec!["theme-mode=light; Path=/app; SameSite=None; Secure".to_string()]
        );
        Ok(())
    }

    #[test]
    fn test_rejects_unsafe_values() {
        let store = CookieStore::from_header(None, CookieOptions::default());
        let result = store.set_string("theme-name", "bad; Path=/evil");
        assert!(matches!(result, Err(StorageError::Serialization { .. })));
    }
}
