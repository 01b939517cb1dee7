//! Cookie jar snapshot

use std::collections::btree_map;
use std::collections::BTreeMap;

use reqwest::header::HeaderValue;

/// Cookies held for the effective URI once an exchange finished
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    cookies: BTreeMap<String, String>,
}

impl CookieJar {
    /// Empty jar
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `Cookie` request header (`a=1; b=2`)
    pub fn from_header(header: Option<&HeaderValue>) -> Self {
        let Some(raw) = header.and_then(|value| value.to_str().ok()) else {
            return Self::default();
        };

        raw.split(';')
            .filter_map(|pair| {
                let (name, value) = pair.trim().split_once('=')?;
                let name = name.trim();
                if name.is_empty() {
                    return None;
                }
                Some((name.to_string(), value.trim().to_string()))
            })
            .collect()
    }

    /// Value of the cookie called `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// Number of cookies
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    /// True when the jar holds no cookies
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Iterate `(name, value)` pairs in name order
    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.cookies.iter()
    }
}

impl FromIterator<(String, String)> for CookieJar {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            cookies: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a CookieJar {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
