//! Service identifiers for the container registry.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Normalized key under which bindings, hooks, tags and types are stored.
///
/// An identifier may name a concrete type, an interface, or be an arbitrary
/// string such as `"mailer.default"`. Leading namespace separators (`\` and
/// `::`) are stripped on construction so `"\\App\\Mailer"` and
/// `"App\\Mailer"` address the same binding.
///
/// Cloning is cheap: the text lives behind an `Arc<str>`.
///
/// # Examples
///
/// ```rust
/// use wiring::Identifier;
///
/// let a = Identifier::new("\\App\\Mailer");
/// let b = Identifier::new("App\\Mailer");
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "App\\Mailer");
///
/// let c = Identifier::new("::core::Clock");
/// assert_eq!(c.as_str(), "core::Clock");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(Arc<str>);

impl Identifier {
    /// Creates a normalized identifier.
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(Arc::from(normalize(raw.as_ref())))
    }

    /// Returns the normalized text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits a `Type@method` identifier into its type and method parts.
    ///
    /// Empty segments are ignored, so `"Widget@"` and `"@Widget"` both parse
    /// as the bare type `Widget`. Anything after a second `@` is dropped.
    ///
    /// ```rust
    /// use wiring::Identifier;
    ///
    /// let id = Identifier::new("Widget@describe");
    /// let (ty, method) = id.split_method();
    /// assert_eq!(ty.as_str(), "Widget");
    /// assert_eq!(method, Some("describe"));
    ///
    /// let bare = Identifier::new("Widget@");
    /// let (ty, method) = bare.split_method();
    /// assert_eq!(ty.as_str(), "Widget");
    /// assert_eq!(method, None);
    /// ```
    pub fn split_method(&self) -> (Identifier, Option<&str>) {
        let mut parts = self.0.split('@').filter(|part| !part.is_empty());
        match (parts.next(), parts.next()) {
            (Some(ty), Some(method)) => (Identifier::new(ty), Some(method)),
            _ => (Identifier::new(self.0.replace('@', "")), None),
        }
    }

    /// Whether the identifier carries an `@` call suffix.
    pub fn has_method(&self) -> bool {
        self.split_method().1.is_some()
    }
}

fn normalize(raw: &str) -> &str {
    let mut s = raw;
    loop {
        if let Some(rest) = s.strip_prefix('\\') {
            s = rest;
        } else if let Some(rest) = s.strip_prefix("::") {
            s = rest;
        } else {
            return s;
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}

impl Borrow<str> for Identifier {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Identifier::new(value)
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        Identifier::new(value)
    }
}

impl From<&String> for Identifier {
    fn from(value: &String) -> Self {
        Identifier::new(value)
    }
}

impl From<&Identifier> for Identifier {
    fn from(value: &Identifier) -> Self {
        value.clone()
    }
}

#[cfg(feature = "config")]
impl serde::Serialize for Identifier {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "config")]
impl<'de> serde::Deserialize<'de> for Identifier {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Identifier::new)
    }
}
