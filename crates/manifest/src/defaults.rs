//! Attribute defaults carried across manifest lines

use pkgv_errors::ManifestError;
use std::collections::BTreeMap;

/// Raw attribute map, keyword to unparsed text value
pub type Attributes = BTreeMap<String, String>;

/// Keyword accepted by `/unset` to drop every default at once
const UNSET_ALL: &str = "all";

/// Default attributes maintained by `/set` and `/unset`
///
/// Only directive processing mutates this value; entry construction reads it
/// through [`AttributeDefaults::overlay`], which always returns a fresh map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeDefaults {
    values: Attributes,
}

impl AttributeDefaults {
    /// Empty defaults, the state at the top of every manifest
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a `/set` directive
    ///
    /// Every token must be `key=value`; later tokens overwrite earlier ones.
    ///
    /// # Errors
    /// Returns `ManifestError::MalformedToken` if a token is not a single
    /// `key=value` pair. Tokens before the malformed one have already been
    /// applied, which does not matter since the error is fatal.
    pub fn apply_set<'a, I>(&mut self, tokens: I, line: usize) -> Result<(), ManifestError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for token in tokens {
            let (key, value) = split_token(token, line)?;
            self.values.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }

    /// Apply an `/unset` directive
    ///
    /// Unsetting a key that has no default is a no-op.
    pub fn apply_unset<'a, I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for key in keys {
            if key == UNSET_ALL {
                self.values.clear();
            } else {
                self.values.remove(key);
            }
        }
    }

    /// Merge explicit attributes over the defaults
    ///
    /// Explicit values win. The result shares nothing with `self`.
    #[must_use]
    pub fn overlay(&self, explicit: Attributes) -> Attributes {
        let mut resolved = self.values.clone();
        resolved.extend(explicit);
        resolved
    }

    /// Current default for `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Whether `key` currently has a default
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over the defaults in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Split a `key=value` token, rejecting anything without exactly one `=`
pub(crate) fn split_token(token: &str, line: usize) -> Result<(&str, &str), ManifestError> {
    let malformed = || ManifestError::MalformedToken {
        line,
        token: token.to_string(),
    };

    let (key, value) = token.split_once('=').ok_or_else(malformed)?;
    if key.is_empty() || value.contains('=') {
        return Err(malformed());
    }
    Ok((key, value))
}
