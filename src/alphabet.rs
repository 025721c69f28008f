use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::utils::{ConfigError, Result};

/// Name of a character category, such as `digit` or `symbol`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Role(String);

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Role(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Role {
    fn from(name: &str) -> Self {
        Role(name.to_string())
    }
}

impl From<String> for Role {
    fn from(name: String) -> Self {
        Role(name)
    }
}

impl PartialEq<str> for Role {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Role {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A role together with the literal characters that may stand for it.
///
/// Characters are kept verbatim and in order: duplicates are allowed and a
/// "character" may be any string token.
#[derive(Debug, Clone, PartialEq)]
pub struct AlphabetEntry {
    role: Role,
    chars: Vec<String>,
}

impl AlphabetEntry {
    /// Create an entry, rejecting an empty character list
    pub fn new<R, I, S>(role: R, chars: I) -> Result<Self>
    where
        R: Into<Role>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let role = role.into();
        let chars: Vec<String> = chars.into_iter().map(Into::into).collect();
        if chars.is_empty() {
            return Err(ConfigError::EmptyAlphabetEntry(role.to_string()).into());
        }
        Ok(AlphabetEntry { role, chars })
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn chars(&self) -> &[String] {
        &self.chars
    }

    /// Pick one of the characters uniformly at random
    pub fn get<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        // `new` guarantees at least one character
        self.chars
            .choose(rng)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

impl fmt::Display for AlphabetEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Char({})>", self.chars.join(", "))
    }
}
