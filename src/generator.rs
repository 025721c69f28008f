use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::alphabet::{AlphabetEntry, Role};
use crate::config::load_config;
use crate::rule::{HasRole, Rule};
use crate::utils::{PassgenError, Result};

/// Run parameters for a batch of passwords
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    /// Shortest password length, inclusive
    pub min_len: usize,
    /// Longest password length, inclusive
    pub max_len: usize,
    /// How many passwords to produce
    pub count: usize,
    /// Seed for a reproducible run; entropy is used when absent
    pub seed: Option<u64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            min_len: 8,
            max_len: 12,
            count: 10,
            seed: None,
        }
    }
}

impl GenerationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_len > self.max_len {
            return Err(PassgenError::InvalidLengthRange {
                min: self.min_len,
                max: self.max_len,
            });
        }
        Ok(())
    }

    /// Build the random source for this run
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// One generated character along with the role it was chosen for
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickedChar<'a> {
    pub role: &'a Role,
    pub value: &'a str,
}

impl HasRole for PickedChar<'_> {
    fn role(&self) -> &Role {
        self.role
    }
}

/// Produces passwords from an alphabet and a set of sequencing rules.
///
/// The generator itself is immutable; every call takes the random source
/// explicitly so runs can be made reproducible by seeding it.
#[derive(Debug, Clone)]
pub struct PasswordGenerator {
    alphabet: Vec<AlphabetEntry>,
    rules: Vec<Rule>,
}

impl PasswordGenerator {
    /// Create a generator; inputs are expected to be validated already
    pub fn new(alphabet: Vec<AlphabetEntry>, rules: Vec<Rule>) -> Self {
        debug!(
            entries = alphabet.len(),
            rules = rules.len(),
            "Created password generator"
        );
        PasswordGenerator { alphabet, rules }
    }

    /// Load a JSON configuration file and build a generator from it
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let (alphabet, rules) = load_config(path)?;
        Ok(Self::new(alphabet, rules))
    }

    pub fn alphabet(&self) -> &[AlphabetEntry] {
        &self.alphabet
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Decide the role for the next position.
    ///
    /// An empty history starts from the first role of a random rule. Otherwise
    /// a random rule consistent with the history supplies its last role.
    pub fn find_role<T, R>(&self, history: &[T], rng: &mut R) -> Result<&Role>
    where
        T: HasRole,
        R: Rng + ?Sized,
    {
        if history.is_empty() {
            return self
                .rules
                .choose(rng)
                .map(Rule::first_role)
                .ok_or_else(|| no_matching_rule(history));
        }

        let candidates: Vec<&Rule> = self
            .rules
            .iter()
            .filter(|rule| rule.matches(history))
            .collect();

        candidates
            .choose(rng)
            .copied()
            .map(Rule::last_role)
            .ok_or_else(|| no_matching_rule(history))
    }

    /// Pick a character for `role`: first a random entry with that role,
    /// then a random character of that entry
    pub fn get_char<'a, R>(&'a self, role: &Role, rng: &mut R) -> Result<PickedChar<'a>>
    where
        R: Rng + ?Sized,
    {
        let entries: Vec<&AlphabetEntry> = self
            .alphabet
            .iter()
            .filter(|entry| entry.role() == role)
            .collect();

        let entry = entries
            .choose(rng)
            .copied()
            .ok_or_else(|| PassgenError::NoCharsForRole(role.clone()))?;

        Ok(PickedChar {
            role: entry.role(),
            value: entry.get(rng),
        })
    }

    /// Lazily produce `count` characters, each role chosen against the ones before
    pub fn make_chars<'a, R>(&'a self, count: usize, rng: &'a mut R) -> Chars<'a, R>
    where
        R: Rng + ?Sized,
    {
        Chars {
            generator: self,
            rng,
            history: Vec::new(),
            count,
            failed: false,
        }
    }

    /// Generate one password with a length drawn from `min_len..=max_len`
    pub fn make_one<R>(&self, min_len: usize, max_len: usize, rng: &mut R) -> Result<String>
    where
        R: Rng + ?Sized,
    {
        if min_len > max_len {
            return Err(PassgenError::InvalidLengthRange {
                min: min_len,
                max: max_len,
            });
        }

        let length = rng.gen_range(min_len..=max_len);
        let mut password = String::new();
        for picked in self.make_chars(length, rng) {
            password.push_str(picked?.value);
        }
        Ok(password)
    }

    /// Lazily produce `count` independent passwords
    pub fn make_many<'a, R>(
        &'a self,
        min_len: usize,
        max_len: usize,
        count: usize,
        rng: &'a mut R,
    ) -> Passwords<'a, R>
    where
        R: Rng + ?Sized,
    {
        Passwords {
            generator: self,
            rng,
            min_len,
            max_len,
            remaining: count,
        }
    }

    /// Same as [`make_many`](Self::make_many) driven by a [`GenerationConfig`]
    pub fn generate<'a, R>(&'a self, config: &GenerationConfig, rng: &'a mut R) -> Passwords<'a, R>
    where
        R: Rng + ?Sized,
    {
        self.make_many(config.min_len, config.max_len, config.count, rng)
    }
}

fn no_matching_rule<T: HasRole>(history: &[T]) -> PassgenError {
    let history = history
        .iter()
        .map(|item| item.role().as_str())
        .collect::<Vec<_>>()
        .join(", ");
    PassgenError::NoMatchingRule { history }
}

/// Iterator returned by [`PasswordGenerator::make_chars`].
///
/// Yields at most one error, after which it is exhausted.
pub struct Chars<'a, R: ?Sized> {
    generator: &'a PasswordGenerator,
    rng: &'a mut R,
    history: Vec<PickedChar<'a>>,
    count: usize,
    failed: bool,
}

impl<'a, R: Rng + ?Sized> Chars<'a, R> {
    /// Characters produced so far, in order
    pub fn history(&self) -> &[PickedChar<'a>] {
        &self.history
    }

    fn step(&mut self) -> Result<PickedChar<'a>> {
        let generator = self.generator;
        let role = generator.find_role(&self.history, &mut *self.rng)?;
        trace!(position = self.history.len(), %role, "Chose role");
        let picked = generator.get_char(role, &mut *self.rng)?;
        self.history.push(picked);
        Ok(picked)
    }
}

impl<'a, R: Rng + ?Sized> Iterator for Chars<'a, R> {
    type Item = Result<PickedChar<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.history.len() >= self.count {
            return None;
        }
        let result = self.step();
        self.failed = result.is_err();
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        (0, Some(self.count - self.history.len()))
    }
}

/// Iterator returned by [`PasswordGenerator::make_many`].
///
/// Stops after the first failed password; earlier ones stay valid.
pub struct Passwords<'a, R: ?Sized> {
    generator: &'a PasswordGenerator,
    rng: &'a mut R,
    min_len: usize,
    max_len: usize,
    remaining: usize,
}

impl<R: Rng + ?Sized> Iterator for Passwords<'_, R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let result = self
            .generator
            .make_one(self.min_len, self.max_len, &mut *self.rng);
        self.remaining = if result.is_err() { 0 } else { self.remaining - 1 };
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}
