//! Passgen is a rule-driven random password generator.
//!
//! A password grammar consists of character roles (such as `digit` or
//! `letter`), an alphabet giving the literal characters for each role, and
//! sequencing rules written as role templates like `{letter}{digit}`. Each
//! position of a password gets a role consistent with at least one rule,
//! and then a random character of that role.
//!
//! # Example
//!
//! ```rust
//! use passgen::{AlphabetEntry, PasswordGenerator, Rule};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let alphabet = vec![
//!     AlphabetEntry::new("digit", ["1", "2"]).unwrap(),
//!     AlphabetEntry::new("letter", ["a", "b"]).unwrap(),
//! ];
//! let rules = vec![Rule::from_template("{digit}{letter}").unwrap()];
//! let generator = PasswordGenerator::new(alphabet, rules);
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let password = generator.make_one(2, 2, &mut rng).unwrap();
//! assert_eq!(password.len(), 2);
//! assert!(password.starts_with('1') || password.starts_with('2'));
//! ```

pub mod alphabet;
pub mod config;
pub mod generator;
pub mod rule;
pub mod utils;

pub use alphabet::{AlphabetEntry, Role};
pub use config::{CharsDefinition, PasswordConfig, load_config};
pub use generator::{Chars, GenerationConfig, PasswordGenerator, Passwords, PickedChar};
pub use rule::{HasRole, Rule, RuleParser};
pub use utils::{ConfigError, PassgenError, Result};
