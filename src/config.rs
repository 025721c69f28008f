use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::alphabet::{AlphabetEntry, Role};
use crate::rule::{Rule, RuleParser};
use crate::utils::{ConfigError, Result};

/// One `chars` record of the configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharsDefinition {
    pub role: String,
    pub chars: Vec<String>,
}

/// The JSON configuration document.
///
/// ```json
/// {
///   "roles": ["d", "l"],
///   "chars": [
///     { "role": "d", "chars": ["1", "2"] },
///     { "role": "l", "chars": ["a", "b"] }
///   ],
///   "rules": ["{d}{l}", "{l}{d}"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordConfig {
    pub roles: Vec<String>,
    pub chars: Vec<CharsDefinition>,
    pub rules: Vec<String>,
}

impl PasswordConfig {
    /// Read a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        debug!(path = %path.display(), "Read password configuration");
        Self::from_json_str(&content)
    }

    /// Read a configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: PasswordConfig = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Build the alphabet, checking every entry's role against `roles`
    pub fn load_alphabet(&self) -> Result<Vec<AlphabetEntry>> {
        let roles: HashSet<&str> = self.roles.iter().map(String::as_str).collect();

        self.chars
            .iter()
            .map(|def| -> Result<AlphabetEntry> {
                if !roles.contains(def.role.as_str()) {
                    return Err(ConfigError::InvalidRoleName(def.role.clone()).into());
                }
                AlphabetEntry::new(def.role.as_str(), def.chars.iter().cloned())
            })
            .collect()
    }

    /// Parse every rule template.
    ///
    /// Rule tokens are not required to be declared roles; undeclared ones are
    /// only reported.
    pub fn load_rules(&self) -> Result<Vec<Rule>> {
        let parser = RuleParser::new()?;
        let rules = self
            .rules
            .iter()
            .map(|template| parser.parse(template))
            .collect::<Result<Vec<_>>>()?;

        for rule in &rules {
            for role in rule.roles() {
                if !self.declares(role) {
                    warn!(%rule, %role, "Rule uses a role that is not declared");
                }
            }
        }

        Ok(rules)
    }

    /// Validate and convert into the generator inputs
    pub fn into_parts(self) -> Result<(Vec<AlphabetEntry>, Vec<Rule>)> {
        let alphabet = self.load_alphabet()?;
        let rules = self.load_rules()?;
        debug!(
            roles = self.roles.len(),
            entries = alphabet.len(),
            rules = rules.len(),
            "Loaded password configuration"
        );
        Ok((alphabet, rules))
    }

    fn declares(&self, role: &Role) -> bool {
        self.roles.iter().any(|name| role == name.as_str())
    }
}

/// Load a configuration file into an alphabet and rule set
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<(Vec<AlphabetEntry>, Vec<Rule>)> {
    PasswordConfig::from_file(path)?.into_parts()
}
