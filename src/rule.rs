use std::fmt;

use regex::Regex;

use crate::alphabet::Role;
use crate::utils::{ConfigError, Result};

/// Non-greedy `{role}` token, several per template
const RULE_TOKEN: &str = r"\{(.*?)\}";

/// Anything that carries a role, e.g. the characters picked so far
pub trait HasRole {
    fn role(&self) -> &Role;
}

impl HasRole for Role {
    fn role(&self) -> &Role {
        self
    }
}

/// A sequencing rule: a template of roles that may appear next to each other.
///
/// The last role of the template is the role a matching history continues
/// with, so it is never compared against history once the history is at
/// least as long as the template.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    roles: Vec<Role>,
}

impl Rule {
    /// Create a rule from an ordered list of roles
    pub fn new<I, R>(roles: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: Into<Role>,
    {
        let roles: Vec<Role> = roles.into_iter().map(Into::into).collect();
        if roles.is_empty() {
            return Err(ConfigError::InvalidRuleFormat(String::new()).into());
        }
        Ok(Rule { roles })
    }

    /// Parse a single `{a}{b}` template, see [`RuleParser`]
    pub fn from_template(template: &str) -> Result<Self> {
        RuleParser::new()?.parse(template)
    }

    /// Check whether this rule is consistent with the roles chosen so far.
    ///
    /// With a history at least as long as the rule, the rule minus its last
    /// role is aligned against the tail of the history. With a shorter
    /// history, the head of the rule is aligned against the whole history.
    pub fn matches<T: HasRole>(&self, history: &[T]) -> bool {
        let (template, window) = if history.len() >= self.roles.len() {
            let template = &self.roles[..self.roles.len() - 1];
            (template, &history[history.len() - template.len()..])
        } else {
            (&self.roles[..history.len()], history)
        };

        template
            .iter()
            .zip(window)
            .all(|(expected, item)| expected == item.role())
    }

    pub fn first_role(&self) -> &Role {
        &self.roles[0]
    }

    pub fn last_role(&self) -> &Role {
        &self.roles[self.roles.len() - 1]
    }

    pub fn role(&self, index: usize) -> Option<&Role> {
        self.roles.get(index)
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Always false for a constructed rule
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for role in &self.roles {
            write!(f, "{{{}}}", role)?;
        }
        Ok(())
    }
}

/// Extracts `{role}` tokens from rule templates
#[derive(Debug, Clone)]
pub struct RuleParser {
    token: Regex,
}

impl RuleParser {
    pub fn new() -> Result<Self> {
        let token = Regex::new(RULE_TOKEN).map_err(ConfigError::from)?;
        Ok(RuleParser { token })
    }

    /// Parse a template such as `{letter}{digit}` into a rule.
    ///
    /// Text outside braces is ignored. A template with no tokens is an
    /// `InvalidRuleFormat` error.
    pub fn parse(&self, template: &str) -> Result<Rule> {
        let roles: Vec<Role> = self
            .token
            .captures_iter(template)
            .filter_map(|caps| caps.get(1))
            .map(|m| Role::from(m.as_str()))
            .collect();

        if roles.is_empty() {
            return Err(ConfigError::InvalidRuleFormat(template.to_string()).into());
        }

        Ok(Rule { roles })
    }
}
