//! Pattern Rule Engine
//!
//! Ordered regex substitutions for morphological normalization. Rules are
//! plain data ([`RuleSpec`]) so they can be reordered or replaced through
//! configuration without touching the engine.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{RuleError, TokenError};

/// Serializable description of one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub name: String,
    pub pattern: String,
    pub replacement: String,
}

impl RuleSpec {
    pub fn new(
        name: impl Into<String>,
        pattern: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

/// Default rule order: article prefix, hamza carrier, final taa marbuta.
pub fn default_rules() -> Vec<RuleSpec> {
    vec![
        RuleSpec::new("article-prefix", r"^[أإآ]ل(\p{Arabic}{2,})$", "ال$1"),
        RuleSpec::new("hamza-carrier", "ئه", "يه"),
        RuleSpec::new("taa-marbuta", r"(\p{Arabic}{2,})ه$", "${1}ة"),
    ]
}

#[derive(Debug, Clone)]
struct PatternRule {
    name: String,
    pattern: Regex,
    replacement: String,
}

/// Result of running the rule list over one token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub text: String,
    /// Names of the rules that changed the token, in application order.
    pub applied: Vec<String>,
}

impl Rewrite {
    pub fn changed(&self) -> bool {
        !self.applied.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<PatternRule>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new(default_rules()).expect("default rules compile")
    }
}

impl RuleSet {
    pub fn new(specs: impl IntoIterator<Item = RuleSpec>) -> Result<Self, RuleError> {
        let rules = specs
            .into_iter()
            .map(|spec| {
                let pattern =
                    Regex::new(&spec.pattern).map_err(|source| RuleError::InvalidPattern {
                        name: spec.name.clone(),
                        pattern: spec.pattern.clone(),
                        source,
                    })?;
                Ok(PatternRule {
                    name: spec.name,
                    pattern,
                    replacement: spec.replacement,
                })
            })
            .collect::<Result<Vec<_>, RuleError>>()?;
        Ok(Self { rules })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.name.as_str())
    }

    /// Apply every rule once, in order. A token that no rule touches comes back unchanged.
    pub fn apply(&self, token: &str) -> String {
        match self.try_apply(token) {
            Ok(rewrite) => rewrite.text,
            Err(_) => token.to_string(),
        }
    }

    pub(crate) fn try_apply(&self, token: &str) -> Result<Rewrite, TokenError> {
        let mut text = token.to_string();
        let mut applied = Vec::new();

        for rule in &self.rules {
            let next = rule
                .pattern
                .replace_all(&text, rule.replacement.as_str())
                .into_owned();
            if next != text {
                if next.is_empty() {
                    return Err(TokenError::EmptyRewrite {
                        rule: rule.name.clone(),
                        token: token.to_string(),
                    });
                }
                text = next;
                applied.push(rule.name.clone());
            }
        }

        Ok(Rewrite { text, applied })
    }
}
