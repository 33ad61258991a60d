//! Declarative validation rules

use super::path::FieldPath;
use crate::config::FormConfig;
use crate::error::FormError;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

/// Address shape accepted by the email field
pub const EMAIL_PATTERN: &str =
    r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9-]+(?:\.[a-zA-Z0-9-]+)*$";

/// A failed rule for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{path}: {message}")]
pub struct ValidationError {
    pub path: FieldPath,
    /// Name of the rule that failed
    pub rule: String,
    pub message: String,
}

/// The predicate a rule applies to a field value
#[derive(Debug, Clone)]
pub enum Check {
    Required,
    /// Skipped for empty values
    Pattern(Regex),
    NotEqual(String),
    NotContains(String),
    NotContainsAny(Vec<String>),
}

impl Check {
    pub fn passes(&self, value: &str) -> bool {
        match self {
            Check::Required => !value.is_empty(),
            Check::Pattern(re) => value.is_empty() || re.is_match(value),
            Check::NotEqual(forbidden) => value != forbidden,
            Check::NotContains(needle) => !value.contains(needle.as_str()),
            Check::NotContainsAny(words) => words.iter().all(|w| !value.contains(w.as_str())),
        }
    }
}

/// A named predicate with the message shown when it fails
#[derive(Debug, Clone)]
pub struct Rule {
    pub name: String,
    pub check: Check,
    pub message: String,
}

impl Rule {
    pub fn new(name: &str, check: Check, message: &str) -> Self {
        Self {
            name: name.to_string(),
            check,
            message: message.to_string(),
        }
    }

    pub fn required(message: &str) -> Self {
        Self::new("required", Check::Required, message)
    }

    pub fn pattern(pattern: &str, message: &str) -> Result<Self, FormError> {
        Ok(Self::new("pattern", Check::Pattern(Regex::new(pattern)?), message))
    }
}

/// Ordered rules for a single field
///
/// `Required` rules always run before any other rule so that a missing value
/// is reported instead of a more specific complaint about its content.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule. Non-required rules keep registration order.
    pub fn add(&mut self, rule: Rule) -> &mut Self {
        if matches!(rule.check, Check::Required) {
            let at = self
                .rules
                .iter()
                .position(|r| !matches!(r.check, Check::Required))
                .unwrap_or(self.rules.len());
            self.rules.insert(at, rule);
        } else {
            self.rules.push(rule);
        }
        self
    }

    pub fn with(mut self, rule: Rule) -> Self {
        self.add(rule);
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn is_required(&self) -> bool {
        self.rules()
            .iter()
            .any(|rule| matches!(rule.check, Check::Required))
    }

    /// First failing rule, if any
    pub fn first_failure(&self, value: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| !rule.check.passes(value))
    }
}

/// Rules registered per field path
#[derive(Debug, Clone, Default)]
pub struct FormSchema {
    fields: BTreeMap<FieldPath, RuleSet>,
}

impl FormSchema {
    /// Rules of the channel sign-up form
    pub fn from_config(config: &FormConfig) -> Result<Self, FormError> {
        let mut schema = Self::default();

        schema.register(
            FieldPath::Username,
            RuleSet::new().with(Rule::required("Username is required")),
        );

        schema.register(
            FieldPath::Email,
            RuleSet::new()
                .with(Rule::pattern(EMAIL_PATTERN, "Invalid email format")?)
                .with(Rule::new(
                    "notReserved",
                    Check::NotEqual(config.reserved_email.clone()),
                    "Enter a different email",
                )),
        );

        schema.register(
            FieldPath::Channel,
            RuleSet::new()
                .with(Rule::required("Channel is required"))
                .with(Rule::new(
                    "notAdmin",
                    Check::NotContains("admin".to_string()),
                    "Channel cannot include admin",
                ))
                .with(Rule::new(
                    "notBlackListed",
                    Check::NotContainsAny(config.blacklisted_words.clone()),
                    "Channel cannot include blacklisted words",
                )),
        );

        Ok(schema)
    }

    pub fn register(&mut self, path: FieldPath, rules: RuleSet) {
        self.fields.insert(path, rules);
    }

    /// Paths that carry at least one rule
    pub fn registered(&self) -> impl Iterator<Item = FieldPath> + '_ {
        self.fields.keys().copied()
    }

    pub fn rules_for(&self, path: FieldPath) -> Option<&RuleSet> {
        self.fields.get(&path)
    }

    /// Run the rules for `path` against `value`
    pub fn validate(&self, path: FieldPath, value: &str) -> Option<ValidationError> {
        let rule = self.fields.get(&path)?.first_failure(value)?;
        Some(ValidationError {
            path,
            rule: rule.name.clone(),
            message: rule.message.clone(),
        })
    }
}
