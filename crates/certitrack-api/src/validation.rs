//! Request body validation.
//!
//! Field constraints are declared with the `validator` derive. Rules that
//! depend on runtime configuration, such as password strength, are named
//! and registered once in a [`ValidatorRegistry`] that lives in application
//! state. A request type opts into named rules through [`NamedRules`].

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use validator::{Validate, ValidationError, ValidationErrors};

use certitrack_auth::PasswordPolicy;
use certitrack_core::config::AuthConfig;

/// Tag of the password strength rule.
pub const STRONG_PASSWORD: &str = "strong_password";

type Rule = Box<dyn Fn(&str) -> Result<(), ValidationError> + Send + Sync>;

/// Named validation rules applied to request fields.
pub trait NamedRules {
    /// `(field, rule tag, value)` triples to check.
    fn named_rules(&self) -> Vec<(&'static str, &'static str, &str)> {
        Vec::new()
    }
}

/// Registry of named validation rules, built once at startup.
#[derive(Default)]
pub struct ValidatorRegistry {
    rules: HashMap<&'static str, Rule>,
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<_> = self.rules.keys().collect();
        tags.sort();
        f.debug_struct("ValidatorRegistry")
            .field("rules", &tags)
            .finish()
    }
}

impl ValidatorRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in rules configured from `config`.
    pub fn with_defaults(config: &AuthConfig) -> Self {
        let mut registry = Self::new();
        let policy = PasswordPolicy::from_config(config);
        registry.register(STRONG_PASSWORD, move |value| {
            policy.validate(value).map_err(|e| {
                ValidationError::new(STRONG_PASSWORD).with_message(Cow::Owned(e.message))
            })
        });
        registry
    }

    /// Add or replace the rule for `tag`.
    pub fn register<F>(&mut self, tag: &'static str, rule: F)
    where
        F: Fn(&str) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        self.rules.insert(tag, Box::new(rule));
    }

    /// Whether a rule is registered under `tag`.
    pub fn contains(&self, tag: &str) -> bool {
        self.rules.contains_key(tag)
    }

    /// Run the derived constraints, then the named rules, collecting every failure.
    pub fn validate<T>(&self, value: &T) -> Result<(), ValidationErrors>
    where
        T: Validate + NamedRules,
    {
        let mut errors = match value.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        for (field, tag, input) in value.named_rules() {
            let outcome = match self.rules.get(tag) {
                Some(rule) => rule(input),
                None => Err(ValidationError::new("unregistered_rule")
                    .with_message(Cow::Owned(format!("No validation rule named '{tag}'")))),
            };
            if let Err(error) = outcome {
                errors.add(field, error);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
