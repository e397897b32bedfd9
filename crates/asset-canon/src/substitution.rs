//! Ordered string substitution rules
//!
//! [Substitutions] holds the discovery state of one canonicalization run: which asset hashes were seen (and in which
//! order) and the rules derived from them. Rules are applied in the order they were registered, each one working on
//! the output of the previous one.
use crate::asset_parameter::{self, AssetParameter, ReferencePattern};
use crate::ignore_list::IgnoreList;
use crate::value::Value;
use crate::visit::VisitStringsMut;
use crate::CanonicalizeError;
use indexmap::IndexSet;

/// Replacement for masked code locations
pub const MASKED_CODE_LOCATION: &str = "SomeHash.zip";

/// Where the code location of a resource lives, relative to the resource
pub const CODE_LOCATION_PATH: [&str; 3] = ["Properties", "Code", "S3Key"];

#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// `AssetParameters<hash><kind><disambiguator>` becomes `Asset<index><kind>`
    Family {
        hash: String,
        index: usize,
        pattern: ReferencePattern,
    },
    /// any remaining `<hash>` becomes `Asset<index>Hash`
    Hash { hash: String, index: usize },
    /// exact text becomes [MASKED_CODE_LOCATION]
    Mask { text: String },
}

impl Rule {
    pub fn family(hash: &str, index: usize) -> Self {
        Rule::Family {
            hash: hash.to_string(),
            index,
            pattern: ReferencePattern::new(hash),
        }
    }

    pub fn apply(&self, text: &str) -> String {
        match self {
            Rule::Family { index, pattern, .. } => {
                pattern.replace_all(text, |kind| format!("Asset{index}{kind}"))
            }
            Rule::Hash { hash, index } => text.replace(hash.as_str(), &format!("Asset{index}Hash")),
            Rule::Mask { text: masked } => text.replace(masked.as_str(), MASKED_CODE_LOCATION),
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::Family { hash, index, .. } => write!(
                f,
                "{}{hash}<kind><disambiguator> -> Asset{index}<kind>",
                asset_parameter::PREFIX
            ),
            Rule::Hash { hash, index } => write!(f, "{hash} -> Asset{index}Hash"),
            Rule::Mask { text } => write!(f, "{text} -> {MASKED_CODE_LOCATION}"),
        }
    }
}

/// Rules discovered from a single template
#[derive(Debug, Default, Clone)]
pub struct Substitutions {
    /// asset hashes in order of discovery. The index of an asset is its position + 1
    assets: IndexSet<String>,
    rules: Vec<Rule>,
}

impl Substitutions {
    /// Discover asset families and ignore masks of `template`
    ///
    /// `template` is a single template, not a batch. A `Parameters` or `Resources` member that is missing or not an
    /// object counts as empty.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn discover(template: &Value, ignore: &IgnoreList) -> Result<Self, CanonicalizeError> {
        let mut substitutions = Self::default();

        let parameters = template.get_path(&["Parameters"]).and_then(Value::as_object);
        if let Some(parameters) = parameters {
            for name in parameters.keys() {
                if let Some(parameter) = AssetParameter::parse(name) {
                    substitutions.add_asset(parameter.hash);
                }
            }
        }

        let resources = template.get_path(&["Resources"]).and_then(Value::as_object);
        if let Some(resources) = resources {
            for (name, resource) in resources {
                if ignore.matches(name) {
                    substitutions.add_mask(name, resource)?;
                }
            }
        }

        Ok(substitutions)
    }

    /// Register an asset family unless its hash is already known
    ///
    /// Returns the index of the family.
    pub fn add_asset(&mut self, hash: &str) -> usize {
        let (position, added) = self.assets.insert_full(hash.to_string());
        let index = position + 1;
        if !added {
            return index;
        }

        tracing::debug!(index, hash, "asset family discovered");

        self.rules.push(Rule::family(hash, index));
        self.rules.push(Rule::Hash {
            hash: hash.to_string(),
            index,
        });

        index
    }

    /// Register a mask for the code location of an ignored resource
    pub fn add_mask(&mut self, name: &str, resource: &Value) -> Result<(), CanonicalizeError> {
        let Some(location) = resource.get_path(&CODE_LOCATION_PATH) else {
            return Err(CanonicalizeError::MissingCodeLocation {
                resource: name.to_string(),
            });
        };

        let text = match location.as_str() {
            Some(text) if !text.is_empty() => text,
            _ => {
                return Err(CanonicalizeError::InvalidCodeLocation {
                    resource: name.to_string(),
                })
            }
        };

        // strings reach this rule after all earlier rules ran on them
        let text = self.apply(text);

        tracing::debug!(resource = name, code_location = %text, "masking code location");
        self.rules.push(Rule::Mask { text });
        Ok(())
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply all rules to a single string
    pub fn apply(&self, text: &str) -> String {
        self.rules
            .iter()
            .fold(text.to_string(), |text, rule| rule.apply(&text))
    }

    /// Apply all rules to every string of `template`, keys included
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn rewrite(&self, template: &Value) -> Value {
        let mut rewritten = template.clone();
        if self.is_empty() {
            return rewritten;
        }

        rewritten.visit_strings_mut(&mut |s: &mut String| {
            let replaced = self.apply(s);
            if *s != replaced {
                tracing::trace!(from = %s, to = %replaced, "rewrite");
                *s = replaced;
            }
        });

        rewritten
    }
}
