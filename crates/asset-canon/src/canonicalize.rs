//! template canonicalization
use crate::ignore_list::IgnoreList;
use crate::substitution::{Substitutions, CODE_LOCATION_PATH};
use crate::value::{Difference, Value};

/// Rewrite `template` into its canonical form
///
/// An array is treated as a batch of templates, each element is canonicalized on its own. The input is not modified.
///
/// Fails when a resource matched by `ignore` does not carry a code location, no partial result is returned in that
/// case.
pub fn canonicalize(template: &Value, ignore: &IgnoreList) -> Result<Value, CanonicalizeError> {
    if let Value::Array(templates) = template {
        return templates
            .iter()
            .map(|template| canonicalize(template, ignore))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array);
    }

    let substitutions = Substitutions::discover(template, ignore)?;
    tracing::debug!(
        assets = substitutions.asset_count(),
        rules = substitutions.rules().len(),
        "substitutions discovered"
    );

    Ok(substitutions.rewrite(template))
}

/// Differences between the canonical forms of `expected` and `actual`
///
/// Empty when both describe the same template.
pub fn canonical_diff(
    expected: &Value,
    actual: &Value,
    ignore: &IgnoreList,
) -> Result<Vec<Difference>, CanonicalizeError> {
    let expected = canonicalize(expected, ignore)?;
    let actual = canonicalize(actual, ignore)?;

    Ok(expected.diff(&actual))
}

pub fn canonical_eq(
    expected: &Value,
    actual: &Value,
    ignore: &IgnoreList,
) -> Result<bool, CanonicalizeError> {
    Ok(canonical_diff(expected, actual, ignore)?.is_empty())
}

#[derive(thiserror::Error, Debug)]
pub enum CanonicalizeError {
    #[error(
        "ignored resource {resource} has no code location at {}",
        CODE_LOCATION_PATH.join(".")
    )]
    MissingCodeLocation { resource: String },
    #[error(
        "ignored resource {resource} has a non-string code location at {}",
        CODE_LOCATION_PATH.join(".")
    )]
    InvalidCodeLocation { resource: String },
}
