//! # asset-canon - canonical form of generated templates
//!
//! Two syntheses of the same infrastructure template differ in the hashes of the assets they reference. This crate
//! rewrites a template into a canonical form where those hashes are replaced by stable placeholders, so templates
//! can be compared by plain structural equality.
//!
//! ## Introduction for developers
//!
//! ### Templates
//!
//! A template is a tree of [value::Value]s. By convention the root is an object with a `Parameters` and a
//! `Resources` member, neither is required. An array at the root is a batch of templates; every element is
//! canonicalized on its own.
//!
//! ### Asset families
//!
//! Parameterized assets show up as parameters named after [asset_parameter]'s convention:
//!
//! ```text
//! AssetParameters<64 char hash><S3Bucket|S3VersionKey|ArtifactHash><8 char disambiguator>
//! ```
//!
//! All parameters sharing one hash belong to the same asset. Each asset gets an index, starting at 1, in the order its
//! hash is first seen in the keys of `Parameters`.
//!
//! ### Substitutions
//!
//! see [substitution::Substitutions::discover]
//!
//! For every asset two rules are registered, in this order:
//!
//! | **rule** | **matches**                                    | **replacement**        |
//! |----------|------------------------------------------------|------------------------|
//! | family   | `AssetParameters<hash><kind><disambiguator>`   | `Asset<index><kind>`   |
//! | hash     | `<hash>`                                       | `Asset<index>Hash`     |
//!
//! Resources whose name matches the [ignore_list::IgnoreList] additionally get their code location
//! (`Properties.Code.S3Key`) replaced with `SomeHash.zip`.
//!
//! ### Rewrite
//!
//! Every string of the template, object keys included, is passed through all rules in registration order.
//! Everything else is left as is.
//!
//! ```
//! use asset_canon::{canonicalize, ignore_list::IgnoreList, value::Value};
//!
//! let hash = "a".repeat(64);
//! let template: Value = serde_json::json!({
//!     "Parameters": { format!("AssetParameters{hash}S3Bucket12345678"): { "Type": "String" } },
//!     "Outputs": { "Key": format!("{hash}.zip") },
//! })
//! .into();
//!
//! let canonical = canonicalize(&template, &IgnoreList::default()).unwrap();
//! let expected: Value = serde_json::json!({
//!     "Parameters": { "Asset1S3Bucket": { "Type": "String" } },
//!     "Outputs": { "Key": "Asset1Hash.zip" },
//! })
//! .into();
//! assert_eq!(canonical, expected);
//! ```
//!
pub mod asset_parameter;
mod canonicalize;
pub mod ignore_list;
pub mod substitution;
pub mod template_documents;
pub mod value;
mod visit;

pub use canonicalize::{canonical_diff, canonical_eq, canonicalize, CanonicalizeError};
