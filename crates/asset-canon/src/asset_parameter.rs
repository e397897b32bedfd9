//! asset parameter naming convention
//!
//! Parameterized assets are referenced through template parameters named
//!
//! ```text
//! AssetParameters<hash><kind><disambiguator>
//! ```
//!
//! - `hash`: 64 ascii alphanumeric characters, derived from the asset content
//! - `kind`: one of [AssetKind]
//! - `disambiguator`: 8 ascii alphanumeric characters
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

pub const PREFIX: &str = "AssetParameters";

/// Whole parameter name, anchored at both ends
static PARAMETER_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        "^{PREFIX}([a-zA-Z0-9]{{64}})({})([a-zA-Z0-9]{{8}})$",
        AssetKind::alternation()
    ))
    .expect("parameter name pattern must compile")
});

/// The parameter kinds of an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    S3Bucket,
    S3VersionKey,
    ArtifactHash,
}

impl AssetKind {
    pub const ALL: [AssetKind; 3] = [
        AssetKind::S3Bucket,
        AssetKind::S3VersionKey,
        AssetKind::ArtifactHash,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            AssetKind::S3Bucket => "S3Bucket",
            AssetKind::S3VersionKey => "S3VersionKey",
            AssetKind::ArtifactHash => "ArtifactHash",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// `S3Bucket|S3VersionKey|ArtifactHash`
    fn alternation() -> String {
        Self::ALL.map(AssetKind::tag).join("|")
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// A parameter name that follows the convention
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetParameter<'a> {
    pub hash: &'a str,
    pub kind: AssetKind,
    pub disambiguator: &'a str,
}

impl<'a> AssetParameter<'a> {
    /// Match the whole of `name` against the convention
    pub fn parse(name: &'a str) -> Option<Self> {
        let captures = PARAMETER_NAME.captures(name)?;

        Some(Self {
            hash: captures.get(1)?.as_str(),
            kind: AssetKind::from_tag(captures.get(2)?.as_str())?,
            disambiguator: captures.get(3)?.as_str(),
        })
    }
}

/// Finds `AssetParameters<hash><kind><disambiguator>` anywhere in a string, for one specific `hash`
#[derive(Debug, Clone)]
pub struct ReferencePattern {
    regex: Regex,
}

impl ReferencePattern {
    pub fn new(hash: &str) -> Self {
        let pattern = format!(
            "{PREFIX}{}({})[a-zA-Z0-9]{{8}}",
            regex::escape(hash),
            AssetKind::alternation()
        );

        Self {
            regex: Regex::new(&pattern).expect("escaped reference pattern must compile"),
        }
    }

    /// Replace every reference in `text`
    ///
    /// `replacement` receives the matched kind. Text following the disambiguator is kept.
    pub fn replace_all(
        &self,
        text: &str,
        mut replacement: impl FnMut(AssetKind) -> String,
    ) -> String {
        self.regex
            .replace_all(text, |captures: &Captures<'_>| {
                match AssetKind::from_tag(&captures[1]) {
                    Some(kind) => replacement(kind),
                    None => captures[0].to_string(),
                }
            })
            .into_owned()
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl PartialEq for ReferencePattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}
