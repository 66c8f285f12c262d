//! Repository manifest (`manifest.yml`) model.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use crate::non_blank;
use crate::serde_util::optional_scalar;

/// Repository metadata declared in `manifest.yml`.
///
/// All fields are optional. Unknown keys are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    /// Human readable repository title.
    #[serde(default, deserialize_with = "optional_scalar")]
    pub title: Option<String>,
    /// One-line description.
    #[serde(default, deserialize_with = "optional_scalar")]
    pub brief: Option<String>,
    /// Author or list of authors.
    #[serde(default)]
    pub authors: Option<Authors>,
    /// Default software license for the repository's blocks.
    #[serde(default, deserialize_with = "optional_scalar")]
    pub license: Option<String>,
    /// Default HDL license for the repository's blocks.
    #[serde(default, deserialize_with = "optional_scalar")]
    pub hdl_license: Option<String>,
    /// Project home page.
    #[serde(default, deserialize_with = "optional_scalar")]
    pub url: Option<String>,
    /// Git repository URL.
    #[serde(default, deserialize_with = "optional_scalar")]
    pub source: Option<String>,
}

impl Manifest {
    /// Fill every blank field from `fallback`.
    ///
    /// Fields set to a non-empty value in `self` always win.
    #[must_use]
    pub fn merged_with(&self, fallback: &Manifest) -> Manifest {
        fn pick(own: Option<&String>, other: Option<&String>) -> Option<String> {
            own.filter(|s| !s.is_empty()).or(other).cloned()
        }

        Manifest {
            title: pick(self.title.as_ref(), fallback.title.as_ref()),
            brief: pick(self.brief.as_ref(), fallback.brief.as_ref()),
            authors: self
                .authors
                .as_ref()
                .filter(|a| !a.is_blank())
                .or(fallback.authors.as_ref())
                .cloned(),
            license: pick(self.license.as_ref(), fallback.license.as_ref()),
            hdl_license: pick(self.hdl_license.as_ref(), fallback.hdl_license.as_ref()),
            url: pick(self.url.as_ref(), fallback.url.as_ref()),
            source: pick(self.source.as_ref(), fallback.source.as_ref()),
        }
    }

    /// Title, if set and non-empty.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        non_blank(self.title.as_deref())
    }

    /// Brief description, if set and non-empty.
    #[must_use]
    pub fn brief(&self) -> Option<&str> {
        non_blank(self.brief.as_deref())
    }

    /// Home page URL, if set and non-empty.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        non_blank(self.url.as_deref())
    }

    /// Git repository URL; an empty string when absent.
    #[must_use]
    pub fn source(&self) -> &str {
        self.source.as_deref().unwrap_or_default()
    }

    /// Authors, if set and not blank.
    #[must_use]
    pub fn authors(&self) -> Option<&Authors> {
        self.authors.as_ref().filter(|a| !a.is_blank())
    }
}

/// The `authors` field: a single string or a list of strings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Authors {
    Single(String),
    Multiple(Vec<String>),
}

impl Authors {
    /// Render for display, joining lists with `", "`.
    #[must_use]
    pub fn joined(&self) -> String {
        match self {
            Self::Single(name) => name.clone(),
            Self::Multiple(names) => names.join(", "),
        }
    }

    /// Whether there is nothing to display.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Single(name) => name.is_empty(),
            Self::Multiple(names) => names.is_empty(),
        }
    }
}

impl<'de> Deserialize<'de> for Authors {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Single(String),
            Multiple(Vec<String>),
        }

        match Raw::deserialize(deserializer) {
            Ok(Raw::Single(name)) => Ok(Self::Single(name)),
            Ok(Raw::Multiple(names)) => Ok(Self::Multiple(names)),
            Err(_) => Err(D::Error::custom(
                "invalid author format: expected a string or a list of strings",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(yaml: &str) -> Result<Manifest, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    #[test]
    fn test_parse_full_manifest() {
        let manifest = parse(
            r"
title: UHD Blocks
brief: Core blocks
authors: [Alice, Bob]
license: GPL-3.0
hdl_license: LGPL-3.0
url: https://example.com
source: git+https://github.com/example/uhd.git
gitbranch: main
",
        )
        .unwrap();

        assert_eq!(manifest.title(), Some("UHD Blocks"));
        assert_eq!(manifest.brief(), Some("Core blocks"));
        assert_eq!(
            manifest.authors,
            Some(Authors::Multiple(vec!["Alice".to_owned(), "Bob".to_owned()]))
        );
        assert_eq!(manifest.license.as_deref(), Some("GPL-3.0"));
        assert_eq!(manifest.hdl_license.as_deref(), Some("LGPL-3.0"));
        assert_eq!(manifest.url(), Some("https://example.com"));
        assert_eq!(manifest.source(), "git+https://github.com/example/uhd.git");
    }

    #[test]
    fn test_empty_manifest_defaults() {
        let manifest = parse("{}").unwrap();
        assert_eq!(manifest, Manifest::default());
        assert_eq!(manifest.title(), None);
        assert_eq!(manifest.source(), "");
        assert!(manifest.authors().is_none());
    }

    #[test]
    fn test_null_fields_are_absent() {
        let manifest = parse("title: ~\nauthors: ~\n").unwrap();
        assert_eq!(manifest.title, None);
        assert_eq!(manifest.authors, None);
    }

    #[test]
    fn test_authors_single() {
        let manifest = parse("authors: Alice").unwrap();
        assert_eq!(manifest.authors().unwrap().joined(), "Alice");
    }

    #[test]
    fn test_authors_multiple_joined() {
        let manifest = parse("authors: [A, B]").unwrap();
        assert_eq!(manifest.authors().unwrap().joined(), "A, B");
    }

    #[test]
    fn test_authors_invalid_format() {
        let err = parse("authors: 42").unwrap_err();
        assert!(err.to_string().contains("invalid author format"));

        let err = parse("authors:\n  name: Alice\n").unwrap_err();
        assert!(err.to_string().contains("invalid author format"));
    }

    #[test]
    fn test_authors_blank() {
        assert!(Authors::Single(String::new()).is_blank());
        assert!(Authors::Multiple(vec![]).is_blank());
        assert!(!Authors::Multiple(vec!["A".to_owned()]).is_blank());
    }

    #[test]
    fn test_empty_strings_are_blank() {
        let manifest = parse("title: ''\nbrief: ''\nurl: ''\n").unwrap();
        assert_eq!(manifest.title(), None);
        assert_eq!(manifest.brief(), None);
        assert_eq!(manifest.url(), None);
    }

    #[test]
    fn test_merged_with_prefers_own_values() {
        let own = parse("title: Own\nbrief: ''\n").unwrap();
        let fallback = parse(
            "title: Other\nbrief: From source\nurl: https://example.com\nauthors: Alice\n",
        )
        .unwrap();

        let merged = own.merged_with(&fallback);

        assert_eq!(merged.title(), Some("Own"));
        assert_eq!(merged.brief(), Some("From source"));
        assert_eq!(merged.url(), Some("https://example.com"));
        assert_eq!(merged.authors, Some(Authors::Single("Alice".to_owned())));
    }

    #[test]
    fn test_merged_with_empty_fallback_is_identity() {
        let own = parse("title: Own\nlicense: MIT\n").unwrap();
        assert_eq!(own.merged_with(&Manifest::default()), own);
    }
}
