use crate::domain::errors::{DomainError, DomainResult};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArticleId(pub i64);

impl ArticleId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation(
                "article id must be positive".into(),
            ))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<ArticleId> for i64 {
    fn from(value: ArticleId) -> Self {
        value.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleTitle(String);

impl ArticleTitle {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::Validation("title cannot be empty".into()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ArticleTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ArticleTitle> for String {
    fn from(value: ArticleTitle) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArticleSlug(String);

impl ArticleSlug {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::Validation("slug cannot be empty".into()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ArticleSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ArticleSlug> for String {
    fn from(value: ArticleSlug) -> Self {
        value.0
    }
}

/// Ordered tag labels of an article. Parse order is kept; duplicates are not
/// removed since the document author controls the list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleTags(Vec<String>);

impl ArticleTags {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(tags.into_iter().map(Into::into).collect())
    }

    /// Split a comma separated header value. Each tag is trimmed and blank
    /// entries are dropped, so a missing header yields an empty list.
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_owned)
                .collect(),
        )
    }

    /// True when every tag in `wanted` is carried by this list. An empty
    /// `wanted` slice is trivially satisfied.
    pub fn contains_all(&self, wanted: &[String]) -> bool {
        let own: HashSet<&str> = self.0.iter().map(String::as_str).collect();
        wanted.iter().all(|tag| own.contains(tag.as_str()))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for ArticleTags {
    fn from(value: Vec<String>) -> Self {
        Self(value)
    }
}

impl From<ArticleTags> for Vec<String> {
    fn from(value: ArticleTags) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn article_id_rejects_non_positive() {
        assert!(ArticleId::new(0).is_err());
        assert!(ArticleId::new(-4).is_err());
        assert_eq!(i64::from(ArticleId::new(7).unwrap()), 7);
    }

    #[test]
    fn tags_are_trimmed_and_blanks_dropped() {
        let tags = ArticleTags::parse(" cooking , sweets,, ");
        assert_eq!(tags.as_slice(), ["cooking", "sweets"]);
        assert!(ArticleTags::parse("").is_empty());
    }

    #[test]
    fn contains_all_is_an_and_match() {
        let tags = ArticleTags::new(["tag1", "tag2"]);
        assert!(tags.contains_all(&["tag1".into(), "tag2".into()]));
        assert!(!tags.contains_all(&["tag1".into(), "tag3".into()]));
        assert!(tags.contains_all(&[]));
    }
}
