//! Parser for the header + body article format:
//!
//! ```text
//! title:Fondant recipe
//! thumbnail:fondant.png
//! publicationDate:2005-04-02
//! tags:cooking,sweets
//! ===
//! # Markdown Title
//! Markdown contents...
//! ```
use crate::application::ports::util::SlugGenerator;
use crate::domain::article::value_objects::{ArticleSlug, ArticleTags, ArticleTitle};
use chrono::NaiveDate;
use std::collections::HashMap;
use thiserror::Error;

pub const SEPARATOR: &str = "===";
pub const PUBLICATION_DATE_FORMAT: &str = "%Y-%m-%d";

const KEY_TITLE: &str = "title";
const KEY_THUMBNAIL: &str = "thumbnail";
const KEY_PUBLICATION_DATE: &str = "publicationDate";
const KEY_TAGS: &str = "tags";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("headers and body separator '{SEPARATOR}' not found")]
    SeparatorNotFound,
    #[error("unable to parse publication date '{value}': expected YYYY-MM-DD")]
    DateFormatFailed { value: String },
    #[error("title header is missing or blank")]
    MissingTitle,
    #[error("title '{title}' does not produce a usable slug")]
    EmptySlug { title: String },
}

/// Result of parsing a raw document. Carries everything an article needs
/// except the store-assigned id and audit timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleDocument {
    pub title: ArticleTitle,
    pub slug: ArticleSlug,
    pub thumbnail: Option<String>,
    pub content: String,
    pub tags: ArticleTags,
    pub publication_date: NaiveDate,
}

impl ArticleDocument {
    /// Serialize back into the header + body format accepted by
    /// [`parse_document`].
    pub fn to_document_string(&self) -> String {
        let mut out = format!("{KEY_TITLE}:{}\n", self.title);
        if let Some(thumbnail) = &self.thumbnail {
            out.push_str(&format!("{KEY_THUMBNAIL}:{thumbnail}\n"));
        }
        out.push_str(&format!(
            "{KEY_PUBLICATION_DATE}:{}\n",
            self.publication_date.format(PUBLICATION_DATE_FORMAT)
        ));
        out.push_str(&format!("{KEY_TAGS}:{}\n", self.tags.as_slice().join(",")));
        out.push_str(SEPARATOR);
        out.push('\n');
        out.push_str(&self.content);
        out
    }
}

pub fn parse_document(
    raw: &str,
    slugger: &dyn SlugGenerator,
) -> Result<ArticleDocument, DocumentError> {
    let (header_section, body_section) = raw
        .split_once(SEPARATOR)
        .ok_or(DocumentError::SeparatorNotFound)?;

    let headers = parse_headers(header_section);
    let header = |key: &str| headers.get(key).copied().unwrap_or_default();

    let title = ArticleTitle::new(header(KEY_TITLE)).map_err(|_| DocumentError::MissingTitle)?;
    let slug = ArticleSlug::new(slugger.slugify(title.as_str())).map_err(|_| {
        DocumentError::EmptySlug {
            title: title.as_str().to_owned(),
        }
    })?;

    let raw_date = header(KEY_PUBLICATION_DATE);
    let publication_date = parse_publication_date(raw_date).ok_or_else(|| {
        DocumentError::DateFormatFailed {
            value: raw_date.to_owned(),
        }
    })?;

    let thumbnail = Some(header(KEY_THUMBNAIL))
        .filter(|value| !value.is_empty())
        .map(str::to_owned);

    Ok(ArticleDocument {
        title,
        slug,
        thumbnail,
        content: body_section.trim().to_owned(),
        tags: ArticleTags::parse(header(KEY_TAGS)),
        publication_date,
    })
}

// chrono accepts unpadded fields for `%m`/`%d` and short years for `%Y`, so
// the zero-padded `YYYY-MM-DD` shape is checked first.
fn parse_publication_date(raw: &str) -> Option<NaiveDate> {
    let bytes = raw.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return None;
    }
    NaiveDate::parse_from_str(raw, PUBLICATION_DATE_FORMAT).ok()
}

// Later lines overwrite earlier ones, so the last duplicate key wins.
fn parse_headers(section: &str) -> HashMap<&str, &str> {
    section
        .lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim(), value.trim()))
        .collect()
}
