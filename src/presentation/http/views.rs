//! Server-rendered pages. Templates live in `templates/` at the crate root.
use crate::application::dto::ArticleDto;
use crate::presentation::http::error::{HttpError, HttpResult};
use askama::Template;
use axum::response::Html;
use pulldown_cmark::{Options, Parser, html::push_html};

const DISPLAY_DATE_FORMAT: &str = "%B %-d, %Y";

/// Listing entry shared by the blog and index pages.
#[derive(Debug, Clone)]
pub struct ArticleCard {
    pub title: String,
    pub slug: String,
    pub thumbnail: Option<String>,
    pub date: String,
    pub tags: Vec<String>,
}

impl From<&ArticleDto> for ArticleCard {
    fn from(article: &ArticleDto) -> Self {
        Self {
            title: article.title.clone(),
            slug: article.slug.clone(),
            thumbnail: article.thumbnail.clone(),
            date: article.publication_date.format(DISPLAY_DATE_FORMAT).to_string(),
            tags: article.tags.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TagGroup {
    pub tag: String,
    pub articles: Vec<ArticleCard>,
}

#[derive(Template)]
#[template(path = "blog.html")]
pub struct BlogPage {
    pub articles: Vec<ArticleCard>,
    pub active_tags: Vec<String>,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub groups: Vec<TagGroup>,
}

#[derive(Template)]
#[template(path = "article.html")]
pub struct ArticlePage {
    pub title: String,
    pub date: String,
    pub thumbnail: Option<String>,
    pub tags: Vec<String>,
    pub body_html: String,
}

impl From<ArticleDto> for ArticlePage {
    fn from(article: ArticleDto) -> Self {
        Self {
            date: article.publication_date.format(DISPLAY_DATE_FORMAT).to_string(),
            body_html: render_markdown(&article.content),
            title: article.title,
            thumbnail: article.thumbnail,
            tags: article.tags,
        }
    }
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundPage {
    pub path: String,
}

pub fn render_markdown(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(markdown, options);
    let mut html = String::with_capacity(markdown.len() * 3 / 2);
    push_html(&mut html, parser);
    html
}

pub fn render<T: Template>(page: &T) -> HttpResult<Html<String>> {
    page.render()
        .map(Html)
        .map_err(|err| HttpError::internal(format!("template rendering failed: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markdown_is_rendered_to_html() {
        let html = render_markdown("# Markdown Title\nMarkdown contents...");
        assert_eq!(html, "<h1>Markdown Title</h1>\n<p>Markdown contents...</p>\n");
    }

    #[test]
    fn card_formats_the_publication_date() {
        let article = ArticleDto {
            id: 1,
            title: "Fondant recipe".into(),
            slug: "fondant-recipe".into(),
            thumbnail: None,
            content: String::new(),
            tags: vec!["cooking".into()],
            publication_date: chrono::NaiveDate::from_ymd_opt(2005, 4, 2).unwrap(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        assert_eq!(ArticleCard::from(&article).date, "April 2, 2005");
    }

    #[test]
    fn titles_are_escaped_in_pages() {
        let page = ArticlePage {
            title: "<script>alert(1)</script>".into(),
            date: "April 2, 2005".into(),
            thumbnail: None,
            tags: Vec::new(),
            body_html: "<p>ok</p>".into(),
        };
        let html = page.render().unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("<p>ok</p>"));
    }
}
