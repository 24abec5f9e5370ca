use crate::domain::article::entity::Article;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    Title,
    #[default]
    PublicationDate,
    Id,
    /// Unrecognised criterion. Sorting with it leaves the list untouched.
    Unordered,
}

impl SortOption {
    /// Map a query-string value onto a sort criterion. Unknown values map to
    /// [`SortOption::Unordered`] instead of failing.
    pub fn parse(value: &str) -> Self {
        match value {
            "title" => Self::Title,
            "id" => Self::Id,
            "date" | "publication_date" => Self::PublicationDate,
            _ => Self::Unordered,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::PublicationDate => "date",
            Self::Id => "id",
            Self::Unordered => "unordered",
        }
    }

    fn compare(self, a: &Article, b: &Article) -> Ordering {
        match self {
            Self::Title => a
                .title
                .as_str()
                .to_lowercase()
                .cmp(&b.title.as_str().to_lowercase()),
            Self::PublicationDate => a.publication_date.cmp(&b.publication_date),
            Self::Id => a.id.cmp(&b.id),
            Self::Unordered => Ordering::Equal,
        }
    }
}

pub fn sort_articles(articles: &mut [Article], option: SortOption) {
    if option == SortOption::Unordered {
        return;
    }
    articles.sort_by(|a, b| option.compare(a, b));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::article::value_objects::{ArticleId, ArticleSlug, ArticleTags, ArticleTitle};
    use chrono::{NaiveDate, Utc};

    fn article(id: i64, title: &str, date: (i32, u32, u32)) -> Article {
        let now = Utc::now();
        Article {
            id: ArticleId::new(id).unwrap(),
            title: ArticleTitle::new(title).unwrap(),
            slug: ArticleSlug::new(title.to_lowercase().replace(' ', "-")).unwrap(),
            thumbnail: None,
            content: String::new(),
            tags: ArticleTags::default(),
            publication_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    fn titles(articles: &[Article]) -> Vec<&str> {
        articles.iter().map(|a| a.title.as_str()).collect()
    }

    #[test]
    fn sorts_by_title_case_insensitively() {
        let mut articles = vec![
            article(1, "C Article", (2024, 1, 1)),
            article(2, "a Article", (2024, 1, 1)),
            article(3, "B Article", (2024, 1, 1)),
        ];
        sort_articles(&mut articles, SortOption::Title);
        assert_eq!(titles(&articles), ["a Article", "B Article", "C Article"]);
    }

    #[test]
    fn sorts_by_id_ascending() {
        let mut articles = vec![
            article(3, "Three", (2024, 1, 1)),
            article(1, "One", (2024, 1, 1)),
            article(2, "Two", (2024, 1, 1)),
        ];
        sort_articles(&mut articles, SortOption::Id);
        let ids: Vec<i64> = articles.iter().map(|a| a.id.0).collect();
        assert_eq!(ids, [1, 2, 3]);
    }

    #[test]
    fn sorts_by_publication_date_ascending() {
        let mut articles = vec![
            article(1, "Newest", (2024, 3, 1)),
            article(2, "Oldest", (2022, 1, 1)),
            article(3, "Middle", (2023, 6, 15)),
        ];
        sort_articles(&mut articles, SortOption::PublicationDate);
        assert_eq!(titles(&articles), ["Oldest", "Middle", "Newest"]);
    }

    #[test]
    fn unknown_option_is_a_no_op() {
        let mut articles = vec![
            article(2, "B", (2024, 1, 1)),
            article(1, "A", (2023, 1, 1)),
        ];
        let option = SortOption::parse("popularity");
        assert_eq!(option, SortOption::Unordered);
        sort_articles(&mut articles, option);
        assert_eq!(titles(&articles), ["B", "A"]);
    }

    #[test]
    fn parse_accepts_known_values() {
        assert_eq!(SortOption::parse("title"), SortOption::Title);
        assert_eq!(SortOption::parse("id"), SortOption::Id);
        assert_eq!(SortOption::parse("date"), SortOption::PublicationDate);
        assert_eq!(
            SortOption::parse("publication_date"),
            SortOption::PublicationDate
        );
    }
}
