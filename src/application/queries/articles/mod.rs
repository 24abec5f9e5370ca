mod get_by_id;
mod get_by_slug;
mod list;
mod service;
mod tags;

pub use get_by_id::GetArticleByIdQuery;
pub use get_by_slug::GetArticleBySlugQuery;
pub use list::{ListArticlesByTagsQuery, ListArticlesQuery};
pub use service::ArticleQueryService;
