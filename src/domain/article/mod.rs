pub mod document;
pub mod entity;
pub mod repository;
pub mod services;
pub mod sort;
pub mod value_objects;

pub use document::{ArticleDocument, DocumentError, parse_document};
pub use entity::{Article, ArticleUpdate, NewArticle};
pub use repository::{ArticleReadRepository, ArticleWriteRepository};
pub use sort::{SortOption, sort_articles};
pub use value_objects::{ArticleId, ArticleSlug, ArticleTags, ArticleTitle};
