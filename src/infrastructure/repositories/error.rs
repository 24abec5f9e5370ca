use crate::domain::errors::DomainError;
use sqlx::error::ErrorKind;

// PostgreSQL derives this name for `slug TEXT UNIQUE`; the MySQL migration
// declares the same index name, which then shows up in the error message.
const CNT_ARTICLE_SLUG: &str = "articles_slug_key";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if db_err.kind() == ErrorKind::UniqueViolation {
                let on_slug = db_err.constraint() == Some(CNT_ARTICLE_SLUG)
                    || db_err.message().contains(CNT_ARTICLE_SLUG);
                return if on_slug {
                    DomainError::Conflict("slug already exists".into())
                } else {
                    DomainError::Conflict("unique constraint violated".into())
                };
            }

            tracing::error!(error = %db_err, "database error");
            DomainError::Persistence(db_err.message().to_string())
        }
        _ => {
            tracing::error!(error = %err, "storage failure");
            DomainError::Persistence(err.to_string())
        }
    }
}
