// src/application/commands/articles/create.rs
use super::ArticleCommandService;
use crate::{
    application::{dto::ArticleDto, error::ApplicationResult},
    domain::article::{NewArticle, parse_document},
};

/// Publish a new article from a raw header + body document.
pub struct CreateArticleCommand {
    pub document: String,
}

impl ArticleCommandService {
    pub async fn create_article(&self, command: CreateArticleCommand) -> ApplicationResult<ArticleDto> {
        let document = parse_document(&command.document, self.slugger.as_ref())?;

        self.slug_service
            .ensure_available(&document.slug, None)
            .await?;

        let new_article = NewArticle::from_document(document, self.clock.now());
        let created = self.write_repo.insert(new_article).await?;

        tracing::info!(id = %created.id, slug = %created.slug, "article created");
        Ok(created.into())
    }
}
