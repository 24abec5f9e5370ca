use super::ArticleCommandService;
use crate::{
    application::{
        dto::ArticleDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::{ArticleSlug, ArticleUpdate, parse_document},
};

/// Replace the article currently published under `slug` with a freshly parsed
/// document. Every field except the id and creation time is overwritten.
pub struct UpdateArticleCommand {
    pub slug: String,
    pub document: String,
}

impl ArticleCommandService {
    pub async fn update_article(&self, command: UpdateArticleCommand) -> ApplicationResult<ArticleDto> {
        let slug = ArticleSlug::new(command.slug)?;
        let existing = self
            .read_repo
            .find_by_slug(&slug)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        let document = parse_document(&command.document, self.slugger.as_ref())?;

        // a retitled article must not take over another article's slug
        self.slug_service
            .ensure_available(&document.slug, Some(existing.id))
            .await?;

        let update = ArticleUpdate::from_document(existing.id, document, self.clock.now());
        let updated = self.write_repo.update(update).await?;

        tracing::info!(id = %updated.id, old_slug = %slug, slug = %updated.slug, "article updated");
        Ok(updated.into())
    }
}
