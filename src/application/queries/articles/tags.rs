use super::ArticleQueryService;
use crate::application::error::ApplicationResult;

impl ArticleQueryService {
    /// Every distinct tag in use, independent of any filter.
    pub async fn list_tags(&self) -> ApplicationResult<Vec<String>> {
        let tags = self.read_repo.list_tags().await?;
        Ok(tags)
    }
}
