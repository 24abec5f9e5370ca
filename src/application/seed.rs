//! Bulk import of `*.md` article documents from a directory at startup.
use std::path::{Path, PathBuf};

use crate::application::{
    commands::articles::{ArticleCommandService, CreateArticleCommand},
    error::{ApplicationError, ApplicationResult},
};

const DOCUMENT_EXTENSION: &str = "md";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub imported: Vec<String>,
    /// Files whose slug was already taken.
    pub skipped: Vec<PathBuf>,
    /// Files that failed to parse, with the reason.
    pub rejected: Vec<(PathBuf, String)>,
}

/// Create an article for every `*.md` file directly inside `dir`, in file-name
/// order. Conflicting and malformed documents are reported, not fatal; only an
/// unreadable directory or a storage failure aborts the import.
pub async fn import_directory(
    commands: &ArticleCommandService,
    dir: &Path,
) -> ApplicationResult<SeedReport> {
    let mut paths = document_paths(dir).await?;
    paths.sort();

    let mut report = SeedReport::default();
    for path in paths {
        let document = tokio::fs::read_to_string(&path).await.map_err(|err| {
            ApplicationError::infrastructure(format!("failed to read {}: {err}", path.display()))
        })?;

        match commands
            .create_article(CreateArticleCommand { document })
            .await
        {
            Ok(article) => {
                tracing::debug!(path = %path.display(), slug = %article.slug, "seeded article");
                report.imported.push(article.slug);
            }
            Err(err) if err.is_conflict() => {
                tracing::info!(path = %path.display(), "seed document skipped: {err}");
                report.skipped.push(path);
            }
            Err(ApplicationError::Domain(crate::domain::errors::DomainError::Document(err))) => {
                tracing::warn!(path = %path.display(), error = %err, "seed document rejected");
                report.rejected.push((path, err.to_string()));
            }
            Err(err) => return Err(err),
        }
    }

    tracing::info!(
        imported = report.imported.len(),
        skipped = report.skipped.len(),
        rejected = report.rejected.len(),
        dir = %dir.display(),
        "seed import finished"
    );
    Ok(report)
}

async fn document_paths(dir: &Path) -> ApplicationResult<Vec<PathBuf>> {
    let read_err = |err: std::io::Error| {
        ApplicationError::infrastructure(format!("failed to read {}: {err}", dir.display()))
    };

    let mut entries = tokio::fs::read_dir(dir).await.map_err(read_err)?;
    let mut paths = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(read_err)? {
        let path = entry.path();
        let is_document = path
            .extension()
            .is_some_and(|ext| ext == DOCUMENT_EXTENSION);
        if is_document && entry.file_type().await.map_err(read_err)?.is_file() {
            paths.push(path);
        }
    }
    Ok(paths)
}
