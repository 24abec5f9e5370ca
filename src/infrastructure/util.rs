use crate::application::ports::util::SlugGenerator;

/// Lowercases the title and turns spaces into hyphens; everything else is kept.
#[derive(Debug, Default, Clone, Copy)]
pub struct NaiveSlugGenerator;

impl SlugGenerator for NaiveSlugGenerator {
    fn slugify(&self, title: &str) -> String {
        title.trim().to_lowercase().replace(' ', "-")
    }
}

/// ASCII-only slugs via the `slug` crate: punctuation dropped, runs of
/// separators collapsed into a single hyphen.
#[derive(Debug, Default, Clone, Copy)]
pub struct SanitizingSlugGenerator;

impl SlugGenerator for SanitizingSlugGenerator {
    fn slugify(&self, title: &str) -> String {
        slug::slugify(title)
    }
}
