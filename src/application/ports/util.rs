// src/application/ports/util.rs

/// Derives the URL slug of an article from its title. Implementations must be
/// deterministic and idempotent on their own output.
pub trait SlugGenerator: Send + Sync {
    fn slugify(&self, title: &str) -> String;
}
