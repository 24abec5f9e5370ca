// tests/support/builders.rs

/// Builds raw article documents in the `key:value` / `===` / body format.
pub struct DocumentBuilder {
    title: String,
    thumbnail: Option<String>,
    publication_date: String,
    tags: Vec<String>,
    body: String,
}

impl DocumentBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            thumbnail: None,
            publication_date: "2024-01-01".into(),
            tags: Vec::new(),
            body: "Body text.".into(),
        }
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.publication_date = date.into();
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|tag| (*tag).to_string()).collect();
        self
    }

    pub fn thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn build(self) -> String {
        let mut doc = format!("title:{}\n", self.title);
        if let Some(thumbnail) = self.thumbnail {
            doc.push_str(&format!("thumbnail:{thumbnail}\n"));
        }
        doc.push_str(&format!("publicationDate:{}\n", self.publication_date));
        if !self.tags.is_empty() {
            doc.push_str(&format!("tags:{}\n", self.tags.join(",")));
        }
        doc.push_str("===\n");
        doc.push_str(&self.body);
        doc
    }
}

pub const FONDANT_DOCUMENT: &str = "title:Fondant recipe\npublicationDate:2005-04-02\ntags:cooking,sweets\n===\n# Markdown Title\nMarkdown contents...";
