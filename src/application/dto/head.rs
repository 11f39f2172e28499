//! Document head shared by every page

use serde::Serialize;

pub const SITE_SUFFIX: &str = "Sunflower RPG";
pub const SITE_DESCRIPTION: &str =
    "Website dedicado à criação da Ficha do RPG da Sunflower Studios!";
pub const SITE_AUTHOR: &str = "Sunflower Studios";

/// An extra tag a page appends to the head
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "tag", rename_all = "snake_case")]
pub enum HeadTag {
    Meta { name: String, content: String },
    Link { rel: String, href: String },
}

impl HeadTag {
    pub fn meta(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Meta {
            name: name.into(),
            content: content.into(),
        }
    }

    pub fn link(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self::Link {
            rel: rel.into(),
            href: href.into(),
        }
    }

    fn to_html(&self) -> String {
        match self {
            Self::Meta { name, content } => format!(
                r#"<meta name="{}" content="{}" />"#,
                escape_html(name),
                escape_html(content)
            ),
            Self::Link { rel, href } => format!(
                r#"<link rel="{}" href="{}" />"#,
                escape_html(rel),
                escape_html(href)
            ),
        }
    }
}

/// Title and meta tags of a page.
///
/// The description and author meta pair is always present and comes first;
/// page-specific tags follow in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentHead {
    pub title: String,
    pub tags: Vec<HeadTag>,
}

impl DocumentHead {
    pub fn new(title: Option<&str>) -> Self {
        Self {
            title: format!("{} - {}", title.unwrap_or_default(), SITE_SUFFIX),
            tags: vec![
                HeadTag::meta("description", SITE_DESCRIPTION),
                HeadTag::meta("author", SITE_AUTHOR),
            ],
        }
    }

    pub fn with_tag(mut self, tag: HeadTag) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn to_html(&self) -> String {
        let mut html = String::from("<head>");
        for tag in &self.tags {
            html.push_str(&tag.to_html());
        }
        html.push_str("<title>");
        html.push_str(&escape_html(&self.title));
        html.push_str("</title></head>");
        html
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
