//! Render hook for the in-page annotation viewer.
//!
//! The annotation library calls a renderer with each annotation record and
//! inserts the returned HTML. Ours prefixes the comment with its author.

#[cfg(test)]
#[path = "annotation_test.rs"]
mod annotation_test;

use serde::Deserialize;

/// Localised strings the renderer needs.
pub trait Translate {
    fn no_comment(&self) -> String;
}

/// English strings.
#[derive(Clone, Copy, Debug, Default)]
pub struct English;

impl Translate for English {
    fn no_comment(&self) -> String {
        "No comment".to_owned()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct AnnotationUser {
    pub name: String,
}

/// The fields of an annotation record the renderer reads.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Annotation {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub user: AnnotationUser,
}

/// Render an annotation as a bold author line followed by the comment text.
///
/// Missing or empty text renders an italic "No comment" placeholder instead.
#[must_use]
pub fn render_with_username(annotation: &Annotation, strings: &dyn Translate) -> String {
    match annotation.text.as_deref().filter(|t| !t.is_empty()) {
        Some(text) => format!(
            "<p style=\"font-weight: bold;\">{}</p>{}",
            escape_html(&annotation.user.name),
            escape_html(text)
        ),
        None => format!("<i>{}</i>", strings.no_comment()),
    }
}

/// Escape text for inclusion in HTML element content or attribute values.
#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '/' => out.push_str("&#47;"),
            _ => out.push(ch),
        }
    }
    out
}
