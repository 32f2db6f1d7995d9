//! Section records supplied by pages.
//!
//! The engine only ever looks at `index` and `background_color`; everything
//! else rides along for the renderer.

use serde::Deserialize;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Media,
    Video,
    Text,
    TextSection,
    /// Any `type` the engine does not know. Rendered by the page, ignored here.
    Opaque,
}

impl SectionKind {
    fn from_tag(tag: &str) -> Self {
        match tag {
            "media" => SectionKind::Media,
            "video" => SectionKind::Video,
            "text" => SectionKind::Text,
            "text-section" => SectionKind::TextSection,
            _ => SectionKind::Opaque,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SectionContent {
    #[serde(default)]
    pub src: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub index: usize,
    pub kind: SectionKind,
    pub background_color: Option<String>,
    pub content: SectionContent,
}

impl Section {
    pub fn new(index: usize, kind: SectionKind) -> Self {
        Self {
            index,
            kind,
            background_color: None,
            content: SectionContent::default(),
        }
    }

    pub fn background(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.content.title = Some(title.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.content.body = Some(body.into());
        self
    }

    pub fn src(mut self, src: impl Into<String>) -> Self {
        self.content.src = Some(src.into());
        self
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSection {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    background_color: Option<String>,
    #[serde(flatten)]
    content: SectionContent,
}

/// Parses the JSON section contract. Indices follow array order.
pub fn parse_sections(json: &str) -> Result<Vec<Section>> {
    let raw: Vec<RawSection> = serde_json::from_str(json)?;
    Ok(raw
        .into_iter()
        .enumerate()
        .map(|(index, raw)| Section {
            index,
            kind: SectionKind::from_tag(&raw.kind),
            background_color: raw.background_color.filter(|c| !c.trim().is_empty()),
            content: raw.content,
        })
        .collect())
}
