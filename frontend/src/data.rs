use scroll_choreo::{parse_sections, Section, SectionKind};
use serde::Deserialize;

use crate::components::boundary::PageError;

const CATALOG_JSON: &str = include_str!("../data/catalog.json");

#[derive(Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub slug: String,
    pub title: String,
    pub blurb: String,
    #[serde(default)]
    pub background_color: Option<String>,
}

#[derive(Deserialize, Clone, PartialEq, Debug)]
pub struct Project {
    pub slug: String,
    pub name: String,
    pub category: String,
    pub summary: String,
    pub cover: String,
    gallery: serde_json::Value,
}

impl Project {
    /// Gallery slides in the section contract format.
    pub fn gallery(&self) -> Result<Vec<Section>, PageError> {
        Ok(parse_sections(&self.gallery.to_string())?)
    }
}

#[derive(Deserialize, Clone, PartialEq, Debug)]
pub struct Catalog {
    pub categories: Vec<Category>,
    pub projects: Vec<Project>,
}

impl Catalog {
    pub fn load() -> Result<Self, PageError> {
        Ok(serde_json::from_str(CATALOG_JSON)?)
    }

    pub fn project(&self, slug: &str) -> Result<&Project, PageError> {
        self.projects
            .iter()
            .find(|p| p.slug == slug)
            .ok_or_else(|| PageError::UnknownProject(slug.to_string()))
    }

    pub fn projects_in<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Project> + 'a {
        self.projects.iter().filter(move |p| p.category == category)
    }

    /// One carousel panel per category.
    pub fn category_sections(&self) -> Vec<Section> {
        self.categories
            .iter()
            .enumerate()
            .map(|(i, category)| {
                let section = Section::new(i, SectionKind::TextSection)
                    .title(category.title.clone())
                    .body(category.blurb.clone());
                match &category.background_color {
                    Some(color) => section.background(color.clone()),
                    None => section,
                }
            })
            .collect()
    }
}
