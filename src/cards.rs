//! Project summaries from the projects API and the card view model built
//! from them.

use serde::Deserialize;

pub const VISIBLE_TECHNOLOGIES: usize = 3;
pub const CARDS_PER_PAGE: usize = 3;
pub const CARD_COLUMN_CLASS: &str = "col-lg-4 col-md-6 mb-4 project-item";
pub const CARD_ITEM_SELECTOR: &str = ".project-item";

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ProjectSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub created_date: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CardMedia {
    Image { src: String, alt: String },
    Placeholder,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProjectCardView {
    pub title: String,
    pub description: String,
    pub detail_href: String,
    pub media: CardMedia,
    pub live_url: Option<String>,
    pub badges: Vec<String>,
    pub overflow: Option<usize>,
    pub created_label: String,
}

impl ProjectCardView {
    pub fn overflow_label(&self) -> Option<String> {
        self.overflow.map(|hidden| format!("+{hidden} more"))
    }
}

impl From<&ProjectSummary> for ProjectCardView {
    fn from(project: &ProjectSummary) -> Self {
        let media = match non_blank(project.image.as_deref()) {
            Some(src) => CardMedia::Image {
                src,
                alt: project.title.clone(),
            },
            None => CardMedia::Placeholder,
        };
        let hidden = project
            .technologies
            .len()
            .saturating_sub(VISIBLE_TECHNOLOGIES);

        Self {
            title: project.title.clone(),
            description: project.short_description.clone(),
            detail_href: format!("/project/{}/", project.id),
            media,
            live_url: non_blank(project.live_url.as_deref()),
            badges: project
                .technologies
                .iter()
                .take(VISIBLE_TECHNOLOGIES)
                .cloned()
                .collect(),
            overflow: (hidden > 0).then_some(hidden),
            created_label: project.created_date.clone(),
        }
    }
}

/// At most [`CARDS_PER_PAGE`] cards are rendered per page, whatever the API sends.
pub fn cards_for_page(projects: &[ProjectSummary]) -> Vec<ProjectCardView> {
    projects
        .iter()
        .take(CARDS_PER_PAGE)
        .map(ProjectCardView::from)
        .collect()
}

pub fn count_hint(total_shown: usize) -> String {
    format!("Showing {total_shown} project(s)")
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
}
