// src/models/page.rs

use serde::Serialize;

/// The fixed set of lesson pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Home,
    Article,
    Objectives,
    ImmuneSystem,
    Autoimmune,
    DrugDevelopment,
    DesignChallenge,
    Quiz,
    Resources,
}

impl Page {
    /// Navigation order.
    pub const ALL: [Page; 9] = [
        Page::Home,
        Page::Article,
        Page::Objectives,
        Page::ImmuneSystem,
        Page::Autoimmune,
        Page::DrugDevelopment,
        Page::DesignChallenge,
        Page::Quiz,
        Page::Resources,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Article => "article",
            Page::Objectives => "objectives",
            Page::ImmuneSystem => "immune_system",
            Page::Autoimmune => "autoimmune",
            Page::DrugDevelopment => "drug_development",
            Page::DesignChallenge => "design_challenge",
            Page::Quiz => "quiz",
            Page::Resources => "resources",
        }
    }

    pub fn from_id(id: &str) -> Option<Page> {
        Page::ALL.into_iter().find(|p| p.id() == id)
    }
}

/// External reading linked from a page.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Link {
    pub title: &'static str,
    pub url: &'static str,
}

/// Static instructional content for one page.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PageContent {
    pub page: Page,
    pub title: &'static str,
    pub summary: &'static str,
    pub key_points: &'static [&'static str],
    pub links: &'static [Link],
}

/// Navigation entry.
#[derive(Debug, Serialize)]
pub struct PageSummary {
    pub id: &'static str,
    pub title: &'static str,
}
