//! Read-only queries the public site runs against the current snapshot.

use crate::kpi::derive_kpis;
use crate::model::portfolio::PortfolioDocument;
use crate::model::project::{Kpi, Project, ProjectCategory};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Number of related projects shown under a case study.
pub const RELATED_PROJECT_LIMIT: usize = 3;

/// Gallery filter; `All` never appears in stored data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(ProjectCategory),
}

impl CategoryFilter {
    pub fn matches(self, project: &Project) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => project.category == category,
        }
    }
}

impl Display for CategoryFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(category) => write!(f, "{category}"),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = <ProjectCategory as FromStr>::Err;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        value.parse().map(Self::Only)
    }
}

/// A project together with the statistics its card shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectCard<'a> {
    pub project: &'a Project,
    pub kpis: Vec<Kpi>,
}

pub fn filter_projects(doc: &PortfolioDocument, filter: CategoryFilter) -> Vec<&Project> {
    doc.projects
        .iter()
        .filter(|project| filter.matches(project))
        .collect()
}

/// Same-category projects other than `project`, in document order.
pub fn related_projects<'a>(
    doc: &'a PortfolioDocument,
    project: &Project,
    limit: usize,
) -> Vec<&'a Project> {
    doc.projects
        .iter()
        .filter(|other| other.category == project.category && other.id != project.id)
        .take(limit)
        .collect()
}

pub fn project_cards(doc: &PortfolioDocument, filter: CategoryFilter) -> Vec<ProjectCard<'_>> {
    filter_projects(doc, filter)
        .into_iter()
        .map(|project| ProjectCard {
            project,
            kpis: derive_kpis(project),
        })
        .collect()
}
