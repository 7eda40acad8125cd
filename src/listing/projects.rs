use std::str::FromStr;

use super::Query;
use crate::error::ParseError;
use crate::models::{Project, ProjectStatus};

/// Status dropdown of the project list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectFilter {
    #[default]
    All,
    Only(ProjectStatus),
}

impl FromStr for ProjectFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(ProjectFilter::All)
        } else {
            s.parse().map(ProjectFilter::Only)
        }
    }
}

/// Projects whose name or client contains `query` and whose status passes
/// `status`
pub fn filter(projects: &[Project], query: &str, status: ProjectFilter) -> Vec<Project> {
    let query = Query::new(query);
    projects
        .iter()
        .filter(|project| query.matches_any(&[project.name.as_str(), project.client.as_str()]))
        .filter(|project| match status {
            ProjectFilter::All => true,
            ProjectFilter::Only(wanted) => project.status == wanted,
        })
        .cloned()
        .collect()
}
