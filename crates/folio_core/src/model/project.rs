//! Project record and its nested chart/KPI shapes.
//!
//! # Responsibility
//! - Define the richest record in the document (chart series, coordinates,
//!   technology list).
//! - Map category display names to a closed enum.
//!
//! # Invariants
//! - `kpis` is a legacy stored list; new saves always write it empty and the
//!   site derives KPIs from `chart_data` at render time.
//! - `coordinates` is always `[latitude, longitude]`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Numeric record identifier (epoch milliseconds for generated ids).
pub type RecordId = i64;

/// `[latitude, longitude]` pair used by the project map.
pub type Coordinates = [f64; 2];

/// Project category as stored in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProjectCategory {
    #[default]
    #[serde(rename = "Hydraulic Modeling")]
    HydraulicModeling,
    #[serde(rename = "GIS & Mapping")]
    GisMapping,
    #[serde(rename = "Stormwater")]
    Stormwater,
    #[serde(rename = "Environmental")]
    Environmental,
}

impl ProjectCategory {
    /// All selectable categories in gallery order.
    pub const ALL: [ProjectCategory; 4] = [
        Self::HydraulicModeling,
        Self::GisMapping,
        Self::Stormwater,
        Self::Environmental,
    ];

    /// Display name, identical to the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            Self::HydraulicModeling => "Hydraulic Modeling",
            Self::GisMapping => "GIS & Mapping",
            Self::Stormwater => "Stormwater",
            Self::Environmental => "Environmental",
        }
    }
}

impl Display for ProjectCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a category name matches none of [`ProjectCategory::ALL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl Display for UnknownCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown project category: `{}`", self.0)
    }
}

impl Error for UnknownCategory {}

impl FromStr for ProjectCategory {
    type Err = UnknownCategory;

    /// Accepts the display name or a lowercase slug (`gis-mapping`).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|category| {
                category.label().eq_ignore_ascii_case(normalized)
                    || category_slug(*category) == normalized.to_ascii_lowercase()
            })
            .ok_or_else(|| UnknownCategory(normalized.to_string()))
    }
}

fn category_slug(category: ProjectCategory) -> &'static str {
    match category {
        ProjectCategory::HydraulicModeling => "hydraulic-modeling",
        ProjectCategory::GisMapping => "gis-mapping",
        ProjectCategory::Stormwater => "stormwater",
        ProjectCategory::Environmental => "environmental",
    }
}

/// One labelled statistic shown on a project card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kpi {
    pub label: String,
    pub value: String,
}

impl Kpi {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// One bar of a project's outcome chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub name: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl ChartPoint {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            unit: None,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Blank point appended by the project editor.
    pub fn blank() -> Self {
        Self::new("", 0.0).with_unit("")
    }

    /// Unit text, empty when absent.
    pub fn unit_str(&self) -> &str {
        self.unit.as_deref().unwrap_or("")
    }
}

/// Case-study project shown in the gallery and on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub category: ProjectCategory,
    #[serde(default)]
    pub image_url: String,
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kpis: Option<Vec<Kpi>>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technologies: Option<Vec<String>>,
    #[serde(default)]
    pub coordinates: Coordinates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_study_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_data: Option<Vec<ChartPoint>>,
}

impl Project {
    /// Creates a project with required fields and empty optional sections.
    pub fn new(id: RecordId, title: impl Into<String>, category: ProjectCategory, year: i32) -> Self {
        Self {
            id,
            title: title.into(),
            category,
            image_url: String::new(),
            year,
            kpis: None,
            description: String::new(),
            technologies: None,
            coordinates: [0.0, 0.0],
            case_study_url: None,
            chart_title: None,
            chart_data: None,
        }
    }

    /// Chart series, empty when the project has none.
    pub fn chart_points(&self) -> &[ChartPoint] {
        self.chart_data.as_deref().unwrap_or(&[])
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn longitude(&self) -> f64 {
        self.coordinates[1]
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartPoint, Project, ProjectCategory};

    #[test]
    fn category_parses_label_and_slug() {
        assert_eq!(
            "GIS & Mapping".parse::<ProjectCategory>().unwrap(),
            ProjectCategory::GisMapping
        );
        assert_eq!(
            "stormwater".parse::<ProjectCategory>().unwrap(),
            ProjectCategory::Stormwater
        );
        assert!("All".parse::<ProjectCategory>().is_err());
    }

    #[test]
    fn project_uses_camel_case_keys_and_omits_absent_options() {
        let mut project = Project::new(7, "Levee study", ProjectCategory::Environmental, 2021);
        project.chart_data = Some(vec![ChartPoint::new("Yr1", 3.0)]);

        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["imageUrl"], "");
        assert_eq!(json["category"], "Environmental");
        assert_eq!(json["chartData"][0]["name"], "Yr1");
        assert!(json.get("kpis").is_none());
        assert!(json["chartData"][0].get("unit").is_none());
    }
}
