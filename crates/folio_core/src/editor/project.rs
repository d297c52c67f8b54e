//! Dedicated editor for project records.
//!
//! # Invariants
//! - Technologies stay a comma-separated display string until submit.
//! - Latitude/longitude are edited independently and paired on submit.
//! - Chart points have no identity beyond their current index.
//! - Submitted projects always carry an id and an empty stored KPI list.

use super::{EditTarget, EditorError};
use crate::ids::IdClock;
use crate::model::project::{ChartPoint, Project, ProjectCategory};
use chrono::{Datelike, Local};

const DEFAULT_CASE_STUDY_URL: &str = "#projects";

/// One in-place edit of a chart point field.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartPointEdit {
    Name(String),
    Value(f64),
    Unit(String),
}

/// Editable project fields as the form presents them.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectForm {
    pub title: String,
    pub category: ProjectCategory,
    pub image_url: String,
    pub year: i32,
    pub description: String,
    pub technologies: String,
    pub case_study_url: String,
    pub chart_title: String,
    pub chart_data: Vec<ChartPoint>,
    pub lat: f64,
    pub lon: f64,
}

impl ProjectForm {
    fn blank(current_year: i32) -> Self {
        Self {
            title: String::new(),
            category: ProjectCategory::default(),
            image_url: String::new(),
            year: current_year,
            description: String::new(),
            technologies: String::new(),
            case_study_url: DEFAULT_CASE_STUDY_URL.to_string(),
            chart_title: String::new(),
            chart_data: Vec::new(),
            lat: 0.0,
            lon: 0.0,
        }
    }

    fn from_project(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            category: project.category,
            image_url: project.image_url.clone(),
            year: project.year,
            description: project.description.clone(),
            technologies: project
                .technologies
                .as_deref()
                .unwrap_or_default()
                .join(", "),
            case_study_url: project
                .case_study_url
                .clone()
                .unwrap_or_else(|| DEFAULT_CASE_STUDY_URL.to_string()),
            chart_title: project.chart_title.clone().unwrap_or_default(),
            chart_data: project.chart_points().to_vec(),
            lat: project.latitude(),
            lon: project.longitude(),
        }
    }
}

/// Splits the comma-separated technologies string.
///
/// Entries are trimmed and empty entries dropped; order is preserved.
pub fn parse_technologies(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Form state for creating or editing one project.
#[derive(Debug, Clone)]
pub struct ProjectEditor {
    original: Option<Project>,
    form: ProjectForm,
}

impl ProjectEditor {
    /// Opens an editor; new projects default the year to the current one.
    pub fn new(target: EditTarget<Project>) -> Self {
        Self::with_current_year(target, Local::now().year())
    }

    pub fn with_current_year(target: EditTarget<Project>, current_year: i32) -> Self {
        match target {
            EditTarget::New => Self {
                original: None,
                form: ProjectForm::blank(current_year),
            },
            EditTarget::Existing(project) => Self {
                form: ProjectForm::from_project(&project),
                original: Some(project),
            },
        }
    }

    pub fn is_new(&self) -> bool {
        self.original.is_none()
    }

    pub fn heading(&self) -> &'static str {
        if self.is_new() {
            "Add New Project"
        } else {
            "Edit Project"
        }
    }

    pub fn form(&self) -> &ProjectForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ProjectForm {
        &mut self.form
    }

    pub fn chart_points(&self) -> &[ChartPoint] {
        &self.form.chart_data
    }

    /// Appends a blank point and returns its index.
    pub fn add_chart_point(&mut self) -> usize {
        self.form.chart_data.push(ChartPoint::blank());
        self.form.chart_data.len() - 1
    }

    pub fn update_chart_point(
        &mut self,
        index: usize,
        edit: ChartPointEdit,
    ) -> Result<(), EditorError> {
        let len = self.form.chart_data.len();
        let point = self
            .form
            .chart_data
            .get_mut(index)
            .ok_or(EditorError::ChartPointOutOfRange { index, len })?;
        match edit {
            ChartPointEdit::Name(name) => point.name = name,
            ChartPointEdit::Value(value) => point.value = finite("value", value)?,
            ChartPointEdit::Unit(unit) => point.unit = Some(unit),
        }
        Ok(())
    }

    /// Removes the point at `index`; later points shift down by one.
    pub fn remove_chart_point(&mut self, index: usize) -> Result<ChartPoint, EditorError> {
        let len = self.form.chart_data.len();
        if index >= len {
            return Err(EditorError::ChartPointOutOfRange { index, len });
        }
        Ok(self.form.chart_data.remove(index))
    }

    pub fn validate(&self) -> Result<(), EditorError> {
        let required = [
            ("Title", &self.form.title),
            ("Image URL", &self.form.image_url),
            ("Description", &self.form.description),
        ];
        for (label, value) in required {
            if value.is_empty() {
                return Err(EditorError::MissingRequired(label));
            }
        }
        finite("lat", self.form.lat)?;
        finite("lon", self.form.lon)?;
        for point in &self.form.chart_data {
            finite("value", point.value)?;
        }
        Ok(())
    }

    /// Builds the finished project and hands it to `on_save`.
    ///
    /// New projects draw a fresh id from `ids`; edited projects keep theirs.
    pub fn submit<T>(
        &self,
        ids: &dyn IdClock,
        on_save: impl FnOnce(Project) -> T,
    ) -> Result<T, EditorError> {
        self.validate()?;

        let form = &self.form;
        let id = match self.original.as_ref().map(|project| project.id) {
            Some(id) if id != 0 => id,
            _ => ids.next_id(),
        };

        let project = Project {
            id,
            title: form.title.clone(),
            category: form.category,
            image_url: form.image_url.clone(),
            year: form.year,
            kpis: Some(Vec::new()),
            description: form.description.clone(),
            technologies: Some(parse_technologies(&form.technologies)),
            coordinates: [form.lat, form.lon],
            case_study_url: non_empty(&form.case_study_url),
            chart_title: non_empty(&form.chart_title),
            chart_data: Some(form.chart_data.clone()),
        };

        Ok(on_save(project))
    }

    pub fn cancel(self, on_cancel: impl FnOnce()) {
        on_cancel();
    }
}

// Non-finite floats serialize as `null` and would make the persisted
// document unreadable.
fn finite(field: &'static str, value: f64) -> Result<f64, EditorError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EditorError::InvalidNumber {
            field,
            input: value.to_string(),
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_technologies, ChartPointEdit, ProjectEditor};
    use crate::editor::{EditTarget, EditorError};
    use crate::model::project::{Project, ProjectCategory};

    #[test]
    fn technologies_are_trimmed_and_empties_dropped() {
        assert_eq!(
            parse_technologies("HEC-RAS,  ArcGIS ,"),
            vec!["HEC-RAS".to_string(), "ArcGIS".to_string()]
        );
        assert!(parse_technologies(" , ,").is_empty());
    }

    #[test]
    fn blank_form_uses_defaults() {
        let editor = ProjectEditor::with_current_year(EditTarget::New, 2026);
        let form = editor.form();
        assert_eq!(form.year, 2026);
        assert_eq!(form.category, ProjectCategory::HydraulicModeling);
        assert_eq!(form.case_study_url, "#projects");
        assert_eq!(editor.heading(), "Add New Project");
    }

    #[test]
    fn existing_project_joins_technologies_for_display() {
        let mut project = Project::new(5, "Dam break", ProjectCategory::Stormwater, 2019);
        project.technologies = Some(vec!["HEC-RAS".to_string(), "ArcGIS".to_string()]);
        project.coordinates = [29.7, -95.3];

        let editor = ProjectEditor::new(EditTarget::Existing(project));
        assert_eq!(editor.form().technologies, "HEC-RAS, ArcGIS");
        assert_eq!(editor.form().lat, 29.7);
        assert_eq!(editor.form().lon, -95.3);
    }

    #[test]
    fn chart_point_edits_are_bounds_checked() {
        let mut editor = ProjectEditor::with_current_year(EditTarget::New, 2026);
        let index = editor.add_chart_point();
        editor
            .update_chart_point(index, ChartPointEdit::Value(12.5))
            .unwrap();
        assert_eq!(editor.chart_points()[0].value, 12.5);

        let err = editor
            .update_chart_point(3, ChartPointEdit::Name("x".to_string()))
            .unwrap_err();
        assert_eq!(err, EditorError::ChartPointOutOfRange { index: 3, len: 1 });
        assert!(editor.remove_chart_point(1).is_err());
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        let mut editor = ProjectEditor::with_current_year(EditTarget::New, 2026);
        let index = editor.add_chart_point();
        let err = editor
            .update_chart_point(index, ChartPointEdit::Value(f64::NAN))
            .unwrap_err();
        assert!(matches!(err, EditorError::InvalidNumber { field: "value", .. }));
        assert_eq!(editor.chart_points()[0].value, 0.0);

        let form = editor.form_mut();
        form.title = "t".to_string();
        form.image_url = "https://images.example.com/t.jpg".to_string();
        form.description = "d".to_string();
        form.lon = f64::INFINITY;
        let err = editor.validate().unwrap_err();
        assert_eq!(
            err,
            EditorError::InvalidNumber {
                field: "lon",
                input: "inf".to_string()
            }
        );
    }
}
