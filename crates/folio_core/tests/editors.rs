use folio_core::{
    BlogPost, ChartPoint, ChartPointEdit, EditTarget, EditorError, ExpertiseItem, FormValue,
    Project, ProjectCategory, ProjectEditor, RecordEditor, SequenceIdClock, Testimonial,
};
use std::cell::Cell;

#[test]
fn new_record_is_built_from_form_values() {
    let mut editor = RecordEditor::<ExpertiseItem>::new(EditTarget::New);
    editor.set_field("title", "Stormwater Design").unwrap();
    editor.set_field("iconName", "RainIcon").unwrap();
    editor.set_field("tools", "SWMM, Civil 3D").unwrap();

    let saved = editor.submit(|item| item).unwrap();
    assert_eq!(
        saved,
        ExpertiseItem {
            icon_name: "RainIcon".to_string(),
            title: "Stormwater Design".to_string(),
            tools: "SWMM, Civil 3D".to_string(),
        }
    );
}

#[test]
fn missing_required_field_blocks_save() {
    let mut editor = RecordEditor::<Testimonial>::new(EditTarget::New);
    editor.set_field("quote", "Great work").unwrap();
    editor.set_field("author", "Dana").unwrap();

    let called = Cell::new(false);
    let err = editor.submit(|_| called.set(true)).unwrap_err();
    assert_eq!(err, EditorError::MissingRequired("Author's Title"));
    assert!(!called.get());
}

#[test]
fn editing_merges_over_original_record() {
    let original = BlogPost {
        id: 101,
        title: "Why 2D models matter".to_string(),
        excerpt: "A short case for 2D.".to_string(),
        image_url: "https://images.example.com/2d.jpg".to_string(),
        link: "https://blog.example.com/2d-models".to_string(),
        meta_description: String::new(),
        og_image: String::new(),
    };

    let mut editor = RecordEditor::new(EditTarget::Existing(original.clone()));
    assert_eq!(editor.value("id"), Some(&FormValue::Number(101.0)));
    editor.set_field("excerpt", "Updated excerpt.").unwrap();

    let saved = editor.submit(|post| post).unwrap();
    assert_eq!(saved.id, 101);
    assert_eq!(saved.excerpt, "Updated excerpt.");
    assert_eq!(saved.title, original.title);
}

#[test]
fn blank_number_input_trips_required_gate() {
    let mut editor = RecordEditor::<BlogPost>::new(EditTarget::New);
    editor.set_field("id", "").unwrap();
    editor.set_field("title", "t").unwrap();
    editor.set_field("excerpt", "e").unwrap();
    editor.set_field("imageUrl", "https://x.example/i.png").unwrap();
    editor.set_field("link", "https://x.example/p").unwrap();

    assert_eq!(editor.validate(), Err(EditorError::MissingRequired("ID")));

    editor.set_field("id", "7").unwrap();
    assert_eq!(editor.submit(|post| post.id).unwrap(), 7);
}

#[test]
fn url_fields_must_be_absolute() {
    let mut editor = RecordEditor::<BlogPost>::new(EditTarget::New);
    editor.set_field("id", "7").unwrap();
    editor.set_field("title", "t").unwrap();
    editor.set_field("excerpt", "e").unwrap();
    editor.set_field("imageUrl", "images/i.png").unwrap();
    editor.set_field("link", "https://x.example/p").unwrap();

    let err = editor.validate().unwrap_err();
    assert!(matches!(err, EditorError::InvalidUrl { field: "imageUrl", .. }));
}

#[test]
fn cancel_invokes_callback_and_discards_edits() {
    let mut editor = RecordEditor::<ExpertiseItem>::new(EditTarget::New);
    editor.set_field("title", "Discard me").unwrap();

    let cancelled = Cell::new(false);
    editor.cancel(|| cancelled.set(true));
    assert!(cancelled.get());
}

fn filled_project_editor() -> ProjectEditor {
    let mut editor = ProjectEditor::with_current_year(EditTarget::New, 2026);
    let form = editor.form_mut();
    form.title = "Detention Pond Study".to_string();
    form.category = ProjectCategory::Stormwater;
    form.image_url = "https://images.example.com/pond.jpg".to_string();
    form.description = "Regional detention sizing.".to_string();
    form.technologies = "HEC-RAS,  ArcGIS ,".to_string();
    form.lat = 29.5;
    form.lon = -95.1;
    editor
}

#[test]
fn project_cancel_invokes_callback_without_saving() {
    let mut editor = filled_project_editor();
    editor.add_chart_point();

    let cancelled = Cell::new(false);
    editor.cancel(|| cancelled.set(true));
    assert!(cancelled.get());
}

#[test]
fn project_submit_assembles_derived_fields() {
    let ids = SequenceIdClock::starting_at(1_700_000_000_000);
    let editor = filled_project_editor();

    let project = editor.submit(&ids, |project| project).unwrap();
    assert_eq!(project.id, 1_700_000_000_000);
    assert_eq!(
        project.technologies,
        Some(vec!["HEC-RAS".to_string(), "ArcGIS".to_string()])
    );
    assert_eq!(project.coordinates, [29.5, -95.1]);
    assert_eq!(project.kpis, Some(Vec::new()));
    assert_eq!(project.year, 2026);
    assert_eq!(project.case_study_url.as_deref(), Some("#projects"));
    assert!(project.chart_title.is_none());
}

#[test]
fn project_edit_keeps_id_and_clears_stored_kpis() {
    let ids = SequenceIdClock::starting_at(1);
    let mut existing = Project::new(42, "Old", ProjectCategory::Environmental, 2018);
    existing.image_url = "https://images.example.com/old.jpg".to_string();
    existing.description = "d".to_string();
    existing.kpis = Some(vec![folio_core::Kpi::new("Legacy", "1")]);

    let mut editor = ProjectEditor::new(EditTarget::Existing(existing));
    editor.form_mut().title = "Renamed".to_string();
    let project = editor.submit(&ids, |project| project).unwrap();

    assert_eq!(project.id, 42);
    assert_eq!(project.title, "Renamed");
    assert_eq!(project.kpis, Some(Vec::new()));
}

#[test]
fn project_requires_title_image_and_description() {
    let ids = SequenceIdClock::starting_at(1);
    let mut editor = filled_project_editor();
    editor.form_mut().image_url.clear();

    let err = editor.submit(&ids, |_| ()).unwrap_err();
    assert_eq!(err, EditorError::MissingRequired("Image URL"));
}

#[test]
fn removing_chart_point_shifts_later_points() {
    let mut editor = filled_project_editor();
    for (name, value) in [("A", 1.0), ("B", 2.0), ("C", 3.0)] {
        let index = editor.add_chart_point();
        editor
            .update_chart_point(index, ChartPointEdit::Name(name.to_string()))
            .unwrap();
        editor
            .update_chart_point(index, ChartPointEdit::Value(value))
            .unwrap();
    }

    let removed = editor.remove_chart_point(1).unwrap();
    assert_eq!(removed.name, "B");

    let names: Vec<&str> = editor.chart_points().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["A", "C"]);
}

#[test]
fn added_chart_point_starts_blank() {
    let mut editor = filled_project_editor();
    editor.add_chart_point();
    assert_eq!(editor.chart_points(), &[ChartPoint::blank()]);
}
