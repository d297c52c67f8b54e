use folio_core::{derive_kpis, ChartPoint, Kpi, Project, ProjectCategory};

fn project_with_points(points: Vec<ChartPoint>) -> Project {
    let mut project = Project::new(1, "Levee", ProjectCategory::HydraulicModeling, 2024);
    project.chart_data = Some(points);
    project
}

#[test]
fn reduction_from_first_to_last_point() {
    let project = project_with_points(vec![
        ChartPoint::new("Yr1", 100.0),
        ChartPoint::new("Yr5", 40.0).with_unit("%"),
    ]);

    assert_eq!(
        derive_kpis(&project),
        vec![
            Kpi::new("Final Outcome (Yr5)", "40%"),
            Kpi::new("Overall Reduction", "60.0%"),
        ]
    );
}

#[test]
fn growth_is_labelled_improvement() {
    let project = project_with_points(vec![
        ChartPoint::new("2019", 8.0),
        ChartPoint::new("2020", 9.0),
        ChartPoint::new("2021", 12.0).with_unit(" cfs"),
    ]);

    let kpis = derive_kpis(&project);
    assert_eq!(kpis[0], Kpi::new("Final Outcome (2021)", "12 cfs"));
    assert_eq!(kpis[1], Kpi::new("Overall Improvement", "50.0%"));
}

#[test]
fn unchanged_series_counts_as_improvement() {
    let project = project_with_points(vec![ChartPoint::new("A", 5.0), ChartPoint::new("B", 5.0)]);
    assert_eq!(derive_kpis(&project)[1], Kpi::new("Overall Improvement", "0.0%"));
}

#[test]
fn zero_first_value_yields_single_kpi() {
    let project = project_with_points(vec![ChartPoint::new("A", 0.0), ChartPoint::new("B", 5.0)]);

    let kpis = derive_kpis(&project);
    assert_eq!(kpis, vec![Kpi::new("Final Outcome (B)", "5")]);
}

#[test]
fn negative_first_value_also_skips_change() {
    let project = project_with_points(vec![ChartPoint::new("A", -4.0), ChartPoint::new("B", 2.0)]);
    assert_eq!(derive_kpis(&project).len(), 1);
}

#[test]
fn final_value_uses_grouping() {
    let project = project_with_points(vec![
        ChartPoint::new("Before", 2000.0),
        ChartPoint::new("After", 12500.5).with_unit(" ac-ft"),
    ]);
    assert_eq!(derive_kpis(&project)[0].value, "12,500.5 ac-ft");
}

#[test]
fn short_series_falls_back_to_stored_kpis_capped_at_two() {
    let mut project = project_with_points(vec![ChartPoint::new("Only", 1.0)]);
    project.kpis = Some(vec![
        Kpi::new("Runoff captured", "1.2 in"),
        Kpi::new("Cost", "$2.1M"),
        Kpi::new("Trees planted", "85"),
    ]);

    assert_eq!(
        derive_kpis(&project),
        vec![Kpi::new("Runoff captured", "1.2 in"), Kpi::new("Cost", "$2.1M")]
    );
}

#[test]
fn no_chart_and_no_stored_kpis_is_empty() {
    let project = Project::new(2, "Bare", ProjectCategory::Environmental, 2020);
    assert!(derive_kpis(&project).is_empty());
}

#[test]
fn derivation_does_not_touch_stored_data() {
    let project = project_with_points(vec![ChartPoint::new("A", 10.0), ChartPoint::new("B", 1.0)]);
    let before = project.clone();
    let _ = derive_kpis(&project);
    assert_eq!(project, before);
    assert!(project.kpis.is_none());
}

#[test]
fn half_way_values_round_up() {
    let project = project_with_points(vec![
        ChartPoint::new("Q1", 80.0),
        ChartPoint::new("Q4", 81.0),
    ]);
    assert_eq!(derive_kpis(&project)[1], Kpi::new("Overall Improvement", "1.3%"));

    let project = project_with_points(vec![
        ChartPoint::new("Start", 1.0),
        ChartPoint::new("End", 0.0625).with_unit(" mg/L"),
    ]);
    assert_eq!(derive_kpis(&project)[0].value, "0.063 mg/L");
}
