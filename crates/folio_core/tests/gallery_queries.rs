use folio_core::{
    project_cards, related_projects, CategoryFilter, Kpi, PortfolioDocument, ProjectCategory,
};

const FIXTURE: &str = include_str!("fixtures/portfolio-data.json");

fn fixture() -> PortfolioDocument {
    serde_json::from_str(FIXTURE).unwrap()
}

#[test]
fn cards_pair_projects_with_derived_kpis() {
    let doc = fixture();
    let cards = project_cards(&doc, CategoryFilter::All);

    assert_eq!(cards.len(), 3);
    assert_eq!(
        cards[0].kpis,
        vec![
            Kpi::new("Final Outcome (Yr5)", "40%"),
            Kpi::new("Overall Reduction", "60.0%"),
        ]
    );
    assert_eq!(cards[1].kpis.len(), 2);
    assert_eq!(cards[1].kpis[0].label, "Runoff captured");
    assert!(cards[2].kpis.is_empty());
}

#[test]
fn category_filter_narrows_cards() {
    let doc = fixture();
    let cards = project_cards(&doc, CategoryFilter::Only(ProjectCategory::Stormwater));
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].project.id, 2);
}

#[test]
fn lone_project_in_category_has_no_related() {
    let doc = fixture();
    let project = doc.project(3).unwrap();
    assert!(related_projects(&doc, project, 3).is_empty());
}
