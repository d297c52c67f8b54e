use folio_core::{
    BlogPost, Credential, ExpertiseItem, MemoryLocalStorage, PortfolioStore, Project,
    SaveOutcome, SectionService, SequenceIdClock, StaticDocumentSource, Testimonial,
};

const FIXTURE: &str = include_str!("fixtures/portfolio-data.json");

fn fixture_store() -> PortfolioStore<MemoryLocalStorage, StaticDocumentSource> {
    PortfolioStore::load(MemoryLocalStorage::new(), StaticDocumentSource::new(FIXTURE))
        .unwrap()
        .with_id_clock(SequenceIdClock::starting_at(9_000))
}

#[test]
fn save_with_existing_id_replaces_in_place() {
    let mut store = fixture_store();
    let mut service = SectionService::new(&mut store);

    let mut edited = service.list::<Project>()[1].clone();
    edited.title = "Green Street Retrofit, Phase 2".to_string();

    let outcome = service.save(edited).unwrap();
    assert_eq!(outcome, SaveOutcome::Replaced { index: 1 });

    let projects = service.list::<Project>();
    assert_eq!(projects.len(), 3);
    assert_eq!(projects[1].id, 2);
    assert_eq!(projects[1].title, "Green Street Retrofit, Phase 2");
    assert!(store.is_dirty());
}

#[test]
fn save_with_novel_id_appends_one() {
    let mut store = fixture_store();
    let mut service = SectionService::new(&mut store);

    let post = BlogPost {
        id: 202,
        title: "Culvert sizing".to_string(),
        ..BlogPost::default()
    };
    let outcome = service.save(post).unwrap();

    assert_eq!(outcome, SaveOutcome::Appended { index: 1 });
    assert_eq!(service.list::<BlogPost>().len(), 2);
    assert_eq!(service.list::<BlogPost>()[1].id, 202);
}

#[test]
fn save_of_id_bearing_record_without_id_gets_fresh_id() {
    let mut store = fixture_store();
    let mut service = SectionService::new(&mut store);

    let post = BlogPost {
        title: "Untitled draft".to_string(),
        ..BlogPost::default()
    };
    service.save(post).unwrap();

    assert_eq!(service.list::<BlogPost>()[1].id, 9_000);
}

#[test]
fn save_of_keyless_section_always_appends() {
    let mut store = fixture_store();
    let mut service = SectionService::new(&mut store);

    let existing = service.list::<Credential>()[0].clone();
    let outcome = service.save(existing).unwrap();

    assert_eq!(outcome, SaveOutcome::Appended { index: 2 });
    assert_eq!(service.list::<Credential>().len(), 3);
}

#[test]
fn update_replaces_keyless_record_at_original_position() {
    let mut store = fixture_store();
    let mut service = SectionService::new(&mut store);

    let original = service.list::<ExpertiseItem>()[0].clone();
    let mut updated = original.clone();
    updated.tools = "HEC-RAS, SWMM, InfoWorks ICM".to_string();

    let outcome = service.update(&original, updated).unwrap();
    assert_eq!(outcome, SaveOutcome::Replaced { index: 0 });
    assert_eq!(service.list::<ExpertiseItem>().len(), 2);
    assert_eq!(
        service.list::<ExpertiseItem>()[0].tools,
        "HEC-RAS, SWMM, InfoWorks ICM"
    );
}

#[test]
fn delete_by_id_removes_only_that_project() {
    let mut store = fixture_store();
    let mut service = SectionService::new(&mut store);

    let target = service.list::<Project>()[0].clone();
    assert_eq!(service.delete(&target).unwrap(), 1);

    let ids: Vec<i64> = service.list::<Project>().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![2, 3]);
}

#[test]
fn delete_by_natural_key_removes_every_match() {
    let mut store = fixture_store();
    let mut service = SectionService::new(&mut store);

    let duplicate = Credential {
        name: "Professional Engineer (P.E.)".to_string(),
    };
    service.save(duplicate.clone()).unwrap();
    assert_eq!(service.list::<Credential>().len(), 3);

    assert_eq!(service.delete(&duplicate).unwrap(), 2);
    let names: Vec<&str> = service
        .list::<Credential>()
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, vec!["Certified Floodplain Manager (CFM)"]);
}

#[test]
fn testimonial_delete_keys_on_job_title() {
    let mut store = fixture_store();
    let mut service = SectionService::new(&mut store);

    let same_title = Testimonial {
        quote: "Another quote.".to_string(),
        author: "Lee Park".to_string(),
        title: "City Engineer".to_string(),
    };
    service.save(same_title).unwrap();

    let target = service.list::<Testimonial>()[0].clone();
    assert_eq!(service.delete(&target).unwrap(), 2);
    assert_eq!(service.list::<Testimonial>().len(), 1);
    assert_eq!(service.list::<Testimonial>()[0].author, "Sam Ortiz");
}

#[test]
fn delete_with_no_match_leaves_collection_unchanged() {
    let mut store = fixture_store();
    let before = store.document().expertise_items.clone();
    let mut service = SectionService::new(&mut store);

    let missing = ExpertiseItem {
        title: "Coastal Engineering".to_string(),
        ..ExpertiseItem::default()
    };
    assert_eq!(service.delete(&missing).unwrap(), 0);
    assert_eq!(service.list::<ExpertiseItem>(), before.as_slice());
}

#[test]
fn find_resolves_ids_and_natural_keys() {
    let mut store = fixture_store();
    let service = SectionService::new(&mut store);

    assert_eq!(
        service.find::<Project>("3").map(|p| p.title.as_str()),
        Some("Watershed Dashboard")
    );
    assert_eq!(
        service
            .find::<ExpertiseItem>("GIS & Mapping")
            .map(|item| item.icon_name.as_str()),
        Some("MapIcon")
    );
    assert!(service.find::<Credential>("EIT").is_none());
}
