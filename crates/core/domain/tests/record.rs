use domain::{
    COUNTING_MAX, COUNTING_MEDIAS, COUNTING_MIN, ObservationRecord, PropertyValue, RecordDefaults,
    RecordStatus, Taxon, TaxonomicRank, new_local_id,
};

fn sample_record() -> ObservationRecord {
    let mut record = ObservationRecord::new(42);
    record.set_property(PropertyValue::nomenclature(
        "TYP_GRP",
        Some("Passage".to_string()),
        Some(133),
    ));
    let first = record.add_taxon(Taxon::new(61057, "Vulpes vulpes").with_rank("Animalia", "Mammifères"));
    first.add_counting();
    first.add_counting();
    let second = record.add_taxon(Taxon::new(3119, "Turdus merula"));
    second.add_counting();
    record
}

#[test]
fn new_record_is_draft_without_remote_id() {
    let record = ObservationRecord::new(1);
    assert_eq!(record.status, RecordStatus::Draft);
    assert!(record.remote_id.is_none());
    assert!(record.taxa.is_empty());
}

#[test]
fn local_ids_are_unique_and_increasing() {
    let first = new_local_id();
    let second = new_local_id();
    let third = new_local_id();
    assert!(first < second);
    assert!(second < third);
}

#[test]
fn taxa_order_survives_json_round_trip() {
    let record = sample_record();
    let json = record.to_json().expect("to json");
    let loaded = ObservationRecord::from_json(&json).expect("from json");

    let ids: Vec<i64> = loaded.taxa.iter().map(|taxon| taxon.taxon.id).collect();
    assert_eq!(ids, vec![61057, 3119]);
    let indexes: Vec<u32> = loaded.taxa[0].counting.iter().map(|c| c.index).collect();
    assert_eq!(indexes, vec![1, 2]);
    assert_eq!(loaded, record);
}

#[test]
fn add_taxon_returns_existing_record_for_same_taxon() {
    let mut record = sample_record();
    let existing = record.add_taxon(Taxon::new(61057, "Vulpes vulpes"));
    assert_eq!(existing.counting.len(), 2);
    assert_eq!(record.taxa.len(), 2);
}

#[test]
fn remove_taxon_keeps_remaining_order() {
    let mut record = sample_record();
    record.add_taxon(Taxon::new(1, "Third"));
    let removed = record.remove_taxon(3119).expect("removed");
    assert_eq!(removed.taxon.id, 3119);
    let ids: Vec<i64> = record.taxa.iter().map(|taxon| taxon.taxon.id).collect();
    assert_eq!(ids, vec![61057, 1]);
}

#[test]
fn counting_indexes_are_stable_after_removal() {
    let mut record = sample_record();
    let taxon = record.find_taxon_mut(61057).expect("taxon");
    taxon.add_counting();
    taxon.remove_counting(2).expect("removed");
    let next = taxon.add_counting();
    assert_eq!(next.index, 4);
    let indexes: Vec<u32> = taxon.counting.iter().map(|c| c.index).collect();
    assert_eq!(indexes, vec![1, 3, 4]);
}

#[test]
fn counting_defaults_to_one_and_keeps_bounds_ordered() {
    let mut record = sample_record();
    let counting = record.taxa[0].add_counting();
    assert_eq!(counting.min(), Some(1));
    assert_eq!(counting.max(), Some(1));

    counting.set_min(5);
    assert_eq!(counting.min(), Some(5));
    assert_eq!(counting.max(), Some(5));

    counting.set_max(2);
    assert_eq!(counting.min(), Some(2));
    assert_eq!(counting.max(), Some(2));
}

#[test]
fn counting_emptiness_checks_every_property() {
    let mut record = sample_record();
    let counting = record.taxa[1].add_counting();
    assert!(!counting.is_empty());

    counting.set_property(PropertyValue::number(COUNTING_MIN, None));
    counting.set_property(PropertyValue::number(COUNTING_MAX, None));
    assert!(counting.is_empty());

    counting.set_property(PropertyValue::media(
        COUNTING_MEDIAS,
        vec!["IMG_0001.jpg".to_string()],
    ));
    assert!(!counting.is_empty());
    assert_eq!(counting.medias(), ["IMG_0001.jpg".to_string()]);
}

#[test]
fn status_parses_and_displays() {
    assert_eq!("to_sync".parse::<RecordStatus>().expect("parse"), RecordStatus::ToSync);
    assert_eq!(RecordStatus::Draft.to_string(), "DRAFT");
    assert!("unknown".parse::<RecordStatus>().is_err());
}

#[test]
fn record_defaults_fill_only_missing_values() {
    let defaults = RecordDefaults {
        dataset_id: Some(7),
        observer_ids: vec![3],
    };
    let mut record = ObservationRecord::new(1);
    defaults.apply_to(&mut record);
    assert_eq!(record.dataset_id, Some(7));
    assert_eq!(record.observer_ids, vec![3]);

    let mut record = ObservationRecord::new(2);
    record.dataset_id = Some(1);
    record.observer_ids = vec![9];
    defaults.apply_to(&mut record);
    assert_eq!(record.dataset_id, Some(1));
    assert_eq!(record.observer_ids, vec![9]);
}

#[test]
fn taxon_rank_uses_wildcards_for_missing_parts() {
    let taxon = Taxon::new(1, "Unknown");
    assert!(taxon.rank().is_any());

    let rank = TaxonomicRank::kingdom("Plantae");
    assert!(rank.covers(&TaxonomicRank::new("Plantae", "Mousses")));
    assert!(!rank.covers(&TaxonomicRank::new("Animalia", "Oiseaux")));
    assert!(TaxonomicRank::any().covers(&rank));
}
