use domain::{ObservationRecord, PropertyValue, RecordStatus, Taxon};
use occtax_storage::{FileObservationRecordStore, ObservationRecordStore};

fn sample_record(id: i64) -> ObservationRecord {
    let mut record = ObservationRecord::new(id);
    record.set_property(PropertyValue::nomenclature("METH_OBS", Some("Vu".into()), Some(21)));
    let taxon = record.add_taxon(Taxon::new(60612, "Lynx lynx").with_rank("Animalia", "Mammifères"));
    taxon.add_counting();
    taxon.add_counting().set_max(3);
    record.add_taxon(Taxon::new(18437, "Salamandra salamandra"));
    record
}

#[tokio::test]
async fn save_and_reload_keeps_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileObservationRecordStore::new(dir.path().join("inputs"));
    let record = sample_record(1001);

    store
        .save(&record, RecordStatus::ToSync)
        .await
        .expect("save");
    let loaded = store.read(1001).await.expect("read");
    assert_eq!(loaded.status, RecordStatus::ToSync);
    let taxa: Vec<i64> = loaded.taxa.iter().map(|taxon| taxon.taxon.id).collect();
    assert_eq!(taxa, vec![60612, 18437]);
    let indexes: Vec<u32> = loaded.taxa[0].counting.iter().map(|c| c.index).collect();
    assert_eq!(indexes, vec![1, 2]);
    assert_eq!(loaded.taxa[0].counting[1].max(), Some(3));
}

#[tokio::test]
async fn read_all_skips_corrupt_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileObservationRecordStore::new(dir.path());
    store
        .save(&sample_record(2), RecordStatus::Draft)
        .await
        .expect("save 2");
    store
        .save(&sample_record(1), RecordStatus::ToSync)
        .await
        .expect("save 1");
    std::fs::write(dir.path().join("3.json"), "{ not json").expect("write corrupt");
    std::fs::write(dir.path().join("notes.txt"), "ignored").expect("write txt");

    let records = store.read_all().await.expect("read all");
    let ids: Vec<i64> = records.iter().map(|record| record.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn missing_directory_reads_as_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileObservationRecordStore::new(dir.path().join("absent"));
    assert!(store.read_all().await.expect("read all").is_empty());
    assert!(store.read(1).await.expect_err("missing").is_not_found());
}

#[tokio::test]
async fn delete_removes_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileObservationRecordStore::new(dir.path());
    store
        .save(&sample_record(5), RecordStatus::ToSync)
        .await
        .expect("save");
    store.delete(5).await.expect("delete");
    assert!(!dir.path().join("5.json").exists());
    assert!(store.delete(5).await.expect_err("already gone").is_not_found());
}
