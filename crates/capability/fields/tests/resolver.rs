use async_trait::async_trait;
use domain::{
    EditableField, FieldCategory, PropertySettings, PropertyValue, TaxonomicRank, ViewKind,
};
use occtax_config::NomenclatureSettings;
use occtax_fields::{EditableFieldResolver, FieldCatalog, FieldError, sort_media_last};
use occtax_storage::{DefaultPropertyValueStore, InMemoryDefaultPropertyValueStore, StorageError};
use std::sync::Arc;

struct ScriptedCatalog {
    base: Result<Vec<EditableField>, String>,
    additional: Result<Vec<EditableField>, String>,
}

#[async_trait]
impl FieldCatalog for ScriptedCatalog {
    async fn get_editable_fields(
        &self,
        _category: FieldCategory,
        _settings: &[PropertySettings],
    ) -> Result<Vec<EditableField>, FieldError> {
        self.base.clone().map_err(FieldError::Catalog)
    }

    async fn get_additional_fields(
        &self,
        _dataset_id: Option<i64>,
        _category: FieldCategory,
    ) -> Result<Vec<EditableField>, FieldError> {
        self.additional.clone().map_err(FieldError::AdditionalFields)
    }
}

struct BrokenDefaults;

#[async_trait]
impl DefaultPropertyValueStore for BrokenDefaults {
    async fn get(&self, _rank: &TaxonomicRank) -> Result<Vec<PropertyValue>, StorageError> {
        Err(StorageError::Lock)
    }

    async fn set(
        &self,
        _rank: &TaxonomicRank,
        _values: &[PropertyValue],
    ) -> Result<(), StorageError> {
        Err(StorageError::Lock)
    }

    async fn clear(&self, _rank: &TaxonomicRank, _codes: &[&str]) -> Result<(), StorageError> {
        Err(StorageError::Lock)
    }

    async fn clear_all(&self) -> Result<(), StorageError> {
        Err(StorageError::Lock)
    }
}

fn field(code: &str, view_kind: ViewKind) -> EditableField {
    EditableField::new(FieldCategory::Counting, code, view_kind)
}

fn codes(fields: &[EditableField]) -> Vec<&str> {
    fields.iter().map(|field| field.code.as_str()).collect()
}

fn resolver(
    catalog: ScriptedCatalog,
    defaults: Arc<dyn DefaultPropertyValueStore>,
) -> EditableFieldResolver {
    EditableFieldResolver::new(Arc::new(catalog), defaults)
}

#[test]
fn media_fields_sort_last_and_stable() {
    let mut fields = vec![
        field("photo_a", ViewKind::Media),
        field("STADE_VIE", ViewKind::NomenclatureType),
        field("photo_b", ViewKind::Media),
        field("count_min", ViewKind::MinMax),
        field("SEXE", ViewKind::NomenclatureType),
    ];
    sort_media_last(&mut fields);
    assert_eq!(
        codes(&fields),
        vec!["STADE_VIE", "count_min", "SEXE", "photo_a", "photo_b"]
    );
}

#[tokio::test]
async fn additional_fields_are_appended_before_media_ordering() {
    let catalog = ScriptedCatalog {
        base: Ok(vec![
            field("STADE_VIE", ViewKind::NomenclatureType),
            field("medias", ViewKind::Media),
        ]),
        additional: Ok(vec![
            field("extra_photo", ViewKind::Media),
            field("extra_note", ViewKind::TextSimple),
        ]),
    };
    let fields = resolver(catalog, Arc::new(InMemoryDefaultPropertyValueStore::new()))
        .resolve(Some(1), FieldCategory::Counting, &[], None)
        .await
        .expect("resolve");

    assert_eq!(
        codes(&fields),
        vec!["STADE_VIE", "extra_note", "medias", "extra_photo"]
    );
    let first_media = fields
        .iter()
        .position(|field| field.view_kind.is_media())
        .expect("media");
    assert!(fields[first_media..].iter().all(|field| field.view_kind.is_media()));
}

#[tokio::test]
async fn cached_default_locks_field() {
    let defaults = Arc::new(InMemoryDefaultPropertyValueStore::new());
    let rank = TaxonomicRank::new("Animalia", "Oiseaux");
    let cached = PropertyValue::nomenclature("SEXE", Some("Femelle".into()), Some(168));
    defaults.set(&rank, &[cached.clone()]).await.expect("seed");

    let catalog = ScriptedCatalog {
        base: Ok(vec![
            field("SEXE", ViewKind::NomenclatureType).with_value(PropertyValue::nomenclature(
                "SEXE",
                Some("Inconnu".into()),
                Some(171),
            )),
            field("STADE_VIE", ViewKind::NomenclatureType),
        ]),
        additional: Ok(Vec::new()),
    };
    let fields = resolver(catalog, defaults)
        .resolve(None, FieldCategory::Counting, &[], Some(&rank))
        .await
        .expect("resolve");

    assert!(fields[0].locked);
    assert_eq!(fields[0].value, Some(cached));
    assert!(!fields[1].locked);
    assert_eq!(fields[1].value, None);
}

#[tokio::test]
async fn defaults_of_other_rank_do_not_apply() {
    let defaults = Arc::new(InMemoryDefaultPropertyValueStore::new());
    defaults
        .set(
            &TaxonomicRank::kingdom("Plantae"),
            &[PropertyValue::text("COMMENT", Some("herbier".into()))],
        )
        .await
        .expect("seed");
    let catalog = ScriptedCatalog {
        base: Ok(vec![field("COMMENT", ViewKind::TextMultiple)]),
        additional: Ok(Vec::new()),
    };
    let fields = resolver(catalog, defaults)
        .resolve(None, FieldCategory::Information, &[], None)
        .await
        .expect("resolve");
    assert!(!fields[0].locked);
}

#[tokio::test]
async fn catalog_failure_fails_resolution() {
    let catalog = ScriptedCatalog {
        base: Err("catalog unavailable".to_string()),
        additional: Ok(Vec::new()),
    };
    let err = resolver(catalog, Arc::new(InMemoryDefaultPropertyValueStore::new()))
        .resolve(None, FieldCategory::Information, &[], None)
        .await
        .expect_err("catalog error");
    assert!(matches!(err, FieldError::Catalog(message) if message == "catalog unavailable"));
}

#[tokio::test]
async fn additional_and_default_failures_degrade_to_empty() {
    let catalog = ScriptedCatalog {
        base: Ok(vec![field("SEXE", ViewKind::NomenclatureType)]),
        additional: Err("server down".to_string()),
    };
    let fields = resolver(catalog, Arc::new(BrokenDefaults))
        .resolve(Some(3), FieldCategory::Counting, &[], None)
        .await
        .expect("resolve");
    assert_eq!(codes(&fields), vec!["SEXE"]);
    assert!(!fields[0].locked);
}

#[tokio::test]
async fn empty_catalog_resolves_to_empty_list() {
    let catalog = ScriptedCatalog {
        base: Ok(Vec::new()),
        additional: Ok(Vec::new()),
    };
    let fields = resolver(catalog, Arc::new(InMemoryDefaultPropertyValueStore::new()))
        .resolve(None, FieldCategory::Default, &[], None)
        .await
        .expect("resolve");
    assert!(fields.is_empty());
}

#[tokio::test]
async fn remember_then_forget_values() {
    let defaults = Arc::new(InMemoryDefaultPropertyValueStore::new());
    let rank = TaxonomicRank::any();
    let catalog = ScriptedCatalog {
        base: Ok(vec![field("DETERMINER", ViewKind::TextSimple)]),
        additional: Ok(Vec::new()),
    };
    let resolver = resolver(catalog, defaults.clone());

    let chosen = vec![
        field("DETERMINER", ViewKind::TextSimple)
            .with_value(PropertyValue::text("DETERMINER", Some("M. Dupont".into()))),
        field("COMMENT", ViewKind::TextMultiple)
            .with_value(PropertyValue::text("COMMENT", Some(String::new()))),
    ];
    resolver.remember_values(&rank, &chosen).await.expect("remember");
    let stored = defaults.get(&rank).await.expect("get");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].code(), "DETERMINER");

    let fields = resolver
        .resolve(None, FieldCategory::Information, &[], None)
        .await
        .expect("resolve");
    assert!(fields[0].locked);

    resolver
        .forget_values(&rank, &["DETERMINER"])
        .await
        .expect("forget");
    let fields = resolver
        .resolve(None, FieldCategory::Information, &[], None)
        .await
        .expect("resolve again");
    assert!(!fields[0].locked);
}

#[tokio::test]
async fn additional_fields_skipped_when_disabled() {
    let catalog = ScriptedCatalog {
        base: Ok(vec![field("STADE_VIE", ViewKind::NomenclatureType)]),
        additional: Ok(vec![field("extra_note", ViewKind::TextSimple)]),
    };
    let settings = NomenclatureSettings {
        additional_fields: false,
        ..NomenclatureSettings::default()
    };
    let fields = resolver(catalog, Arc::new(InMemoryDefaultPropertyValueStore::new()))
        .with_settings(&settings)
        .resolve(Some(1), FieldCategory::Counting, &[], None)
        .await
        .expect("resolve");
    assert_eq!(codes(&fields), vec!["STADE_VIE"]);
}

#[tokio::test]
async fn remember_values_is_noop_when_saving_disabled() {
    let defaults = Arc::new(InMemoryDefaultPropertyValueStore::new());
    let rank = TaxonomicRank::kingdom("Animalia");
    let catalog = ScriptedCatalog {
        base: Ok(vec![field("DETERMINER", ViewKind::TextSimple)]),
        additional: Ok(vec![field("extra_note", ViewKind::TextSimple)]),
    };
    let resolver = resolver(catalog, defaults.clone()).with_settings(&NomenclatureSettings::default());

    let chosen = vec![
        field("DETERMINER", ViewKind::TextSimple)
            .with_value(PropertyValue::text("DETERMINER", Some("M. Dupont".into()))),
    ];
    resolver.remember_values(&rank, &chosen).await.expect("remember");
    assert!(defaults.get(&rank).await.expect("get").is_empty());

    let fields = resolver
        .resolve(None, FieldCategory::Information, &[], Some(&rank))
        .await
        .expect("resolve");
    assert_eq!(codes(&fields), vec!["DETERMINER", "extra_note"]);
    assert!(fields.iter().all(|field| !field.locked));
}

#[tokio::test]
async fn remember_values_writes_when_saving_enabled() {
    let defaults = Arc::new(InMemoryDefaultPropertyValueStore::new());
    let rank = TaxonomicRank::kingdom("Animalia");
    let catalog = ScriptedCatalog {
        base: Ok(Vec::new()),
        additional: Ok(Vec::new()),
    };
    let settings = NomenclatureSettings {
        save_default_values: true,
        ..NomenclatureSettings::default()
    };
    let resolver = resolver(catalog, defaults.clone()).with_settings(&settings);

    let chosen = vec![
        field("COMMENT", ViewKind::TextMultiple)
            .with_value(PropertyValue::text("COMMENT", Some("nid".into()))),
    ];
    resolver.remember_values(&rank, &chosen).await.expect("remember");
    assert_eq!(defaults.get(&rank).await.expect("get").len(), 1);
}
