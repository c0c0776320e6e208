use domain::FieldCategory;
use occtax_config::{
    AppSettings, JsonFileSettingsProvider, SettingsError, SettingsProvider, StaticSettingsProvider,
    SyncSettings,
};

const SETTINGS_JSON: &str = r#"{
    "sync": { "geonature_url": "https://demo.geonature.fr/geonature/api" },
    "default_dataset_id": 3,
    "default_observer_ids": [8],
    "nomenclature": {
        "save_default_values": true,
        "information": [
            { "key": "METH_OBS", "visible": true, "default": false },
            { "code": "ETA_BIO", "visible": false }
        ],
        "counting": []
    }
}"#;

#[test]
fn parses_settings_with_overrides() {
    let settings = AppSettings::from_json(SETTINGS_JSON).expect("parse");
    assert_eq!(
        settings.sync_endpoint().expect("endpoint"),
        "https://demo.geonature.fr/geonature/api"
    );
    let information = settings.property_settings(FieldCategory::Information);
    assert_eq!(information.len(), 2);
    assert_eq!(information[0].code, "METH_OBS");
    assert_eq!(information[0].default, Some(false));
    assert_eq!(information[1].default, None);
    assert!(settings.property_settings(FieldCategory::Default).is_empty());
    assert!(settings.nomenclature.additional_fields);
    assert!(settings.nomenclature.save_default_values);

    let defaults = settings.record_defaults();
    assert_eq!(defaults.dataset_id, Some(3));
    assert_eq!(defaults.observer_ids, vec![8]);
}

#[test]
fn blank_sync_url_is_missing_endpoint() {
    let settings = AppSettings {
        sync: Some(SyncSettings {
            geonature_url: "  ".to_string(),
        }),
        ..AppSettings::default()
    };
    assert!(matches!(
        settings.sync_endpoint(),
        Err(SettingsError::MissingSyncEndpoint)
    ));
    assert!(matches!(
        AppSettings::default().sync_endpoint(),
        Err(SettingsError::MissingSyncEndpoint)
    ));
}

#[test]
fn nomenclature_flags_default_like_an_empty_file() {
    let parsed = AppSettings::from_json("{}").expect("parse");
    assert_eq!(parsed.nomenclature, AppSettings::default().nomenclature);
    assert!(parsed.nomenclature.additional_fields);
    assert!(!parsed.nomenclature.save_default_values);
}

#[tokio::test]
async fn static_provider_without_settings_is_not_found() {
    let provider = StaticSettingsProvider::empty();
    let err = provider.load_settings().await.expect_err("not found");
    assert!(matches!(err, SettingsError::NotFound(_)));
}

#[tokio::test]
async fn json_file_provider_loads_and_reports_errors() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("settings.json");

    let provider = JsonFileSettingsProvider::new(&path);
    let err = provider.load_settings().await.expect_err("missing file");
    assert!(matches!(err, SettingsError::NotFound(_)));

    std::fs::write(&path, "{ not json").expect("write");
    let err = provider.load_settings().await.expect_err("invalid");
    assert!(matches!(err, SettingsError::Invalid(_)));

    std::fs::write(&path, SETTINGS_JSON).expect("write");
    let settings = provider.load_settings().await.expect("load");
    assert_eq!(settings.default_dataset_id, Some(3));
}
