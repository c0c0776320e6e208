use api_contract::{HeaderPayload, TaxonPayload};
use domain::{ObservationRecord, Taxon, TaxonRecord};
use occtax_remote::{HttpRemoteRecordApi, RemoteClientConfig, RemoteError, RemoteRecordApi};
use std::time::Duration;

fn client() -> HttpRemoteRecordApi {
    HttpRemoteRecordApi::new(Duration::from_secs(2)).expect("client")
}

#[tokio::test]
async fn calls_fail_until_configured() {
    let api = client();
    assert!(!api.is_configured());
    let header = HeaderPayload::from(&ObservationRecord::new(1));
    let taxon = TaxonPayload::from(&TaxonRecord::new(Taxon::new(1, "Lynx lynx")));

    assert!(matches!(
        api.send_header(&header).await,
        Err(RemoteError::NotConfigured)
    ));
    assert!(matches!(
        api.send_taxon(1, 0, &taxon).await,
        Err(RemoteError::NotConfigured)
    ));
    assert!(matches!(
        api.delete_header(1).await,
        Err(RemoteError::NotConfigured)
    ));
}

#[tokio::test]
async fn invalid_base_url_is_rejected() {
    let api = client();
    let err = api
        .configure(RemoteClientConfig::new("::nope::"))
        .expect_err("invalid url");
    assert!(matches!(err, RemoteError::InvalidUrl(_)));
    assert!(!api.is_configured());
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    let api = client();
    api.configure(RemoteClientConfig::new("http://127.0.0.1:1/api").with_access_token("token"))
        .expect("configure");
    assert!(api.is_configured());
    let err = api.delete_header(500).await.expect_err("unreachable");
    assert!(matches!(err, RemoteError::Transport(_)));
}
