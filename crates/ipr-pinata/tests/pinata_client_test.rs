//! Tests for PinataClient against a wiremock pinning gateway.
//!
//! Covers the digest-before-pin invariant for content capture, the
//! canonical-bytes invariant for JSON pinning, and the no-partial-work
//! guarantee when the origin fetch fails.

use sha2::{Digest, Sha256};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ipr_core::CanonicalBytes;
use ipr_pinata::{PinataClient, PinataConfig, PinataError};

fn client_for(server: &MockServer) -> PinataClient {
    let config = PinataConfig::local(&server.uri(), "test-token").unwrap();
    PinataClient::new(config).unwrap()
}

fn sha256_hex(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

#[tokio::test]
async fn upload_content_pins_and_hashes_raw_bytes() {
    let server = MockServer::start().await;
    let body: &[u8] = b"\x89PNG fake image bytes";

    Mock::given(method("GET"))
        .and(path("/media/a.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(body)
                .insert_header("content-type", "image/png"),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/pinning/pinFileToIPFS"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"IpfsHash": "QmContentCid"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client
        .upload_content(&format!("{}/media/a.png", server.uri()))
        .await
        .expect("upload should succeed");

    assert_eq!(result.ipfs_cid, "QmContentCid");
    assert_eq!(result.content_type, "image/png");
    // The content hash covers the exact downloaded bytes, independent of
    // the pin response.
    assert_eq!(result.content_hash.to_hex(), sha256_hex(body));
}

#[tokio::test]
async fn upload_content_defaults_content_type() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/media/blob"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"data".as_slice()))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/pinning/pinFileToIPFS"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"IpfsHash": "QmBlob"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client
        .upload_content(&format!("{}/media/blob", server.uri()))
        .await
        .unwrap();

    assert_eq!(result.content_type, "application/octet-stream");
}

#[tokio::test]
async fn upload_content_fetch_404_fails_without_pinning() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/media/missing.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    // The pin endpoint must never be reached when the fetch fails.
    Mock::given(method("POST"))
        .and(path("/pinning/pinFileToIPFS"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .upload_content(&format!("{}/media/missing.png", server.uri()))
        .await
        .expect_err("fetch failure must fail the capture");

    assert_eq!(err.code(), "IPFS_UPLOAD_FAILED");
    assert!(matches!(err, PinataError::FetchStatus { status: 404, .. }));
}

#[tokio::test]
async fn pin_file_gateway_error_surfaces() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/pinning/pinFileToIPFS"))
        .respond_with(ResponseTemplate::new(500).set_body_string("pin backend down"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .pin_file("name", "text/plain", b"abc".to_vec())
        .await
        .expect_err("gateway error must surface");

    assert_eq!(err.code(), "IPFS_UPLOAD_FAILED");
    assert!(matches!(err, PinataError::Gateway { status: 500, .. }));
}

#[tokio::test]
async fn pin_json_sends_canonical_bytes_verbatim() {
    let server = MockServer::start().await;

    let document =
        CanonicalBytes::new(&serde_json::json!({"b": 2, "a": 1})).expect("canonicalize");

    // The wrapper must contain the canonical serialization exactly:
    // sorted keys, compact separators.
    Mock::given(method("POST"))
        .and(path("/pinning/pinJSONToIPFS"))
        .and(body_string_contains(r#""pinataContent":{"a":1,"b":2}"#))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"IpfsHash": "QmJson"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let pin = client.pin_json(&document).await.expect("pin should succeed");

    assert_eq!(pin.ipfs_cid, "QmJson");
    // The returned digest covers the exact canonical bytes that were sent.
    assert_eq!(pin.digest.to_hex(), sha256_hex(document.as_bytes()));
}

#[tokio::test]
async fn pin_json_gateway_error_uses_metadata_code() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/pinning/pinJSONToIPFS"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let document = CanonicalBytes::new(&serde_json::json!({"k": "v"})).unwrap();
    let err = client.pin_json(&document).await.unwrap_err();

    assert_eq!(err.code(), "IPFS_METADATA_UPLOAD_FAILED");
}

#[tokio::test]
async fn pin_json_digest_matches_independent_recomputation() {
    // The digest handed to the registration call and the digest of the
    // pinned bytes must be byte-for-byte identical for the same logical
    // document, regardless of how many times it is recomputed.
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/pinning/pinJSONToIPFS"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"IpfsHash": "QmDoc"})),
        )
        .mount(&server)
        .await;

    let document = CanonicalBytes::new(&serde_json::json!({
        "title": "T",
        "creators": [{"name": "A", "contributionPercent": 100}]
    }))
    .unwrap();

    let client = client_for(&server);
    let pin = client.pin_json(&document).await.unwrap();

    let recomputed = ipr_core::sha256_canonical(&document);
    assert_eq!(pin.digest, recomputed);
}
