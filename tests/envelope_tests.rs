//! Integration tests for envelope loading, migration and the key guard.

use std::fs;

use sctl::errors::SctlError;
use sctl::vault::format;
use sctl::vault::{resolve_envelope_path, Encoding, EnvelopeStore, LoadedEnvelope, Secret};
use tempfile::TempDir;

const KEY_A: &str = "projects/sctl/locations/global/keyRings/r/cryptoKeys/a";
const KEY_B: &str = "projects/sctl/locations/global/keyRings/r/cryptoKeys/b";

/// Helper: a store plus the envelope path string inside a fresh temp dir.
fn store_in_tempdir() -> (TempDir, EnvelopeStore, String) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join(".scuttle.json");
    let path = path.to_str().expect("utf-8 temp path").to_string();
    (dir, EnvelopeStore::default(), path)
}

fn secret(name: &str, cypher: &str) -> Secret {
    Secret::new(name, cypher, Encoding::Base64)
}

fn json(path: &str) -> serde_json::Value {
    serde_json::from_slice(&fs::read(path).unwrap()).unwrap()
}

// ---------------------------------------------------------------------------
// First run and round-trip
// ---------------------------------------------------------------------------

#[test]
fn first_add_creates_current_envelope() {
    let (_dir, store, path) = store_in_tempdir();

    store.add_secret(secret("DB", "Y2lwaGVy"), KEY_A, true, &path).unwrap();

    let doc = json(&path);
    assert_eq!(doc["key_uri"], KEY_A);
    assert_eq!(doc["version"], "2");
    assert_eq!(doc["secrets"][0]["name"], "DB");
    assert_eq!(doc["secrets"][0]["cypher"], "Y2lwaGVy");
    assert_eq!(doc["secrets"][0]["encoding"], "base64");
}

#[test]
fn saved_envelope_loads_back_as_current() {
    let (_dir, store, path) = store_in_tempdir();
    store.add_secret(secret("ONE", "MQ=="), KEY_A, true, &path).unwrap();
    store.add_secret(secret("TWO", "Mg=="), KEY_A, true, &path).unwrap();

    let loaded = store.load(&path).unwrap();
    assert!(matches!(loaded, LoadedEnvelope::Current(_)));

    let (secrets, key) = store.read_secrets(&path).unwrap();
    assert_eq!(key, KEY_A);
    assert_eq!(secrets.names(), vec!["ONE", "TWO"]);
}

#[test]
fn missing_envelope_reads_as_empty() {
    let (_dir, store, path) = store_in_tempdir();

    let (secrets, key) = store.read_secrets(&path).unwrap();
    assert!(secrets.is_empty());
    assert!(key.is_empty());
}

#[test]
fn rotating_a_secret_keeps_one_entry() {
    let (_dir, store, path) = store_in_tempdir();
    store.add_secret(secret("DB", "b2xk"), KEY_A, true, &path).unwrap();
    store.add_secret(secret("DB", "bmV3"), KEY_A, true, &path).unwrap();

    let (secret, _) = store.find_secret("DB", &path).unwrap();
    assert_eq!(secret.ciphertext, "bmV3");
    assert_eq!(store.read_secrets(&path).unwrap().0.len(), 1);
}

// ---------------------------------------------------------------------------
// Legacy migration
// ---------------------------------------------------------------------------

#[test]
fn legacy_array_is_migrated_on_next_write() {
    let (_dir, store, path) = store_in_tempdir();
    fs::write(
        &path,
        r#"[{"name":"OLD","cypher":"b2xk","created":"2019-05-01T10:00:00Z","encoding":"plain"}]"#,
    )
    .unwrap();

    let loaded = store.load(&path).unwrap();
    assert!(loaded.is_migrated());
    assert!(loaded.envelope().key_uri.is_empty());

    // A legacy envelope has no recorded key, so any non-empty key passes.
    store.add_secret(secret("NEW", "bmV3"), KEY_A, true, &path).unwrap();

    let doc = json(&path);
    assert_eq!(doc["version"], "2");
    assert_eq!(doc["key_uri"], KEY_A);
    let names: Vec<_> = doc["secrets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["OLD", "NEW"]);
    assert_eq!(doc["secrets"][0]["created"], "2019-05-01T10:00:00Z");
}

#[test]
fn current_envelope_with_null_secrets_reads_as_empty() {
    let (_dir, store, path) = store_in_tempdir();
    fs::write(&path, r#"{"key_uri":"K1","version":"2","secrets":null}"#).unwrap();

    let (secrets, key) = store.read_secrets(&path).unwrap();
    assert!(secrets.is_empty());
    assert_eq!(key, "K1");

    // The next save writes an empty array back.
    store.delete_secret("NOPE", &path).unwrap();
    assert_eq!(json(&path)["secrets"], serde_json::json!([]));
}

#[test]
fn garbage_file_is_malformed() {
    let (_dir, store, path) = store_in_tempdir();
    fs::write(&path, "definitely not json").unwrap();

    assert!(matches!(
        store.read_secrets(&path),
        Err(SctlError::MalformedEnvelope { .. })
    ));
}

// ---------------------------------------------------------------------------
// Key guard
// ---------------------------------------------------------------------------

#[test]
fn mismatched_key_is_refused_and_file_unchanged() {
    let (_dir, store, path) = store_in_tempdir();
    store.add_secret(secret("DB", "YQ=="), KEY_A, true, &path).unwrap();
    let before = fs::read(&path).unwrap();

    let err = store
        .add_secret(secret("API", "Yg=="), KEY_B, true, &path)
        .unwrap_err();

    assert!(matches!(err, SctlError::KeyMismatch { .. }));
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn skipping_the_key_check_rewrites_the_key() {
    let (_dir, store, path) = store_in_tempdir();
    store.add_secret(secret("DB", "YQ=="), KEY_A, true, &path).unwrap();

    store.add_secret(secret("API", "Yg=="), KEY_B, false, &path).unwrap();

    let (secrets, key) = store.read_secrets(&path).unwrap();
    assert_eq!(key, KEY_B);
    assert_eq!(secrets.len(), 2);
}

#[test]
fn empty_envelope_with_other_key_is_refused() {
    let (_dir, store, path) = store_in_tempdir();
    store.add_secret(secret("DB", "YQ=="), KEY_A, true, &path).unwrap();
    store.delete_secret("DB", &path).unwrap();

    // The key stays recorded after the last secret is removed.
    assert!(matches!(
        store.add_secret(secret("DB", "YQ=="), KEY_B, true, &path),
        Err(SctlError::KeyMismatch { .. })
    ));
}

// ---------------------------------------------------------------------------
// Delete and rekey
// ---------------------------------------------------------------------------

#[test]
fn delete_reports_whether_secret_existed() {
    let (_dir, store, path) = store_in_tempdir();
    store.add_secret(secret("DB", "YQ=="), KEY_A, true, &path).unwrap();

    assert!(store.delete_secret("DB", &path).unwrap());
    assert!(!store.delete_secret("DB", &path).unwrap());
    assert!(matches!(
        store.find_secret("DB", &path),
        Err(SctlError::SecretNotFound(_))
    ));
}

#[test]
fn failed_rekey_leaves_envelope_untouched() {
    let (_dir, store, path) = store_in_tempdir();
    store.add_secret(secret("ONE", "MQ=="), KEY_A, true, &path).unwrap();
    store.add_secret(secret("TWO", "Mg=="), KEY_A, true, &path).unwrap();
    let before = fs::read(&path).unwrap();

    let result = store.rekey(KEY_B, &path, |s| {
        if s.name == "TWO" {
            Err(SctlError::DecryptionFailed)
        } else {
            Ok("eA==".into())
        }
    });

    assert!(result.is_err());
    assert_eq!(fs::read(&path).unwrap(), before);
}

// ---------------------------------------------------------------------------
// Path resolution
// ---------------------------------------------------------------------------

#[test]
fn directory_resolves_to_default_file() {
    let dir = TempDir::new().unwrap();
    let raw = dir.path().to_str().unwrap();

    assert_eq!(
        resolve_envelope_path(raw, ".scuttle.json").unwrap(),
        dir.path().join(".scuttle.json")
    );
}

#[test]
fn store_writes_into_a_directory_argument() {
    let dir = TempDir::new().unwrap();
    let store = EnvelopeStore::default();
    let raw = dir.path().to_str().unwrap();

    store.add_secret(secret("DB", "YQ=="), KEY_A, true, raw).unwrap();

    assert!(dir.path().join(".scuttle.json").is_file());
}

#[test]
fn nonexistent_path_is_not_resolvable() {
    let dir = TempDir::new().unwrap();
    let raw = dir.path().join("nope.json");

    assert!(matches!(
        resolve_envelope_path(raw.to_str().unwrap(), ".scuttle.json"),
        Err(SctlError::PathNotResolvable(_))
    ));
}

#[test]
fn loader_matches_parsers() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("e.json");
    fs::write(&path, r#"{"key_uri":"k","version":"2","secrets":[]}"#).unwrap();

    let loaded = format::load(&path).unwrap();
    assert!(!loaded.is_migrated());
    assert_eq!(loaded.envelope().key_uri, "k");
    assert_eq!(loaded.envelope().path(), path.as_path());
}
