//! Contract checks for artifact descriptors.

use plist::{Dictionary, Value};
use rstest::{fixture, rstest};

use crate::{ArtifactDescriptor, DescriptorError, SignatureBlob};

const ACCOUNT: &str = "buyer@example.test";

fn metadata_blob(entries: Dictionary) -> Vec<u8> {
    let mut buffer = Vec::new();
    Value::Dictionary(entries)
        .to_writer_xml(&mut buffer)
        .expect("metadata should encode");
    buffer
}

#[fixture]
fn metadata() -> Vec<u8> {
    let mut entries = Dictionary::new();
    entries.insert("apple-id".to_owned(), Value::String(ACCOUNT.to_owned()));
    entries.insert("userName".to_owned(), Value::String(ACCOUNT.to_owned()));
    entries.insert("itemId".to_owned(), Value::Integer(1_234_567_i64.into()));
    metadata_blob(entries)
}

fn descriptor(signatures: Vec<SignatureBlob>, metadata: Vec<u8>) -> ArtifactDescriptor {
    ArtifactDescriptor::new(
        "https://downloads.example.test/artifact.ipa".to_owned(),
        signatures,
        "2.4".to_owned(),
        "240".to_owned(),
        metadata,
    )
}

#[rstest]
fn complete_descriptor_passes_validation(metadata: Vec<u8>) {
    let artifact = descriptor(vec![SignatureBlob::new(0, vec![0xde, 0xad])], metadata);

    assert!(artifact.validate().is_ok());
    assert_eq!(artifact.short_version(), "2.4");
    assert_eq!(artifact.build_version(), "240");
    assert_eq!(artifact.signature_blobs().len(), 1);
}

#[rstest]
fn descriptor_without_signatures_is_rejected(metadata: Vec<u8>) {
    let artifact = descriptor(Vec::new(), metadata);

    assert!(matches!(
        artifact.validate(),
        Err(DescriptorError::MissingSignatures)
    ));
}

#[rstest]
fn descriptor_without_metadata_is_rejected() {
    let artifact = descriptor(vec![SignatureBlob::new(0, vec![1])], Vec::new());

    assert!(matches!(
        artifact.validate(),
        Err(DescriptorError::EmptyMetadata)
    ));
}

#[rstest]
fn descriptor_without_download_url_is_rejected(metadata: Vec<u8>) {
    let artifact = ArtifactDescriptor::new(
        String::new(),
        vec![SignatureBlob::new(0, vec![1])],
        "1.0".to_owned(),
        "1".to_owned(),
        metadata,
    );

    assert!(matches!(
        artifact.validate(),
        Err(DescriptorError::MissingDownloadUrl)
    ));
}

#[rstest]
fn metadata_exposes_account_fields(metadata: Vec<u8>) {
    let artifact = descriptor(vec![SignatureBlob::new(0, vec![1])], metadata);

    let view = artifact.metadata().expect("metadata should decode");

    assert_eq!(view.apple_id(), Some(ACCOUNT));
    assert_eq!(view.user_name(), Some(ACCOUNT));
    assert_eq!(view.keys(), ["apple-id", "itemId", "userName"]);
    assert!(view.string("itemId").is_none());
    assert!(view.get("itemId").is_some());
}

#[rstest]
fn metadata_must_be_a_property_list() {
    let artifact = descriptor(vec![SignatureBlob::new(0, vec![1])], b"not a plist".to_vec());

    assert!(matches!(
        artifact.metadata(),
        Err(DescriptorError::Metadata(_))
    ));
}

#[rstest]
fn metadata_root_must_be_a_dictionary() {
    let mut buffer = Vec::new();
    Value::Array(vec![Value::String(ACCOUNT.to_owned())])
        .to_writer_xml(&mut buffer)
        .expect("array should encode");
    let artifact = descriptor(vec![SignatureBlob::new(0, vec![1])], buffer);

    assert!(matches!(
        artifact.metadata(),
        Err(DescriptorError::MetadataNotDictionary)
    ));
}

#[rstest]
fn descriptor_serialises_with_snake_case_fields(metadata: Vec<u8>) {
    let artifact = descriptor(vec![SignatureBlob::new(7, vec![1, 2])], metadata);

    let json = serde_json::to_value(&artifact).expect("descriptor should serialise");

    assert_eq!(
        json.get("download_url").and_then(serde_json::Value::as_str),
        Some("https://downloads.example.test/artifact.ipa")
    );
    assert_eq!(
        json.pointer("/signature_blobs/0/id")
            .and_then(serde_json::Value::as_u64),
        Some(7)
    );
}
