//! Descriptor of a downloadable artifact.
//!
//! Descriptors are produced by the purchase and download flow and consumed
//! by the pipeline that fetches the archive and injects its signatures. This
//! crate only defines the shape and the checks consumers rely on.

use std::io::Cursor;

use plist::{Dictionary, Value};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const APPLE_ID_KEY: &str = "apple-id";
const USER_NAME_KEY: &str = "userName";

/// Opaque signature record for one component of the artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignatureBlob {
    id: u64,
    data: Vec<u8>,
}

impl SignatureBlob {
    /// Wraps a signature payload.
    #[must_use]
    pub const fn new(id: u64, data: Vec<u8>) -> Self {
        Self { id, data }
    }

    /// Component identifier.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Raw signature bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Everything a download and injection pipeline needs for one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactDescriptor {
    download_url: String,
    signature_blobs: Vec<SignatureBlob>,
    short_version: String,
    build_version: String,
    metadata_blob: Vec<u8>,
}

impl ArtifactDescriptor {
    /// Builds a descriptor.
    #[must_use]
    pub const fn new(
        download_url: String,
        signature_blobs: Vec<SignatureBlob>,
        short_version: String,
        build_version: String,
        metadata_blob: Vec<u8>,
    ) -> Self {
        Self {
            download_url,
            signature_blobs,
            short_version,
            build_version,
            metadata_blob,
        }
    }

    /// Location of the artifact archive.
    #[must_use]
    pub fn download_url(&self) -> &str {
        &self.download_url
    }

    /// Signature records in component order.
    #[must_use]
    pub fn signature_blobs(&self) -> &[SignatureBlob] {
        &self.signature_blobs
    }

    /// Display version string.
    #[must_use]
    pub fn short_version(&self) -> &str {
        &self.short_version
    }

    /// Build version string.
    #[must_use]
    pub fn build_version(&self) -> &str {
        &self.build_version
    }

    /// Serialized metadata property list.
    #[must_use]
    pub fn metadata_blob(&self) -> &[u8] {
        &self.metadata_blob
    }

    /// Checks the producer contract.
    ///
    /// # Errors
    ///
    /// Returns the first violated clause: an empty download URL, no
    /// signature records, or an empty metadata blob.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        if self.download_url.is_empty() {
            return Err(DescriptorError::MissingDownloadUrl);
        }
        if self.signature_blobs.is_empty() {
            return Err(DescriptorError::MissingSignatures);
        }
        if self.metadata_blob.is_empty() {
            return Err(DescriptorError::EmptyMetadata);
        }
        Ok(())
    }

    /// Decodes the metadata blob.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::Metadata`] when the blob is not a property
    /// list and [`DescriptorError::MetadataNotDictionary`] when its root is
    /// not a dictionary.
    pub fn metadata(&self) -> Result<ArtifactMetadata, DescriptorError> {
        let value = Value::from_reader(Cursor::new(self.metadata_blob.as_slice()))
            .map_err(DescriptorError::Metadata)?;
        value
            .into_dictionary()
            .map(|entries| ArtifactMetadata { entries })
            .ok_or(DescriptorError::MetadataNotDictionary)
    }
}

/// Decoded view of an artifact's metadata property list.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactMetadata {
    entries: Dictionary,
}

impl ArtifactMetadata {
    /// Account identifier the artifact was purchased with.
    #[must_use]
    pub fn apple_id(&self) -> Option<&str> {
        self.string(APPLE_ID_KEY)
    }

    /// Account user name recorded in the metadata.
    #[must_use]
    pub fn user_name(&self) -> Option<&str> {
        self.string(USER_NAME_KEY)
    }

    /// String value stored under `key`.
    #[must_use]
    pub fn string(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_string)
    }

    /// Raw value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Keys present in the metadata, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

/// Contract violations and decoding failures for descriptors.
#[derive(Debug, Error)]
pub enum DescriptorError {
    /// The download URL is empty.
    #[error("artifact descriptor has no download URL")]
    MissingDownloadUrl,
    /// No signature records were supplied.
    #[error("artifact descriptor carries no signature blobs")]
    MissingSignatures,
    /// The metadata blob is empty.
    #[error("artifact descriptor carries an empty metadata blob")]
    EmptyMetadata,
    /// The metadata blob is not a property list.
    #[error("failed to decode artifact metadata: {0}")]
    Metadata(#[source] plist::Error),
    /// The metadata property list root is not a dictionary.
    #[error("artifact metadata is not a dictionary")]
    MetadataNotDictionary,
}
