//! Document container collaborators.
//!
//! The container byte format is out of scope here; these traits are the
//! contract the signing flow drives: build from uploaded bytes, expose the
//! bytes a signature must cover, embed the raw signature value, persist.

use std::path::Path;
use thiserror::Error;

use proofgate_identity::Certificate;

/// Container collaborator failures.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// The uploaded bytes cannot form a signable container.
    #[error("file cannot form a signable container: {0}")]
    Rejected(String),
    /// The signature value does not fit the container's signature profile.
    #[error("signature cannot be embedded: {0}")]
    Signature(String),
    /// Reading or writing container bytes failed.
    #[error("container I/O failed")]
    Io(#[from] std::io::Error),
}

/// A file received from the user, ready for packaging.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// A signature after it has been embedded into the container.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedSignature {
    /// Structural validity as reported by the container implementation.
    pub valid: bool,
    /// Signature creation time, Unix epoch milliseconds.
    pub timestamp: u64,
}

/// Builds containers from uploaded files.
pub trait ContainerFactory: Send + Sync {
    fn build(
        &self,
        file: &UploadedFile,
        signer: &Certificate,
    ) -> Result<Box<dyn SignatureContainer>, ContainerError>;
}

/// A not-yet-finalized container holding one document.
pub trait SignatureContainer: Send {
    /// Bytes the remote signature must cover.
    fn data_to_sign(&self) -> Result<Vec<u8>, ContainerError>;

    /// Embed the raw signature value produced by the user's device.
    fn finalize(&mut self, signature_value: &[u8]) -> Result<EmbeddedSignature, ContainerError>;

    /// Write the finished container to `path`.
    fn save_to(&self, path: &Path) -> Result<(), ContainerError>;
}
