//! Raw caller input for both flows.

use crate::container::UploadedFile;

/// What the relying party's caller submits to start a flow.
///
/// Country and identifier feed the identity claim; the file is only required
/// for signing.
#[derive(Debug, Clone)]
pub struct UserRequest {
    pub country: String,
    pub national_identity_number: String,
    pub file: Option<UploadedFile>,
}

impl UserRequest {
    pub fn new(
        country: impl Into<String>,
        national_identity_number: impl Into<String>,
    ) -> Self {
        Self {
            country: country.into(),
            national_identity_number: national_identity_number.into(),
            file: None,
        }
    }

    pub fn with_file(mut self, file: UploadedFile) -> Self {
        self.file = Some(file);
        self
    }
}
