//! Binary payloads returned by export, download and PDF endpoints

/// Raw file body; never passed through the JSON envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    /// Taken from `Content-Disposition` when the server sends one
    pub file_name: Option<String>,
}

impl ExportFile {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
