//! Uploaded file descriptors.

/// Represents an uploaded file from multipart form data.
///
/// The host environment's multipart decoder produces these; this crate
/// only stores and returns them through
/// [`Request::file`](crate::Request::file).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Original filename
    pub name: String,
    /// MIME type
    pub mime_type: String,
    /// Temporary file path on disk
    pub tmp_name: String,
    /// File size in bytes
    pub size: u64,
    /// Upload error code (0 = success)
    pub error: u8,
}

impl UploadedFile {
    /// Create a descriptor for a successfully stored upload.
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        tmp_name: impl Into<String>,
        size: u64,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            tmp_name: tmp_name.into(),
            size,
            error: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uploaded_file_new() {
        let file = UploadedFile::new("report.pdf", "application/pdf", "/tmp/php4f2a", 2048);

        assert_eq!(file.name, "report.pdf");
        assert_eq!(file.mime_type, "application/pdf");
        assert_eq!(file.tmp_name, "/tmp/php4f2a");
        assert_eq!(file.size, 2048);
        assert_eq!(file.error, 0);
    }
}
