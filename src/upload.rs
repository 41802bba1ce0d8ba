//! @ai:module:intent Transcript file acceptance rules
//! @ai:module:layer application
//! @ai:module:public_api UploadPolicy, Transcript
//! @ai:module:stateless true

use crate::config::UploadConfig;
use crate::error::UploadError;
use std::path::Path;

/// @ai:intent An accepted transcript and the file it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub file_name: String,
    pub text: String,
}

/// @ai:intent Size and extension limits for transcript files
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    max_bytes: u64,
    allowed_extensions: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::from_config(&UploadConfig::default())
    }
}

impl UploadPolicy {
    pub fn from_config(config: &UploadConfig) -> Self {
        Self {
            max_bytes: config.max_bytes,
            allowed_extensions: config
                .allowed_extensions
                .iter()
                .map(|e| e.to_lowercase())
                .collect(),
        }
    }

    /// @ai:intent Size and extension checks, run before any content is read
    /// @ai:effects pure
    pub fn check_metadata(&self, file_name: &str, size: u64) -> Result<(), UploadError> {
        if size > self.max_bytes {
            return Err(UploadError::TooLarge {
                size,
                limit: self.max_bytes,
            });
        }

        let lower = file_name.to_lowercase();
        if !self.allowed_extensions.iter().any(|ext| lower.ends_with(ext.as_str())) {
            return Err(UploadError::InvalidType {
                file_name: file_name.to_string(),
            });
        }
        Ok(())
    }

    /// @ai:intent Accept in-memory file content
    /// @ai:post Ok text contains non-whitespace
    /// @ai:effects pure
    pub fn accept(&self, file_name: &str, bytes: &[u8]) -> Result<Transcript, UploadError> {
        self.check_metadata(file_name, bytes.len() as u64)?;

        let text = std::str::from_utf8(bytes).map_err(|e| UploadError::Unreadable {
            file_name: file_name.to_string(),
            reason: e.to_string(),
        })?;

        if text.trim().is_empty() {
            return Err(UploadError::Empty {
                file_name: file_name.to_string(),
            });
        }

        Ok(Transcript {
            file_name: file_name.to_string(),
            text: text.to_string(),
        })
    }

    /// @ai:intent Read a transcript from disk, checking size before reading
    /// @ai:effects fs:read
    pub async fn read_path(&self, path: &Path) -> Result<Transcript, UploadError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let unreadable = |e: std::io::Error| UploadError::Unreadable {
            file_name: file_name.clone(),
            reason: e.to_string(),
        };

        let metadata = tokio::fs::metadata(path).await.map_err(unreadable)?;
        self.check_metadata(&file_name, metadata.len())?;

        let bytes = tokio::fs::read(path).await.map_err(unreadable)?;
        self.accept(&file_name, &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_accepts_allowed_extensions_case_insensitively() {
        let policy = UploadPolicy::default();
        for name in ["notes.txt", "notes.MD", "Session.Rtf"] {
            assert!(policy.accept(name, b"M: Welcome").is_ok(), "{name}");
        }
    }

    #[test]
    fn test_rejects_wrong_extension() {
        let policy = UploadPolicy::default();
        let err = policy.accept("slides.pdf", b"content").unwrap_err();
        assert!(matches!(err, UploadError::InvalidType { .. }));
        assert!(!err.clears_transcript());
    }

    #[test]
    fn test_rejects_six_megabyte_file() {
        let policy = UploadPolicy::default();
        let bytes = vec![b'a'; 6 * 1024 * 1024];
        let err = policy.accept("big.txt", &bytes).unwrap_err();
        assert!(matches!(err, UploadError::TooLarge { .. }));
        assert_eq!(
            err.to_string(),
            "File is too large. Please upload a file smaller than 5MB."
        );
    }

    #[test]
    fn test_exactly_five_megabytes_is_accepted() {
        let policy = UploadPolicy::default();
        let bytes = vec![b'a'; 5 * 1024 * 1024];
        assert!(policy.accept("edge.txt", &bytes).is_ok());
    }

    #[test]
    fn test_zero_byte_file_is_empty() {
        let policy = UploadPolicy::default();
        let err = policy.accept("blank.txt", b"").unwrap_err();
        assert!(matches!(err, UploadError::Empty { .. }));
        assert!(err.clears_transcript());

        let whitespace = policy.accept("blank.md", b"  \n\t").unwrap_err();
        assert!(matches!(whitespace, UploadError::Empty { .. }));
    }

    #[test]
    fn test_invalid_utf8_is_unreadable() {
        let policy = UploadPolicy::default();
        let err = policy.accept("bin.txt", &[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, UploadError::Unreadable { .. }));
    }

    #[tokio::test]
    async fn test_read_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "Moderator: What do you cook on weeknights?").unwrap();

        let transcript = UploadPolicy::default().read_path(&path).await.unwrap();
        assert_eq!(transcript.file_name, "session.txt");
        assert!(transcript.text.contains("weeknights"));

        let missing = UploadPolicy::default()
            .read_path(&dir.path().join("missing.txt"))
            .await
            .unwrap_err();
        assert!(matches!(missing, UploadError::Unreadable { .. }));
    }

    #[tokio::test]
    async fn test_read_path_rejects_oversize_before_reading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.txt");
        let file = std::fs::File::create(&path).unwrap();
        file.set_len(6 * 1024 * 1024).unwrap();

        let err = UploadPolicy::default().read_path(&path).await.unwrap_err();
        assert!(matches!(err, UploadError::TooLarge { .. }));
    }
}
