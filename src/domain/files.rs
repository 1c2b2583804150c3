use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Largest upload the shared area stores, in bytes.
pub const MAX_SHARED_FILE_BYTES: usize = 10 * 1024 * 1024;

/// Content type stored when the uploader does not send one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Metadata of a file in the shared area. Files are keyed by name, and a new
/// upload under an existing name replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedFile {
    pub name: String,
    pub content_type: String,
    pub size: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SharedFileContent {
    pub file: SharedFile,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct NewSharedFile {
    pub name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl NewSharedFile {
    pub fn normalize(mut self) -> Self {
        self.name = self.name.trim().to_string();
        let content_type = self.content_type.trim();
        self.content_type = if content_type.is_empty() {
            DEFAULT_CONTENT_TYPE.to_string()
        } else {
            content_type.to_string()
        };
        self
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        validate_file_name(&self.name)?;
        if self.data.is_empty() {
            return Err("file is empty");
        }
        if self.data.len() > MAX_SHARED_FILE_BYTES {
            return Err("file is larger than 10 MB");
        }
        Ok(())
    }
}

/// Names are single path segments: no separators, no dot entries.
pub fn validate_file_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("file name is required");
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err("file name must not contain path separators");
    }
    if name.chars().any(char::is_control) {
        return Err("file name contains control characters");
    }
    if name.len() > 255 {
        return Err("file name is too long");
    }
    Ok(())
}
