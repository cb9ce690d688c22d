use std::path::{Path, PathBuf};

/// Rough media type of a file, used as a thumbnail hint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    Document,
    Other,
}

impl MediaKind {
    /// Guess the kind from a file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Self {
        let ext = match path.extension() {
            Some(ext) => ext.to_string_lossy().to_ascii_lowercase(),
            None => return MediaKind::Other,
        };

        match ext.as_str() {
            "jpg" | "jpeg" | "png" | "gif" | "webp" | "heic" | "bmp" => MediaKind::Image,
            "mp4" | "3gp" | "mkv" | "mov" | "avi" | "webm" => MediaKind::Video,
            "opus" | "mp3" | "m4a" | "aac" | "ogg" | "wav" | "amr" => MediaKind::Audio,
            "pdf" | "doc" | "docx" | "xls" | "xlsx" | "ppt" | "pptx" | "txt" | "csv" | "zip"
            | "apk" | "vcf" => MediaKind::Document,
            _ => MediaKind::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
            MediaKind::Document => "document",
            MediaKind::Other => "file",
        }
    }
}

/// One file found by a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Full path, also the entry's identity
    pub path: PathBuf,
    /// File name shown to the user
    pub name: String,
    /// Size in bytes
    pub size: u64,
    /// Last modification time in milliseconds since the Unix epoch
    pub modified_ms: i64,
    pub kind: MediaKind,
}

impl FileEntry {
    pub fn new(path: PathBuf, size: u64, modified_ms: i64) -> Self {
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        let kind = MediaKind::from_path(&path);

        Self {
            path,
            name,
            size,
            modified_ms,
            kind,
        }
    }
}
