use crate::prelude::{ReportError, ReportResult};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const REPORT_FILE_PREFIX: &str = "AI_Detection_Report_";

/// Shared, read-only image bytes kept around for preview display.
#[derive(Clone)]
pub struct PreviewImage(Arc<[u8]>);

impl PreviewImage {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(Arc::from(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when both handles point at the same underlying allocation.
    pub fn ptr_eq(&self, other: &PreviewImage) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for PreviewImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PreviewImage({} bytes)", self.0.len())
    }
}

/// A user-selected file as seen by the input boundary.
#[derive(Debug, Clone)]
pub struct FileHandle {
    pub name: String,
    pub size_bytes: u64,
    pub content_type: String,
    pub bytes: Option<PreviewImage>,
    /// Where the bytes can be read from when they have not been loaded yet.
    pub source: Option<PathBuf>,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, size_bytes: u64, content_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            content_type: content_type.into(),
            bytes: None,
            source: None,
        }
    }

    pub fn with_bytes(mut self, bytes: Vec<u8>) -> Self {
        self.size_bytes = bytes.len() as u64;
        self.bytes = Some(PreviewImage::new(bytes));
        self
    }

    /// Reads a file from disk, deriving its content type from the extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> ReportResult<Self> {
        Self::probe(path)?.load()
    }

    /// Describes a file from its name and metadata without reading its contents.
    pub fn probe<P: AsRef<Path>>(path: P) -> ReportResult<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| ReportError::InvalidInput(format!("{} has no file name", path.display())))?;
        let size_bytes = fs::metadata(path)?.len();
        let content_type = content_type_for(&name);
        let mut handle = Self::new(name, size_bytes, content_type);
        handle.source = Some(path.to_path_buf());
        Ok(handle)
    }

    /// Reads the bytes of a probed file. Handles that already carry bytes are returned as is.
    pub fn load(self) -> ReportResult<Self> {
        if self.bytes.is_some() {
            return Ok(self);
        }
        let path = self.source.clone().ok_or_else(|| {
            ReportError::InvalidInput(format!("{} has no source to read from", self.name))
        })?;
        let bytes = fs::read(&path)?;
        Ok(self.with_bytes(bytes))
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }

    pub fn ensure_image(&self) -> ReportResult<()> {
        if self.is_image() {
            Ok(())
        } else {
            Err(ReportError::InvalidInput(format!(
                "{} is not an image ({})",
                self.name, self.content_type
            )))
        }
    }
}

/// Declared content type for a file name, keyed on its extension.
pub fn content_type_for(file_name: &str) -> &'static str {
    let extension = match file_name.rsplit_once('.') {
        Some((_, ext)) => ext.to_ascii_lowercase(),
        None => return "application/octet-stream",
    };
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" | "jfif" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "heic" => "image/heic",
        "avif" => "image/avif",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// File size in megabytes with two decimals, e.g. `2.50 MB`.
pub fn format_file_size(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

/// Uppercased extension after the last `.`; `None` when the name has no dot.
pub fn format_label(file_name: &str) -> Option<String> {
    file_name
        .rsplit_once('.')
        .map(|(_, extension)| extension.to_uppercase())
}

/// Download name for the exported report: the part of the file name before
/// the first `.` wrapped in the report prefix.
pub fn report_file_name(file_name: &str) -> String {
    let stem = file_name.split('.').next().unwrap_or_default();
    format!("{REPORT_FILE_PREFIX}{stem}.pdf")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn file_size_renders_megabytes_with_two_decimals() {
        assert_eq!(format_file_size(1_048_576), "1.00 MB");
        assert_eq!(format_file_size(2_621_440), "2.50 MB");
        assert_eq!(format_file_size(0), "0.00 MB");
    }

    #[test]
    fn format_label_uses_last_extension() {
        assert_eq!(format_label("photo.JPG").as_deref(), Some("JPG"));
        assert_eq!(format_label("archive.tar.png").as_deref(), Some("PNG"));
        assert_eq!(format_label("noext"), None);
    }

    #[test]
    fn report_name_keeps_text_before_first_dot() {
        assert_eq!(report_file_name("beach.png"), "AI_Detection_Report_beach.pdf");
        assert_eq!(
            report_file_name("holiday.final.jpeg"),
            "AI_Detection_Report_holiday.pdf"
        );
        assert_eq!(report_file_name("noext"), "AI_Detection_Report_noext.pdf");
    }

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(content_type_for("a.PNG"), "image/png");
        assert_eq!(content_type_for("b.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("notes.txt"), "application/octet-stream");
        assert_eq!(content_type_for("README"), "application/octet-stream");
    }

    #[test]
    fn non_image_handle_is_rejected() {
        let handle = FileHandle::new("notes.txt", 12, "text/plain");
        assert!(matches!(
            handle.ensure_image(),
            Err(ReportError::InvalidInput(_))
        ));
        assert!(FileHandle::new("a.png", 1, "image/png").ensure_image().is_ok());
    }

    #[test]
    fn from_path_reads_bytes_and_type() {
        let mut temp = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        temp.write_all(&[0x89, b'P', b'N', b'G']).unwrap();
        let handle = FileHandle::from_path(temp.path()).unwrap();
        assert_eq!(handle.content_type, "image/png");
        assert_eq!(handle.size_bytes, 4);
        assert_eq!(handle.bytes.map(|b| b.len()), Some(4));

        let plain = NamedTempFile::new().unwrap();
        let handle = FileHandle::from_path(plain.path()).unwrap();
        assert!(!handle.is_image());
    }

    #[test]
    fn probe_defers_reading_until_load() {
        let mut temp = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();
        temp.write_all(&[1, 2, 3, 4, 5]).unwrap();

        let probed = FileHandle::probe(temp.path()).unwrap();
        assert!(probed.is_image());
        assert_eq!(probed.size_bytes, 5);
        assert!(probed.bytes.is_none());

        let loaded = probed.load().unwrap();
        assert_eq!(loaded.bytes.as_ref().map(|b| b.as_bytes()), Some(&[1u8, 2, 3, 4, 5][..]));
    }

    #[test]
    fn load_without_source_is_rejected() {
        let handle = FileHandle::new("a.png", 3, "image/png");
        assert!(matches!(handle.load(), Err(ReportError::InvalidInput(_))));
        assert!(FileHandle::probe("/definitely/not/here.png").is_err());
    }
}
