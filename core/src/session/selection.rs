use crate::report::FileHandle;
use crate::telemetry::LogManager;

/// Files picked by the user and waiting for an explicit analyze action.
pub struct PendingSelection {
    files: Vec<FileHandle>,
    logger: LogManager,
}

impl PendingSelection {
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            logger: LogManager::new("selection"),
        }
    }

    /// Replaces the pending list with the image files among `files`.
    ///
    /// Non-image files are dropped with a warning. When nothing acceptable
    /// was offered the previous selection is kept. Returns the number of
    /// files accepted.
    pub fn select<I>(&mut self, files: I) -> usize
    where
        I: IntoIterator<Item = FileHandle>,
    {
        let mut accepted = Vec::new();
        for file in files {
            match file.ensure_image() {
                Ok(()) => accepted.push(file),
                Err(err) => self.logger.warn(&format!("skipping selection: {err}")),
            }
        }

        let count = accepted.len();
        if count > 0 {
            self.files = accepted;
        }
        count
    }

    pub fn files(&self) -> &[FileHandle] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn remove(&mut self, index: usize) -> Option<FileHandle> {
        (index < self.files.len()).then(|| self.files.remove(index))
    }

    /// Consumes the whole selection and returns its first file.
    ///
    /// Only one file is analyzed per action; the rest are discarded.
    pub fn take_first(&mut self) -> Option<FileHandle> {
        let mut files = std::mem::take(&mut self.files).into_iter();
        let first = files.next()?;
        let discarded = files.count();
        if discarded > 0 {
            self.logger.warn(&format!(
                "analyzing {} only; {} other selected file(s) discarded",
                first.name, discarded
            ));
        }
        Some(first)
    }
}

impl Default for PendingSelection {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str) -> FileHandle {
        FileHandle::new(name, 10, "image/png")
    }

    #[test]
    fn select_keeps_only_images() {
        let mut selection = PendingSelection::new();
        let accepted = selection.select(vec![
            image("a.png"),
            FileHandle::new("notes.txt", 5, "text/plain"),
            FileHandle::new("b.jpg", 7, "image/jpeg"),
        ]);
        assert_eq!(accepted, 2);
        let names: Vec<&str> = selection.files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.png", "b.jpg"]);
    }

    #[test]
    fn selection_without_images_keeps_previous_list() {
        let mut selection = PendingSelection::new();
        selection.select(vec![image("a.png")]);
        assert_eq!(
            selection.select(vec![FileHandle::new("clip.mp4", 1, "video/mp4")]),
            0
        );
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn take_first_consumes_whole_selection() {
        let mut selection = PendingSelection::new();
        selection.select(vec![image("a.png"), image("b.png"), image("c.png")]);
        let first = selection.take_first().unwrap();
        assert_eq!(first.name, "a.png");
        assert!(selection.is_empty());
        assert!(selection.take_first().is_none());
    }

    #[test]
    fn remove_drops_by_index() {
        let mut selection = PendingSelection::new();
        selection.select(vec![image("a.png"), image("b.png")]);
        assert_eq!(selection.remove(0).map(|f| f.name), Some("a.png".to_string()));
        assert!(selection.remove(5).is_none());
        assert_eq!(selection.len(), 1);
    }
}
