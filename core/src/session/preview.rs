use crate::prelude::{ReportError, ReportResult};
use crate::report::PreviewImage;

/// Handle to a preview image registered with a [`PreviewRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreviewRef(u64);

/// Bounded registry of live preview images.
///
/// Every checkout must be paired with a release; a full registry refuses new
/// previews instead of growing.
pub struct PreviewRegistry {
    live: Vec<(PreviewRef, PreviewImage)>,
    max_capacity: usize,
    next_id: u64,
}

impl PreviewRegistry {
    pub fn with_capacity(max_capacity: usize) -> Self {
        Self {
            live: Vec::with_capacity(max_capacity),
            max_capacity,
            next_id: 0,
        }
    }

    /// Registers a preview, failing when the registry is already full.
    pub fn checkout(&mut self, image: PreviewImage) -> ReportResult<PreviewRef> {
        if self.live.len() >= self.max_capacity {
            return Err(ReportError::PreviewExhausted(format!(
                "{} preview(s) still live",
                self.live.len()
            )));
        }
        self.next_id += 1;
        let handle = PreviewRef(self.next_id);
        self.live.push((handle, image));
        Ok(handle)
    }

    pub fn get(&self, handle: PreviewRef) -> Option<&PreviewImage> {
        self.live
            .iter()
            .find(|(candidate, _)| *candidate == handle)
            .map(|(_, image)| image)
    }

    /// Drops the registry's hold on a preview. Returns false for unknown handles.
    pub fn release(&mut self, handle: PreviewRef) -> bool {
        let before = self.live.len();
        self.live.retain(|(candidate, _)| *candidate != handle);
        self.live.len() != before
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn reset(&mut self) {
        self.live.clear();
    }
}
