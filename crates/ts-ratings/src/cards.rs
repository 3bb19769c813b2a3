use tracing::warn;

use crate::images::{materialize, EncodedImage, ImageHandle};

/// Gallery column breakpoints, in pixels.
const NARROW_MAX: u32 = 600;
const MEDIUM_MAX: u32 = 960;
const WIDE_MAX: u32 = 1920;

/// Columns for the photo gallery at a given display width. Pure layout
/// arithmetic; the fractional count lets a partial tile peek in to hint at
/// horizontal scrolling.
pub fn gallery_columns(width: u32) -> f64 {
    if width < NARROW_MAX {
        1.0
    } else if width < MEDIUM_MAX {
        2.0
    } else if width < WIDE_MAX {
        2.1
    } else {
        4.0
    }
}

/// Presentation state of a single restaurant card: the expand flag and the
/// materialized gallery. Each card owns its own state; there is no
/// cross-card coupling, and no image handle is shared between cards.
#[derive(Debug, Default)]
pub struct CardState {
    expanded: bool,
    gallery: Vec<ImageHandle>,
}

impl CardState {
    /// A fresh card starts collapsed with nothing materialized.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Materialized images for the currently visible gallery. Empty while
    /// collapsed.
    pub fn gallery(&self) -> &[ImageHandle] {
        &self.gallery
    }

    /// Flip between the collapsed summary and the expanded detail view.
    pub fn toggle(&mut self, photos: &[EncodedImage]) {
        if self.expanded {
            self.collapse();
        } else {
            self.expand(photos);
        }
    }

    /// Expand the card, decoding its photo payloads on demand. Images are
    /// only ever materialized for a visible gallery.
    pub fn expand(&mut self, photos: &[EncodedImage]) {
        self.expanded = true;
        self.gallery = materialize_all(photos);
    }

    /// Collapse the card. Dropping the handles releases every decoded
    /// image.
    pub fn collapse(&mut self) {
        self.expanded = false;
        self.gallery.clear();
    }

    /// The photo list changed under the card (a fresh search replaced the
    /// restaurant set). Old handles are released either way; an expanded
    /// card decodes the new set right away.
    pub fn replace_photos(&mut self, photos: &[EncodedImage]) {
        self.gallery.clear();
        if self.expanded {
            self.gallery = materialize_all(photos);
        }
    }
}

fn materialize_all(photos: &[EncodedImage]) -> Vec<ImageHandle> {
    photos
        .iter()
        .filter_map(|photo| match materialize(photo) {
            Ok(handle) => Some(handle),
            Err(error) => {
                warn!(%error, "skipping undecodable photo");
                None
            }
        })
        .collect()
}
