//! Gallery geometry. Each layout mode is a pure function from validated
//! photo tiles to positioned rectangles; [`compute_layout`] validates input
//! and dispatches on [`GalleryLayout`].

pub mod grid;
pub mod justified;
pub mod masonry;

use log::{debug, warn};
use serde::Serialize;

use crate::photo::Photo;
use crate::settings::{GalleryLayout, PhotosLayout};

/// Absolute tolerance used when comparing computed geometry.
pub const GEOMETRY_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutItem {
    pub photo_id: i64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl LayoutItem {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Arrangement of one group. `spacing` and `corner_radius` are paint hints
/// for the renderer and do not move anything.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupLayout {
    pub width: f64,
    pub height: f64,
    pub spacing: i32,
    pub corner_radius: i32,
    pub items: Vec<LayoutItem>,
}

impl GroupLayout {
    fn empty(container_width: f64, settings: &PhotosLayout) -> Self {
        GroupLayout {
            width: container_width.max(0.0),
            height: 0.0,
            spacing: settings.spacing,
            corner_radius: settings.corner_radius,
            items: Vec::new(),
        }
    }
}

/// A photo that passed validation, reduced to what the layout modes need.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhotoTile {
    pub id: i64,
    pub aspect_ratio: f64,
}

impl PhotoTile {
    pub fn new(id: i64, aspect_ratio: f64) -> Self {
        PhotoTile { id, aspect_ratio }
    }
}

pub fn compute_layout(
    photos: &[Photo],
    settings: &PhotosLayout,
    container_width: f64,
) -> GroupLayout {
    if !container_width.is_finite() || container_width <= 0.0 || photos.is_empty() {
        return GroupLayout::empty(container_width, settings);
    }

    let tiles: Vec<PhotoTile> = photos
        .iter()
        .filter_map(|photo| match photo.checked_aspect_ratio() {
            Ok(aspect_ratio) => Some(PhotoTile::new(photo.id, aspect_ratio)),
            Err(e) => {
                warn!("Skipping photo in layout: {}", e);
                None
            }
        })
        .collect();

    // Out-of-range settings are accepted; only values that would break the
    // geometry are floored here.
    let size = f64::from(settings.size.max(1));
    let spacing = f64::from(settings.spacing.max(0));

    let items = match settings.layout {
        GalleryLayout::Grid1x1 => grid::arrange(&tiles, size, spacing, container_width),
        GalleryLayout::Justified => justified::arrange(&tiles, size, spacing, container_width),
        GalleryLayout::Masonry => masonry::arrange(&tiles, size, spacing, container_width),
    };

    let height = items.iter().map(LayoutItem::bottom).fold(0.0, f64::max);

    debug!(
        "{} layout: {} of {} photos placed in {:.1}x{:.1}",
        settings.layout,
        items.len(),
        photos.len(),
        container_width,
        height
    );

    GroupLayout {
        width: container_width,
        height,
        spacing: settings.spacing,
        corner_radius: settings.corner_radius,
        items,
    }
}

/// How many tracks of `track` width separated by `spacing` fit in
/// `container_width`. Always at least one.
pub(crate) fn track_count(container_width: f64, track: f64, spacing: f64) -> usize {
    let count = ((container_width + spacing) / (track + spacing)).floor();
    if count.is_finite() && count >= 1.0 {
        count as usize
    } else {
        1
    }
}
