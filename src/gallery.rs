use serde::Serialize;

use crate::grouping::group_photos;
use crate::layout::{compute_layout, GroupLayout};
use crate::photo::Photo;
use crate::settings::PhotosLayout;

/// One labeled section of the gallery, ready for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrangedGroup {
    pub label: String,
    pub layout: GroupLayout,
}

/// Groups photos by `settings.group_by` and lays out each group
/// independently in a container of `container_width`.
pub fn arrange_gallery(
    photos: &[Photo],
    settings: &PhotosLayout,
    container_width: f64,
) -> Vec<ArrangedGroup> {
    group_photos(photos, settings.group_by)
        .into_iter()
        .map(|group| ArrangedGroup {
            layout: compute_layout(&group.photos, settings, container_width),
            label: group.label,
        })
        .collect()
}
