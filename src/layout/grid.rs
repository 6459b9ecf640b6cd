use super::{track_count, LayoutItem, PhotoTile};

/// Square cells of side `size`, row-major. Aspect ratios are ignored; the
/// renderer crops. A cell wider than the container is shrunk to fit it.
pub fn arrange(
    photos: &[PhotoTile],
    size: f64,
    spacing: f64,
    container_width: f64,
) -> Vec<LayoutItem> {
    let side = size.min(container_width);
    let columns = track_count(container_width, side, spacing);
    let pitch = side + spacing;

    photos
        .iter()
        .enumerate()
        .map(|(index, photo)| LayoutItem {
            photo_id: photo.id,
            x: (index % columns) as f64 * pitch,
            y: (index / columns) as f64 * pitch,
            width: side,
            height: side,
        })
        .collect()
}
