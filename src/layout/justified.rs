use super::{LayoutItem, PhotoTile};

/// Justified rows with target height `row_height`.
///
/// Photos join the current row until its natural width (sum of
/// `aspect_ratio * row_height`) passes the container; the photo that
/// overflows stays in the row. Spacing is left out of this break test so a
/// row's membership does not change with the gap setting; gaps are taken out
/// of the row when it is scaled. A photo is also held back when the row's gaps
/// alone would use up the container. Every row except the last is then scaled
/// so widths plus gaps equal `container_width`. The last row is only ever
/// scaled down, never stretched past `row_height`, and stays left-aligned.
pub fn arrange(
    photos: &[PhotoTile],
    row_height: f64,
    spacing: f64,
    container_width: f64,
) -> Vec<LayoutItem> {
    let mut items = Vec::with_capacity(photos.len());
    let mut y = 0.0;
    let mut start = 0;

    while start < photos.len() {
        let (end, ratio_sum) = close_row(photos, start, row_height, spacing, container_width);
        let gaps = (end - start - 1) as f64 * spacing;
        let fill_height = (container_width - gaps) / ratio_sum;

        let height = if end == photos.len() {
            fill_height.min(row_height)
        } else {
            fill_height
        };

        let mut x = 0.0;
        for photo in &photos[start..end] {
            let width = photo.aspect_ratio * height;
            items.push(LayoutItem {
                photo_id: photo.id,
                x,
                y,
                width,
                height,
            });
            x += width + spacing;
        }

        y += height + spacing;
        start = end;
    }

    items
}

/// Returns the exclusive end index of the row starting at `start` and the
/// sum of its aspect ratios. The row holds at least one photo.
fn close_row(
    photos: &[PhotoTile],
    start: usize,
    row_height: f64,
    spacing: f64,
    container_width: f64,
) -> (usize, f64) {
    let mut end = start;
    let mut ratio_sum = 0.0;

    loop {
        ratio_sum += photos[end].aspect_ratio;
        end += 1;

        if end == photos.len() || ratio_sum * row_height > container_width {
            return (end, ratio_sum);
        }

        let gaps_with_next = (end - start) as f64 * spacing;
        if gaps_with_next >= container_width {
            return (end, ratio_sum);
        }
    }
}
