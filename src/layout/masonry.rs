use super::{track_count, LayoutItem, PhotoTile};

/// Greedy column packing: each photo goes to the currently shortest column,
/// lowest index on ties. Items come back in input order.
///
/// Only the first `photos.len()` columns can ever be picked, so running
/// heights are tracked for at most that many even when the container would
/// fit more.
pub fn arrange(
    photos: &[PhotoTile],
    size: f64,
    spacing: f64,
    container_width: f64,
) -> Vec<LayoutItem> {
    let columns = track_count(container_width, size, spacing);
    let column_width = (container_width - spacing * (columns - 1) as f64) / columns as f64;
    let mut column_heights = vec![0.0_f64; columns.min(photos.len())];

    photos
        .iter()
        .map(|photo| {
            let column = shortest_column(&column_heights);
            let height = column_width / photo.aspect_ratio;
            let item = LayoutItem {
                photo_id: photo.id,
                x: column as f64 * (column_width + spacing),
                y: column_heights[column],
                width: column_width,
                height,
            };
            column_heights[column] += height + spacing;
            item
        })
        .collect()
}

fn shortest_column(heights: &[f64]) -> usize {
    let mut best = 0;
    for (index, &height) in heights.iter().enumerate().skip(1) {
        if height < heights[best] {
            best = index;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiles(ratios: &[f64]) -> Vec<PhotoTile> {
        ratios
            .iter()
            .enumerate()
            .map(|(i, &r)| PhotoTile::new(i as i64 + 1, r))
            .collect()
    }

    #[test]
    fn test_column_geometry() {
        // (620 + 10) / (200 + 10) = 3 columns of (620 - 20) / 3 = 200px
        let items = arrange(&tiles(&[1.0, 1.0, 1.0]), 200.0, 10.0, 620.0);

        let xs: Vec<f64> = items.iter().map(|i| i.x).collect();
        assert_eq!(xs, vec![0.0, 210.0, 420.0]);
        assert!(items.iter().all(|i| i.width == 200.0 && i.y == 0.0));
    }

    #[test]
    fn test_photo_goes_to_shortest_column() {
        // Column 0 gets a tall photo, column 1 a wide one; the third photo
        // must land under the wide one.
        let items = arrange(&tiles(&[0.5, 2.0, 1.0]), 100.0, 0.0, 200.0);

        assert_eq!(items[0].height, 200.0);
        assert_eq!(items[1].height, 50.0);
        assert_eq!(items[2].x, 100.0);
        assert_eq!(items[2].y, 50.0);
    }

    #[test]
    fn test_ties_pick_lowest_column() {
        let items = arrange(&tiles(&[1.0, 1.0, 1.0, 1.0]), 100.0, 0.0, 300.0);

        assert_eq!(items[3].x, 0.0);
        assert_eq!(items[3].y, 100.0);
    }

    #[test]
    fn test_narrow_container_uses_single_column() {
        let items = arrange(&tiles(&[1.0, 0.5]), 300.0, 8.0, 120.0);

        assert!(items.iter().all(|i| i.x == 0.0 && i.width == 120.0));
        assert_eq!(items[1].y, 128.0);
        assert_eq!(items[1].height, 240.0);
    }

    #[test]
    fn test_huge_container_tracks_only_used_columns() {
        let items = arrange(&tiles(&[1.0, 2.0]), 200.0, 4.0, 1e15);

        let column_width = items[0].width;
        assert!((column_width - 200.0).abs() < 1e-6);
        assert_eq!(items[0].x, 0.0);
        assert_eq!(items[1].x, column_width + 4.0);
        assert!(items.iter().all(|i| i.y == 0.0));
    }

    #[test]
    fn test_shortest_column() {
        assert_eq!(shortest_column(&[0.0]), 0);
        assert_eq!(shortest_column(&[5.0, 3.0, 3.0]), 1);
        assert_eq!(shortest_column(&[2.0, 2.0]), 0);
    }
}
