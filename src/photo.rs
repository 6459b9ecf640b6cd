use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GalleryError;

/// Photo record as the gallery sees it. Only the fields the layout and
/// grouping engines need are loaded; EXIF and thumbnails live elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: i64,
    pub width: i32,
    pub height: i32,
    pub shot_time: Option<DateTime<Utc>>,
    /// Ingestion time, used for ordering when `shot_time` is missing.
    pub created_at: Option<DateTime<Utc>>,
}

impl Photo {
    pub fn new(id: i64, width: i32, height: i32, shot_time: Option<DateTime<Utc>>) -> Self {
        Photo {
            id,
            width,
            height,
            shot_time,
            created_at: None,
        }
    }

    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.width > 0 && self.height > 0 {
            Some(self.width as f64 / self.height as f64)
        } else {
            None
        }
    }

    /// Like [`Photo::aspect_ratio`] but reports degenerate dimensions as an error.
    pub fn checked_aspect_ratio(&self) -> Result<f64, GalleryError> {
        self.aspect_ratio().ok_or(GalleryError::InvalidPhoto {
            id: self.id,
            width: self.width,
            height: self.height,
        })
    }

    pub fn sort_time(&self) -> Option<DateTime<Utc>> {
        self.shot_time.or(self.created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_aspect_ratio() {
        let photo = Photo::new(1, 1920, 1080, None);
        assert!((photo.aspect_ratio().unwrap() - 16.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_dimensions_are_rejected() {
        assert_eq!(Photo::new(1, 0, 1080, None).aspect_ratio(), None);
        assert_eq!(Photo::new(1, 1920, -5, None).aspect_ratio(), None);

        match Photo::new(7, 0, 0, None).checked_aspect_ratio() {
            Err(GalleryError::InvalidPhoto { id, .. }) => assert_eq!(id, 7),
            other => panic!("expected InvalidPhoto, got {:?}", other),
        }
    }

    #[test]
    fn test_sort_time_falls_back_to_ingestion() {
        let ingested = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let mut photo = Photo::new(1, 100, 100, None);
        photo.created_at = Some(ingested);
        assert_eq!(photo.sort_time(), Some(ingested));

        let shot = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        photo.shot_time = Some(shot);
        assert_eq!(photo.sort_time(), Some(shot));
    }

    #[test]
    fn test_photo_serialization() {
        let photo = Photo::new(3, 400, 300, None);
        let json = serde_json::to_string(&photo).unwrap();
        assert!(json.contains("\"shotTime\":null"));

        let deserialized: Photo = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, photo);
    }
}
