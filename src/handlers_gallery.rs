use serde::{Deserialize, Serialize};
use warp::{Filter, Rejection, Reply};

use crate::db::{PhotoRepository, PhotoSource};
use crate::gallery::{arrange_gallery, ArrangedGroup};
use crate::settings::{GalleryLayout, GroupBy, PhotosLayout};
use crate::settings_store::LayoutSettings;
use crate::warp_helpers::{reject_gallery, reject_invalid, with_photos, with_settings};

/// `?width=` sizes the container; `?layout=` and `?groupBy=` preview a mode
/// without saving it.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryQuery {
    pub width: Option<f64>,
    pub layout: Option<String>,
    pub group_by: Option<String>,
}

impl GalleryQuery {
    /// Applies the preview overrides on top of the stored settings.
    pub fn apply(&self, mut settings: PhotosLayout) -> Result<PhotosLayout, String> {
        if let Some(layout) = &self.layout {
            settings.layout = layout
                .parse::<GalleryLayout>()
                .map_err(|_| format!("Unknown layout: {}", layout))?;
        }
        if let Some(group_by) = &self.group_by {
            settings.group_by = group_by
                .parse::<GroupBy>()
                .map_err(|_| format!("Unknown groupBy: {}", group_by))?;
        }
        Ok(settings)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryResponse {
    pub settings: PhotosLayout,
    pub container_width: f64,
    pub photo_count: usize,
    pub groups: Vec<ArrangedGroup>,
}

pub async fn get_gallery(
    query: GalleryQuery,
    default_width: f64,
    photos: PhotoRepository,
    settings: LayoutSettings,
) -> Result<impl Reply, Rejection> {
    let container_width = query.width.unwrap_or(default_width);
    let layout = query.apply(settings.load()).map_err(reject_invalid)?;

    let list = photos.list_photos().await.map_err(|e| {
        log::error!("Failed to load photos for gallery: {}", e);
        reject_gallery(e)
    })?;

    let groups = arrange_gallery(&list, &layout, container_width);

    Ok(warp::reply::json(&GalleryResponse {
        settings: layout,
        container_width,
        photo_count: list.len(),
        groups,
    }))
}

pub fn build_gallery_routes(
    photos: PhotoRepository,
    settings: LayoutSettings,
    default_width: f64,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::path!("api" / "gallery")
        .and(warp::get())
        .and(warp::query::<GalleryQuery>())
        .map(move |query: GalleryQuery| (query, default_width))
        .untuple_one()
        .and(with_photos(photos))
        .and(with_settings(settings))
        .and_then(get_gallery)
}
