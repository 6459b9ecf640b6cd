use log::info;
use serde::{Deserialize, Serialize};
use warp::{Filter, Rejection, Reply};

use crate::db::{PhotoRepository, PhotoSource};
use crate::warp_helpers::{reject_gallery, reject_invalid, with_photos};

#[derive(Debug, Deserialize)]
pub struct DeletePhotosRequest {
    pub ids: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct DeletePhotosResponse {
    pub deleted: u64,
}

/// `ids` must be a non-empty list of non-negative ids.
pub fn validate_delete_request(request: &DeletePhotosRequest) -> Result<(), String> {
    if request.ids.is_empty() {
        return Err("ids must contain at least one photo id".to_string());
    }
    if let Some(id) = request.ids.iter().find(|id| **id < 0) {
        return Err(format!("Invalid photo id: {}", id));
    }
    Ok(())
}

pub async fn list_photos(photos: PhotoRepository) -> Result<impl Reply, Rejection> {
    match photos.list_photos().await {
        Ok(list) => Ok(warp::reply::json(&list)),
        Err(e) => {
            log::error!("Failed to list photos: {}", e);
            Err(reject_gallery(e))
        }
    }
}

pub async fn delete_photos(
    request: DeletePhotosRequest,
    photos: PhotoRepository,
) -> Result<impl Reply, Rejection> {
    validate_delete_request(&request).map_err(reject_invalid)?;

    info!("Deleting photos {:?}", request.ids);

    let deleted = photos.delete_photos(&request.ids).await.map_err(|e| {
        log::error!("Failed to delete photos: {}", e);
        reject_gallery(e)
    })?;

    Ok(warp::reply::json(&DeletePhotosResponse { deleted }))
}

pub fn build_photo_routes(
    photos: PhotoRepository,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let list = warp::path("api")
        .and(warp::path("photos"))
        .and(warp::path::end())
        .and(warp::get())
        .and(with_photos(photos.clone()))
        .and_then(list_photos);

    let delete = warp::path("api")
        .and(warp::path("photos"))
        .and(warp::path::end())
        .and(warp::delete())
        .and(warp::body::json::<DeletePhotosRequest>())
        .and(with_photos(photos))
        .and_then(delete_photos);

    list.or(delete)
}
