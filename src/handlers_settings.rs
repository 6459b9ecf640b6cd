use warp::{Filter, Rejection, Reply};

use crate::settings::PhotosLayoutPatch;
use crate::settings_store::LayoutSettings;
use crate::warp_helpers::{reject_gallery, with_settings};

pub async fn get_layout_settings(settings: LayoutSettings) -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&settings.load()))
}

pub async fn update_layout_settings(
    patch: PhotosLayoutPatch,
    settings: LayoutSettings,
) -> Result<impl Reply, Rejection> {
    let current = settings.load();
    match settings.update(&current, &patch) {
        Ok(updated) => Ok(warp::reply::json(&updated)),
        Err(e) => {
            log::error!("Failed to save layout settings: {}", e);
            Err(reject_gallery(e))
        }
    }
}

pub async fn reset_layout_settings(settings: LayoutSettings) -> Result<impl Reply, Rejection> {
    let current = settings.load();
    match settings.reset(&current) {
        Ok(reset) => Ok(warp::reply::json(&reset)),
        Err(e) => {
            log::error!("Failed to reset layout settings: {}", e);
            Err(reject_gallery(e))
        }
    }
}

pub fn build_settings_routes(
    settings: LayoutSettings,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let get = warp::path!("api" / "settings" / "layout")
        .and(warp::get())
        .and(with_settings(settings.clone()))
        .and_then(get_layout_settings);

    let update = warp::path!("api" / "settings" / "layout")
        .and(warp::patch())
        .and(warp::body::json::<PhotosLayoutPatch>())
        .and(with_settings(settings.clone()))
        .and_then(update_layout_settings);

    let reset = warp::path!("api" / "settings" / "layout" / "reset")
        .and(warp::post())
        .and(with_settings(settings))
        .and_then(reset_layout_settings);

    get.or(update).or(reset)
}
