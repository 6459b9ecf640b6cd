use serde::Serialize;
use std::convert::Infallible;

use warp::http::StatusCode;
use warp::{reject, Filter, Rejection, Reply};

use crate::db::PhotoRepository;
use crate::error::GalleryError;
use crate::settings_store::LayoutSettings;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    pub timestamp: String,
}

/// A [`GalleryError`] raised inside a handler. The status code is derived
/// from the variant in [`handle_rejection`].
#[derive(Debug)]
pub struct GalleryRejection {
    pub error: GalleryError,
}

impl reject::Reject for GalleryRejection {}

/// A request the handlers refuse before touching photos or settings.
#[derive(Debug)]
pub struct ValidationError {
    pub message: String,
}

impl reject::Reject for ValidationError {}

/// A dependency `/ready` could not reach.
#[derive(Debug)]
pub struct NotReady {
    pub component: &'static str,
    pub message: String,
}

impl reject::Reject for NotReady {}

pub fn reject_gallery(error: GalleryError) -> Rejection {
    reject::custom(GalleryRejection { error })
}

pub fn reject_invalid(message: impl Into<String>) -> Rejection {
    reject::custom(ValidationError {
        message: message.into(),
    })
}

pub fn with_photos(
    photos: PhotoRepository,
) -> impl Filter<Extract = (PhotoRepository,), Error = Infallible> + Clone {
    warp::any().map(move || photos.clone())
}

pub fn with_settings(
    settings: LayoutSettings,
) -> impl Filter<Extract = (LayoutSettings,), Error = Infallible> + Clone {
    warp::any().map(move || settings.clone())
}

/// Settings and photo input problems are the caller's fault, storage
/// failures are ours.
pub fn status_for(error: &GalleryError) -> StatusCode {
    match error {
        GalleryError::InvalidPhoto { .. } | GalleryError::Configuration { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        GalleryError::Store(_) | GalleryError::Io(_) => StatusCode::SERVICE_UNAVAILABLE,
        GalleryError::Parse(_) | GalleryError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (code, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not Found".to_string())
    } else if let Some(rejection) = err.find::<GalleryRejection>() {
        (status_for(&rejection.error), rejection.error.to_string())
    } else if let Some(validation_error) = err.find::<ValidationError>() {
        (StatusCode::BAD_REQUEST, validation_error.message.clone())
    } else if let Some(not_ready) = err.find::<NotReady>() {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            format!("{} unavailable: {}", not_ready.component, not_ready.message),
        )
    } else if let Some(body_error) = err.find::<warp::filters::body::BodyDeserializeError>() {
        // Wrong-typed layout patches land here
        (StatusCode::BAD_REQUEST, body_error.to_string())
    } else if err.find::<warp::reject::InvalidQuery>().is_some() {
        (StatusCode::BAD_REQUEST, "Invalid query string".to_string())
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Unsupported media type".to_string(),
        )
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
    } else {
        log::error!("Unhandled rejection: {:?}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        )
    };

    let error_response = ErrorResponse {
        error: message,
        code: code.as_u16(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&error_response),
        code,
    ))
}

/// Methods used by the photo, settings and gallery routes.
const API_METHODS: [&str; 5] = ["GET", "POST", "PATCH", "DELETE", "OPTIONS"];

pub fn cors() -> warp::cors::Builder {
    warp::cors()
        .allow_any_origin()
        .allow_header("content-type")
        .allow_methods(API_METHODS)
}
