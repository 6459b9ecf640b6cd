use serde::Serialize;
use std::convert::Infallible;
use warp::{reject, Filter, Rejection, Reply};

use crate::db::PhotoRepository;
use crate::error::GalleryError;
use crate::settings::GalleryLayout;
use crate::settings_store::LayoutSettings;
use crate::warp_helpers::{with_photos, with_settings, NotReady};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
}

/// Where the layout the gallery will render comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingsSource {
    Stored,
    Default,
    /// A value is stored but could not be parsed; the default is served.
    Invalid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadyResponse {
    pub status: &'static str,
    pub photo_count: i64,
    pub settings: SettingsSource,
    pub layout: GalleryLayout,
    pub timestamp: String,
}

pub async fn health_check() -> Result<impl Reply, Infallible> {
    Ok(warp::reply::json(&HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}

/// Ready once photos can be counted and the settings store can be read.
/// A malformed stored layout does not block readiness since `load` falls
/// back to the default.
pub async fn ready_check(
    photos: PhotoRepository,
    settings: LayoutSettings,
) -> Result<impl Reply, Rejection> {
    let photo_count = photos.count_photos().await.map_err(|e| {
        log::error!("Readiness check failed on photos: {}", e);
        reject::custom(NotReady {
            component: "database",
            message: e.to_string(),
        })
    })?;

    let (source, layout) = match settings.stored() {
        Ok(Some(layout)) => (SettingsSource::Stored, layout),
        Ok(None) => (SettingsSource::Default, settings.load()),
        Err(GalleryError::Parse(e)) => {
            log::warn!("Stored layout settings are malformed: {}", e);
            (SettingsSource::Invalid, settings.load())
        }
        Err(e) => {
            log::error!("Readiness check failed on settings store: {}", e);
            return Err(reject::custom(NotReady {
                component: "settings store",
                message: e.to_string(),
            }));
        }
    };

    Ok(warp::reply::json(&ReadyResponse {
        status: "ready",
        photo_count,
        settings: source,
        layout: layout.layout,
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}

pub fn build_health_routes(
    photos: PhotoRepository,
    settings: LayoutSettings,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let health = warp::path("health").and(warp::get()).and_then(health_check);

    let ready = warp::path("ready")
        .and(warp::get())
        .and(with_photos(photos))
        .and(with_settings(settings))
        .and_then(ready_check);

    health.or(ready)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_in_memory_pool;
    use crate::error::GalleryResult;
    use crate::settings_store::{MemoryStore, SettingsStore, PHOTOS_LAYOUT_KEY};
    use std::sync::Arc;

    struct UnreachableStore;

    impl SettingsStore for UnreachableStore {
        fn get(&self, _key: &str) -> GalleryResult<Option<String>> {
            Err(GalleryError::Store("disk detached".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> GalleryResult<()> {
            Err(GalleryError::Store("disk detached".to_string()))
        }
    }

    async fn photos() -> PhotoRepository {
        PhotoRepository::new(create_in_memory_pool().await.unwrap())
    }

    #[tokio::test]
    async fn test_ready_with_default_settings() {
        let settings = LayoutSettings::new(Arc::new(MemoryStore::new()));
        let reply = ready_check(photos().await, settings)
            .await
            .ok()
            .expect("fresh service should be ready")
            .into_response();

        assert_eq!(reply.status(), warp::http::StatusCode::OK);
    }

    #[tokio::test]
    async fn test_ready_tolerates_malformed_settings() {
        let store = MemoryStore::new();
        store.set(PHOTOS_LAYOUT_KEY, "{").unwrap();
        let settings = LayoutSettings::new(Arc::new(store));

        assert!(ready_check(photos().await, settings).await.is_ok());
    }

    #[tokio::test]
    async fn test_not_ready_when_settings_store_unreachable() {
        let settings = LayoutSettings::new(Arc::new(UnreachableStore));
        let rejection = ready_check(photos().await, settings)
            .await
            .err()
            .expect("unreadable store must fail readiness");

        let not_ready = rejection.find::<NotReady>().unwrap();
        assert_eq!(not_ready.component, "settings store");
    }

    #[tokio::test]
    async fn test_not_ready_when_database_closed() {
        let pool = create_in_memory_pool().await.unwrap();
        let photos = PhotoRepository::new(pool.clone());
        pool.close().await;
        let settings = LayoutSettings::new(Arc::new(MemoryStore::new()));

        let rejection = ready_check(photos, settings)
            .await
            .err()
            .expect("closed pool must fail readiness");
        assert_eq!(rejection.find::<NotReady>().unwrap().component, "database");
    }

    #[test]
    fn test_settings_source_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(SettingsSource::Invalid).unwrap(),
            serde_json::json!("invalid")
        );
    }
}
