use log::{error, info};
use std::net::TcpListener;
use std::sync::Arc;
use warp::Filter;

use moments_in_time::config::Config;
use moments_in_time::db::{self, PhotoRepository};
use moments_in_time::handlers_gallery::build_gallery_routes;
use moments_in_time::handlers_health::build_health_routes;
use moments_in_time::handlers_photo::build_photo_routes;
use moments_in_time::handlers_settings::build_settings_routes;
use moments_in_time::settings_store::{FileStore, LayoutSettings};
use moments_in_time::warp_helpers::{cors, handle_rejection};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = Config::from_env()?;
    let port = config.port;

    info!("Starting moments-in-time server on Port {}", port);
    info!("Database: {}", config.db_path);
    info!("Settings file: {}", config.settings_path);

    if !is_port_available(&config.host, port) {
        error!(
            "Port {} is already in use. Please stop any existing instance or use a different port.",
            port
        );
        return Err(format!("Port {} is already in use", port).into());
    }

    let pool = db::create_db_pool(&config.db_path, config.max_connections).await?;
    let photos = PhotoRepository::new(pool);
    info!("Database initialized successfully");

    let store = FileStore::new(&config.settings_path)?;
    let settings = LayoutSettings::new(Arc::new(store));
    let initial = settings.load();
    info!(
        "Layout settings loaded: layout={} size={} group_by={}",
        initial.layout, initial.size, initial.group_by
    );

    let routes = build_health_routes(photos.clone(), settings.clone())
        .or(build_photo_routes(photos.clone()))
        .or(build_settings_routes(settings.clone()))
        .or(build_gallery_routes(
            photos,
            settings,
            config.default_container_width,
        ))
        .with(cors())
        .with(warp::log("moments_in_time"))
        .recover(handle_rejection);

    let host: std::net::IpAddr = config.host.parse()?;
    info!(
        "Server started successfully, listening on http://{}:{}",
        host, port
    );

    warp::serve(routes).run((host, port)).await;

    Ok(())
}

fn is_port_available(host: &str, port: u16) -> bool {
    TcpListener::bind((host, port)).is_ok()
}
