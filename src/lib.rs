pub mod config;
pub mod db;
pub mod error;
pub mod gallery;
pub mod grouping;
pub mod handlers_gallery;
pub mod handlers_health;
pub mod handlers_photo;
pub mod handlers_settings;
pub mod layout;
pub mod photo;
pub mod settings;
pub mod settings_store;
pub mod warp_helpers;
