#[derive(Debug, thiserror::Error)]
pub enum GalleryError {
    #[error("Failed to parse persisted layout settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Photo {id} has a non-positive aspect ratio ({width}x{height})")]
    InvalidPhoto { id: i64, width: i32, height: i32 },
    #[error("Setting {field}={value} is outside {min}..={max}")]
    Configuration {
        field: &'static str,
        value: i32,
        min: i32,
        max: i32,
    },
    #[error("Settings store error: {0}")]
    Store(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type GalleryResult<T> = Result<T, GalleryError>;
