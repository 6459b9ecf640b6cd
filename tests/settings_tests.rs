use std::sync::Arc;

use moments_in_time::settings::{
    GalleryLayout, GroupBy, PhotosLayout, PhotosLayoutPatch, DEFAULT_PHOTOS_LAYOUT,
};
use moments_in_time::settings_store::{
    FileStore, LayoutSettings, MemoryStore, SettingsStore, PHOTOS_LAYOUT_KEY,
};

fn patches() -> Vec<PhotosLayoutPatch> {
    vec![
        PhotosLayoutPatch::default(),
        PhotosLayoutPatch {
            layout: Some(GalleryLayout::Grid1x1),
            ..Default::default()
        },
        PhotosLayoutPatch {
            size: Some(500),
            spacing: Some(0),
            ..Default::default()
        },
        PhotosLayoutPatch {
            corner_radius: Some(8),
            group_by: Some(GroupBy::None),
            ..Default::default()
        },
        PhotosLayout {
            layout: GalleryLayout::Masonry,
            size: 100,
            spacing: 24,
            corner_radius: 2,
            group_by: GroupBy::Year,
        }
        .into(),
    ]
}

#[test]
fn test_load_after_update_returns_merged_value() {
    for patch in patches() {
        let settings = LayoutSettings::new(Arc::new(MemoryStore::new()));
        settings.update(&DEFAULT_PHOTOS_LAYOUT, &patch).unwrap();
        assert_eq!(settings.load(), DEFAULT_PHOTOS_LAYOUT.merge(&patch));
    }
}

#[test]
fn test_malformed_store_value_loads_default() {
    for raw in ["", "{", "null", "\"Justified\"", r#"{"layout":"Carousel"}"#] {
        let store = MemoryStore::new();
        store.set(PHOTOS_LAYOUT_KEY, raw).unwrap();
        let settings = LayoutSettings::new(Arc::new(store));
        assert_eq!(settings.load(), DEFAULT_PHOTOS_LAYOUT, "input {:?}", raw);
    }
}

#[test]
fn test_store_holds_single_flat_object() {
    let store = MemoryStore::new();
    let settings = LayoutSettings::new(Arc::new(store.clone()));
    settings
        .update(
            &DEFAULT_PHOTOS_LAYOUT,
            &PhotosLayoutPatch {
                corner_radius: Some(3),
                ..Default::default()
            },
        )
        .unwrap();

    let raw = store.get(PHOTOS_LAYOUT_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 5);
    assert_eq!(object["cornerRadius"], 3);
    assert_eq!(object["groupBy"], "Day");
}

#[test]
fn test_file_backed_settings_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let first = LayoutSettings::new(Arc::new(FileStore::new(&path).unwrap()));
    let saved = first
        .update(
            &first.load(),
            &PhotosLayoutPatch {
                layout: Some(GalleryLayout::Masonry),
                size: Some(300),
                ..Default::default()
            },
        )
        .unwrap();

    let second = LayoutSettings::new(Arc::new(FileStore::new(&path).unwrap()));
    assert_eq!(second.load(), saved);
}

#[test]
fn test_concurrent_writes_keep_a_complete_value() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("settings.json")).unwrap();
    let settings = LayoutSettings::new(Arc::new(store));

    let handles: Vec<_> = (1..=5)
        .map(|i| {
            let settings = settings.clone();
            std::thread::spawn(move || {
                settings
                    .update(
                        &DEFAULT_PHOTOS_LAYOUT,
                        &PhotosLayoutPatch {
                            size: Some(i * 100),
                            ..Default::default()
                        },
                    )
                    .unwrap()
            })
        })
        .collect();

    let written: Vec<PhotosLayout> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(written.contains(&settings.load()));
}
