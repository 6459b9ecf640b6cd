use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::photo::Photo;
use crate::settings::GroupBy;

pub const UNKNOWN_GROUP_LABEL: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub label: String,
    pub photos: Vec<Photo>,
}

/// Newest first, ids ascending on ties. Photos without any timestamp sort last.
pub fn compare_photos(a: &Photo, b: &Photo) -> Ordering {
    match (a.sort_time(), b.sort_time()) {
        (Some(ta), Some(tb)) => tb.cmp(&ta),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.id.cmp(&b.id))
}

/// Partitions photos into labeled groups. Buckets are computed in UTC so the
/// result does not depend on the host time zone.
pub fn group_photos(photos: &[Photo], key: GroupBy) -> Vec<Group> {
    if photos.is_empty() {
        return Vec::new();
    }

    if key == GroupBy::None {
        return vec![Group {
            label: String::new(),
            photos: sorted(photos.to_vec()),
        }];
    }

    let mut buckets: BTreeMap<NaiveDate, Vec<Photo>> = BTreeMap::new();
    let mut unknown = Vec::new();

    for photo in photos {
        match photo.shot_time {
            Some(shot_time) => buckets
                .entry(bucket_start(shot_time, key))
                .or_default()
                .push(photo.clone()),
            None => unknown.push(photo.clone()),
        }
    }

    let mut groups: Vec<Group> = buckets
        .into_iter()
        .rev()
        .map(|(start, photos)| Group {
            label: bucket_label(start, key),
            photos: sorted(photos),
        })
        .collect();

    if !unknown.is_empty() {
        groups.push(Group {
            label: UNKNOWN_GROUP_LABEL.to_string(),
            photos: sorted(unknown),
        });
    }

    groups
}

fn sorted(mut photos: Vec<Photo>) -> Vec<Photo> {
    photos.sort_by(compare_photos);
    photos
}

fn bucket_start(time: DateTime<Utc>, key: GroupBy) -> NaiveDate {
    let date = time.date_naive();
    match key {
        GroupBy::None | GroupBy::Day => date,
        GroupBy::Month => date.with_day(1).unwrap_or(date),
        GroupBy::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date),
    }
}

fn bucket_label(start: NaiveDate, key: GroupBy) -> String {
    match key {
        GroupBy::None => String::new(),
        GroupBy::Day => start.format("%Y-%m-%d").to_string(),
        GroupBy::Month => start.format("%Y-%m").to_string(),
        GroupBy::Year => start.format("%Y").to_string(),
    }
}
