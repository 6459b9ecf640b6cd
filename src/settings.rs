use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GalleryError;

pub const SIZE_MIN: i32 = 100;
pub const SIZE_MAX: i32 = 500;
pub const SIZE_STEP: i32 = 100;
pub const SPACING_MIN: i32 = 0;
pub const SPACING_MAX: i32 = 24;
pub const CORNER_RADIUS_MIN: i32 = 0;
pub const CORNER_RADIUS_MAX: i32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GalleryLayout {
    Grid1x1,
    Justified,
    Masonry,
}

impl GalleryLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            GalleryLayout::Grid1x1 => "Grid1x1",
            GalleryLayout::Justified => "Justified",
            GalleryLayout::Masonry => "Masonry",
        }
    }
}

impl FromStr for GalleryLayout {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Grid1x1" => Ok(GalleryLayout::Grid1x1),
            "Justified" => Ok(GalleryLayout::Justified),
            "Masonry" => Ok(GalleryLayout::Masonry),
            _ => Err(()),
        }
    }
}

impl fmt::Display for GalleryLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupBy {
    None,
    Day,
    Month,
    Year,
}

impl GroupBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupBy::None => "None",
            GroupBy::Day => "Day",
            GroupBy::Month => "Month",
            GroupBy::Year => "Year",
        }
    }
}

impl FromStr for GroupBy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "None" => Ok(GroupBy::None),
            "Day" => Ok(GroupBy::Day),
            "Month" => Ok(GroupBy::Month),
            "Year" => Ok(GroupBy::Year),
            _ => Err(()),
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User-adjustable gallery settings, persisted as a flat JSON object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotosLayout {
    pub layout: GalleryLayout,
    pub size: i32,
    pub spacing: i32,
    pub corner_radius: i32,
    pub group_by: GroupBy,
}

pub const DEFAULT_PHOTOS_LAYOUT: PhotosLayout = PhotosLayout {
    layout: GalleryLayout::Justified,
    size: 200,
    spacing: 4,
    corner_radius: 0,
    group_by: GroupBy::Day,
};

impl Default for PhotosLayout {
    fn default() -> Self {
        DEFAULT_PHOTOS_LAYOUT
    }
}

/// Partial update of [`PhotosLayout`]; absent fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotosLayoutPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<GalleryLayout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_by: Option<GroupBy>,
}

impl From<PhotosLayout> for PhotosLayoutPatch {
    fn from(layout: PhotosLayout) -> Self {
        PhotosLayoutPatch {
            layout: Some(layout.layout),
            size: Some(layout.size),
            spacing: Some(layout.spacing),
            corner_radius: Some(layout.corner_radius),
            group_by: Some(layout.group_by),
        }
    }
}

impl PhotosLayout {
    /// Field-wise merge. No range checks are applied.
    pub fn merge(&self, patch: &PhotosLayoutPatch) -> PhotosLayout {
        PhotosLayout {
            layout: patch.layout.unwrap_or(self.layout),
            size: patch.size.unwrap_or(self.size),
            spacing: patch.spacing.unwrap_or(self.spacing),
            corner_radius: patch.corner_radius.unwrap_or(self.corner_radius),
            group_by: patch.group_by.unwrap_or(self.group_by),
        }
    }

    /// Checks every numeric field against its declared range and reports the
    /// first one out of bounds.
    pub fn validate(&self) -> Result<(), GalleryError> {
        check_range("size", self.size, SIZE_MIN, SIZE_MAX)?;
        check_range("spacing", self.spacing, SPACING_MIN, SPACING_MAX)?;
        check_range(
            "cornerRadius",
            self.corner_radius,
            CORNER_RADIUS_MIN,
            CORNER_RADIUS_MAX,
        )?;
        Ok(())
    }

    /// Snaps every numeric field into its range. Size is also rounded to the
    /// nearest step.
    pub fn clamped(&self) -> PhotosLayout {
        let size = self.size.clamp(SIZE_MIN, SIZE_MAX);
        let size = ((size + SIZE_STEP / 2) / SIZE_STEP) * SIZE_STEP;

        PhotosLayout {
            size: size.clamp(SIZE_MIN, SIZE_MAX),
            spacing: self.spacing.clamp(SPACING_MIN, SPACING_MAX),
            corner_radius: self.corner_radius.clamp(CORNER_RADIUS_MIN, CORNER_RADIUS_MAX),
            ..*self
        }
    }
}

fn check_range(field: &'static str, value: i32, min: i32, max: i32) -> Result<(), GalleryError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(GalleryError::Configuration {
            field,
            value,
            min,
            max,
        })
    }
}
