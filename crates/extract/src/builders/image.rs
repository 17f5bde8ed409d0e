//! Raster image metadata: TIFF basics plus EXIF, IPTC and GPS blocks.
//!
//! The sub-blocks are left out of the serialized record when none of their
//! fields are present.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BuildContext, FieldReader};
use crate::bag::MetadataBag;
use crate::record::{BaseMetadata, DocumentMetadata};

pub const FIELDS: &[&str] = &[
    "tiff:ImageWidth",
    "tiff:ImageLength",
    "tiff:BitsPerSample",
    "tiff:Orientation",
    // EXIF
    "tiff:Make",
    "tiff:Model",
    "exif:ExposureTime",
    "exif:FNumber",
    "exif:FocalLength",
    "exif:IsoSpeedRatings",
    "exif:Flash",
    "exif:DateTimeOriginal",
    // IPTC
    "photoshop:Headline",
    "photoshop:City",
    "photoshop:Country",
    "photoshop:Credit",
    "Iptc4xmpCore:CountryCode",
    "Iptc4xmpCore:Location",
    // GPS
    "geo:lat",
    "geo:long",
    "geo:alt",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageMetadata {
    #[serde(flatten)]
    pub base: BaseMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bits_per_sample: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<u16>,
    #[serde(skip_serializing_if = "ExifMetadata::is_empty")]
    pub exif: ExifMetadata,
    #[serde(skip_serializing_if = "IptcMetadata::is_empty")]
    pub iptc: IptcMetadata,
    #[serde(skip_serializing_if = "GpsMetadata::is_empty")]
    pub gps: GpsMetadata,
}

/// Camera and capture settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExifMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exposure_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub f_number: Option<f64>,
    /// Millimetres.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focal_length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iso_speed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time_original: Option<DateTime<Utc>>,
}

impl ExifMetadata {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Press and editorial fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IptcMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl IptcMetadata {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// WGS84 position in decimal degrees; altitude in metres.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GpsMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
}

impl GpsMetadata {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

pub fn build(bag: &MetadataBag, ctx: &BuildContext<'_>) -> DocumentMetadata {
    let r = FieldReader::new(bag, FIELDS, ctx.strip_control_chars);
    DocumentMetadata::Image(ImageMetadata {
        base: r.base(ctx),
        width: r.number("tiff:ImageWidth"),
        height: r.number("tiff:ImageLength"),
        bits_per_sample: r.number("tiff:BitsPerSample"),
        orientation: r.number("tiff:Orientation"),
        exif: ExifMetadata {
            make: r.text("tiff:Make"),
            model: r.text("tiff:Model"),
            exposure_time: r.rational("exif:ExposureTime"),
            f_number: r.rational("exif:FNumber"),
            focal_length: r.rational("exif:FocalLength"),
            iso_speed: r.number("exif:IsoSpeedRatings"),
            flash: r.text("exif:Flash"),
            date_time_original: r.date("exif:DateTimeOriginal"),
        },
        iptc: IptcMetadata {
            headline: r.text("photoshop:Headline"),
            city: r.text("photoshop:City"),
            country: r.text("photoshop:Country"),
            credit: r.text("photoshop:Credit"),
            country_code: r.text("Iptc4xmpCore:CountryCode"),
            location: r.text("Iptc4xmpCore:Location"),
        },
        gps: GpsMetadata {
            latitude: r.number("geo:lat").filter(|lat: &f64| (-90.0..=90.0).contains(lat)),
            longitude: r.number("geo:long").filter(|lon: &f64| (-180.0..=180.0).contains(lon)),
            altitude: r.number("geo:alt"),
        },
    })
}

#[cfg(test)]
mod tests {
    use chrono::Timelike;

    use super::*;
    use crate::builders::test_support::ctx;

    fn image(bag: &MetadataBag) -> ImageMetadata {
        match build(bag, &ctx()) {
            DocumentMetadata::Image(image) => image,
            other => panic!("expected image variant, got {:?}", other.document_type()),
        }
    }

    #[test]
    fn camera_photo() {
        let bag = MetadataBag::new()
            .with("tiff:ImageWidth", "4032 pixels")
            .with("tiff:ImageLength", "3024")
            .with("tiff:Make", "Canon")
            .with("exif:ExposureTime", "1/80")
            .with("exif:FNumber", "2.8")
            .with("exif:FocalLength", "50.0 mm")
            .with("exif:DateTimeOriginal", "2018:06:21 14:30:05")
            .with("photoshop:City", "Lisbon")
            .with("geo:lat", "38.7223")
            .with("geo:long", "-9.1393");

        let img = image(&bag);
        assert_eq!((img.width, img.height), (Some(4032), Some(3024)));
        assert_eq!(img.exif.make.as_deref(), Some("Canon"));
        assert_eq!(img.exif.exposure_time, Some(0.0125));
        assert_eq!(img.exif.f_number, Some(2.8));
        assert_eq!(img.exif.focal_length, Some(50.0));
        assert_eq!(img.exif.date_time_original.map(|d| d.hour()), Some(14));
        assert_eq!(img.iptc.city.as_deref(), Some("Lisbon"));
        assert_eq!(img.gps.latitude, Some(38.7223));
        assert_eq!(img.gps.longitude, Some(-9.1393));
        assert!(img.base.additional.is_empty());
    }

    #[test]
    fn out_of_range_coordinates_are_dropped() {
        let bag = MetadataBag::new().with("geo:lat", "123.0").with("geo:long", "45");
        let img = image(&bag);
        assert_eq!(img.gps.latitude, None);
        assert_eq!(img.gps.longitude, Some(45.0));
    }

    #[test]
    fn empty_blocks_are_not_serialized() {
        let bag = MetadataBag::new().with("tiff:ImageWidth", "10");
        let json = serde_json::to_value(image(&bag)).expect("serializable");
        assert_eq!(json["width"], 10);
        assert!(json.get("exif").is_none());
        assert!(json.get("gps").is_none());
    }
}
