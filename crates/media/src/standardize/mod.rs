// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Normalization of uploaded photos into size-bounded inline images.

use std::io::Cursor;

use image::{
    DynamicImage, ImageDecoder as _, ImageReader, Rgb, RgbImage, Rgba, RgbaImage,
    codecs::{
        jpeg::JpegEncoder,
        png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    },
    imageops::{self, FilterType},
};
use mime::Mime;
use semval::prelude::*;
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

use equiphoto_core::{
    ViewSlot,
    media::{InlineImage, canonical_file_name},
};

use crate::prelude::*;

pub const DEFAULT_WIDTH: u32 = 1024;

pub const DEFAULT_HEIGHT: u32 = 768;

pub const DEFAULT_QUALITY: u8 = 85;

pub const DEFAULT_MAX_BYTES: u64 = 1024 * 1024;

pub const DEFAULT_QUALITY_FLOOR: u8 = 60;

pub const DEFAULT_QUALITY_STEP: u8 = 5;

const RESIZE_FILTER: FilterType = FilterType::Lanczos3;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, AsRefStr, Display, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OutputFormat {
    #[default]
    #[strum(to_string = "jpeg", serialize = "jpg")]
    Jpeg,

    #[strum(to_string = "webp")]
    WebP,

    Png,
}

impl OutputFormat {
    #[must_use]
    pub const fn file_ext(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::WebP => "webp",
            Self::Png => "png",
        }
    }

    #[must_use]
    pub fn media_type(self) -> Mime {
        mime_guess::from_ext(self.file_ext()).first_or_octet_stream()
    }

    #[must_use]
    pub const fn has_alpha(self) -> bool {
        match self {
            Self::Jpeg => false,
            Self::WebP | Self::Png => true,
        }
    }

    /// Only lossy encoders accept a quality parameter.
    #[must_use]
    pub const fn has_quality(self) -> bool {
        matches!(self, Self::Jpeg | Self::WebP)
    }
}

/// How the image is fitted onto the target canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, AsRefStr, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "&'static str", from = "String"))]
pub enum ResizeMode {
    /// Scale down only, preserving the aspect ratio.
    #[default]
    Fit,

    /// Scale up or down to fit, then center on a canvas with the
    /// exact target size.
    Pad,

    /// Scale to cover the target, then center-crop.
    Crop,

    /// Keep the dimensions of the decoded image.
    Passthrough,
}

impl From<&str> for ResizeMode {
    fn from(from: &str) -> Self {
        match from.trim().to_ascii_lowercase().as_str() {
            "fit" => Self::Fit,
            "pad" => Self::Pad,
            "crop" => Self::Crop,
            unknown => {
                log::debug!("Unrecognized resize mode \"{unknown}\"");
                Self::Passthrough
            }
        }
    }
}

impl From<String> for ResizeMode {
    fn from(from: String) -> Self {
        from.as_str().into()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StandardizeConfig {
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
    pub mode: ResizeMode,

    /// Initial encoder quality in the range 1..=100.
    pub quality: u8,

    /// Size budget of the encoded image.
    pub max_bytes: u64,

    pub quality_floor: u8,
    pub quality_step: u8,
}

impl Default for StandardizeConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            mode: ResizeMode::default(),
            quality: DEFAULT_QUALITY,
            max_bytes: DEFAULT_MAX_BYTES,
            quality_floor: DEFAULT_QUALITY_FLOOR,
            quality_step: DEFAULT_QUALITY_STEP,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StandardizeConfigInvalidity {
    EmptyCanvas,
    QualityOutOfRange,
    QualityFloorOutOfRange,
    ZeroQualityStep,
    ZeroMaxBytes,
}

const QUALITY_RANGE: std::ops::RangeInclusive<u8> = 1..=100;

impl Validate for StandardizeConfig {
    type Invalidity = StandardizeConfigInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        ValidationContext::new()
            .invalidate_if(
                self.width == 0 || self.height == 0,
                Self::Invalidity::EmptyCanvas,
            )
            .invalidate_if(
                !QUALITY_RANGE.contains(&self.quality),
                Self::Invalidity::QualityOutOfRange,
            )
            .invalidate_if(
                !QUALITY_RANGE.contains(&self.quality_floor),
                Self::Invalidity::QualityFloorOutOfRange,
            )
            .invalidate_if(self.quality_step == 0, Self::Invalidity::ZeroQualityStep)
            .invalidate_if(self.max_bytes == 0, Self::Invalidity::ZeroMaxBytes)
            .into()
    }
}

/// The encoded result of [`standardize_image`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardizedImage {
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,

    /// The final encoder quality, if applicable.
    pub quality: Option<u8>,

    pub data: Vec<u8>,
}

impl StandardizedImage {
    #[must_use]
    pub fn media_type(&self) -> Mime {
        self.format.media_type()
    }

    #[must_use]
    pub fn into_inline_image(self, file_name: Option<String>) -> InlineImage {
        let media_type = self.media_type();
        let Self { data, .. } = self;
        InlineImage {
            media_type,
            file_name,
            data,
        }
    }
}

/// Decode an image with the EXIF orientation applied.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    if reader.format().is_none() {
        return Err(Error::UnsupportedInput("unrecognized image format".to_owned()));
    }
    let mut decoder = reader.into_decoder()?;
    let orientation = decoder.orientation()?;
    let mut image = DynamicImage::from_decoder(decoder)?;
    image.apply_orientation(orientation);
    Ok(image)
}

fn convert_color(image: DynamicImage, format: OutputFormat) -> DynamicImage {
    if format.has_alpha() && image.color().has_alpha() {
        DynamicImage::ImageRgba8(image.into_rgba8())
    } else {
        DynamicImage::ImageRgb8(image.into_rgb8())
    }
}

fn scale_down(image: DynamicImage, width: u32, height: u32) -> DynamicImage {
    if image.width() <= width && image.height() <= height {
        return image;
    }
    image.resize(width, height, RESIZE_FILTER)
}

fn pad(image: &DynamicImage, width: u32, height: u32, format: OutputFormat) -> DynamicImage {
    let x = i64::from(width.saturating_sub(image.width()) / 2);
    let y = i64::from(height.saturating_sub(image.height()) / 2);
    if format.has_alpha() {
        let mut canvas = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 0]));
        imageops::overlay(&mut canvas, &image.to_rgba8(), x, y);
        DynamicImage::ImageRgba8(canvas)
    } else {
        let mut canvas = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
        imageops::overlay(&mut canvas, &image.to_rgb8(), x, y);
        DynamicImage::ImageRgb8(canvas)
    }
}

fn layout(image: DynamicImage, config: &StandardizeConfig) -> DynamicImage {
    let StandardizeConfig {
        format,
        width,
        height,
        mode,
        ..
    } = config;
    match mode {
        ResizeMode::Fit => scale_down(image, *width, *height),
        ResizeMode::Pad => pad(
            &image.resize(*width, *height, RESIZE_FILTER),
            *width,
            *height,
            *format,
        ),
        ResizeMode::Crop => image.resize_to_fill(*width, *height, RESIZE_FILTER),
        ResizeMode::Passthrough => image,
    }
}

fn encode(image: &DynamicImage, format: OutputFormat, quality: u8) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    match format {
        OutputFormat::Jpeg => {
            image.write_with_encoder(JpegEncoder::new_with_quality(&mut data, quality))?;
        }
        OutputFormat::Png => {
            image.write_with_encoder(PngEncoder::new_with_quality(
                &mut data,
                CompressionType::Best,
                PngFilterType::Adaptive,
            ))?;
        }
        OutputFormat::WebP => return encode_webp(image, quality),
    }
    Ok(data)
}

fn encode_webp(image: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let encoded = if let DynamicImage::ImageRgba8(rgba) = image {
        webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height())
            .encode_simple(false, f32::from(quality))
    } else {
        let rgb = image.to_rgb8();
        webp::Encoder::from_rgb(rgb.as_raw(), rgb.width(), rgb.height())
            .encode_simple(false, f32::from(quality))
    };
    encoded
        .map(|memory| memory.to_vec())
        .map_err(|err| Error::Other(anyhow::anyhow!("failed to encode WebP: {err:?}")))
}

/// Decode, orient, resize and re-encode an uploaded image.
///
/// The quality is lowered step by step until the encoded image fits
/// into `max_bytes` or the quality floor has been reached. The result
/// might still exceed the budget at the floor.
pub fn standardize_image(bytes: &[u8], config: &StandardizeConfig) -> Result<StandardizedImage> {
    if let Err(err) = config.validate() {
        return Err(Error::Other(anyhow::anyhow!(
            "invalid standardization config: {err:?}"
        )));
    }
    let image = decode_image(bytes)?;
    let image = layout(convert_color(image, config.format), config);
    let format = config.format;
    let mut quality = config.quality;
    loop {
        let data = encode(&image, format, quality)?;
        let fits = data.len() as u64 <= config.max_bytes;
        if fits || !format.has_quality() || quality <= config.quality_floor {
            if !fits {
                log::info!(
                    "Standardized image exceeds budget: {size} > {max_bytes} bytes",
                    size = data.len(),
                    max_bytes = config.max_bytes
                );
            }
            return Ok(StandardizedImage {
                format,
                width: image.width(),
                height: image.height(),
                quality: format.has_quality().then_some(quality),
                data,
            });
        }
        quality = quality
            .saturating_sub(config.quality_step)
            .max(config.quality_floor);
        log::debug!("Re-encoding image with quality {quality}");
    }
}

/// Standardize an uploaded photo and name it after the equipment and
/// its view slot.
pub fn standardize_to_inline_image(
    bytes: &[u8],
    config: &StandardizeConfig,
    equipment_id: &str,
    slot: ViewSlot,
) -> Result<InlineImage> {
    let standardized = standardize_image(bytes, config)?;
    let file_name = canonical_file_name(
        equipment_id,
        slot,
        standardized.media_type().essence_str(),
    );
    Ok(standardized.into_inline_image(Some(file_name)))
}
