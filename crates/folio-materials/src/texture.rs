//! CPU-side textures: pre-loaded assets and the procedurally packed floor gradient.

use std::sync::atomic::{AtomicBool, Ordering};

use image::{DynamicImage, Rgb, RgbImage};

use crate::color::Color;

/// Magnification filter requested from the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterMode {
    /// Sample the closest texel.
    Nearest,
    /// Interpolate between neighbouring texels.
    Linear,
}

/// A texture owned by the material layer and uploaded by the renderer.
///
/// Textures are shared through `Arc`; regeneration always creates a new
/// object, so holders of an older `Arc` keep seeing the old texels.
#[derive(Debug)]
pub struct Texture {
    label: String,
    image: DynamicImage,
    mag_filter: FilterMode,
    needs_upload: AtomicBool,
}

impl Texture {
    /// Wraps a decoded image. New textures are flagged for upload.
    pub fn from_image(label: impl Into<String>, image: DynamicImage) -> Self {
        Self {
            label: label.into(),
            image,
            mag_filter: FilterMode::Linear,
            needs_upload: AtomicBool::new(true),
        }
    }

    /// Overrides the magnification filter.
    pub fn with_mag_filter(mut self, filter: FilterMode) -> Self {
        self.mag_filter = filter;
        self
    }

    /// Builds the 2×2 RGB background gradient for the floor.
    ///
    /// Texels are laid out row-major starting at the bottom row, so the raw
    /// buffer order is `[bottom_left, bottom_right, top_left, top_right]`.
    pub fn packed_gradient(corners: &GradientCorners) -> Self {
        let mut image = RgbImage::new(2, 2);
        image.put_pixel(0, 0, Rgb(corners.bottom_left.to_rgb8()));
        image.put_pixel(1, 0, Rgb(corners.bottom_right.to_rgb8()));
        image.put_pixel(0, 1, Rgb(corners.top_left.to_rgb8()));
        image.put_pixel(1, 1, Rgb(corners.top_right.to_rgb8()));

        Self::from_image("floor-background", DynamicImage::ImageRgb8(image))
            .with_mag_filter(FilterMode::Linear)
    }

    /// Debug label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Width in texels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in texels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Decoded pixel data.
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Raw texel bytes in the image's native layout.
    pub fn bytes(&self) -> &[u8] {
        self.image.as_bytes()
    }

    /// Magnification filter.
    pub fn mag_filter(&self) -> FilterMode {
        self.mag_filter
    }

    /// Returns `true` until the renderer calls [`Texture::mark_uploaded`].
    pub fn needs_upload(&self) -> bool {
        self.needs_upload.load(Ordering::Acquire)
    }

    /// Clears the upload flag once the GPU copy is current.
    pub fn mark_uploaded(&self) {
        self.needs_upload.store(false, Ordering::Release);
    }
}

/// The four corner colors of the floor gradient.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientCorners {
    /// Top-left corner.
    pub top_left: Color,
    /// Top-right corner.
    pub top_right: Color,
    /// Bottom-left corner.
    pub bottom_left: Color,
    /// Bottom-right corner.
    pub bottom_right: Color,
}
