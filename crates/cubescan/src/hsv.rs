//! RGB image to HSV plane conversion.
//!
//! Planes follow the 8-bit camera convention: hue halved into `0..180`,
//! saturation and value stretched to `0..=255`.

use image::RgbImage;
use palette::{FromColor, Hsv, Srgb};

use crate::core;

/// Errors turning image files into HSV frames.
#[derive(thiserror::Error, Debug)]
pub enum HsvError {
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Convert an RGB image into the three-plane frame the sampler reads.
pub fn hsv_frame_from_rgb(img: &RgbImage) -> core::HsvFrame {
    let (width, height) = (img.width() as usize, img.height() as usize);
    let mut hue = Vec::with_capacity(width * height);
    let mut sat = Vec::with_capacity(width * height);
    let mut val = Vec::with_capacity(width * height);
    for pixel in img.pixels() {
        let [r, g, b] = pixel.0;
        let hsv = Hsv::from_color(Srgb::new(r, g, b).into_format::<f32>());
        let deg = hsv.hue.into_positive_degrees();
        hue.push(((deg / 2.0).round() as i32).rem_euclid(180) as u8);
        sat.push((hsv.saturation * 255.0).round() as u8);
        val.push((hsv.value * 255.0).round() as u8);
    }
    core::HsvFrame {
        width,
        height,
        hue,
        sat,
        val,
    }
}

/// Load an image from disk and convert it to an HSV frame.
pub fn load_hsv_frame(path: impl AsRef<std::path::Path>) -> Result<core::HsvFrame, HsvError> {
    let img = image::open(path)?.to_rgb8();
    Ok(hsv_frame_from_rgb(&img))
}
