use crate::error::{DdsmError, Result};
use crate::tags::{get_f64_value, get_u16_value, PIXEL_REPRESENTATION, RESCALE_INTERCEPT, RESCALE_SLOPE};
use crate::types::BitDepth;
use dicom_object::open_file;
use dicom_pixeldata::PixelDecoder as _;
use image::imageops::{self, FilterType};
use image::{ImageBuffer, Luma};
use log::debug;
use std::fs;
use std::path::Path;

/// Options for a single DICOM to PNG conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Output resolution as (width, height); `None` keeps the source size
    pub target_size: Option<(u32, u32)>,

    /// Output bit depth (8 or 16)
    pub bit_depth: BitDepth,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            target_size: Some((896, 1152)),
            bit_depth: BitDepth::Sixteen,
        }
    }
}

/// Converts one DICOM file to a greyscale PNG
///
/// Pixel data is decoded, linearly rescaled by RescaleSlope/Intercept
/// (defaulting to identity), optionally resized with Catmull-Rom
/// (cubic) interpolation, min-max normalized to the full output range
/// and written at the configured bit depth. A constant image maps to
/// all zeros.
pub fn convert_file(dicom_path: &Path, png_path: &Path, options: &ConvertOptions) -> Result<()> {
    let obj = open_file(dicom_path)?;
    let pixels = obj.decode_pixel_data()?;

    if pixels.number_of_frames() > 1 {
        return Err(DdsmError::InvalidValue(format!(
            "multi-frame image not supported: {}",
            dicom_path.display()
        )));
    }
    // Pixel bytes are reinterpreted as unsigned below
    if get_u16_value(&obj, PIXEL_REPRESENTATION).unwrap_or(0) == 1 {
        return Err(DdsmError::InvalidValue(format!(
            "signed pixel data not supported: {}",
            dicom_path.display()
        )));
    }

    let (mut width, mut height) = (pixels.columns(), pixels.rows());
    let expected = width as usize * height as usize;
    let data = pixels.data();

    let mut values: Vec<f32> = match pixels.bits_allocated() {
        8 => data.iter().take(expected).map(|&b| f32::from(b)).collect(),
        16 => data
            .chunks_exact(2)
            .take(expected)
            .map(|c| f32::from(u16::from_le_bytes([c[0], c[1]])))
            .collect(),
        other => {
            return Err(DdsmError::InvalidValue(format!(
                "unsupported bits allocated: {}",
                other
            )))
        }
    };
    if values.len() < expected {
        return Err(DdsmError::DecodeError(format!(
            "short pixel data in {}",
            dicom_path.display()
        )));
    }

    let slope = get_f64_value(&obj, RESCALE_SLOPE).unwrap_or(1.0) as f32;
    let intercept = get_f64_value(&obj, RESCALE_INTERCEPT).unwrap_or(0.0) as f32;
    apply_rescale(&mut values, slope, intercept);

    if let Some((target_width, target_height)) = options.target_size {
        // Resize in float space, before quantization
        let img: ImageBuffer<Luma<f32>, Vec<f32>> = ImageBuffer::from_raw(width, height, values)
            .ok_or_else(|| {
                DdsmError::DecodeError(format!("pixel buffer mismatch in {}", dicom_path.display()))
            })?;
        let resized = imageops::resize(&img, target_width, target_height, FilterType::CatmullRom);
        width = target_width;
        height = target_height;
        values = resized.into_raw();
    }

    let quantized = quantize(&values, options.bit_depth);

    if let Some(parent) = png_path.parent() {
        fs::create_dir_all(parent)?;
    }
    match options.bit_depth {
        BitDepth::Eight => {
            let buf: Vec<u8> = quantized.into_iter().map(|v| v as u8).collect();
            let img: ImageBuffer<Luma<u8>, Vec<u8>> = ImageBuffer::from_raw(width, height, buf)
                .ok_or_else(|| DdsmError::InvalidValue("output buffer mismatch".to_string()))?;
            img.save(png_path)?;
        }
        BitDepth::Sixteen => {
            let img: ImageBuffer<Luma<u16>, Vec<u16>> =
                ImageBuffer::from_raw(width, height, quantized)
                    .ok_or_else(|| DdsmError::InvalidValue("output buffer mismatch".to_string()))?;
            img.save(png_path)?;
        }
    }

    debug!("Saved: {}", png_path.display());
    Ok(())
}

/// Applies the DICOM modality rescale in place
pub(crate) fn apply_rescale(values: &mut [f32], slope: f32, intercept: f32) {
    if slope == 1.0 && intercept == 0.0 {
        return;
    }
    for v in values.iter_mut() {
        *v = *v * slope + intercept;
    }
}

/// Min-max normalizes values to `[0, max]` of the output bit depth
///
/// A constant (or empty) input maps to all zeros rather than
/// propagating a division by zero.
pub(crate) fn quantize(values: &[f32], bit_depth: BitDepth) -> Vec<u16> {
    let max_val = bit_depth.max_value();
    let min = values.iter().copied().fold(f32::INFINITY, f32::min);
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let range = max - min;

    values
        .iter()
        .map(|&v| {
            if range > 0.0 {
                ((v - min) / range * max_val).round() as u16
            } else {
                0
            }
        })
        .collect()
}
