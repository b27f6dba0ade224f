//! Synthetic DICOM fixtures for tests

use crate::tags::{
    BITS_ALLOCATED, BITS_STORED, COLUMNS, HIGH_BIT, PHOTOMETRIC_INTERPRETATION, PIXEL_DATA,
    PIXEL_REPRESENTATION, RESCALE_INTERCEPT, RESCALE_SLOPE, ROWS, SAMPLES_PER_PIXEL,
};
use dicom_core::{DataElement, PrimitiveValue, VR};
use dicom_object::{FileMetaTableBuilder, InMemDicomObject};
use std::path::Path;

/// Writes a minimal single-frame greyscale DICOM file
///
/// `bits` must be 8 or 16; values are truncated to the target width.
/// `rescale` optionally sets (RescaleSlope, RescaleIntercept) as DS
/// strings.
pub(crate) fn write_test_dicom(
    path: &Path,
    rows: u16,
    columns: u16,
    bits: u16,
    values: &[u16],
    rescale: Option<(&str, &str)>,
) {
    write_dicom_with_representation(path, rows, columns, bits, 0, values, rescale);
}

/// Writes a fixture declaring signed (two's complement) pixel data
///
/// The raw bytes are still the given unsigned values; only the
/// Pixel Representation attribute differs.
pub(crate) fn write_signed_test_dicom(path: &Path, rows: u16, columns: u16, values: &[u16]) {
    write_dicom_with_representation(path, rows, columns, 16, 1, values, None);
}

fn write_dicom_with_representation(
    path: &Path,
    rows: u16,
    columns: u16,
    bits: u16,
    pixel_representation: u16,
    values: &[u16],
    rescale: Option<(&str, &str)>,
) {
    assert!(bits == 8 || bits == 16, "bits must be 8 or 16");

    let mut obj = InMemDicomObject::new_empty();
    obj.put(DataElement::new(ROWS, VR::US, PrimitiveValue::from(rows)));
    obj.put(DataElement::new(
        COLUMNS,
        VR::US,
        PrimitiveValue::from(columns),
    ));
    obj.put(DataElement::new(
        BITS_ALLOCATED,
        VR::US,
        PrimitiveValue::from(bits),
    ));
    obj.put(DataElement::new(
        BITS_STORED,
        VR::US,
        PrimitiveValue::from(bits),
    ));
    obj.put(DataElement::new(
        HIGH_BIT,
        VR::US,
        PrimitiveValue::from(bits - 1),
    ));
    obj.put(DataElement::new(
        PIXEL_REPRESENTATION,
        VR::US,
        PrimitiveValue::from(pixel_representation),
    ));
    obj.put(DataElement::new(
        SAMPLES_PER_PIXEL,
        VR::US,
        PrimitiveValue::from(1_u16),
    ));
    obj.put(DataElement::new(
        PHOTOMETRIC_INTERPRETATION,
        VR::CS,
        PrimitiveValue::from("MONOCHROME2"),
    ));

    if let Some((slope, intercept)) = rescale {
        obj.put(DataElement::new(
            RESCALE_SLOPE,
            VR::DS,
            PrimitiveValue::from(slope),
        ));
        obj.put(DataElement::new(
            RESCALE_INTERCEPT,
            VR::DS,
            PrimitiveValue::from(intercept),
        ));
    }

    let bytes: Vec<u8> = if bits == 8 {
        values.iter().map(|&v| v as u8).collect()
    } else {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    };
    let vr = if bits == 8 { VR::OB } else { VR::OW };
    obj.put(DataElement::new(
        PIXEL_DATA,
        vr,
        PrimitiveValue::U8(bytes.into()),
    ));

    let file_obj = obj
        .with_meta(
            FileMetaTableBuilder::new()
                // Explicit VR Little Endian
                .transfer_syntax("1.2.840.10008.1.2.1")
                // Digital Mammography X-Ray Image Storage
                .media_storage_sop_class_uid("1.2.840.10008.5.1.4.1.1.1.2")
                .media_storage_sop_instance_uid("1.2.276.0.7230010.3.1.4.1"),
        )
        .expect("failed to build file meta");
    file_obj.write_to_file(path).expect("failed to write DICOM");
}
