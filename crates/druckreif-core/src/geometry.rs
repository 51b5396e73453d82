// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unit geometry — millimetre/inch/point conversions and the required-PPI
// arithmetic shared by the raster evaluator and the PDF placed-image auditor.

/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// PDF page-space units (points) per inch.
pub const POINTS_PER_INCH: f64 = 72.0;

/// Pixel density generally recommended for quality print output.
pub const RECOMMENDED_PRINT_PPI: f64 = 300.0;

/// Pixel density below which print output is usually visibly soft.
pub const LOW_RESOLUTION_PPI: f64 = 150.0;

/// Convert millimetres to inches.
pub fn mm_to_inches(mm: f64) -> f64 {
    mm / MM_PER_INCH
}

/// Convert PDF points (1/72 inch) to inches.
pub fn points_to_inches(points: f64) -> f64 {
    points / POINTS_PER_INCH
}

/// Pixel density required for `pixel_extent` pixels to fill
/// `physical_extent_inches` inches.
///
/// Returns `None` when the physical extent is zero or negative: no density is
/// computable there, and the absence must stay explicit rather than collapse
/// to `0` or infinity.
pub fn required_ppi(pixel_extent: u32, physical_extent_inches: f64) -> Option<f64> {
    if physical_extent_inches > 0.0 {
        Some(f64::from(pixel_extent) / physical_extent_inches)
    } else {
        None
    }
}

/// Pixels needed along one axis to print `extent_mm` millimetres at `ppi`,
/// rounded up to the next whole pixel.
///
/// Returns `None` when either input is non-positive.
pub fn required_pixels(extent_mm: f64, ppi: f64) -> Option<u32> {
    if extent_mm > 0.0 && ppi > 0.0 {
        Some((mm_to_inches(extent_mm) * ppi).ceil() as u32)
    } else {
        None
    }
}

// -- Tests --------------------------------------------------------------------
