// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster PPI evaluator — decode an image and compute the pixel density it
// needs to fill a target physical size, per axis.

use druckreif_core::error::{DruckreifError, Result};
use druckreif_core::geometry::{mm_to_inches, required_ppi};
use druckreif_core::types::{PhysicalSize, PixelDimensions};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Outcome of evaluating a raster image against a target print size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PpiResult {
    /// Native pixel dimensions of the decoded image.
    pub pixels: PixelDimensions,
    /// The target physical size exactly as supplied, in millimetres.
    pub target_mm: PhysicalSize,
    /// Required pixel density for the width and height axes, rounded to two
    /// decimals. An axis is `None` when its target extent is non-positive:
    /// no density is defined there, which is not the same thing as zero.
    pub required_ppi: (Option<f64>, Option<f64>),
}

// -- Evaluation ----------------------------------------------------------------

/// Evaluate encoded image bytes against a target print size in millimetres.
///
/// The image is decoded only far enough to learn its pixel dimensions; pixel
/// content never influences the result. Undecodable input yields
/// [`DruckreifError::ImageDecode`].
#[instrument(skip(data), fields(data_len = data.len()))]
pub fn evaluate(data: &[u8], target_mm: PhysicalSize) -> Result<PpiResult> {
    let img = image::load_from_memory(data)
        .map_err(|err| DruckreifError::ImageDecode(format!("failed to decode image: {}", err)))?;

    let pixels = PixelDimensions::new(img.width(), img.height());
    debug!(
        width = pixels.width,
        height = pixels.height,
        "Image decoded for PPI evaluation"
    );

    Ok(evaluate_dimensions(pixels, target_mm))
}

/// Evaluate already-known pixel dimensions against a target print size in
/// millimetres. The pure half of [`evaluate`].
pub fn evaluate_dimensions(pixels: PixelDimensions, target_mm: PhysicalSize) -> PpiResult {
    let ppi_width = required_ppi(pixels.width, mm_to_inches(target_mm.width)).map(round2);
    let ppi_height = required_ppi(pixels.height, mm_to_inches(target_mm.height)).map(round2);

    PpiResult {
        pixels,
        target_mm,
        required_ppi: (ppi_width, ppi_height),
    }
}

/// Round to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// -- Tests --------------------------------------------------------------------
