// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Druckreif print-readiness assessment.

use serde::{Deserialize, Serialize};

/// A physical print size in millimetres (width, height).
///
/// Extents are kept as supplied, including non-positive values: the geometry
/// layer treats an axis with a non-positive extent as having no defined pixel
/// density, so degenerate targets stay representable instead of being
/// rejected up front.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalSize {
    pub width: f64,
    pub height: f64,
}

impl PhysicalSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Native pixel dimensions of a raster image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelDimensions {
    pub width: u32,
    pub height: u32,
}

impl PixelDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Kinds of input Druckreif can assess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    /// A PDF document, audited page by page for placed images.
    Pdf,
    /// A standalone raster image, evaluated against a target print size.
    Raster,
}

impl DocumentKind {
    /// Infer the input kind from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "jpg" | "jpeg" | "png" | "tif" | "tiff" | "bmp" | "gif" | "webp" => Some(Self::Raster),
            _ => None,
        }
    }
}

/// Standard paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A3,
    A5,
    Letter,
    Legal,
    Tabloid,
    Custom { width_mm: f64, height_mm: f64 },
}

impl PaperSize {
    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (f64, f64) {
        match self {
            Self::A4 => (210.0, 297.0),
            Self::A3 => (297.0, 420.0),
            Self::A5 => (148.0, 210.0),
            Self::Letter => (216.0, 279.0),
            Self::Legal => (216.0, 356.0),
            Self::Tabloid => (279.0, 432.0),
            Self::Custom {
                width_mm,
                height_mm,
            } => (*width_mm, *height_mm),
        }
    }

    /// The paper size as an evaluation target.
    pub fn dimensions(&self) -> PhysicalSize {
        let (width, height) = self.dimensions_mm();
        PhysicalSize::new(width, height)
    }
}

// -- Tests --------------------------------------------------------------------
