// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Input detection — classify a byte buffer so callers can route it to the
// matching analysis component.

use druckreif_core::types::DocumentKind;

/// PDF header magic bytes.
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Classify a byte buffer as a PDF document or a raster image.
///
/// PDFs are recognised by their `%PDF-` header; rasters by whatever format
/// the `image` crate can identify from the leading bytes. Returns `None` when
/// the buffer is neither.
pub fn detect_kind(data: &[u8]) -> Option<DocumentKind> {
    if data.starts_with(PDF_MAGIC) {
        return Some(DocumentKind::Pdf);
    }
    if image::guess_format(data).is_ok() {
        return Some(DocumentKind::Raster);
    }
    None
}

// -- Tests --------------------------------------------------------------------
