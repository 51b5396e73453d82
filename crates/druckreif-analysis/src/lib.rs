// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// druckreif-analysis — Print-readiness analysis for Druckreif.
//
// Provides the raster PPI evaluator (the pixel density an image needs to fill
// a target physical size) and the PDF placed-image auditor (the effective
// pixel density of every image painted on every page, with per-page minimums).

pub mod detect;
pub mod pdf;
pub mod raster;

// Re-export the primary entry points so callers can use
// `druckreif_analysis::audit` etc.
pub use detect::detect_kind;
pub use pdf::auditor::{
    DocumentAuditResult, DocumentAuditor, PageAuditResult, PlacedImageRecord, PlacementWarning,
    audit, audit_with_options,
};
pub use raster::evaluator::{PpiResult, evaluate, evaluate_dimensions};
