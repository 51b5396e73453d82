// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF placed-image auditor — walks every page of a document, finds the
// raster images its content actually paints, and reports the effective pixel
// density of each placement together with per-page minimums.

use lopdf::Document;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use druckreif_core::config::AuditOptions;
use druckreif_core::error::{DruckreifError, Result};
use druckreif_core::geometry::{points_to_inches, required_ppi};
use druckreif_core::types::PixelDimensions;

use super::scanner::{ContentScanner, PageScan};

// -- Result model --------------------------------------------------------------

/// One raster image as painted at one spot on a page.
///
/// The same image resource painted twice produces two records, one per
/// painting, because each placement has its own effective density.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedImageRecord {
    /// Cross-reference identifier (object number, generation) of the image
    /// XObject. Stable within the document.
    pub xref: (u32, u16),
    /// Displayed size in inches (width, height), rounded to two decimals.
    pub display_in: (f64, f64),
    /// Native pixel dimensions of the image resource.
    pub pixels: PixelDimensions,
    /// Pixel density across the displayed width, rounded to one decimal.
    pub ppi_x: f64,
    /// Pixel density across the displayed height, rounded to one decimal.
    pub ppi_y: f64,
    /// Effective density of the placement: the lower of the two axes,
    /// rounded to one decimal. The weaker axis is what limits print quality.
    pub min_ppi: f64,
}

/// A placement that was skipped because its resource or geometry could not
/// be resolved. Non-fatal: the rest of the page is still audited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementWarning {
    /// The resource name the content stream invoked.
    pub name: String,
    /// Why the placement could not be resolved.
    pub detail: String,
}

/// Audit outcome for a single page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageAuditResult {
    /// Page number, 1-indexed.
    pub page: u32,
    /// Minimum effective PPI across the page's kept placements, `None` when
    /// the page paints no raster image.
    pub min_ppi: Option<f64>,
    /// Every kept placement, in content-stream order.
    pub images: Vec<PlacedImageRecord>,
    /// Placements skipped as unresolvable.
    pub warnings: Vec<PlacementWarning>,
}

/// Audit outcome for a whole document: one entry per page, in page order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentAuditResult {
    pub pages: Vec<PageAuditResult>,
}

impl DocumentAuditResult {
    /// Number of audited pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// The worst defined page minimum in the document, `None` when no page
    /// paints any raster image.
    pub fn document_min_ppi(&self) -> Option<f64> {
        self.pages
            .iter()
            .filter_map(|page| page.min_ppi)
            .min_by(|a, b| a.total_cmp(b))
    }
}

// -- Auditor -------------------------------------------------------------------

/// Audits the images painted across an opened PDF document.
pub struct DocumentAuditor {
    /// The underlying lopdf document.
    document: Document,
    /// Scan behaviour (form recursion and its depth limit).
    options: AuditOptions,
}

impl DocumentAuditor {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF held in memory with default options.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::with_options(data, AuditOptions::default())
    }

    /// Open a PDF held in memory with explicit options.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn with_options(data: &[u8], options: AuditOptions) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|err| {
            DruckreifError::DocumentParse(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self { document, options })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    // -- Audit ----------------------------------------------------------------

    /// Audit every page, in page order.
    ///
    /// A page whose content cannot be read fails the whole audit; a
    /// placement that cannot be resolved only produces a warning on its page.
    #[instrument(skip(self))]
    pub fn audit(&self) -> Result<DocumentAuditResult> {
        let scanner = ContentScanner::new(&self.document, &self.options);
        let mut pages = Vec::new();

        for (page_number, page_id) in self.document.get_pages() {
            let scan = scanner.scan_page(page_id)?;
            pages.push(assemble_page(page_number, scan));
        }

        info!(pages = pages.len(), "Document audit complete");

        Ok(DocumentAuditResult { pages })
    }
}

/// Audit a PDF held in memory with default options.
pub fn audit(data: &[u8]) -> Result<DocumentAuditResult> {
    DocumentAuditor::from_bytes(data)?.audit()
}

/// Audit a PDF held in memory with explicit options.
pub fn audit_with_options(data: &[u8], options: &AuditOptions) -> Result<DocumentAuditResult> {
    DocumentAuditor::with_options(data, options.clone())?.audit()
}

// -- Aggregation ---------------------------------------------------------------

/// Turn a raw page scan into the page's audit entry: filter degenerate
/// placements, compute per-axis densities, and track the page minimum.
fn assemble_page(page_number: u32, scan: PageScan) -> PageAuditResult {
    let mut images = Vec::new();
    let mut page_min: Option<f64> = None;

    for placement in scan.placements {
        let width_in = points_to_inches(placement.width_pt);
        let height_in = points_to_inches(placement.height_pt);

        // Degenerate placements (zero or negative extent on either axis)
        // paint nothing visible and admit no meaningful density; they are
        // excluded rather than skewing the page minimum.
        let (Some(ppi_x), Some(ppi_y)) = (
            required_ppi(placement.pixels.width, width_in),
            required_ppi(placement.pixels.height, height_in),
        ) else {
            continue;
        };

        let effective = ppi_x.min(ppi_y);
        page_min = Some(match page_min {
            Some(current) => current.min(effective),
            None => effective,
        });

        images.push(PlacedImageRecord {
            xref: placement.xref,
            display_in: (round2(width_in), round2(height_in)),
            pixels: placement.pixels,
            ppi_x: round1(ppi_x),
            ppi_y: round1(ppi_y),
            min_ppi: round1(effective),
        });
    }

    let warnings = scan
        .skipped
        .into_iter()
        .map(|skipped| PlacementWarning {
            name: skipped.name,
            detail: skipped.detail,
        })
        .collect();

    PageAuditResult {
        page: page_number,
        min_ppi: page_min.map(round1),
        images,
        warnings,
    }
}

/// Round to one decimal place.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// -- Tests --------------------------------------------------------------------
