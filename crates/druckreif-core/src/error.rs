// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Druckreif.

use thiserror::Error;

/// Top-level error type for all Druckreif operations.
#[derive(Debug, Error)]
pub enum DruckreifError {
    // -- Raster analysis errors --
    #[error("image decoding failed: {0}")]
    ImageDecode(String),

    // -- PDF analysis errors --
    #[error("PDF parsing failed: {0}")]
    DocumentParse(String),

    /// A single placed image whose resource or geometry could not be
    /// resolved. Recoverable: the auditor skips the placement and records a
    /// warning instead of failing the whole document.
    #[error("image placement could not be resolved: {0}")]
    UnresolvablePlacement(String),

    // -- Host plumbing --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DruckreifError>;
