// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Druckreif — Core types, unit geometry, and error definitions shared by the
// analysis crates.

pub mod config;
pub mod error;
pub mod geometry;
pub mod types;

pub use config::AuditOptions;
pub use error::DruckreifError;
pub use types::*;
