// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster module — required-PPI evaluation of images against a target print size.

pub mod evaluator;

pub use evaluator::{PpiResult, evaluate, evaluate_dimensions};
