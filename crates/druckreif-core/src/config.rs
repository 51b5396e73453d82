// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Audit configuration.

use serde::{Deserialize, Serialize};

/// Settings controlling a PDF placed-image audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditOptions {
    /// Recurse into Form XObjects when enumerating painted images.
    pub follow_form_xobjects: bool,
    /// Maximum nesting depth for Form XObject recursion.
    pub max_form_depth: usize,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            follow_form_xobjects: true,
            max_form_depth: 8,
        }
    }
}
