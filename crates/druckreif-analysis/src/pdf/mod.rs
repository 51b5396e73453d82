// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — auditing the effective pixel density of images placed on PDF pages.

pub mod auditor;
mod scanner;

pub use auditor::{DocumentAuditResult, DocumentAuditor, audit, audit_with_options};
