// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Content-stream scanner — walks a page's operator stream tracking the
// current transformation matrix and resolves every painted image XObject to
// its displayed extent in points.

use std::collections::HashSet;

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use tracing::{debug, warn};

use druckreif_core::config::AuditOptions;
use druckreif_core::error::{DruckreifError, Result};
use druckreif_core::types::PixelDimensions;

// -- Transformation matrix -----------------------------------------------------

/// 2D affine transform in PDF row-vector form `[a b 0; c d 0; e f 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Matrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Matrix {
    pub const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    /// `self × other` — `self` applied first, then `other`, the composition
    /// order of the PDF `cm` operator.
    pub fn concat(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    /// Length of the transformed unit x-vector: the painted width of the
    /// unit square in points. Edge length, so rotation does not distort it.
    pub fn scale_x(&self) -> f64 {
        (self.a * self.a + self.b * self.b).sqrt()
    }

    /// Length of the transformed unit y-vector: the painted height of the
    /// unit square in points.
    pub fn scale_y(&self) -> f64 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

/// Build a matrix from six numeric objects `[a b c d e f]`.
fn matrix_from_objects(values: &[Object]) -> Option<Matrix> {
    if values.len() != 6 {
        return None;
    }
    let mut numbers = [0.0f64; 6];
    for (slot, object) in numbers.iter_mut().zip(values) {
        *slot = object_to_f64(object)?;
    }
    Some(Matrix {
        a: numbers[0],
        b: numbers[1],
        c: numbers[2],
        d: numbers[3],
        e: numbers[4],
        f: numbers[5],
    })
}

/// Convert a numeric PDF object (Integer or Real) to f64.
fn object_to_f64(object: &Object) -> Option<f64> {
    match object {
        Object::Integer(value) => Some(*value as f64),
        Object::Real(value) => Some(f64::from(*value)),
        _ => None,
    }
}

/// Follow an indirect reference to its target, or return the object itself.
fn resolve_ref<'a>(doc: &'a Document, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(object),
        _ => object,
    }
}

/// Read a positive integer dimension entry (`/Width`, `/Height`) from an
/// image XObject dictionary.
fn dict_dimension(doc: &Document, dict: &Dictionary, key: &[u8]) -> Option<u32> {
    match resolve_ref(doc, dict.get(key).ok()?) {
        Object::Integer(value) if *value > 0 => u32::try_from(*value).ok(),
        _ => None,
    }
}

// -- Scan results --------------------------------------------------------------

/// One image XObject painting found in content, with the raw displayed
/// extents in points. Degenerate placements are not filtered here; that is
/// the auditor's call.
#[derive(Debug, Clone)]
pub(crate) struct PlacedImage {
    pub xref: ObjectId,
    pub pixels: PixelDimensions,
    pub width_pt: f64,
    pub height_pt: f64,
}

/// A placement skipped because its resource could not be resolved.
#[derive(Debug, Clone)]
pub(crate) struct SkippedPlacement {
    /// The resource name the content stream invoked.
    pub name: String,
    /// Why resolution failed.
    pub detail: String,
}

/// Everything found while scanning one page: placements in paint order plus
/// the placements that had to be skipped.
#[derive(Debug, Default)]
pub(crate) struct PageScan {
    pub placements: Vec<PlacedImage>,
    pub skipped: Vec<SkippedPlacement>,
}

// -- Scanner -------------------------------------------------------------------

/// Walks page content streams to find painted images.
pub(crate) struct ContentScanner<'a> {
    doc: &'a Document,
    options: &'a AuditOptions,
}

impl<'a> ContentScanner<'a> {
    pub fn new(doc: &'a Document, options: &'a AuditOptions) -> Self {
        Self { doc, options }
    }

    /// Scan one page's content for image paintings.
    ///
    /// Content that cannot be read at all is a structural failure of the
    /// document and comes back as [`DruckreifError::DocumentParse`]. The
    /// operator decoder is lenient, so malformed content bytes usually
    /// decode to whatever operations survive and scan as an empty page
    /// instead. Individual unresolvable placements are collected instead of
    /// failing the scan.
    pub fn scan_page(&self, page_id: ObjectId) -> Result<PageScan> {
        let content = self.doc.get_page_content(page_id).map_err(|err| {
            DruckreifError::DocumentParse(format!("failed to read page content: {}", err))
        })?;
        let operations = Content::decode(&content)
            .map_err(|err| {
                DruckreifError::DocumentParse(format!("failed to decode content stream: {}", err))
            })?
            .operations;

        let resources = self.page_resources(page_id);

        let mut scan = PageScan::default();
        let mut in_progress = HashSet::new();
        self.walk(
            &operations,
            resources,
            Matrix::IDENTITY,
            0,
            &mut in_progress,
            &mut scan,
        );
        Ok(scan)
    }

    /// Walk one operator list, maintaining the graphics-state stack and the
    /// current transformation matrix, and descending into Form XObjects.
    fn walk(
        &self,
        operations: &[Operation],
        resources: Option<&'a Dictionary>,
        base: Matrix,
        depth: usize,
        in_progress: &mut HashSet<ObjectId>,
        scan: &mut PageScan,
    ) {
        let mut ctm = base;
        let mut stack: Vec<Matrix> = Vec::new();

        for operation in operations {
            match operation.operator.as_str() {
                "q" => stack.push(ctm),
                "Q" => {
                    // Tolerate unbalanced restores: fall back to the matrix
                    // this walk started with.
                    ctm = stack.pop().unwrap_or(base);
                }
                "cm" => {
                    if let Some(matrix) = matrix_from_objects(&operation.operands) {
                        ctm = matrix.concat(&ctm);
                    }
                }
                "Do" => {
                    let name = match operation.operands.first() {
                        Some(Object::Name(name)) => String::from_utf8_lossy(name).into_owned(),
                        _ => continue,
                    };
                    if let Err(err) =
                        self.invoke_xobject(&name, resources, ctm, depth, in_progress, scan)
                    {
                        warn!(name = %name, error = %err, "Skipping unresolvable image placement");
                        scan.skipped.push(SkippedPlacement {
                            name,
                            detail: err.to_string(),
                        });
                    }
                }
                _ => {}
            }
        }
    }

    /// Resolve a `Do` invocation: record an image placement, or recurse into
    /// a Form XObject. All errors here are placement-level, never fatal to
    /// the page.
    fn invoke_xobject(
        &self,
        name: &str,
        resources: Option<&'a Dictionary>,
        ctm: Matrix,
        depth: usize,
        in_progress: &mut HashSet<ObjectId>,
        scan: &mut PageScan,
    ) -> Result<()> {
        let xobject_id = self.resolve_xobject_id(name, resources)?;
        let stream = match self.doc.get_object(xobject_id) {
            Ok(Object::Stream(stream)) => stream,
            Ok(_) => {
                return Err(DruckreifError::UnresolvablePlacement(format!(
                    "XObject /{} is not a stream",
                    name
                )));
            }
            Err(err) => {
                return Err(DruckreifError::UnresolvablePlacement(format!(
                    "XObject /{} is unreadable: {}",
                    name, err
                )));
            }
        };

        let subtype: &[u8] = match stream.dict.get(b"Subtype") {
            Ok(Object::Name(subtype)) => subtype,
            _ => b"",
        };

        if subtype == b"Image" {
            let width = dict_dimension(self.doc, &stream.dict, b"Width");
            let height = dict_dimension(self.doc, &stream.dict, b"Height");
            let (Some(width), Some(height)) = (width, height) else {
                return Err(DruckreifError::UnresolvablePlacement(format!(
                    "image /{} lacks usable /Width and /Height entries",
                    name
                )));
            };
            debug!(name, width, height, "Image placement resolved");
            scan.placements.push(PlacedImage {
                xref: xobject_id,
                pixels: PixelDimensions::new(width, height),
                width_pt: ctm.scale_x(),
                height_pt: ctm.scale_y(),
            });
            Ok(())
        } else if subtype == b"Form" {
            if !self.options.follow_form_xobjects || depth >= self.options.max_form_depth {
                debug!(name, depth, "Form XObject not followed");
                return Ok(());
            }
            if !in_progress.insert(xobject_id) {
                // Already on the current invocation path: a self-referential
                // form would recurse forever.
                debug!(name, "Ignoring recursive form invocation");
                return Ok(());
            }
            let outcome = self.scan_form(stream, resources, ctm, depth, in_progress, scan);
            in_progress.remove(&xobject_id);
            outcome
        } else {
            // Other XObject kinds (e.g. /PS) paint no raster content.
            Ok(())
        }
    }

    /// Decode a Form XObject's content and walk it with the form's matrix
    /// and resources in effect.
    fn scan_form(
        &self,
        stream: &'a Stream,
        parent_resources: Option<&'a Dictionary>,
        ctm: Matrix,
        depth: usize,
        in_progress: &mut HashSet<ObjectId>,
        scan: &mut PageScan,
    ) -> Result<()> {
        let data = if stream.dict.get(b"Filter").is_ok() {
            stream.decompressed_content().map_err(|err| {
                DruckreifError::UnresolvablePlacement(format!("form content is unreadable: {}", err))
            })?
        } else {
            stream.content.clone()
        };
        let operations = Content::decode(&data)
            .map_err(|err| {
                DruckreifError::UnresolvablePlacement(format!(
                    "form content is undecodable: {}",
                    err
                ))
            })?
            .operations;

        // The form /Matrix maps form space into the space the form is
        // painted in, so it composes under the invoker's CTM.
        let base = match stream.dict.get(b"Matrix").ok().map(|obj| resolve_ref(self.doc, obj)) {
            Some(Object::Array(values)) => match matrix_from_objects(values) {
                Some(matrix) => matrix.concat(&ctm),
                None => ctm,
            },
            _ => ctm,
        };

        // The form's own resources shadow the invoker's when present.
        let resources = match stream
            .dict
            .get(b"Resources")
            .ok()
            .map(|obj| resolve_ref(self.doc, obj))
        {
            Some(Object::Dictionary(dict)) => Some(dict),
            _ => parent_resources,
        };

        self.walk(&operations, resources, base, depth + 1, in_progress, scan);
        Ok(())
    }

    /// Look a name up in the `/XObject` sub-dictionary of the resources in
    /// scope.
    fn resolve_xobject_id(&self, name: &str, resources: Option<&Dictionary>) -> Result<ObjectId> {
        let resources = resources.ok_or_else(|| {
            DruckreifError::UnresolvablePlacement(format!("no resources in scope for /{}", name))
        })?;
        let xobjects = match resources.get(b"XObject").map(|obj| resolve_ref(self.doc, obj)) {
            Ok(Object::Dictionary(dict)) => dict,
            _ => {
                return Err(DruckreifError::UnresolvablePlacement(format!(
                    "no /XObject resources in scope for /{}",
                    name
                )));
            }
        };
        match xobjects.get(name.as_bytes()) {
            Ok(Object::Reference(id)) => Ok(*id),
            Ok(_) => Err(DruckreifError::UnresolvablePlacement(format!(
                "/{} is not an indirect reference",
                name
            ))),
            Err(_) => Err(DruckreifError::UnresolvablePlacement(format!(
                "/{} is not named in the /XObject resources",
                name
            ))),
        }
    }

    /// Find the `/Resources` dictionary governing a page, walking `/Parent`
    /// links when the page node itself carries none.
    fn page_resources(&self, page_id: ObjectId) -> Option<&'a Dictionary> {
        let mut current = page_id;
        let mut hops = 0;
        loop {
            let node = self.doc.get_object(current).ok()?.as_dict().ok()?;
            if let Ok(resources) = node.get(b"Resources") {
                return match resolve_ref(self.doc, resources) {
                    Object::Dictionary(resolved) => Some(resolved),
                    _ => None,
                };
            }
            // Bail on unreasonable tree depth rather than loop on a cycle.
            hops += 1;
            if hops > 32 {
                return None;
            }
            current = node.get(b"Parent").ok()?.as_reference().ok()?;
        }
    }
}

// -- Tests --------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_has_unit_scale() {
        assert!((Matrix::IDENTITY.scale_x() - 1.0).abs() < 1e-12);
        assert!((Matrix::IDENTITY.scale_y() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn translation_does_not_change_scale() {
        let scale = Matrix {
            a: 144.0,
            b: 0.0,
            c: 0.0,
            d: 72.0,
            e: 0.0,
            f: 0.0,
        };
        let translate = Matrix {
            e: 300.0,
            f: 400.0,
            ..Matrix::IDENTITY
        };
        let combined = scale.concat(&translate);
        assert!((combined.scale_x() - 144.0).abs() < 1e-9);
        assert!((combined.scale_y() - 72.0).abs() < 1e-9);
    }

    /// Verify that rotating a placement preserves its edge lengths, so a
    /// rotated image keeps its physical print size.
    #[test]
    fn rotation_preserves_edge_lengths() {
        let scale = Matrix {
            a: 2.0,
            b: 0.0,
            c: 0.0,
            d: 3.0,
            e: 0.0,
            f: 0.0,
        };
        let rotate_90 = Matrix {
            a: 0.0,
            b: 1.0,
            c: -1.0,
            d: 0.0,
            e: 0.0,
            f: 0.0,
        };
        let combined = scale.concat(&rotate_90);
        assert!((combined.scale_x() - 2.0).abs() < 1e-9);
        assert!((combined.scale_y() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn matrix_parses_mixed_integer_and_real_operands() {
        let operands = vec![
            Object::Integer(2),
            Object::Real(0.0),
            Object::Real(0.0),
            Object::Real(1.5),
            Object::Integer(10),
            Object::Integer(20),
        ];
        let matrix = matrix_from_objects(&operands).expect("six numbers parse");
        assert_eq!(matrix.a, 2.0);
        assert_eq!(matrix.d, 1.5);
        assert_eq!(matrix.e, 10.0);
    }

    #[test]
    fn matrix_rejects_wrong_arity_and_non_numbers() {
        assert!(matrix_from_objects(&[Object::Integer(1)]).is_none());
        let with_name = vec![
            Object::Integer(1),
            Object::Integer(0),
            Object::Integer(0),
            Object::Name(b"oops".to_vec()),
            Object::Integer(0),
            Object::Integer(0),
        ];
        assert!(matrix_from_objects(&with_name).is_none());
    }
}
