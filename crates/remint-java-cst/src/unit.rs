//! The compilation unit: root entity owning one source text, its node
//! arena, and the render options — plus the save/header-preservation
//! policy and output-path resolution.
//!
//! Rendering policy:
//!
//! - root `Ignored`: the unit is excluded from output entirely
//!   ([`Unit::render`] returns `Ok(None)`). This is file-level exclusion
//!   and is deliberately a different outcome from a contained declaration
//!   being `Ignored` (in-place deletion handled by list filtering).
//! - root `Unmodified`: the original text is returned byte-for-byte.
//! - root `Changed`: the unit is reassembled — optional header prefix,
//!   then the top-level children in source order, with the original bytes
//!   between them (comments, blank lines) copied verbatim.

use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use la_arena::Arena;
use tracing::debug;

use crate::contract::Action;
use crate::error::{SaveError, WriteError};
use crate::node::{Node, NodeData, NodeId};
use crate::printer;
use crate::style::{RenderOptions, StyleWriter};

/// One compilation unit: the root entity of the engine.
pub struct Unit {
    pub(crate) nodes: Arena<Node>,
    pub(crate) root: NodeId,
    pub(crate) source: String,
    pub(crate) options: RenderOptions,
    pub(crate) file_name: Option<String>,
}

impl Unit {
    /// The unit's full original text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The unit's render options.
    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// The unit's simple file name, when the front end supplied one.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Checked slice of the original text.
    pub(crate) fn slice(&self, range: Range<usize>) -> Result<&str, SaveError> {
        self.source.get(range.clone()).ok_or_else(|| {
            SaveError::invariant(format!(
                "source span {}..{} is out of bounds (text length {})",
                range.start,
                range.end,
                self.source.len()
            ))
        })
    }

    /// Emit one node into the writer.
    ///
    /// Returns `Ok(false)` for an `Ignored` node (the caller's separator
    /// logic omits it), `Ok(true)` otherwise. An `Unmodified` node is a
    /// verbatim copy of its original span; a `Changed` node dispatches to
    /// its structural printer.
    pub fn save_node(&self, id: NodeId, w: &mut StyleWriter) -> Result<bool, SaveError> {
        match self.action(id) {
            Action::Ignored => Ok(false),
            Action::Unmodified => {
                let position = self.position(id);
                let range = position.byte_range().ok_or_else(|| {
                    SaveError::invariant(format!(
                        "unmodified {:?} node has no valid source span",
                        self.kind(id)
                    ))
                })?;
                let text = self.slice(range)?;
                w.append(text);
                Ok(true)
            }
            Action::Changed => {
                printer::print_node(self, id, w)?;
                Ok(true)
            }
        }
    }

    /// Render the unit.
    ///
    /// `Ok(None)` means the unit is excluded from output (root `Ignored`).
    pub fn render(&self) -> Result<Option<String>, SaveError> {
        match self.action(self.root) {
            Action::Ignored => Ok(None),
            Action::Unmodified => Ok(Some(self.source.clone())),
            Action::Changed => {
                let mut w = StyleWriter::new(self.options);
                self.print_compilation_unit(&mut w)?;
                Ok(Some(w.into_string()))
            }
        }
    }

    /// Reassemble a changed unit: header prefix, then each retained
    /// top-level child in source order with the original gaps between
    /// them copied verbatim.
    pub(crate) fn print_compilation_unit(&self, w: &mut StyleWriter) -> Result<(), SaveError> {
        let children = self.child_slots(self.root);

        // The cascade's copy point starts at the first retained child
        // with a known span; the text before it is the header.
        let header_end = children
            .iter()
            .copied()
            .filter(|&child| !self.action(child).is_ignored())
            .find_map(|child| {
                self.position(child)
                    .byte_range()
                    .map(|byte_range| byte_range.start)
            })
            .unwrap_or(0);
        let mut copy_point = header_end;
        if self.options.preserve_header && header_end > 0 {
            w.append(self.slice(0..header_end)?);
        }

        for child in children {
            let position = self.position(child);
            if self.action(child).is_ignored() {
                // Clean deletion: skip the child and swallow its leading
                // gap, so the separator that introduced it goes with it.
                if let Some(byte_range) = position.byte_range() {
                    copy_point = copy_point.max(byte_range.end);
                }
                continue;
            }
            match position.byte_range() {
                Some(byte_range) => {
                    if byte_range.start > copy_point {
                        w.append(self.slice(copy_point..byte_range.start)?);
                    }
                    self.save_node(child, w)?;
                    copy_point = copy_point.max(byte_range.end);
                }
                None => {
                    // Synthesized declaration: nothing to anchor a gap to,
                    // print it on its own line.
                    w.append_line_if_needed();
                    self.save_node(child, w)?;
                    w.append_line_separator();
                }
            }
        }

        if copy_point < self.source.len() {
            w.append(self.slice(copy_point..self.source.len())?);
        }
        Ok(())
    }

    /// File name for output: the front end's name, else the first retained
    /// type declaration's simple name.
    fn output_file_name(&self) -> String {
        if let Some(name) = &self.file_name {
            return name.clone();
        }
        if let NodeData::CompilationUnit { types, .. } = self.node(self.root).data() {
            for &decl in types {
                if self.action(decl).is_ignored() {
                    continue;
                }
                if let NodeData::ClassDecl { name, .. } = self.node(decl).data() {
                    if !name.is_empty() {
                        return format!("{}.java", name);
                    }
                }
            }
        }
        "Unit.java".to_string()
    }

    /// Package-qualified relative output path, e.g. `a/b/c/Foo.java`.
    pub fn output_rel_path(&self) -> PathBuf {
        let mut path = PathBuf::new();
        if let NodeData::CompilationUnit {
            package: Some(package),
            ..
        } = self.node(self.root).data()
        {
            if !self.action(*package).is_ignored() {
                if let NodeData::Package { name: Some(name) } = self.node(*package).data() {
                    if let Some(qualified) = self.qualified_name(*name) {
                        for segment in qualified.split('.') {
                            path.push(segment);
                        }
                    }
                }
            }
        }
        path.push(self.output_file_name());
        path
    }

    /// Render the unit and write it under `output_root` at its
    /// package-qualified relative path.
    ///
    /// `Ok(None)` means the unit is excluded (root `Ignored`) and no file
    /// was written. Any failure aborts only this unit's write.
    pub fn write_to(&self, output_root: &Path) -> Result<Option<PathBuf>, WriteError> {
        let Some(text) = self.render()? else {
            return Ok(None);
        };
        let target = output_root.join(self.output_rel_path());
        debug!(path = %target.display(), "writing unit");
        if target.is_dir() {
            return Err(WriteError::TargetIsDirectory { path: target });
        }
        if let Some(parent) = target.parent() {
            if parent.exists() {
                if !parent.is_dir() {
                    return Err(WriteError::ParentNotADirectory {
                        path: target.clone(),
                        parent: parent.to_path_buf(),
                    });
                }
            } else {
                fs::create_dir_all(parent).map_err(|source| WriteError::CreateDirFailed {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        fs::write(&target, text).map_err(|source| WriteError::Io {
            path: target.clone(),
            source,
        })?;
        Ok(Some(target))
    }
}
