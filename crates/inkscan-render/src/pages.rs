// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pre-rendered page directories.
//
// Renderers name their output `<prefix>-<n>.<ext>`, zero-padded to the width
// of the page count (`page-01.png` ... `page-12.png`). Ordering goes by the
// numeric suffix so that unpadded names (`page-2`, `page-10`) still sort
// correctly.

use std::path::{Path, PathBuf};

use inkscan_core::error::Result;
use inkscan_core::types::DocumentType;
use tracing::debug;

/// List the page images in `dir`, in page order.
///
/// Only raster image files (PNG, JPEG, TIFF) are returned; anything else in
/// the directory is ignored. Subdirectories are not searched.
pub fn page_files_in(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut pages = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type()?.is_file() {
            continue;
        }
        match DocumentType::from_path(&path) {
            Some(kind) if kind.is_raster() => pages.push(path),
            _ => debug!(path = %path.display(), "Skipping non-image file"),
        }
    }

    pages.sort_by_cached_key(|path| page_sort_key(path));
    debug!(dir = %dir.display(), pages = pages.len(), "Page images listed");
    Ok(pages)
}

/// `(page number, file name)`; files without a number sort last.
fn page_sort_key(path: &Path) -> (u64, String) {
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default();
    let number = trailing_number(stem).unwrap_or(u64::MAX);
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    (number, name)
}

/// The run of ASCII digits at the end of `stem`, if any.
fn trailing_number(stem: &str) -> Option<u64> {
    let digits_start = stem
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(index, _)| index)?;
    stem[digits_start..].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"").unwrap();
    }

    fn names(pages: &[PathBuf]) -> Vec<String> {
        pages
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn trailing_number_parses_suffix() {
        assert_eq!(trailing_number("page-01"), Some(1));
        assert_eq!(trailing_number("test_document-12"), Some(12));
        assert_eq!(trailing_number("cover"), None);
        assert_eq!(trailing_number("7"), Some(7));
    }

    #[test]
    fn pages_sort_numerically() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["page-10.png", "page-2.png", "page-1.png"] {
            touch(dir.path(), name);
        }
        let pages = page_files_in(dir.path()).unwrap();
        assert_eq!(names(&pages), vec!["page-1.png", "page-2.png", "page-10.png"]);
    }

    #[test]
    fn zero_padded_pages_sort_numerically() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["doc-03.png", "doc-01.png", "doc-02.png"] {
            touch(dir.path(), name);
        }
        let pages = page_files_in(dir.path()).unwrap();
        assert_eq!(names(&pages), vec!["doc-01.png", "doc-02.png", "doc-03.png"]);
    }

    #[test]
    fn non_images_and_subdirectories_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "page-1.jpg");
        touch(dir.path(), "existing.pdf");
        touch(dir.path(), "notes.txt");
        std::fs::create_dir(dir.path().join("page-2.png")).unwrap();
        let pages = page_files_in(dir.path()).unwrap();
        assert_eq!(names(&pages), vec!["page-1.jpg"]);
    }

    #[test]
    fn unnumbered_pages_sort_last_by_name() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["zeta.png", "alpha.tiff", "page-3.png"] {
            touch(dir.path(), name);
        }
        let pages = page_files_in(dir.path()).unwrap();
        assert_eq!(names(&pages), vec!["page-3.png", "alpha.tiff", "zeta.png"]);
    }

    #[test]
    fn empty_directory_has_no_pages() {
        let dir = tempfile::tempdir().unwrap();
        assert!(page_files_in(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = page_files_in(dir.path().join("output")).unwrap_err();
        assert!(matches!(err, inkscan_core::InkscanError::Io(_)));
    }
}
