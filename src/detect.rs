//! PDF header sniffing.
//!
//! Documents are checked for the `%PDF-x.y` signature before they are handed
//! to lopdf, so obviously wrong inputs (HTML, images, truncated files) fail
//! fast with [`Error::UnknownFormat`] instead of a parser error.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const PDF_MAGIC: &[u8] = b"%PDF-";
const VERSION_LEN: usize = 3;

/// Read the header of a file and return its PDF version (e.g. `"1.7"`).
pub fn pdf_version_from_path<P: AsRef<Path>>(path: P) -> Result<String> {
    let mut header = Vec::with_capacity(16);
    File::open(path)?.take(16).read_to_end(&mut header)?;
    pdf_version_from_bytes(&header)
}

/// Return the PDF version encoded in the leading bytes of `data`.
pub fn pdf_version_from_bytes(data: &[u8]) -> Result<String> {
    let rest = data.strip_prefix(PDF_MAGIC).ok_or(Error::UnknownFormat)?;
    let version = rest.get(..VERSION_LEN).ok_or(Error::UnknownFormat)?;

    match version {
        [major, b'.', minor] if major.is_ascii_digit() && minor.is_ascii_digit() => {
            Ok(String::from_utf8_lossy(version).into_owned())
        }
        _ => Err(Error::UnsupportedVersion(
            String::from_utf8_lossy(version).into_owned(),
        )),
    }
}

/// Check whether a file starts with a PDF header.
pub fn is_pdf<P: AsRef<Path>>(path: P) -> bool {
    pdf_version_from_path(path).is_ok()
}

/// Check whether a file name carries the `.pdf` extension (any case).
pub fn has_pdf_extension<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}
