//! Slice-based decoder implementation.

use std::borrow::Cow;

use scraper::Html;

use super::{Error, FromElement, Options, tree};

/// Decode a document from a slice, publishing to a record.
///
/// This method is also re-exported as `gleaner::avec::decode_slice`.
///
/// On error, the target may have been partially updated.
pub fn decode<T: FromElement>(r: &[u8], o: &mut T) -> Result<(), Error> {
    decode_with(r, o, &Options::default())
}

/// Decode a document from a slice with the given options, publishing to a
/// record.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD before parsing.
///
/// On error, the target may have been partially updated.
pub fn decode_with<T: FromElement>(r: &[u8], o: &mut T, options: &Options) -> Result<(), Error> {
    tree::ensure_record::<T>()?;

    let text = String::from_utf8_lossy(r);
    if let Cow::Owned(_) = text {
        log::debug!("Replaced invalid UTF-8 in the document.");
    }

    let html = Html::parse_document(&text);
    tree::decode_html(&html, o, options)
}
