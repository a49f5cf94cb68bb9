//! Reader-based decoder implementation.

use std::io::Read;

use super::{Error, FromElement, Options, slice, tree};

/// Decoder for documents read from a stream.
///
/// Options are fixed when the decoder is built and apply to every call to
/// [`Decoder::decode`].
#[derive(Debug)]
pub struct Decoder<R> {
    r: R,
    options: Options,
}

impl<R: Read> Decoder<R> {
    pub fn new(r: R) -> Self {
        Self::with_options(r, Options::default())
    }

    pub fn with_options(r: R, options: Options) -> Self {
        Self { r, options }
    }

    /// Remove leading and trailing whitespace from extracted text.
    pub fn trim_whitespace(mut self, trim: bool) -> Self {
        self.options.trim_whitespace = trim;
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Read the rest of the stream as a document and decode it, publishing to
    /// a record.
    ///
    /// Non-record targets are rejected before the stream is read. On any
    /// other error, the target may have been partially updated.
    pub fn decode<T: FromElement>(&mut self, o: &mut T) -> Result<(), Error> {
        tree::ensure_record::<T>()?;

        let mut buf = vec![];
        self.r.read_to_end(&mut buf)?;

        log::debug!("Read {} bytes for decoding.", buf.len());

        slice::decode_with(&buf, o, &self.options)
    }

    pub fn into_inner(self) -> R {
        self.r
    }
}

/// Decode a document from a reader, publishing to a record.
///
/// This method is also re-exported as `gleaner::avec::decode_reader`.
///
/// On error, the target may have been partially updated.
pub fn decode<T: FromElement>(r: &mut impl Read, o: &mut T) -> Result<(), Error> {
    Decoder::new(r).decode(o)
}
