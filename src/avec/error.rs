use thiserror::Error;

use crate::sans::{rule::RuleError, value::ConversionError};

use super::{HookError, Shape};

/// Errors occurring while decoding a document.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the supplied reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The decode target is not a record.
    #[error("Cannot decode a document into `{type_name}`, which is a {shape} rather than a record.")]
    InvalidTarget {
        type_name: &'static str,
        shape: Shape,
    },
    /// A field's declaration could not be compiled.
    #[error("Invalid declaration for field `{field}` (selector `{selector}`, extract `{extract}`): {source}")]
    Rule {
        field: &'static str,
        selector: &'static str,
        extract: &'static str,
        source: RuleError,
    },
    /// Extracted text could not be converted.
    #[error(transparent)]
    Convert(#[from] ConversionError),
    /// A hook reported a failure.
    #[error("Hook failed: {0}")]
    Hook(#[source] HookError),
    /// Binding a field failed.
    #[error("Failed to decode field `{field}` (selector `{selector}`, extract `{extract}`): {source}")]
    Field {
        field: &'static str,
        selector: &'static str,
        extract: &'static str,
        source: Box<Error>,
    },
}

impl Error {
    /// The error that caused this one, past any field context.
    pub fn innermost(&self) -> &Error {
        let mut err = self;

        while let Self::Field { source, .. } = err {
            err = &**source;
        }

        err
    }

    /// Names of the fields leading to the error, outermost first.
    pub fn path(&self) -> Vec<&'static str> {
        let mut path = vec![];
        let mut err = self;

        while let Self::Field { field, source, .. } = err {
            path.push(*field);
            err = &**source;
        }

        path
    }
}
