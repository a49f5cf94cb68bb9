//! Conversion of extracted text into Rust scalars.

use thiserror::Error;

/// Extracted text could not be represented by the destination type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot convert `{value}` into a value of type `{target}`.")]
pub struct ConversionError {
    pub value: String,
    pub target: &'static str,
}

/// A type converted directly from extracted text.
pub trait Scalar: Sized {
    /// Name of the type, used in error messages.
    const NAME: &'static str;

    /// Convert text to this type, if it is representable.
    fn from_text(text: &str) -> Option<Self>;
}

/// Convert extracted text into a scalar.
pub fn convert<T: Scalar>(text: &str) -> Result<T, ConversionError> {
    T::from_text(text).ok_or_else(|| ConversionError {
        value: text.to_owned(),
        target: T::NAME,
    })
}

impl Scalar for String {
    const NAME: &'static str = "String";

    fn from_text(text: &str) -> Option<Self> {
        Some(text.to_owned())
    }
}

macro_rules! integer {
    ($($t:ident),*) => {
        $(
            /// Base 10, with an optional sign. Values outside the range of the
            /// type are rejected.
            impl Scalar for $t {
                const NAME: &'static str = stringify!($t);

                fn from_text(text: &str) -> Option<Self> {
                    text.parse().ok()
                }
            }
        )*
    };
}

integer!(i8, i16, i32, i64, i128, isize);
integer!(u8, u16, u32, u64, u128, usize);

macro_rules! float {
    ($($t:ident),*) => {
        $(
            /// Parsed at the precision of the type. Finite values too large for
            /// the type are rejected rather than rounded to infinity.
            impl Scalar for $t {
                const NAME: &'static str = stringify!($t);

                fn from_text(text: &str) -> Option<Self> {
                    let value: $t = text.parse().ok()?;

                    if value.is_infinite() && !is_infinity(text) {
                        None
                    } else {
                        Some(value)
                    }
                }
            }
        )*
    };
}

float!(f32, f64);

/// Whether text spells out an infinite value, as accepted by `str::parse`.
fn is_infinity(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}
