//! Convenience interfaces for common decoding patterns.
//!
//! The functions in this module decode HTML documents from slices, readers and
//! parsed trees, publishing to the [`FromElement`] trait.
//!
//! In most cases (when records are of a known shape), this trait can be
//! derived. See the [`FromElement`](macro@FromElement) macro for details.
//!
//! Every decode is a single depth-first pass that stops at the first error.
//! There is no rollback: when an error is returned, fields bound before the
//! failure keep their new values.

pub mod bind;
pub mod error;
pub mod reader;
pub mod slice;
pub mod tree;

use std::fmt;

use scraper::ElementRef;

pub use bind::{Match, bind};
pub use error::Error;
pub use reader::{Decoder, decode as decode_reader};
pub use slice::decode as decode_slice;
pub use tree::{decode_element, decode_field, decode_html};

/// Derive [`FromElement`] for a struct representing a record.
///
/// _Requires Cargo feature `derive`._
///
/// # Examples
///
/// To bind a field, add the `scrape` attribute with a CSS selector. The field
/// receives the text content of the first matching element. Fields without
/// the attribute are left at their default value.
///
/// ```
/// #[derive(Debug, Default, FromElement)]
/// struct Page {
///     #[scrape("#name")]
///     name: String,
///     #[scrape("a", attr = "href")]
///     url: String,
/// }
/// ```
///
/// An attribute value is extracted with `attr = "name"`, or equivalently with
/// the raw descriptor `extract = "attr:name"`. An empty selector (or a bare
/// `#[scrape]`) matches the scoping element itself.
///
/// A `Vec<T>` field receives every match, in document order. A nested record
/// is decoded from the subtree of its own match only, so its selectors never
/// reach outside it.
///
/// ```
/// #[derive(Debug, Default, FromElement)]
/// struct Catalog {
///     #[scrape("ul.products > li")]
///     products: Vec<Product>,
/// }
///
/// #[derive(Debug, Default, FromElement)]
/// struct Product {
///     #[scrape(".title")]
///     title: String,
///     #[scrape(".price")]
///     price: Option<f64>,
/// }
/// ```
///
/// To take over conversion, implement a hook trait and declare it on the
/// type. With several declared, `html` is preferred over `text`, and `text`
/// over `binary`.
///
/// ```
/// #[derive(Debug, Default, FromElement)]
/// #[scrape(text)]
/// struct Name {
///     first: String,
///     last: String,
/// }
///
/// impl FromText for Name {
///     fn from_text(&mut self, text: &str) -> Result<(), HookError> {
///         let (last, first) = text.split_once(", ").ok_or("expected `last, first`")?;
///         self.first = first.to_owned();
///         self.last = last.to_owned();
///         Ok(())
///     }
/// }
/// ```
#[cfg(feature = "derive")]
pub use gleaner_derive::FromElement;

/// The error type returned by hooks.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// The structural category of a binding target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// A value converted from extracted text.
    Scalar,
    /// An indirection to another target, allocated on first match.
    Pointer,
    /// A struct whose fields carry their own rules.
    Record,
    /// A collection receiving one element per match.
    Sequence,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Scalar => "scalar",
            Self::Pointer => "pointer",
            Self::Record => "record",
            Self::Sequence => "sequence",
        })
    }
}

/// The conversion a type takes over from the decoder.
///
/// A type declares a single capability, fixed by its implementation of
/// [`FromElement::hook`].
pub enum Hook<'a> {
    /// No hook; structural or scalar binding applies.
    None,
    /// Receives the matched element and its subtree.
    Html(&'a mut dyn FromHtml),
    /// Receives the extracted text.
    Text(&'a mut dyn FromText),
    /// Receives the extracted text as bytes.
    Binary(&'a mut dyn FromBinary),
}

/// Receive a matched element.
///
/// The element is passed as found in the document; whitespace trimming does
/// not apply.
pub trait FromHtml {
    fn from_html(&mut self, element: ElementRef<'_>) -> Result<(), HookError>;
}

/// Receive the text extracted from a matched element.
pub trait FromText {
    fn from_text(&mut self, text: &str) -> Result<(), HookError>;
}

/// Receive the text extracted from a matched element, as bytes.
pub trait FromBinary {
    fn from_binary(&mut self, bytes: &[u8]) -> Result<(), HookError>;
}

/// Bind matched elements into a value.
///
/// Implementations are provided for scalars, `String`, `Option<T>`, `Box<T>`
/// and `Vec<T>`. See the [`FromElement`](macro@FromElement) derive macro for
/// records.
pub trait FromElement {
    /// Structural category of this type.
    const SHAPE: Shape;

    /// Whether a field of this type receives every match rather than the
    /// first.
    const COLLECT: bool = false;

    /// The hook taking over conversion for this type, if any.
    fn hook(&mut self) -> Hook<'_> {
        Hook::None
    }

    /// Bind a match without consulting hooks.
    ///
    /// Use [`bind`] to respect the hook declared by the type.
    fn from_match(&mut self, m: &Match<'_>) -> Result<(), Error>;
}

/// Settings applied uniformly to every extracted value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Remove leading and trailing whitespace from extracted text before it is
    /// converted or passed to a text or binary hook.
    pub trim_whitespace: bool,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trim_whitespace(mut self, trim: bool) -> Self {
        self.trim_whitespace = trim;
        self
    }
}
