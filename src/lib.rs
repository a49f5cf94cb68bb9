//! A declarative decoder populating Rust structs from HTML documents.
//!
//! Gleaner matches a CSS selector declared on each struct field against a
//! parsed document, and converts the matched content into the field's value.
//! Nested structs are decoded from the subtree of their own match, `Vec`
//! fields collect every match in document order, and types may take over
//! conversion with hooks.
//!
//! Most users should begin with the functions and derive macro in the
//! [`avec`] module:
//!
//! ```
//! #[derive(Debug, Default, FromElement)]
//! struct Page {
//!     #[scrape("#name")]
//!     name: String,
//!     #[scrape("a", attr = "href")]
//!     url: String,
//! }
//!
//! let document = r#"<h1 id="name">Hello!</h1><a href="/about">About</a>"#;
//! let mut page = Page::default();
//! gleaner::avec::decode_slice(document.as_bytes(), &mut page)?;
//! ```
//!
//! If these prove insufficient, the rule compiler and tree walker are exposed
//! in the [`sans`] module.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `derive`: enable derive macros (default).

pub mod avec;
pub mod sans;
