//! Decoding machinery independent of any document source.
//!
//! This module is intended for applications that need to drive matching and
//! conversion themselves, for example to decode from a subtree selected by
//! other means. See [`crate::avec`] for implementations covering common
//! decoding patterns.
//!
//! # Architecture
//!
//! Decoding a field happens in three steps, each owned by a submodule:
//!
//! - [`rule`]: a field's selector text and extraction descriptor are compiled
//! into an immutable [`Rule`]. A [`rule::FieldRule`] caches this compilation,
//! so every later decode of the same field reuses it.
//!
//! - [`walk`]: a [`Rule`] is run against a scoping element in pre-order. A node
//! that matches is reported and its descendants are not searched further for
//! the same rule. Searching continues with the next subtree, so the walker can
//! report either the first match or every independent match in document order.
//!
//! - [`value`]: text extracted from a match is converted into a Rust scalar.
//!
//! Binding matched elements into nested records, pointers and sequences is
//! handled by [`crate::avec`].

pub mod rule;
pub mod value;
pub mod walk;

pub use rule::Rule;
