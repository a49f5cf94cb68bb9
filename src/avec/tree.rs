//! Tree-based decoder implementation.

use std::any::type_name;

use scraper::{ElementRef, Html};

use crate::sans::{Rule, rule::FieldRule, walk};

use super::{Error, FromElement, Match, Options, Shape, bind};

/// Decode a parsed document, publishing to a record.
///
/// This method is also re-exported as `gleaner::avec::decode_html`.
///
/// On error, the target may have been partially updated.
pub fn decode_html<T: FromElement>(
    html: &Html,
    target: &mut T,
    options: &Options,
) -> Result<(), Error> {
    if !html.errors.is_empty() {
        log::debug!("Parser recovered from {} markup errors.", html.errors.len());
    }

    decode_element(html.root_element(), target, options)
}

/// Decode the subtree of an element, publishing to a record.
///
/// The element is the scoping root: rules of the target's fields are tested
/// against it and its descendants only.
///
/// On error, the target may have been partially updated.
pub fn decode_element<T: FromElement>(
    root: ElementRef<'_>,
    target: &mut T,
    options: &Options,
) -> Result<(), Error> {
    ensure_record::<T>()?;

    log::debug!("Decoding `{}` from <{}>.", type_name::<T>(), root.value().name());

    let rule = Rule::any();
    bind(target, &Match::new(root, &rule, options))
}

/// Decode a single field of a record from the scope of the record's match.
///
/// Derived implementations of [`FromElement`] call this once per declared
/// field, in declaration order. A field without a match is left unchanged.
pub fn decode_field<T: FromElement>(
    target: &mut T,
    field: &FieldRule,
    scope: &Match<'_>,
) -> Result<(), Error> {
    let rule = field.rule().map_err(|source| Error::Rule {
        field: field.name(),
        selector: field.selector(),
        extract: field.extract(),
        source: source.clone(),
    })?;

    let options = scope.options();
    let mut matches = walk::matches(scope.element(), rule);

    let within = |err| Error::Field {
        field: field.name(),
        selector: field.selector(),
        extract: field.extract(),
        source: Box::new(err),
    };

    if T::COLLECT {
        let mut count = 0;

        for element in matches {
            bind(target, &Match::new(element, rule, options)).map_err(within)?;
            count += 1;
        }

        log::trace!("Field `{}` collected {count} matches.", field.name());
    } else if let Some(element) = matches.next() {
        log::trace!("Field `{}` matched <{}>.", field.name(), element.value().name());
        bind(target, &Match::new(element, rule, options)).map_err(within)?;
    } else {
        log::trace!("Field `{}` found no match.", field.name());
    }

    Ok(())
}

/// Reject targets that are not records, before any traversal.
pub(crate) fn ensure_record<T: FromElement>() -> Result<(), Error> {
    match T::SHAPE {
        Shape::Record => Ok(()),
        shape => Err(Error::InvalidTarget {
            type_name: type_name::<T>(),
            shape,
        }),
    }
}
