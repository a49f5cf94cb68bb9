//! Pre-order search of a document tree for elements matching a rule.

use std::iter::FusedIterator;

use either::Either::{Left, Right};
use scraper::ElementRef;

use super::rule::Rule;

/// Iterator over the elements matching a rule, in document order.
///
/// The scoping element itself is tested first, followed by its descendants in
/// pre-order. Once an element matches, its descendants are skipped: a match is
/// never nested inside another match of the same rule. Elements outside the
/// scoping element are never visited.
#[derive(Debug, Clone)]
pub struct Matches<'a, 'r> {
    rule: &'r Rule,
    // Elements waiting to be visited, next on top.
    pending: Vec<ElementRef<'a>>,
}

/// Search a subtree for every independent match of a rule.
pub fn matches<'a, 'r>(scope: ElementRef<'a>, rule: &'r Rule) -> Matches<'a, 'r> {
    Matches {
        rule,
        pending: vec![scope],
    }
}

/// Search a subtree for the first match of a rule.
pub fn first<'a>(scope: ElementRef<'a>, rule: &Rule) -> Option<ElementRef<'a>> {
    matches(scope, rule).next()
}

impl<'a> Iterator for Matches<'a, '_> {
    type Item = ElementRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(element) = self.pending.pop() {
            let successor = if self.rule.matches(&element) {
                Left(element)
            } else {
                Right(element.children().filter_map(ElementRef::wrap))
            };

            match successor {
                Left(found) => return Some(found),
                // Push in reverse so the first child is visited next.
                Right(children) => self.pending.extend(children.rev()),
            }
        }

        None
    }
}

impl FusedIterator for Matches<'_, '_> {}
