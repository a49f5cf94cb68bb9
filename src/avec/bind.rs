//! Binding of matched elements into values.

use std::borrow::Cow;

use scraper::ElementRef;

use crate::sans::{Rule, value};

use super::{Error, FromElement, Hook, Options, Shape};

/// An element matched by a rule, with the settings of the running decode.
#[derive(Debug, Clone, Copy)]
pub struct Match<'a> {
    element: ElementRef<'a>,
    rule: &'a Rule,
    options: &'a Options,
}

impl<'a> Match<'a> {
    pub fn new(element: ElementRef<'a>, rule: &'a Rule, options: &'a Options) -> Self {
        Self {
            element,
            rule,
            options,
        }
    }

    /// The matched element, which scopes any nested record.
    pub fn element(&self) -> ElementRef<'a> {
        self.element
    }

    pub fn rule(&self) -> &'a Rule {
        self.rule
    }

    pub fn options(&self) -> &'a Options {
        self.options
    }

    /// The value extracted from the element, trimmed if configured.
    pub fn value(&self) -> Cow<'a, str> {
        let value = self.rule.value(self.element);

        if !self.options.trim_whitespace {
            return value;
        }

        match value {
            Cow::Borrowed(s) => Cow::Borrowed(s.trim()),
            Cow::Owned(s) if s.trim().len() == s.len() => Cow::Owned(s),
            Cow::Owned(s) => Cow::Owned(s.trim().to_owned()),
        }
    }
}

/// Bind a match into a target, dispatching to its hook if it declares one.
pub fn bind<T: FromElement>(target: &mut T, m: &Match<'_>) -> Result<(), Error> {
    match target.hook() {
        Hook::Html(hook) => hook.from_html(m.element()).map_err(Error::Hook),
        Hook::Text(hook) => hook.from_text(&m.value()).map_err(Error::Hook),
        Hook::Binary(hook) => hook.from_binary(m.value().as_bytes()).map_err(Error::Hook),
        Hook::None => target.from_match(m),
    }
}

impl FromElement for String {
    const SHAPE: Shape = Shape::Scalar;

    fn from_match(&mut self, m: &Match<'_>) -> Result<(), Error> {
        *self = m.value().into_owned();
        Ok(())
    }
}

macro_rules! scalar {
    ($($t:ident),*) => {
        $(
            impl FromElement for $t {
                const SHAPE: Shape = Shape::Scalar;

                fn from_match(&mut self, m: &Match<'_>) -> Result<(), Error> {
                    *self = value::convert(&m.value())?;
                    Ok(())
                }
            }
        )*
    };
}

scalar!(i8, i16, i32, i64, i128, isize);
scalar!(u8, u16, u32, u64, u128, usize);
scalar!(f32, f64);

// Recognised, but without a conversion. A hook is needed to bind these.
macro_rules! unset {
    ($($t:ident),*) => {
        $(
            impl FromElement for $t {
                const SHAPE: Shape = Shape::Scalar;

                fn from_match(&mut self, _: &Match<'_>) -> Result<(), Error> {
                    log::trace!("No conversion into `{}`; leaving it unset.", stringify!($t));
                    Ok(())
                }
            }
        )*
    };
}

unset!(bool, char);

/// Allocated with [`Default`] on the first match, then reused.
impl<T: FromElement + Default> FromElement for Option<T> {
    const SHAPE: Shape = Shape::Pointer;
    const COLLECT: bool = T::COLLECT;

    fn from_match(&mut self, m: &Match<'_>) -> Result<(), Error> {
        bind(self.get_or_insert_with(T::default), m)
    }
}

impl<T: FromElement> FromElement for Box<T> {
    const SHAPE: Shape = Shape::Pointer;
    const COLLECT: bool = T::COLLECT;

    fn from_match(&mut self, m: &Match<'_>) -> Result<(), Error> {
        bind(&mut **self, m)
    }
}

/// Each match is bound into a fresh element, appended once bound.
impl<T: FromElement + Default> FromElement for Vec<T> {
    const SHAPE: Shape = Shape::Sequence;
    const COLLECT: bool = true;

    fn from_match(&mut self, m: &Match<'_>) -> Result<(), Error> {
        let mut element = T::default();
        bind(&mut element, m)?;
        self.push(element);
        Ok(())
    }
}
