//! Compilation of field declarations into matching rules.

use std::{borrow::Cow, str::FromStr};

use once_cell::sync::OnceCell;
use scraper::{ElementRef, Selector};
use thiserror::Error;

/// Errors occurring while compiling a rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// The selector could not be parsed.
    #[error("Invalid selector `{selector}`: {message}.")]
    Selector { selector: String, message: String },
    /// The extraction descriptor names an unknown mode.
    #[error("Unknown extraction mode `{0}`.")]
    UnknownMode(String),
    /// Attribute extraction was requested without an attribute name.
    #[error("Attribute extraction requires an attribute name.")]
    MissingAttribute,
}

/// What to take from a matched element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Extract {
    /// The concatenated text of all descendant text nodes.
    #[default]
    Text,
    /// The value of the named attribute, or an empty string when absent.
    Attribute(String),
}

impl FromStr for Extract {
    type Err = RuleError;

    /// Parse an extraction descriptor of the form `mode[:detail]`.
    ///
    /// An empty mode selects [`Extract::Text`]. The detail runs to the end of
    /// the descriptor, so attribute names may themselves contain colons.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (mode, detail) = match s.split_once(':') {
            Some((mode, detail)) => (mode, Some(detail)),
            None => (s, None),
        };

        match mode {
            "" | "text" => Ok(Self::Text),
            "attr" => match detail {
                Some(name) if !name.is_empty() => Ok(Self::Attribute(name.to_owned())),
                _ => Err(RuleError::MissingAttribute),
            },
            _ => Err(RuleError::UnknownMode(mode.to_owned())),
        }
    }
}

impl Extract {
    /// Extract a value from an element.
    pub fn apply<'a>(&self, element: ElementRef<'a>) -> Cow<'a, str> {
        match self {
            Self::Text => {
                let mut texts = element.text();

                match (texts.next(), texts.next()) {
                    (None, _) => Cow::Borrowed(""),
                    (Some(only), None) => Cow::Borrowed(only),
                    (Some(first), Some(second)) => {
                        let mut buf = String::from(first);
                        buf.push_str(second);
                        buf.extend(texts);
                        Cow::Owned(buf)
                    }
                }
            }
            Self::Attribute(name) => Cow::Borrowed(element.value().attr(name).unwrap_or("")),
        }
    }
}

/// A compiled selector paired with an extraction mode.
///
/// Rules are immutable once compiled and may be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct Rule {
    selector: Option<Selector>,
    extract: Extract,
}

impl Rule {
    /// A rule matching every element and extracting its text.
    ///
    /// This seeds decoding at the root of a document.
    pub fn any() -> Self {
        Self::default()
    }

    /// Compile a selector and an extraction descriptor.
    ///
    /// An empty selector matches every element. See [`Extract`] for the
    /// descriptor format.
    pub fn compile(selector: &str, extract: &str) -> Result<Self, RuleError> {
        let selector = if selector.is_empty() {
            None
        } else {
            let compiled = Selector::parse(selector).map_err(|err| RuleError::Selector {
                selector: selector.to_owned(),
                message: err.to_string(),
            })?;

            Some(compiled)
        };

        Ok(Self {
            selector,
            extract: extract.parse()?,
        })
    }

    /// Whether an element qualifies for this rule.
    pub fn matches(&self, element: &ElementRef<'_>) -> bool {
        self.selector.as_ref().is_none_or(|s| s.matches(element))
    }

    /// Whether this rule matches every element.
    pub fn is_any(&self) -> bool {
        self.selector.is_none()
    }

    pub fn extract(&self) -> &Extract {
        &self.extract
    }

    /// Extract this rule's value from a matched element.
    pub fn value<'a>(&self, element: ElementRef<'a>) -> Cow<'a, str> {
        self.extract.apply(element)
    }
}

/// The declaration of a single record field, compiled on first use.
///
/// Derived implementations of [`FromElement`](crate::avec::FromElement) hold
/// one of these in a `static` per field. The outcome of compilation, including
/// a failure, is kept for the lifetime of the program.
#[derive(Debug)]
pub struct FieldRule {
    name: &'static str,
    selector: &'static str,
    extract: &'static str,
    rule: OnceCell<Result<Rule, RuleError>>,
}

impl FieldRule {
    pub const fn new(name: &'static str, selector: &'static str, extract: &'static str) -> Self {
        Self {
            name,
            selector,
            extract,
            rule: OnceCell::new(),
        }
    }

    /// Name of the declaring field.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Selector text, as declared.
    pub fn selector(&self) -> &'static str {
        self.selector
    }

    /// Extraction descriptor, as declared.
    pub fn extract(&self) -> &'static str {
        self.extract
    }

    /// Retrieve the compiled rule, compiling it if this is the first use.
    pub fn rule(&self) -> Result<&Rule, &RuleError> {
        self.rule
            .get_or_init(|| Rule::compile(self.selector, self.extract))
            .as_ref()
    }
}
