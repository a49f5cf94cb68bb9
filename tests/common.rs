use std::io::{self, Read};

use gleaner::{
    avec::{self, Decoder, Error, FromElement, FromText, Hook, HookError, Match, Options, Shape},
    sans::rule::FieldRule,
};
use scraper::{Html, Selector};

const DOCUMENT: &str = r#"
<nav>
  <a href="/one">One</a>
  <a href="/two">Two</a>
</nav>
<main><a href="/three">Three</a></main>
"#;

/// A record implemented by hand rather than derived.
#[derive(Debug, Default)]
struct Links {
    hrefs: Vec<String>,
    count: usize,
}

impl FromElement for Links {
    const SHAPE: Shape = Shape::Record;

    fn from_match(&mut self, m: &Match<'_>) -> Result<(), Error> {
        static HREFS: FieldRule = FieldRule::new("hrefs", "a", "attr:href");

        avec::decode_field(&mut self.hrefs, &HREFS, m)?;
        self.count = self.hrefs.len();
        Ok(())
    }
}

/// A scalar converted by a text hook.
#[derive(Debug, Default, PartialEq)]
struct Upper(String);

impl FromText for Upper {
    fn from_text(&mut self, text: &str) -> Result<(), HookError> {
        self.0 = text.to_uppercase();
        Ok(())
    }
}

impl FromElement for Upper {
    const SHAPE: Shape = Shape::Scalar;

    fn hook(&mut self) -> Hook<'_> {
        Hook::Text(self)
    }

    fn from_match(&mut self, _: &Match<'_>) -> Result<(), Error> {
        unreachable!("conversion is taken over by the text hook")
    }
}

#[derive(Debug, Default)]
struct Shouting {
    words: Vec<Upper>,
}

impl FromElement for Shouting {
    const SHAPE: Shape = Shape::Record;

    fn from_match(&mut self, m: &Match<'_>) -> Result<(), Error> {
        static WORDS: FieldRule = FieldRule::new("words", "a", "");
        avec::decode_field(&mut self.words, &WORDS, m)
    }
}

#[test]
fn decode_slice_links() {
    let mut links = Links::default();
    avec::decode_slice(DOCUMENT.as_bytes(), &mut links).unwrap();

    assert_eq!(links.hrefs, ["/one", "/two", "/three"]);
    assert_eq!(links.count, 3);
}

#[test]
fn decode_reader_links() {
    let mut links = Links::default();
    avec::decode_reader(&mut DOCUMENT.as_bytes(), &mut links).unwrap();

    assert_eq!(links.hrefs, ["/one", "/two", "/three"]);
}

#[test]
fn decode_text_hook() {
    let mut shouting = Shouting::default();
    avec::decode_slice(DOCUMENT.as_bytes(), &mut shouting).unwrap();

    assert_eq!(
        shouting.words,
        [Upper("ONE".into()), Upper("TWO".into()), Upper("THREE".into())]
    );
}

#[test]
fn decode_parsed_document() {
    let html = Html::parse_document(DOCUMENT);
    let mut links = Links::default();
    avec::decode_html(&html, &mut links, &Options::default()).unwrap();

    assert_eq!(links.count, 3);
}

#[test]
fn decode_element_scope() {
    let html = Html::parse_document(DOCUMENT);
    let nav = html.select(&Selector::parse("nav").unwrap()).next().unwrap();

    let mut links = Links::default();
    avec::decode_element(nav, &mut links, &Options::default()).unwrap();

    assert_eq!(links.hrefs, ["/one", "/two"]);
}

#[test]
fn decoder_reads_to_end() {
    let mut decoder = Decoder::new(DOCUMENT.as_bytes());

    let mut first = Links::default();
    decoder.decode(&mut first).unwrap();
    assert_eq!(first.count, 3);

    // The stream is exhausted, leaving an empty document.
    let mut second = Links::default();
    decoder.decode(&mut second).unwrap();
    assert_eq!(second.count, 0);
    assert!(decoder.into_inner().is_empty());
}

#[test]
fn decoder_options() {
    let decoder = Decoder::new(io::empty()).trim_whitespace(true);
    assert_eq!(decoder.options(), &Options::new().trim_whitespace(true));

    let decoder = Decoder::with_options(io::empty(), Options::default());
    assert!(!decoder.options().trim_whitespace);
}

#[test]
fn reject_non_record_before_reading() {
    let mut decoder = Decoder::new(DOCUMENT.as_bytes());

    let mut count = 7_u8;
    let err = decoder.decode(&mut count).unwrap_err();

    assert!(matches!(
        err,
        Error::InvalidTarget {
            type_name: "u8",
            shape: Shape::Scalar
        }
    ));
    assert_eq!(
        err.to_string(),
        "Cannot decode a document into `u8`, which is a scalar rather than a record."
    );
    assert_eq!(count, 7);
    assert_eq!(decoder.into_inner().len(), DOCUMENT.len());
}

#[test]
fn reject_sequence_and_pointer_targets() {
    let mut many: Vec<Links> = vec![];
    let err = avec::decode_slice(DOCUMENT.as_bytes(), &mut many).unwrap_err();
    assert!(matches!(err, Error::InvalidTarget { shape: Shape::Sequence, .. }));
    assert!(many.is_empty());

    let mut maybe: Option<Links> = None;
    let err = avec::decode_slice(DOCUMENT.as_bytes(), &mut maybe).unwrap_err();
    assert!(matches!(err, Error::InvalidTarget { shape: Shape::Pointer, .. }));
    assert!(maybe.is_none());
}

#[test]
fn replace_invalid_utf8() {
    let mut links = Links::default();
    let document = b"<!-- caf\xe9 --><a href=\"/\xff\">x</a><a href=\"/two\">y</a>";
    avec::decode_slice(document, &mut links).unwrap();

    assert_eq!(links.hrefs, ["/\u{fffd}", "/two"]);
}

struct Unplugged;

impl Read for Unplugged {
    fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::other("unplugged"))
    }
}

#[test]
fn surface_reader_errors() {
    let mut links = Links::default();
    let err = Decoder::new(Unplugged).decode(&mut links).unwrap_err();

    assert!(matches!(&err, Error::Io(io) if io.to_string() == "unplugged"));
}
