use gleaner::sans::{Rule, walk};
use scraper::{ElementRef, Html, Selector};

const DOCUMENT: &str = r#"
<div id="root">
  <p class="a">one</p>
  <section>
    <p class="a">two <span class="a">inner</span></p>
  </section>
  <p class="a">three</p>
</div>
<p class="a">outside</p>
"#;

fn root(html: &Html) -> ElementRef<'_> {
    html.select(&Selector::parse("#root").unwrap()).next().unwrap()
}

fn texts<'a>(elements: impl Iterator<Item = ElementRef<'a>>) -> Vec<String> {
    elements.map(|e| e.text().collect()).collect()
}

#[test]
fn first_match_in_document_order() {
    let html = Html::parse_document(DOCUMENT);
    let rule = Rule::compile(".a", "").unwrap();

    let found = walk::first(root(&html), &rule).unwrap();
    assert_eq!(found.text().collect::<String>(), "one");
}

#[test]
fn all_matches_in_document_order() {
    let html = Html::parse_document(DOCUMENT);
    let rule = Rule::compile(".a", "").unwrap();

    let found = texts(walk::matches(root(&html), &rule));
    assert_eq!(found, ["one", "two inner", "three"]);
}

#[test]
fn matches_do_not_descend_into_a_match() {
    let html = Html::parse_document(DOCUMENT);
    let rule = Rule::compile(".a", "").unwrap();

    let names: Vec<_> = walk::matches(root(&html), &rule)
        .map(|e| e.value().name().to_owned())
        .collect();

    // The nested `span.a` sits inside the second `p.a`.
    assert_eq!(names, ["p", "p", "p"]);
}

#[test]
fn matches_stay_within_scope() {
    let html = Html::parse_document(DOCUMENT);
    let rule = Rule::compile("p", "").unwrap();

    let found = texts(walk::matches(root(&html), &rule));
    assert!(!found.iter().any(|t| t == "outside"));

    let everywhere = texts(walk::matches(html.root_element(), &rule));
    assert_eq!(everywhere.last().map(String::as_str), Some("outside"));
}

#[test]
fn scope_is_tested_first() {
    let html = Html::parse_document(DOCUMENT);
    let scope = root(&html);

    let found = walk::first(scope, &Rule::any()).unwrap();
    assert_eq!(found, scope);

    let rule = Rule::compile("div", "").unwrap();
    assert_eq!(walk::matches(scope, &rule).collect::<Vec<_>>(), [scope]);
}

#[test]
fn no_match_is_empty() {
    let html = Html::parse_document(DOCUMENT);
    let rule = Rule::compile("table", "").unwrap();

    assert!(walk::first(root(&html), &rule).is_none());

    let mut matches = walk::matches(root(&html), &rule);
    assert!(matches.next().is_none());
    assert!(matches.next().is_none());
}
