//! Property tests for parser invariants.

use loosemark_html::tokenizer::decode;
use loosemark_html::{Node, parse};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

#[quickcheck]
fn prop_input_without_tags_is_one_text_node(input: String) -> bool {
    let input: String = input.chars().filter(|&c| c != '<').collect();
    let nodes = parse(&input).unwrap();

    if input.is_empty() {
        nodes.is_empty()
    } else {
        nodes == [Node::text(decode(&input))]
    }
}

#[quickcheck]
fn prop_decode_is_idempotent(input: String) -> bool {
    let once = decode(&input).into_owned();
    decode(&once) == once
}

#[quickcheck]
fn prop_tag_names_are_case_insensitive(name: String) -> TestResult {
    let name: String = name.chars().filter(char::is_ascii_alphanumeric).collect();
    if name.is_empty() {
        return TestResult::discard();
    }

    let upper = parse(&format!("<{}></{}>", name.to_ascii_uppercase(), name)).unwrap();
    let lower = parse(&format!("<{0}></{0}>", name.to_ascii_lowercase())).unwrap();
    TestResult::from_bool(upper == lower && upper[0].name() == name.to_ascii_lowercase())
}

#[quickcheck]
fn prop_lenient_parse_only_fails_on_structured_values(input: String) -> bool {
    // Without `{` no attribute value can be structured.
    let input: String = input.chars().filter(|&c| c != '{').collect();
    parse(&input).is_ok()
}

#[quickcheck]
fn prop_text_is_never_lost_before_first_tag(prefix: String, rest: String) -> TestResult {
    let prefix: String = prefix.chars().filter(|&c| c != '<').collect();
    if prefix.is_empty() {
        return TestResult::discard();
    }
    let rest: String = rest.chars().filter(|&c| c != '{').collect();

    let nodes = parse(&format!("{prefix}<{rest}")).unwrap();
    TestResult::from_bool(nodes.first() == Some(&Node::text(decode(&prefix))))
}
