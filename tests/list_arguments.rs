//! Integration coverage for the list-argument analyzer and its
//! interaction with the matcher and result assembler, end-to-end.

use docargs::{parse, Value};

fn argv(words: &[&str]) -> Vec<String> {
    words.iter().map(|s| s.to_string()).collect()
}

const LIST_DOC: &str = "Usage: prog [<name> <name>]\n";

#[test]
fn two_occurrences_accumulate_in_argv_order() {
    let b = parse(LIST_DOC, &argv(&["10", "20"])).unwrap();
    assert_eq!(
        b.get("<name>"),
        Some(&Value::List(vec!["10".to_string(), "20".to_string()]))
    );
}

#[test]
fn single_occurrence_still_yields_a_one_element_list() {
    let b = parse(LIST_DOC, &argv(&["10"])).unwrap();
    assert_eq!(b.get("<name>"), Some(&Value::List(vec!["10".to_string()])));
}

#[test]
fn zero_occurrences_yields_an_empty_list_not_null() {
    let b = parse(LIST_DOC, &argv(&[])).unwrap();
    assert_eq!(b.get("<name>"), Some(&Value::List(Vec::new())));
}

#[test]
fn one_or_more_ellipsis_argument_is_also_list_typed() {
    let b = parse("Usage: prog <file>...\n", &argv(&["a", "b", "c"])).unwrap();
    assert_eq!(
        b.get("<file>"),
        Some(&Value::List(vec!["a".to_string(), "b".to_string(), "c".to_string()]))
    );
}

#[test]
fn non_repeated_argument_stays_a_plain_scalar() {
    let b = parse("Usage: prog <a> <b>\n", &argv(&["x", "y"])).unwrap();
    assert_eq!(b.get("<a>"), Some(&Value::Str("x".to_string())));
    assert_eq!(b.get("<b>"), Some(&Value::Str("y".to_string())));
}

/// The normalization is a narrow over-approximation, preserved verbatim
/// — a name repeated in one `Either` branch forces list-typing on every
/// occurrence sharing that name, even in a branch where it appears only
/// once.
#[test]
fn either_branch_over_approximation_is_preserved() {
    let b = parse("Usage: prog (<name> <name> | <name>)\n", &argv(&["only"])).unwrap();
    assert_eq!(b.get("<name>"), Some(&Value::List(vec!["only".to_string()])));
}
