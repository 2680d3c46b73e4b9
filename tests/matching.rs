//! Integration coverage for the frontier matcher, driven through
//! `docargs::parse` so lexing, compilation and traversal are all exercised
//! together the way a real caller would use them.

use docargs::{parse, Error, UserError, Value};

fn argv(words: &[&str]) -> Vec<String> {
    words.iter().map(|s| s.to_string()).collect()
}

const EITHER_DOC: &str = "\
Usage: prog (-a|-b)

Options:
  -a  a
  -b  b
";

#[test]
fn either_branch_left_bias_picks_first_matching_alternative() {
    let b = parse(EITHER_DOC, &argv(&["-a"])).unwrap();
    assert_eq!(b.get("-a"), Some(&Value::Bool(true)));
    assert_eq!(b.get("-b"), Some(&Value::Bool(false)));
}

#[test]
fn either_branch_rejects_both_flags_at_once() {
    let err = parse(EITHER_DOC, &argv(&["-a", "-b"])).unwrap_err();
    assert_eq!(err, Error::User(UserError::NoMatch));
}

#[test]
fn short_cluster_with_attached_value_binds_through_the_full_pipeline() {
    let doc = "\
Usage: prog [-a] [-r] [-m <msg>]

Options:
  -a  a
  -r  r
  -m <msg>  a message
";
    let b = parse(doc, &argv(&["-armyourass"])).unwrap();
    assert_eq!(b.get("-a"), Some(&Value::Bool(true)));
    assert_eq!(b.get("-r"), Some(&Value::Bool(true)));
    assert_eq!(b.get("-m"), Some(&Value::Str("yourass".to_string())));
}

#[test]
fn long_prefix_ambiguous_between_two_declared_options() {
    let doc = "\
Usage: prog [--version] [--verbose]

Options:
  --version  show version
  --verbose  be noisy
";
    let err = parse(doc, &argv(&["--ver"])).unwrap_err();
    assert!(err.is_user_error());
}

#[test]
fn long_prefix_unambiguous_resolves_to_intended_option() {
    let doc = "\
Usage: prog [--version] [--verbose]

Options:
  --version  show version
  --verbose  be noisy
";
    let b = parse(doc, &argv(&["--verb"])).unwrap();
    assert_eq!(b.get("--verbose"), Some(&Value::Bool(true)));
    assert_eq!(b.get("--version"), Some(&Value::Bool(false)));
}

#[test]
fn double_dash_sentinel_then_dash_prefixed_positional() {
    let doc = "\
Usage: prog [-o] [--] <arg>

Options:
  -o  o
";
    let b = parse(doc, &argv(&["--", "-o"])).unwrap();
    assert_eq!(b.get("-o"), Some(&Value::Bool(false)));
    assert_eq!(b.get("<arg>"), Some(&Value::Str("-o".to_string())));
    assert_eq!(b.get("--"), Some(&Value::Bool(true)));
}

#[test]
fn extra_trailing_argv_with_no_matching_branch_is_user_error() {
    let err = parse("Usage: prog", &argv(&["extra"])).unwrap_err();
    assert_eq!(err, Error::User(UserError::NoMatch));
}

#[test]
fn empty_usage_and_empty_argv_matches_with_an_empty_map() {
    let b = parse("Usage: prog", &argv(&[])).unwrap();
    assert!(b.is_empty());
}

#[test]
fn any_options_leaf_swallows_all_remaining_options_anywhere() {
    let doc = "\
Usage: prog options <name>

Options:
  -v  verbose
  -d  debug
";
    let b = parse(doc, &argv(&["-v", "-d", "file.txt"])).unwrap();
    assert_eq!(b.get("<name>"), Some(&Value::Str("file.txt".to_string())));
    assert_eq!(b.get("-v"), Some(&Value::Bool(true)));
    assert_eq!(b.get("-d"), Some(&Value::Bool(true)));
}
