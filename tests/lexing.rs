//! Integration coverage for the argv lexer, exercised through the public
//! `docargs::token` module rather than `docargs::parse` so a lexing
//! regression doesn't get masked by the matcher's backtracking.

use docargs::catalog::{Arity, Catalog, OptionProto};
use docargs::token::{lex, Arg, LexMode};

fn argv(words: &[&str]) -> Vec<String> {
    words.iter().map(|s| s.to_string()).collect()
}

fn catalog_with(protos: Vec<OptionProto>) -> Catalog {
    let mut c = Catalog::new();
    for p in protos {
        c.push_unchecked(p);
    }
    c
}

#[test]
fn bare_single_dash_is_always_positional() {
    let mut cat = catalog_with(vec![OptionProto::new(Some('d'), None, Arity::Zero)]);
    let args = lex(&argv(&["-"]), &mut cat, LexMode::Argv).unwrap();
    assert_eq!(args.items(), &[Arg::Word("-".to_string())]);
}

#[test]
fn double_dash_makes_following_dash_prefixed_word_positional() {
    let mut cat = catalog_with(vec![OptionProto::new(Some('o'), None, Arity::Zero)]);
    let args = lex(&argv(&["--", "-o", "--flag"]), &mut cat, LexMode::Argv).unwrap();
    assert_eq!(
        args.items(),
        &[
            Arg::DashDash,
            Arg::Word("-o".to_string()),
            Arg::Word("--flag".to_string()),
        ]
    );
}

#[test]
fn attached_empty_value_on_long_option() {
    let mut cat = catalog_with(vec![OptionProto::new(None, Some("long".into()), Arity::One)]);
    let args = lex(&argv(&["--long="]), &mut cat, LexMode::Argv).unwrap();
    match &args.items()[0] {
        Arg::Option(r) => assert_eq!(r.value.as_deref(), Some("")),
        other => panic!("expected option, got {other:?}"),
    }
}

#[test]
fn short_cluster_stops_at_first_value_taking_flag() {
    let mut cat = catalog_with(vec![
        OptionProto::new(Some('a'), None, Arity::Zero),
        OptionProto::new(Some('b'), None, Arity::One),
        OptionProto::new(Some('c'), None, Arity::Zero),
    ]);
    // -c after -b's value-taking slot is swallowed into -b's value, not
    // parsed as a further flag in the same cluster.
    let args = lex(&argv(&["-abc"]), &mut cat, LexMode::Argv).unwrap();
    assert_eq!(args.len(), 2);
    match &args.items()[1] {
        Arg::Option(r) => {
            assert_eq!(r.short, Some('b'));
            assert_eq!(r.value.as_deref(), Some("c"));
        }
        other => panic!("expected option, got {other:?}"),
    }
}

#[test]
fn unrecognized_short_option_is_user_error() {
    let mut cat = Catalog::new();
    let err = lex(&argv(&["-z"]), &mut cat, LexMode::Argv).unwrap_err();
    assert_eq!(err, docargs::UserError::UnrecognizedShortOption('z'));
}

#[test]
fn option_requires_argument_at_end_of_argv() {
    let mut cat = catalog_with(vec![OptionProto::new(None, Some("out".into()), Arity::One)]);
    let err = lex(&argv(&["--out"]), &mut cat, LexMode::Argv).unwrap_err();
    assert_eq!(
        err,
        docargs::UserError::OptionRequiresArgument("--out".to_string())
    );
}

#[test]
fn usage_text_mode_never_fails_on_unknown_options() {
    let mut cat = Catalog::new();
    let args = lex(&argv(&["--unknown", "-z"]), &mut cat, LexMode::UsageText).unwrap();
    assert_eq!(args.len(), 2);
    assert_eq!(cat.len(), 2);
}
