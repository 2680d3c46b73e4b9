//! Integration coverage for usage-block extraction, pattern lexing/parsing
//! and NFA compilation, exercised end-to-end from a raw document through
//! to a compiled graph.

use docargs::ast::{compile_pattern, Pattern, PatternLeaf};
use docargs::catalog::Catalog;
use docargs::nfa::{compile, Node};
use docargs::usage::{extract_usage_block, formal_usage};
use docargs::LanguageError;

#[test]
fn usage_block_stops_at_first_blank_line() {
    let doc = "\
Usage: prog [-v]

Options:
  -v  be noisy
";
    let block = extract_usage_block(doc).unwrap();
    assert_eq!(block, "Usage: prog [-v]");
}

#[test]
fn program_name_is_textual_anchor_not_argv0() {
    // The program name token need not match any real binary name; it only
    // has to repeat so formal_usage can fold the repeats into alternation.
    let block = "Usage:\n  widget new <name>\n  widget remove <name>";
    let formal = formal_usage(block).unwrap();
    assert_eq!(formal, "( new <name> ) | ( remove <name> )");
}

#[test]
fn nested_optional_distributes_over_repeated_argument_names() {
    // Parser-side grouping: [<name> <name>] must compile so each
    // occurrence is independently optional, not an all-or-nothing pair.
    let mut catalog = Catalog::new();
    let pattern = compile_pattern("Usage: prog [<name> <name>]", &mut catalog).unwrap();
    match pattern {
        Pattern::Optional(children) => {
            assert_eq!(children.len(), 2);
            assert!(children
                .iter()
                .all(|c| matches!(c, Pattern::Leaf(PatternLeaf::Argument { .. }))));
        }
        other => panic!("expected a flat two-child Optional, got {other:?}"),
    }
}

#[test]
fn unknown_long_option_in_usage_text_is_language_error() {
    // A long option name mentioned in the usage text but declared
    // nowhere else auto-registers rather than failing — this only becomes
    // a language error when it contradicts an existing declaration, tested
    // separately in catalog.rs. Here we confirm the happy path registers.
    let mut catalog = Catalog::new();
    compile_pattern("Usage: prog --speed=<kn>", &mut catalog).unwrap();
    assert_eq!(catalog.len(), 1);
    assert!(catalog.find_exact_long("speed").is_some());
}

#[test]
fn trailing_garbage_after_pattern_is_language_error() {
    let mut catalog = Catalog::new();
    let err = compile_pattern("Usage: prog <a> )", &mut catalog).unwrap_err();
    assert_eq!(err, LanguageError::UnbalancedBracket);
}

#[test]
fn every_compiled_path_reaches_end_sentinel() {
    let mut catalog = Catalog::new();
    let pattern = compile_pattern(
        "Usage: prog ship [<name>] move <x> <y> [--speed=<kn>]",
        &mut catalog,
    )
    .unwrap();
    let (entry, arena) = compile(&pattern).unwrap();

    // Breadth-first walk over every node reachable from entry, treating a
    // Split's out1/out2 as distinct frontiers; a back-edge must not cause
    // non-termination since we track visited ids.
    let mut seen = std::collections::HashSet::new();
    let mut stack = vec![entry];
    let mut reached_end = false;
    while let Some(id) = stack.pop() {
        if !seen.insert(format!("{id:?}")) {
            continue;
        }
        match arena.get(id) {
            Node::End => reached_end = true,
            Node::Leaf { next, .. } => stack.push(*next),
            Node::Pass { next } => stack.push(*next),
            Node::Split { out1, out2, .. } => {
                stack.push(*out1);
                stack.push(*out2);
            }
        }
    }
    assert!(reached_end, "no path in the compiled graph reaches End");
}

#[test]
fn one_or_more_ellipsis_produces_a_flagged_back_edge_reachable_from_entry() {
    let mut catalog = Catalog::new();
    let pattern = compile_pattern("Usage: prog <file>...", &mut catalog).unwrap();
    let (entry, arena) = compile(&pattern).unwrap();

    let mut seen = std::collections::HashSet::new();
    let mut stack = vec![entry];
    let mut found_back_edge = false;
    while let Some(id) = stack.pop() {
        if !seen.insert(format!("{id:?}")) {
            continue;
        }
        match arena.get(id) {
            Node::End => {}
            Node::Leaf { next, .. } => stack.push(*next),
            Node::Pass { next } => stack.push(*next),
            Node::Split {
                out1,
                out2,
                back_edge,
            } => {
                if *back_edge {
                    found_back_edge = true;
                }
                stack.push(*out1);
                stack.push(*out2);
            }
        }
    }
    assert!(found_back_edge, "expected a flagged back-edge split for the `...` loop");
}
