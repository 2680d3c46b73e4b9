//! The list-argument analyzer: marks argument leaves that can bind more
//! than once so the matcher accumulates a list instead of overwriting a
//! scalar.
//!
//! Grounded in the teacher's structural walks over `Meta` for rendering
//! (`src/meta_usage.rs`), generalized here into a flattening pass instead
//! of a rendering pass: the pattern is expanded into a top-level
//! alternation of flat leaf sequences, and any argument name repeated
//! within one such sequence is marked list-typed wherever it occurs in
//! the live tree — not just at the repeated occurrence, since the pattern
//! may bind the same name from different branches.

use std::collections::HashSet;

use crate::ast::{Pattern, PatternLeaf};

/// Enumerates `pattern` as a top-level alternation of flat leaf sequences:
/// `Sequence` concatenates (cross product across children so that nested
/// `Either`s still distribute correctly), `Either` branches union,
/// `Optional` unwraps in place (no empty alternative — presence doesn't
/// matter here, only repetition), and `OneOrMore(x)` expands to `x, x`,
/// not to unboundedly many copies.
fn flatten(pattern: &Pattern) -> Vec<Vec<PatternLeaf>> {
    match pattern {
        Pattern::Leaf(leaf) => vec![vec![leaf.clone()]],
        Pattern::Sequence(children) => {
            let mut acc: Vec<Vec<PatternLeaf>> = vec![Vec::new()];
            for child in children {
                let child_alts = flatten(child);
                let mut next = Vec::with_capacity(acc.len() * child_alts.len().max(1));
                for prefix in &acc {
                    for alt in &child_alts {
                        let mut combined = prefix.clone();
                        combined.extend(alt.iter().cloned());
                        next.push(combined);
                    }
                }
                acc = next;
            }
            acc
        }
        Pattern::Optional(children) => flatten(&Pattern::Sequence(children.clone())),
        Pattern::Either(children) => children.iter().flat_map(flatten).collect(),
        Pattern::OneOrMore(children) => {
            let once = flatten(&Pattern::Sequence(children.clone()));
            once.into_iter()
                .map(|seq| {
                    let mut doubled = seq.clone();
                    doubled.extend(seq);
                    doubled
                })
                .collect()
        }
    }
}

/// Names of argument leaves that occur more than once within at least one
/// flat sequence of `pattern`. This is a narrow, not equivalent,
/// over-approximation: a name flagged here may in fact be bound at most
/// once along the branch actually taken at match time. Preserved
/// verbatim for compatibility with the reference implementation — flagged
/// here, not fixed.
fn list_typed_names(pattern: &Pattern) -> HashSet<String> {
    let mut names = HashSet::new();
    for seq in flatten(pattern) {
        let mut seen = HashSet::new();
        for leaf in &seq {
            if let PatternLeaf::Argument { name, .. } = leaf {
                if !seen.insert(name.clone()) {
                    names.insert(name.clone());
                }
            }
        }
    }
    names
}

fn apply_list_marks(pattern: &mut Pattern, names: &HashSet<String>) {
    match pattern {
        Pattern::Leaf(PatternLeaf::Argument { name, list }) => {
            if names.contains(name) {
                *list = true;
            }
        }
        Pattern::Leaf(_) => {}
        Pattern::Sequence(children)
        | Pattern::Optional(children)
        | Pattern::Either(children)
        | Pattern::OneOrMore(children) => {
            for child in children {
                apply_list_marks(child, names);
            }
        }
    }
}

/// Mutates every `Argument` leaf in `pattern` that is list-typed, in
/// place. Must run before [`crate::nfa::compile`] — the NFA compiler reads
/// `list` off the leaf and never revisits it.
pub fn mark_list_arguments(pattern: &mut Pattern) {
    let names = list_typed_names(pattern);
    apply_list_marks(pattern, &names);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn compiled(doc: &str) -> Pattern {
        let mut catalog = Catalog::new();
        crate::ast::compile_pattern(doc, &mut catalog).unwrap()
    }

    fn arguments(pattern: &Pattern, out: &mut Vec<(String, bool)>) {
        match pattern {
            Pattern::Leaf(PatternLeaf::Argument { name, list }) => {
                out.push((name.clone(), *list))
            }
            Pattern::Leaf(_) => {}
            Pattern::Sequence(c) | Pattern::Optional(c) | Pattern::Either(c) | Pattern::OneOrMore(c) => {
                for child in c {
                    arguments(child, out);
                }
            }
        }
    }

    #[test]
    fn repeated_name_in_flat_sequence_is_marked_list() {
        let mut p = compiled("Usage: prog [<name> <name>]");
        mark_list_arguments(&mut p);
        let mut found = Vec::new();
        arguments(&p, &mut found);
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|(name, list)| name == "<name>" && *list));
    }

    #[test]
    fn single_occurrence_is_not_marked_list() {
        let mut p = compiled("Usage: prog <a> <b>");
        mark_list_arguments(&mut p);
        let mut found = Vec::new();
        arguments(&p, &mut found);
        assert!(found.iter().all(|(_, list)| !*list));
    }

    #[test]
    fn one_or_more_doubles_for_detection_purposes() {
        let mut p = compiled("Usage: prog <name>...");
        mark_list_arguments(&mut p);
        let mut found = Vec::new();
        arguments(&p, &mut found);
        assert_eq!(found.len(), 1);
        assert!(found[0].1, "a OneOrMore argument must be detected as list-typed");
    }

    #[test]
    fn either_branches_are_independent() {
        // <name> repeats inside the first branch only; the second branch's
        // solitary <name> must not be forced list-typed by the first.
        let mut p = compiled("Usage: prog (<name> <name> | <name>)");
        mark_list_arguments(&mut p);
        let mut found = Vec::new();
        arguments(&p, &mut found);
        // All three leaves share the name "<name>", so our name-keyed
        // marking (not per-leaf-identity) flags every occurrence — this is
        // the narrow, not equivalent, over-approximation documented above.
        assert!(found.iter().all(|(name, list)| name == "<name>" && *list));
    }
}
