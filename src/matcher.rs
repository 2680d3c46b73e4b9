//! Frontier-based NFA traversal.
//!
//! Grounded in the teacher's own backtracking matcher, `src/params.rs`'s
//! `Item::match_stack`-style retry loop generalized here from "a handful
//! of combinators tried in turn" to "every live path at once, advanced
//! one generation at a time" — the shape a cyclic, arena-addressed NFA
//! demands instead of straightforward recursion.

use crate::ast::PatternLeaf;
use crate::bindings::Bindings;
use crate::error::{Error, LanguageError, UserError};
use crate::nfa::{Arena, Node, NodeId};
use crate::token::Args;
use crate::value::Value;

/// Hard ceiling on how many live paths a single generation may hold
/// before matching gives up as a developer fault rather than spinning.
/// A pattern that legitimately needs more
/// than this many concurrent alternatives is almost certainly
/// pathological — deeply nested `Either`s multiplying against each
/// other — rather than a usage text anyone would hand-write.
pub const MAX_FRONTIER_WIDTH: usize = 4096;

#[derive(Clone, Debug)]
struct Path {
    node: NodeId,
    tokens: Args,
    bindings: Bindings,
}

enum StepResult {
    Success(Bindings),
    Continue(Path),
    Dead,
}

/// Recursively replaces `Split`/`Pass` nodes with their successors,
/// preserving `out1`-before-`out2` order so the leftmost branch of the
/// original usage text is always explored first.
fn epsilon_close(arena: &Arena, mut path: Path, out: &mut Vec<Path>) {
    loop {
        match arena.get(path.node) {
            Node::Pass { next } => path.node = *next,
            Node::Split { out1, out2, .. } => {
                let mut branch = path.clone();
                branch.node = *out1;
                epsilon_close(arena, branch, out);
                path.node = *out2;
                continue;
            }
            Node::Leaf { .. } | Node::End => {
                out.push(path);
                return;
            }
        }
    }
}

/// Applies a leaf's consume rule in place; returns whether the leaf
/// matched.
fn consume_leaf(leaf: &PatternLeaf, tokens: &mut Args, bindings: &mut Bindings) -> bool {
    match leaf {
        PatternLeaf::Argument { name, list } => {
            let Some(text) = tokens.remove_first_word() else {
                return false;
            };
            if *list {
                bindings.push_list(name.clone(), text);
            } else {
                bindings.set(name.clone(), Value::Str(text));
            }
            true
        }
        PatternLeaf::Command { name } => {
            if tokens.remove_command(name) != Some(true) {
                return false;
            }
            bindings.set(name.clone(), Value::Bool(true));
            true
        }
        PatternLeaf::Option { short, long } => {
            let found = tokens.remove_option((*short, long.as_deref()));
            if found.is_empty() {
                return false;
            }
            // All occurrences share one identity; the rightmost one wins
            // if several carry a value, matching the usual "last flag on
            // the command line overrides" convention.
            let value = found
                .iter()
                .rev()
                .find_map(|r| r.value.clone())
                .map(Value::Str)
                .unwrap_or(Value::Bool(true));
            bindings.set(crate::ast::display_name(short, long), value);
            true
        }
        PatternLeaf::AnyOptions => {
            // Values are recorded by the result assembler straight off the
            // original lexed argv, not here, so an any-options leaf has no
            // identity to bind against.
            tokens.remove_all_options();
            true
        }
        PatternLeaf::DashDash => {
            if tokens.remove_dashdash().is_none() {
                return false;
            }
            bindings.set("--", Value::Bool(true));
            true
        }
    }
}

fn step(arena: &Arena, mut path: Path) -> StepResult {
    match arena.get(path.node) {
        Node::End => {
            if path.tokens.is_empty() {
                StepResult::Success(path.bindings)
            } else {
                StepResult::Dead
            }
        }
        Node::Leaf { leaf, next } => {
            if consume_leaf(leaf, &mut path.tokens, &mut path.bindings) {
                path.node = *next;
                StepResult::Continue(path)
            } else {
                StepResult::Dead
            }
        }
        Node::Split { .. } | Node::Pass { .. } => {
            unreachable!("frontier paths are always epsilon-closed before stepping")
        }
    }
}

/// Runs the matcher to completion: BFS over generations of the frontier,
/// each fully epsilon-expanded before being stepped once. The first path
/// to reach [`Node::End`] with no tokens left wins,
/// scanning the current generation in left-to-right order; if every path
/// in a generation dies, matching fails with [`UserError::NoMatch`].
pub fn run(entry: NodeId, arena: &Arena, tokens: Args) -> Result<Bindings, Error> {
    let mut frontier = vec![Path {
        node: entry,
        tokens,
        bindings: Bindings::new(),
    }];

    loop {
        let mut expanded = Vec::new();
        for path in frontier {
            epsilon_close(arena, path, &mut expanded);
        }
        if expanded.is_empty() {
            return Err(UserError::NoMatch.into());
        }
        if expanded.len() > MAX_FRONTIER_WIDTH {
            return Err(LanguageError::PatternTooComplex.into());
        }

        let mut next_frontier = Vec::new();
        for path in expanded {
            match step(arena, path) {
                StepResult::Success(bindings) => return Ok(bindings),
                StepResult::Continue(p) => next_frontier.push(p),
                StepResult::Dead => {}
            }
        }
        if next_frontier.is_empty() {
            return Err(UserError::NoMatch.into());
        }
        frontier = next_frontier;
    }
}
