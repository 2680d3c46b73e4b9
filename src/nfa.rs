//! The pattern compiler: lowers a [`Pattern`] into an arena-indexed NFA.
//!
//! The compiled graph has back-edges (`OneOrMore` loops), so it cannot be
//! owned as a tree of `Box`/`Rc` nodes without either leaking cycles or
//! reaching for `Weak`. Grounded in the teacher's own escape from this
//! exact problem: `bpaf_core`'s executor models its state machine as a
//! `Vec`-backed arena addressed by small integer ids rather than pointers,
//! for the same reason (see `DESIGN.md`). `NodeId` here plays that role.

use crate::ast::{Pattern, PatternLeaf};
use crate::error::LanguageError;

/// An index into an [`Arena`]. Cheap to copy, comparable, and safe to
/// store inside another node even when the edge it names points back at
/// an ancestor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

/// Placeholder written into a freshly allocated node's not-yet-known
/// edges; every one of these must be overwritten by [`patch`] before
/// compilation finishes, or the graph is malformed.
const UNPATCHED: NodeId = NodeId(u32::MAX);

/// A compiled NFA node.
#[derive(Clone, Debug)]
pub enum Node {
    /// Wraps a pattern leaf; consumes tokens per its own per-kind rule,
    /// then advances along `next`.
    Leaf { leaf: PatternLeaf, next: NodeId },
    /// A branch: consumes nothing, both `out1` and `out2` are explored
    /// during epsilon-closure. `back_edge` marks a split whose `out1`
    /// loops back to an ancestor, so cycle-aware code (debug printing,
    /// path-count guards) can recognize it without a general cycle
    /// search.
    Split {
        out1: NodeId,
        out2: NodeId,
        back_edge: bool,
    },
    /// Consumes nothing and always advances; used for an empty
    /// `Sequence` and as the stable loop target preceding a
    /// `OneOrMore`'s body.
    Pass { next: NodeId },
    /// Terminal sentinel: succeeds iff no tokens remain.
    End,
}

/// The compiled graph. Read-only once [`compile`] returns — the NFA is
/// immutable after construction.
#[derive(Clone, Debug, Default)]
pub struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// An outstanding forward edge awaiting a successor, produced by
/// [`compile_node`] and resolved by [`patch`].
enum Tail {
    LeafNext(NodeId),
    PassNext(NodeId),
    Split2(NodeId),
}

fn patch(arena: &mut Arena, tail: Tail, target: NodeId) {
    match tail {
        Tail::LeafNext(id) => {
            if let Node::Leaf { next, .. } = &mut arena.nodes[id.0 as usize] {
                *next = target;
            }
        }
        Tail::PassNext(id) => {
            if let Node::Pass { next } = &mut arena.nodes[id.0 as usize] {
                *next = target;
            }
        }
        Tail::Split2(id) => {
            if let Node::Split { out2, .. } = &mut arena.nodes[id.0 as usize] {
                *out2 = target;
            }
        }
    }
}

/// Compiles `pattern` into an arena, returning the entry node. All tails
/// left open by the walk are patched to a freshly allocated [`Node::End`].
pub fn compile(pattern: &Pattern) -> Result<(NodeId, Arena), LanguageError> {
    let mut arena = Arena::new();
    let (entry, tails) = compile_node(pattern, &mut arena)?;
    let end = arena.push(Node::End);
    for t in tails {
        patch(&mut arena, t, end);
    }
    Ok((entry, arena))
}

fn compile_node(pattern: &Pattern, arena: &mut Arena) -> Result<(NodeId, Vec<Tail>), LanguageError> {
    match pattern {
        Pattern::Leaf(leaf) => {
            let id = arena.push(Node::Leaf {
                leaf: leaf.clone(),
                next: UNPATCHED,
            });
            Ok((id, vec![Tail::LeafNext(id)]))
        }
        Pattern::Sequence(children) => compile_sequence(children, arena),
        Pattern::Optional(children) => compile_optional(children, arena),
        Pattern::Either(children) => compile_either(children, arena),
        Pattern::OneOrMore(children) => compile_one_or_more(children, arena),
    }
}

fn compile_sequence(children: &[Pattern], arena: &mut Arena) -> Result<(NodeId, Vec<Tail>), LanguageError> {
    if children.is_empty() {
        let id = arena.push(Node::Pass { next: UNPATCHED });
        return Ok((id, vec![Tail::PassNext(id)]));
    }

    let (entry, mut tails) = compile_node(&children[0], arena)?;
    for child in &children[1..] {
        let (next_entry, next_tails) = compile_node(child, arena)?;
        for t in tails {
            patch(arena, t, next_entry);
        }
        tails = next_tails;
    }
    Ok((entry, tails))
}

fn compile_optional(children: &[Pattern], arena: &mut Arena) -> Result<(NodeId, Vec<Tail>), LanguageError> {
    if children.is_empty() {
        return Err(LanguageError::EmptyCombinator("optional"));
    }
    // An Optional wrapping more than one child compiles as a Sequence of
    // single-child Optionals. The parser only ever produces a single
    // child, but the compiler honors the general rule.
    if children.len() > 1 {
        let rewritten = Pattern::Sequence(
            children
                .iter()
                .map(|c| Pattern::Optional(vec![c.clone()]))
                .collect(),
        );
        return compile_node(&rewritten, arena);
    }

    let (child_entry, child_tails) = compile_node(&children[0], arena)?;
    let split = arena.push(Node::Split {
        out1: child_entry,
        out2: UNPATCHED,
        back_edge: false,
    });
    let mut tails = child_tails;
    tails.push(Tail::Split2(split));
    Ok((split, tails))
}

fn compile_either(children: &[Pattern], arena: &mut Arena) -> Result<(NodeId, Vec<Tail>), LanguageError> {
    match children.len() {
        0 | 1 => Err(LanguageError::EmptyCombinator("either")),
        2 => {
            let (e1, t1) = compile_node(&children[0], arena)?;
            let (e2, t2) = compile_node(&children[1], arena)?;
            let split = arena.push(Node::Split {
                out1: e1,
                out2: e2,
                back_edge: false,
            });
            let mut tails = t1;
            tails.extend(t2);
            Ok((split, tails))
        }
        _ => {
            // Right-fold: Split(c1, Split(c2, ...)).
            let rest = Pattern::Either(children[1..].to_vec());
            let (e1, t1) = compile_node(&children[0], arena)?;
            let (e2, t2) = compile_node(&rest, arena)?;
            let split = arena.push(Node::Split {
                out1: e1,
                out2: e2,
                back_edge: false,
            });
            let mut tails = t1;
            tails.extend(t2);
            Ok((split, tails))
        }
    }
}

fn compile_one_or_more(children: &[Pattern], arena: &mut Arena) -> Result<(NodeId, Vec<Tail>), LanguageError> {
    if children.is_empty() {
        return Err(LanguageError::EmptyCombinator("one-or-more"));
    }
    let body = if children.len() == 1 {
        children[0].clone()
    } else {
        Pattern::Sequence(children.to_vec())
    };

    // A dummy identity leaf precedes the body so the loop's back-edge has a
    // stable target even when `entry(body)` is itself a Split.
    let dummy = arena.push(Node::Pass { next: UNPATCHED });
    let (body_entry, body_tails) = compile_node(&body, arena)?;
    patch(arena, Tail::PassNext(dummy), body_entry);

    let split = arena.push(Node::Split {
        out1: dummy,
        out2: UNPATCHED,
        back_edge: true,
    });
    for t in body_tails {
        patch(arena, t, split);
    }
    Ok((dummy, vec![Tail::Split2(split)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn compiled(doc: &str) -> (NodeId, Arena) {
        let mut catalog = Catalog::new();
        let pattern = crate::ast::compile_pattern(doc, &mut catalog).unwrap();
        compile(&pattern).unwrap()
    }

    fn walk_to_end(arena: &Arena, mut id: NodeId, mut budget: usize) -> bool {
        loop {
            if budget == 0 {
                return false;
            }
            budget -= 1;
            match arena.get(id) {
                Node::End => return true,
                Node::Leaf { next, .. } => id = *next,
                Node::Pass { next } => id = *next,
                Node::Split { out1, .. } => id = *out1,
            }
        }
    }

    #[test]
    fn every_path_reaches_end() {
        let (entry, arena) = compiled("Usage: prog <a> <b>");
        assert!(walk_to_end(&arena, entry, arena.len() + 1));
    }

    #[test]
    fn sequence_chains_leaves_in_order() {
        let (entry, arena) = compiled("Usage: prog <a> <b>");
        match arena.get(entry) {
            Node::Leaf {
                leaf: PatternLeaf::Argument { name, .. },
                next,
            } => {
                assert_eq!(name, "<a>");
                match arena.get(*next) {
                    Node::Leaf {
                        leaf: PatternLeaf::Argument { name, .. },
                        ..
                    } => assert_eq!(name, "<b>"),
                    other => panic!("expected leaf, got {other:?}"),
                }
            }
            other => panic!("expected leaf, got {other:?}"),
        }
    }

    #[test]
    fn optional_produces_skip_edge_split() {
        let (entry, arena) = compiled("Usage: prog [<a>]");
        match arena.get(entry) {
            Node::Split {
                out1,
                out2,
                back_edge,
            } => {
                assert!(!back_edge);
                assert!(matches!(arena.get(*out1), Node::Leaf { .. }));
                assert!(matches!(arena.get(*out2), Node::End));
            }
            other => panic!("expected split, got {other:?}"),
        }
    }

    #[test]
    fn either_is_a_two_way_split() {
        let (entry, arena) = compiled("Usage: prog (-a|-b)");
        assert!(matches!(arena.get(entry), Node::Split { back_edge: false, .. }));
    }

    #[test]
    fn one_or_more_has_a_flagged_back_edge() {
        let (entry, arena) = compiled("Usage: prog <name>...");
        // entry is the dummy Pass node preceding the body.
        let body_entry = match arena.get(entry) {
            Node::Pass { next } => *next,
            other => panic!("expected pass, got {other:?}"),
        };
        match arena.get(body_entry) {
            Node::Leaf { next, .. } => match arena.get(*next) {
                Node::Split { out1, back_edge, .. } => {
                    assert!(*back_edge);
                    assert_eq!(*out1, entry, "back-edge must loop to the stable dummy node");
                }
                other => panic!("expected split, got {other:?}"),
            },
            other => panic!("expected leaf, got {other:?}"),
        }
    }

    #[test]
    fn empty_combinator_either_is_rejected() {
        let err = compile_either(&[], &mut Arena::new()).unwrap_err();
        assert_eq!(err, LanguageError::EmptyCombinator("either"));
    }
}
