//! The result assembler.
//!
//! Thin by design — grounded directly in the four-step layering procedure
//! below, not in any specific teacher file (the teacher has no analogous
//! "merge declared defaults with matched bindings" step, since a
//! combinator's result comes straight out of `Parser::parse`).

use crate::ast::{Pattern, PatternLeaf};
use crate::bindings::Bindings;
use crate::catalog::Catalog;
use crate::token::{Arg, Args};
use crate::value::Value;

/// Walks `pattern` collecting every reachable argument/command/option leaf
/// name together with its default value (step 3). `AnyOptions` and
/// `DashDash` contribute no catalog-style default of their own here —
/// `DashDash`'s default (`false`) is still produced, since it is a result
/// key like any other leaf; `AnyOptions` has no identity and is skipped.
fn collect_leaf_defaults(pattern: &Pattern, out: &mut Bindings) {
    match pattern {
        Pattern::Leaf(PatternLeaf::Argument { name, list }) => {
            let default = if *list {
                Value::List(Vec::new())
            } else {
                Value::Null
            };
            out.set_default(name.clone(), default);
        }
        Pattern::Leaf(PatternLeaf::Command { name }) => {
            out.set_default(name.clone(), Value::Bool(false));
        }
        Pattern::Leaf(PatternLeaf::Option { short, long }) => {
            out.set_default(crate::ast::display_name(short, long), Value::Bool(false));
        }
        Pattern::Leaf(PatternLeaf::DashDash) => {
            out.set_default("--", Value::Bool(false));
        }
        Pattern::Leaf(PatternLeaf::AnyOptions) => {}
        Pattern::Sequence(children)
        | Pattern::Optional(children)
        | Pattern::Either(children)
        | Pattern::OneOrMore(children) => {
            for child in children {
                collect_leaf_defaults(child, out);
            }
        }
    }
}

/// Layers results in order: catalog defaults, then lexed-argv option
/// occurrences (so options an `any-options` leaf swallowed still surface),
/// then pattern-leaf defaults, then the matcher's own bindings — each
/// layer overlaying the previous one.
pub fn assemble(
    catalog: &Catalog,
    pattern: &Pattern,
    lexed_argv: &Args,
    matched: Bindings,
) -> Bindings {
    let mut result = Bindings::new();

    for proto in catalog.iter() {
        result.set(proto.display_name(), proto.default_value());
    }

    for item in lexed_argv.items() {
        if let Arg::Option(opt) = item {
            let value = match &opt.value {
                Some(v) => Value::Str(v.clone()),
                None => Value::Bool(true),
            };
            result.set(crate::ast::display_name(&opt.short, &opt.long), value);
        }
    }

    collect_leaf_defaults(pattern, &mut result);

    for (name, value) in matched {
        result.set(name, value);
    }

    result
}
