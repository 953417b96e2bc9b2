//! Fuzz target for field removal on filter trees.
//!
//! Generates arbitrary trees and checks that pruning never leaves an empty
//! group, never keeps the removed field, and is idempotent.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_filter_pruning
//! ```

#![no_main]

use arbitrary::Arbitrary;
use dashfilter_core::{
    Combinator, ConditionalOperator, FieldTarget, FilterGroup, FilterGroupItem, FilterRule,
    remove_field_from_filter_group,
};
use libfuzzer_sys::fuzz_target;

/// A fuzzable tree node. Field ids come from a small alphabet so removals hit.
#[derive(Debug, Arbitrary)]
enum FuzzNode {
    Rule(u8),
    Group(bool, Vec<FuzzNode>),
}

fn build(node: &FuzzNode, next_id: &mut usize, depth: usize) -> FilterGroupItem {
    *next_id += 1;
    let id = format!("node-{}", next_id);
    match node {
        FuzzNode::Group(is_and, children) if depth < 16 => {
            let combinator = if *is_and { Combinator::And } else { Combinator::Or };
            let children: Vec<_> = children.iter().map(|c| build(c, next_id, depth + 1)).collect();
            FilterGroupItem::Group(FilterGroup::new(id, combinator, children))
        }
        // Groups past the depth cap become plain rules
        FuzzNode::Group(_, _) => rule(id, 0),
        FuzzNode::Rule(field) => rule(id, *field),
    }
}

fn rule(id: String, field: u8) -> FilterGroupItem {
    FilterGroupItem::Rule(FilterRule::new(
        id,
        FieldTarget::new(format!("field_{}", field % 4)),
        ConditionalOperator::Equals,
        [],
    ))
}

fn has_empty_group(group: &FilterGroup) -> bool {
    group.children.is_empty()
        || group.children.iter().any(|child| match child {
            FilterGroupItem::Group(inner) => has_empty_group(inner),
            FilterGroupItem::Rule(_) => false,
        })
}

#[derive(Debug, Arbitrary)]
struct Input {
    is_and: bool,
    children: Vec<FuzzNode>,
    field: u8,
}

fuzz_target!(|input: Input| {
    let mut next_id = 0;
    let children: Vec<_> = input.children.iter().map(|c| build(c, &mut next_id, 0)).collect();
    let combinator = if input.is_and { Combinator::And } else { Combinator::Or };
    let tree = FilterGroup::new("root", combinator, children);
    let field = format!("field_{}", input.field % 4);

    let Some(pruned) = remove_field_from_filter_group(&tree, &field) else {
        return;
    };
    assert!(!has_empty_group(&pruned));
    assert!(!pruned.references_field(&field));
    assert_eq!(remove_field_from_filter_group(&pruned, &field), Some(pruned));
});
