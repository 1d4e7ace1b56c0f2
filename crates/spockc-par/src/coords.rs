//! Coordinate assignment: one pre-order walk over the grouped tree.
//!
//! Every token gains a `(depth, gpad, pig, op_prec)` tuple. Depth is the
//! nesting level (top-level statements sit at 0); gpad numbers the groups
//! left to right per depth, across all statements; pig numbers the items
//! inside a group, where a nested group consumes one slot of its parent.

use spockc_lex::{precedence, Coords};

use crate::group::{GroupNode, Statement};

/// Decorate every token in `statements` with planner coordinates.
pub fn assign_coordinates(statements: &mut [Statement]) {
    let mut group_counters: Vec<u32> = Vec::new();
    for stmt in statements.iter_mut() {
        walk(&mut stmt.nodes, 0, &mut group_counters);
    }
}

fn walk(nodes: &mut [GroupNode], depth: u32, counters: &mut Vec<u32>) {
    if counters.len() <= depth as usize {
        counters.resize(depth as usize + 1, 0);
    }
    let gpad = counters[depth as usize];
    counters[depth as usize] += 1;

    let mut pig = 0u32;
    for node in nodes.iter_mut() {
        match node {
            GroupNode::Token(token) => {
                token.coords = Some(Coords {
                    depth,
                    gpad,
                    pig,
                    op_prec: precedence(token.text()),
                });
                pig += 1;
            }
            GroupNode::Group(inner) => {
                walk(inner, depth + 1, counters);
                pig += 1;
            }
        }
    }
}
