use gramfst_core::{Arc, Label};

use super::prune;
use crate::subgraph::SubGraph;
use crate::test_utils::{dump_raw, rule, word};

/// Accepting path `0 -#0-> 1 -#1-> 2`, a dead end at 3 and an unreachable 4.
fn with_dead_parts() -> SubGraph {
    let mut sub = SubGraph::new(rule(0), "main");
    for _ in 0..4 {
        sub.new_vertex();
    }
    sub.push_arc(Arc::new(0, 1, word(0), Label::Epsilon));
    sub.push_arc(Arc::new(1, 2, word(1), Label::Epsilon));
    sub.push_arc(Arc::terminal(2));
    sub.push_arc(Arc::new(0, 3, word(2), Label::Epsilon));
    sub.push_arc(Arc::new(4, 2, word(3), Label::Epsilon));
    sub.push_arc(Arc::new(3, 3, word(4), Label::Epsilon));
    sub
}

#[test]
fn drops_arcs_off_accepting_paths() {
    let mut sub = with_dead_parts();

    assert_eq!(prune(&mut sub).unwrap(), 3);
    insta::assert_snapshot!(dump_raw(&sub), @r"
    start: 0
    0 -> 1: #0
    1 -> 2: #1
    2 -> end: <end>
    ");
}

#[test]
fn prune_is_idempotent() {
    let mut sub = with_dead_parts();
    prune(&mut sub).unwrap();
    let once = dump_raw(&sub);

    assert_eq!(prune(&mut sub).unwrap(), 0);
    assert_eq!(dump_raw(&sub), once);
}

#[test]
fn graph_without_terminal_is_emptied() {
    let mut sub = SubGraph::new(rule(0), "main");
    sub.new_vertex();
    sub.push_arc(Arc::new(0, 1, word(0), Label::Epsilon));

    assert_eq!(prune(&mut sub).unwrap(), 1);
    assert_eq!(sub.live_arc_count(), 0);
}

#[test]
fn tombstones_are_not_counted() {
    let mut sub = with_dead_parts();
    sub.discard(3);

    assert_eq!(prune(&mut sub).unwrap(), 2);
}
