//! Optional leading and trailing silence.

use gramfst_core::{Arc, Label};

use crate::subgraph::SubGraph;

/// Give the graph a new start vertex that either consumes `InitialSilence`
/// or skips it, and let every accepting vertex optionally consume
/// `FinalSilence` before accepting.
pub(crate) fn add_silence(sub: &mut SubGraph) {
    let accepting: Vec<_> = sub
        .live_arcs()
        .filter(|(_, arc)| arc.is_terminal())
        .map(|(_, arc)| arc.from)
        .collect();

    let old_start = sub.start();
    let start = sub.new_vertex();
    sub.push_arc(Arc::new(
        start,
        old_start,
        Label::InitialSilence,
        Label::Epsilon,
    ));
    sub.push_arc(Arc::epsilon(start, old_start));
    sub.set_start(start);

    for from in accepting {
        let silent = sub.new_vertex();
        sub.push_arc(Arc::new(from, silent, Label::FinalSilence, Label::Epsilon));
        sub.push_arc(Arc::terminal(silent));
    }
}
