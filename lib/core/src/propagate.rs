use tracing::trace;

use crate::assignment::Assignment;
use crate::clause_allocator::ClauseAllocator;
use crate::cref::ClauseRef;
use crate::lit::Lit;
use crate::truth_value::TruthValue;
use crate::watch::WatchList;

/// Outcome of visiting one watcher of a falsified literal.
enum Visit {
    /// The clause keeps watching the falsified literal.
    Keep,
    /// The watch moved to the given literal.
    Moved(Lit),
    /// Every literal of the clause is falsified.
    Conflict,
}

/// Drains the propagation queue, keeping the two-watched-literal invariant.
///
/// Returns the conflicting clause, if any. On conflict the remaining queue is abandoned:
/// the pending literals stay assigned but are not propagated.
pub fn propagate(watchlist: &mut WatchList, ca: &mut ClauseAllocator, assignment: &mut Assignment) -> Option<ClauseRef> {
    while let Some(p) = assignment.dequeue() {
        trace!("propagating {}", p);
        let false_literal = !p;

        let watchers = watchlist.take(false_literal);
        let mut kept = Vec::with_capacity(watchers.len());
        let mut conflict = None;

        let mut ws = watchers.into_iter();
        while let Some(cref) = ws.next() {
            match visit(cref, false_literal, ca, assignment) {
                Visit::Keep => kept.push(cref),
                Visit::Moved(lit) => watchlist.insert(lit, cref),
                Visit::Conflict => {
                    trace!("conflict in {} = {}", cref, ca[cref]);
                    kept.push(cref);
                    kept.extend(ws);
                    conflict = Some(cref);
                    break;
                }
            }
        }

        watchlist.restore(false_literal, kept);
        if conflict.is_some() {
            return conflict;
        }
    }

    None
}

fn visit(cref: ClauseRef, false_literal: Lit, ca: &mut ClauseAllocator, assignment: &mut Assignment) -> Visit {
    let clause = &mut ca[cref];

    let rank = match clause.rank_of(false_literal) {
        Some(rank) => rank,
        None => {
            debug_assert!(false, "{} is in the bucket of {} without watching it", cref, false_literal);
            return Visit::Keep;
        }
    };
    let other = clause.watched(rank.other());

    // Satisfied through the other watch:
    if assignment.satisfied(other) {
        return Visit::Keep;
    }

    // Ring-scan for a replacement, starting right after the falsified watch:
    let size = clause.len();
    let start = clause.position_of(rank);
    let skip = clause.position_of(rank.other());
    for k in 1..size {
        let pos = (start + k) % size;
        if pos == skip {
            continue;
        }
        let lit = clause[pos];
        if !assignment.falsified(lit) {
            clause.set_watch_at(rank, pos);
            return Visit::Moved(lit);
        }
    }

    // No replacement: the other watch is the last hope.
    match assignment.value(other) {
        TruthValue::Undefined => {
            trace!("unit {} from {}", other, cref);
            assignment.unchecked_assign(other);
            Visit::Keep
        }
        TruthValue::False => Visit::Conflict,
        TruthValue::True => Visit::Keep,
    }
}
