use std::ops::Index;

use tracing::trace;

use crate::idx::VarVec;
use crate::lit::Lit;
use crate::truth_value::TruthValue;
use crate::var::Var;

/// Undo marker pushed once per decision.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Checkpoint {
    /// Length of the propagation queue right before the decision was assigned.
    pub queue_len: usize,
    /// The decision literal itself.
    pub decision: Lit,
}

/// Per-variable truth values together with the propagation queue and the decision trail.
///
/// The queue holds every assigned literal in assignment order; `qhead` separates the
/// literals whose consequences were already propagated from the pending ones.
#[derive(Debug)]
pub struct Assignment {
    values: VarVec<TruthValue>, // {var: value}
    queue: Vec<Lit>,
    qhead: usize,
    trail: Vec<Checkpoint>,
}

impl Assignment {
    pub const fn new() -> Self {
        Self {
            values: VarVec::new(),
            queue: vec![],
            qhead: 0,
            trail: vec![],
        }
    }
}

impl Default for Assignment {
    fn default() -> Self {
        Self::new()
    }
}

// assignment[var]
impl Index<Var> for Assignment {
    type Output = TruthValue;

    fn index(&self, var: Var) -> &Self::Output {
        self.values.index(var)
    }
}

impl Assignment {
    pub fn new_var(&mut self) -> Var {
        let var = Var::from(self.values.len());
        self.values.push(TruthValue::Undefined);
        var
    }

    pub fn num_vars(&self) -> usize {
        self.values.len()
    }
    pub fn num_assigned(&self) -> usize {
        self.queue.len()
    }
    pub fn num_open(&self) -> usize {
        self.num_vars() - self.num_assigned()
    }

    pub fn values(&self) -> &VarVec<TruthValue> {
        &self.values
    }
    pub fn value_var(&self, var: Var) -> TruthValue {
        self.values[var]
    }
    pub fn value(&self, lit: Lit) -> TruthValue {
        self.values[lit.var()] ^ lit.negated()
    }
    pub fn satisfied(&self, lit: Lit) -> bool {
        self.value(lit) == TruthValue::True
    }
    pub fn falsified(&self, lit: Lit) -> bool {
        self.value(lit) == TruthValue::False
    }

    /// Assigned literals in assignment order.
    pub fn queue(&self) -> &[Lit] {
        &self.queue
    }
    pub fn trail(&self) -> &[Checkpoint] {
        &self.trail
    }
    pub fn decision_level(&self) -> usize {
        self.trail.len()
    }

    /// If the literal is unassigned, assign it and enqueue it for propagation;
    /// if it is already satisfied, do nothing;
    /// if it is already falsified (conflict), return false.
    pub fn assign(&mut self, lit: Lit) -> bool {
        match self.value(lit) {
            TruthValue::Undefined => {
                self.unchecked_assign(lit);
                true
            }
            TruthValue::True => true,
            TruthValue::False => false,
        }
    }

    pub(crate) fn unchecked_assign(&mut self, lit: Lit) {
        debug_assert_eq!(self.value(lit), TruthValue::Undefined);
        self.values[lit.var()] = TruthValue::from(!lit.negated());
        self.queue.push(lit);
    }

    /// Next literal whose consequences have not been propagated yet.
    pub fn dequeue(&mut self) -> Option<Lit> {
        if self.qhead < self.queue.len() {
            let p = self.queue[self.qhead];
            self.qhead += 1;
            Some(p)
        } else {
            None
        }
    }

    /// Number of queued literals whose consequences were already propagated.
    pub fn num_propagated(&self) -> usize {
        self.qhead
    }

    pub fn new_decision_level(&mut self, decision: Lit) {
        self.trail.push(Checkpoint {
            queue_len: self.queue.len(),
            decision,
        });
    }

    /// Pops the most recent checkpoint and unassigns every literal enqueued at or after it.
    pub fn pop_decision_level(&mut self) -> Option<Checkpoint> {
        let checkpoint = self.trail.pop()?;
        self.unassign_from(checkpoint.queue_len);
        Some(checkpoint)
    }

    /// Pops checkpoints until only `level` of them remain.
    pub fn backtrack(&mut self, level: usize) {
        if self.decision_level() > level {
            let queue_len = self.trail[level].queue_len;
            self.unassign_from(queue_len);
            self.trail.truncate(level);
        }
    }

    fn unassign_from(&mut self, queue_len: usize) {
        for &lit in self.queue[queue_len..].iter().rev() {
            trace!("unassign {}", lit);
            self.values[lit.var()] = TruthValue::Undefined;
        }
        self.queue.truncate(queue_len);
        self.qhead = self.qhead.min(queue_len);
    }
}
