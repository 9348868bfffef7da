use std::ops::{Index, IndexMut};

use crate::clause::Clause;
use crate::cref::ClauseRef;

/// Arena owning every clause of the solver. Clauses are never freed.
#[derive(Debug)]
pub struct ClauseAllocator {
    db: Vec<Clause>,
}

impl ClauseAllocator {
    pub const fn new() -> Self {
        Self { db: Vec::new() }
    }
}

impl Default for ClauseAllocator {
    fn default() -> Self {
        Self::new()
    }
}

// ca[cref]
impl Index<ClauseRef> for ClauseAllocator {
    type Output = Clause;

    fn index(&self, cref: ClauseRef) -> &Self::Output {
        self.db.index(cref.0)
    }
}

// &mut ca[cref]
impl IndexMut<ClauseRef> for ClauseAllocator {
    fn index_mut(&mut self, cref: ClauseRef) -> &mut Self::Output {
        self.db.index_mut(cref.0)
    }
}

impl ClauseAllocator {
    pub fn len(&self) -> usize {
        self.db.len()
    }

    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }

    pub fn alloc(&mut self, clause: Clause) -> ClauseRef {
        let cref = ClauseRef(self.db.len());
        self.db.push(clause);
        cref
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClauseRef, &Clause)> {
        self.db.iter().enumerate().map(|(i, c)| (ClauseRef(i), c))
    }
}
