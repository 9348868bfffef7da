use std::fmt::{Display, Formatter};
use std::ops::Index;
use std::slice;

use itertools::Itertools;

use crate::error::{EmptyClauseSnafu, NotInClauseSnafu, Result};
use crate::lit::Lit;

/// One of the two watch slots of a clause.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Rank {
    First = 0,
    Second = 1,
}

impl Rank {
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn other(self) -> Rank {
        match self {
            Rank::First => Rank::Second,
            Rank::Second => Rank::First,
        }
    }
}

/// Disjunction of literals with two watched positions.
///
/// The literal sequence is fixed at construction; only the watch positions move.
/// For a clause of size 1 both ranks point at the sole literal.
#[derive(Debug, Clone)]
pub struct Clause {
    lits: Vec<Lit>,
    watch: [usize; 2],
}

impl Clause {
    pub fn new(lits: Vec<Lit>) -> Result<Self> {
        if lits.is_empty() {
            return EmptyClauseSnafu.fail();
        }
        let second = if lits.len() > 1 { 1 } else { 0 };
        Ok(Self { lits, watch: [0, second] })
    }

    pub fn from_external(lits: &[i32]) -> Result<Self> {
        Self::new(lits.iter().map(|&lit| Lit::from_external(lit)).collect())
    }

    pub fn len(&self) -> usize {
        self.lits.len()
    }

    // Never true: empty clauses are rejected by `new`.
    pub fn is_empty(&self) -> bool {
        self.lits.is_empty()
    }

    pub fn is_unit(&self) -> bool {
        self.lits.len() == 1
    }

    pub fn lits(&self) -> &[Lit] {
        &self.lits
    }

    pub fn iter(&self) -> slice::Iter<'_, Lit> {
        self.lits.iter()
    }

    /// Which rank currently watches `lit`, if any.
    pub fn rank_of(&self, lit: Lit) -> Option<Rank> {
        if self.lits[self.watch[0]] == lit {
            Some(Rank::First)
        } else if self.lits[self.watch[1]] == lit {
            Some(Rank::Second)
        } else {
            None
        }
    }

    pub fn watched(&self, rank: Rank) -> Lit {
        self.lits[self.watch[rank.index()]]
    }

    /// Position of the watched literal inside the literal sequence.
    pub fn position_of(&self, rank: Rank) -> usize {
        self.watch[rank.index()]
    }

    /// Repoints `rank` at `lit`, which must be a member of the clause.
    ///
    /// When `lit` occurs several times, the first occurrence not held by the other rank is used.
    pub fn set_watch(&mut self, lit: Lit, rank: Rank) -> Result<()> {
        let taken = self.watch[rank.other().index()];
        let candidates = self.lits.iter().positions(|&x| x == lit).collect_vec();
        let pos = candidates
            .iter()
            .copied()
            .find(|&pos| pos != taken)
            .or_else(|| candidates.first().copied());
        match pos {
            Some(pos) => {
                self.set_watch_at(rank, pos);
                Ok(())
            }
            None => NotInClauseSnafu { lit }.fail(),
        }
    }

    pub(crate) fn set_watch_at(&mut self, rank: Rank, pos: usize) {
        assert!(pos < self.lits.len(), "watch position {} out of range", pos);
        self.watch[rank.index()] = pos;
    }

    /// Literals sorted by their code, used as an order-independent key.
    pub fn sorted_lits(&self) -> Vec<Lit> {
        self.lits.iter().copied().sorted_unstable().collect()
    }

    /// Order-independent comparison of the literal sequences.
    pub fn same_literals(&self, other: &Clause) -> bool {
        self.len() == other.len() && self.sorted_lits() == other.sorted_lits()
    }
}

impl Index<usize> for Clause {
    type Output = Lit;

    fn index(&self, index: usize) -> &Self::Output {
        &self.lits[index]
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Lit;
    type IntoIter = slice::Iter<'a, Lit>;

    fn into_iter(self) -> Self::IntoIter {
        self.lits.iter()
    }
}

impl IntoIterator for Clause {
    type Item = Lit;
    type IntoIter = std::vec::IntoIter<Lit>;

    fn into_iter(self) -> Self::IntoIter {
        self.lits.into_iter()
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        for lit in self.lits.iter() {
            list.entry(&format_args!("{}", lit));
        }
        list.finish()
    }
}
