use std::mem;

use crate::cref::ClauseRef;
use crate::idx::LitVec;
use crate::lit::Lit;
use crate::var::Var;

/// For every literal, the clauses currently watching it (at either rank).
#[derive(Debug)]
pub struct WatchList {
    watchlist: LitVec<Vec<ClauseRef>>,
}

impl WatchList {
    pub const fn new() -> Self {
        Self { watchlist: LitVec::new() }
    }

    pub fn init(&mut self, var: Var) {
        self.watchlist.init(&Lit::new(var, false));
        self.watchlist.init(&Lit::new(var, true));
    }

    pub fn lookup(&self, lit: Lit) -> &[ClauseRef] {
        &self.watchlist[lit]
    }

    pub fn insert(&mut self, lit: Lit, cref: ClauseRef) {
        self.watchlist[lit].push(cref);
    }

    /// Detaches the whole bucket of `lit`, leaving it empty until [`restore`][Self::restore].
    pub fn take(&mut self, lit: Lit) -> Vec<ClauseRef> {
        mem::take(&mut self.watchlist[lit])
    }

    pub fn restore(&mut self, lit: Lit, watchers: Vec<ClauseRef>) {
        let bucket = &mut self.watchlist[lit];
        debug_assert!(bucket.is_empty(), "bucket of {} was modified while detached", lit);
        *bucket = watchers;
    }

    pub fn len(&self) -> usize {
        self.watchlist.iter().map(|ws| ws.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.watchlist.iter().all(|ws| ws.is_empty())
    }
}

impl Default for WatchList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_and_restore() {
        let mut watchlist = WatchList::new();
        watchlist.init(Var::new(0));
        watchlist.init(Var::new(1));
        let x = Lit::pos(Var::new(0));
        let y = Lit::neg(Var::new(1));

        watchlist.insert(x, ClauseRef(0));
        watchlist.insert(x, ClauseRef(1));
        watchlist.insert(y, ClauseRef(1));
        assert_eq!(watchlist.len(), 3);

        let taken = watchlist.take(x);
        assert_eq!(taken, vec![ClauseRef(0), ClauseRef(1)]);
        assert!(watchlist.lookup(x).is_empty());

        watchlist.restore(x, vec![ClauseRef(1)]);
        assert_eq!(watchlist.lookup(x), &[ClauseRef(1)]);
        assert_eq!(watchlist.lookup(y), &[ClauseRef(1)]);
        assert!(watchlist.lookup(!x).is_empty());
    }
}
