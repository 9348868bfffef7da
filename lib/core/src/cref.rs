use std::fmt::{Display, Formatter};

/// Stable handle of a clause inside the [`ClauseAllocator`][crate::clause_allocator::ClauseAllocator].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ClauseRef(pub(crate) usize);

impl ClauseRef {
    pub const fn index(self) -> usize {
        self.0
    }
}

impl Display for ClauseRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
