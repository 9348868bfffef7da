use std::fmt::{Display, Formatter};

/// Boolean variable, a dense 0-based index.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Var(pub(crate) u32);

impl Var {
    pub const fn new(var: u32) -> Self {
        Self(var)
    }

    pub const fn inner(self) -> u32 {
        self.0
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<usize> for Var {
    fn from(index: usize) -> Self {
        Var(index as u32)
    }
}

impl Display for Var {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // display Var as 1-based integer:
        write!(f, "{}", self.index() + 1)
    }
}
