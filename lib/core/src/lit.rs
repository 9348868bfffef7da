use std::fmt::{Display, Formatter};
use std::ops;

use crate::var::Var;

/// Literal encoded as `2 * var + polarity`, where polarity is `1` for the
/// positive literal. Negation flips the lowest bit.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Lit(pub(crate) u32);

impl Lit {
    pub const fn new(var: Var, negated: bool) -> Self {
        Lit(var.0 << 1 | !negated as u32)
    }

    pub const fn pos(var: Var) -> Self {
        Lit::new(var, false)
    }

    pub const fn neg(var: Var) -> Self {
        Lit::new(var, true)
    }

    pub const fn inner(self) -> u32 {
        self.0
    }

    pub const fn var(self) -> Var {
        Var(self.0 >> 1)
    }

    pub const fn negated(self) -> bool {
        (self.0 & 1) == 0
    }

    pub const fn sign(self) -> i32 {
        if self.negated() {
            -1
        } else {
            1
        }
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// 1-based signed DIMACS integer.
    pub const fn to_external(self) -> i32 {
        self.sign() * (self.var().0 + 1) as i32
    }

    /// Panics on `0`, which is the DIMACS clause terminator and not a literal.
    pub const fn from_external(lit: i32) -> Lit {
        assert!(lit != 0, "0 is not a literal");
        let var = lit.unsigned_abs() - 1;
        Lit::new(Var(var), lit < 0)
    }
}

impl Display for Lit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_external())
    }
}

// !Lit
impl ops::Not for Lit {
    type Output = Lit;

    fn not(self) -> Self::Output {
        Lit(self.0 ^ 1)
    }
}

// -Lit
impl ops::Neg for Lit {
    type Output = Lit;

    fn neg(self) -> Self::Output {
        Lit(self.0 ^ 1)
    }
}

// Lit ^ bool
impl ops::BitXor<bool> for Lit {
    type Output = Lit;

    fn bitxor(self, rhs: bool) -> Self::Output {
        Lit(self.0 ^ rhs as u32)
    }
}
