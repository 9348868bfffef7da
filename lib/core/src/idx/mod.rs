use self::idx_vec::IdxVec;

use crate::lit::Lit;
use crate::var::Var;

pub mod idx_vec;

pub type VarVec<V> = IdxVec<Var, V>;
pub type LitVec<V> = IdxVec<Lit, V>;

/// Dense key that maps onto a `Vec` position.
pub trait Idx {
    fn idx(&self) -> usize;
}

impl Idx for Var {
    fn idx(&self) -> usize {
        self.index()
    }
}

impl Idx for Lit {
    fn idx(&self) -> usize {
        self.index()
    }
}
