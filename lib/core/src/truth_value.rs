use std::fmt::{Display, Formatter};
use std::ops::BitXor;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum TruthValue {
    False = 0,
    True = 1,
    Undefined = 2,
}

impl TruthValue {
    #[inline]
    pub const fn is_undefined(self) -> bool {
        (self as u8) > 1
    }

    #[inline]
    pub const fn is_defined(self) -> bool {
        !self.is_undefined()
    }

    pub const fn to_bool(self) -> Option<bool> {
        match self {
            TruthValue::False => Some(false),
            TruthValue::True => Some(true),
            TruthValue::Undefined => None,
        }
    }
}

impl Default for TruthValue {
    fn default() -> Self {
        TruthValue::Undefined
    }
}

impl From<bool> for TruthValue {
    fn from(b: bool) -> Self {
        if b {
            TruthValue::True
        } else {
            TruthValue::False
        }
    }
}

impl Display for TruthValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TruthValue::False => write!(f, "false"),
            TruthValue::True => write!(f, "true"),
            TruthValue::Undefined => write!(f, "undefined"),
        }
    }
}

// TruthValue ^ bool
impl BitXor<bool> for TruthValue {
    type Output = TruthValue;

    fn bitxor(self, rhs: bool) -> Self::Output {
        match self {
            TruthValue::Undefined => TruthValue::Undefined,
            TruthValue::False => TruthValue::from(rhs),
            TruthValue::True => TruthValue::from(!rhs),
        }
    }
}
