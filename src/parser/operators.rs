use std::collections::HashMap;

use big_num::{BigInt, MathError};
use lazy_static::*;

/// Stands for unary minus in RPN output. Not accepted in user input.
pub const UNARY_MINUS_SYMBOL: char = '_';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl BinaryOperator {
    pub fn apply(self, a: &BigInt, b: &BigInt) -> Result<BigInt, MathError> {
        match self {
            BinaryOperator::Add => Ok(a + b),
            BinaryOperator::Sub => Ok(a - b),
            BinaryOperator::Mul => Ok(a * b),
            BinaryOperator::Div => a.checked_div(b),
            BinaryOperator::Mod => a.checked_rem(b),
            BinaryOperator::Pow => Ok(a.pow(b)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Negate,
    Factorial,
}

impl UnaryOperator {
    pub fn apply(self, a: &BigInt) -> Result<BigInt, MathError> {
        match self {
            UnaryOperator::Negate => Ok(a.negate()),
            UnaryOperator::Factorial => a.factorial(),
        }
    }
}

/// Where an operator stands relative to its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    Binary(BinaryOperator),
    /// Written before its operand.
    Prefix(UnaryOperator),
    /// Written after its operand.
    Postfix(UnaryOperator),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorDescriptor {
    pub symbol: char,
    pub kind: OperatorKind,
    pub precedence: u8,
    pub associativity: Associativity,
}

impl OperatorDescriptor {
    pub fn is_binary(&self) -> bool {
        matches!(self.kind, OperatorKind::Binary(_))
    }

    pub fn is_prefix(&self) -> bool {
        matches!(self.kind, OperatorKind::Prefix(_))
    }

    pub fn is_postfix(&self) -> bool {
        matches!(self.kind, OperatorKind::Postfix(_))
    }

    /// Whether `self`, arriving while `pending` sits on the operator stack, must be stacked on
    /// top of it instead of letting it out first.
    pub fn binds_tighter_than(&self, pending: &OperatorDescriptor) -> bool {
        self.precedence > pending.precedence
            || (self.precedence == pending.precedence
                && self.associativity == Associativity::Right)
    }
}

macro_rules! operator {
    ($name: ident, $symbol: expr, $kind: expr, $precedence: expr, $associativity: ident) => {
        pub static $name: OperatorDescriptor = OperatorDescriptor {
            symbol: $symbol,
            kind: $kind,
            precedence: $precedence,
            associativity: Associativity::$associativity,
        };
    };
}

operator!(ADDITION, '+', OperatorKind::Binary(BinaryOperator::Add), 1, Left);
operator!(SUBTRACTION, '-', OperatorKind::Binary(BinaryOperator::Sub), 1, Left);
operator!(MODULO, '%', OperatorKind::Binary(BinaryOperator::Mod), 2, Left);
operator!(MULTIPLICATION, '*', OperatorKind::Binary(BinaryOperator::Mul), 3, Left);
operator!(DIVISION, '/', OperatorKind::Binary(BinaryOperator::Div), 3, Left);
operator!(POWER, '^', OperatorKind::Binary(BinaryOperator::Pow), 4, Right);
// between `* / %` and `^`: `-2^2` is `-(2^2)`, `-2*3` is `(-2)*3`
operator!(UNARY_MINUS, UNARY_MINUS_SYMBOL, OperatorKind::Prefix(UnaryOperator::Negate), 3, Right);
operator!(FACTORIAL, '!', OperatorKind::Postfix(UnaryOperator::Factorial), 4, Left);

lazy_static! {
    pub static ref OPERATOR_TABLE: HashMap<char, &'static OperatorDescriptor> = [
        &ADDITION,
        &SUBTRACTION,
        &MODULO,
        &MULTIPLICATION,
        &DIVISION,
        &POWER,
        &UNARY_MINUS,
        &FACTORIAL,
    ]
    .into_iter()
    .map(|descriptor| (descriptor.symbol, descriptor))
    .collect();
}

pub fn lookup(symbol: char) -> Option<&'static OperatorDescriptor> {
    OPERATOR_TABLE.get(&symbol).copied()
}

#[test]
fn test_lookup() {
    assert_eq!(lookup('^'), Some(&POWER));
    assert_eq!(lookup('_'), Some(&UNARY_MINUS));
    assert_eq!(lookup('-'), Some(&SUBTRACTION));
    assert_eq!(lookup('('), None);
    assert_eq!(lookup('n'), None);
    assert_eq!(OPERATOR_TABLE.len(), 8);
    assert!(FACTORIAL.is_postfix());
    assert!(UNARY_MINUS.is_prefix());
    assert!(MODULO.is_binary());
}

#[test]
fn test_binds_tighter_than() {
    // left-associative operators let an equal-precedence predecessor out first
    assert!(!ADDITION.binds_tighter_than(&SUBTRACTION));
    assert!(!MULTIPLICATION.binds_tighter_than(&DIVISION));
    assert!(MULTIPLICATION.binds_tighter_than(&MODULO));
    assert!(!MODULO.binds_tighter_than(&MULTIPLICATION));
    // right-associative ones stack up
    assert!(POWER.binds_tighter_than(&POWER));
    assert!(UNARY_MINUS.binds_tighter_than(&UNARY_MINUS));
    assert!(UNARY_MINUS.binds_tighter_than(&MULTIPLICATION));
    assert!(POWER.binds_tighter_than(&UNARY_MINUS));
    assert!(!MULTIPLICATION.binds_tighter_than(&UNARY_MINUS));
    assert!(!UNARY_MINUS.binds_tighter_than(&POWER));
}

#[test]
fn test_apply() {
    let a = BigInt::from(-7);
    let b = BigInt::from(2);
    assert_eq!(BinaryOperator::Add.apply(&a, &b), Ok(BigInt::from(-5)));
    assert_eq!(BinaryOperator::Sub.apply(&a, &b), Ok(BigInt::from(-9)));
    assert_eq!(BinaryOperator::Mul.apply(&a, &b), Ok(BigInt::from(-14)));
    assert_eq!(BinaryOperator::Div.apply(&a, &b), Ok(BigInt::from(-3)));
    assert_eq!(BinaryOperator::Mod.apply(&a, &b), Ok(BigInt::from(-1)));
    assert_eq!(BinaryOperator::Pow.apply(&a, &b), Ok(BigInt::from(49)));
    assert_eq!(BinaryOperator::Div.apply(&a, &BigInt::zero()), Err(MathError::DivByZero));
    assert_eq!(UnaryOperator::Negate.apply(&a), Ok(BigInt::from(7)));
    assert_eq!(UnaryOperator::Factorial.apply(&b), Ok(BigInt::from(2)));
    assert_eq!(UnaryOperator::Factorial.apply(&a), Err(MathError::FactorialOfNegative));
}
