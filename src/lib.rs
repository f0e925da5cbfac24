//! Big Calc \
//! An integer calculator over [`big_num::BigInt`]:
//! - [`shunt`] converts an infix expression to an [`RpnProgram`] and its [`OperandList`];
//! - [`evaluate`] runs the program;
//! - [`Session`] adds the `bin`/`dec`/`hex`/`out`/`quit` commands on top.
//!
//! Operators, loosest first: `+ -`, `%`, `* /`, unary `-`, `^` (right-associative) and
//! postfix `!`. Literals are decimal, `0b` binary or `0x` hexadecimal.

mod error;
mod parser;
mod session;

pub use big_num::{Base, BigInt};

pub use crate::error::{CalcError, EvalError, ShuntError, SyntaxError};
pub use crate::parser::operators::{
    lookup, Associativity, BinaryOperator, OperatorDescriptor, OperatorKind, UnaryOperator,
};
pub use crate::parser::rpn::{evaluate, OperandList, RpnProgram, RpnSymbol};
pub use crate::parser::shunting_yard::shunt;
pub use crate::session::{diagnostic, Command, Reply, Session};

/// Shunts and evaluates one expression. Only its first line is read.
pub fn calculate(expression: &str) -> Result<BigInt, CalcError> {
    let (program, operands) = shunt(expression)?;
    Ok(evaluate(&program, operands)?)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::*;

    fn calc(expression: &str) -> BigInt {
        calculate(expression).unwrap()
    }

    #[test]
    fn it_works() {
        assert_eq!(calc("5+3*2"), BigInt::from(11));
        assert_eq!(calc("(5+3)*2"), BigInt::from(16));
        assert_eq!(calc("2^3^2"), BigInt::from(512));
        assert_eq!(calc("2^-2"), BigInt::zero());
        assert_eq!(calc("4!"), BigInt::from(24));
        assert!(matches!(calculate("- 5"), Err(CalcError::Shunt(ShuntError::Syntax(_)))));
    }

    #[test]
    fn test_big_values() {
        assert_eq!(calc("100000000000 + 25000000001"), BigInt::from(125000000001i64));
        assert_eq!(calc("-2 * 871346078019283655"), BigInt::from(-1742692156038567310i64));
        assert_eq!(calc("4294967295 / 8"), BigInt::from(536870911));
        assert_eq!(calc("4294967295 % 8"), BigInt::from(7));
        assert_eq!(calc("-10 / 3787890478781928745"), BigInt::zero());
        assert_eq!(calc("-10 % 3"), BigInt::from(-1));
        assert_eq!(
            calc("69!").to_string(),
            "171122452428141311372468338881272839092270544893520369393648040923257279754140647424000000000000000"
        );
        assert_eq!(calc("2^64 - 1"), BigInt::from(u64::MAX));
    }

    #[test]
    fn test_errors() {
        assert_eq!(calculate("1/0"), Err(CalcError::Eval(EvalError::DivByZero)));
        assert_eq!(calculate("(0-1)!"), Err(CalcError::Eval(EvalError::FactorialOfNegative)));
        assert_eq!(calculate("(1"), Err(CalcError::Eval(EvalError::Syntax)));
        assert_eq!(
            calculate("1 $ 1"),
            Err(CalcError::Shunt(ShuntError::InvalidSymbol { symbol: '$', position: 2 }))
        );
    }
}
