use big_num::{MathError, ParseError};
use thiserror::Error;

/// A grammar violation found while converting infix text. Positions are byte offsets into the
/// expression line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("unexpected `{symbol}` at position {position}")]
    UnexpectedSymbol { symbol: char, position: usize },
    #[error("unary minus at position {position} is separated from its operand")]
    DetachedMinus { position: usize },
    #[error("`)` at position {position} closes no bracket")]
    UnmatchedClosingBracket { position: usize },
    #[error("`(` at position {position} is never closed")]
    UnmatchedOpeningBracket { position: usize },
    #[error("invalid literal at position {position}")]
    InvalidLiteral { position: usize, source: ParseError },
    #[error("expression has no operand")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShuntError {
    #[error("invalid symbol `{symbol}` at position {position}")]
    InvalidSymbol { symbol: char, position: usize },
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("converter invariant broken: {0}")]
    Internal(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("malformed RPN program")]
    Syntax,
    #[error("math error: {0}")]
    Math(MathError),
    #[error("division by zero")]
    DivByZero,
    #[error("factorial of a negative value")]
    FactorialOfNegative,
    #[error("evaluator invariant broken: {0}")]
    Internal(&'static str),
}

impl From<MathError> for EvalError {
    fn from(error: MathError) -> Self {
        match error {
            MathError::DivByZero => EvalError::DivByZero,
            MathError::FactorialOfNegative => EvalError::FactorialOfNegative,
            other => EvalError::Math(other),
        }
    }
}

/// Failure of [`calculate`](crate::calculate): either stage of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error(transparent)]
    Shunt(#[from] ShuntError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}
