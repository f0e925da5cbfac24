use std::collections::VecDeque;
use std::fmt::{self, Display};

use big_num::BigInt;
use tracing::trace;

use super::operators::{OperatorDescriptor, OperatorKind};
use crate::error::EvalError;

/// Stands for "the next operand" when a program is rendered as text.
pub const VALUE_SYMBOL: char = 'n';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpnSymbol {
    /// Take the next value from the [`OperandList`].
    Value,
    /// A `(` that was never closed. Evaluating it is a syntax error.
    LeftBracket,
    Operator(&'static OperatorDescriptor),
}

impl RpnSymbol {
    pub fn symbol(self) -> char {
        match self {
            RpnSymbol::Value => VALUE_SYMBOL,
            RpnSymbol::LeftBracket => '(',
            RpnSymbol::Operator(descriptor) => descriptor.symbol,
        }
    }
}

/// Postfix symbol sequence produced by [`shunt`](crate::shunt). Values are not stored in the
/// program; each [`RpnSymbol::Value`] consumes the next entry of the paired [`OperandList`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RpnProgram {
    symbols: Vec<RpnSymbol>,
}

impl RpnProgram {
    pub fn new(symbols: Vec<RpnSymbol>) -> Self {
        RpnProgram { symbols }
    }

    pub fn symbols(&self) -> &[RpnSymbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Display for RpnProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text: String = self.symbols.iter().map(|s| s.symbol()).collect();
        f.write_str(&text)
    }
}

/// Operands in the order they were written; the first parsed comes out first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperandList {
    operands: VecDeque<BigInt>,
}

impl OperandList {
    pub fn pop(&mut self) -> Option<BigInt> {
        self.operands.pop_front()
    }

    pub fn len(&self) -> usize {
        self.operands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operands.is_empty()
    }
}

impl From<Vec<BigInt>> for OperandList {
    fn from(operands: Vec<BigInt>) -> Self {
        OperandList { operands: operands.into() }
    }
}

/// Runs `program` on a stack machine. Exactly one value must be left when the program ends.
pub fn evaluate(program: &RpnProgram, mut operands: OperandList) -> Result<BigInt, EvalError> {
    let mut stack: Vec<BigInt> = Vec::with_capacity(operands.len());
    for symbol in program.symbols() {
        match *symbol {
            RpnSymbol::Value => {
                let value = operands
                    .pop()
                    .ok_or(EvalError::Internal("program reads more values than were parsed"))?;
                stack.push(value);
            }
            RpnSymbol::LeftBracket => return Err(EvalError::Syntax),
            RpnSymbol::Operator(descriptor) => {
                let result = match descriptor.kind {
                    OperatorKind::Binary(operator) => {
                        let b = stack.pop().ok_or(EvalError::Syntax)?;
                        let a = stack.pop().ok_or(EvalError::Syntax)?;
                        operator.apply(&a, &b)?
                    }
                    OperatorKind::Prefix(operator) | OperatorKind::Postfix(operator) => {
                        let a = stack.pop().ok_or(EvalError::Syntax)?;
                        operator.apply(&a)?
                    }
                };
                trace!(operator = %descriptor.symbol, %result, "applied");
                stack.push(result);
            }
        }
    }

    match stack.pop() {
        Some(result) if stack.is_empty() => Ok(result),
        _ => Err(EvalError::Syntax),
    }
}
