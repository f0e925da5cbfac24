//! Infix to RPN conversion.
//!
//! A single left-to-right pass over one expression line. Literals are read by
//! [`big_num::parse_literal`] and collected in an [`OperandList`]; the program only records
//! where they are used.
//!
//! A `-` is unary when the previous token still expects an operand, binary otherwise. A unary
//! minus right after `^` takes only its immediate operand (a literal or a bracket group, plus
//! any trailing `!`), so `2^-2` is `2^(-2)` even though unary minus binds looser than `^`.

use big_num::{parse_literal, BigInt};
use tracing::debug;

use super::operators::*;
use super::rpn::{OperandList, RpnProgram, RpnSymbol};
use crate::error::{ShuntError, SyntaxError};

/// The last significant token read, used to check what may follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Start,
    Value,
    LeftBracket,
    RightBracket,
    Operator(&'static OperatorDescriptor),
}

impl Token {
    fn begins_operand(self) -> bool {
        match self {
            Token::Value | Token::LeftBracket => true,
            Token::Operator(op) => op.is_prefix(),
            Token::Start | Token::RightBracket => false,
        }
    }

    fn expects_operand(self) -> bool {
        match self {
            Token::Start | Token::LeftBracket => true,
            Token::Operator(op) => op.is_binary() || op.is_prefix(),
            Token::Value | Token::RightBracket => false,
        }
    }
}

/// Whether `next` may directly follow `last`.
fn infix_syntax_ok(next: Token, last: Token) -> bool {
    if next.begins_operand() {
        last.expects_operand()
    } else {
        !last.expects_operand()
    }
}

/// An entry of the operator stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Operator(&'static OperatorDescriptor),
    Bracket,
    /// A `(` opened right after `^-`; closing it emits the unary minus.
    NegatedGroup { position: usize },
}

struct Shunter<'a> {
    input: &'a str,
    cursor: usize,
    last: Token,
    output: Vec<RpnSymbol>,
    operators: Vec<Pending>,
    operands: Vec<BigInt>,
}

impl<'a> Shunter<'a> {
    fn new(input: &'a str) -> Self {
        Shunter {
            input,
            cursor: 0,
            last: Token::Start,
            output: Vec::new(),
            operators: Vec::new(),
            operands: Vec::new(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.cursor..].chars().next()
    }

    fn run(mut self) -> Result<(RpnProgram, OperandList), ShuntError> {
        while let Some(c) = self.peek() {
            self.shunt_char(c)?;
        }
        while let Some(pending) = self.operators.pop() {
            match pending {
                Pending::Operator(op) => self.output.push(RpnSymbol::Operator(op)),
                // An unclosed `(` is drained too; the evaluator rejects it.
                Pending::Bracket => self.output.push(RpnSymbol::LeftBracket),
                Pending::NegatedGroup { position } => {
                    return Err(SyntaxError::UnmatchedOpeningBracket { position }.into())
                }
            }
        }
        if self.operands.is_empty() {
            return Err(SyntaxError::Empty.into());
        }
        Ok((RpnProgram::new(self.output), OperandList::from(self.operands)))
    }

    /// Consumes the token starting with `c`.
    fn shunt_char(&mut self, c: char) -> Result<(), ShuntError> {
        let position = self.cursor;
        match c {
            c if c.is_whitespace() => {
                self.cursor += c.len_utf8();
                Ok(())
            }
            UNARY_MINUS_SYMBOL => Err(ShuntError::InvalidSymbol { symbol: c, position }),
            '-' => self.shunt_minus(),
            '0'..='9' => {
                self.check_syntax(Token::Value, c)?;
                self.shunt_value()
            }
            '(' => {
                self.check_syntax(Token::LeftBracket, c)?;
                self.operators.push(Pending::Bracket);
                self.advance(Token::LeftBracket);
                Ok(())
            }
            ')' => {
                self.check_syntax(Token::RightBracket, c)?;
                let negated = self.close_bracket()?;
                self.advance(Token::RightBracket);
                if negated {
                    self.close_negation()?;
                }
                Ok(())
            }
            c => match lookup(c) {
                Some(op) => {
                    self.check_syntax(Token::Operator(op), c)?;
                    self.push_operator(op);
                    self.advance(Token::Operator(op));
                    Ok(())
                }
                None => Err(ShuntError::InvalidSymbol { symbol: c, position }),
            },
        }
    }

    fn check_syntax(&self, next: Token, symbol: char) -> Result<(), SyntaxError> {
        if infix_syntax_ok(next, self.last) {
            Ok(())
        } else {
            Err(SyntaxError::UnexpectedSymbol { symbol, position: self.cursor })
        }
    }

    // every token handled here is a single ASCII character
    fn advance(&mut self, token: Token) {
        self.cursor += 1;
        self.last = token;
    }

    fn shunt_value(&mut self) -> Result<(), ShuntError> {
        let position = self.cursor;
        let (value, consumed) = parse_literal(&self.input[position..])
            .map_err(|source| SyntaxError::InvalidLiteral { position, source })?;
        self.cursor += consumed;
        self.output.push(RpnSymbol::Value);
        self.operands.push(value);
        self.last = Token::Value;
        Ok(())
    }

    fn push_operator(&mut self, op: &'static OperatorDescriptor) {
        // Postfix operators apply to what is already in the output.
        if op.is_postfix() {
            self.output.push(RpnSymbol::Operator(op));
            return;
        }
        while let Some(&Pending::Operator(pending)) = self.operators.last() {
            if op.binds_tighter_than(pending) {
                break;
            }
            self.operators.pop();
            self.output.push(RpnSymbol::Operator(pending));
        }
        self.operators.push(Pending::Operator(op));
    }

    /// Pops operators down to the matching `(`. Returns whether that bracket opened a group
    /// negated by `^-`.
    fn close_bracket(&mut self) -> Result<bool, SyntaxError> {
        while let Some(pending) = self.operators.pop() {
            match pending {
                Pending::Operator(op) => self.output.push(RpnSymbol::Operator(op)),
                Pending::Bracket => return Ok(false),
                Pending::NegatedGroup { .. } => return Ok(true),
            }
        }
        Err(SyntaxError::UnmatchedClosingBracket { position: self.cursor })
    }

    fn shunt_minus(&mut self) -> Result<(), ShuntError> {
        let position = self.cursor;
        let unary = self.last.expects_operand();
        let op: &'static OperatorDescriptor = if unary { &UNARY_MINUS } else { &SUBTRACTION };
        self.check_syntax(Token::Operator(op), '-')?;

        let after_power = self.last == Token::Operator(&POWER);
        self.advance(Token::Operator(op));
        if unary && self.peek().map_or(false, char::is_whitespace) {
            return Err(SyntaxError::DetachedMinus { position }.into());
        }

        if !unary || !after_power {
            self.push_operator(op);
            return Ok(());
        }
        self.shunt_exponent_operand()
    }

    /// Starts the operand of a unary minus that follows `^`. A literal is negated at once; a
    /// bracket group is negated when its `)` is read.
    fn shunt_exponent_operand(&mut self) -> Result<(), ShuntError> {
        if self.peek() == Some('(') {
            self.operators.push(Pending::NegatedGroup { position: self.cursor });
            self.advance(Token::LeftBracket);
            Ok(())
        } else {
            self.shunt_value()?;
            self.close_negation()
        }
    }

    /// Emits the `!` chain applied to a just-finished `^-` operand, then the minus itself.
    fn close_negation(&mut self) -> Result<(), ShuntError> {
        while self.peek() == Some('!') {
            self.shunt_char('!')?;
        }
        self.output.push(RpnSymbol::Operator(&UNARY_MINUS));
        Ok(())
    }
}

/// Converts an expression to an RPN program and its operands.
///
/// Only the first line of `expression` is read: anything after the first line break is
/// ignored, so `"1+1\n5*5"` converts as `"1+1"`.
pub fn shunt(expression: &str) -> Result<(RpnProgram, OperandList), ShuntError> {
    let line = expression.lines().next().unwrap_or_default();
    let shunted = Shunter::new(line).run();
    match &shunted {
        Ok((program, operands)) => {
            debug!(expression = line, %program, operands = operands.len(), "shunted")
        }
        Err(error) => debug!(expression = line, %error, "shunt failed"),
    }
    shunted
}
