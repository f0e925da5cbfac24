use big_num::{print_bigint, Base};
use tracing::{debug, info};

use crate::error::{CalcError, EvalError, ShuntError};
use crate::calculate;

/// One input line, classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// Nothing but whitespace.
    Blank,
    Quit,
    /// `out`: print the current output base.
    ShowBase,
    SetBase(Base),
    Expression(&'a str),
}

impl<'a> Command<'a> {
    pub fn parse(line: &'a str) -> Self {
        if line.trim().is_empty() {
            return Command::Blank;
        }
        match line {
            "quit" => Command::Quit,
            "out" => Command::ShowBase,
            _ => match line.parse::<Base>() {
                Ok(base) => Command::SetBase(base),
                Err(_) => Command::Expression(line),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Quit,
    Nothing,
    Line(String),
    /// A one-line diagnostic.
    Error(String),
}

/// Calculator state carried between lines: the output base and an optional length limit.
#[derive(Debug, Clone, Default)]
pub struct Session {
    base: Base,
    max_len: Option<usize>,
}

impl Session {
    pub fn new(base: Base) -> Self {
        Session { base, max_len: None }
    }

    /// Rejects expressions longer than `max_len` characters without evaluating them.
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    pub fn base(&self) -> Base {
        self.base
    }

    pub fn execute(&mut self, line: &str) -> Reply {
        match Command::parse(line) {
            Command::Blank => Reply::Nothing,
            Command::Quit => Reply::Quit,
            Command::ShowBase => Reply::Line(self.base.to_string()),
            Command::SetBase(base) => {
                info!(%base, "output base changed");
                self.base = base;
                Reply::Line(base.to_string())
            }
            Command::Expression(expression) => self.evaluate(expression),
        }
    }

    fn evaluate(&self, expression: &str) -> Reply {
        if let Some(max_len) = self.max_len {
            if expression.chars().count() > max_len {
                debug!(max_len, "expression too long");
                return Reply::Error(String::from("Expression too long!"));
            }
        }
        match calculate(expression) {
            Ok(value) => Reply::Line(print_bigint(&value, self.base)),
            Err(error) => {
                debug!(expression, %error, "evaluation failed");
                Reply::Error(diagnostic(expression, &error))
            }
        }
    }
}

/// The message shown to the user for `error`, raised while calculating `input`.
pub fn diagnostic(input: &str, error: &CalcError) -> String {
    let message = match error {
        CalcError::Shunt(ShuntError::InvalidSymbol { .. }) => {
            return format!("Invalid command \"{}\"!", input)
        }
        CalcError::Shunt(ShuntError::Syntax(_)) | CalcError::Eval(EvalError::Syntax) => "Syntax error!",
        CalcError::Shunt(ShuntError::Internal(_)) => "Error while parsing!",
        CalcError::Eval(EvalError::Math(_)) => "Math error!",
        CalcError::Eval(EvalError::DivByZero) => "Division by zero!",
        CalcError::Eval(EvalError::FactorialOfNegative) => "Input of factorial must not be negative!",
        CalcError::Eval(EvalError::Internal(_)) => "Error while evaluating!",
    };
    message.to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn line(s: &str) -> Reply {
        Reply::Line(s.to_string())
    }

    fn error(s: &str) -> Reply {
        Reply::Error(s.to_string())
    }

    #[test]
    fn test_command_parse() {
        assert_eq!(Command::parse(""), Command::Blank);
        assert_eq!(Command::parse("   "), Command::Blank);
        assert_eq!(Command::parse("quit"), Command::Quit);
        assert_eq!(Command::parse("out"), Command::ShowBase);
        assert_eq!(Command::parse("hex"), Command::SetBase(Base::Hexadecimal));
        assert_eq!(Command::parse("bin"), Command::SetBase(Base::Binary));
        assert_eq!(Command::parse("dec"), Command::SetBase(Base::Decimal));
        assert_eq!(Command::parse("1+1"), Command::Expression("1+1"));
        assert_eq!(Command::parse("quit "), Command::Expression("quit "));
    }

    #[test]
    fn test_base_switching() {
        let mut session = Session::default();
        assert_eq!(session.execute("out"), line("dec"));
        assert_eq!(session.execute("255+1"), line("256"));
        assert_eq!(session.execute("hex"), line("hex"));
        assert_eq!(session.base(), Base::Hexadecimal);
        assert_eq!(session.execute("255+1"), line("0x100"));
        assert_eq!(session.execute("-1"), line("0xf"));
        assert_eq!(session.execute("bin"), line("bin"));
        assert_eq!(session.execute("5"), line("0b0101"));
        assert_eq!(session.execute("-3"), line("0b101"));
        assert_eq!(session.execute("out"), line("bin"));
    }

    #[test]
    fn test_replies() {
        let mut session = Session::new(Base::Decimal);
        assert_eq!(session.execute(""), Reply::Nothing);
        assert_eq!(session.execute("quit"), Reply::Quit);
        assert_eq!(session.execute("(5+3)*2"), line("16"));
        assert_eq!(session.execute("25!"), line("15511210043330985984000000"));
    }

    #[test]
    fn test_diagnostics() {
        let mut session = Session::new(Base::Decimal);
        assert_eq!(session.execute("1 + y"), error("Invalid command \"1 + y\"!"));
        assert_eq!(session.execute("- 5"), error("Syntax error!"));
        assert_eq!(session.execute("1++"), error("Syntax error!"));
        assert_eq!(session.execute("(1+2"), error("Syntax error!"));
        assert_eq!(session.execute("7/(3-3)"), error("Division by zero!"));
        assert_eq!(session.execute("7%0"), error("Division by zero!"));
        assert_eq!(session.execute("(0-3)!"), error("Input of factorial must not be negative!"));
        assert_eq!(
            diagnostic("x", &CalcError::Shunt(ShuntError::Internal("broken"))),
            "Error while parsing!"
        );
        assert_eq!(
            diagnostic("x", &CalcError::Eval(EvalError::Internal("broken"))),
            "Error while evaluating!"
        );
    }

    #[test]
    fn test_max_len() {
        let mut session = Session::new(Base::Decimal).with_max_len(5);
        assert_eq!(session.execute("1+2+3"), line("6"));
        assert_eq!(session.execute("1+2+3+4"), error("Expression too long!"));
        // commands are not limited
        assert_eq!(session.execute("hex"), line("hex"));
    }
}
