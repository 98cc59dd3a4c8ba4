//! Parsing of the lines a player types at the throw prompt.

use catchball_core::ThrowRequest;
use thiserror::Error;

/// Instruction entered at the prompt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum PromptCommand {
    /// Launch a ball with the provided parameters.
    Throw(ThrowRequest),
    /// Abandon the encounter.
    Quit,
}

/// Reasons a prompt line could not be understood.
#[derive(Clone, Debug, PartialEq, Error)]
pub(crate) enum InputError {
    /// Nothing but whitespace was entered.
    #[error("enter a velocity and an angle, e.g. `250 45`")]
    Empty,
    /// The line did not hold exactly two values.
    #[error("expected a velocity and an angle but found {0} value(s)")]
    WrongArity(usize),
    /// A value was not a number.
    #[error("'{0}' is not a number")]
    InvalidNumber(String),
}

/// Parses `velocity angle`, separated by whitespace or a comma, or `quit`.
pub(crate) fn parse_line(line: &str) -> Result<PromptCommand, InputError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }
    if matches!(trimmed.to_ascii_lowercase().as_str(), "q" | "quit" | "exit") {
        return Ok(PromptCommand::Quit);
    }

    let fields: Vec<&str> = trimmed
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|field| !field.is_empty())
        .collect();
    let [velocity, angle] = fields.as_slice() else {
        return Err(InputError::WrongArity(fields.len()));
    };

    Ok(PromptCommand::Throw(ThrowRequest::new(
        parse_number(velocity)?,
        parse_number(angle)?,
    )))
}

fn parse_number(field: &str) -> Result<f64, InputError> {
    field
        .parse::<f64>()
        .map_err(|_| InputError::InvalidNumber(field.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_space_or_comma_separated_pairs() {
        let expected = PromptCommand::Throw(ThrowRequest::new(250.0, 45.0));
        assert_eq!(parse_line("250 45"), Ok(expected));
        assert_eq!(parse_line(" 250,45 \n"), Ok(expected));
        assert_eq!(parse_line("250, 45"), Ok(expected));
    }

    #[test]
    fn recognises_quit() {
        assert_eq!(parse_line("Quit"), Ok(PromptCommand::Quit));
        assert_eq!(parse_line("q"), Ok(PromptCommand::Quit));
    }

    #[test]
    fn reports_malformed_lines() {
        assert_eq!(parse_line("   "), Err(InputError::Empty));
        assert_eq!(parse_line("250"), Err(InputError::WrongArity(1)));
        assert_eq!(parse_line("1 2 3"), Err(InputError::WrongArity(3)));
        assert_eq!(
            parse_line("fast 45"),
            Err(InputError::InvalidNumber("fast".to_owned()))
        );
    }
}
