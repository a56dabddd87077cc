//! Chat text to sprint command parsing.

use super::SprintError;

/// Character every command starts with.
pub const COMMAND_PREFIX: char = '/';

/// A parsed chat command. Arguments are kept raw; each handler validates
/// its own so that state checks can run before input checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SprintCommand {
    /// `/sprint [minutes]`
    Start { duration: Option<String> },
    /// `/join`
    Join,
    /// `/words <count>`
    Words { count: Option<String> },
    /// `/end`
    End,
    /// `/leave`
    Leave,
    /// Prefixed text that names no known command.
    Unknown { name: String },
}

impl SprintCommand {
    /// Parses an inbound chat message.
    ///
    /// Returns `None` for ordinary chatter (text that does not start with
    /// the prefix). Matching is case-insensitive; the first whitespace
    /// separated token selects the command and the next one is its argument.
    pub fn parse(text: &str) -> Option<Self> {
        let lowered = text.to_lowercase();
        if !lowered.starts_with(COMMAND_PREFIX) {
            return None;
        }

        let mut tokens = lowered.split_whitespace();
        let name = tokens.next().unwrap_or_default();
        let first_arg = tokens.next().map(str::to_string);

        let command = match name {
            "/sprint" => SprintCommand::Start { duration: first_arg },
            "/join" => SprintCommand::Join,
            "/words" => SprintCommand::Words { count: first_arg },
            "/end" => SprintCommand::End,
            "/leave" => SprintCommand::Leave,
            other => SprintCommand::Unknown {
                name: other.to_string(),
            },
        };
        Some(command)
    }

    /// Command name for logging.
    pub fn name(&self) -> &str {
        match self {
            SprintCommand::Start { .. } => "/sprint",
            SprintCommand::Join => "/join",
            SprintCommand::Words { .. } => "/words",
            SprintCommand::End => "/end",
            SprintCommand::Leave => "/leave",
            SprintCommand::Unknown { name } => name,
        }
    }
}

/// Parses the `/words` argument as a non-negative whole number.
///
/// Only the leading integer counts, so `12.5` records 12. Counts beyond
/// `u64::MAX` saturate.
pub fn parse_word_count(arg: Option<&str>) -> Result<u64, SprintError> {
    arg.and_then(leading_integer)
        .filter(|n| *n >= 0)
        .map(|n| u64::try_from(n).unwrap_or(u64::MAX))
        .ok_or(SprintError::InvalidWordCount)
}

/// Reads the integer at the start of `raw`, ignoring whatever follows.
///
/// Leading whitespace and one sign are accepted. `None` when no digit
/// follows them. Magnitudes too large for `i128` saturate.
pub(crate) fn leading_integer(raw: &str) -> Option<i128> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: Vec<i128> = rest
        .chars()
        .map_while(|c| c.to_digit(10))
        .map(i128::from)
        .collect();
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits
        .into_iter()
        .fold(0i128, |acc, d| acc.saturating_mul(10).saturating_add(d));
    Some(if negative { -magnitude } else { magnitude })
}
