use sapper_core::{Coord, Coord2};
use thiserror::Error;

/// One player command: a 0-based cell and what to do there.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    pub coords: Coord2,
    pub action: Action,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// `mine`: toggle the suspected-mine mark.
    ToggleMark,
    /// `free`: reveal the cell.
    Reveal,
}

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected `<column> <row> <mine|free>`")]
    Malformed,
    #[error("column and row are 1-based numbers")]
    BadCoordinate,
    #[error("unknown action `{0}`, expected `mine` or `free`")]
    UnknownAction(String),
}

/// Parses `<column> <row> <mine|free>` with 1-based coordinates into a
/// 0-based [`Command`].
pub fn parse(line: &str) -> Result<Command, ParseError> {
    let mut tokens = line.split_whitespace();
    let (Some(column), Some(row), Some(action), None) =
        (tokens.next(), tokens.next(), tokens.next(), tokens.next())
    else {
        return Err(ParseError::Malformed);
    };

    let action = match action {
        "mine" => Action::ToggleMark,
        "free" => Action::Reveal,
        other => return Err(ParseError::UnknownAction(other.to_string())),
    };

    Ok(Command {
        coords: (coordinate(column)?, coordinate(row)?),
        action,
    })
}

fn coordinate(token: &str) -> Result<Coord, ParseError> {
    let value: u16 = token.parse().map_err(|_| ParseError::BadCoordinate)?;
    let zero_based = value.checked_sub(1).ok_or(ParseError::BadCoordinate)?;
    Coord::try_from(zero_based).map_err(|_| ParseError::BadCoordinate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_column_row_to_zero_based_x_y() {
        assert_eq!(
            parse("3 2 free"),
            Ok(Command {
                coords: (2, 1),
                action: Action::Reveal,
            })
        );
        assert_eq!(
            parse("1 9 mine"),
            Ok(Command {
                coords: (0, 8),
                action: Action::ToggleMark,
            })
        );
    }

    #[test]
    fn tolerates_extra_whitespace() {
        assert_eq!(
            parse("  4\t5   free "),
            Ok(Command {
                coords: (3, 4),
                action: Action::Reveal,
            })
        );
    }

    #[test]
    fn rejects_wrong_token_counts() {
        assert_eq!(parse(""), Err(ParseError::Malformed));
        assert_eq!(parse("1 2"), Err(ParseError::Malformed));
        assert_eq!(parse("1 2 free now"), Err(ParseError::Malformed));
    }

    #[test]
    fn rejects_zero_and_non_numeric_coordinates() {
        assert_eq!(parse("0 1 free"), Err(ParseError::BadCoordinate));
        assert_eq!(parse("1 0 mine"), Err(ParseError::BadCoordinate));
        assert_eq!(parse("a 1 free"), Err(ParseError::BadCoordinate));
        assert_eq!(parse("1 500 free"), Err(ParseError::BadCoordinate));
    }

    #[test]
    fn rejects_unknown_actions() {
        assert_eq!(
            parse("1 1 dig"),
            Err(ParseError::UnknownAction("dig".to_string()))
        );
    }
}
