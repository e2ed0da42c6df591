//! UCI command parsing.

use super::UciError;
use crate::board::Color;
use crate::engine::SearchLimits;

/// Where a `position` command starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionStart {
    StartPos,
    Fen(String),
}

/// Arguments of `go`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GoParams {
    pub wtime: Option<u64>,
    pub btime: Option<u64>,
    pub winc: Option<u64>,
    pub binc: Option<u64>,
    pub movetime: Option<u64>,
    pub depth: Option<u32>,
    /// Run perft instead of a search
    pub perft: Option<usize>,
}

impl GoParams {
    /// Search limits as seen by `side`, whose clock governs the move.
    #[must_use]
    pub fn limits(&self, side: Color) -> SearchLimits {
        let (time_left_ms, increment_ms) = match side {
            Color::White => (self.wtime, self.winc),
            Color::Black => (self.btime, self.binc),
        };
        SearchLimits {
            time_left_ms,
            increment_ms,
            depth: self.depth,
            move_time_ms: self.movetime,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciCommand {
    Uci,
    IsReady,
    UciNewGame,
    Position {
        start: PositionStart,
        moves: Vec<String>,
    },
    Go(GoParams),
    SetOption {
        name: String,
        value: Option<String>,
    },
    Eval,
    Fen,
    Display,
    Quit,
    Unknown(String),
}

/// Parse one input line; blank lines yield `Ok(None)`.
pub fn parse_uci_command(line: &str) -> Result<Option<UciCommand>, UciError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some(&head) = parts.first() else {
        return Ok(None);
    };

    let cmd = match head {
        "uci" => UciCommand::Uci,
        "isready" => UciCommand::IsReady,
        "ucinewgame" => UciCommand::UciNewGame,
        "position" => parse_position(&parts[1..])?,
        "go" => UciCommand::Go(parse_go(&parts[1..])?),
        "setoption" => parse_setoption(&parts[1..])?,
        "eval" => UciCommand::Eval,
        "fen" => UciCommand::Fen,
        "d" => UciCommand::Display,
        "quit" => UciCommand::Quit,
        _ => UciCommand::Unknown(line.trim().to_string()),
    };
    Ok(Some(cmd))
}

fn parse_position(args: &[&str]) -> Result<UciCommand, UciError> {
    let moves_at = args.iter().position(|&a| a == "moves");
    let (setup, moves) = match moves_at {
        Some(idx) => (&args[..idx], &args[idx + 1..]),
        None => (args, &args[args.len()..]),
    };

    let start = match setup.split_first() {
        Some((&"startpos", [])) => PositionStart::StartPos,
        Some((&"fen", fields)) if !fields.is_empty() => PositionStart::Fen(fields.join(" ")),
        _ => return Err(UciError::MissingParts),
    };

    Ok(UciCommand::Position {
        start,
        moves: moves.iter().map(|m| (*m).to_string()).collect(),
    })
}

fn parse_value<T: std::str::FromStr>(name: &str, value: Option<&&str>) -> Result<T, UciError> {
    let Some(value) = value else {
        return Err(UciError::MissingParts);
    };
    value.parse().map_err(|_| UciError::InvalidValue {
        name: name.to_string(),
        value: (*value).to_string(),
    })
}

fn parse_go(args: &[&str]) -> Result<GoParams, UciError> {
    let mut params = GoParams::default();
    let mut i = 0;
    while i < args.len() {
        let key = args[i];
        let value = args.get(i + 1);
        match key {
            "wtime" => params.wtime = Some(parse_value(key, value)?),
            "btime" => params.btime = Some(parse_value(key, value)?),
            "winc" => params.winc = Some(parse_value(key, value)?),
            "binc" => params.binc = Some(parse_value(key, value)?),
            "movetime" => params.movetime = Some(parse_value(key, value)?),
            "depth" => params.depth = Some(parse_value(key, value)?),
            "perft" => params.perft = Some(parse_value(key, value)?),
            _ => {
                // flags such as `infinite` carry no value
                i += 1;
                continue;
            }
        }
        i += 2;
    }
    Ok(params)
}

/// `setoption name <words...> [value <words...>]`
fn parse_setoption(args: &[&str]) -> Result<UciCommand, UciError> {
    let mut name_parts: Vec<&str> = Vec::new();
    let mut value_parts: Vec<&str> = Vec::new();
    let mut mode = "";

    for &part in args {
        match part {
            "name" if mode.is_empty() => mode = "name",
            "value" if mode == "name" => mode = "value",
            _ => match mode {
                "name" => name_parts.push(part),
                "value" => value_parts.push(part),
                _ => {}
            },
        }
    }

    if name_parts.is_empty() {
        return Err(UciError::MissingParts);
    }
    let value = (!value_parts.is_empty()).then(|| value_parts.join(" "));
    Ok(UciCommand::SetOption {
        name: name_parts.join(" "),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> UciCommand {
        parse_uci_command(line).unwrap().unwrap()
    }

    #[test]
    fn simple_commands() {
        assert_eq!(parse_uci_command("   ").unwrap(), None);
        assert_eq!(parse("uci"), UciCommand::Uci);
        assert_eq!(parse("isready"), UciCommand::IsReady);
        assert_eq!(parse("d"), UciCommand::Display);
        assert_eq!(parse("foo bar"), UciCommand::Unknown("foo bar".to_string()));
    }

    #[test]
    fn position_forms() {
        assert_eq!(
            parse("position startpos moves e2e4 e7e5"),
            UciCommand::Position {
                start: PositionStart::StartPos,
                moves: vec!["e2e4".to_string(), "e7e5".to_string()],
            }
        );
        assert_eq!(
            parse("position fen 8/8/8/8/8/8/8/K1k5 w - - 0 1"),
            UciCommand::Position {
                start: PositionStart::Fen("8/8/8/8/8/8/8/K1k5 w - - 0 1".to_string()),
                moves: vec![],
            }
        );
        assert!(matches!(
            parse_uci_command("position"),
            Err(UciError::MissingParts)
        ));
        assert!(matches!(
            parse_uci_command("position fen moves e2e4"),
            Err(UciError::MissingParts)
        ));
    }

    #[test]
    fn go_parameters() {
        let UciCommand::Go(go) = parse("go wtime 1000 btime 2000 winc 10 binc 20 movetime 50 depth 4")
        else {
            panic!("expected go");
        };
        assert_eq!(go.depth, Some(4));
        let black = go.limits(Color::Black);
        assert_eq!(black.time_left_ms, Some(2000));
        assert_eq!(black.increment_ms, Some(20));
        assert_eq!(black.move_time_ms, Some(50));
        assert_eq!(go.limits(Color::White).time_left_ms, Some(1000));

        assert_eq!(parse("go infinite"), UciCommand::Go(GoParams::default()));
        assert!(matches!(
            parse_uci_command("go depth x"),
            Err(UciError::InvalidValue { .. })
        ));
        let UciCommand::Go(perft) = parse("go perft 3") else {
            panic!("expected go");
        };
        assert_eq!(perft.perft, Some(3));
    }

    #[test]
    fn setoption_names_with_spaces() {
        assert_eq!(
            parse("setoption name Move Overhead value 30"),
            UciCommand::SetOption {
                name: "Move Overhead".to_string(),
                value: Some("30".to_string()),
            }
        );
        assert_eq!(
            parse("setoption name Clear Hash"),
            UciCommand::SetOption {
                name: "Clear Hash".to_string(),
                value: None,
            }
        );
    }
}
