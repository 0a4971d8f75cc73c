//! Parsing of interactive commands.

/// One line of user input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Deal a random hand.
    Deal,
    /// Deal a named scenario.
    Scenario(String),
    /// Act on the current hand; the raw text is parsed against the bet to call.
    Act(String),
    /// Ask the advisors to discuss a question.
    Discuss(String),
    /// Session statistics.
    Stats,
    /// Full hand history.
    History,
    /// Write the hand history to a file.
    Export(String),
    /// Reset the bankroll.
    Reset,
    /// Command list.
    Help,
    /// Leave.
    Quit,
    /// Blank line.
    Empty,
    /// Anything else.
    Unknown(String),
}

impl Command {
    /// Parse a line. Never fails; unrecognised input becomes `Unknown`.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match head.to_ascii_lowercase().as_str() {
            "" => Command::Empty,
            "new" | "n" | "deal" => Command::Deal,
            "scenario" if rest.is_empty() => Command::Scenario("premium_pair".to_string()),
            "scenario" => Command::Scenario(rest.to_string()),
            "fold" | "check" | "call" | "bet" | "raise" => Command::Act(line.to_ascii_lowercase()),
            "discuss" if rest.is_empty() => Command::Discuss("What should I do?".to_string()),
            "discuss" => Command::Discuss(rest.to_string()),
            "stats" => Command::Stats,
            "history" => Command::History,
            "export" if rest.is_empty() => Command::Export("hand_history.json".to_string()),
            "export" => Command::Export(rest.to_string()),
            "reset" => Command::Reset,
            "help" | "h" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            _ => Command::Unknown(line.to_string()),
        }
    }
}

/// Help text for the interactive loop.
pub const HELP: &str = "\
Commands:
  new | n | deal         Deal a random hand
  scenario <name>        Deal a training scenario (premium_pair, tough_decision,
                         bluff_spot, pocket_pair, drawing_hand)
  fold | check | call    Act on the current hand
  bet [x] | raise [x]    Bet or raise x (default: max(2 x bet to call, 5))
  discuss <question>     Ask the advisors to discuss the hand
  stats                  Session statistics
  history                Every hand this session
  export [file]          Write the hand history as JSON
  reset                  Reset the stack and history
  help | h               This list
  quit | q | exit        Leave";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Command::parse("n"), Command::Deal);
        assert_eq!(Command::parse("  DEAL "), Command::Deal);
        assert_eq!(
            Command::parse("scenario bluff_spot"),
            Command::Scenario("bluff_spot".into())
        );
        assert_eq!(Command::parse("Raise 12"), Command::Act("raise 12".into()));
        assert_eq!(Command::parse("fold"), Command::Act("fold".into()));
        assert_eq!(
            Command::parse("discuss is this a bluff?"),
            Command::Discuss("is this a bluff?".into())
        );
        assert_eq!(Command::parse("export out.json"), Command::Export("out.json".into()));
        assert_eq!(Command::parse("exit"), Command::Quit);
        assert_eq!(Command::parse(""), Command::Empty);
        assert_eq!(Command::parse("shove"), Command::Unknown("shove".into()));
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Command::parse("scenario"), Command::Scenario("premium_pair".into()));
        assert!(matches!(Command::parse("discuss"), Command::Discuss(_)));
        assert_eq!(
            Command::parse("export"),
            Command::Export("hand_history.json".into())
        );
    }
}
