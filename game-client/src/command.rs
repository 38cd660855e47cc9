/// One line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Anything that is not a slash command. Kept verbatim.
    Guess(String),
    /// Skip the word, optionally checking a last guess first.
    Skip(Option<String>),
    Restart,
    Leaderboard,
    Help,
    Quit,
    Unknown(String),
}

pub const HELP_TEXT: &str = "\
Type the unscrambled word and press Enter.
  /skip [guess]   skip this word (a correct guess is still scored)
  /restart        start a new game
  /leaderboard    show the best scores
  /help           show this help
  /quit           leave the game";

impl Command {
    /// Parse a raw input line. Only the line terminator is removed, so a
    /// guess with stray spaces stays a wrong guess.
    pub fn parse(line: &str) -> Command {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let line = line.strip_suffix('\r').unwrap_or(line);

        let Some(rest) = line.strip_prefix('/') else {
            return Command::Guess(line.to_string());
        };

        let (name, argument) = match rest.split_once(' ') {
            Some((name, argument)) => (name, Some(argument)),
            None => (rest, None),
        };

        match name.to_ascii_lowercase().as_str() {
            "skip" | "s" => Command::Skip(
                argument
                    .filter(|guess| !guess.is_empty())
                    .map(str::to_string),
            ),
            "restart" | "r" => Command::Restart,
            "leaderboard" | "scores" => Command::Leaderboard,
            "help" | "h" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => Command::Unknown(name.to_string()),
        }
    }
}
