//! Line commands accepted on stdin.

/// A parsed control command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    List,
    /// Play the track at this zero-based library index.
    Play(usize),
    Pause,
    Resume,
    Stop,
    Next,
    Prev,
    Show,
    Title(String),
    AddImage(String),
    /// Remove the image at this zero-based position in the track's list.
    RemoveImage(usize),
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  list                 show the library
  play N               play track N
  pause | resume | stop
  next | prev
  show                 print what is on display
  title TEXT           set the custom title (empty clears it)
  add-image PATH       attach an image to the current track
  remove-image N       detach image N from the current track
  help
  quit";

impl Command {
    /// Parse one input line. Numbers are 1-based as printed by `list`.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (line, ""),
        };

        let cmd = match word.to_ascii_lowercase().as_str() {
            "list" | "ls" => Self::List,
            "play" | "p" => Self::Play(parse_index(rest)?),
            "pause" => Self::Pause,
            "resume" => Self::Resume,
            "stop" => Self::Stop,
            "next" | "n" => Self::Next,
            "prev" => Self::Prev,
            "show" => Self::Show,
            "title" => Self::Title(rest.to_string()),
            "add-image" => {
                if rest.is_empty() {
                    return Err("add-image needs a path".to_string());
                }
                Self::AddImage(rest.to_string())
            }
            "remove-image" => Self::RemoveImage(parse_index(rest)?),
            "help" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            "" => return Err("empty command".to_string()),
            other => return Err(format!("unknown command: {other}")),
        };
        Ok(cmd)
    }
}

fn parse_index(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("expected a number from 1, got {s:?}")),
    }
}
