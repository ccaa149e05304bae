use std::fmt;

/// What the user typed, before it is resolved against the working set.
///
/// Question and option numbers are one-based, as shown on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Start,
    Restart,
    Finish,
    Answer { question: usize, option: usize },
    JumpTo(usize),
    List,
    Status,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentError {
    Empty,
    Unknown(String),
    BadNumber(String),
}

impl fmt::Display for IntentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntentError::Empty => write!(f, "type a command, or `help`"),
            IntentError::Unknown(cmd) => write!(f, "unknown command: {cmd} (try `help`)"),
            IntentError::BadNumber(raw) => write!(f, "expected a number >= 1, got `{raw}`"),
        }
    }
}

impl std::error::Error for IntentError {}

/// Parse one input line.
///
/// `<question> <option>` answers, e.g. `3 2`; everything else is a keyword.
pub fn parse_intent(line: &str) -> Result<QuizIntent, IntentError> {
    let mut words = line.split_whitespace();
    let Some(first) = words.next() else {
        return Err(IntentError::Empty);
    };

    let intent = match first.to_ascii_lowercase().as_str() {
        "s" | "start" => QuizIntent::Start,
        "r" | "restart" => QuizIntent::Restart,
        "f" | "finish" => QuizIntent::Finish,
        "l" | "list" => QuizIntent::List,
        "t" | "status" => QuizIntent::Status,
        "h" | "help" | "?" => QuizIntent::Help,
        "q" | "quit" | "exit" => QuizIntent::Quit,
        "j" | "jump" => {
            let raw = words.next().unwrap_or_default();
            QuizIntent::JumpTo(number(raw)?)
        }
        other if other.starts_with(|c: char| c.is_ascii_digit()) => {
            let question = number(other)?;
            let raw = words.next().unwrap_or_default();
            QuizIntent::Answer {
                question,
                option: number(raw)?,
            }
        }
        other => return Err(IntentError::Unknown(other.to_owned())),
    };
    Ok(intent)
}

fn number(raw: &str) -> Result<usize, IntentError> {
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(IntentError::BadNumber(raw.to_owned())),
    }
}
