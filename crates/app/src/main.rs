mod intent;
mod render;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use quiz_core::model::{
    AnswerOutcome, DEFAULT_MAX_QUESTIONS, DEFAULT_SESSION_SECS, FinishOutcome, QuizSettings,
    SettingsError,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{QuizRunner, QuizSession};
use storage::FileBank;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use intent::{QuizIntent, parse_intent};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidNumber { flag: &'static str, raw: String },
    Settings(SettingsError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidNumber { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
            ArgsError::Settings(err) => write!(f, "invalid settings: {err}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_number<T: std::str::FromStr>(flag: &'static str, raw: String) -> Result<T, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidNumber { flag, raw })
}

fn env_number<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ArgsError> {
    std::env::var(name)
        .ok()
        .map(|raw| parse_number(name, raw))
        .transpose()
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--bank <path>] [--max-questions <n>] [--secs <n>] [--seed <n>] [--strict]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --bank questions.txt");
    eprintln!("  --max-questions {DEFAULT_MAX_QUESTIONS}");
    eprintln!("  --secs {DEFAULT_SESSION_SECS}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_BANK_PATH, QUIZ_MAX_QUESTIONS, QUIZ_SESSION_SECS, QUIZ_SEED, QUIZ_STRICT, RUST_LOG");
}

struct Args {
    bank: PathBuf,
    settings: QuizSettings,
    seed: Option<u64>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut bank = std::env::var("QUIZ_BANK_PATH")
            .map_or_else(|_| PathBuf::from("questions.txt"), PathBuf::from);
        let mut max_questions = env_number("QUIZ_MAX_QUESTIONS")?.unwrap_or(DEFAULT_MAX_QUESTIONS);
        let mut session_secs = env_number("QUIZ_SESSION_SECS")?.unwrap_or(DEFAULT_SESSION_SECS);
        let mut seed = env_number("QUIZ_SEED")?;
        let mut strict = std::env::var("QUIZ_STRICT").is_ok_and(|v| matches!(v.as_str(), "1" | "true"));

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--bank" => bank = PathBuf::from(require_value(args, "--bank")?),
                "--max-questions" => {
                    max_questions = parse_number("--max-questions", require_value(args, "--max-questions")?)?;
                }
                "--secs" => session_secs = parse_number("--secs", require_value(args, "--secs")?)?,
                "--seed" => seed = Some(parse_number("--seed", require_value(args, "--seed")?)?),
                "--strict" => strict = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let settings =
            QuizSettings::new(max_questions, session_secs, strict).map_err(ArgsError::Settings)?;
        Ok(Self {
            bank,
            settings,
            seed,
        })
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "app=info,services=info,storage=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Apply one intent. Returns `false` when the user wants to leave.
fn apply(runner: &QuizRunner, intent: QuizIntent) -> bool {
    match intent {
        QuizIntent::Start | QuizIntent::Restart => {
            runner.start();
            for view in runner.question_views() {
                println!("{}", render::question(&view));
            }
            println!("{}", render::status(&runner.snapshot()));
        }
        QuizIntent::Finish => {
            if runner.finish() == FinishOutcome::NotRunning {
                println!("no quiz is running");
            }
        }
        QuizIntent::Answer { question, option } => {
            let Some(view) = runner.jump_to(question - 1) else {
                println!("there is no question {question}");
                return true;
            };
            let Some(chosen) = view.options.get(option - 1) else {
                println!("question {question} has no option {option}");
                return true;
            };
            match runner.select_answer(view.id, chosen.id) {
                AnswerOutcome::Accepted { is_correct } => {
                    println!("{}", if is_correct { "correct" } else { "wrong" });
                    if let Some(updated) = runner.jump_to(question - 1) {
                        println!("{}", render::question(&updated));
                    }
                    println!("{}", render::status(&runner.snapshot()));
                }
                AnswerOutcome::AlreadyAnswered => println!("question {question} is already answered"),
                AnswerOutcome::NotRunning => println!("no quiz is running"),
                AnswerOutcome::UnknownQuestion | AnswerOutcome::UnknownOption => {
                    println!("question {question} cannot be answered");
                }
            }
        }
        QuizIntent::JumpTo(number) => match runner.jump_to(number - 1) {
            Some(view) => println!("{}", render::question(&view)),
            None => println!("there is no question {number}"),
        },
        QuizIntent::List => {
            for view in runner.question_views() {
                println!("{}", render::question(&view));
            }
        }
        QuizIntent::Status => println!("{}", render::status(&runner.snapshot())),
        QuizIntent::Help => println!("{}", render::help()),
        QuizIntent::Quit => return false,
    }
    true
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let session_secs = args.settings.session_secs();
    tracing::info!(
        bank = %args.bank.display(),
        max_questions = args.settings.max_questions(),
        session_secs,
        seeded = args.seed.is_some(),
        "starting quiz"
    );
    let session = QuizSession::new(args.settings).with_rng(rng);
    let runner = QuizRunner::new(session, Arc::new(FileBank::new(&args.bank)));

    // Already logged by the runner; the quiz still starts, just without questions.
    if let Err(err) = runner.load_bank().await {
        eprintln!("could not load {}: {err}", args.bank.display());
    }
    println!("{}", render::help());

    let mut updates = runner.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut reported_end = None;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_intent(&line) {
                    Ok(intent) => {
                        if !apply(&runner, intent) {
                            break;
                        }
                    }
                    Err(err) => println!("{err}"),
                }
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                if snapshot.is_ended() {
                    if reported_end != Some(snapshot.generation) {
                        reported_end = Some(snapshot.generation);
                        if let Some(summary) = runner.summary() {
                            println!("{}", render::summary(&summary));
                        }
                    }
                } else if snapshot.is_running() && render::announce_remaining(snapshot.remaining_secs, session_secs) {
                    println!("{}", render::status(&snapshot));
                }
            }
        }
    }

    runner.finish();
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
