use std::fmt::Write as _;

use quiz_core::model::{EndReason, SessionStatus, SessionSummary};
use services::{QuestionView, SessionSnapshot, format_countdown};

pub fn help() -> &'static str {
    "commands:\n  \
     start | s            start a new quiz\n  \
     restart | r          discard this quiz and draw a new one\n  \
     <question> <option>  answer, e.g. `3 2`\n  \
     jump <n> | j <n>     show question n\n  \
     list | l             show all questions\n  \
     status | t           time left and score\n  \
     finish | f           end the quiz now\n  \
     quit | q             leave"
}

/// A question with its options; the chosen option is marked `+` if right, `x` if wrong.
pub fn question(view: &QuestionView) -> String {
    let mut out = format!("{}. {}\n", view.number, view.text);
    if view.options.is_empty() {
        out.push_str("   (no options)\n");
    }
    for (index, option) in view.options.iter().enumerate() {
        let mark = match (option.selected, option.is_correct) {
            (true, true) => '+',
            (true, false) => 'x',
            _ => ' ',
        };
        let _ = writeln!(out, " {mark} {}) {}", index + 1, option.text);
    }
    out
}

pub fn status(snapshot: &SessionSnapshot) -> String {
    match snapshot.status {
        SessionStatus::NotStarted => "not started; type `start`".to_owned(),
        SessionStatus::Running => format!(
            "time left {}  correct {}  answered {}/{}",
            format_countdown(snapshot.remaining_secs),
            snapshot.correct,
            snapshot.total,
            snapshot.question_count
        ),
        SessionStatus::Ended => format!(
            "ended  correct {}  answered {}/{}",
            snapshot.correct, snapshot.total, snapshot.question_count
        ),
    }
}

pub fn summary(summary: &SessionSummary) -> String {
    let reason = match summary.end_reason {
        EndReason::Finished => "finished",
        EndReason::TimedOut => "time is up",
    };
    format!(
        "quiz {reason}: {} correct, {} wrong, {} unanswered (of {})\ntype `restart` to go again",
        summary.correct,
        summary.incorrect(),
        summary.unanswered(),
        summary.question_count
    )
}

/// Whether a countdown value is worth printing: whole minutes and the last ten seconds.
///
/// The full length is skipped; starting a quiz already prints it.
pub fn announce_remaining(remaining_secs: u32, session_secs: u32) -> bool {
    remaining_secs > 0
        && remaining_secs < session_secs
        && (remaining_secs % 60 == 0 || remaining_secs <= 10)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{OptionId, QuestionId};
    use quiz_core::time::fixed_now;
    use services::OptionView;

    fn view(selected: Option<usize>) -> QuestionView {
        let options = ["Paris", "Rome"]
            .iter()
            .enumerate()
            .map(|(i, text)| OptionView {
                id: OptionId::new(0, i as u32),
                text: (*text).to_owned(),
                is_correct: i == 0,
                selected: selected == Some(i),
            })
            .collect();
        QuestionView {
            id: QuestionId::new(1),
            number: 4,
            text: "Capital of France?".into(),
            answered: selected.is_some(),
            options,
        }
    }

    #[test]
    fn renders_wrong_pick() {
        let text = question(&view(Some(1)));
        assert_eq!(
            text,
            "4. Capital of France?\n   1) Paris\n x 2) Rome\n"
        );
    }

    #[test]
    fn renders_right_pick() {
        assert!(question(&view(Some(0))).contains(" + 1) Paris"));
    }

    #[test]
    fn running_status_shows_clock() {
        let snapshot = SessionSnapshot {
            status: SessionStatus::Running,
            remaining_secs: 65,
            correct: 2,
            total: 3,
            question_count: 50,
            ..SessionSnapshot::default()
        };
        assert_eq!(status(&snapshot), "time left 1:05  correct 2  answered 3/50");
    }

    #[test]
    fn summary_mentions_reason() {
        let text = summary(&SessionSummary {
            question_count: 10,
            answered: 4,
            correct: 3,
            started_at: fixed_now(),
            ended_at: fixed_now(),
            end_reason: EndReason::TimedOut,
        });
        assert!(text.starts_with("quiz time is up: 3 correct, 1 wrong, 6 unanswered (of 10)"));
    }

    #[test]
    fn announces_minutes_and_final_seconds() {
        assert!(announce_remaining(1140, 1200));
        assert!(announce_remaining(60, 1200));
        assert!(announce_remaining(10, 1200));
        assert!(announce_remaining(1, 1200));
        assert!(!announce_remaining(59, 1200));
        assert!(!announce_remaining(0, 1200));
    }

    #[test]
    fn fresh_countdown_is_not_announced_twice() {
        assert!(!announce_remaining(1200, 1200));
        assert!(!announce_remaining(8, 8));
        assert!(announce_remaining(7, 8));
    }
}
