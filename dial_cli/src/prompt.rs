//! Operator-facing lines printed on stdout during calibration.

use dial_core::{Cursor, SessionStep};

pub const KEY_HELP: &str =
    "keys: space = confirm, enter = skip, left/right = fine -/+50, down/up = coarse -/+500";

fn position(c: &Cursor) -> String {
    format!(
        "{} dial, checkpoint {} ({}/{}): duty {}",
        c.dial,
        c.checkpoint,
        c.index + 1,
        c.dial.checkpoints().len(),
        c.working
    )
}

/// Text for a session step; `Idle` prints nothing.
pub fn describe(step: &SessionStep) -> Option<String> {
    let line = match step {
        SessionStep::Idle => return None,
        SessionStep::Entered(c) => format!("move the hand to the mark\n{}", position(c)),
        SessionStep::Adjusted(c) => format!("  duty {}", c.working),
        SessionStep::Recorded {
            dial,
            checkpoint,
            duty,
            next,
        } => {
            let mut s = format!("recorded {dial} {checkpoint} = {duty}");
            if let Some(c) = next {
                s.push('\n');
                s.push_str(&position(c));
            }
            s
        }
        SessionStep::Skipped {
            dial,
            checkpoint,
            kept,
            next,
        } => {
            let mut s = match kept {
                Some(d) => format!("skipped {dial} {checkpoint} (kept {d})"),
                None => format!("skipped {dial} {checkpoint}"),
            };
            if let Some(c) = next {
                s.push('\n');
                s.push_str(&position(c));
            }
            s
        }
        SessionStep::Complete => "calibration complete".to_string(),
    };
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dial_core::Dial;

    #[test]
    fn idle_is_silent() {
        assert_eq!(describe(&SessionStep::Idle), None);
    }

    #[test]
    fn recorded_shows_next_position() {
        let next = Cursor {
            dial: Dial::Minutes,
            index: 0,
            checkpoint: 0,
            working: 800,
        };
        let text = describe(&SessionStep::Recorded {
            dial: Dial::Seconds,
            checkpoint: 60,
            duty: 6100,
            next: Some(next),
        })
        .unwrap();
        assert_eq!(
            text,
            "recorded seconds 60 = 6100\nminutes dial, checkpoint 0 (1/7): duty 800"
        );
    }
}
