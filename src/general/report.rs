use std::io::Write;
use std::time::Duration;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::message::Destination;

/// Operator-facing progress lines. Colour is best effort; write errors on
/// stdout are ignored so a closed pipe never aborts a run.
#[derive(Clone, Copy, Debug)]
pub struct Reporter {
    choice: ColorChoice,
}

impl Reporter {
    pub fn new(choice: ColorChoice) -> Self {
        Reporter { choice }
    }

    fn line(&self, color: Option<Color>, text: &str) {
        let mut stdout = StandardStream::stdout(self.choice);
        if let Some(color) = color {
            let _ = stdout.set_color(ColorSpec::new().set_fg(Some(color)).set_intense(true));
        }
        let _ = writeln!(&mut stdout, "{}", text);
        let _ = stdout.reset();
    }

    pub fn sending_to(&self, destination: &Destination) {
        self.line(Some(Color::Blue), &format!("Sending OSC messages to {}", destination));
    }

    pub fn continuous_start(&self, destination: &Destination, duration: Duration) {
        self.line(
            Some(Color::Blue),
            &format!(
                "Sending continuous messages to {} for {} seconds",
                destination,
                format_secs(duration)
            ),
        );
    }

    pub fn batch_start(&self, index: usize, name: &str) {
        self.line(None, &format!("Test {}: {}", index, name));
    }

    pub fn sent_in(&self, sent: usize, elapsed: Duration) {
        self.line(
            Some(Color::Cyan),
            &format!("Sent {} messages in {:.2} seconds", sent, elapsed.as_secs_f64()),
        );
    }

    pub fn all_completed(&self) {
        self.line(Some(Color::Green), "All tests completed!");
    }

    /// Fatal errors go to stderr in red.
    pub fn fatal(&self, err: &dyn std::error::Error) {
        let mut stderr = StandardStream::stderr(self.choice);
        let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_intense(true));
        let _ = writeln!(&mut stderr, "Error: {}", err);
        let _ = stderr.reset();
    }
}

fn format_secs(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs.fract() == 0.0 {
        format!("{}", secs as u64)
    } else {
        format!("{}", secs)
    }
}
