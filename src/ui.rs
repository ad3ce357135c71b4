//! Terminal output for the `once` subcommand.
//!
//! Uses `console` styles so a one-off check reads at a glance: green for a
//! delivered status, yellow for nothing to do, red for errors.

use console::Style;

use crate::monitor::{CycleOutcome, MonitorState};

pub struct CycleReport {
    green: Style,
    yellow: Style,
    red: Style,
    dim: Style,
}

impl Default for CycleReport {
    fn default() -> Self {
        Self {
            green: Style::new().green().bold(),
            yellow: Style::new().yellow(),
            red: Style::new().red().bold(),
            dim: Style::new().dim(),
        }
    }
}

impl CycleReport {
    fn style_for(&self, outcome: &CycleOutcome) -> (&Style, &'static str) {
        match outcome {
            CycleOutcome::Notified { delivered: true, .. } => (&self.green, "✓"),
            CycleOutcome::Notified { delivered: false, .. } => (&self.red, "✗"),
            CycleOutcome::Unchanged | CycleOutcome::Quiet => (&self.yellow, "•"),
            CycleOutcome::ErrorNotified { .. } | CycleOutcome::ErrorSuppressed(_) => {
                (&self.red, "✗")
            }
        }
    }

    /// One styled line for the outcome, then the resulting cursor.
    pub fn print(&self, outcome: &CycleOutcome, state: &MonitorState) {
        let (style, marker) = self.style_for(outcome);
        println!("  {} {outcome}", style.apply_to(marker));
        println!(
            "  {}",
            self.dim.apply_to(format!("next from_date: {}", state.cursor))
        );
    }
}
