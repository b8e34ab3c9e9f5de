//! Progress display for the provisioning pipeline

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

/// How a completed step changed the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Host state was mutated toward the target
    Changed,
    /// Idempotency gate short-circuited; nothing to do
    Unchanged,
}

/// Progress display for the sequential provisioning steps
pub struct ProgressDisplay {
    step_pb: ProgressBar,
    total: u64,
}

impl ProgressDisplay {
    /// Create a new progress display with total step count
    pub fn new(total_steps: u64) -> Self {
        let step_style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let step_pb = ProgressBar::new(total_steps);
        step_pb.set_style(step_style);

        Self {
            step_pb,
            total: total_steps,
        }
    }

    /// Announce the step about to run
    pub fn start_step(&self, name: &str, current: u64) {
        self.step_pb
            .set_message(format!("({current}/{}) {name}", self.total));
        // Plain println so progress text survives pipes and service logs;
        // the bar itself is hidden off-tty.
        self.step_pb.suspend(|| {
            println!("==> {}", Style::new().bold().apply_to(name));
        });
    }

    /// Record a completed step
    pub fn finish_step(&self, name: &str, outcome: StepOutcome) {
        let note = match outcome {
            StepOutcome::Changed => Style::new().green().apply_to("done"),
            StepOutcome::Unchanged => Style::new().dim().apply_to("already satisfied"),
        };
        self.step_pb.suspend(|| {
            println!("    {name}: {note}");
        });
        self.step_pb.inc(1);
    }

    /// All steps finished
    pub fn finish(&self) {
        self.step_pb.finish_with_message("provisioning complete");
    }

    /// Abandon on the first failure
    pub fn abandon(&self) {
        self.step_pb.abandon();
    }
}
