use indicatif::{ProgressBar, ProgressStyle};
use crate::models::PipelineStepKind;
use crate::pipeline::PipelineEvent;
use crate::utils::formatting::format_duration;

/// Step progress bar shown while a pipeline run renders.
pub struct RunProgress {
    bar: ProgressBar,
}

impl RunProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::new(PipelineStepKind::ALL.len() as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("  {bar:30.cyan/dark_gray} {pos}/{len} steps | {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        Self { bar }
    }

    pub fn hidden() -> Self {
        Self { bar: ProgressBar::hidden() }
    }

    pub fn handle_event(&self, event: &PipelineEvent) {
        match event {
            PipelineEvent::RunStarted { project_name } => {
                self.bar.set_message(project_name.clone());
            }
            PipelineEvent::StepStarted { label, .. } => {
                self.bar.set_message(label.clone());
            }
            PipelineEvent::StepCompleted { .. } => {
                self.bar.inc(1);
            }
            PipelineEvent::RunCompleted { duration_ms, .. } => {
                self.bar.finish_with_message(format!("done in {}", format_duration(*duration_ms)));
            }
            PipelineEvent::LogLine { .. } => {}
        }
    }

    /// Print a line above the bar.
    pub fn println(&self, msg: &str) {
        self.bar.println(msg);
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl Default for RunProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_advances_per_completed_step() {
        let progress = RunProgress::hidden();
        progress.handle_event(&PipelineEvent::StepCompleted {
            kind: PipelineStepKind::Lint,
            label: "LINT".into(),
            lines: 3,
        });
        progress.handle_event(&PipelineEvent::LogLine {
            kind: PipelineStepKind::SecurityScan,
            line: "[INFO] scanning".into(),
        });
        assert_eq!(progress.position(), 1);
    }
}
