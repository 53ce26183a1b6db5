use crate::models::PipelineStepKind;

/// Messages sent from the simulator to a terminal renderer or other consumer.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    RunStarted {
        project_name: String,
    },
    StepStarted {
        kind: PipelineStepKind,
        label: String,
    },
    LogLine {
        kind: PipelineStepKind,
        line: String,
    },
    StepCompleted {
        kind: PipelineStepKind,
        label: String,
        lines: usize,
    },
    RunCompleted {
        total_lines: usize,
        duration_ms: u64,
    },
}
