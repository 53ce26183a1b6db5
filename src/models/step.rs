use serde::{Deserialize, Serialize};
use crate::errors::InfraFlowError;

/// Kind of a simulated pipeline step, in canonical execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PipelineStepKind {
    #[serde(rename = "LINT")]
    Lint,
    #[serde(rename = "SECURITY")]
    SecurityScan,
    #[serde(rename = "PLAN")]
    Plan,
    #[serde(rename = "PROVISION")]
    Provision,
    #[serde(rename = "CONFIGURE")]
    Configure,
}

impl PipelineStepKind {
    pub const ALL: [PipelineStepKind; 5] = [
        PipelineStepKind::Lint,
        PipelineStepKind::SecurityScan,
        PipelineStepKind::Plan,
        PipelineStepKind::Provision,
        PipelineStepKind::Configure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lint => "LINT",
            Self::SecurityScan => "SECURITY",
            Self::Plan => "PLAN",
            Self::Provision => "PROVISION",
            Self::Configure => "CONFIGURE",
        }
    }

    /// Configure runs against the playbook; every other step reads the
    /// provisioning code.
    pub fn uses_configuration_code(&self) -> bool {
        matches!(self, Self::Configure)
    }
}

impl std::fmt::Display for PipelineStepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStepStatus {
    #[default]
    Idle,
    Running,
    Completed,
    Failed,
}

impl PipelineStepStatus {
    pub fn can_transition_to(&self, next: PipelineStepStatus) -> bool {
        use PipelineStepStatus::*;
        matches!(
            (self, next),
            (_, Idle) | (Idle, Running) | (Running, Completed) | (Running, Failed)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for PipelineStepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineStep {
    pub id: String,
    pub kind: PipelineStepKind,
    pub label: String,
    pub status: PipelineStepStatus,
    /// Lines emitted by this step during the current run.
    pub output: Vec<String>,
}

impl PipelineStep {
    pub fn new(id: &str, kind: PipelineStepKind, label: &str) -> Self {
        Self {
            id: id.to_string(),
            kind,
            label: label.to_string(),
            status: PipelineStepStatus::Idle,
            output: Vec::new(),
        }
    }

    pub fn transition(&mut self, next: PipelineStepStatus) -> Result<(), InfraFlowError> {
        if !self.status.can_transition_to(next) {
            return Err(InfraFlowError::InvalidTransition(format!(
                "step {} cannot move from {} to {}",
                self.kind, self.status, next
            )));
        }
        self.status = next;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.status = PipelineStepStatus::Idle;
        self.output.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_wire_names() {
        let json = serde_json::to_string(&PipelineStepKind::SecurityScan).unwrap();
        assert_eq!(json, "\"SECURITY\"");
        let parsed: PipelineStepKind = serde_json::from_str("\"PROVISION\"").unwrap();
        assert_eq!(parsed, PipelineStepKind::Provision);
    }

    #[test]
    fn test_canonical_order() {
        let names: Vec<&str> = PipelineStepKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["LINT", "SECURITY", "PLAN", "PROVISION", "CONFIGURE"]);
    }

    #[test]
    fn test_only_configure_uses_playbook() {
        for kind in PipelineStepKind::ALL {
            assert_eq!(kind.uses_configuration_code(), kind == PipelineStepKind::Configure);
        }
    }

    #[test]
    fn test_legal_transitions() {
        use PipelineStepStatus::*;
        assert!(Idle.can_transition_to(Running));
        assert!(Running.can_transition_to(Completed));
        assert!(Running.can_transition_to(Failed));
        assert!(Completed.can_transition_to(Idle));
        assert!(!Idle.can_transition_to(Completed));
        assert!(!Completed.can_transition_to(Running));
    }

    #[test]
    fn test_step_transition_rejects_skip() {
        let mut step = PipelineStep::new("1", PipelineStepKind::Lint, "LINT");
        let err = step.transition(PipelineStepStatus::Completed).unwrap_err();
        assert_eq!(err.error_type(), "InvalidTransitionError");
        assert_eq!(step.status, PipelineStepStatus::Idle);
    }

    #[test]
    fn test_reset_clears_output() {
        let mut step = PipelineStep::new("1", PipelineStepKind::Lint, "LINT");
        step.transition(PipelineStepStatus::Running).unwrap();
        step.output.push("[INFO] line".into());
        step.transition(PipelineStepStatus::Completed).unwrap();
        step.reset();
        assert_eq!(step.status, PipelineStepStatus::Idle);
        assert!(step.output.is_empty());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&PipelineStepStatus::Running).unwrap(), "\"running\"");
    }
}
