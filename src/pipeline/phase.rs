use crate::models::{PipelineStep, PipelineStepKind};

pub struct StepDefinition {
    pub id: &'static str,
    pub kind: PipelineStepKind,
    pub label: &'static str,
    pub description: &'static str,
}

pub static STEPS: &[StepDefinition] = &[
    StepDefinition {
        id: "1",
        kind: PipelineStepKind::Lint,
        label: "LINT",
        description: "Syntax and style checks for the Terraform code and playbooks",
    },
    StepDefinition {
        id: "2",
        kind: PipelineStepKind::SecurityScan,
        label: "SCAN",
        description: "Static security scan of the declared resources",
    },
    StepDefinition {
        id: "3",
        kind: PipelineStepKind::Plan,
        label: "PLAN",
        description: "Execution plan with the resource delta",
    },
    StepDefinition {
        id: "4",
        kind: PipelineStepKind::Provision,
        label: "APPLY",
        description: "Resource creation against the plan",
    },
    StepDefinition {
        id: "5",
        kind: PipelineStepKind::Configure,
        label: "CONFIG",
        description: "Playbook run against the provisioned nodes",
    },
];

/// Fresh step list for a new project, one step per kind in canonical order.
pub fn initial_steps() -> Vec<PipelineStep> {
    STEPS.iter()
        .map(|def| PipelineStep::new(def.id, def.kind, def.label))
        .collect()
}

pub fn definition(kind: PipelineStepKind) -> Option<&'static StepDefinition> {
    STEPS.iter().find(|def| def.kind == kind)
}
