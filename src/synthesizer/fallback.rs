use crate::models::PipelineStepKind;

pub const LINT_LOG: &[&str] = &[
    "[INFO] Initializing TFLint...",
    "[INFO] Checking Terraform syntax...",
    "[SUCCESS] All files follow HCL best practices.",
    "[INFO] Running ansible-lint...",
    "[SUCCESS] Playbooks validated.",
];

pub const SECURITY_LOG: &[&str] = &[
    "[INFO] Scanning with tfsec...",
    "[INFO] Analyzing AWS Resource permissions...",
    "[WARN] Low-risk issue: Public S3 bucket not explicitly blocked (ignoring per config).",
    "[SUCCESS] Security check passed. 0 high, 0 medium vulnerabilities.",
];

pub const PLAN_LOG: &[&str] = &[
    "[INFO] Refreshing Terraform state...",
    "[INFO] Generating execution plan...",
    "[INFO] Plan: 14 to add, 0 to change, 0 to destroy.",
    "[SUCCESS] Plan file saved to /tmp/tfplan.",
];

pub const PROVISION_LOG: &[&str] = &[
    "[INFO] Applying plan...",
    "[PROGRESS] aws_vpc.main: Creating... [10%]",
    "[PROGRESS] aws_vpc.main: Creation complete [100%]",
    "[PROGRESS] aws_eks_cluster.primary: Creating... [45%]",
    "[PROGRESS] aws_eks_cluster.primary: Still creating... [80%]",
    "[SUCCESS] Infrastructure provisioned successfully.",
];

pub const CONFIGURE_LOG: &[&str] = &[
    "[INFO] Connecting to worker nodes via SSH...",
    "[INFO] TASK [Update apt cache] ******************",
    "[INFO] ok: [node-01]",
    "[INFO] TASK [Install CloudWatch Agent] *********",
    "[INFO] changed: [node-01]",
    "[SUCCESS] Configuration drift corrected. Nodes are ready.",
];

pub const GENERIC_LOG: &[&str] = &[
    "[INFO] Executing step...",
    "[SUCCESS] Task completed.",
];

/// Canned transcript registered for `kind`, if any.
pub fn registered_log(kind: PipelineStepKind) -> Option<&'static [&'static str]> {
    match kind {
        PipelineStepKind::Lint => Some(LINT_LOG),
        PipelineStepKind::SecurityScan => Some(SECURITY_LOG),
        PipelineStepKind::Plan => Some(PLAN_LOG),
        PipelineStepKind::Provision => Some(PROVISION_LOG),
        PipelineStepKind::Configure => Some(CONFIGURE_LOG),
    }
}

pub fn fallback_log(kind: PipelineStepKind) -> Vec<String> {
    registered_log(kind)
        .unwrap_or(GENERIC_LOG)
        .iter()
        .map(|line| line.to_string())
        .collect()
}
