pub const GENERATE_INFRASTRUCTURE: &str = "You are a world-class DevOps engineer.
Generate a complete Terraform configuration and an Ansible playbook for: \"{{PROMPT}}\".
Return JSON with projectTitle, terraform, ansible, and explanation.";

pub const SIMULATE_LOG: &str =
    "Generate a short command-line log output for a CI/CD {{STEP_KIND}} step for this code: {{CODE}}";
