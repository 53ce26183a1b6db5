use crate::models::GenerationResult;

/// Literal prepended to the title of a simulated project.
pub const SIMULATED_MARKER: &str = "Simulated:";

/// Number of prompt characters carried into a simulated title.
pub const TITLE_PREFIX_CHARS: usize = 20;

pub const FALLBACK_TERRAFORM: &str = r#"# Terraform Fallback Configuration
resource "aws_vpc" "main" {
  cidr_block = "10.0.0.0/16"
  enable_dns_hostnames = true
  tags = { Name = "infraflow-vpc" }
}

resource "aws_eks_cluster" "primary" {
  name     = "production-cluster"
  role_arn = aws_iam_role.eks.arn
  vpc_config {
    subnet_ids = aws_subnet.public[*].id
  }
}

resource "aws_rds_cluster" "db" {
  cluster_identifier = "production-db"
  engine             = "aurora-postgresql"
  database_name      = "app_db"
  master_username    = "admin"
  master_password    = "SecurePassword123!"
}"#;

pub const FALLBACK_ANSIBLE: &str = r#"# Ansible Fallback Playbook
- name: Configure Production Nodes
  hosts: all
  become: yes
  tasks:
    - name: Update apt cache
      apt: update_cache=yes

    - name: Install CloudWatch Agent
      apt: name=amazon-cloudwatch-agent state=present

    - name: Deploy Application Container
      docker_container:
        name: main_api
        image: "registry.hub.docker.com/org/api:latest"
        state: started
        restart_policy: always
        ports:
          - "80:8080""#;

pub const FALLBACK_EXPLANATION: &str = "This architecture utilizes a modular VPC design with an EKS cluster for container orchestration and an Aurora PostgreSQL cluster for managed persistence. It is optimized for high availability and elastic scaling.";

/// Title shown for a simulated project built from `prompt`.
pub fn simulated_title(prompt: &str) -> String {
    let prefix: String = prompt.chars().take(TITLE_PREFIX_CHARS).collect();
    format!("{} {}...", SIMULATED_MARKER, prefix)
}

pub fn fallback_project(prompt: &str) -> GenerationResult {
    GenerationResult {
        title: simulated_title(prompt),
        terraform: FALLBACK_TERRAFORM.to_string(),
        ansible: FALLBACK_ANSIBLE.to_string(),
        explanation: FALLBACK_EXPLANATION.to_string(),
    }
}
