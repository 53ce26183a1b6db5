use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::errors::InfraFlowError;
use crate::pipeline::phase::initial_steps;
use super::step::{PipelineStep, PipelineStepKind};

/// Structured reply expected from the generator's collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    #[serde(rename = "projectTitle")]
    pub title: String,
    pub terraform: String,
    pub ansible: String,
    pub explanation: String,
}

impl GenerationResult {
    /// Reject replies that parsed but left a field blank.
    pub fn validate(&self) -> Result<(), InfraFlowError> {
        let fields = [
            ("projectTitle", &self.title),
            ("terraform", &self.terraform),
            ("ansible", &self.ansible),
            ("explanation", &self.explanation),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(InfraFlowError::LLMApi(format!("Generated field '{}' is empty", name)));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub terraform_code: String,
    pub ansible_code: String,
    pub explanation: String,
    pub created_at: DateTime<Utc>,
    pub pipeline_steps: Vec<PipelineStep>,
}

impl Project {
    pub fn from_generation(prompt: &str, result: GenerationResult) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: result.title,
            description: prompt.to_string(),
            terraform_code: result.terraform,
            ansible_code: result.ansible,
            explanation: result.explanation,
            created_at: Utc::now(),
            pipeline_steps: initial_steps(),
        }
    }

    /// The code body a step of `kind` operates on.
    pub fn code_for(&self, kind: PipelineStepKind) -> &str {
        if kind.uses_configuration_code() {
            &self.ansible_code
        } else {
            &self.terraform_code
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result() -> GenerationResult {
        GenerationResult {
            title: "Edge Cache".into(),
            terraform: "resource \"aws_s3_bucket\" \"b\" {}".into(),
            ansible: "- hosts: all".into(),
            explanation: "A bucket.".into(),
        }
    }

    #[test]
    fn test_deserialize_wire_shape() {
        let json = r#"{"projectTitle":"T","terraform":"tf","ansible":"yml","explanation":"e"}"#;
        let parsed: GenerationResult = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.title, "T");
        assert_eq!(parsed.ansible, "yml");
    }

    #[test]
    fn test_validate_rejects_blank_field() {
        let mut r = result();
        r.explanation = "   ".into();
        assert!(r.validate().is_err());
        assert!(result().validate().is_ok());
    }

    #[test]
    fn test_project_has_one_step_per_kind() {
        let project = Project::from_generation("a bucket", result());
        let kinds: Vec<PipelineStepKind> = project.pipeline_steps.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, PipelineStepKind::ALL.to_vec());
        assert_eq!(project.name, "Edge Cache");
        assert_eq!(project.description, "a bucket");
    }

    #[test]
    fn test_code_for_step_kind() {
        let project = Project::from_generation("a bucket", result());
        assert_eq!(project.code_for(PipelineStepKind::Configure), "- hosts: all");
        assert!(project.code_for(PipelineStepKind::Plan).starts_with("resource"));
    }
}
