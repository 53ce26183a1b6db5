use console::style;
use crate::models::Project;
use crate::pipeline::phase;
use crate::pipeline::PipelineEvent;
use crate::utils::formatting::format_duration;

/// Render a pipeline event as styled terminal output, returning the formatted line.
pub fn render_event(event: &PipelineEvent) -> String {
    match event {
        PipelineEvent::RunStarted { project_name } => {
            format!(
                "\n{} Running pipeline for {}",
                style("▶").green().bold(),
                style(project_name).white().bold(),
            )
        }
        PipelineEvent::StepStarted { kind, label } => {
            let description = phase::definition(*kind)
                .map(|def| def.description)
                .unwrap_or_default();
            format!(
                "\n{} {} {} {}",
                style("---").cyan().bold(),
                style(label).cyan().bold(),
                style("---").cyan().bold(),
                style(description).dim(),
            )
        }
        PipelineEvent::LogLine { line, .. } => render_log_line(line),
        PipelineEvent::StepCompleted { label, lines, .. } => {
            format!(
                "  {} {} complete ({} lines)",
                style("✓").green(),
                style(label).green(),
                lines,
            )
        }
        PipelineEvent::RunCompleted { total_lines, duration_ms } => {
            format!(
                "\n{} {} | {}\n",
                style("✓ Pipeline complete:").green().bold(),
                style(format!("{} log lines", total_lines)).white().bold(),
                format_duration(*duration_ms),
            )
        }
    }
}

/// Colour a transcript line by its bracketed level tag.
pub fn render_log_line(line: &str) -> String {
    let styled = if line.starts_with("[ERROR]") {
        style(line).red()
    } else if line.starts_with("[WARN") {
        style(line).yellow()
    } else if line.starts_with("[SUCCESS]") || line.starts_with("[OK]") {
        style(line).green()
    } else if line.starts_with("[INFO]") {
        style(line).white()
    } else {
        style(line).dim()
    };
    format!("    {}", styled)
}

/// Human-readable project summary printed after generation.
pub fn render_project(project: &Project) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\n{} {}\n",
        style("■").cyan().bold(),
        style(&project.name).white().bold(),
    ));
    out.push_str(&format!("  {} {}\n\n", style("id").dim(), project.id));
    out.push_str(&format!("{}\n", style("Explanation").cyan().bold()));
    out.push_str(&format!("{}\n\n", project.explanation));
    out.push_str(&format!("{}\n", style("Terraform").cyan().bold()));
    out.push_str(&format!("{}\n\n", project.terraform_code));
    out.push_str(&format!("{}\n", style("Ansible").cyan().bold()));
    out.push_str(&format!("{}\n", project.ansible_code));
    out
}
