//! Output formatting for parsed commands and batch reports.

use penzi_sms_core::ParsedCommand;

use crate::report::BatchReport;

/// Supported output formats.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Json,
    Yaml,
    Markdown,
    Table,
}

/// Formats one parsed command in the requested output format.
pub fn format_command(command: &ParsedCommand, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(command)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(command).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Markdown => Ok(command_to_markdown(command)),
        OutputFormat::Table => Ok(command_to_table(command)),
    }
}

/// Formats a list of parsed commands in the requested output format.
pub fn format_commands(commands: &[ParsedCommand], format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(commands)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(commands).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Markdown => {
            let mut out = String::new();
            for command in commands {
                out.push_str(&command_to_markdown(command));
            }
            Ok(out)
        }
        OutputFormat::Table => Ok(commands_to_table(commands)),
    }
}

/// Formats a batch report in the requested output format.
pub fn format_batch_report(report: &BatchReport, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(report).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Markdown => Ok(report_to_markdown(report)),
        OutputFormat::Table => Ok(report_to_table(report)),
    }
}

fn parameter_summary(command: &ParsedCommand) -> String {
    let pairs: Vec<String> = command
        .parameters
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect();
    pairs.join(", ")
}

fn command_to_markdown(command: &ParsedCommand) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {}\n\n", command.kind));
    out.push_str(&format!("- **Sender:** {}\n", command.sender_id));
    out.push_str(&format!("- **Raw:** `{}`\n\n", command.raw_text));

    if !command.parameters.is_empty() {
        out.push_str("| Parameter | Value |\n");
        out.push_str("|-----------|-------|\n");
        for (name, value) in &command.parameters {
            out.push_str(&format!("| `{name}` | {value} |\n"));
        }
        out.push('\n');
    }

    out
}

fn command_to_table(command: &ParsedCommand) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Command: {}  Sender: {}\n",
        command.kind, command.sender_id
    ));

    if !command.parameters.is_empty() {
        let max_name = command
            .parameters
            .keys()
            .map(String::len)
            .max()
            .unwrap_or(4);
        for (name, value) in &command.parameters {
            out.push_str(&format!("  {:<width$}  {value}\n", name, width = max_name));
        }
    }

    out
}

fn commands_to_table(commands: &[ParsedCommand]) -> String {
    let mut out = String::new();
    let max_kind = commands
        .iter()
        .map(|c| c.kind.as_str().len())
        .max()
        .unwrap_or(4);
    let max_sender = commands
        .iter()
        .map(|c| c.sender_id.len())
        .max()
        .unwrap_or(6);

    for command in commands {
        out.push_str(&format!(
            "{:<kind_width$}  {:<sender_width$}  {}\n",
            command.kind.as_str(),
            command.sender_id,
            parameter_summary(command),
            kind_width = max_kind,
            sender_width = max_sender,
        ));
    }
    out
}

fn report_to_markdown(report: &BatchReport) -> String {
    let mut out = String::new();

    out.push_str("# Batch Parse Report\n\n");
    out.push_str(&format!("- **Generated:** {}\n", report.generated_at));
    out.push_str(&format!("- **Version:** {}\n", report.version));
    out.push_str(&format!("- **Total:** {}\n", report.total));
    out.push_str(&format!("- **Recognized:** {}\n", report.recognized));
    out.push_str(&format!("- **Unrecognized:** {}\n", report.unrecognized));

    if !report.counts_by_kind.is_empty() {
        out.push_str("\n## By Kind\n\n");
        out.push_str("| Kind | Count |\n");
        out.push_str("|------|-------|\n");
        for (kind, count) in &report.counts_by_kind {
            out.push_str(&format!("| `{kind}` | {count} |\n"));
        }
    }

    if !report.commands.is_empty() {
        out.push_str("\n## Commands\n\n");
        out.push_str("| Kind | Sender | Parameters |\n");
        out.push_str("|------|--------|------------|\n");
        for command in &report.commands {
            out.push_str(&format!(
                "| {} | {} | {} |\n",
                command.kind,
                command.sender_id,
                parameter_summary(command)
            ));
        }
    }

    out
}

fn report_to_table(report: &BatchReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Parsed {} message(s): {} recognized, {} unrecognized\n",
        report.total, report.recognized, report.unrecognized
    ));

    if !report.counts_by_kind.is_empty() {
        out.push_str("\nBy kind:\n");
        let max_kind = report
            .counts_by_kind
            .keys()
            .map(String::len)
            .max()
            .unwrap_or(4);
        for (kind, count) in &report.counts_by_kind {
            out.push_str(&format!("  {:<width$}  {count}\n", kind, width = max_kind));
        }
    }

    if !report.commands.is_empty() {
        out.push('\n');
        out.push_str(&commands_to_table(&report.commands));
    }

    out
}
