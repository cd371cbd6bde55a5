use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use penzi_sms_core::{CommandKind, InboundMessage, missing_profile_fields, validate_profile};
use penzi_sms_parser::output::{
    OutputFormat, format_batch_report, format_command, format_commands,
};
use penzi_sms_parser::report::BatchReport;
use penzi_sms_parser::{
    HELP_TEXT, ParseRun, ParseTrace, parse_batch, parse_sms, parse_sms_with_trace,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
    Markdown,
    Table,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(fmt: CliOutputFormat) -> Self {
        match fmt {
            CliOutputFormat::Json => Self::Json,
            CliOutputFormat::Yaml => Self::Yaml,
            CliOutputFormat::Markdown => Self::Markdown,
            CliOutputFormat::Table => Self::Table,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "penzi-sms")]
#[command(about = "Parse Penzi SMS messages into structured commands")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse a single SMS message given as an argument.
    Parse(ParseArgs),
    /// Parse a single SMS message read from stdin.
    ParseStdin(ParseStdinArgs),
    /// Parse a JSONL file of inbound messages.
    Batch(BatchArgs),
    /// Parse a registration or update message and check its profile fields.
    Validate(ValidateArgs),
    /// Print the command reference sent in reply to HELP.
    HelpText,
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// The SMS message body.
    message: String,
    /// Sender phone number recorded on the parsed command.
    #[arg(long)]
    sender: String,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Include the parse trace (grammar attempts, dropped fields) in the output.
    #[arg(long)]
    with_trace: bool,
}

#[derive(Debug, Args)]
struct ParseStdinArgs {
    /// Sender phone number recorded on the parsed command.
    #[arg(long)]
    sender: String,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct BatchArgs {
    /// JSONL input file, one {"sender": ..., "message": ...} object per line.
    #[arg(long)]
    input: PathBuf,
    /// Write the output to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Number of parallel parse jobs (default: number of CPUs).
    #[arg(long)]
    jobs: Option<usize>,
    /// Emit a batch report with counts instead of the bare command list.
    #[arg(long)]
    report: bool,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// The SMS message body (a REGISTER or UPDATE command).
    message: String,
    /// Sender phone number recorded on the parsed command.
    #[arg(long)]
    sender: String,
}

fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::ParseStdin(args) => run_parse_stdin(args),
        Command::Batch(args) => run_batch(args),
        Command::Validate(args) => run_validate(args),
        Command::HelpText => run_help_text(),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn run_parse(args: ParseArgs) -> Result<(), String> {
    let format: OutputFormat = args.format.into();

    if args.with_trace {
        let run = parse_sms_with_trace(&args.message, &args.sender);
        println!("{}", format_run(&run, format)?);
    } else {
        let command = parse_sms(&args.message, &args.sender);
        println!("{}", format_command(&command, format)?);
    }
    Ok(())
}

fn run_parse_stdin(args: ParseStdinArgs) -> Result<(), String> {
    let mut message = String::new();
    std::io::stdin()
        .read_to_string(&mut message)
        .map_err(|err| format!("Failed to read stdin: {err}"))?;

    let command = parse_sms(&message, &args.sender);
    println!("{}", format_command(&command, args.format.into())?);
    Ok(())
}

fn run_batch(args: BatchArgs) -> Result<(), String> {
    let raw = fs::read_to_string(&args.input)
        .map_err(|err| format!("Failed to read '{}': {err}", args.input.display()))?;
    let messages = read_jsonl(&raw)?;
    debug!(
        count = messages.len(),
        input = %args.input.display(),
        "Read batch input"
    );

    let commands = match args.jobs {
        Some(jobs) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build()
                .map_err(|e| format!("Failed to create thread pool: {e}"))?;
            pool.install(|| parse_batch(&messages))
        }
        None => parse_batch(&messages),
    };

    let format: OutputFormat = args.format.into();
    let rendered = if args.report {
        let report = BatchReport::from_commands(commands);
        format_batch_report(&report, format)?
    } else {
        format_commands(&commands, format)?
    };

    match args.output {
        Some(path) => {
            fs::write(&path, rendered)
                .map_err(|err| format!("Failed to write '{}': {err}", path.display()))?;
            println!(
                "Parsed {} message(s) into '{}'.",
                messages.len(),
                path.display()
            );
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let command = parse_sms(&args.message, &args.sender);

    if !matches!(command.kind, CommandKind::Register | CommandKind::Update) {
        return Err(format!(
            "validate expects a REGISTER or UPDATE message, got {}",
            command.kind
        ));
    }

    println!("Kind: {}", command.kind);
    println!("Fields extracted: {}", command.parameters.len());

    // Updates are partial; only a registration must be complete.
    if command.kind == CommandKind::Register {
        let missing = missing_profile_fields(&command);
        if !missing.is_empty() {
            println!("\nMissing required fields:");
            for field in missing {
                println!("  {field}");
            }
        }
    }

    let violations = validate_profile(&command);
    if violations.is_empty() {
        println!("\nNo violations.");
        Ok(())
    } else {
        println!("\nViolations:");
        for violation in &violations {
            println!("  {violation}");
        }
        Err(format!("{} validation error(s)", violations.len()))
    }
}

fn run_help_text() -> Result<(), String> {
    println!("{HELP_TEXT}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_jsonl(raw: &str) -> Result<Vec<InboundMessage>, String> {
    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line)
                .map_err(|err| format!("Invalid message on line {}: {err}", index + 1))
        })
        .collect()
}

/// Formats a command together with its trace in the requested output format.
fn format_run(run: &ParseRun, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(run).map_err(|e| format!("JSON serialization failed: {e}"))
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(run).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Markdown | OutputFormat::Table => {
            let mut out = format_command(&run.command, format)?;
            out.push_str(&trace_block(&run.trace, format));
            Ok(out)
        }
    }
}

fn trace_block(trace: &ParseTrace, format: OutputFormat) -> String {
    let mut out = String::new();
    match format {
        OutputFormat::Markdown => {
            out.push_str("## Trace\n\n");
            out.push_str(&format!("- **Normalized:** `{}`\n", trace.normalized_text));
            out.push_str(&format!("- **Grammars tried:** {}\n", trace.attempts.len()));
            if !trace.dropped_fields.is_empty() {
                out.push_str("\n### Dropped fields\n\n");
                for dropped in &trace.dropped_fields {
                    out.push_str(&format!(
                        "- `{}` = {:?} ({})\n",
                        dropped.field, dropped.value, dropped.reason
                    ));
                }
            }
        }
        _ => {
            out.push_str(&format!("\nNormalized: {:?}\n", trace.normalized_text));
            out.push_str(&format!("Grammars tried: {}\n", trace.attempts.len()));
            for dropped in &trace.dropped_fields {
                out.push_str(&format!(
                    "  dropped {} = {:?} ({})\n",
                    dropped.field, dropped.value, dropped.reason
                ));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::read_jsonl;

    #[test]
    fn test_read_jsonl_accepts_both_wire_spellings() {
        let raw = concat!(
            "{\"sender\": \"0712345678\", \"message\": \"HELP\"}\n",
            "{\"from_number\": \"0733999888\", \"message_content\": \"ACCEPT 456\"}\n",
        );

        let messages = read_jsonl(raw).expect("both spellings should deserialize");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, "0712345678");
        assert_eq!(messages[1].sender, "0733999888");
        assert_eq!(messages[1].message, "ACCEPT 456");
    }

    #[test]
    fn test_read_jsonl_skips_blank_lines() {
        let raw = "\n{\"sender\": \"1\", \"message\": \"HELP\"}\n\n";
        let messages = read_jsonl(raw).expect("blank lines should be ignored");
        assert_eq!(messages.len(), 1);
    }

    #[test]
    fn test_read_jsonl_reports_the_offending_line() {
        let raw = "{\"sender\": \"1\", \"message\": \"HELP\"}\nnot json\n";
        let err = read_jsonl(raw).expect_err("bad line should fail");
        assert!(err.contains("line 2"), "error was: {err}");
    }
}
