//! undoc CLI - PDF and DOCX content extraction tool

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use colored::Colorize;

use undoc::{render, ErrorPayload, JsonFormat, OutputFormat, Undoc};

#[derive(Parser)]
#[command(name = "undoc")]
#[command(author = "iyulab")]
#[command(version)]
#[command(
    about = "Extract text and metadata from PDF and DOCX files",
    after_help = "Examples:\n  undoc document.pdf\n  undoc document.docx --output-format text\n  undoc document.pdf --compact > output.json"
)]
struct Cli {
    /// Path to the PDF or DOCX file to read
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "json",
        env = "UNDOC_OUTPUT_FORMAT",
        value_name = "FORMAT"
    )]
    output_format: FormatArg,

    /// Output compact JSON
    #[arg(long)]
    compact: bool,

    /// Do not retry failed or empty PDFs with the fallback decoder
    #[arg(long)]
    no_fallback: bool,

    /// Fail when any PDF page's text cannot be decoded
    #[arg(long)]
    strict: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    /// Full document as JSON
    Json,
    /// Summary header followed by the document text
    Text,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Text => OutputFormat::Text,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let format = OutputFormat::from(cli.output_format);
    let json_format = if cli.compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let mut undoc = if cli.strict {
        Undoc::new().strict()
    } else {
        Undoc::new().lenient()
    };
    if cli.no_fallback {
        undoc = undoc.without_fallback();
    }

    let doc = match undoc.read(&cli.input) {
        Ok(doc) => doc,
        Err(payload) => {
            report_failure(&payload, format);
            return ExitCode::FAILURE;
        }
    };

    log::debug!("Rendering {} as {}", cli.input.display(), format);
    match render::render(&doc, format, json_format) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            report_failure(&ErrorPayload::new(&e, &cli.input), format);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn report_failure(payload: &ErrorPayload, format: OutputFormat) {
    match format {
        OutputFormat::Json => eprintln!("{}", payload.to_json()),
        OutputFormat::Text => eprintln!("{}: {}", "Error".red().bold(), payload),
    }
}
