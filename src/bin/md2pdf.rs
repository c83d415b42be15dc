//! CLI binary for md2pdf.
//!
//! A thin shim over the library crate: parse flags, run one conversion,
//! and map the outcome to a message and an exit status.

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use md2pdf::{convert, ConversionConfig, ErrorCategory, Md2PdfError, WeasyPrint};
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert next to the source (notes.md → notes.pdf)
  md2pdf notes.md

  # Choose the output path
  md2pdf notes.md -o build/notes.pdf

  # Use a specific WeasyPrint installation
  md2pdf --pdf-engine ~/.local/bin/weasyprint notes.md

MARKDOWN EXTENSIONS:
  tables, footnotes, definition lists, abbreviations (*[HTML]: ...),
  fenced code blocks with syntax highlighting, and single newlines
  rendered as line breaks.

REQUIREMENTS:
  PDF layout is done by WeasyPrint (https://weasyprint.org), which must be
  installed and on PATH (or passed with --pdf-engine).
"#;

/// Convert Markdown documents to classy PDF files.
#[derive(Parser, Debug)]
#[command(
    name = "md2pdf",
    about = "Convert Markdown documents to classy PDF files",
    disable_version_flag = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Markdown file to convert.
    #[arg(value_name = "INPUT_FILE")]
    input: Option<PathBuf>,

    /// Output PDF file path (default: same name as input with .pdf extension).
    #[arg(short, long, value_name = "OUTPUT_PATH", allow_hyphen_values = true)]
    output: Option<PathBuf>,

    /// Show version and exit.
    #[arg(short = 'v', long)]
    version: bool,

    /// WeasyPrint executable used to lay out the PDF.
    #[arg(
        long,
        value_name = "PATH",
        default_value = WeasyPrint::DEFAULT_PROGRAM,
        allow_hyphen_values = true
    )]
    pdf_engine: PathBuf,

    /// Enable DEBUG-level tracing logs.
    #[arg(long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let args: Vec<OsString> = std::env::args_os().collect();

    // --version wins over everything else, including arguments clap would reject.
    if wants_version(args.get(1..).unwrap_or_default()) {
        print_version();
        return ExitCode::SUCCESS;
    }

    let cli = match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(e) => {
            // --help goes to stdout and succeeds; real parse errors are usage errors.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    if cli.version {
        print_version();
        return ExitCode::SUCCESS;
    }

    init_logging(&cli);
    run(&cli)
}

fn run(cli: &Cli) -> ExitCode {
    let Some(input) = cli.input.as_deref() else {
        println!("Error: Missing argument INPUT_FILE.");
        println!("Try \"md2pdf --help\" for help.");
        return ExitCode::from(1);
    };

    if !cli.quiet && !has_markdown_extension(input) {
        eprintln!(
            "Warning: Input file \"{}\" does not have a .md or .markdown extension.",
            input.display()
        );
    }

    let config = match ConversionConfig::builder()
        .pdf_engine(&cli.pdf_engine)
        .build()
    {
        Ok(config) => config,
        Err(e) => return report(&e),
    };

    let spinner = start_spinner(cli.quiet, input);
    let result = convert(input, cli.output.as_deref(), &config);
    spinner.finish_and_clear();

    match result {
        Ok(written) => {
            if !cli.quiet {
                println!(
                    "Successfully converted \"{}\" to \"{}\"",
                    input.display(),
                    written.display()
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => report(&e),
    }
}

/// Print `err` with the prefix its category calls for.
fn report(err: &Md2PdfError) -> ExitCode {
    match err.category() {
        ErrorCategory::NotFound | ErrorCategory::Io | ErrorCategory::Config => {
            eprintln!("Error: {err}")
        }
        ErrorCategory::Unexpected => eprintln!("Unexpected error: {err}"),
    }
    ExitCode::from(1)
}

fn print_version() {
    println!("md2pdf version {}", env!("CARGO_PKG_VERSION"));
}

/// Whether `args` ask for the version, without running the full parser.
///
/// Values of `-o/--output` and `--pdf-engine` are skipped, so `-o -v`
/// names an output file. Short flag clusters such as `-qv` count.
fn wants_version(args: &[OsString]) -> bool {
    let mut args = args.iter();
    while let Some(arg) = args.next() {
        let Some(arg) = arg.to_str() else { continue };
        match arg {
            "--" => return false,
            "--version" => return true,
            "--output" | "--pdf-engine" => {
                args.next();
            }
            long if long.starts_with("--") => {}
            short if short.len() > 1 && short.starts_with('-') => {
                let flags = &short[1..];
                for (i, c) in flags.char_indices() {
                    match c {
                        'v' => return true,
                        // -o takes the rest of the cluster, or the next argument.
                        'o' => {
                            if flags[i + 1..].is_empty() {
                                args.next();
                            }
                            break;
                        }
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }
    false
}

fn has_markdown_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown"))
}

fn init_logging(cli: &Cli) {
    // Library logs stay quiet by default so stdout/stderr carry only the
    // documented messages.
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();
}

/// Spinner on stderr while the PDF engine runs. indicatif hides it
/// automatically when stderr is not a terminal.
fn start_spinner(quiet: bool, input: &Path) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
    bar.set_style(style);
    bar.set_prefix("Converting");
    bar.set_message(input.display().to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}
