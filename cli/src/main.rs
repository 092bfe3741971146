//! quizdocx CLI - quiz spreadsheet to Word document converter

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;

use quizdocx::{ConverterBuilder, DateFormat, QuizDocError, SheetSelector, FIELD_NAMES};

#[derive(Parser)]
#[command(name = "quizdocx")]
#[command(version)]
#[command(about = "Convert a quiz spreadsheet (.xlsx) into a formatted Word document (.docx)", long_about = None)]
struct Cli {
    /// Input workbook (.xlsx)
    #[arg(value_name = "FILE", required_unless_present = "columns")]
    input: Option<PathBuf>,

    /// Output file (defaults to the input name with a .docx extension)
    #[arg(short, long, value_name = "FILE", conflicts_with = "stdout")]
    output: Option<PathBuf>,

    /// Select the worksheet by index (0-based)
    #[arg(long, value_name = "N", conflicts_with = "sheet_name")]
    sheet_index: Option<usize>,

    /// Select the worksheet by name
    #[arg(long, value_name = "NAME")]
    sheet_name: Option<String>,

    /// chrono format string for date cells (e.g. "%d/%m/%Y")
    #[arg(long, value_name = "FORMAT")]
    date_format: Option<String>,

    /// Write the document to stdout instead of a file
    #[arg(long)]
    stdout: bool,

    /// Print the recognized column names and exit
    #[arg(long)]
    columns: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if cli.columns {
        for name in FIELD_NAMES {
            println!("{}", name);
        }
        return;
    }

    if let Err(e) = run(&cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        if let Some(hint) = hint_for(&e) {
            eprintln!("{}", hint.dimmed());
        }
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), QuizDocError> {
    let input = cli
        .input
        .as_deref()
        .ok_or_else(|| QuizDocError::Config("No input file given".to_string()))?;

    let mut builder = ConverterBuilder::new();
    if let Some(index) = cli.sheet_index {
        builder = builder.with_sheet_selector(SheetSelector::Index(index));
    } else if let Some(name) = &cli.sheet_name {
        builder = builder.with_sheet_selector(SheetSelector::Name(name.clone()));
    }
    if let Some(format) = &cli.date_format {
        builder = builder.with_date_format(DateFormat::Custom(format.clone()));
    }
    let converter = builder.build()?;
    log::debug!("Converting {}", input.display());

    if cli.stdout {
        return write_to_stdout(&converter, input);
    }

    let written = converter.convert_file(input, cli.output.as_deref())?;
    println!(
        "{} {} -> {}",
        "Converted".green().bold(),
        input.display(),
        written.display()
    );
    Ok(())
}

fn write_to_stdout(converter: &quizdocx::Converter, input: &Path) -> Result<(), QuizDocError> {
    if !quizdocx::is_supported_input(input) {
        return Err(QuizDocError::Config(format!(
            "Unsupported input file '{}': expected an .xlsx workbook",
            input.display()
        )));
    }

    let file = std::fs::File::open(input)?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    converter.convert(file, &mut handle)?;
    handle.flush()?;
    Ok(())
}

fn hint_for(error: &QuizDocError) -> Option<&'static str> {
    match error {
        QuizDocError::Io(_) => {
            Some("Please check that the file exists and you have permission to access it.")
        }
        QuizDocError::SourceRead(_) | QuizDocError::Zip(_) => {
            Some("The file may not be a valid Excel workbook or may be corrupted.")
        }
        QuizDocError::Config(_) => {
            Some("Please check the input extension and the sheet selection.")
        }
        QuizDocError::SecurityViolation(_) => {
            Some("The file violates security constraints (e.g., file size limit).")
        }
        QuizDocError::OutputWrite(_) => Some("Please check that the output location is writable."),
    }
}
