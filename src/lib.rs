//! quizdocx - Pure-Rust converter from quiz spreadsheets to Word documents
//!
//! This crate reads a quiz bank stored as an Excel workbook (XLSX, one question
//! per row) and renders it as a formatted Word document (DOCX): topic metadata,
//! the numbered question, multiple-choice options with the correct choice in
//! bold and underlined, the correct answer, a solution, a justification and a
//! reference link.
//!
//! # Recognized Columns
//!
//! The first row of the worksheet is the header row. These column names are
//! recognized (exact, case-sensitive); other columns are ignored and missing
//! ones are treated as empty:
//!
//! `Topic`, `Sub Topic`, `Difficulty Level`, `Question Text`, `Choice 1`,
//! `Choice 2`, `Choice 3`, `Choice 4`, `Correct choice`, `Solution`,
//! `Justification`, `Reference Link`
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::fs::File;
//! use quizdocx::ConverterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new().build()?;
//!
//!     let input = File::open("quiz.xlsx")?;
//!     let output = File::create("quiz.docx")?;
//!     converter.convert(input, output)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Converting a File Next to Its Source
//!
//! ```rust,no_run
//! use std::path::Path;
//! use quizdocx::ConverterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new().build()?;
//!
//!     // Writes "quiz.docx" next to "quiz.xlsx"
//!     let written = converter.convert_file(Path::new("quiz.xlsx"), None)?;
//!     println!("{}", written.display());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Inspecting the Rendered Paragraphs
//!
//! ```rust,no_run
//! use std::fs::File;
//! use quizdocx::ConverterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new().build()?;
//!     let document = converter.convert_to_document(File::open("quiz.xlsx")?)?;
//!
//!     for text in document.texts() {
//!         println!("{}", text);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod api;
mod builder;
mod document;
mod error;
mod formatter;
mod output;
mod parser;
mod record;
mod render;
mod security;
mod types;

// 公開API
pub use api::{DateFormat, SheetSelector};
pub use builder::{Converter, ConverterBuilder};
pub use document::{Document, Paragraph, Run};
pub use error::QuizDocError;
pub use output::{
    is_supported_input, output_file_name, DocxWriter, DOCX_EXTENSION, DOCX_MIME_TYPE,
    XLSX_EXTENSION,
};
pub use record::{get_field, parse_correct_marker, Field, QuizRecord, FIELD_NAMES};
pub use render::render_item;
pub use types::SourceRow;
