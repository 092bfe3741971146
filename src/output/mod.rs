//! Output Module
//!
//! 出力文書（DOCX）の書き出しと、出力ファイル名・MIMEタイプなど
//! 配布に必要な情報を提供するモジュール。

mod document_xml;
mod docx;
mod parts;

use std::path::Path;

pub use docx::DocxWriter;

/// DOCXのMIMEタイプ
pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// 出力ファイルの拡張子
pub const DOCX_EXTENSION: &str = "docx";

/// 受け付ける入力ファイルの拡張子
pub const XLSX_EXTENSION: &str = "xlsx";

/// 入力ファイル名から出力ファイル名を導出する
///
/// 拡張子を`.docx`に置き換えます。拡張子がない場合は`.docx`を付加します。
///
/// ```rust
/// use quizdocx::output_file_name;
///
/// assert_eq!(output_file_name("quiz.xlsx"), "quiz.docx");
/// assert_eq!(output_file_name("week.1.xlsx"), "week.1.docx");
/// assert_eq!(output_file_name("quiz"), "quiz.docx");
/// ```
pub fn output_file_name(input_name: &str) -> String {
    Path::new(input_name)
        .with_extension(DOCX_EXTENSION)
        .to_string_lossy()
        .into_owned()
}

/// 入力として受け付けるファイルかどうか（拡張子`.xlsx`、大文字小文字は区別しない）
pub fn is_supported_input(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(XLSX_EXTENSION))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("quiz.xlsx"), "quiz.docx");
        assert_eq!(output_file_name("Quiz Bank.XLSX"), "Quiz Bank.docx");
        // 拡張子以外の".xlsx"は置き換えない
        assert_eq!(output_file_name("a.xlsx.backup.xlsx"), "a.xlsx.backup.docx");
        assert_eq!(output_file_name("noext"), "noext.docx");
    }

    #[test]
    fn test_output_file_name_keeps_directory() {
        assert_eq!(output_file_name("data/quiz.xlsx"), "data/quiz.docx");
    }

    #[test]
    fn test_is_supported_input() {
        assert!(is_supported_input(Path::new("quiz.xlsx")));
        assert!(is_supported_input(Path::new("QUIZ.XLSX")));
        assert!(!is_supported_input(Path::new("quiz.xls")));
        assert!(!is_supported_input(Path::new("quiz.csv")));
        assert!(!is_supported_input(Path::new("quiz")));
    }

    #[test]
    fn test_mime_type() {
        assert!(DOCX_MIME_TYPE.ends_with("wordprocessingml.document"));
    }
}
