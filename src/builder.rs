//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。

use chrono::format::{Item, StrftimeItems};
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::api::{DateFormat, SheetSelector};
use crate::document::Document;
use crate::error::QuizDocError;
use crate::formatter::CellFormatter;
use crate::output::{is_supported_input, DocxWriter, DOCX_EXTENSION};
use crate::parser::WorkbookParser;
use crate::record::{QuizRecord, FIELD_NAMES};
use crate::render::render_item;
use crate::security::{inspect_archive, SecurityConfig};

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct ConversionConfig {
    /// シート選択方式
    pub sheet_selector: SheetSelector,

    /// 日付形式
    pub date_format: DateFormat,

    /// セキュリティ制限
    pub security: SecurityConfig,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            sheet_selector: SheetSelector::First,
            date_format: DateFormat::Iso8601,
            security: SecurityConfig::default(),
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use quizdocx::{ConverterBuilder, SheetSelector};
///
/// # fn main() -> Result<(), quizdocx::QuizDocError> {
/// let converter = ConverterBuilder::new()
///     .with_sheet_selector(SheetSelector::Name("Quiz".to_string()))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConverterBuilder {
    /// 内部設定（構築中）
    config: ConversionConfig,
}

impl Default for ConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - シート選択: 最初のシート
    /// - 日付形式: ISO 8601 (YYYY-MM-DD)
    /// - 入力サイズ上限: 256MB
    pub fn new() -> Self {
        Self {
            config: ConversionConfig::default(),
        }
    }

    /// クイズ表として読み込むシートを選択する
    pub fn with_sheet_selector(mut self, selector: SheetSelector) -> Self {
        self.config.sheet_selector = selector;
        self
    }

    /// 日付セルの出力形式を指定する
    pub fn with_date_format(mut self, format: DateFormat) -> Self {
        self.config.date_format = format;
        self
    }

    /// 入力ファイルサイズの上限（バイト）を指定する
    pub fn with_max_input_size(mut self, bytes: u64) -> Self {
        self.config.security.max_input_file_size = bytes;
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `QuizDocError::Config(String)`: 設定の検証に失敗した場合
    ///   * カスタム日付形式が空、または不正な書式指定子を含む
    ///   * 入力サイズ上限が0
    pub fn build(self) -> Result<Converter, QuizDocError> {
        // 1. カスタム日付形式の検証
        if let DateFormat::Custom(ref format_str) = self.config.date_format {
            if format_str.is_empty() {
                return Err(QuizDocError::Config(
                    "Invalid date format string: ''".to_string(),
                ));
            }
            if StrftimeItems::new(format_str).any(|item| matches!(item, Item::Error)) {
                return Err(QuizDocError::Config(format!(
                    "Invalid date format string: '{}'",
                    format_str
                )));
            }
        }

        // 2. 入力サイズ上限の検証
        if self.config.security.max_input_file_size == 0 {
            return Err(QuizDocError::Config(
                "Maximum input size must be greater than zero".to_string(),
            ));
        }

        Ok(Converter::new(self.config))
    }
}

/// 変換処理のファサード
///
/// クイズ表（XLSX）をWord文書（DOCX）に変換するためのメインエントリーポイントです。
///
/// # 処理フロー
///
/// 1. 入力をメモリに読み込み、アーカイブを検査
/// 2. シートを選択し、ヘッダー行付きの表として読み込む
/// 3. 各行について、レコード抽出 → 項目レンダリングを順に実行
/// 4. 文書全体をDOCXパッケージとしてメモリ上で組み立ててから出力
///
/// 途中でエラーが発生した場合、出力先には何も書き込みません。
///
/// # 使用例
///
/// ```rust,no_run
/// use quizdocx::ConverterBuilder;
/// use std::fs::File;
///
/// # fn main() -> Result<(), quizdocx::QuizDocError> {
/// let converter = ConverterBuilder::new().build()?;
/// let input = File::open("quiz.xlsx")?;
/// let output = File::create("quiz.docx")?;
/// converter.convert(input, output)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Converter {
    /// 変換設定
    config: ConversionConfig,

    /// セルフォーマッター
    formatter: CellFormatter,
}

impl Converter {
    pub(crate) fn new(config: ConversionConfig) -> Self {
        Self {
            formatter: CellFormatter::new(config.date_format.clone()),
            config,
        }
    }

    /// クイズ表を文書モデルに変換する
    ///
    /// # 戻り値
    ///
    /// * `Ok(Document)` - 全行をレンダリングした文書
    /// * `Err(QuizDocError)` - 入力の読み込み・解析に失敗した場合
    pub fn convert_to_document<R: Read>(&self, input: R) -> Result<Document, QuizDocError> {
        // 1. 入力データをメモリに読み込む（上限+1バイトまで）
        let limit = self.config.security.max_input_file_size;
        let mut buffer = Vec::new();
        let bytes_read = input.take(limit.saturating_add(1)).read_to_end(&mut buffer)?;

        if bytes_read as u64 > limit {
            return Err(QuizDocError::SecurityViolation(format!(
                "Input file size exceeds maximum: more than {} bytes",
                limit
            )));
        }

        // 2. アーカイブの検査
        inspect_archive(&buffer, &self.config.security)?;

        // 3. シートの読み込み
        let mut parser = WorkbookParser::open(buffer)?;
        let sheet_name = parser.select_sheet(&self.config.sheet_selector)?;
        let table = parser.read_table(&sheet_name, &self.formatter)?;

        if !table.headers.is_empty() {
            for name in FIELD_NAMES.iter().filter(|name| !table.has_column(name)) {
                log::warn!(
                    "Column '{}' not found in sheet '{}'; treating it as empty",
                    name,
                    sheet_name
                );
            }
        }

        // 4. 行ごとに抽出 → レンダリング
        let mut document = Document::new();
        for (index, row) in table.rows.iter().enumerate() {
            let record = QuizRecord::extract(row);
            log::debug!(
                "Rendering item {} (correct marker: {:?})",
                index + 1,
                record.correct_marker()
            );
            render_item(&mut document, index, &record);
        }

        log::info!(
            "Rendered {} quiz items from sheet '{}' into {} paragraphs",
            table.rows.len(),
            sheet_name,
            document.len()
        );

        Ok(document)
    }

    /// クイズ表をDOCXパッケージのバイト列に変換する
    pub fn convert_to_bytes<R: Read>(&self, input: R) -> Result<Vec<u8>, QuizDocError> {
        let document = self.convert_to_document(input)?;
        DocxWriter::new().to_bytes(&document)
    }

    /// クイズ表をDOCXに変換し、出力先に書き込む
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use quizdocx::ConverterBuilder;
    /// use std::io::Cursor;
    ///
    /// # fn main() -> Result<(), quizdocx::QuizDocError> {
    /// let converter = ConverterBuilder::new().build()?;
    /// let xlsx_data: Vec<u8> = vec![]; // XLSXファイルのバイト列
    /// let mut docx_output = Vec::new();
    /// converter.convert(Cursor::new(xlsx_data), &mut docx_output)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn convert<R: Read, W: Write>(&self, input: R, mut output: W) -> Result<(), QuizDocError> {
        let bytes = self.convert_to_bytes(input)?;

        output
            .write_all(&bytes)
            .and_then(|_| output.flush())
            .map_err(|e| QuizDocError::OutputWrite(e.to_string()))
    }

    /// ファイルを変換する
    ///
    /// # 引数
    ///
    /// * `input_path` - 入力XLSXファイルのパス（拡張子`.xlsx`のみ受け付ける）
    /// * `output_path` - 出力先。`None`の場合は入力と同じディレクトリに
    ///   拡張子を`.docx`に置き換えた名前で保存
    ///
    /// # 戻り値
    ///
    /// * `Ok(PathBuf)` - 書き込んだ出力ファイルのパス
    pub fn convert_file(
        &self,
        input_path: &Path,
        output_path: Option<&Path>,
    ) -> Result<PathBuf, QuizDocError> {
        if !is_supported_input(input_path) {
            return Err(QuizDocError::Config(format!(
                "Unsupported input file '{}': expected an .xlsx workbook",
                input_path.display()
            )));
        }

        let target = match output_path {
            Some(path) => path.to_path_buf(),
            None => input_path.with_extension(DOCX_EXTENSION),
        };

        let input = fs::File::open(input_path)?;
        let bytes = self.convert_to_bytes(input)?;

        write_output_file(&target, &bytes)?;

        log::info!("Wrote {}", target.display());
        Ok(target)
    }
}

/// 隣接する一時ファイルに書き込んでから出力先へ置き換える
///
/// 失敗した場合は一時ファイルを削除し、出力先には何も残しません。
fn write_output_file(target: &Path, bytes: &[u8]) -> Result<(), QuizDocError> {
    let staging = staging_path(target);

    let result = fs::write(&staging, bytes).and_then(|_| fs::rename(&staging, target));
    if let Err(e) = result {
        if let Err(cleanup) = fs::remove_file(&staging) {
            log::debug!("Could not remove {}: {}", staging.display(), cleanup);
        }
        return Err(QuizDocError::OutputWrite(format!(
            "{}: {}",
            target.display(),
            e
        )));
    }
    Ok(())
}

/// `quiz.docx` -> `quiz.docx.partial`
fn staging_path(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".partial");
    target.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converter_builder_new() {
        let builder = ConverterBuilder::new();
        assert_eq!(builder.config.sheet_selector, SheetSelector::First);
        assert_eq!(builder.config.date_format, DateFormat::Iso8601);
        assert_eq!(builder.config.security, SecurityConfig::default());
    }

    #[test]
    fn test_builder_method_chaining() {
        let builder = ConverterBuilder::new()
            .with_sheet_selector(SheetSelector::Index(1))
            .with_date_format(DateFormat::Custom("%Y/%m/%d".to_string()))
            .with_max_input_size(1024);

        assert_eq!(builder.config.sheet_selector, SheetSelector::Index(1));
        assert!(matches!(
            builder.config.date_format,
            DateFormat::Custom(ref s) if s == "%Y/%m/%d"
        ));
        assert_eq!(builder.config.security.max_input_file_size, 1024);
        assert!(builder.build().is_ok());
    }

    #[test]
    fn test_build_with_empty_custom_date_format() {
        let result = ConverterBuilder::new()
            .with_date_format(DateFormat::Custom(String::new()))
            .build();
        match result {
            Err(QuizDocError::Config(msg)) => assert!(msg.contains("Invalid date format")),
            _ => panic!("Expected Config error"),
        }
    }

    #[test]
    fn test_build_with_invalid_custom_date_format() {
        let result = ConverterBuilder::new()
            .with_date_format(DateFormat::Custom("%Q".to_string()))
            .build();
        assert!(matches!(result, Err(QuizDocError::Config(_))));
    }

    #[test]
    fn test_build_with_zero_max_input_size() {
        let result = ConverterBuilder::new().with_max_input_size(0).build();
        assert!(matches!(result, Err(QuizDocError::Config(_))));
    }

    #[test]
    fn test_convert_with_invalid_input() {
        let converter = ConverterBuilder::new().build().unwrap();
        let mut output = Vec::new();
        let result = converter.convert(std::io::Cursor::new(Vec::<u8>::new()), &mut output);

        assert!(result.is_err());
        // 失敗時は何も書き込まない
        assert!(output.is_empty());
    }

    #[test]
    fn test_input_size_limit() {
        let converter = ConverterBuilder::new().with_max_input_size(8).build().unwrap();
        let result = converter.convert_to_document(std::io::Cursor::new(vec![0u8; 64]));
        match result {
            Err(QuizDocError::SecurityViolation(msg)) => assert!(msg.contains("Input file size")),
            other => panic!("Expected SecurityViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_staging_path_is_sibling() {
        assert_eq!(
            staging_path(Path::new("out/quiz.docx")),
            PathBuf::from("out/quiz.docx.partial")
        );
    }

    #[test]
    fn test_write_output_file_failure_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        // 既存のディレクトリにはファイルを置き換えられない
        let target = dir.path().join("taken.docx");
        fs::create_dir(&target).unwrap();

        let result = write_output_file(&target, b"PK");

        assert!(matches!(result, Err(QuizDocError::OutputWrite(_))));
        assert!(target.is_dir());
        assert!(!dir.path().join("taken.docx.partial").exists());
    }

    #[test]
    fn test_write_output_file_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("quiz.docx");
        fs::write(&target, b"old").unwrap();

        write_output_file(&target, b"new").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"new");
        assert!(!dir.path().join("quiz.docx.partial").exists());
    }

    #[test]
    fn test_convert_file_rejects_other_extensions() {
        let converter = ConverterBuilder::new().build().unwrap();
        let result = converter.convert_file(Path::new("quiz.csv"), None);
        match result {
            Err(QuizDocError::Config(msg)) => assert!(msg.contains(".xlsx")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }
}
