//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。
//!
//! 欠損列・空セル・解釈できない正解番号はエラーではなく、空文字列として
//! 正規化されます。ここで定義するのは変換全体を中断させる致命的なエラーのみです。

use thiserror::Error;

/// quizdocxクレート全体で使用するエラー型
///
/// # エラーの種類
///
/// - `Io`: I/O操作中に発生したエラー（入力ファイルの読み込み失敗など）
/// - `SourceRead`: 入力ワークブックの解析に失敗したエラー（calamine由来）
/// - `Zip`: 入力ZIPアーカイブ自体を開けなかったエラー
/// - `OutputWrite`: DOCXパッケージの組み立て・保存に失敗したエラー
/// - `Config`: 設定の検証に失敗したエラー（存在しないシート指定など）
/// - `SecurityViolation`: 入力ファイルがセキュリティ制限に違反したエラー
///
/// # 使用例
///
/// ```rust,no_run
/// use quizdocx::QuizDocError;
/// use std::fs::File;
///
/// fn open_quiz(path: &str) -> Result<File, QuizDocError> {
///     let file = File::open(path)?;  // Ioエラーが自動的に変換される
///     Ok(file)
/// }
/// ```
#[derive(Error, Debug)]
pub enum QuizDocError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 入力ワークブックの解析中に発生したエラー
    ///
    /// ファイル形式が不正、破損したファイル、XLSX以外の形式などが原因となります。
    #[error("Failed to read quiz spreadsheet: {0}")]
    SourceRead(#[from] calamine::Error),

    /// 入力ZIPアーカイブの解析エラー
    ///
    /// XLSXファイルはZIPアーカイブであるため、ZIPとして開けない入力は
    /// このエラーになります。
    #[error("ZIP archive error: {0}")]
    Zip(String),

    /// 出力DOCXの組み立て・書き込みエラー
    #[error("Failed to write Word document: {0}")]
    OutputWrite(String),

    /// 設定の検証に失敗したエラー
    ///
    /// # 例
    ///
    /// ```rust,no_run
    /// use quizdocx::{ConverterBuilder, DateFormat, QuizDocError};
    ///
    /// let result = ConverterBuilder::new()
    ///     .with_date_format(DateFormat::Custom(String::new()))
    ///     .build();
    ///
    /// if let Err(QuizDocError::Config(msg)) = result {
    ///     println!("設定エラー: {}", msg);
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// セキュリティ制限に違反したエラー
    ///
    /// ZIP bomb攻撃、パストラバーサル攻撃、ファイルサイズ制限などの
    /// セキュリティ制限に違反した場合に発生します。
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}

impl QuizDocError {
    /// 入力側（読み込み・解析）に起因するエラーかどうか
    pub fn is_source_error(&self) -> bool {
        matches!(
            self,
            QuizDocError::SourceRead(_) | QuizDocError::Zip(_) | QuizDocError::SecurityViolation(_)
        )
    }
}
