//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

/// 日付セルの出力形式
///
/// 日付として保存されたセル（例: 作成日などの列）を文字列化する際の形式を指定します。
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DateFormat {
    /// ISO 8601形式（YYYY-MM-DD）
    ///
    /// 時刻成分が0時0分0秒でない場合は `YYYY-MM-DD HH:MM:SS` になります。
    ///
    /// 例: `2025-11-20`
    Iso8601,

    /// カスタム形式（chrono互換フォーマット文字列）
    ///
    /// # フォーマット指定子（主要なもの）
    ///
    /// - `%Y`: 4桁の年（例: 2025）
    /// - `%m`: 2桁の月（01-12）
    /// - `%d`: 2桁の日（01-31）
    /// - `%H`: 24時間形式の時（00-23）
    /// - `%M`: 分（00-59）
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use quizdocx::{ConverterBuilder, DateFormat};
    ///
    /// # fn main() -> Result<(), quizdocx::QuizDocError> {
    /// let converter = ConverterBuilder::new()
    ///     .with_date_format(DateFormat::Custom("%d/%m/%Y".to_string()))
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    Custom(String),
}

/// シート選択方式
///
/// クイズ表として読み込むワークシートを選択する方法を指定します。
/// 1回の変換で読み込むシートは常に1枚です。
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SheetSelector {
    /// 最初のシート（デフォルト）
    First,

    /// インデックス指定（0始まり）
    ///
    /// 例: `SheetSelector::Index(1)` は2枚目のシートを選択
    Index(usize),

    /// シート名指定
    ///
    /// 例: `SheetSelector::Name("Quiz".to_string())`
    Name(String),
}

impl SheetSelector {
    /// ワークブック内のシート名一覧から対象シート名を解決する
    ///
    /// # 戻り値
    ///
    /// * `Ok(String)` - 選択されたシート名
    /// * `Err(String)` - 該当するシートがない場合のエラーメッセージ
    pub(crate) fn resolve(&self, sheet_names: &[String]) -> Result<String, String> {
        if sheet_names.is_empty() {
            return Err("Workbook contains no worksheets".to_string());
        }

        match self {
            SheetSelector::First => Ok(sheet_names[0].clone()),

            SheetSelector::Index(index) => sheet_names.get(*index).cloned().ok_or_else(|| {
                format!(
                    "Sheet index {} is out of range (total: {})",
                    index,
                    sheet_names.len()
                )
            }),

            SheetSelector::Name(name) => {
                if sheet_names.contains(name) {
                    Ok(name.clone())
                } else {
                    Err(format!("Sheet '{}' not found", name))
                }
            }
        }
    }
}
