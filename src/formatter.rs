//! Formatter Module
//!
//! セル値を文字列化する処理を提供するモジュール。
//! 数値・日付・論理値など文字列以外のセルも、クイズ項目のフィールド値として
//! 扱えるように文字列へ変換します。

use chrono::{NaiveDateTime, Timelike};

use crate::api::DateFormat;
use crate::types::CellValue;

/// セルフォーマッター
///
/// セル値のフォーマット処理のファサードとして機能します。
#[derive(Debug, Clone)]
pub(crate) struct CellFormatter {
    /// 日付フォーマッター
    date_formatter: DateFormatter,

    /// 数値フォーマッター
    number_formatter: NumberFormatter,
}

impl CellFormatter {
    /// 新しいCellFormatterインスタンスを生成
    pub fn new(date_format: DateFormat) -> Self {
        Self {
            date_formatter: DateFormatter { date_format },
            number_formatter: NumberFormatter,
        }
    }

    /// セル値を文字列化する
    ///
    /// # 戻り値
    ///
    /// * `Some(String)` - 文字列化された値（前後の空白はそのまま）
    /// * `None` - セルがnull（空セル、NaN）の場合
    pub fn format_cell(&self, value: &CellValue) -> Option<String> {
        if value.is_null() {
            return None;
        }

        let formatted = match value {
            CellValue::Number(n) => self.number_formatter.format(*n),
            CellValue::String(s) => s.clone(),
            CellValue::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
            CellValue::DateTime(dt) => self.date_formatter.format(dt),
            CellValue::Error(e) => e.clone(),
            CellValue::Empty => return None,
        };

        Some(formatted)
    }
}

impl Default for CellFormatter {
    fn default() -> Self {
        Self::new(DateFormat::Iso8601)
    }
}

/// 日付フォーマッター
#[derive(Debug, Clone)]
pub(crate) struct DateFormatter {
    date_format: DateFormat,
}

impl DateFormatter {
    /// 日時をフォーマット
    ///
    /// `Iso8601`では、時刻成分が0時ちょうどなら日付のみを出力します。
    pub fn format(&self, value: &NaiveDateTime) -> String {
        match &self.date_format {
            DateFormat::Iso8601 => {
                if value.num_seconds_from_midnight() == 0 {
                    value.format("%Y-%m-%d").to_string()
                } else {
                    value.format("%Y-%m-%d %H:%M:%S").to_string()
                }
            }
            DateFormat::Custom(format_str) => value.format(format_str).to_string(),
        }
    }
}

/// 数値フォーマッター
///
/// Excelは整数も浮動小数点数として保存するため、
/// 小数部のない値は整数表記（`3.0`ではなく`3`）に変換します。
#[derive(Debug, Clone)]
pub(crate) struct NumberFormatter;

impl NumberFormatter {
    /// i64で正確に表現できる範囲
    const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0; // 2^53

    pub fn format(&self, value: f64) -> String {
        if value.fract() == 0.0 && value.abs() < Self::MAX_EXACT_INTEGER {
            format!("{}", value as i64)
        } else {
            value.to_string()
        }
    }
}
