//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use chrono::NaiveDateTime;
use std::collections::HashMap;

/// セルの値を表す列挙型
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CellValue {
    /// 数値（f64）
    Number(f64),

    /// 文字列
    String(String),

    /// 論理値
    Bool(bool),

    /// 日付・日時
    DateTime(NaiveDateTime),

    /// エラー値（例: #DIV/0!）
    Error(String),

    /// 空セル
    Empty,
}

impl CellValue {
    /// 値が空（null相当）かどうかを判定
    ///
    /// NaN・無限大の数値もnullとして扱います。
    pub fn is_null(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Number(n) => !n.is_finite(),
            _ => false,
        }
    }
}

/// ソース表の1行
///
/// 列名（ヘッダー行の値）からセル値へのマッピングです。
/// 値が`None`の列は「列は存在するがセルがnull」であることを表し、
/// マッピングに存在しない列は「列そのものが存在しない」ことを表します。
///
/// # 使用例
///
/// ```rust
/// use quizdocx::SourceRow;
///
/// let row = SourceRow::new()
///     .with("Topic", "Algebra")
///     .with_null("Solution");
///
/// assert_eq!(row.get("Topic"), Some("Algebra"));
/// assert_eq!(row.get("Solution"), None);
/// assert!(row.has_column("Solution"));
/// assert!(!row.has_column("Reference Link"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRow {
    cells: HashMap<String, Option<String>>,
}

impl SourceRow {
    /// 空の行を生成
    pub fn new() -> Self {
        Self::default()
    }

    /// 値を持つ列を追加する
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(column, Some(value.into()));
        self
    }

    /// null値の列を追加する
    pub fn with_null(mut self, column: impl Into<String>) -> Self {
        self.insert(column, None);
        self
    }

    /// 列を追加する（同名の列が既にある場合は上書き）
    pub fn insert(&mut self, column: impl Into<String>, value: Option<String>) {
        self.cells.insert(column.into(), value);
    }

    /// 列の値を取得する
    ///
    /// 列が存在しない場合とセルがnullの場合はどちらも`None`です。
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).and_then(|v| v.as_deref())
    }

    /// 列が存在するかどうか
    pub fn has_column(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    /// 列数
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// 列が1つもないかどうか
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// ワークシートから読み込んだ表
#[derive(Debug, Clone, Default)]
pub(crate) struct Table {
    /// ヘッダー行の列名（出現順、重複除去済み）
    pub headers: Vec<String>,

    /// データ行（空行は除外済み）
    pub rows: Vec<SourceRow>,
}

impl Table {
    /// 指定された列名がヘッダーに含まれるか
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }
}
