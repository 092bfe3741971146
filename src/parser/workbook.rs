//! Workbook Parser Module
//!
//! calamineを使用して、クイズ表のワークシートを行データとして読み込むモジュール。
//! 1行目をヘッダー行として扱い、2行目以降を列名付きの`SourceRow`に変換します。

use calamine::{open_workbook_auto_from_rs, Data, Reader, Sheets, Xlsx};
use std::io::Cursor;

use crate::api::SheetSelector;
use crate::error::QuizDocError;
use crate::formatter::CellFormatter;
use crate::types::{CellValue, SourceRow, Table};

/// ワークブックパーサー
///
/// calamineのラッパーとして、ワークブックレベルの操作を提供します。
pub(crate) struct WorkbookParser {
    /// calamineのワークブック（XLSX形式のみサポート）
    workbook: Xlsx<Cursor<Vec<u8>>>,
}

impl WorkbookParser {
    /// メモリ上のXLSXデータからワークブックを開く
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - ワークブックの読み込みに成功した場合
    /// * `Err(QuizDocError::SourceRead)` - 読み込みに失敗した場合
    /// * `Err(QuizDocError::Config)` - XLSX以外の形式だった場合
    pub fn open(buffer: Vec<u8>) -> Result<Self, QuizDocError> {
        let sheets =
            open_workbook_auto_from_rs(Cursor::new(buffer)).map_err(QuizDocError::SourceRead)?;
        let workbook = match sheets {
            Sheets::Xlsx(workbook) => workbook,
            _ => {
                return Err(QuizDocError::Config(
                    "Only XLSX format is supported".to_string(),
                ))
            }
        };

        Ok(WorkbookParser { workbook })
    }

    /// シートを選択する
    pub fn select_sheet(&self, selector: &SheetSelector) -> Result<String, QuizDocError> {
        selector
            .resolve(&self.workbook.sheet_names())
            .map_err(QuizDocError::Config)
    }

    /// シートを表として読み込む
    ///
    /// # 処理内容
    ///
    /// 1. 使用範囲の先頭行をヘッダー行として列名を取得
    ///    - 空のヘッダーセルの列は無視
    ///    - 同名の列が複数ある場合は最初の列を採用
    /// 2. 以降の各行を`SourceRow`に変換
    ///    - すべてのセルが空の行はスキップ（ヘッダーが空の列の値も含めて判定）
    ///
    /// # 戻り値
    ///
    /// * `Ok(Table)` - 読み込んだ表（シートが空ならヘッダー・行とも空）
    /// * `Err(QuizDocError::SourceRead)` - シートの解析に失敗した場合
    pub fn read_table(
        &mut self,
        sheet_name: &str,
        formatter: &CellFormatter,
    ) -> Result<Table, QuizDocError> {
        let range = self
            .workbook
            .worksheet_range(sheet_name)
            .map_err(|e| QuizDocError::SourceRead(e.into()))?;

        let mut rows = range.rows();
        let header_row = match rows.next() {
            Some(row) => row,
            None => {
                log::warn!("Sheet '{}' is empty", sheet_name);
                return Ok(Table::default());
            }
        };

        // (列インデックス, 列名)
        let mut columns: Vec<(usize, String)> = Vec::new();
        for (col_idx, cell) in header_row.iter().enumerate() {
            let name = match formatter.format_cell(&to_cell_value(cell)) {
                Some(name) if !name.is_empty() => name,
                _ => continue,
            };

            if columns.iter().any(|(_, existing)| *existing == name) {
                log::warn!(
                    "Duplicate column '{}' in sheet '{}'; using the first occurrence",
                    name,
                    sheet_name
                );
                continue;
            }
            columns.push((col_idx, name));
        }

        let mut table_rows = Vec::new();
        for (row_idx, row) in rows.enumerate() {
            // ヘッダーが空の列の値も含めて判定する
            if row.iter().all(|cell| to_cell_value(cell).is_null()) {
                // ヘッダー行の次を1行目として数える
                log::debug!("Skipping empty data row {} in sheet '{}'", row_idx + 1, sheet_name);
                continue;
            }

            let mut source_row = SourceRow::new();
            for (col_idx, name) in &columns {
                let value = row
                    .get(*col_idx)
                    .and_then(|cell| formatter.format_cell(&to_cell_value(cell)));
                source_row.insert(name.as_str(), value);
            }
            table_rows.push(source_row);
        }

        Ok(Table {
            headers: columns.into_iter().map(|(_, name)| name).collect(),
            rows: table_rows,
        })
    }
}

/// calamineのセルデータを変換
pub(crate) fn to_cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => CellValue::DateTime(datetime),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
        Data::Empty => CellValue::Empty,
    }
}


// ワークシート全体の読み込みは統合テスト（tests/）で検証します。
// 実際のXLSXファイルが必要なため、rust_xlsxwriterで生成したフィクスチャを使用します。
