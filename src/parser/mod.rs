//! Parser Module
//!
//! calamineを使用したクイズ表（XLSX）の読み込み処理。

mod workbook;

pub(crate) use workbook::WorkbookParser;
