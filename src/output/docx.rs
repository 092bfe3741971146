//! DOCX Package Writer
//!
//! `Document`をOffice Open XML（WordprocessingML）パッケージとして書き出すモジュール。

use std::io::{Cursor, Seek, Write};
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

use crate::document::Document;
use crate::error::QuizDocError;

use super::document_xml::render_document_xml;
use super::parts;

/// DOCXパッケージライター
///
/// ZIPエントリの更新日時は固定値（1980-01-01）を使用するため、
/// 同じ`Document`からは常にバイト単位で同一のパッケージが生成されます。
///
/// # 使用例
///
/// ```rust
/// use quizdocx::{Document, DocxWriter, Paragraph};
///
/// # fn main() -> Result<(), quizdocx::QuizDocError> {
/// let mut document = Document::new();
/// document.push(Paragraph::plain("Q1. What is 2 + 2?"));
///
/// let bytes = DocxWriter::new().to_bytes(&document)?;
/// assert!(bytes.starts_with(b"PK"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DocxWriter {
    compression: CompressionMethod,
}

impl DocxWriter {
    pub fn new() -> Self {
        Self {
            compression: CompressionMethod::Deflated,
        }
    }

    /// 無圧縮で格納するライター（パッケージの中身を目視確認したい場合など）
    pub fn stored() -> Self {
        Self {
            compression: CompressionMethod::Stored,
        }
    }

    fn file_options(&self) -> FileOptions {
        FileOptions::default()
            .compression_method(self.compression)
            .last_modified_time(zip::DateTime::default())
    }

    /// 文書をDOCXパッケージとして書き出す
    ///
    /// # 戻り値
    ///
    /// * `Ok(W)` - 書き出し完了後のライター
    /// * `Err(QuizDocError::OutputWrite)` - パッケージの組み立てに失敗した場合
    pub fn write<W: Write + Seek>(&self, document: &Document, sink: W) -> Result<W, QuizDocError> {
        let body = render_document_xml(document)?;

        let options = self.file_options();
        let mut zip = ZipWriter::new(sink);
        let entries: [(&str, &[u8]); 7] = [
            (parts::CONTENT_TYPES_PATH, parts::CONTENT_TYPES.as_bytes()),
            (parts::ROOT_RELS_PATH, parts::ROOT_RELS.as_bytes()),
            (parts::DOCUMENT_PATH, body.as_slice()),
            (parts::DOCUMENT_RELS_PATH, parts::DOCUMENT_RELS.as_bytes()),
            (parts::STYLES_PATH, parts::STYLES.as_bytes()),
            (parts::CORE_PROPS_PATH, parts::CORE_PROPS.as_bytes()),
            (parts::APP_PROPS_PATH, parts::APP_PROPS.as_bytes()),
        ];

        for (path, content) in entries {
            zip.start_file(path, options)
                .map_err(|e| QuizDocError::OutputWrite(format!("{}: {}", path, e)))?;
            zip.write_all(content)
                .map_err(|e| QuizDocError::OutputWrite(format!("{}: {}", path, e)))?;
        }

        zip.finish()
            .map_err(|e| QuizDocError::OutputWrite(format!("Failed to finish archive: {}", e)))
    }

    /// 文書をDOCXパッケージのバイト列に変換する
    pub fn to_bytes(&self, document: &Document) -> Result<Vec<u8>, QuizDocError> {
        let cursor = self.write(document, Cursor::new(Vec::new()))?;
        Ok(cursor.into_inner())
    }
}

impl Default for DocxWriter {
    fn default() -> Self {
        Self::new()
    }
}
