//! WordprocessingML Body Writer
//!
//! `Document`を`word/document.xml`のXMLに変換するモジュール。
//! quick-xmlのイベントライターを使用し、テキストのエスケープはquick-xmlに任せます。

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::document::{Document, Paragraph, Run};
use crate::error::QuizDocError;

const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const RELATIONSHIPS_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// ラン内テキストの構成要素
#[derive(Debug, PartialEq, Eq)]
enum RunContent {
    Text(String),
    Break,
    Tab,
}

/// `word/document.xml`を生成する
pub(crate) fn render_document_xml(document: &Document) -> Result<Vec<u8>, QuizDocError> {
    let mut writer = Writer::new(Vec::new());

    emit(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))),
    )?;

    let mut root = BytesStart::new("w:document");
    root.push_attribute(("xmlns:w", WORDML_NS));
    root.push_attribute(("xmlns:r", RELATIONSHIPS_NS));
    emit(&mut writer, Event::Start(root))?;
    emit(&mut writer, Event::Start(BytesStart::new("w:body")))?;

    for paragraph in document.paragraphs() {
        write_paragraph(&mut writer, paragraph)?;
    }

    write_section_properties(&mut writer)?;

    emit(&mut writer, Event::End(BytesEnd::new("w:body")))?;
    emit(&mut writer, Event::End(BytesEnd::new("w:document")))?;

    Ok(writer.into_inner())
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), QuizDocError> {
    writer
        .write_event(event)
        .map_err(|e| QuizDocError::OutputWrite(format!("XML write failed: {}", e)))
}

fn write_paragraph(
    writer: &mut Writer<Vec<u8>>,
    paragraph: &Paragraph,
) -> Result<(), QuizDocError> {
    if paragraph.is_empty() {
        return emit(writer, Event::Empty(BytesStart::new("w:p")));
    }

    emit(writer, Event::Start(BytesStart::new("w:p")))?;
    for run in paragraph.runs() {
        write_run(writer, run)?;
    }
    emit(writer, Event::End(BytesEnd::new("w:p")))
}

fn write_run(writer: &mut Writer<Vec<u8>>, run: &Run) -> Result<(), QuizDocError> {
    emit(writer, Event::Start(BytesStart::new("w:r")))?;

    if !run.is_plain() {
        emit(writer, Event::Start(BytesStart::new("w:rPr")))?;
        if run.bold {
            emit(writer, Event::Empty(BytesStart::new("w:b")))?;
        }
        if run.underline {
            let mut underline = BytesStart::new("w:u");
            underline.push_attribute(("w:val", "single"));
            emit(writer, Event::Empty(underline))?;
        }
        emit(writer, Event::End(BytesEnd::new("w:rPr")))?;
    }

    for content in split_run_text(&run.text) {
        match content {
            RunContent::Text(text) => {
                let mut start = BytesStart::new("w:t");
                start.push_attribute(("xml:space", "preserve"));
                emit(writer, Event::Start(start))?;
                emit(writer, Event::Text(BytesText::new(&text)))?;
                emit(writer, Event::End(BytesEnd::new("w:t")))?;
            }
            RunContent::Break => emit(writer, Event::Empty(BytesStart::new("w:br")))?,
            RunContent::Tab => emit(writer, Event::Empty(BytesStart::new("w:tab")))?,
        }
    }

    emit(writer, Event::End(BytesEnd::new("w:r")))
}

/// 用紙サイズ（Letter）と余白
fn write_section_properties(writer: &mut Writer<Vec<u8>>) -> Result<(), QuizDocError> {
    emit(writer, Event::Start(BytesStart::new("w:sectPr")))?;

    let mut page_size = BytesStart::new("w:pgSz");
    page_size.push_attribute(("w:w", "12240"));
    page_size.push_attribute(("w:h", "15840"));
    emit(writer, Event::Empty(page_size))?;

    let mut margins = BytesStart::new("w:pgMar");
    for (name, value) in [
        ("w:top", "1440"),
        ("w:right", "1800"),
        ("w:bottom", "1440"),
        ("w:left", "1800"),
        ("w:header", "720"),
        ("w:footer", "720"),
        ("w:gutter", "0"),
    ] {
        margins.push_attribute((name, value));
    }
    emit(writer, Event::Empty(margins))?;

    emit(writer, Event::End(BytesEnd::new("w:sectPr")))
}

/// ランのテキストを、テキスト・改行・タブに分割する
///
/// `\n`、`\r\n`、`\r`は改行、`\t`はタブになります。
/// XML 1.0で使用できない制御文字は除去します。
fn split_run_text(text: &str) -> Vec<RunContent> {
    let mut contents = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        let separator = match c {
            '\n' => Some(RunContent::Break),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                Some(RunContent::Break)
            }
            '\t' => Some(RunContent::Tab),
            c if is_xml_char(c) => {
                current.push(c);
                None
            }
            _ => None,
        };

        if let Some(separator) = separator {
            if !current.is_empty() {
                contents.push(RunContent::Text(std::mem::take(&mut current)));
            }
            contents.push(separator);
        }
    }

    if !current.is_empty() {
        contents.push(RunContent::Text(current));
    }
    contents
}

/// XML 1.0で使用可能な文字かどうか
fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\u{9}' | '\u{A}' | '\u{D}'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}
