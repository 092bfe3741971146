//! Item Renderer Module
//!
//! `QuizRecord`1件を、書式付き段落の固定シーケンスとして`Document`に追記するモジュール。
//!
//! # 出力順序
//!
//! 1. `Topic -` / `Sub Topic -` / `Difficulty Level -`（ラベル太字、常に出力）
//! 2. `Q{n}. {問題文}`（常に出力）
//! 3. 空でない選択肢ごとに `({n}) {選択肢}`（正解は太字＋下線）
//! 4. `Correct Answer: ...`（全体太字）
//! 5. `Solution:` / `Justification:` ブロック（1行1段落）
//! 6. `Reference Link:` ブロック
//! 7. 区切りの空段落

use crate::document::{Document, Paragraph, Run};
use crate::record::QuizRecord;

/// クイズ1問分を文書に追記する
///
/// # 引数
///
/// * `doc` - 追記先の文書
/// * `index` - 0始まりの問題番号（表示は1始まり）
/// * `record` - 抽出済みのレコード
///
/// # 使用例
///
/// ```rust
/// use quizdocx::{render_item, Document, QuizRecord};
///
/// let record = QuizRecord {
///     question_text: "What is 2 + 2?".to_string(),
///     ..Default::default()
/// };
///
/// let mut document = Document::new();
/// render_item(&mut document, 0, &record);
///
/// // メタデータ3行 + 問題文 + 区切り
/// assert_eq!(document.len(), 5);
/// assert_eq!(document.paragraphs()[3].text(), "Q1. What is 2 + 2?");
/// ```
pub fn render_item(doc: &mut Document, index: usize, record: &QuizRecord) {
    add_label_and_value(doc, "Topic -", &record.topic);
    add_label_and_value(doc, "Sub Topic -", &record.sub_topic);
    add_label_and_value(doc, "Difficulty Level -", &record.difficulty_level);

    doc.push(Paragraph::new().with_run(Run::plain(format!(
        "Q{}. {}",
        index + 1,
        record.question_text
    ))));

    let marker = record.correct_marker();
    for (ordinal, choice) in (1u64..).zip(record.choices()) {
        if !choice.is_empty() {
            add_choice_line(doc, ordinal, choice, marker == Some(ordinal));
        }
    }

    if !record.correct_choice.is_empty() {
        doc.push(Paragraph::new().with_run(Run::bold(format!(
            "Correct Answer: {}",
            record.correct_choice
        ))));
    }

    add_multiline_block(doc, "Solution:", &record.solution);
    add_multiline_block(doc, "Justification:", &record.justification);

    if !record.reference_link.is_empty() {
        add_heading(doc, "Reference Link:");
        doc.push(Paragraph::plain(record.reference_link.as_str()));
    }

    doc.push(Paragraph::new());
}

/// 太字ラベルと値を同じ段落に出力する（値が空でも出力）
fn add_label_and_value(doc: &mut Document, label: &str, value: &str) {
    doc.push(
        Paragraph::new()
            .with_run(Run::bold(label))
            .with_run(Run::plain(format!(" {}", value))),
    );
}

fn add_choice_line(doc: &mut Document, ordinal: u64, text: &str, is_correct: bool) {
    let choice_run = if is_correct {
        Run::bold_underlined(text)
    } else {
        Run::plain(text)
    };

    doc.push(
        Paragraph::new()
            .with_run(Run::bold(format!("({}) ", ordinal)))
            .with_run(choice_run),
    );
}

fn add_heading(doc: &mut Document, heading: &str) {
    doc.push(Paragraph::new().with_run(Run::bold(heading)));
}

/// 見出しと、本文の各行を1段落ずつ出力する（本文が空なら何も出力しない）
fn add_multiline_block(doc: &mut Document, heading: &str, body: &str) {
    if body.is_empty() {
        return;
    }

    add_heading(doc, heading);
    for line in body.split('\n') {
        doc.push(Paragraph::plain(line.trim()));
    }
}
