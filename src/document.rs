//! Document Model Module
//!
//! 出力文書の中間表現（段落とランの列）を定義するモジュール。
//! DOCXへの書き出しは`output`モジュールが担当します。

/// 同一の書式を持つ連続したテキスト
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub underline: bool,
}

impl Run {
    /// 書式なしのラン
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            underline: false,
        }
    }

    /// 太字のラン
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
            underline: false,
        }
    }

    /// 太字かつ下線付きのラン
    pub fn bold_underlined(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
            underline: true,
        }
    }

    /// 書式なしかどうか
    pub fn is_plain(&self) -> bool {
        !self.bold && !self.underline
    }
}

/// 段落（ランの列）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    runs: Vec<Run>,
}

impl Paragraph {
    /// ランを持たない空の段落
    pub fn new() -> Self {
        Self::default()
    }

    /// 書式なしテキスト1つからなる段落
    ///
    /// テキストが空の場合はランを持たない空の段落になります。
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            Self::new()
        } else {
            Self::new().with_run(Run::plain(text))
        }
    }

    /// ランを末尾に追加する
    pub fn with_run(mut self, run: Run) -> Self {
        self.runs.push(run);
        self
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// 全ランのテキストを連結した文字列
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// ランを持たない段落かどうか
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

/// 出力文書
///
/// 生成中は追記のみ可能です。段落の順序は追加順そのものです。
///
/// ```rust
/// use quizdocx::{Document, Paragraph, Run};
///
/// let mut document = Document::new();
/// document.push(Paragraph::new().with_run(Run::bold("Solution:")));
/// document.push(Paragraph::plain("x = 2"));
///
/// assert_eq!(document.len(), 2);
/// assert_eq!(document.paragraphs()[1].text(), "x = 2");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    paragraphs: Vec<Paragraph>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// 段落を末尾に追加する
    pub fn push(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// 各段落のテキスト（確認・デバッグ用）
    pub fn texts(&self) -> Vec<String> {
        self.paragraphs.iter().map(Paragraph::text).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_constructors() {
        assert!(Run::plain("a").is_plain());
        assert!(Run::bold("a").bold);
        assert!(!Run::bold("a").underline);

        let run = Run::bold_underlined("a");
        assert!(run.bold && run.underline);
        assert!(!run.is_plain());
    }

    #[test]
    fn test_plain_paragraph_empty_text_has_no_runs() {
        assert!(Paragraph::plain("").is_empty());
        assert_eq!(Paragraph::plain("x").runs(), &[Run::plain("x")]);
    }

    #[test]
    fn test_paragraph_text_concatenates_runs() {
        let paragraph = Paragraph::new()
            .with_run(Run::bold("Topic -"))
            .with_run(Run::plain(" Algebra"));
        assert_eq!(paragraph.text(), "Topic - Algebra");
        assert_eq!(paragraph.runs().len(), 2);
    }

    #[test]
    fn test_document_preserves_order() {
        let mut document = Document::new();
        assert!(document.is_empty());
        document.push(Paragraph::plain("first"));
        document.push(Paragraph::new());
        document.push(Paragraph::plain("third"));

        assert_eq!(document.texts(), vec!["first", "", "third"]);
    }
}
