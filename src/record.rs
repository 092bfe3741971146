//! Record Module
//!
//! ソース表の1行から、クイズ1問分のフィールド値（`QuizRecord`）を抽出するモジュール。
//!
//! 抽出は全関数で、失敗しません。列が存在しない場合もセルがnullの場合も、
//! フィールド値は空文字列に正規化されます。

use crate::types::SourceRow;

/// 認識されるフィールド（列）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Topic,
    SubTopic,
    DifficultyLevel,
    QuestionText,
    Choice1,
    Choice2,
    Choice3,
    Choice4,
    CorrectChoice,
    Solution,
    Justification,
    ReferenceLink,
}

impl Field {
    /// すべてのフィールド（列の標準的な並び順）
    pub const ALL: [Field; 12] = [
        Field::Topic,
        Field::SubTopic,
        Field::DifficultyLevel,
        Field::QuestionText,
        Field::Choice1,
        Field::Choice2,
        Field::Choice3,
        Field::Choice4,
        Field::CorrectChoice,
        Field::Solution,
        Field::Justification,
        Field::ReferenceLink,
    ];

    /// ヘッダー行での列名（大文字小文字を区別して完全一致）
    pub const fn column_name(self) -> &'static str {
        match self {
            Field::Topic => "Topic",
            Field::SubTopic => "Sub Topic",
            Field::DifficultyLevel => "Difficulty Level",
            Field::QuestionText => "Question Text",
            Field::Choice1 => "Choice 1",
            Field::Choice2 => "Choice 2",
            Field::Choice3 => "Choice 3",
            Field::Choice4 => "Choice 4",
            Field::CorrectChoice => "Correct choice",
            Field::Solution => "Solution",
            Field::Justification => "Justification",
            Field::ReferenceLink => "Reference Link",
        }
    }
}

/// 認識される列名の一覧
pub const FIELD_NAMES: [&str; 12] = [
    Field::Topic.column_name(),
    Field::SubTopic.column_name(),
    Field::DifficultyLevel.column_name(),
    Field::QuestionText.column_name(),
    Field::Choice1.column_name(),
    Field::Choice2.column_name(),
    Field::Choice3.column_name(),
    Field::Choice4.column_name(),
    Field::CorrectChoice.column_name(),
    Field::Solution.column_name(),
    Field::Justification.column_name(),
    Field::ReferenceLink.column_name(),
];

/// 行から列の値を取得する
///
/// # 戻り値
///
/// * `Some(String)` - 前後の空白を除去した値
/// * `None` - 列が存在しない、またはセルがnullの場合
pub fn get_field(row: &SourceRow, name: &str) -> Option<String> {
    row.get(name).map(|value| value.trim().to_string())
}

/// クイズ1問分のフィールド値
///
/// すべてのフィールドは前後の空白を除去済みで、欠損値は空文字列です。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizRecord {
    pub topic: String,
    pub sub_topic: String,
    pub difficulty_level: String,
    pub question_text: String,
    pub choice1: String,
    pub choice2: String,
    pub choice3: String,
    pub choice4: String,
    /// 正解の記述（例: `"2"`, `"Option 3 is correct"`）
    pub correct_choice: String,
    pub solution: String,
    pub justification: String,
    pub reference_link: String,
}

impl QuizRecord {
    /// 行からレコードを抽出する
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use quizdocx::{QuizRecord, SourceRow};
    ///
    /// let row = SourceRow::new()
    ///     .with("Question Text", "  What is 2 + 2?  ")
    ///     .with_null("Choice 1");
    ///
    /// let record = QuizRecord::extract(&row);
    /// assert_eq!(record.question_text, "What is 2 + 2?");
    /// assert_eq!(record.choice1, "");
    /// assert_eq!(record.reference_link, "");
    /// ```
    pub fn extract(row: &SourceRow) -> Self {
        let mut record = Self::default();
        for field in Field::ALL {
            *record.field_mut(field) = get_field(row, field.column_name()).unwrap_or_default();
        }
        record
    }

    /// フィールド値を取得する
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Topic => &self.topic,
            Field::SubTopic => &self.sub_topic,
            Field::DifficultyLevel => &self.difficulty_level,
            Field::QuestionText => &self.question_text,
            Field::Choice1 => &self.choice1,
            Field::Choice2 => &self.choice2,
            Field::Choice3 => &self.choice3,
            Field::Choice4 => &self.choice4,
            Field::CorrectChoice => &self.correct_choice,
            Field::Solution => &self.solution,
            Field::Justification => &self.justification,
            Field::ReferenceLink => &self.reference_link,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Topic => &mut self.topic,
            Field::SubTopic => &mut self.sub_topic,
            Field::DifficultyLevel => &mut self.difficulty_level,
            Field::QuestionText => &mut self.question_text,
            Field::Choice1 => &mut self.choice1,
            Field::Choice2 => &mut self.choice2,
            Field::Choice3 => &mut self.choice3,
            Field::Choice4 => &mut self.choice4,
            Field::CorrectChoice => &mut self.correct_choice,
            Field::Solution => &mut self.solution,
            Field::Justification => &mut self.justification,
            Field::ReferenceLink => &mut self.reference_link,
        }
    }

    /// 選択肢1〜4（空のものも含む）
    pub fn choices(&self) -> [&str; 4] {
        [&self.choice1, &self.choice2, &self.choice3, &self.choice4]
    }

    /// 正解番号（`correct_choice`から抽出した最初の数字列の値）
    pub fn correct_marker(&self) -> Option<u64> {
        parse_correct_marker(&self.correct_choice)
    }
}

/// 自由記述の正解欄から正解番号を抽出する
///
/// 最初に現れる連続した数字列を整数として解釈します。
/// 数字列の探索にはASCII以外の数字（全角数字など）も含めますが、
/// 最初の数字列にASCII以外の数字が含まれる場合は正解番号なしとします。
/// 数字がない場合、または値が`u64`に収まらない場合も`None`です。
///
/// ```rust
/// use quizdocx::parse_correct_marker;
///
/// assert_eq!(parse_correct_marker("2"), Some(2));
/// assert_eq!(parse_correct_marker("Option 3 is correct"), Some(3));
/// assert_eq!(parse_correct_marker("Choice 04, not 1"), Some(4));
/// assert_eq!(parse_correct_marker("Option ３, see 2"), None);
/// assert_eq!(parse_correct_marker("none of the above"), None);
/// ```
pub fn parse_correct_marker(text: &str) -> Option<u64> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_numeric())
        .take_while(|c| c.is_numeric())
        .collect();

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    // 先頭のゼロを除いてから解釈する（"0003" -> 3）
    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return Some(0);
    }
    significant.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_row() -> SourceRow {
        FIELD_NAMES
            .iter()
            .fold(SourceRow::new(), |row, name| row.with(*name, format!(" {} value ", name)))
    }

    #[test]
    fn test_field_names_order() {
        assert_eq!(
            FIELD_NAMES,
            [
                "Topic",
                "Sub Topic",
                "Difficulty Level",
                "Question Text",
                "Choice 1",
                "Choice 2",
                "Choice 3",
                "Choice 4",
                "Correct choice",
                "Solution",
                "Justification",
                "Reference Link",
            ]
        );
    }

    #[test]
    fn test_extract_all_fields_trimmed() {
        let record = QuizRecord::extract(&full_row());
        for field in Field::ALL {
            assert_eq!(record.get(field), format!("{} value", field.column_name()));
        }
    }

    #[test]
    fn test_extract_missing_and_null_columns() {
        let row = SourceRow::new()
            .with("Question Text", "Q")
            .with_null("Choice 1")
            .with("Choice 2", "   ");

        let record = QuizRecord::extract(&row);
        assert_eq!(record.question_text, "Q");
        assert_eq!(record.choice1, "");
        assert_eq!(record.choice2, "");
        assert_eq!(record.topic, "");
        assert_eq!(record.reference_link, "");
    }

    #[test]
    fn test_extract_ignores_extra_and_case_mismatched_columns() {
        let row = SourceRow::new()
            .with("topic", "lowercase")
            .with("Notes", "extra");

        assert_eq!(QuizRecord::extract(&row), QuizRecord::default());
    }

    #[test]
    fn test_get_field() {
        let row = SourceRow::new().with("Topic", "\tGeometry\n").with_null("Solution");
        assert_eq!(get_field(&row, "Topic"), Some("Geometry".to_string()));
        assert_eq!(get_field(&row, "Solution"), None);
        assert_eq!(get_field(&row, "Justification"), None);
    }

    #[test]
    fn test_choices() {
        let row = SourceRow::new().with("Choice 1", "a").with("Choice 3", "c");
        let record = QuizRecord::extract(&row);
        assert_eq!(record.choices(), ["a", "", "c", ""]);
    }

    #[test]
    fn test_parse_correct_marker() {
        assert_eq!(parse_correct_marker("1"), Some(1));
        assert_eq!(parse_correct_marker("Option 3 is correct"), Some(3));
        assert_eq!(parse_correct_marker("(2)"), Some(2));
        assert_eq!(parse_correct_marker("4.0"), Some(4));
        assert_eq!(parse_correct_marker("12 and 3"), Some(12));
        assert_eq!(parse_correct_marker("007"), Some(7));
        assert_eq!(parse_correct_marker("000"), Some(0));
        assert_eq!(parse_correct_marker("B"), None);
        assert_eq!(parse_correct_marker(""), None);
    }

    #[test]
    fn test_parse_correct_marker_non_ascii_digits_come_first() {
        assert_eq!(parse_correct_marker("Option ３, see 2"), None);
        assert_eq!(parse_correct_marker("٣"), None);
        assert_eq!(parse_correct_marker("第2問"), Some(2));
    }

    #[test]
    fn test_parse_correct_marker_overflow() {
        assert_eq!(parse_correct_marker("99999999999999999999999"), None);
        assert_eq!(parse_correct_marker("00000000000000000000000002"), Some(2));
    }

    #[test]
    fn test_correct_marker_from_record() {
        let record = QuizRecord {
            correct_choice: "Answer is choice 2".to_string(),
            ..Default::default()
        };
        assert_eq!(record.correct_marker(), Some(2));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_marker_finds_embedded_digit(prefix in "[a-zA-Z ]{0,20}", n in 0u64..100_000, suffix in "[a-zA-Z .]{0,20}") {
                let text = format!("{}{}{}", prefix, n, suffix);
                prop_assert_eq!(parse_correct_marker(&text), Some(n));
            }

            #[test]
            fn test_marker_none_without_digits(text in "[^0-9]{0,40}") {
                // ASCII以外の数字が先に現れた場合もNone
                prop_assert_eq!(parse_correct_marker(&text), None);
            }

            #[test]
            fn test_extract_never_keeps_outer_whitespace(value in "\\PC{0,30}") {
                let row = SourceRow::new().with("Solution", value.clone());
                let record = QuizRecord::extract(&row);
                prop_assert_eq!(record.solution, value.trim().to_string());
            }
        }
    }
}
