//! Security Module
//!
//! セキュリティ対策を実装するモジュール。
//! 入力XLSX（ZIPアーカイブ）をcalamineに渡す前に、ZIP bomb攻撃や
//! パストラバーサル攻撃への対策としてアーカイブの構造を検査します。

use std::io::Cursor;
use zip::ZipArchive;

use crate::error::QuizDocError;

/// セキュリティ設定
///
/// ファイル処理時のセキュリティ制限を定義します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SecurityConfig {
    /// 展開後の最大サイズ（バイト）
    /// デフォルト: 1GB (1_073_741_824 bytes)
    pub max_decompressed_size: u64,
    /// ZIPアーカイブ内の最大ファイル数
    /// デフォルト: 10000
    pub max_file_count: usize,
    /// 単一ファイルの最大サイズ（バイト）
    /// デフォルト: 100MB (104_857_600 bytes)
    pub max_file_size: u64,
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 256MB (268_435_456 bytes)
    pub max_input_file_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_decompressed_size: 1_073_741_824, // 1GB
            max_file_count: 10_000,
            max_file_size: 104_857_600,       // 100MB
            max_input_file_size: 268_435_456, // 256MB
        }
    }
}

/// ファイルパスの検証
///
/// パストラバーサル攻撃を防ぐため、ZIPエントリのパスを検証します。
///
/// # 戻り値
///
/// * `Ok(())` - パスが安全な場合
/// * `Err(String)` - パスが危険な場合（`..`や絶対パスを含む）
pub(crate) fn validate_zip_path(path: &str) -> Result<(), String> {
    if path.is_empty() {
        return Err("Empty path is not allowed".to_string());
    }

    // 絶対パスを拒否（Windows形式の`C:\`やUnix形式の`/`で始まるパス）
    if path.starts_with('/') || path.starts_with("C:\\") || path.starts_with("c:\\") {
        return Err(format!("Absolute path is not allowed: {}", path));
    }

    if path.contains("..") {
        return Err(format!("Path traversal detected: {}", path));
    }

    if path.contains('\\') {
        return Err(format!("Backslash in path is not allowed: {}", path));
    }

    Ok(())
}

/// 入力アーカイブを検査する
///
/// # 検査項目
///
/// 1. 入力サイズの上限
/// 2. エントリ数の上限
/// 3. 各エントリのパス（パストラバーサル）
/// 4. 各エントリと合計の展開後サイズ
///
/// # 戻り値
///
/// * `Ok(())` - 検査を通過した場合
/// * `Err(QuizDocError::Zip)` - ZIPアーカイブとして開けない場合
/// * `Err(QuizDocError::SecurityViolation)` - 制限に違反した場合
pub(crate) fn inspect_archive(bytes: &[u8], config: &SecurityConfig) -> Result<(), QuizDocError> {
    if bytes.len() as u64 > config.max_input_file_size {
        return Err(QuizDocError::SecurityViolation(format!(
            "Input file size exceeds maximum: {} bytes (max: {} bytes)",
            bytes.len(),
            config.max_input_file_size
        )));
    }

    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| QuizDocError::Zip(format!("{}", e)))?;

    if archive.len() > config.max_file_count {
        return Err(QuizDocError::SecurityViolation(format!(
            "ZIP archive contains too many files: {} (max: {})",
            archive.len(),
            config.max_file_count
        )));
    }

    let mut total_decompressed_size = 0u64;
    for i in 0..archive.len() {
        let file = archive
            .by_index(i)
            .map_err(|e| QuizDocError::Zip(format!("{}", e)))?;

        let file_name = file.name();
        validate_zip_path(file_name)
            .map_err(|e| QuizDocError::SecurityViolation(format!("Invalid ZIP path: {}", e)))?;

        let file_size = file.size();
        if file_size > config.max_file_size {
            return Err(QuizDocError::SecurityViolation(format!(
                "File '{}' exceeds maximum size: {} bytes (max: {} bytes)",
                file_name, file_size, config.max_file_size
            )));
        }

        total_decompressed_size = total_decompressed_size
            .checked_add(file_size)
            .ok_or_else(|| {
                QuizDocError::SecurityViolation(
                    "Total decompressed size calculation overflow".to_string(),
                )
            })?;

        if total_decompressed_size > config.max_decompressed_size {
            return Err(QuizDocError::SecurityViolation(format!(
                "Total decompressed size exceeds maximum: {} bytes (max: {} bytes)",
                total_decompressed_size, config.max_decompressed_size
            )));
        }
    }

    log::debug!(
        "Input archive passed inspection: {} entries, {} bytes decompressed",
        archive.len(),
        total_decompressed_size
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::{FileOptions, ZipWriter};
    use zip::CompressionMethod;

    fn build_zip(entries: Vec<(&str, Vec<u8>)>) -> Vec<u8> {
        let mut zip_data = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut zip_data));
            let options = FileOptions::default().compression_method(CompressionMethod::Stored);
            for (name, content) in entries {
                zip.start_file(name, options).unwrap();
                zip.write_all(&content).unwrap();
            }
            zip.finish().unwrap();
        }
        zip_data
    }

    #[test]
    fn test_validate_zip_path_valid() {
        assert!(validate_zip_path("xl/workbook.xml").is_ok());
        assert!(validate_zip_path("word/document.xml").is_ok());
        assert!(validate_zip_path("[Content_Types].xml").is_ok());
    }

    #[test]
    fn test_validate_zip_path_rejects_dangerous_paths() {
        assert!(validate_zip_path("").is_err());
        assert!(validate_zip_path("/etc/passwd").is_err());
        assert!(validate_zip_path("C:\\Windows\\system32").is_err());
        assert!(validate_zip_path("c:\\xl\\workbook.xml").is_err());
        assert!(validate_zip_path("../etc/passwd").is_err());
        assert!(validate_zip_path("xl/../../etc/passwd").is_err());
        assert!(validate_zip_path("xl\\workbook.xml").is_err());
    }

    #[test]
    fn test_inspect_archive_accepts_small_archive() {
        let data = build_zip(vec![("xl/workbook.xml", b"<workbook/>".to_vec())]);
        assert!(inspect_archive(&data, &SecurityConfig::default()).is_ok());
    }

    #[test]
    fn test_inspect_archive_rejects_non_zip() {
        let result = inspect_archive(b"Topic,Question Text\n", &SecurityConfig::default());
        assert!(matches!(result, Err(QuizDocError::Zip(_))));
    }

    #[test]
    fn test_inspect_archive_input_size_limit() {
        let data = build_zip(vec![("xl/workbook.xml", b"<workbook/>".to_vec())]);
        let config = SecurityConfig {
            max_input_file_size: 10,
            ..Default::default()
        };
        match inspect_archive(&data, &config) {
            Err(QuizDocError::SecurityViolation(msg)) => assert!(msg.contains("Input file size")),
            other => panic!("Expected SecurityViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_inspect_archive_file_count_limit() {
        let data = build_zip(vec![
            ("a.xml", b"a".to_vec()),
            ("b.xml", b"b".to_vec()),
            ("c.xml", b"c".to_vec()),
        ]);
        let config = SecurityConfig {
            max_file_count: 2,
            ..Default::default()
        };
        match inspect_archive(&data, &config) {
            Err(QuizDocError::SecurityViolation(msg)) => assert!(msg.contains("too many files")),
            other => panic!("Expected SecurityViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_inspect_archive_entry_and_total_size_limits() {
        let data = build_zip(vec![("a.xml", vec![b'x'; 64]), ("b.xml", vec![b'y'; 64])]);

        let per_file = SecurityConfig {
            max_file_size: 32,
            ..Default::default()
        };
        match inspect_archive(&data, &per_file) {
            Err(QuizDocError::SecurityViolation(msg)) => assert!(msg.contains("exceeds maximum size")),
            other => panic!("Expected SecurityViolation, got {:?}", other),
        }

        let total = SecurityConfig {
            max_decompressed_size: 100,
            ..Default::default()
        };
        match inspect_archive(&data, &total) {
            Err(QuizDocError::SecurityViolation(msg)) => assert!(msg.contains("decompressed size")),
            other => panic!("Expected SecurityViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_inspect_archive_path_traversal() {
        let data = build_zip(vec![("../evil.xml", b"x".to_vec())]);
        match inspect_archive(&data, &SecurityConfig::default()) {
            Err(QuizDocError::SecurityViolation(msg)) => assert!(msg.contains("Invalid ZIP path")),
            // zipクレートがパスを拒否した場合も許容
            Err(QuizDocError::Zip(_)) => {}
            other => panic!("Expected SecurityViolation, got {:?}", other),
        }
    }
}
