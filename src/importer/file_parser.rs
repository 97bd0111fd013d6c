// ==========================================
// POS销售汇总引擎 - 文件解析器实现
// ==========================================
// 支持: CSV (.csv)
// 输出: 按表头列名索引的原始记录
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// 解析 CSV 文件为原始记录列表
    ///
    /// - 表头去除首尾空白与 BOM
    /// - 完全空白的行被跳过
    pub fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<HashMap<String, String>>> {
        let path = file_path;

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        if let Some(ext) = path.extension() {
            if !ext.eq_ignore_ascii_case("csv") {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        // 打开 CSV 文件
        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        // 读取表头（去除电子表格导出的 BOM）
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        // 读取所有行
        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row_map = HashMap::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            records.push(row_map);
        }

        Ok(records)
    }

    /// 校验必需列是否齐全（缺列对整个请求致命）
    pub fn verify_required_columns(
        &self,
        file_path: &Path,
        required: &[&str],
    ) -> ImportResult<()> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        let missing: Vec<String> = required
            .iter()
            .filter(|col| !headers.iter().any(|h| h == *col))
            .map(|col| col.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ImportError::MissingRequiredColumns(missing))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_csv(content: &str) -> NamedTempFile {
        let mut temp_file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(temp_file, "{}", content).unwrap();
        temp_file
    }

    #[test]
    fn test_csv_parser_valid_file() {
        let temp_file = temp_csv("Date created,Status,Line items\n01/03/2024 09:00,Completed,Name:Widget\n");

        let parser = CsvParser;
        let records = parser.parse_to_raw_records(temp_file.path()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Status"), Some(&"Completed".to_string()));
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let parser = CsvParser;
        let result = parser.parse_to_raw_records(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_csv_parser_skip_empty_rows() {
        let temp_file = temp_csv("A,B\n1,2\n,\n3,4\n");

        let parser = CsvParser;
        let records = parser.parse_to_raw_records(temp_file.path()).unwrap();

        // 应跳过空行
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_csv_parser_strips_bom_from_header() {
        let temp_file = temp_csv("\u{feff}Date created,Status\n01/03/2024 09:00,Completed\n");

        let parser = CsvParser;
        let records = parser.parse_to_raw_records(temp_file.path()).unwrap();
        assert_eq!(
            records[0].get("Date created"),
            Some(&"01/03/2024 09:00".to_string())
        );
    }

    #[test]
    fn test_verify_required_columns_missing() {
        let temp_file = temp_csv("Date created,Line items\n01/03/2024 09:00,Name:Widget\n");

        let parser = CsvParser;
        let result =
            parser.verify_required_columns(temp_file.path(), &["Date created", "Status"]);
        match result {
            Err(ImportError::MissingRequiredColumns(cols)) => {
                assert_eq!(cols, vec!["Status".to_string()]);
            }
            other => panic!("期望缺列错误, 实际: {:?}", other.err()),
        }
    }
}
