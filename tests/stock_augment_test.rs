// ==========================================
// POS销售汇总引擎 - 库存增强端到端测试
// ==========================================
// 覆盖: 价格清洗、左连接、毛利派生、缺失处理
// ==========================================

use pos_sales_engine::{ApiError, ProcessApi};
use std::path::PathBuf;
use tempfile::TempDir;

// ==========================================
// 辅助函数: 写入测试文件
// ==========================================
fn write_summary_csv(dir: &TempDir, rows: &[&str]) -> PathBuf {
    let mut content =
        String::from("\u{feff}Date,Product Name,Shipping Method,Total Quantity,Total Amount\n");
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    let path = dir.path().join("summary.csv");
    std::fs::write(&path, content).unwrap();
    path
}

fn write_stock_csv(dir: &TempDir, rows: &[&str]) -> PathBuf {
    let mut content = String::from("Name,Categories,Stock quantity,Price,Supplier Price\n");
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    let path = dir.path().join("additional_data.csv");
    std::fs::write(&path, content).unwrap();
    path
}

fn read_output_lines(path: &PathBuf) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .trim_start_matches('\u{feff}')
        .lines()
        .map(|l| l.to_string())
        .collect()
}

#[test]
fn test_augment_joins_and_derives_margin() {
    let dir = TempDir::new().unwrap();
    let summary = write_summary_csv(&dir, &["2024-03-01,Ale,Courier,2,9.00"]);
    let stock = write_stock_csv(&dir, &[r#"Ale,Drinks,12,"€3.00","€1.00""#]);
    let output = dir.path().join("mapped_output.csv");

    let written = ProcessApi::default()
        .augment_with_stock(&summary, &stock, &output)
        .unwrap();
    assert_eq!(written, 1);

    let lines = read_output_lines(&output);
    assert_eq!(
        lines[0],
        "Product Name,Categories,Stock quantity,Price,Supplier Price,Margin,Margin Percentage"
    );
    // 毛利 2.00, 毛利率 ceil(100 × 2/3) = 67
    assert_eq!(lines[1], "Ale,Drinks,12,3.00,1.00,2.00,67");
}

#[test]
fn test_unmatched_summary_row_kept_with_zero_margin() {
    let dir = TempDir::new().unwrap();
    let summary = write_summary_csv(&dir, &["2024-03-01,Mystery,Courier,1,5.00"]);
    let stock = write_stock_csv(&dir, &[r#"Ale,Drinks,12,"€3.00","€1.00""#]);
    let output = dir.path().join("mapped_output.csv");

    let written = ProcessApi::default()
        .augment_with_stock(&summary, &stock, &output)
        .unwrap();
    assert_eq!(written, 1);

    // 左连接: 无匹配也保留该行,毛利字段为 0 而非缺失
    let lines = read_output_lines(&output);
    assert_eq!(lines[1], "Mystery,,,,,0.00,0");
}

#[test]
fn test_price_with_thousands_separator_cleaned() {
    let dir = TempDir::new().unwrap();
    let summary = write_summary_csv(&dir, &["2024-03-01,Cask,Courier,1,1500.00"]);
    let stock = write_stock_csv(&dir, &[r#"Cask,Drinks,2,"€1,234.50","€1,000.00""#]);
    let output = dir.path().join("mapped_output.csv");

    ProcessApi::default()
        .augment_with_stock(&summary, &stock, &output)
        .unwrap();

    let lines = read_output_lines(&output);
    // 1234.50 - 1000.00 = 234.50, ceil(100 × 234.5/1234.5) = 19
    assert_eq!(lines[1], "Cask,Drinks,2,1234.50,1000.00,234.50,19");
}

#[test]
fn test_unparseable_price_treated_as_missing() {
    let dir = TempDir::new().unwrap();
    let summary = write_summary_csv(&dir, &["2024-03-01,Ale,Courier,1,4.50"]);
    let stock = write_stock_csv(&dir, &["Ale,Drinks,12,call us,1.00"]);
    let output = dir.path().join("mapped_output.csv");

    ProcessApi::default()
        .augment_with_stock(&summary, &stock, &output)
        .unwrap();

    let lines = read_output_lines(&output);
    // 清洗后仍无法解析的价格视为缺失 → 毛利为 0
    assert_eq!(lines[1], "Ale,Drinks,12,,1.00,0.00,0");
}

#[test]
fn test_missing_stock_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let summary = write_summary_csv(&dir, &["2024-03-01,Ale,Courier,1,4.50"]);

    let result = ProcessApi::default().augment_with_stock(
        &summary,
        &dir.path().join("no_stock.csv"),
        &dir.path().join("mapped_output.csv"),
    );
    assert!(matches!(result, Err(ApiError::NotFound(_))));
}
