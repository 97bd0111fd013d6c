// ==========================================
// POS销售汇总引擎 - 图表查询API测试
// ==========================================
// 覆盖: 时间分桶聚合查询、占比查询、请求级校验
// ==========================================

use pos_sales_engine::{ApiError, ChartApi, SeriesData};
use std::path::PathBuf;
use tempfile::TempDir;

// ==========================================
// 辅助函数: 写入扁平汇总测试文件
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

#[test]
fn test_month_aggregation_single_series() {
    let dir = TempDir::new().unwrap();
    let summary = write_summary_csv(
        &dir,
        &[
            "2024-03-01,Widget,Courier,2,10.00",
            "2024-03-20,Gadget,Courier,1,5.00",
            "2024-04-02,Widget,In-Store,3,15.00",
        ],
    );

    let result = ChartApi::default()
        .aggregate(&summary, "Total Amount", "month", false)
        .unwrap();

    // 同月两条记录并入一个以月首日为标签的桶
    match result {
        SeriesData::Single { x, y } => {
            assert_eq!(x, vec!["2024-03-01", "2024-04-01"]);
            assert_eq!(y, vec![15.0, 15.0]);
        }
        other => panic!("期望单序列, 实际: {:?}", other),
    }
}

#[test]
fn test_week_aggregation_labels_are_mondays() {
    let dir = TempDir::new().unwrap();
    // 2024-03-06 是周三, 2024-03-08 是周五 → 同一 ISO 周（周一 03-04）
    let summary = write_summary_csv(
        &dir,
        &[
            "2024-03-06,Widget,Courier,2,10.00",
            "2024-03-08,Widget,Courier,1,5.00",
        ],
    );

    let result = ChartApi::default()
        .aggregate(&summary, "Total Quantity", "week", false)
        .unwrap();

    match result {
        SeriesData::Single { x, y } => {
            assert_eq!(x, vec!["2024-03-04"]);
            assert_eq!(y, vec![3.0]);
        }
        other => panic!("期望单序列, 实际: {:?}", other),
    }
}

#[test]
fn test_per_product_series_aligned_and_zero_filled() {
    let dir = TempDir::new().unwrap();
    let summary = write_summary_csv(
        &dir,
        &[
            "2024-03-01,Widget,Courier,2,10.00",
            "2024-04-02,Gadget,Courier,1,5.00",
        ],
    );

    let result = ChartApi::default()
        .aggregate(&summary, "Total Quantity", "month", true)
        .unwrap();

    match result {
        SeriesData::PerProduct { x, data } => {
            assert_eq!(x, vec!["2024-03-01", "2024-04-01"]);
            assert_eq!(data.get("Widget"), Some(&vec![2.0, 0.0]));
            assert_eq!(data.get("Gadget"), Some(&vec![0.0, 1.0]));
        }
        other => panic!("期望按商品分解, 实际: {:?}", other),
    }
}

#[test]
fn test_invalid_granularity_rejected() {
    let dir = TempDir::new().unwrap();
    let summary = write_summary_csv(&dir, &["2024-03-01,Widget,Courier,2,10.00"]);

    let result = ChartApi::default().aggregate(&summary, "Total Amount", "quarter", false);
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
}

#[test]
fn test_invalid_value_column_rejected() {
    let dir = TempDir::new().unwrap();
    let summary = write_summary_csv(&dir, &["2024-03-01,Widget,Courier,2,10.00"]);

    let result = ChartApi::default().aggregate(&summary, "Profit", "month", false);
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
}

#[test]
fn test_missing_summary_file_rejected() {
    let dir = TempDir::new().unwrap();
    let result = ChartApi::default().aggregate(
        &dir.path().join("no_summary.csv"),
        "Total Amount",
        "month",
        false,
    );
    assert!(matches!(result, Err(ApiError::NotFound(_))));
}

#[test]
fn test_shipping_breakdown_sorted_by_count() {
    let dir = TempDir::new().unwrap();
    let summary = write_summary_csv(
        &dir,
        &[
            "2024-03-01,Widget,Courier,2,10.00",
            "2024-03-02,Gadget,Courier,1,5.00",
            "2024-03-03,Widget,In-Store,1,5.00",
        ],
    );

    let breakdown = ChartApi::default().shipping_breakdown(&summary).unwrap();
    assert_eq!(breakdown.labels, vec!["Courier", "In-Store"]);
    assert_eq!(breakdown.values, vec![2, 1]);
}
