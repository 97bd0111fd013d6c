// ==========================================
// POS销售汇总引擎 - 导入配置
// ==========================================
// 职责: 定义订单导出文件的列名、日期格式、
//       过滤规则等可配置项
// 红线: 列名是配置而非协议,引擎不得硬编码列名
// ==========================================

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ==========================================
// ImportConfig - 导入配置
// ==========================================

/// 订单导入配置
///
/// 默认值对应标准 POS 导出格式；
/// 可通过 JSON 配置文件覆盖任意字段。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    // ===== 必需列名 =====
    pub date_column: String,       // 订单创建时间列
    pub status_column: String,     // 订单状态列
    pub shipping_column: String,   // 配送方式列
    pub line_items_column: String, // 行项目文本列

    // ===== 解析规则 =====
    pub date_format: String, // 订单时间格式（chrono 格式串）

    // ===== 标准化规则 =====
    pub default_shipping_method: String, // 配送方式为空时的哨兵值

    // ===== 过滤规则（filtered 变体使用）=====
    pub cancelled_status: String, // 排除的订单状态（大小写敏感全匹配）
    pub exclusion_marker: String, // 行项目排除子串（大小写不敏感包含匹配）
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            date_column: "Date created".to_string(),
            status_column: "Status".to_string(),
            shipping_column: "Shipping Method".to_string(),
            line_items_column: "Line items".to_string(),
            date_format: "%d/%m/%Y %H:%M".to_string(),
            default_shipping_method: "In-Store".to_string(),
            cancelled_status: "Cancelled".to_string(),
            exclusion_marker: "Innkeeper's".to_string(),
        }
    }
}

impl ImportConfig {
    /// 从 JSON 配置文件加载
    ///
    /// 缺省字段回退到默认值（`#[serde(default)]`）
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {}", path.display()))?;
        let config: ImportConfig = serde_json::from_str(&content)
            .with_context(|| format!("解析配置文件失败: {}", path.display()))?;
        Ok(config)
    }

    /// 必需列名列表（用于表头校验）
    pub fn required_columns(&self) -> [&str; 4] {
        [
            self.date_column.as_str(),
            self.status_column.as_str(),
            self.shipping_column.as_str(),
            self.line_items_column.as_str(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = ImportConfig::default();
        assert_eq!(config.date_column, "Date created");
        assert_eq!(config.default_shipping_method, "In-Store");
        assert_eq!(config.cancelled_status, "Cancelled");
        assert_eq!(config.required_columns().len(), 4);
    }

    #[test]
    fn test_load_partial_config() {
        // 配置文件只覆盖部分字段，其余回退默认值
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, r#"{{"exclusion_marker": "Sample Pack"}}"#).unwrap();

        let config = ImportConfig::load_from_file(temp_file.path()).unwrap();
        assert_eq!(config.exclusion_marker, "Sample Pack");
        assert_eq!(config.date_column, "Date created");
    }

    #[test]
    fn test_load_missing_file() {
        let result = ImportConfig::load_from_file("non_existent_config.json");
        assert!(result.is_err());
    }
}
