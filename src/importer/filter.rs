// ==========================================
// POS销售汇总引擎 - 行过滤器
// ==========================================
// 职责: 汇总前的行级排除谓词（filtered 变体）
// 规则: 状态全匹配排除 + 行项目子串排除
// ==========================================

use crate::config::ImportConfig;
use crate::domain::RawOrderRecord;

// ==========================================
// RowFilter - 行过滤器
// ==========================================

/// 行过滤器
///
/// 默认谓词:
/// 1. 排除状态等于 cancelled_status 的行（大小写敏感全匹配）
/// 2. 排除行项目文本包含 exclusion_marker 的行（大小写不敏感）
///
/// 行项目文本缺失视为不匹配排除子串（保留该行）
pub struct RowFilter {
    status_column: String,
    line_items_column: String,
    cancelled_status: String,
    exclusion_marker_lower: String,
}

impl RowFilter {
    pub fn from_config(config: &ImportConfig) -> Self {
        Self {
            status_column: config.status_column.clone(),
            line_items_column: config.line_items_column.clone(),
            cancelled_status: config.cancelled_status.clone(),
            exclusion_marker_lower: config.exclusion_marker.to_lowercase(),
        }
    }

    /// 该行是否进入汇总
    pub fn keep(&self, row: &RawOrderRecord) -> bool {
        // 谓词1: 状态排除
        if let Some(status) = row.get(&self.status_column) {
            if status == &self.cancelled_status {
                return false;
            }
        }

        // 谓词2: 行项目子串排除（大小写不敏感）
        if !self.exclusion_marker_lower.is_empty() {
            if let Some(line_items) = row.get(&self.line_items_column) {
                if line_items
                    .to_lowercase()
                    .contains(&self.exclusion_marker_lower)
                {
                    return false;
                }
            }
        }

        true
    }

    /// 应用过滤器,返回保留的行
    pub fn apply(&self, rows: Vec<RawOrderRecord>) -> Vec<RawOrderRecord> {
        rows.into_iter().filter(|row| self.keep(row)).collect()
    }
}
