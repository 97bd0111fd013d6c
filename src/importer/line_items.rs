// ==========================================
// POS销售汇总引擎 - 行项目解析器
// ==========================================
// 职责: 将订单行的自由文本行项目字段解析为
//       零或多个 (商品名, 数量, 金额) 三元组
// 状态机: SeekName → SeekQuantity → SeekTotal → Emit
// ==========================================
// 已知限制: 商品名中含字面子串 "Quantity:" 或
// "Total:" 时会被错误切分。输入格式没有转义约定,
// 解析器按尽力而为切分,跳过畸形片段而非中止整行。
// ==========================================

use crate::domain::LineItem;
use tracing::warn;

// ===== 标记词 =====
const NAME_MARKER: &str = "Name:";
const QUANTITY_MARKER: &str = "Quantity:";
const TOTAL_MARKER: &str = "Total:";
/// 片段分隔符: 后续每个行项目以 ", Name:" 开头
const ITEM_SEPARATOR: &str = ", Name:";

// ==========================================
// ParseState - 片段解析状态
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    SeekName,
    SeekQuantity,
    SeekTotal,
}

// ==========================================
// LineItemParser - 行项目解析器
// ==========================================
pub struct LineItemParser;

impl LineItemParser {
    /// 解析一条订单行的行项目文本
    ///
    /// - 空文本 → 空列表
    /// - 缺少 Quantity:/Total: 标记的片段 → 丢弃（非错误）
    /// - 数量/金额无法解析的片段 → 跳过并记录日志,
    ///   绝不中止同行其余片段的处理
    pub fn parse(&self, text: &str) -> Vec<LineItem> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let mut items = Vec::new();
        for fragment in text.split(ITEM_SEPARATOR) {
            // 首片段的 Name: 前缀在行首是隐式的,统一补齐
            let normalized = if fragment.starts_with(NAME_MARKER) {
                fragment.to_string()
            } else {
                format!("{}{}", NAME_MARKER, fragment)
            };

            if let Some(item) = self.parse_fragment(&normalized) {
                items.push(item);
            }
        }
        items
    }

    /// 解析单个片段
    ///
    /// 状态机依次消费 Name: / Quantity: / Total: 标记,
    /// 任一标记缺失或数值解析失败则返回 None
    fn parse_fragment(&self, fragment: &str) -> Option<LineItem> {
        let mut state = ParseState::SeekName;
        let mut rest = fragment;
        let mut name = "";
        let mut quantity_text = "";
        let total_text;

        loop {
            match state {
                ParseState::SeekName => {
                    let pos = rest.find(NAME_MARKER)?;
                    rest = &rest[pos + NAME_MARKER.len()..];
                    state = ParseState::SeekQuantity;
                }
                ParseState::SeekQuantity => {
                    // 标记缺失 → 丢弃片段,不报错
                    let pos = rest.find(QUANTITY_MARKER)?;
                    name = trim_field(&rest[..pos]);
                    rest = &rest[pos + QUANTITY_MARKER.len()..];
                    state = ParseState::SeekTotal;
                }
                ParseState::SeekTotal => {
                    let pos = rest.find(TOTAL_MARKER)?;
                    quantity_text = trim_field(&rest[..pos]);
                    total_text = rest[pos + TOTAL_MARKER.len()..].trim();
                    break;
                }
            }
        }

        // Emit: 数值解析失败时跳过该片段并记录,不影响其余片段
        let quantity: i64 = match quantity_text.parse() {
            Ok(q) => q,
            Err(e) => {
                warn!("跳过行项目片段（数量无法解析）: {fragment}, 错误: {e}");
                return None;
            }
        };
        let total: f64 = match total_text.parse() {
            Ok(t) => t,
            Err(e) => {
                warn!("跳过行项目片段（金额无法解析）: {fragment}, 错误: {e}");
                return None;
            }
        };

        Some(LineItem::new(name, quantity, total))
    }
}

/// 去除字段首尾空白与标记间残留的分隔逗号
fn trim_field(raw: &str) -> &str {
    raw.trim().trim_end_matches(',').trim()
}
