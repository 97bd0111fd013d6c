// ==========================================
// POS销售汇总引擎 - 会话工作区
// ==========================================
// 职责: 以请求/会话为作用域隔离工作文件
// 红线: 不存在进程级 "当前文件" 全局状态;
//       并发会话绝不共享输出路径
// ==========================================

use crate::api::{ChartApi, ProcessApi};
use crate::config::ImportConfig;
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

// ===== 工作区规范文件名 =====
const INPUT_FILE: &str = "input_sales_data.csv";
const SUMMARY_FILE: &str = "output_summary.csv";
const FILTERED_SUMMARY_FILE: &str = "filtered_sales_data.csv";
const STOCK_FILE: &str = "additional_data.csv";
const MAPPED_FILE: &str = "mapped_output.csv";
const FILTERED_MAPPED_FILE: &str = "filtered_mapped_output.csv";

// ==========================================
// SessionWorkspace - 会话工作区
// ==========================================

/// 会话工作区
///
/// 每个会话一个独立的工作目录（uuid 命名），
/// 暴露规范文件名;引擎本身无状态,
/// 共享可变状态止步于此边界
#[derive(Debug, Clone)]
pub struct SessionWorkspace {
    session_id: String,
    work_dir: PathBuf,
}

impl SessionWorkspace {
    /// 在指定根目录下创建新会话工作区
    pub fn create_in(root: &Path) -> std::io::Result<Self> {
        let session_id = Uuid::new_v4().to_string();
        let work_dir = root.join(&session_id);
        std::fs::create_dir_all(&work_dir)?;
        info!("会话工作区已创建: {}", work_dir.display());
        Ok(Self {
            session_id,
            work_dir,
        })
    }

    /// 在默认数据目录下创建新会话工作区
    pub fn create() -> std::io::Result<Self> {
        Self::create_in(&default_sessions_root())
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    // ===== 规范文件路径 =====

    pub fn input_path(&self) -> PathBuf {
        self.work_dir.join(INPUT_FILE)
    }

    pub fn summary_path(&self) -> PathBuf {
        self.work_dir.join(SUMMARY_FILE)
    }

    pub fn filtered_summary_path(&self) -> PathBuf {
        self.work_dir.join(FILTERED_SUMMARY_FILE)
    }

    pub fn stock_path(&self) -> PathBuf {
        self.work_dir.join(STOCK_FILE)
    }

    pub fn mapped_path(&self) -> PathBuf {
        self.work_dir.join(MAPPED_FILE)
    }

    pub fn filtered_mapped_path(&self) -> PathBuf {
        self.work_dir.join(FILTERED_MAPPED_FILE)
    }

    /// 删除工作目录及其全部工作文件
    pub fn cleanup(self) -> std::io::Result<()> {
        std::fs::remove_dir_all(&self.work_dir)
    }
}

/// 默认会话根目录: <数据目录>/pos-sales-engine/sessions
pub fn default_sessions_root() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("pos-sales-engine")
        .join("sessions")
}

// ==========================================
// AppState - 应用状态
// ==========================================

/// 应用状态
///
/// 包含API实例与导入配置;引擎API无内部可变状态,
/// 可被任意多个会话并发使用
pub struct AppState {
    /// 导入配置
    pub config: ImportConfig,

    /// 批处理API
    pub process_api: ProcessApi,

    /// 图表查询API
    pub chart_api: ChartApi,
}

impl AppState {
    /// 创建新的AppState实例
    pub fn new(config: ImportConfig) -> Self {
        Self {
            process_api: ProcessApi::new(config.clone()),
            chart_api: ChartApi::new(config.clone()),
            config,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ImportConfig::default())
    }
}
