// ==========================================
// POS销售汇总引擎 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型,转换导入层错误为
//       用户友好的错误消息
// 分级: 请求级校验错误 / 请求致命错误 / 内部错误
// ==========================================

use crate::importer::error::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 请求级校验错误（拒绝请求,不做部分计算）
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    // ==========================================
    // 请求致命错误
    // ==========================================
    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("文件导入失败: {0}")]
    ImportFailure(String),

    #[error("文件写出失败: {0}")]
    ExportFailure(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 ImportError 转换
// 目的: 将导入层的技术错误转换为边界友好的业务错误
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::FileNotFound(path) => ApiError::NotFound(format!("输入文件不存在: {path}")),
            ImportError::MissingRequiredColumns(cols) => {
                ApiError::InvalidInput(format!("输入文件缺少必需列: {cols:?}"))
            }
            ImportError::FileWriteError { path, message } => {
                ApiError::ExportFailure(format!("{path}: {message}"))
            }
            other => ApiError::ImportFailure(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_maps_to_not_found() {
        let err: ApiError = ImportError::FileNotFound("orders.csv".to_string()).into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_missing_columns_maps_to_invalid_input() {
        let err: ApiError =
            ImportError::MissingRequiredColumns(vec!["Status".to_string()]).into();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }
}
