//! 数据加载错误类型定义

use std::path::PathBuf;
use thiserror::Error;

/// 数据加载相关错误
#[derive(Debug, Error)]
pub enum DataError {
    /// 索引文件无法打开或解析（数据集构造失败）
    #[error("索引文件加载失败 {path:?}: {message}")]
    IndexLoad { path: PathBuf, message: String },

    /// 索引越界
    #[error("索引越界: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// 样本文件缺失或无法解码
    #[error("样本加载失败 {path:?}: {source}")]
    SampleLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// 文件未找到
    #[error("文件未找到: {0}")]
    FileNotFound(PathBuf),

    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 格式错误（如 magic number 不匹配）
    #[error("格式错误: {0}")]
    Format(String),
}

impl DataError {
    /// 构造 [`DataError::IndexLoad`] 的便捷函数
    pub(crate) fn index_load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::IndexLoad {
            path: path.into(),
            message: message.into(),
        }
    }
}
