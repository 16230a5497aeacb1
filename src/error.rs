//! 错误类型定义

use crate::graph::VertexId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("顶点不存在: {0}")]
    VertexNotFound(VertexId),

    #[error("容量不能为负: {from} -> {to}, capacity = {capacity}")]
    NegativeCapacity {
        from: VertexId,
        to: VertexId,
        capacity: i64,
    },

    #[error("总容量超出可表示范围: 加入 {from} -> {to} 后溢出")]
    CapacityOverflow { from: VertexId, to: VertexId },

    #[error("流不变量被破坏: {0}")]
    InvariantViolation(String),

    #[error("解析错误: {0}")]
    ParseError(String),

    #[error("导入错误: {0}")]
    ImportError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV 错误: {0}")]
    CsvError(#[from] csv::Error),

    #[error("序列化错误: {0}")]
    SerializationError(#[from] serde_json::Error),
}
