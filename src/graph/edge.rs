//! 边定义
//!
//! 基础图中的有向容量边

use crate::graph::vertex::VertexId;
use serde::{Deserialize, Serialize};

/// 容量与流量的数值类型
///
/// 反向边上的流量为负数，所以使用有符号整数
pub type Capacity = i64;

/// 有向容量边
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// 源顶点
    pub source: VertexId,
    /// 目标顶点
    pub target: VertexId,
    /// 容量
    pub capacity: Capacity,
}

impl Edge {
    /// 创建新边
    pub fn new(source: VertexId, target: VertexId, capacity: Capacity) -> Self {
        Self {
            source,
            target,
            capacity,
        }
    }

    /// 是否为自环
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

impl From<(u64, u64, Capacity)> for Edge {
    fn from((source, target, capacity): (u64, u64, Capacity)) -> Self {
        Self::new(VertexId(source), VertexId(target), capacity)
    }
}
