//! 残量网络中的流边

use crate::graph::{Capacity, VertexId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 边在残量网络边表中的稳定下标
///
/// 正向边位于偶数下标 `2k`，与之配对的反向边位于 `2k + 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeIndex(pub usize);

impl EdgeIndex {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }

    /// 是否为用户插入的正向边
    pub fn is_forward(&self) -> bool {
        self.0 % 2 == 0
    }

    /// 配对边的下标
    pub fn pair(&self) -> EdgeIndex {
        EdgeIndex(self.0 ^ 1)
    }
}

impl fmt::Display for EdgeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// 流边
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    /// 起点
    pub source: VertexId,
    /// 终点
    pub target: VertexId,
    /// 容量（反向边为 0）
    pub capacity: Capacity,
    /// 当前流量
    pub flow: Capacity,
    /// 配对的反向边
    pub reverse: EdgeIndex,
}

impl FlowEdge {
    pub(crate) fn new(
        source: VertexId,
        target: VertexId,
        capacity: Capacity,
        reverse: EdgeIndex,
    ) -> Self {
        Self {
            source,
            target,
            capacity,
            flow: 0,
            reverse,
        }
    }

    /// 残量 = 容量 - 流量
    pub fn residual_capacity(&self) -> Capacity {
        self.capacity - self.flow
    }

    /// 是否还能继续增加流量
    pub fn has_residual(&self) -> bool {
        self.residual_capacity() > 0
    }

    /// 是否已饱和
    pub fn is_saturated(&self) -> bool {
        self.capacity > 0 && self.flow == self.capacity
    }
}
