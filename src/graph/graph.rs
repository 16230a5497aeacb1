//! 图数据结构
//!
//! 内存中的有向容量图，作为残量网络的输入

use super::edge::{Capacity, Edge};
use super::vertex::VertexId;
use crate::error::{Error, Result};
use indexmap::IndexSet;

/// 最大流求解所需的基础图接口
///
/// 构造残量网络时只读取一次：先全部顶点，再全部边，均按插入顺序
pub trait FlowGraph {
    /// 有序的顶点序列
    fn vertices(&self) -> Vec<VertexId>;

    /// 有序的 (源, 目标, 容量) 边序列
    fn edges(&self) -> Vec<Edge>;
}

/// 容量图
#[derive(Debug, Clone, Default)]
pub struct CapacityGraph {
    /// 顶点集合（保持插入顺序）
    vertices: IndexSet<VertexId>,
    /// 边列表
    edges: Vec<Edge>,
}

impl CapacityGraph {
    /// 创建空图
    pub fn new() -> Self {
        Self::default()
    }

    /// 由边列表构建图，缺失的端点自动添加
    pub fn with_edges<I>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u64, u64, Capacity)>,
    {
        let mut graph = Self::new();
        for edge in edges {
            let edge = Edge::from(edge);
            graph.add_vertex(edge.source);
            graph.add_vertex(edge.target);
            graph.add_edge(edge.source, edge.target, edge.capacity)?;
        }
        Ok(graph)
    }

    // ==================== 顶点操作 ====================

    /// 添加顶点，已存在时返回 false
    pub fn add_vertex(&mut self, id: VertexId) -> bool {
        self.vertices.insert(id)
    }

    /// 顶点是否存在
    pub fn has_vertex(&self, id: VertexId) -> bool {
        self.vertices.contains(&id)
    }

    /// 获取顶点数量
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    // ==================== 边操作 ====================

    /// 添加边
    pub fn add_edge(
        &mut self,
        source: VertexId,
        target: VertexId,
        capacity: Capacity,
    ) -> Result<()> {
        if !self.has_vertex(source) {
            return Err(Error::VertexNotFound(source));
        }
        if !self.has_vertex(target) {
            return Err(Error::VertexNotFound(target));
        }
        if capacity < 0 {
            return Err(Error::NegativeCapacity {
                from: source,
                to: target,
                capacity,
            });
        }

        self.edges.push(Edge::new(source, target, capacity));
        Ok(())
    }

    /// 获取边数量
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

impl FlowGraph for CapacityGraph {
    fn vertices(&self) -> Vec<VertexId> {
        self.vertices.iter().copied().collect()
    }

    fn edges(&self) -> Vec<Edge> {
        self.edges.clone()
    }
}
