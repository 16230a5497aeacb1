//! 残量网络
//!
//! 每条插入的边都会生成一条容量为 0 的反向边，两者在边表中相邻存放，
//! 通过 [`EdgeIndex`] 互相引用。求解器只修改流量，不修改拓扑。

use super::edge::{EdgeIndex, FlowEdge};
use crate::error::{Error, Result};
use crate::graph::{Capacity, FlowGraph, VertexId};
use indexmap::IndexMap;
use tracing::debug;

/// 残量网络
///
/// 所有正向边的容量之和必须能用 [`Capacity`] 表示，任何流量值、净流出和割容量
/// 都不超过这个总和，所以求解过程中的累加不会溢出。
#[derive(Debug, Clone, Default)]
pub struct ResidualNetwork {
    /// 顶点 -> 出边下标列表（保持插入顺序）
    adjacency: IndexMap<VertexId, Vec<EdgeIndex>>,
    /// 边表，正反向边成对存放
    edges: Vec<FlowEdge>,
    /// 正向边容量之和
    total_capacity: Capacity,
}

impl ResidualNetwork {
    /// 创建空网络
    pub fn new() -> Self {
        Self::default()
    }

    /// 由基础图构建残量网络
    pub fn from_graph<G: FlowGraph + ?Sized>(graph: &G) -> Result<Self> {
        let vertices = graph.vertices();
        let edges = graph.edges();
        let self_loops = edges.iter().filter(|e| e.is_self_loop()).count();

        let mut network = Self {
            adjacency: IndexMap::with_capacity(vertices.len()),
            edges: Vec::with_capacity(edges.len() * 2),
            total_capacity: 0,
        };

        for v in vertices {
            network.add_vertex(v);
        }
        for e in edges {
            network.add_edge(e.source, e.target, e.capacity)?;
        }

        debug!(
            vertices = network.vertex_count(),
            edges = network.edge_count(),
            self_loops,
            "残量网络构建完成"
        );
        Ok(network)
    }

    // ==================== 拓扑 ====================

    /// 添加顶点，已存在时返回 false
    pub fn add_vertex(&mut self, v: VertexId) -> bool {
        if self.adjacency.contains_key(&v) {
            return false;
        }
        self.adjacency.insert(v, Vec::new());
        true
    }

    /// 添加正向边及其反向边
    ///
    /// 端点不存在时不做任何修改并返回 `Ok(None)`；容量为负或总容量溢出时返回错误。
    pub fn add_edge(
        &mut self,
        from: VertexId,
        to: VertexId,
        capacity: Capacity,
    ) -> Result<Option<EdgeIndex>> {
        if capacity < 0 {
            return Err(Error::NegativeCapacity { from, to, capacity });
        }
        if !self.contains_vertex(from) || !self.contains_vertex(to) {
            debug!(%from, %to, "端点不存在，忽略边");
            return Ok(None);
        }
        self.total_capacity = self
            .total_capacity
            .checked_add(capacity)
            .ok_or(Error::CapacityOverflow { from, to })?;

        let forward = EdgeIndex::new(self.edges.len());
        let backward = forward.pair();

        self.edges.push(FlowEdge::new(from, to, capacity, backward));
        self.edges.push(FlowEdge::new(to, from, 0, forward));

        if let Some(list) = self.adjacency.get_mut(&from) {
            list.push(forward);
        }
        if let Some(list) = self.adjacency.get_mut(&to) {
            list.push(backward);
        }

        Ok(Some(forward))
    }

    /// 顶点是否存在
    pub fn contains_vertex(&self, v: VertexId) -> bool {
        self.adjacency.contains_key(&v)
    }

    /// 所有顶点（插入顺序）
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.adjacency.keys().copied()
    }

    /// 获取顶点数量
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// 正向边容量之和，即任何流量值的上界
    pub fn total_capacity(&self) -> Capacity {
        self.total_capacity
    }

    /// 获取正向边数量
    pub fn edge_count(&self) -> usize {
        self.edges.len() / 2
    }

    /// 按下标获取边
    ///
    /// 下标必须来自本网络
    pub fn edge(&self, idx: EdgeIndex) -> &FlowEdge {
        &self.edges[idx.index()]
    }

    /// 遍历所有边（含反向边）
    pub fn edges(&self) -> impl Iterator<Item = (EdgeIndex, &FlowEdge)> {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, e)| (EdgeIndex::new(i), e))
    }

    /// 遍历所有正向边
    pub fn forward_edges(&self) -> impl Iterator<Item = (EdgeIndex, &FlowEdge)> {
        self.edges().filter(|(idx, _)| idx.is_forward())
    }

    // ==================== 邻接访问 ====================

    /// 只读的出边视图，未知顶点返回空视图
    pub fn adjacent(&self, v: VertexId) -> Adjacent<'_> {
        let list = self
            .adjacency
            .get(&v)
            .map(|list| list.as_slice())
            .unwrap_or(&[]);
        Adjacent {
            edges: &self.edges,
            list,
        }
    }

    /// 可修改流量的出边视图
    ///
    /// 顶点没有出边表时惰性创建一个空表
    pub fn adjacent_mut(&mut self, v: VertexId) -> AdjacentMut<'_> {
        let list = self.adjacency.entry(v).or_default();
        AdjacentMut {
            edges: &mut self.edges,
            list: list.as_slice(),
        }
    }

    // ==================== 流量 ====================

    /// 沿边推送流量，同时从配对边上减去
    pub fn push_flow(&mut self, idx: EdgeIndex, amount: Capacity) {
        apply_flow(&mut self.edges, idx, amount);
    }

    /// 将所有流量清零
    pub fn reset_flow(&mut self) {
        for edge in &mut self.edges {
            edge.flow = 0;
        }
    }

    /// 顶点的净流出量
    ///
    /// 出边表同时包含指向入边的反向边，其流量为负，所以直接求和即为净流出
    pub fn outflow(&self, v: VertexId) -> Capacity {
        self.adjacent(v).iter().map(|(_, e)| e.flow).sum()
    }

    /// 检查容量约束、反对称性和流量守恒
    pub fn check_invariants(&self, source: VertexId, sink: VertexId) -> Result<()> {
        for (idx, edge) in self.edges() {
            if edge.flow > edge.capacity {
                return Err(Error::InvariantViolation(format!(
                    "{} ({} -> {}) 流量 {} 超过容量 {}",
                    idx, edge.source, edge.target, edge.flow, edge.capacity
                )));
            }
            if idx.is_forward() && edge.flow < 0 {
                return Err(Error::InvariantViolation(format!(
                    "{} ({} -> {}) 流量为负: {}",
                    idx, edge.source, edge.target, edge.flow
                )));
            }
            let pair = self.edge(edge.reverse);
            if pair.flow != -edge.flow {
                return Err(Error::InvariantViolation(format!(
                    "{} 与 {} 流量不对称: {} vs {}",
                    idx, edge.reverse, edge.flow, pair.flow
                )));
            }
        }

        for v in self.vertices() {
            if v == source || v == sink {
                continue;
            }
            let net = self.outflow(v);
            if net != 0 {
                return Err(Error::InvariantViolation(format!(
                    "顶点 {} 流量不守恒，净流出 {}",
                    v, net
                )));
            }
        }

        Ok(())
    }
}

fn apply_flow(edges: &mut [FlowEdge], idx: EdgeIndex, amount: Capacity) {
    let reverse = {
        let edge = &mut edges[idx.index()];
        edge.flow += amount;
        debug_assert!(edge.flow <= edge.capacity, "flow exceeds capacity on {}", idx);
        edge.reverse
    };
    edges[reverse.index()].flow -= amount;
}

/// 只读出边视图
#[derive(Debug, Clone, Copy)]
pub struct Adjacent<'a> {
    edges: &'a [FlowEdge],
    list: &'a [EdgeIndex],
}

impl<'a> Adjacent<'a> {
    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// 第 `pos` 条出边
    pub fn get(&self, pos: usize) -> Option<(EdgeIndex, &'a FlowEdge)> {
        let idx = *self.list.get(pos)?;
        Some((idx, &self.edges[idx.index()]))
    }

    pub fn iter(&self) -> impl Iterator<Item = (EdgeIndex, &'a FlowEdge)> + 'a {
        let edges = self.edges;
        let list = self.list;
        list.iter().map(move |&idx| (idx, &edges[idx.index()]))
    }
}

/// 可修改流量的出边视图
#[derive(Debug)]
pub struct AdjacentMut<'a> {
    edges: &'a mut [FlowEdge],
    list: &'a [EdgeIndex],
}

impl<'a> AdjacentMut<'a> {
    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn get(&self, pos: usize) -> Option<&FlowEdge> {
        self.list.get(pos).map(|idx| &self.edges[idx.index()])
    }

    pub fn index(&self, pos: usize) -> Option<EdgeIndex> {
        self.list.get(pos).copied()
    }

    /// 沿第 `pos` 条出边推送流量，返回该边下标
    pub fn push_flow(&mut self, pos: usize, amount: Capacity) -> Option<EdgeIndex> {
        let idx = self.index(pos)?;
        apply_flow(self.edges, idx, amount);
        Some(idx)
    }
}
