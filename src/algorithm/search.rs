//! 增广路径搜索
//!
//! Ford-Fulkerson 与 Edmonds-Karp 共享 "搜索 -> 增广" 的主循环，
//! 只在搜索策略上不同。策略通过 [`PathSearch`] 注入。

use super::traversal::{Control, Visitor};
use super::{FlowStats, MaxFlowSolver};
use crate::flow::{EdgeIndex, FlowEdge, ResidualNetwork};
use crate::graph::{Capacity, VertexId};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info, warn};

/// 一条增广路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AugmentingPath {
    /// 从源点到汇点依次经过的边
    pub edges: Vec<EdgeIndex>,
    /// 瓶颈：路径上最小的残量
    pub bottleneck: Capacity,
}

impl AugmentingPath {
    /// 沿前驱边从汇点回溯到源点，重建路径并计算瓶颈
    pub fn from_parents(
        network: &ResidualNetwork,
        parents: &HashMap<VertexId, EdgeIndex>,
        source: VertexId,
        sink: VertexId,
    ) -> Option<Self> {
        let mut edges = Vec::new();
        let mut bottleneck = Capacity::MAX;
        let mut current = sink;

        while current != source {
            let idx = *parents.get(&current)?;
            let edge = network.edge(idx);
            bottleneck = bottleneck.min(edge.residual_capacity());
            edges.push(idx);
            current = edge.source;
        }

        if edges.is_empty() || bottleneck <= 0 {
            return None;
        }

        edges.reverse();
        Some(Self { edges, bottleneck })
    }

    /// 路径经过的顶点序列
    pub fn vertices(&self, network: &ResidualNetwork) -> Vec<VertexId> {
        let mut vertices = Vec::with_capacity(self.edges.len() + 1);
        if let Some(first) = self.edges.first() {
            vertices.push(network.edge(*first).source);
        }
        vertices.extend(self.edges.iter().map(|idx| network.edge(*idx).target));
        vertices
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// 增广路径搜索策略
pub trait PathSearch {
    /// 策略对应的算法名称
    fn name(&self) -> &'static str;

    /// 在残量网络中寻找一条源点到汇点的增广路径
    fn find_path(
        &mut self,
        network: &ResidualNetwork,
        source: VertexId,
        sink: VertexId,
    ) -> Option<AugmentingPath>;
}

/// 记录前驱边的遍历回调
///
/// 第一次到达某顶点的边即为其前驱；到达汇点后立即停止遍历
pub(crate) struct ParentRecorder {
    pub(crate) parents: HashMap<VertexId, EdgeIndex>,
    sink: VertexId,
}

impl ParentRecorder {
    pub(crate) fn new(sink: VertexId) -> Self {
        Self {
            parents: HashMap::new(),
            sink,
        }
    }
}

impl Visitor for ParentRecorder {
    fn tree_edge(&mut self, idx: EdgeIndex, edge: &FlowEdge) -> Control {
        self.parents.insert(edge.target, idx);
        if edge.target == self.sink {
            Control::Break
        } else {
            Control::Continue
        }
    }
}

/// 基于增广路径的最大流求解器
///
/// 独占借用残量网络，反复执行 "搜索一条路径 -> 沿路径推送瓶颈流量"，
/// 直到找不到增广路径为止
pub struct AugmentingPathSolver<'a, S> {
    network: &'a mut ResidualNetwork,
    search: S,
    stats: FlowStats,
}

impl<'a, S: PathSearch + Default> AugmentingPathSolver<'a, S> {
    /// 创建求解器
    pub fn new(network: &'a mut ResidualNetwork) -> Self {
        Self::with_search(network, S::default())
    }
}

impl<'a, S: PathSearch> AugmentingPathSolver<'a, S> {
    /// 使用指定的搜索策略创建求解器
    pub fn with_search(network: &'a mut ResidualNetwork, search: S) -> Self {
        Self {
            network,
            search,
            stats: FlowStats::default(),
        }
    }

    /// 沿路径增广
    fn augment(&mut self, path: &AugmentingPath) {
        for &idx in &path.edges {
            self.network.push_flow(idx, path.bottleneck);
        }
    }
}

impl<'a, S: PathSearch> MaxFlowSolver for AugmentingPathSolver<'a, S> {
    fn compute_max_flow(&mut self, source: VertexId, sink: VertexId) -> Capacity {
        let start = Instant::now();
        self.stats = FlowStats::default();

        if source == sink {
            warn!(algorithm = self.search.name(), %source, "源点与汇点相同，跳过计算");
            return 0;
        }
        if !self.network.contains_vertex(source) || !self.network.contains_vertex(sink) {
            warn!(algorithm = self.search.name(), %source, %sink, "源点或汇点不在网络中");
        }

        let mut max_flow: Capacity = 0;

        while let Some(path) = self.search.find_path(self.network, source, sink) {
            debug!(
                algorithm = self.search.name(),
                hops = path.len(),
                bottleneck = path.bottleneck,
                "找到增广路径"
            );
            self.augment(&path);
            max_flow += path.bottleneck;
            self.stats.augmentations += 1;
            self.stats.phases += 1;
        }

        self.stats.elapsed_us = start.elapsed().as_micros() as u64;
        info!(
            algorithm = self.search.name(),
            value = max_flow,
            augmentations = self.stats.augmentations,
            elapsed_us = self.stats.elapsed_us,
            "最大流计算完成"
        );
        max_flow
    }

    fn stats(&self) -> &FlowStats {
        &self.stats
    }
}
