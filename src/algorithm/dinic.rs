//! Dinic 最大流算法
//!
//! 每个阶段先用 BFS 构建层次图，再用带当前弧指针的 DFS 反复抽取阻塞流，
//! 直到汇点不可达。阶段数为 O(V)。

use super::traversal::{breadth_first_search, Control, Visitor};
use super::{FlowStats, MaxFlowSolver};
use crate::flow::{EdgeIndex, FlowEdge, ResidualNetwork};
use crate::graph::{Capacity, VertexId};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info, warn};

/// 顶点到源点的 BFS 距离
type LevelMap = HashMap<VertexId, usize>;

/// 顶点出边表中下一条待尝试边的位置
type PointerMap = HashMap<VertexId, usize>;

/// 构建层次图的遍历回调
struct LevelRecorder {
    level: LevelMap,
}

impl Visitor for LevelRecorder {
    fn tree_edge(&mut self, _idx: EdgeIndex, edge: &FlowEdge) -> Control {
        let depth = self.level.get(&edge.source).copied().unwrap_or(0);
        self.level.insert(edge.target, depth + 1);
        Control::Continue
    }
}

/// Dinic 求解器
pub struct Dinic<'a> {
    network: &'a mut ResidualNetwork,
    stats: FlowStats,
}

impl<'a> Dinic<'a> {
    /// 创建求解器
    pub fn new(network: &'a mut ResidualNetwork) -> Self {
        Self {
            network,
            stats: FlowStats::default(),
        }
    }

    /// 构建层次图；汇点不可达时返回 None
    fn build_level_graph(&self, source: VertexId, sink: VertexId) -> Option<LevelMap> {
        let mut recorder = LevelRecorder {
            level: LevelMap::new(),
        };
        recorder.level.insert(source, 0);
        breadth_first_search(self.network, source, |e| e.has_residual(), &mut recorder);

        if recorder.level.contains_key(&sink) {
            Some(recorder.level)
        } else {
            None
        }
    }

    /// 在层次图中抽取一条源点到汇点的路径并推送流量，返回推送量，0 表示阻塞
    ///
    /// 与递归写法等价：当前顶点从指针处依次尝试出边，只走层数恰好加一且有残量的边；
    /// 死路时回退到父顶点，父顶点指针前移。成功推送后指针不动，该边可能仍有残量。
    fn extract_path(
        &mut self,
        source: VertexId,
        sink: VertexId,
        level: &LevelMap,
        ptr: &mut PointerMap,
    ) -> Capacity {
        // (顶点, 所走出边在其出边表中的位置)
        let mut path: Vec<(VertexId, usize)> = Vec::new();
        let mut current = source;

        loop {
            if current == sink {
                return self.push_along(&path);
            }

            let depth = level.get(&current).copied().unwrap_or(0);
            let adjacent = self.network.adjacent(current);
            let cursor = ptr.entry(current).or_insert(0);

            let mut next = None;
            while let Some((_, edge)) = adjacent.get(*cursor) {
                if edge.has_residual() && level.get(&edge.target) == Some(&(depth + 1)) {
                    next = Some(edge.target);
                    break;
                }
                *cursor += 1;
            }

            match next {
                Some(target) => {
                    path.push((current, *cursor));
                    current = target;
                }
                None => match path.pop() {
                    Some((parent, _)) => {
                        *ptr.entry(parent).or_insert(0) += 1;
                        current = parent;
                    }
                    None => return 0,
                },
            }
        }
    }

    /// 沿路径推送瓶颈流量
    fn push_along(&mut self, path: &[(VertexId, usize)]) -> Capacity {
        let bottleneck = path
            .iter()
            .filter_map(|&(u, pos)| self.network.adjacent(u).get(pos))
            .map(|(_, edge)| edge.residual_capacity())
            .min()
            .unwrap_or(0);

        if bottleneck > 0 {
            for &(u, pos) in path {
                self.network.adjacent_mut(u).push_flow(pos, bottleneck);
            }
        }
        bottleneck
    }
}

impl<'a> MaxFlowSolver for Dinic<'a> {
    fn compute_max_flow(&mut self, source: VertexId, sink: VertexId) -> Capacity {
        let start = Instant::now();
        self.stats = FlowStats::default();

        if source == sink {
            warn!(algorithm = "dinic", %source, "源点与汇点相同，跳过计算");
            return 0;
        }
        if !self.network.contains_vertex(source) || !self.network.contains_vertex(sink) {
            warn!(algorithm = "dinic", %source, %sink, "源点或汇点不在网络中");
        }

        let mut max_flow: Capacity = 0;

        while let Some(level) = self.build_level_graph(source, sink) {
            self.stats.phases += 1;
            let mut ptr = PointerMap::new();
            let mut phase_flow: Capacity = 0;

            loop {
                let pushed = self.extract_path(source, sink, &level, &mut ptr);
                if pushed == 0 {
                    break;
                }
                phase_flow += pushed;
                self.stats.augmentations += 1;
            }

            debug!(
                phase = self.stats.phases,
                sink_level = level.get(&sink).copied().unwrap_or(0),
                flow = phase_flow,
                "阻塞流阶段完成"
            );
            max_flow += phase_flow;
        }

        self.stats.elapsed_us = start.elapsed().as_micros() as u64;
        info!(
            algorithm = "dinic",
            value = max_flow,
            phases = self.stats.phases,
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
