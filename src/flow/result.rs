//! 最大流结果与最小割

use super::network::ResidualNetwork;
use crate::algorithm::traversal::{breadth_first_search, Visitor};
use crate::graph::{Capacity, VertexId};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// 单条边上的流量
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeFlow {
    pub source: VertexId,
    pub target: VertexId,
    pub flow: Capacity,
    pub capacity: Capacity,
}

impl EdgeFlow {
    /// 流量是否已达容量
    pub fn is_saturated(&self) -> bool {
        self.flow >= self.capacity
    }
}

/// 最大流结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaxFlow {
    /// 最大流量值
    pub value: Capacity,
    /// 流量分配（只含流量为正的正向边）
    pub flows: Vec<EdgeFlow>,
    /// 最小割的源侧顶点集
    pub source_side: IndexSet<VertexId>,
    /// 从源侧指向汇侧的正向边
    pub cut_edges: Vec<EdgeFlow>,
}

impl MaxFlow {
    /// 从已求解的网络中收集结果
    ///
    /// `value` 为求解器返回的流量值。网络上的流必须已是最大流，否则割不是最小割。
    pub fn from_network(network: &ResidualNetwork, source: VertexId, value: Capacity) -> Self {
        let source_side = network.min_cut_source_side(source);

        let mut flows = Vec::new();
        let mut cut_edges = Vec::new();
        for (_, edge) in network.forward_edges() {
            let record = EdgeFlow {
                source: edge.source,
                target: edge.target,
                flow: edge.flow,
                capacity: edge.capacity,
            };
            if source_side.contains(&edge.source) && !source_side.contains(&edge.target) {
                cut_edges.push(record.clone());
            }
            if record.flow > 0 {
                flows.push(record);
            }
        }

        Self {
            value,
            flows,
            source_side,
            cut_edges,
        }
    }

    /// 割边容量之和，等于最大流量值
    pub fn cut_capacity(&self) -> Capacity {
        self.cut_edges.iter().map(|e| e.capacity).sum()
    }

    /// 限制流量的瓶颈边：割上的饱和边
    pub fn bottleneck_edges(&self) -> impl Iterator<Item = &EdgeFlow> {
        self.cut_edges.iter().filter(|e| e.capacity > 0 && e.is_saturated())
    }

    /// 两顶点间所有平行边上的流量之和
    pub fn flow_on(&self, source: VertexId, target: VertexId) -> Capacity {
        self.flows
            .iter()
            .filter(|e| e.source == source && e.target == target)
            .map(|e| e.flow)
            .sum()
    }
}

/// 收集可达顶点
struct ReachableSet {
    vertices: IndexSet<VertexId>,
}

impl Visitor for ReachableSet {
    fn discover_vertex(&mut self, vertex: VertexId) {
        self.vertices.insert(vertex);
    }
}

impl ResidualNetwork {
    /// 残量网络中源点可达的顶点集，即最小割的源侧
    pub fn min_cut_source_side(&self, source: VertexId) -> IndexSet<VertexId> {
        let mut reachable = ReachableSet {
            vertices: IndexSet::new(),
        };
        breadth_first_search(self, source, |e| e.has_residual(), &mut reachable);
        reachable.vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::{solve, MaxFlowAlgorithm};
    use crate::graph::CapacityGraph;

    fn v(id: u64) -> VertexId {
        VertexId::new(id)
    }

    fn solved(
        edges: &[(u64, u64, Capacity)],
        source: u64,
        sink: u64,
    ) -> (ResidualNetwork, MaxFlow) {
        let graph = CapacityGraph::with_edges(edges.iter().copied()).unwrap();
        let mut network = ResidualNetwork::from_graph(&graph).unwrap();
        let (value, _) = solve(&mut network, MaxFlowAlgorithm::Dinic, v(source), v(sink));
        let result = MaxFlow::from_network(&network, v(source), value);
        (network, result)
    }

    #[test]
    fn test_min_cut_equals_value() {
        let (_, result) = solved(&[(1, 2, 7), (1, 3, 4), (2, 4, 5), (3, 4, 8)], 1, 4);

        assert_eq!(result.value, 9);
        assert_eq!(result.cut_capacity(), 9);
        assert!(result.source_side.contains(&v(1)));
        assert!(!result.source_side.contains(&v(4)));
        assert!(result.cut_edges.iter().all(|e| e.is_saturated()));
    }

    #[test]
    fn test_flows_only_positive_forward_edges() {
        let (network, result) = solved(&[(1, 2, 5), (2, 3, 5), (1, 4, 2)], 1, 3);

        assert_eq!(result.value, 5);
        assert_eq!(result.flows.len(), 2);
        assert_eq!(result.flow_on(v(1), v(2)), 5);
        assert_eq!(result.flow_on(v(1), v(4)), 0);
        assert_eq!(network.outflow(v(1)), 5);
    }

    #[test]
    fn test_source_side_before_solving() {
        let graph = CapacityGraph::with_edges([(1, 2, 1), (2, 3, 0), (3, 4, 1)]).unwrap();
        let network = ResidualNetwork::from_graph(&graph).unwrap();

        let side: Vec<VertexId> = network.min_cut_source_side(v(1)).into_iter().collect();
        assert_eq!(side, vec![v(1), v(2)]);
    }

    #[test]
    fn test_bottleneck_edges() {
        // 2 -> 3 是唯一的瓶颈
        let (_, result) = solved(&[(1, 2, 10), (2, 3, 3), (3, 4, 10)], 1, 4);

        let bottlenecks: Vec<(VertexId, VertexId)> = result
            .bottleneck_edges()
            .map(|e| (e.source, e.target))
            .collect();
        assert_eq!(bottlenecks, vec![(v(2), v(3))]);
    }

    #[test]
    fn test_result_serializes() {
        let (_, result) = solved(&[(1, 2, 4)], 1, 2);
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["value"], 4);
        assert_eq!(json["flows"][0]["source"], 1);
        assert_eq!(json["cut_edges"][0]["capacity"], 4);
    }
}
