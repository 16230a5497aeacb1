//! 数据导入模块
//!
//! 从 CSV、JSON Lines 边列表批量导入容量图

use crate::error::{Error, Result};
use crate::graph::{Capacity, CapacityGraph, VertexId};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// 导入统计
#[derive(Debug, Default, Clone, Serialize)]
pub struct ImportStats {
    pub vertices_imported: usize,
    pub edges_imported: usize,
    pub errors: usize,
    pub duration_ms: u64,
}

/// 输入格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ImportFormat {
    /// 带表头 `source,target,capacity` 的 CSV
    Csv,
    /// 每行一个 JSON 对象
    #[value(alias = "json")]
    Jsonl,
}

/// 一条边记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: u64,
    pub target: u64,
    pub capacity: Capacity,
}

/// 边列表导入器
pub struct EdgeListImporter<'a> {
    graph: &'a mut CapacityGraph,
    create_missing: bool,
}

impl<'a> EdgeListImporter<'a> {
    /// 创建导入器，默认自动创建缺失的端点
    pub fn new(graph: &'a mut CapacityGraph) -> Self {
        Self {
            graph,
            create_missing: true,
        }
    }

    /// 设置是否自动创建缺失的端点；关闭时引用未知顶点的行记为错误
    pub fn with_create_missing(mut self, create_missing: bool) -> Self {
        self.create_missing = create_missing;
        self
    }

    /// 按格式导入文件
    pub fn import<P: AsRef<Path>>(&mut self, path: P, format: ImportFormat) -> Result<ImportStats> {
        match format {
            ImportFormat::Csv => self.import_csv(path),
            ImportFormat::Jsonl => self.import_jsonl(path),
        }
    }

    /// 从 CSV 文件导入
    pub fn import_csv<P: AsRef<Path>>(&mut self, path: P) -> Result<ImportStats> {
        let file = File::open(path)?;
        self.import_csv_reader(file)
    }

    /// 从任意 CSV 输入导入
    pub fn import_csv_reader<R: Read>(&mut self, reader: R) -> Result<ImportStats> {
        let start = Instant::now();
        let mut stats = ImportStats::default();

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        for field in ["source", "target", "capacity"] {
            if !headers.iter().any(|h| h == field) {
                return Err(Error::ImportError(format!("CSV 表头缺少列: {}", field)));
            }
        }

        for (row, record) in reader.deserialize::<EdgeRecord>().enumerate() {
            let result = record
                .map_err(|e| Error::ImportError(format!("CSV 解析错误: {}", e)))
                .and_then(|record| self.apply(record, &mut stats));
            if let Err(e) = result {
                // 表头占第 1 行
                warn!(line = row + 2, error = %e, "跳过无效记录");
                stats.errors += 1;
            }
        }

        self.finish(stats, start)
    }

    /// 从 JSON Lines 文件导入
    pub fn import_jsonl<P: AsRef<Path>>(&mut self, path: P) -> Result<ImportStats> {
        let file = File::open(path)?;
        self.import_jsonl_reader(BufReader::new(file))
    }

    /// 从任意 JSON Lines 输入导入，空行忽略
    pub fn import_jsonl_reader<R: BufRead>(&mut self, reader: R) -> Result<ImportStats> {
        let start = Instant::now();
        let mut stats = ImportStats::default();

        for (row, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let result = serde_json::from_str::<EdgeRecord>(&line)
                .map_err(|e| Error::ImportError(format!("JSON 解析错误: {}", e)))
                .and_then(|record| self.apply(record, &mut stats));
            if let Err(e) = result {
                warn!(line = row + 1, error = %e, "跳过无效记录");
                stats.errors += 1;
            }
        }

        self.finish(stats, start)
    }

    /// 把一条记录写入图
    fn apply(&mut self, record: EdgeRecord, stats: &mut ImportStats) -> Result<()> {
        let source = VertexId::new(record.source);
        let target = VertexId::new(record.target);

        // 先校验容量，避免为无效记录创建顶点
        if record.capacity < 0 {
            return Err(Error::NegativeCapacity {
                from: source,
                to: target,
                capacity: record.capacity,
            });
        }

        if self.create_missing {
            for v in [source, target] {
                if self.graph.add_vertex(v) {
                    stats.vertices_imported += 1;
                }
            }
        }

        self.graph.add_edge(source, target, record.capacity)?;
        stats.edges_imported += 1;
        Ok(())
    }

    fn finish(&self, mut stats: ImportStats, start: Instant) -> Result<ImportStats> {
        stats.duration_ms = start.elapsed().as_millis() as u64;
        if stats.errors > 0 {
            debug!(errors = stats.errors, "部分记录被跳过");
        }
        info!(
            vertices = stats.vertices_imported,
            edges = stats.edges_imported,
            errors = stats.errors,
            duration_ms = stats.duration_ms,
            "导入完成"
        );
        Ok(stats)
    }
}

/// 从文件加载一张新图
pub fn load_graph<P: AsRef<Path>>(
    path: P,
    format: ImportFormat,
) -> Result<(CapacityGraph, ImportStats)> {
    let mut graph = CapacityGraph::new();
    let stats = EdgeListImporter::new(&mut graph).import(path, format)?;
    Ok((graph, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::FlowGraph;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_import_csv() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "source,target,capacity").unwrap();
        writeln!(file, "1,2,10").unwrap();
        writeln!(file, "2, 3, 4").unwrap();
        writeln!(file, "1,3,5").unwrap();

        let (graph, stats) = load_graph(file.path(), ImportFormat::Csv).unwrap();
        assert_eq!(stats.vertices_imported, 3);
        assert_eq!(stats.edges_imported, 3);
        assert_eq!(stats.errors, 0);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.edges()[1].capacity, 4);
    }

    #[test]
    fn test_import_csv_column_order() {
        let data = "capacity,target,source\n7,2,1\n";
        let mut graph = CapacityGraph::new();
        let stats = EdgeListImporter::new(&mut graph)
            .import_csv_reader(data.as_bytes())
            .unwrap();

        assert_eq!(stats.edges_imported, 1);
        let edge = &graph.edges()[0];
        assert_eq!(edge.source, VertexId::new(1));
        assert_eq!(edge.target, VertexId::new(2));
        assert_eq!(edge.capacity, 7);
    }

    #[test]
    fn test_import_csv_skips_bad_rows() {
        let data = "source,target,capacity\n1,2,3\n1,x,3\n2,3,-1\n3,4\n";
        let mut graph = CapacityGraph::new();
        let stats = EdgeListImporter::new(&mut graph)
            .import_csv_reader(data.as_bytes())
            .unwrap();

        assert_eq!(stats.edges_imported, 1);
        assert_eq!(stats.errors, 3);
        assert_eq!(graph.vertex_count(), 2);
    }

    #[test]
    fn test_import_csv_missing_header() {
        let data = "from,to,capacity\n1,2,3\n";
        let mut graph = CapacityGraph::new();
        let result = EdgeListImporter::new(&mut graph).import_csv_reader(data.as_bytes());

        assert!(matches!(result, Err(Error::ImportError(_))));
    }

    #[test]
    fn test_import_jsonl() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"source":1,"target":2,"capacity":10}}"#).unwrap();
        writeln!(file).unwrap();
        writeln!(file, r#"{{"source":2,"target":3,"capacity":8}}"#).unwrap();
        writeln!(file, "not json").unwrap();

        let (graph, stats) = load_graph(file.path(), ImportFormat::Jsonl).unwrap();
        assert_eq!(stats.vertices_imported, 3);
        assert_eq!(stats.edges_imported, 2);
        assert_eq!(stats.errors, 1);
        assert_eq!(graph.vertex_count(), 3);
    }

    #[test]
    fn test_without_create_missing() {
        let mut graph = CapacityGraph::new();
        graph.add_vertex(VertexId::new(1));
        graph.add_vertex(VertexId::new(2));

        let data = "source,target,capacity\n1,2,3\n2,9,3\n";
        let stats = EdgeListImporter::new(&mut graph)
            .with_create_missing(false)
            .import_csv_reader(data.as_bytes())
            .unwrap();

        assert_eq!(stats.vertices_imported, 0);
        assert_eq!(stats.edges_imported, 1);
        assert_eq!(stats.errors, 1);
    }

    #[test]
    fn test_missing_file() {
        let result = load_graph("/nonexistent/edges.csv", ImportFormat::Csv);
        assert!(matches!(result, Err(Error::IoError(_))));
    }
}
