//! 结果打印器
//!
//! 提供表格和垂直格式的结果输出

use super::RunSummary;
use crate::flow::{EdgeFlow, MaxFlow};
use prettytable::{format, row, Cell, Row, Table};

/// 打印模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrintMode {
    /// 表格模式
    #[default]
    Table,
    /// 垂直模式
    Vertical,
}

/// 结果打印器
#[derive(Debug, Default)]
pub struct Printer {
    mode: PrintMode,
}

impl Printer {
    pub fn new(mode: PrintMode) -> Self {
        Self { mode }
    }

    /// 每个算法一行的结果摘要
    pub fn print_summary(&self, runs: &[RunSummary]) -> String {
        if runs.is_empty() {
            return "Empty set\n".to_string();
        }

        let columns = ["Algorithm", "Max Flow", "Augmentations", "Phases", "Time (us)"];
        let rows: Vec<Vec<String>> = runs
            .iter()
            .map(|r| {
                vec![
                    r.algorithm.to_string(),
                    r.value.to_string(),
                    r.stats.augmentations.to_string(),
                    r.stats.phases.to_string(),
                    r.stats.elapsed_us.to_string(),
                ]
            })
            .collect();

        self.render(&columns, &rows)
    }

    /// 每条边上的流量
    pub fn print_flows(&self, result: &MaxFlow) -> String {
        if result.flows.is_empty() {
            return "Empty set\n".to_string();
        }
        let rows = edge_rows(&result.flows);
        format!(
            "{}\n{} edge(s) carry flow\n",
            self.render(&["Source", "Target", "Flow", "Capacity"], &rows),
            rows.len()
        )
    }

    /// 最小割
    pub fn print_cut(&self, result: &MaxFlow) -> String {
        let rows = edge_rows(&result.cut_edges);
        let mut output = if rows.is_empty() {
            String::from("Empty cut\n")
        } else {
            self.render(&["Source", "Target", "Flow", "Capacity"], &rows)
        };

        let side: Vec<String> = result.source_side.iter().map(|v| v.to_string()).collect();
        output.push_str(&format!("\nSource side: {{{}}}\n", side.join(", ")));
        output.push_str(&format!("Cut capacity: {}\n", result.cut_capacity()));
        output
    }

    /// 打印统计信息
    pub fn print_stats(&self, vertex_count: usize, edge_count: usize) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Property", "Value"]);
        table.add_row(row!["Vertex Count", vertex_count.to_string()]);
        table.add_row(row!["Edge Count", edge_count.to_string()]);
        table.to_string()
    }

    fn render(&self, columns: &[&str], rows: &[Vec<String>]) -> String {
        match self.mode {
            PrintMode::Table => format_table(columns, rows),
            PrintMode::Vertical => format_vertical(columns, rows),
        }
    }
}

fn edge_rows(edges: &[EdgeFlow]) -> Vec<Vec<String>> {
    edges
        .iter()
        .map(|e| {
            vec![
                e.source.to_string(),
                e.target.to_string(),
                e.flow.to_string(),
                e.capacity.to_string(),
            ]
        })
        .collect()
}

/// 表格格式
fn format_table(columns: &[&str], rows: &[Vec<String>]) -> String {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);

    let header: Vec<Cell> = columns.iter().map(|c| Cell::new(c)).collect();
    table.set_titles(Row::new(header));

    for row_data in rows {
        let cells: Vec<Cell> = row_data.iter().map(|v| Cell::new(v)).collect();
        table.add_row(Row::new(cells));
    }

    table.to_string()
}

/// 垂直格式
fn format_vertical(columns: &[&str], rows: &[Vec<String>]) -> String {
    let max_col_width = columns.iter().map(|c| c.len()).max().unwrap_or(0);
    let mut output = String::new();

    for (i, row_data) in rows.iter().enumerate() {
        output.push_str(&format!(
            "*************************** {}. row ***************************\n",
            i + 1
        ));

        for (j, col) in columns.iter().enumerate() {
            let value = row_data.get(j).map(|s| s.as_str()).unwrap_or("");
            output.push_str(&format!("{:>width$}: {}\n", col, value, width = max_col_width));
        }
    }

    output
}
