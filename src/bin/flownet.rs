//! flownet 命令行工具
//!
//! 从边列表文件加载网络，用一个或多个算法计算最大流并打印结果

use anyhow::{bail, Context};
use clap::Parser;
use colored::Colorize;
use flownet::cli::{all_agree, PrintMode, Printer, RunSummary};
use flownet::flow::{MaxFlow, ResidualNetwork};
use flownet::graph::VertexId;
use flownet::import::{load_graph, ImportFormat};
use flownet::{solve, MaxFlowAlgorithm};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "flownet")]
#[command(version, about = "容量网络最大流计算工具")]
struct Args {
    /// 输入文件路径
    #[arg(short, long)]
    input: PathBuf,

    /// 输入格式: csv, jsonl
    #[arg(short, long, value_enum, default_value = "csv")]
    format: ImportFormat,

    /// 源点 ID
    #[arg(short, long)]
    source: u64,

    /// 汇点 ID
    #[arg(short = 't', long)]
    sink: u64,

    /// 使用的算法，可重复指定；缺省时运行全部算法
    #[arg(short, long = "algorithm", value_enum)]
    algorithms: Vec<MaxFlowAlgorithm>,

    /// 以 JSON 输出结果
    #[arg(long)]
    json: bool,

    /// 打印每条边的流量
    #[arg(long)]
    flows: bool,

    /// 垂直显示表格
    #[arg(long)]
    vertical: bool,

    /// 日志详细程度（-v, -vv）
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// JSON 输出
#[derive(Serialize)]
struct Report {
    runs: Vec<RunSummary>,
    agree: bool,
    result: MaxFlow,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> anyhow::Result<bool> {
    let source = VertexId::new(args.source);
    let sink = VertexId::new(args.sink);

    let (graph, stats) = load_graph(&args.input, args.format)
        .with_context(|| format!("无法加载 {}", args.input.display()))?;
    if graph.vertex_count() == 0 {
        bail!("输入文件中没有有效的边: {}", args.input.display());
    }

    let algorithms = if args.algorithms.is_empty() {
        MaxFlowAlgorithm::ALL.to_vec()
    } else {
        args.algorithms.clone()
    };

    let base = ResidualNetwork::from_graph(&graph)?;
    let mut runs = Vec::with_capacity(algorithms.len());
    let mut solved = None;

    // 每个算法在独立的网络副本上运行
    for algorithm in algorithms {
        let mut network = base.clone();
        let (value, stats) = solve(&mut network, algorithm, source, sink);
        network.check_invariants(source, sink)?;
        runs.push(RunSummary {
            algorithm,
            value,
            stats,
        });
        solved.get_or_insert((network, value));
    }

    let agree = all_agree(&runs);
    let Some((network, value)) = solved else {
        bail!("没有可运行的算法");
    };
    let result = MaxFlow::from_network(&network, source, value);

    if args.json {
        let report = Report { runs, agree, result };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(agree);
    }

    let mode = if args.vertical {
        PrintMode::Vertical
    } else {
        PrintMode::Table
    };
    let printer = Printer::new(mode);

    println!("{}", "Network".bold());
    print!("{}", printer.print_stats(graph.vertex_count(), graph.edge_count()));
    if stats.errors > 0 {
        println!("{}", format!("跳过 {} 条无效记录", stats.errors).yellow());
    }

    println!("\n{} {} -> {}", "Max flow".bold(), source, sink);
    print!("{}", printer.print_summary(&runs));

    if args.flows {
        println!("\n{}", "Flows".bold());
        print!("{}", printer.print_flows(&result));
    }

    println!("\n{}", "Min cut".bold());
    print!("{}", printer.print_cut(&result));

    if agree {
        println!("\n{}", "所有算法结果一致".green());
    } else {
        eprintln!("\n{}", "算法结果不一致".red().bold());
    }
    Ok(agree)
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            eprintln!("{} {:#}", "错误:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
