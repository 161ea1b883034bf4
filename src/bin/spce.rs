//! 约束路径计算
//!
//! 读取拓扑快照、请求与带宽表，输出路径（JSON）。
//! 退出码：0 找到路径；2 没有满足约束的路径；1 输入错误。

use clap::Parser;
use spce_rs::pce::{Constraint, EngineConfig, Objective, PathComputation, PathReply, PathRequest};
use spce_rs::telemetry::StaticBandwidth;
use spce_rs::topo::TopologySnapshot;
use spce_rs::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "spce", about = "在拓扑快照上计算满足约束的路径")]
struct Args {
    /// 拓扑快照文件 topology.json
    #[arg(long)]
    topology: PathBuf,

    /// 请求文件 request.json（source、destination、objective、constraints）
    #[arg(long)]
    request: Option<PathBuf>,

    /// 源端口；覆盖请求文件中的值
    #[arg(long)]
    src: Option<String>,

    /// 目的端口；覆盖请求文件中的值
    #[arg(long)]
    dst: Option<String>,

    /// 计算目标：shortest_path 或 max_bandwidth
    #[arg(long)]
    objective: Option<String>,

    /// 追加带宽下限约束
    #[arg(long)]
    min_bandwidth: Option<u64>,

    /// 追加跳数上限约束
    #[arg(long)]
    max_hop: Option<u64>,

    /// 带宽表 telemetry.json（{"<端口>": <带宽>}）
    #[arg(long)]
    telemetry: Option<PathBuf>,

    /// 带宽表中缺失的端口按该带宽处理；不填则按查询失败（带宽 0）处理
    #[arg(long)]
    default_bandwidth: Option<u64>,

    /// 引擎配置 JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// 单次带宽查询超时（毫秒）；覆盖配置文件
    #[arg(long)]
    telemetry_timeout_ms: Option<u64>,

    /// 格式化输出结果 JSON
    #[arg(long)]
    pretty: bool,
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn read_file<T>(path: &Path, parse: impl FnOnce(&str) -> spce_rs::Result<T>) -> CliResult<T> {
    let raw = fs::read_to_string(path).map_err(|e| format!("read {}: {e}", path.display()))?;
    let v = parse(&raw).map_err(|e| format!("{}: {e}", path.display()))?;
    Ok(v)
}

fn parse_objective(raw: &str) -> CliResult<Objective> {
    match raw.to_ascii_lowercase().replace('-', "_").as_str() {
        "shortest_path" | "shortest" => Ok(Objective::ShortestPath),
        "max_bandwidth" | "widest" => Ok(Objective::MaxBandwidth),
        other => Err(format!("unknown objective {other:?} (expected shortest_path or max_bandwidth)").into()),
    }
}

fn build_request(args: &Args) -> CliResult<PathRequest> {
    let mut req = match &args.request {
        Some(path) => read_file(path, PathRequest::from_json)?,
        None => {
            let (Some(src), Some(dst)) = (&args.src, &args.dst) else {
                return Err("either --request or both --src and --dst are required".into());
            };
            PathRequest::new(src.as_str(), dst.as_str())
        }
    };
    if let Some(src) = &args.src {
        req.source = src.as_str().into();
    }
    if let Some(dst) = &args.dst {
        req.destination = dst.as_str().into();
    }
    if let Some(obj) = &args.objective {
        req.objective = parse_objective(obj)?;
    }
    if let Some(bw) = args.min_bandwidth {
        req.constraints.push(Constraint::min_bandwidth(bw));
    }
    if let Some(hops) = args.max_hop {
        req.constraints.push(Constraint::max_hops(hops));
    }
    Ok(req)
}

fn run(args: &Args) -> CliResult<ExitCode> {
    let mut config = match &args.config {
        Some(path) => read_file(path, EngineConfig::from_json)?,
        None => EngineConfig::default(),
    };
    if let Some(ms) = args.telemetry_timeout_ms {
        config.telemetry_timeout_ms = ms;
    }

    let topology = read_file(&args.topology, TopologySnapshot::from_json)?;
    let request = build_request(args)?;

    let mut table = match &args.telemetry {
        Some(path) => read_file(path, StaticBandwidth::from_json)?,
        None => StaticBandwidth::new(),
    };
    if let Some(bw) = args.default_bandwidth {
        table = table.with_fallback(bw);
    }
    tracing::info!(
        nodes = topology.nodes.len(),
        links = topology.links.len(),
        telemetry_entries = table.len(),
        objective = ?request.objective,
        "开始路径计算"
    );

    let engine = PathComputation::with_config(table, config);

    let (reply, code) = match engine.compute(&request, &topology) {
        Ok(path) => (PathReply::from(&path), ExitCode::SUCCESS),
        Err(Error::NoPathFound { reason, .. }) => (PathReply::NoPath { reason }, ExitCode::from(2)),
        Err(e) => return Err(e.into()),
    };

    let out = if args.pretty {
        serde_json::to_string_pretty(&reply)?
    } else {
        serde_json::to_string(&reply)?
    };
    println!("{out}");
    Ok(code)
}

fn main() -> ExitCode {
    // 日志写 stderr，stdout 只输出结果 JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
