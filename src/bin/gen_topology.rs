//! 合成拓扑生成
//!
//! 输出 OpenFlow 风格的拓扑快照 JSON，可选输出统一带宽的遥测表。

use clap::Parser;
use spce_rs::telemetry::StaticBandwidth;
use spce_rs::topo::TopologySnapshot;
use spce_rs::topo::fat_tree::{FatTreeOpts, build_fat_tree};
use spce_rs::topo::linear::{LinearOpts, build_linear};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "gen_topology", about = "生成线性或 fat-tree 拓扑快照")]
struct Args {
    /// linear 或 fat_tree
    #[arg(long, default_value = "linear")]
    kind: String,
    /// 线性拓扑的交换机数
    #[arg(long, default_value_t = 4)]
    switches: usize,
    /// 线性拓扑不挂主机
    #[arg(long)]
    no_hosts: bool,
    /// fat-tree 的 k（偶数，>= 2）
    #[arg(long, default_value_t = 4)]
    k: usize,
    /// 快照输出文件；缺省写 stdout
    #[arg(long)]
    out: Option<PathBuf>,
    /// 遥测表输出文件（每个交换机端口同一带宽）
    #[arg(long)]
    telemetry_out: Option<PathBuf>,
    /// 遥测表中的带宽
    #[arg(long, default_value_t = 10_000)]
    bandwidth: u64,
}

fn build(args: &Args) -> Result<TopologySnapshot, String> {
    match args.kind.replace('-', "_").as_str() {
        "linear" => Ok(build_linear(&LinearOpts {
            switches: args.switches,
            with_hosts: !args.no_hosts,
        })),
        "fat_tree" => {
            if args.k < 2 || args.k % 2 != 0 {
                return Err(format!("fat-tree k must be even and >= 2, got {}", args.k));
            }
            Ok(build_fat_tree(&FatTreeOpts { k: args.k }).snapshot)
        }
        other => Err(format!("unknown topology kind {other:?}")),
    }
}

fn write_out(path: Option<&PathBuf>, body: &str) -> Result<(), String> {
    match path {
        Some(p) => fs::write(p, body).map_err(|e| format!("write {}: {e}", p.display())),
        None => {
            println!("{body}");
            Ok(())
        }
    }
}

fn run(args: &Args) -> Result<(), String> {
    let topo = build(args)?;
    tracing::info!(
        kind = %args.kind,
        nodes = topo.nodes.len(),
        links = topo.links.len(),
        "拓扑生成完成"
    );
    let body = serde_json::to_string_pretty(&topo).map_err(|e| e.to_string())?;
    write_out(args.out.as_ref(), &body)?;

    if let Some(path) = &args.telemetry_out {
        let table: StaticBandwidth = topo
            .links
            .iter()
            .map(|l| (l.source.source_tp.clone(), args.bandwidth))
            .collect();
        let body = serde_json::to_string_pretty(&table).map_err(|e| e.to_string())?;
        write_out(Some(path), &body)?;
    }
    Ok(())
}

fn main() -> ExitCode {
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
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
