//! # Sunset
//!
//! 日落场景无头模拟器：按点击时间表驱动场景，逐帧输出快照。
//!
//! ## 用法
//!
//! ```bash
//! cargo run -- --click 0 --click 4 --duration 8
//! cargo run -- --config config.json --format json --every 10
//! ```

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use sunset_host::{AppConfig, HostResult, SunsetScene};
use tracing::{Level, info};

#[derive(Parser)]
#[command(name = "sunset")]
#[command(about = "日落场景无头模拟器")]
#[command(version)]
struct Cli {
    /// 配置文件路径
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// 点击时刻（秒），可重复指定
    #[arg(long = "click", value_name = "SECS")]
    clicks: Vec<f32>,

    /// 模拟总时长（秒）
    #[arg(short, long)]
    duration: Option<f32>,

    /// 每秒帧数
    #[arg(long)]
    fps: Option<u32>,

    /// 每隔多少帧输出一次快照
    #[arg(long, value_name = "FRAMES")]
    every: Option<u32>,

    /// 输出格式
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// 关闭装饰动画
    #[arg(long)]
    no_decorations: bool,

    /// 把最终生效的配置写入该路径
    #[arg(long, value_name = "PATH")]
    save_config: Option<PathBuf>,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = resolve_config(&cli)?;

    if let Some(path) = &cli.save_config {
        config
            .save(path)
            .with_context(|| format!("无法保存配置到 {}", path.display()))?;
        info!(path = %path.display(), "配置已保存");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    simulate(&config, cli.format, &mut out)
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// 合并配置：命令行参数 > 配置文件 > 默认值
fn resolve_config(cli: &Cli) -> HostResult<AppConfig> {
    let mut config = AppConfig::load(&cli.config);
    let simulation = &mut config.simulation;

    if !cli.clicks.is_empty() {
        simulation.clicks = cli.clicks.clone();
    }
    if let Some(duration) = cli.duration {
        simulation.duration_secs = duration;
    }
    if let Some(fps) = cli.fps {
        simulation.fps = fps;
    }
    if let Some(every) = cli.every {
        simulation.print_every = every;
    }
    if cli.no_decorations {
        config.decorations.enabled = false;
    }

    config.validate()?;
    Ok(config)
}

fn simulate(config: &AppConfig, format: OutputFormat, out: &mut impl Write) -> anyhow::Result<()> {
    let simulation = &config.simulation;
    let fps = simulation.fps as f32;
    let dt = 1.0 / fps;
    let frames = (simulation.duration_secs * fps).round() as u64;

    let mut clicks = simulation.clicks.clone();
    clicks.sort_by(f32::total_cmp);
    let mut pending = clicks.into_iter().peekable();

    let mut scene = SunsetScene::new(config);
    scene.layout();
    scene.init_decorations();

    info!(frames, fps = simulation.fps, clicks = simulation.clicks.len(), "开始模拟");
    print_frame(out, 0, &scene, format)?;

    for frame in 0..frames {
        // 用帧序号计算时间，避免累加误差影响点击时刻
        let now = frame as f32 / fps;
        while pending.next_if(|t| *t <= now).is_some() {
            scene.click();
        }

        scene.update(dt);

        let printed = frame + 1;
        if printed % u64::from(simulation.print_every) == 0 {
            print_frame(out, printed, &scene, format)?;
        }
    }

    info!(state = ?scene.state(), time = scene.time(), "模拟结束");
    Ok(())
}

fn print_frame(
    out: &mut impl Write,
    frame: u64,
    scene: &SunsetScene,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string(&scene.snapshot())?;
            writeln!(out, "{json}")?;
        }
        OutputFormat::Text => {
            let views = scene.views();
            writeln!(
                out,
                "frame {frame:>5}  t={:>6.3}s  {:<16} sun.y={:>7.1}  reflection.y={:>7.1}  sky={}  {}",
                scene.time(),
                format!("{:?}", scene.state()),
                views.sun.view.y(),
                views.reflection.view.y(),
                views.sky.view.background_color(),
                if scene.is_transitioning() { "moving" } else { "idle" },
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut full = vec!["sunset", "--config", "/nonexistent/config.json"];
        full.extend_from_slice(args);
        Cli::parse_from(full)
    }

    #[test]
    fn test_cli_overrides_defaults() {
        let config = resolve_config(&cli(&[
            "--click", "0", "--click", "2.5", "--duration", "4", "--fps", "30", "--every", "5",
            "--no-decorations",
        ]))
        .unwrap();

        assert_eq!(config.simulation.clicks, vec![0.0, 2.5]);
        assert_eq!(config.simulation.duration_secs, 4.0);
        assert_eq!(config.simulation.fps, 30);
        assert_eq!(config.simulation.print_every, 5);
        assert!(!config.decorations.enabled);
    }

    #[test]
    fn test_config_file_then_cli() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "simulation": { "fps": 24, "duration_secs": 2.0 } }"#).unwrap();

        let path_arg = path.to_string_lossy().to_string();
        let cli = Cli::parse_from(["sunset", "--config", path_arg.as_str(), "--duration", "1"]);
        let config = resolve_config(&cli).unwrap();

        assert_eq!(config.simulation.fps, 24);
        assert_eq!(config.simulation.duration_secs, 1.0);
    }

    #[test]
    fn test_invalid_override_rejected() {
        assert!(resolve_config(&cli(&["--fps", "0"])).is_err());
        assert!(resolve_config(&cli(&["--duration", "inf"])).is_err());
        assert!(resolve_config(&cli(&["--duration", "1e30"])).is_err());
        assert!(resolve_config(&cli(&["--click", "NaN"])).is_err());
    }

    #[test]
    fn test_simulate_text_output() {
        let config = resolve_config(&cli(&["--duration", "1", "--fps", "10", "--every", "5"])).unwrap();
        let mut out = Vec::new();
        simulate(&config, OutputFormat::Text, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("frame     0"));
        assert!(lines[2].contains("ShowingSunset"));
    }

    #[test]
    fn test_simulate_json_output() {
        let config = resolve_config(&cli(&["--duration", "5", "--fps", "20", "--every", "100"])).unwrap();
        let mut out = Vec::new();
        simulate(&config, OutputFormat::Json, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let last = text.lines().last().unwrap();
        let snapshot: serde_json::Value = serde_json::from_str(last).unwrap();
        assert_eq!(snapshot["state"], "showing_sunset");
        assert_eq!(snapshot["views"][0]["background_color"], "#ff05192e");
    }
}
