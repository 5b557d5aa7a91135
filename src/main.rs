use anyhow::Result;
use clap::Parser;
use doc_demystifier::app::{App, RunOptions};
use doc_demystifier::config::Config;
use doc_demystifier::utils::logging;
use std::path::PathBuf;

/// 上传 PDF 到 Document Demystifier 服务并显示分析结果
#[derive(Parser, Debug)]
#[command(name = "doc-demystifier", version)]
struct Cli {
    /// 要分析的 PDF 文件
    file: Option<PathBuf>,

    /// 可选问题
    #[arg(short, long)]
    question: Option<String>,

    /// 检查服务健康状态
    #[arg(long)]
    health: bool,

    /// 分析服务地址
    #[arg(long, env = "API_BASE_URL")]
    base_url: Option<String>,

    /// TOML 配置文件
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 把结果写成 HTML 文件
    #[arg(long)]
    html_out: Option<PathBuf>,

    /// 在终端输出提取的原文
    #[arg(long)]
    show_text: bool,

    /// 详细日志
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path).await?.with_env_overrides(),
        None => Config::from_env(),
    };
    if let Some(base_url) = cli.base_url {
        config.api_base_url = base_url;
    }
    config.verbose_logging |= cli.verbose;

    // 初始化日志
    logging::init(config.verbose_logging);

    let app = App::initialize(config)?;
    let ok = app
        .run(RunOptions {
            file: cli.file,
            question: cli.question,
            health: cli.health,
            html_out: cli.html_out,
            show_text: cli.show_text,
        })
        .await?;

    if !ok {
        std::process::exit(1);
    }

    Ok(())
}
