//! cms-admin - 管理后台命令行客户端
//!
//! 日志输出到 stderr，命令结果输出到 stdout。

use clap::Parser;

use cms_admin::cli::{execute, Cli, Command};
use cms_admin::config::{load_config_from_path, print_config, render_toml, AppConfig};
use cms_admin::infrastructure::AdminContext;
use cms_admin::views::render_notification;

fn init_logging(config: &AppConfig) {
    let log_filter = format!("warn,cms_admin={}", config.log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config_from_path(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_logging(&config);
    print_config(&config);

    if let Command::Config = cli.command {
        print!("{}", render_toml(&config)?);
        return Ok(());
    }

    let context = AdminContext::from_config(&config)?;
    let mut notifications = context.notifications.subscribe();

    let result = execute(&context, cli.command).await;

    while let Ok(notification) = notifications.try_recv() {
        eprintln!("{}", render_notification(&notification));
    }

    match result {
        Ok(output) => {
            print!("{}", output);
            Ok(())
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            Err(anyhow::anyhow!("{}", e))
        }
    }
}
