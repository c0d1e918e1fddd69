use anyhow::Context;
use cardcast_admin::utils::{logger, validation::Validate};
use cardcast_admin::{AdminApp, AppConfig, CliArgs};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting cardcast-admin");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = AppConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load config file '{}'", args.config))?;

    // 應用命令列覆蓋設定
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        return Err(e).context("Invalid configuration");
    }

    tracing::debug!("Config: {:?}", config);
    tracing::info!(
        "✅ CardCast at {}://{}:{}, cache in {}",
        config.cardcast.scheme,
        config.cardcast.host,
        config.cardcast.port,
        config.cache_dir().display()
    );

    std::fs::create_dir_all(config.cache_dir()).with_context(|| {
        format!(
            "Failed to create cache directory {}",
            config.cache_dir().display()
        )
    })?;

    let app = AdminApp::from_config(&config).context("Failed to build HTTP client")?;

    if config.decks.preload_featured {
        app.registry.preload_featured().await;
    }

    app.serve(&config.server.bind)
        .await
        .context("Server terminated with an error")?;

    Ok(())
}
