use franchise_insight::{api, load_dataset, AliasTable, AppConfig, DashboardService};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::from_env()?;
    info!("Starting server with config: {:?}", config);

    // 加载导出表并统一门店名 (只做一次, 之后只读共享)
    let aliases = AliasTable::with_extra(&config.analytics.aliases)?;
    let dataset = aliases.canonicalize_dataset(load_dataset(&config.data)?);
    info!(
        "Dataset loaded: {} sales, {} menu, {} dong, {} ad-now, {} ad-click, {} ad-daily rows ({} aliases)",
        dataset.daily_sales.len(),
        dataset.menu_sales.len(),
        dataset.dong_sales.len(),
        dataset.ad_summary.len(),
        dataset.ad_click.len(),
        dataset.ad_daily.len(),
        aliases.len()
    );
    if dataset.daily_sales.is_empty() {
        tracing::warn!("日销售表为空, 看板将只返回空结果");
    }

    let service = Arc::new(DashboardService::new(
        Arc::new(dataset),
        config.analytics.clone(),
    ));

    let app = api::router(service);

    // 启动服务器
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  GET  /api/options   - store / month / platform choices");
    info!("  POST /api/dashboard - full recomputation for one selection");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
