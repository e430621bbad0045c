//! 用户服务主入口

use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use user_service::{
    auth::{PasswordHasher, TokenCodec},
    config::AppConfig,
    db,
    middleware::AppState,
    repository::PgUserRepository,
    routes,
    services::UserService,
    telemetry,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ===== CLI 参数处理 =====
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" => {
                println!("user-service {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!("未知参数: {}", args[1]);
                print_help();
                std::process::exit(1);
            }
        }
    }

    // 加载 .env 文件（开发环境）
    // 按优先级加载：.env.<APP_ENV> 或 .env.local > .env
    if let Ok(env) = std::env::var("APP_ENV") {
        dotenv::from_filename(format!(".env.{}", env)).ok();
    } else {
        dotenv::from_filename(".env.local").ok();
        dotenv::dotenv().ok();
    }

    // 1. 加载配置
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        anyhow::anyhow!("Failed to load configuration: {}", e)
    })?;

    // 2. 初始化日志
    telemetry::init_telemetry(&config.logging);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "User service starting...");

    // 3. 数据库连接池 + 迁移
    let db_pool = db::create_pool(&config.database).await?;
    db::run_migrations(&db_pool).await?;

    tracing::info!("Database initialized");

    // 4. 构建应用状态
    let token_codec = Arc::new(TokenCodec::from_config(&config));
    let hasher = Arc::new(PasswordHasher::from_config(&config.security)?);
    let users = Arc::new(PgUserRepository::new(db_pool));

    let user_service = Arc::new(UserService::new(users, hasher, token_codec.clone()));

    let app_state = Arc::new(AppState {
        token_codec,
        user_service,
    });

    // 5. 构建路由
    let app = routes::create_router(app_state);

    // 6. 启动服务器
    let addr = &config.server.addr;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(addr = %addr, "Server listening");

    // 7. 优雅关闭
    let shutdown_timeout = config.server.graceful_shutdown_timeout_secs;
    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

    tokio::select! {
        result = server => result?,
        _ = drain_deadline(shutdown_timeout) => {
            tracing::warn!("Graceful shutdown timeout reached, forcing exit");
        }
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// 优雅关闭信号处理
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Terminate signal received, starting graceful shutdown");
        },
    }
}

/// 收到关闭信号后开始计时，超时则放弃等待在途请求
async fn drain_deadline(timeout_secs: u64) {
    shutdown_signal().await;
    tokio::time::sleep(tokio::time::Duration::from_secs(timeout_secs)).await;
}

/// 打印帮助信息
fn print_help() {
    println!("user-service {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("用法: user-service [选项]");
    println!();
    println!("选项:");
    println!("  --version     打印版本信息并退出");
    println!("  --help        打印此帮助信息并退出");
    println!();
    println!("环境变量:");
    println!("  所有配置通过 APP_ 前缀的环境变量完成，例如:");
    println!("  APP_DATABASE__URL, APP_SECURITY__JWT_SECRET, APP_SERVER__ADDR");
    println!("  可用选项请参考 .env.example");
}
