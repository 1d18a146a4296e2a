use anyhow::{Context, Result};
use clap::Parser;
use std::rc::Rc;
use tracing::{info, warn};
mod config;
mod error;
mod events;
pub mod mappings;
mod services;
mod utils;

use config::Config;
use services::{
    create_dispatcher,
    create_window_source,
    Menu,
    MenuRequest,
    X11MenuBackend,
    X11Session,
};

#[derive(Parser, Debug)]
#[command(name = "xswitch")]
#[command(about = "Переключатель окон X11 с фильтруемым меню и запуском команд")]
struct Args {
    /// Путь к файлу конфигурации
    #[arg(short, long, default_value = "xswitch.toml")]
    config: String,

    /// Режим сухого запуска (без активации окон и запуска команд)
    #[arg(long)]
    dry_run: bool,

    /// Уровень логирования (по умолчанию из конфигурации)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Загрузка конфигурации
    let config = Rc::new(Config::load(&args.config)?);

    // Инициализация системы логирования
    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    init_tracing(level, &config.logging.filter)?;

    info!("Запуск xswitch v{}", env!("CARGO_PKG_VERSION"));
    info!("Конфигурация загружена из: {}", args.config);

    if args.dry_run {
        warn!("Режим сухого запуска - реальные действия отключены");
    }

    utils::display::check_display();

    let session = Rc::new(X11Session::connect(None).context("Нет соединения с X-сервером")?);

    let monitor = session.select_monitor(config.windows.max_monitors);
    info!("Меню будет показано на мониторе {}", monitor);

    let window_source = create_window_source(session.clone(), config.clone(), args.dry_run);
    let windows = window_source.list_windows()?;

    let request = MenuRequest {
        lines: windows.lines(),
        prompt: config.menu.prompt.clone(),
        selected: config.menu.initial_selection,
    };

    let result = {
        let mut backend = X11MenuBackend::new(session.clone(), &config, monitor)?;
        Menu::new(&config.menu, &config.grab).run(&mut backend, request)?
        // backend закрывает окно меню здесь, до активации или exec
    };
    info!("Результат меню: {:?}", result.outcome);

    let dispatcher = create_dispatcher(session, args.dry_run);
    dispatcher.dispatch(&result, &windows)?;

    info!("xswitch завершил работу");
    Ok(())
}

fn init_tracing(level: &str, filter: &str) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let directives = if filter.is_empty() {
        level.to_string()
    } else {
        format!("{},{}", level, filter)
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&directives))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();

    Ok(())
}
