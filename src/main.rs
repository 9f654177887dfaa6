use std::path::Path;
use std::sync::Arc;

use static_web_page::cli::{Args, Command, USAGE};
use static_web_page::config::{AppState, Config};
use static_web_page::handler::invoke;
use static_web_page::{logger, server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse(std::env::args().skip(1))?;
    if args.command == Command::Help {
        println!("{USAGE}");
        return Ok(());
    }

    let cfg = Config::load_from(&args.config_path)?;
    logger::init(&cfg)?;

    match args.command {
        Command::Invoke { event_file } => run_invoke(cfg, event_file.as_deref()),
        Command::Serve | Command::Help => run_serve(cfg),
    }
}

fn run_serve(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;
    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_reusable_listener(addr)?;
    let state = Arc::new(AppState::new(&cfg));

    server::start_signal_handler(Arc::clone(&state.shutdown))?;
    logger::log_server_start(&addr, &cfg);

    server::start_server_loop(listener, state).await;
    Ok(())
}

fn run_invoke(cfg: Config, event_file: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let request = invoke::load_event(event_file.map(Path::new))?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let state = Arc::new(AppState::new(&cfg));
    let response = runtime.block_on(invoke::invoke_event(&state, request))?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
