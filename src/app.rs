//! Main application orchestration and execution

use crate::{
    cli::Cli,
    client::{InvokeClient, Invoker},
    clock::{Clock, SystemClock},
    config::{display_config_summary, load_config, EnvManager},
    error::{AppError, Result},
    executor::{per_worker_share, WorkerPool},
    logging::LoggerFactory,
    models::{Config, RunConfig},
    output::{OutputCoordinator, OutputFormatterFactory, RunReport},
    resolver::{ControlPlaneResolver, Resolver},
    stats::StatisticsEngine,
};
use std::sync::Arc;

/// Run one complete benchmark from parsed CLI arguments
pub fn run_application(cli: Cli) -> Result<()> {
    if cli.debug {
        println!("{} v{}", crate::PKG_NAME, crate::VERSION);
        println!("Debug mode enabled");
        println!();
    }

    // Topic help exits before any configuration is required
    if cli.should_show_topic_help() {
        println!("{}", cli.display_help());
        return Ok(());
    }

    cli.validate().map_err(AppError::validation)?;

    // Load and validate configuration
    let config = load_config(cli)?;

    if config.debug {
        println!("Configuration loaded successfully:");
        println!("{}", display_config_summary(&config));
        println!();
    }

    print_config_warnings(&config)?;

    let logger_factory = LoggerFactory::new(config.clone());
    let logger = logger_factory.create_logger("APP");

    logger
        .info("starting benchmark")
        .field("app", &config.app_name)
        .field("function", &config.function_name)
        .field("host", &config.host)
        .field("count", config.count)
        .field("workers", config.workers)
        .log();

    // Resolve the target before generating any load
    let resolver = ControlPlaneResolver::new(&config.host, config.debug)?;
    let target_id = resolver.resolve(&config.app_name, &config.function_name)?;

    logger
        .info("target resolved")
        .field("target_id", &target_id)
        .log();

    let run_config = RunConfig::new(config.count, config.workers, target_id.clone())?;

    if config.debug {
        println!(
            "Run plan: {} workers x {} invocations each",
            run_config.worker_count,
            per_worker_share(&run_config)
        );
        println!();
    }

    let invoker: Arc<dyn Invoker> = Arc::new(InvokeClient::new(&config.host)?);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let pool = WorkerPool::new(run_config, invoker, clock);
    let outcome = pool.execute(&logger_factory)?;

    // Failed invocations still carry samples; only an empty set blocks the
    // statistics.
    let engine = StatisticsEngine::new(config.workers);
    let mut insufficient = None;
    let statistics = match engine.analyze(&outcome.samples) {
        Ok(stats) => Some(stats),
        Err(e @ AppError::InsufficientSamples(_)) => {
            logger
                .warn("run finished without samples")
                .field("attempted", outcome.summary.attempted)
                .field("not_issued", outcome.summary.not_issued)
                .log();
            insufficient = Some(e);
            None
        }
        Err(e) => return Err(e),
    };

    let formatter = OutputFormatterFactory::create_formatter(config.enable_color, config.verbose);
    let coordinator = OutputCoordinator::with_verbose_listing(formatter, &config);

    let report = RunReport {
        app_name: &config.app_name,
        function_name: &config.function_name,
        target_id: &target_id,
        summary: &outcome.summary,
        samples: &outcome.samples,
        statistics: statistics.as_ref(),
    };

    println!("{}", coordinator.display_report(&report)?);

    // The report is shown either way, but a run that produced nothing to
    // measure still fails.
    match insufficient {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Print non-fatal configuration warnings before the run starts
fn print_config_warnings(config: &Config) -> Result<()> {
    for warning in EnvManager::validate_current_env()? {
        eprintln!("{}", warning);
    }

    let recommended = Config::recommended_max_workers();
    if config.workers > recommended {
        eprintln!(
            "Warning: {} workers exceeds the recommended maximum of {} for this machine; \
             thread scheduling may distort latency measurements",
            config.workers, recommended
        );
    }

    if config.workers > config.count {
        eprintln!(
            "Warning: more workers ({}) than invocations ({}); \
             each worker's share rounds down to zero and no load will be generated",
            config.workers, config.count
        );
    }

    Ok(())
}
