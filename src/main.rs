use quizterm::{
    app::{App, FlowController, FlowSettings},
    config::{persistence::ResultsStorage, QuizConfig},
    logging::init_file_logger,
    store::SqliteStore,
    Result,
};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %e, "application error");
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = QuizConfig::load()?;
    init_file_logger(&config.log_file)?;
    info!(database = %config.database_path.display(), "starting quizterm");

    let store = SqliteStore::open(&config.database_path)?;
    let seeded = store.seed_defaults()?;
    if seeded > 0 {
        info!(questions = seeded, "seeded default question bank");
    }

    let flow = FlowController::new(store, FlowSettings::from(&config))
        .with_results(ResultsStorage::new()?);

    let mut app = App::new(flow, config.warning_threshold)?;
    app.start().await
}
