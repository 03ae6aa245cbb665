use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use alliance_board::config::Config;
use alliance_board::domain::Board;
use alliance_board::infrastructure::SnapshotStore;
use alliance_board::services::ImportService;
use alliance_board::BoardApp;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,alliance_board=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Alliance Board v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config from env, using defaults: {}", e);
        Config::default()
    });

    let store = SnapshotStore::new(&config.board_path);
    let board = match store.load().await? {
        Some(board) => {
            tracing::info!(path = %config.board_path, "loaded saved board");
            board
        }
        None => {
            tracing::info!("no saved board, seeding defaults");
            Board::seed()
        }
    };
    let mut app = BoardApp::new(board);

    if let Some(code) = std::env::args().nth(1) {
        let importer = ImportService::new(reqwest::Client::new(), &config);
        match importer.import_event(app.board(), "unsorted", &code).await {
            Ok(outcome) => {
                tracing::info!(
                    event_key = %outcome.event_key,
                    teams = outcome.team_count,
                    "imported event roster into \"unsorted\""
                );
                app.replace_board(outcome.board);
            }
            Err(err) => {
                // Tell the user and keep the board as it was.
                tracing::error!(error = %err, "event import failed, board unchanged");
            }
        }
    }

    for col in &app.board().columns {
        tracing::info!(column = %col.title, cards = app.board().cards(&col.id).len());
    }
    tracing::info!(total = app.board().card_count(), "cards on board");

    if let Err(err) = store.save(app.board()).await {
        tracing::error!(error = %err, "failed to save board; in-memory state was authoritative for this run");
    }

    Ok(())
}
