//! cinebook - book cinema tickets from the terminal
//!
//! # Usage
//!
//! ```sh
//! cinebook --api-url http://localhost:8000/api
//!
//! # Production: an explicit user is required
//! CINEBOOK_PRODUCTION=1 cinebook --api-url https://cinema.example/api --user-email ann@example.com
//! ```

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tui_dispatch::TaskManager;

use cinebook::state::TICK_MS;
use cinebook::{Action, AppState, CinebookUi, Effect, Runtime, logging};
use cinebook_core::{ApiClient, ApiConfig, ConfigError, SeatGrid, UserIdentity};

#[derive(Parser, Debug)]
#[command(name = "cinebook")]
#[command(about = "Browse what's playing and book cinema seats")]
struct Args {
    /// Base URL of the cinema API, e.g. http://localhost:8000/api
    #[arg(long, env = "CINEBOOK_API_URL")]
    api_url: String,

    /// Email the booking is made under
    #[arg(long, env = "CINEBOOK_USER_EMAIL")]
    user_email: Option<String>,

    /// Refuse to fall back to the test identity
    #[arg(long, env = "CINEBOOK_PRODUCTION")]
    production: bool,

    /// Timeout for every API request, in seconds
    #[arg(long, default_value = "15")]
    timeout_secs: u64,

    /// Auditorium rows (at most 26)
    #[arg(long, default_value = "8")]
    rows: u16,

    /// Seats in each row
    #[arg(long, default_value = "12")]
    seats_per_row: u16,

    /// Where log output goes (the terminal is taken by the UI)
    #[arg(long, default_value = "cinebook.log")]
    log_file: PathBuf,
}

struct Setup {
    client: ApiClient,
    user: UserIdentity,
    grid: SeatGrid,
}

fn setup(args: &Args) -> Result<Setup, String> {
    let config = ApiConfig::new(&args.api_url)
        .map_err(|e| e.to_string())?
        .with_timeout(Duration::from_secs(args.timeout_secs));
    let user = UserIdentity::resolve(args.user_email.as_deref(), args.production)
        .map_err(|e| match e {
            ConfigError::MissingIdentity => {
                "--user-email (or CINEBOOK_USER_EMAIL) is required with --production".to_string()
            }
            other => other.to_string(),
        })?;
    let grid = SeatGrid::new(args.rows, args.seats_per_row).map_err(|e| e.to_string())?;
    let client = ApiClient::new(config).map_err(|e| e.to_string())?;
    Ok(Setup { client, user, grid })
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    if let Err(e) = logging::init(&args.log_file) {
        eprintln!(
            "Error: could not open log file {}: {e}",
            args.log_file.display()
        );
        process::exit(1);
    }

    let setup = match setup(&args) {
        Ok(setup) => setup,
        Err(e) => {
            tracing::error!(error = %e, "startup failed");
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    tracing::info!(
        api = %setup.client.config().base_url(),
        user = setup.user.email(),
        rows = setup.grid.rows(),
        seats_per_row = setup.grid.seats_per_row(),
        "starting"
    );

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, setup).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    setup: Setup,
) -> io::Result<()> {
    let today = chrono::Local::now().date_naive();
    let state = AppState::new(setup.user, today, setup.grid);
    let client = Arc::new(setup.client);

    let mut runtime = Runtime::new(state);

    // Spinner animation
    runtime
        .subscriptions()
        .interval("tick", Duration::from_millis(TICK_MS), || Action::Tick);

    runtime.enqueue(Action::MoviesFetch);

    let ui = RefCell::new(CinebookUi::new());

    runtime
        .run(
            terminal,
            |frame, area, state| ui.borrow_mut().render(frame, area, state),
            |event, state| ui.borrow_mut().map_event(event, state),
            |effect, tasks| handle_effect(&client, effect, tasks),
        )
        .await
}

/// Run each effect as a keyed task; the result comes back as an action.
///
/// Spawning under a key that is still running aborts the older task.
fn handle_effect(client: &Arc<ApiClient>, effect: Effect, tasks: &mut TaskManager<Action>) {
    let client = Arc::clone(client);
    match effect {
        Effect::FetchMovies => {
            tasks.spawn("movies", async move {
                match client.now_playing().await {
                    Ok(movies) => Action::MoviesDidLoad(movies),
                    Err(e) => {
                        tracing::warn!(error = %e, "now-playing fetch failed");
                        Action::MoviesDidError(e.to_string())
                    }
                }
            });
        }
        Effect::FetchMovie { id } => {
            tasks.spawn("movie", async move {
                match client.movie(id).await {
                    Ok(movie) => Action::MovieDidLoad(movie),
                    Err(e) => {
                        tracing::warn!(id, error = %e, "movie fetch failed");
                        Action::MovieDidError(e.to_string())
                    }
                }
            });
        }
        Effect::FetchBookedSeats(ticket) => {
            tasks.spawn("booked_seats", async move {
                match client.booked_seats(&ticket.key).await {
                    Ok(seats) => Action::SeatsDidLoad { ticket, seats },
                    Err(e) => Action::SeatsDidError {
                        ticket,
                        error: e.to_string(),
                    },
                }
            });
        }
        Effect::SubmitBooking(request) => {
            tasks.spawn("booking", async move {
                match client.create_booking(&request).await {
                    Ok(confirmation) => Action::BookingDidConfirm(confirmation),
                    Err(e) => {
                        tracing::warn!(error = %e, "booking failed");
                        Action::BookingDidFail(e.to_string())
                    }
                }
            });
        }
    }
}
