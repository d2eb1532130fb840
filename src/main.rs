use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lifegrid_rs::paint::{PaintController, PointerEvent};
use lifegrid_rs::sync::SyncClient;
use lifegrid_rs::view::{render, Surface, TextSurface};
use lifegrid_rs::{config, AppState};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lifegrid=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::DEFAULT_ENGINE_URL.to_string());

    let state = AppState::new(
        config::GRID_WIDTH,
        config::GRID_HEIGHT,
        TextSurface::new(config::GRID_WIDTH, config::GRID_HEIGHT),
    )
    .expect("configured grid dimensions are positive");

    let mut client = SyncClient::new(url.clone(), state.clone());
    let mut painter = PaintController::new();

    tracing::info!(
        "Life board {}x{}, engine at {}",
        config::GRID_WIDTH,
        config::GRID_HEIGHT,
        url
    );
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };
        let args: Vec<&str> = parts.collect();

        match command {
            "start" => {
                if let Err(e) = client.start().await {
                    tracing::error!("Start failed: {}", e);
                }
            }
            "stop" => {
                if let Err(e) = client.stop().await {
                    tracing::error!("Stop failed: {}", e);
                }
            }
            "paint" => match parse_cells(&args) {
                Some(cells) => paint_path(&cells, &mut painter, &state).await,
                None => println!("Usage: paint x,y [x,y ...]"),
            },
            "toggle" => match parse_cells(&args) {
                Some(cells) if cells.len() == 1 => paint_path(&cells, &mut painter, &state).await,
                _ => println!("Usage: toggle x,y"),
            },
            "show" => {
                let grid = state.grid.read().await;
                let mut surface = state.surface.write().await;
                render(&grid, &mut *surface);
                println!("{}", surface.to_text());
            }
            "status" => {
                let grid = state.grid.read().await;
                println!(
                    "{:?}, received {} messages, server at {}, {} cells alive",
                    client.connection_state(),
                    client.received_count(),
                    client.last_server_send_count(),
                    grid.num_alive()
                );
            }
            "help" => print_help(),
            "quit" => {
                if client.is_connected() {
                    let _ = client.stop().await;
                }
                break;
            }
            other => println!("Unknown command: {} (try 'help')", other),
        }
    }
}

/// Replay a drag gesture over the given cells: pointer down on the first,
/// enter on each following cell, then release. Each change is mirrored to
/// the surface immediately, ahead of any remote redraw.
async fn paint_path(
    cells: &[(usize, usize)],
    painter: &mut PaintController,
    state: &AppState<TextSurface>,
) {
    let mut grid = state.grid.write().await;
    let mut surface = state.surface.write().await;

    let (x, y) = cells[0];
    let mut events = vec![PointerEvent::Down { x, y }];
    events.extend(cells[1..].iter().map(|&(x, y)| PointerEvent::Enter { x, y }));
    events.push(PointerEvent::Up);

    for event in events {
        if let Some(change) = painter.handle(event, &mut grid) {
            surface.mark(change.x, change.y, change.alive);
        }
    }
}

fn parse_cells(args: &[&str]) -> Option<Vec<(usize, usize)>> {
    if args.is_empty() {
        return None;
    }

    args.iter()
        .map(|arg| {
            let (x, y) = arg.split_once(',')?;
            Some((x.trim().parse().ok()?, y.trim().parse().ok()?))
        })
        .collect()
}

fn print_help() {
    println!("Commands:");
    println!("  start              - Connect and send the current board to the engine");
    println!("  stop               - Disconnect from the engine");
    println!("  paint x,y [x,y ..] - Drag over cells (first cell decides draw vs erase)");
    println!("  toggle x,y         - Flip a single cell");
    println!("  show               - Print the board");
    println!("  status             - Connection state and counters");
    println!("  quit               - Exit");
}
