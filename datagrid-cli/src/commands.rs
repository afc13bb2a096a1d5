//! Subcommand implementations.

use datagrid_client::{GridSession, HttpFetcher};
use griddom::Event;
use log::info;

use crate::cli::{Command, Direction};
use crate::config::Config;
use crate::display;
use crate::error::CliError;

pub async fn run(command: Command, config: &Config) -> Result<(), CliError> {
    let mut session = open(config).await?;
    match command {
        Command::Show => show(&session),
        Command::Toggle { column } => {
            session.toggle_column(&column).await?;
            show(&session);
        }
        Command::Move {
            column,
            direction,
            steps,
        } => {
            let moved = move_column(&mut session, &column, direction, steps).await?;
            if moved < steps {
                println!("{column} moved {moved} of {steps} positions");
            }
            show(&session);
        }
        Command::Reload => {
            session.reload().await?;
            show(&session);
        }
        Command::Html => println!("{}", session.grid().to_html()),
    }
    Ok(())
}

async fn open(config: &Config) -> Result<GridSession, CliError> {
    let fetcher = HttpFetcher::builder()
        .timeout(config.timeout())
        .connect_timeout(config.connect_timeout())
        .build()?;
    let session = GridSession::builder()
        .location(config.location()?)
        .fetcher(fetcher)
        .viewport(config.viewport())
        .open(config.grid_id()?)
        .await?;
    info!(
        "opened grid {} at {}",
        session.grid().id(),
        session.location()
    );
    Ok(session)
}

fn show(session: &GridSession) {
    let grid = session.grid();
    println!("Columns: {}", grid.columns().join(", "));
    println!();
    print!("{}", display::table(grid));
    let menu = display::menu(grid);
    if !menu.is_empty() {
        println!();
        print!("{menu}");
    }
}

/// Drag `column` by pointer steps until it has passed `steps` neighbours or
/// the pointer has travelled twice the viewport width, then drop it.
///
/// Returns the number of positions the column moved.
pub async fn move_column(
    session: &mut GridSession,
    column: &str,
    direction: Direction,
    steps: usize,
) -> Result<usize, CliError> {
    let grid = session.grid();
    if !grid.is_active() {
        return Err(CliError::Inert(grid.id().to_string()));
    }
    let start = grid
        .registry()
        .and_then(|r| r.position(column))
        .ok_or_else(|| CliError::UnknownColumn(column.to_string()))?;
    let target = grid.ids().head_cell(column);
    let cell = grid
        .layout()
        .get(&target)
        .copied()
        .ok_or_else(|| CliError::UnknownColumn(column.to_string()))?;
    let limit = grid.viewport().width.max(1) * 2;

    let (mut x, y) = (cell.center_x(), cell.y);
    session
        .dispatch(&Event::DragStart {
            target: Some(target),
            x,
            y,
        })
        .await?;

    let moved = |session: &GridSession| {
        session
            .grid()
            .registry()
            .and_then(|r| r.position(column))
            .map_or(0, |now| now.abs_diff(start))
    };
    let mut travelled = 0;
    while moved(session) < steps && travelled < limit {
        x += direction.delta();
        travelled += 1;
        session.dispatch(&Event::Drag { x, y }).await?;
    }
    let result = moved(session);

    session.dispatch(&Event::Drop { x, y }).await?;
    Ok(result)
}
