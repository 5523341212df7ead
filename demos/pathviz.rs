//! Terminal visualisation of one timed A* search on random terrain.
//!
//! Run: cargo run --bin pathviz -- [seed] [config.json]
//!
//! The optional JSON file holds a `FinderConfig`, e.g.
//! `{"simplify": false, "slow_search_secs": 0.001}`.

use std::error::Error;
use std::io::{self, Write};
use std::sync::Arc;

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use rand::rngs::SmallRng;
use rand::{RngExt, SeedableRng};

use skirmish_core::{PassGrid, Point};
use skirmish_paths::{FinderConfig, NodeSnapshot, NodeState, PathFollower, TimedPathFinder};

const WIDTH: i32 = 60;
const LENGTH: i32 = 20;
const WALL_CHANCE: f64 = 0.28;

const COL_WALL: Color = Color::Rgb { r: 90, g: 90, b: 110 };
const COL_CLOSED: Color = Color::Rgb { r: 50, g: 90, b: 160 };
const COL_OPEN: Color = Color::Rgb { r: 60, g: 170, b: 80 };
const COL_ROUTE: Color = Color::Rgb { r: 250, g: 210, b: 70 };
const COL_WAYPOINT: Color = Color::Rgb { r: 240, g: 90, b: 60 };
const COL_FLOOR: Color = Color::Rgb { r: 60, g: 55, b: 50 };

fn main() -> Result<(), Box<dyn Error>> {
    fast_log::init(
        fast_log::config::Config::new()
            .console()
            .level(log::LevelFilter::Debug),
    )?;

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(s) => s.parse::<u64>()?,
        None => 2024,
    };
    let config = match args.next() {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => FinderConfig::default()
            .with_simplify(true)
            .with_slow_search_secs(0.002),
    };

    let grid = Arc::new(terrain(seed)?);
    let start = Point::new(0, 0);
    let goal = Point::new(WIDTH - 1, LENGTH - 1);
    log::info!(
        "seed {seed}: {}x{} grid, {} open cells, {config:?}",
        grid.width(),
        grid.length(),
        grid.count_open()
    );

    let mut finder = TimedPathFinder::with_config(Arc::clone(&grid), config);
    let mut waypoints = Vec::new();
    let found = finder.find(&mut waypoints, start.center(), goal.center());
    let Some(snapshot) = finder.snapshot() else {
        return Err("no snapshot after search".into());
    };

    let route = route_cells(&snapshot, goal);
    let marks: Vec<Point> = waypoints.iter().map(|w| w.cell()).collect();
    draw(&grid, &snapshot, &route, &marks)?;

    log::info!(
        "found={found} waypoints={} route cells={} closed={} open={} time={:.3}ms",
        waypoints.len(),
        route.len(),
        snapshot.count(NodeState::Closed),
        snapshot.count(NodeState::Open),
        finder.total_time() * 1000.0
    );

    if found {
        let mut unit = PathFollower::new(waypoints);
        let mut position = start.center();
        let mut legs = 0;
        while let Some(next) = unit.advance(position) {
            log::debug!("leg {legs}: {position} -> {next}");
            position = next;
            legs += 1;
        }
        log::info!("follower arrived at {position} after {legs} legs");
    }

    log::logger().flush();
    Ok(())
}

/// Random walls, with the two far corners and their neighbours kept open.
fn terrain(seed: u64) -> Result<PassGrid, Box<dyn Error>> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut cells: Vec<bool> = (0..WIDTH * LENGTH)
        .map(|_| !rng.random_bool(WALL_CHANCE))
        .collect();
    let keep = [
        (0, 0),
        (1, 0),
        (0, 1),
        (WIDTH - 1, LENGTH - 1),
        (WIDTH - 2, LENGTH - 1),
        (WIDTH - 1, LENGTH - 2),
    ];
    for (x, y) in keep {
        cells[(y * WIDTH + x) as usize] = true;
    }
    Ok(PassGrid::new(WIDTH, LENGTH, cells)?)
}

/// The full cell route to `goal`, recovered from the snapshot's parent links.
fn route_cells(snapshot: &NodeSnapshot, goal: Point) -> Vec<Point> {
    let mut route = Vec::new();
    let Some(cell) = snapshot.at(goal) else {
        return route;
    };
    if cell.state != NodeState::Closed {
        return route;
    }
    let mut cur = Some(goal);
    while let Some(p) = cur {
        route.push(p);
        cur = snapshot.at(p).and_then(|c| c.parent);
    }
    route.reverse();
    route
}

fn draw(
    grid: &PassGrid,
    snapshot: &NodeSnapshot,
    route: &[Point],
    marks: &[Point],
) -> io::Result<()> {
    let mut out = io::stdout().lock();
    for y in 0..grid.length() {
        for x in 0..grid.width() {
            let p = Point::new(x, y);
            let (color, ch) = if !grid.is_open(p) {
                (COL_WALL, '#')
            } else if marks.contains(&p) {
                (COL_WAYPOINT, 'o')
            } else if route.contains(&p) {
                (COL_ROUTE, '*')
            } else {
                match snapshot.at(p).map(|c| c.state) {
                    Some(NodeState::Closed) => (COL_CLOSED, ':'),
                    Some(NodeState::Open) => (COL_OPEN, '+'),
                    _ => (COL_FLOOR, '.'),
                }
            };
            queue!(out, SetForegroundColor(color), Print(ch))?;
        }
        queue!(out, ResetColor, Print('\n'))?;
    }
    queue!(out, ResetColor)?;
    out.flush()
}
