use arboard::Clipboard;
use macroquad::prelude::*;
use pathviz::action_log::{Action, ActionLog};
use pathviz::config::{Config, ConfigError, CONFIG_PATH};
use pathviz::layout::render_layout;
use pathviz::pathfinding::format_path;
use pathviz::replay::{CellOverlay, Replay};
use pathviz::{run, Algorithm, EventSequence, Grid, Position, SearchState, WallToggle};
use std::time::Duration;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

const INFO_HEIGHT: f32 = 70.0;

fn load_config() -> (Config, Option<ConfigError>) {
    match Config::load(CONFIG_PATH) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn info_height(config: &Config) -> f32 {
    if config.visual.show_info {
        INFO_HEIGHT
    } else {
        0.0
    }
}

fn window_conf() -> Conf {
    let (config, _) = load_config();
    let cell = config.grid.cell_size;
    Conf {
        window_title: config.visual.window_title.clone(),
        window_width: (config.grid.cols as f32 * cell) as i32,
        window_height: (config.grid.rows as f32 * cell + info_height(&config)) as i32,
        ..Default::default()
    }
}

/// Visualization state
struct App {
    config: Config,
    grid: Grid,
    state: SearchState,
    events: Option<EventSequence>,
    replay: Option<Replay>,
    /// Drag painting: set on mouse down, cleared on mouse up
    mouse_pressed: bool,
    last_cell: Option<Position>,
    action_log: ActionLog,
}

impl App {
    fn new(config: Config, grid: Grid) -> Self {
        let state = SearchState::new(&grid);
        App {
            config,
            grid,
            state,
            events: None,
            replay: None,
            mouse_pressed: false,
            last_cell: None,
            action_log: ActionLog::new(),
        }
    }

    fn is_animating(&self) -> bool {
        self.replay.as_ref().is_some_and(|r| !r.is_finished())
    }

    fn cell_at(&self, mouse_x: f32, mouse_y: f32) -> Option<Position> {
        let y = mouse_y - info_height(&self.config);
        if mouse_x < 0.0 || y < 0.0 {
            return None;
        }
        let size = self.config.grid.cell_size;
        let pos = Position::new((y / size) as i32, (mouse_x / size) as i32);
        self.grid.in_bounds(pos).then_some(pos)
    }

    fn toggle(&mut self, pos: Position) {
        match self.grid.toggle_wall(pos.row, pos.col) {
            WallToggle::Toggled { is_wall } => {
                debug!(row = pos.row, col = pos.col, is_wall, "wall toggled");
                // The previous replay no longer matches the board.
                self.clear_search();
                self.action_log.log(Action::ToggleWall {
                    row: pos.row,
                    col: pos.col,
                    is_wall,
                });
            }
            WallToggle::Endpoint | WallToggle::OutOfBounds => {}
        }
    }

    fn handle_mouse(&mut self) {
        // Edit and run phases never overlap.
        if self.is_animating() {
            self.mouse_pressed = false;
            return;
        }

        let (mouse_x, mouse_y) = mouse_position();
        let hovered = self.cell_at(mouse_x, mouse_y);

        if is_mouse_button_pressed(MouseButton::Left) {
            self.mouse_pressed = true;
            self.last_cell = hovered;
            if let Some(pos) = hovered {
                self.toggle(pos);
            }
        } else if self.mouse_pressed
            && is_mouse_button_down(MouseButton::Left)
            && hovered != self.last_cell
        {
            // Entering a new cell while dragging toggles it too.
            self.last_cell = hovered;
            if let Some(pos) = hovered {
                self.toggle(pos);
            }
        }

        if is_mouse_button_released(MouseButton::Left) {
            self.mouse_pressed = false;
            self.last_cell = None;
        }
    }

    fn visualize(&mut self, algorithm: Algorithm) {
        if self.is_animating() {
            return;
        }
        let result = run(&self.grid, algorithm, &mut self.state);
        info!(
            %algorithm,
            found = result.outcome.found,
            visited = result.outcome.visited,
            path_len = result.events.path_len(),
            "visualizing"
        );
        self.action_log
            .log(Action::run(&result.outcome, result.events.path_len()));

        let animation = &self.config.animation;
        self.replay = Some(Replay::new(
            &result.events,
            animation.visited_step(),
            animation.path_step(),
        ));
        self.events = Some(result.events);
    }

    fn clear_search(&mut self) {
        if self.replay.take().is_some() {
            self.events = None;
            self.state.reset();
        }
    }

    fn reset_search(&mut self) {
        if self.replay.is_some() {
            info!("search overlay reset");
            self.clear_search();
            self.action_log.log(Action::ResetSearch);
        }
    }

    fn clear_walls(&mut self) {
        if self.is_animating() {
            return;
        }
        let removed = self.grid.wall_count();
        self.grid.clear_walls();
        self.clear_search();
        info!(removed, "walls cleared");
        self.action_log.log(Action::ClearWalls { removed });
    }

    fn copy_to_clipboard(&mut self) {
        let layout = render_layout(&self.grid, self.events.as_ref());
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(&layout) {
                    warn!(error = %e, "failed to copy to clipboard");
                } else {
                    info!("grid layout copied to clipboard");
                    self.action_log.log(Action::CopyLayout);
                    // Keep clipboard alive for a moment to ensure clipboard managers can capture it
                    std::thread::sleep(Duration::from_millis(100));
                }
            }
            Err(e) => warn!(error = %e, "failed to access clipboard"),
        }
    }

    fn update(&mut self) {
        if let Some(replay) = self.replay.as_mut() {
            replay.advance(Duration::from_secs_f32(get_frame_time()));
        }
    }

    fn draw(&self) {
        let visual = &self.config.visual;
        clear_background(Color::from_rgba(
            visual.background_r,
            visual.background_g,
            visual.background_b,
            255,
        ));

        let size = self.config.grid.cell_size;
        let top = info_height(&self.config);

        for cell in self.grid.cells() {
            let pos = cell.position;
            let px = pos.col as f32 * size;
            let py = top + pos.row as f32 * size;

            let overlay = self.replay.as_ref().and_then(|r| r.cell_overlay(pos));
            let color = if cell.is_start {
                GREEN
            } else if cell.is_finish {
                RED
            } else if cell.is_wall {
                Color::from_rgba(12, 53, 71, 255)
            } else {
                match overlay {
                    Some(CellOverlay::Path) => Color::from_rgba(255, 254, 106, 255),
                    Some(CellOverlay::Visited) => Color::from_rgba(0, 190, 218, 200),
                    None => Color::from_rgba(235, 235, 235, 255),
                }
            };

            draw_rectangle(px, py, size - 1.0, size - 1.0, color);
        }

        if visual.show_info {
            let status = match (&self.replay, &self.events) {
                (Some(replay), Some(events)) if replay.is_finished() && !events.has_path() => {
                    format!("No path found ({} cells visited)", events.visited_count())
                }
                (Some(replay), Some(events)) if replay.is_finished() => format!(
                    "Path: {} steps, {} cells visited",
                    events.path_len().saturating_sub(1),
                    events.visited_count()
                ),
                (Some(_), _) => "Searching...".to_string(),
                _ => format!("Walls: {}", self.grid.wall_count()),
            };
            draw_text(&status, 10.0, 22.0, 22.0, WHITE);
            draw_text(
                "Drag: paint walls  D: Dijkstra  A: A*  Space: visualize  R: reset  X: clear walls  C: copy  Esc: quit",
                10.0,
                50.0,
                18.0,
                LIGHTGRAY,
            );
        }
    }
}

/// Run one search without a window and print the result
fn run_headless(grid: &Grid, algorithm: Algorithm) {
    let mut state = SearchState::new(grid);
    let result = run(grid, algorithm, &mut state);

    println!("Algorithm: {}", algorithm);
    println!("Visited: {} cells", result.outcome.visited);
    if result.events.has_path() {
        println!(
            "Path ({} steps): {}",
            result.events.path_len() - 1,
            format_path(result.events.path())
        );
    } else {
        println!("No path");
    }
    println!();
    print!("{}", render_layout(grid, Some(&result.events)));
}

#[macroquad::main(window_conf)]
async fn main() {
    let (config, load_error) = load_config();
    init_tracing(&config.logging.level);
    match load_error {
        None => info!(path = CONFIG_PATH, "loaded configuration"),
        Some(ConfigError::Missing(_)) => {
            info!("no {} found, using default configuration", CONFIG_PATH)
        }
        Some(e) => warn!(error = %e, "using default configuration"),
    }

    let grid = match config.grid.build() {
        Ok(grid) => grid,
        Err(e) => {
            error!(error = %e, "cannot build grid");
            return;
        }
    };

    // Check command line arguments
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "--headless" {
        let algorithm = match args.get(2).map(|name| name.parse::<Algorithm>()) {
            None => config.search.algorithm,
            Some(Ok(algorithm)) => algorithm,
            Some(Err(e)) => {
                error!(error = %e, "bad algorithm argument");
                return;
            }
        };
        run_headless(&grid, algorithm);
        return;
    }

    let default_algorithm = config.search.algorithm;
    let mut app = App::new(config, grid);

    loop {
        app.handle_mouse();

        if is_key_pressed(KeyCode::D) {
            app.visualize(Algorithm::Dijkstra);
        }
        if is_key_pressed(KeyCode::A) {
            app.visualize(Algorithm::Astar);
        }
        if is_key_pressed(KeyCode::Space) || is_key_pressed(KeyCode::Enter) {
            app.visualize(default_algorithm);
        }
        if is_key_pressed(KeyCode::R) {
            app.reset_search();
        }
        if is_key_pressed(KeyCode::X) {
            app.clear_walls();
        }
        if is_key_pressed(KeyCode::C) {
            app.copy_to_clipboard();
        }

        // Close window on Escape
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        app.update();
        app.draw();

        next_frame().await
    }

    if app.config.logging.enable_action_log {
        let path = app.config.logging.action_log_path.clone();
        match app.action_log.save_to_file(&path) {
            Ok(()) => info!(%path, "action log saved"),
            Err(e) => warn!(error = %e, "failed to save action log"),
        }
        info!("{}", app.action_log.summary().replace('\n', "; "));
    }
}
