use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::color::{Rgb, Theme};
use crate::config::Config;
use crate::driver::ProgressDriver;
use crate::geometry::compute_fill_geometry;
use crate::renderer::layout::{fit_circle, terminal_canvas_size};
use crate::renderer::{render_frame, Canvas, FrameData, RenderParams};

/// Pixels with less alpha than this are left to the terminal background.
const ALPHA_CUTOFF: u8 = 128;

pub async fn run(config: Config, config_path: Option<PathBuf>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, config, config_path).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Mutable state of the interactive session.
struct Session {
    config: Config,
    config_path: Option<PathBuf>,
    driver: ProgressDriver,
    theme: Theme,
    canvas: Canvas,
    message: Option<String>,
}

impl Session {
    fn new(config: Config, config_path: Option<PathBuf>, now: Instant) -> Result<Self> {
        let progress = &config.progress;
        let mut driver = ProgressDriver::new(progress.max_value, progress.step, progress.interval(), now)?
            .looping(progress.loop_when_done);
        if !progress.auto_start {
            driver = driver.paused();
        }

        Ok(Self {
            theme: config.colors.theme,
            driver,
            config,
            config_path,
            canvas: Canvas::new(0, 0),
            message: None,
        })
    }

    /// Returns false when the user asked to quit.
    fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        match key {
            KeyEvent {
                code: KeyCode::Char('q'),
                ..
            }
            | KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => return false,
            KeyEvent {
                code: KeyCode::Char('r'),
                ..
            } => {
                self.driver.restart(now);
                self.message = None;
            }
            KeyEvent {
                code: KeyCode::Char(' '),
                ..
            } => {
                self.driver.toggle_pause(now);
            }
            KeyEvent {
                code: KeyCode::Char('c'),
                ..
            } => {
                self.theme = self.theme.next();
                info!("Theme: {}", self.theme.name());
            }
            KeyEvent {
                code: KeyCode::Char('t'),
                ..
            } => {
                self.config.circle.show_text = !self.config.circle.show_text;
            }
            KeyEvent {
                code: KeyCode::Char('w'),
                ..
            } => {
                self.message = Some(self.save_preferences());
            }
            _ => {}
        }
        true
    }

    fn save_preferences(&mut self) -> String {
        let Some(path) = self.config_path.clone().or_else(Config::default_path) else {
            return "no config directory".to_string();
        };
        self.config.colors.theme = self.theme;
        match self.config.save_preferences(&path) {
            Ok(()) => {
                info!("Saved preferences to {}", path.display());
                format!("saved {}", path.display())
            }
            Err(e) => {
                warn!("Failed to save preferences: {:#}", e);
                "save failed".to_string()
            }
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        if area.height < 2 {
            return;
        }
        let body = Rect::new(area.x, area.y + 1, area.width, area.height - 1);
        self.draw_circle(frame, body);
        self.draw_status(frame, area);
    }

    fn draw_circle(&mut self, frame: &mut Frame, area: Rect) {
        let (width, height) = terminal_canvas_size(area.width, area.height);
        let Some(spec) = fit_circle(width, height, &self.config.circle.spec()) else {
            return;
        };

        let progress = self.driver.progress();
        let geometry = match compute_fill_geometry(progress, self.driver.max_value(), spec.radius) {
            Ok(g) => g,
            Err(e) => {
                warn!("Skipping frame: {}", e);
                return;
            }
        };

        let label = format!("{}{}", progress, self.config.circle.suffix);
        let colors = self.config.colors.resolve(self.theme);

        self.canvas.resize(width, height);
        render_frame(
            &mut self.canvas,
            &FrameData {
                geometry: &geometry,
                label: Some(label.as_str()),
            },
            &RenderParams {
                spec: &spec,
                colors: &colors,
            },
        );

        blit_half_blocks(&self.canvas, frame, area);
    }

    fn state_label(&self) -> &'static str {
        if self.driver.is_running() {
            "running"
        } else if self.driver.is_finished() && !self.config.progress.loop_when_done {
            "done"
        } else {
            "paused"
        }
    }

    fn draw_status(&self, frame: &mut Frame, area: Rect) {
        let state = self.state_label();
        let mut status = format!(
            " [r]estart | [space] {} | [c]olor: {} | [t]ext | [w]rite | [q]uit   {}/{} ",
            state,
            self.theme.name(),
            self.driver.progress(),
            self.driver.max_value()
        );
        if let Some(ref msg) = self.message {
            status.push_str(&format!("| {} ", msg));
        }

        for (i, ch) in status.chars().enumerate() {
            if i < area.width as usize {
                let cell = frame.buffer_mut().cell_mut((area.x + i as u16, area.y));
                if let Some(cell) = cell {
                    cell.set_char(ch);
                    cell.set_fg(Color::DarkGray);
                }
            }
        }
    }
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: Config,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let mut session = Session::new(config, config_path, Instant::now())?;
    let target_fps = Duration::from_secs_f64(1.0 / 60.0);

    info!(
        "Animating 0..{} every {}ms",
        session.driver.max_value(),
        session.config.progress.tick_ms
    );

    loop {
        session.driver.tick(Instant::now());

        terminal.draw(|frame| {
            let block = ratatui::widgets::Block::default().style(Style::default().bg(Color::Reset));
            frame.render_widget(block, frame.area());
            session.draw(frame);
        })?;

        // Handle input
        if event::poll(target_fps)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && !session.handle_key(key, Instant::now()) {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn pixel_color(pixel: (u8, u8, u8, u8)) -> Option<Rgb> {
    let (r, g, b, a) = pixel;
    (a >= ALPHA_CUTOFF).then_some((r, g, b))
}

/// Write the canvas into the frame buffer, two vertical pixels per cell.
fn blit_half_blocks(canvas: &Canvas, frame: &mut Frame, area: Rect) {
    for row in 0..area.height as usize {
        for col in 0..area.width as usize {
            let top = pixel_color(canvas.get_pixel(col, row * 2));
            let bottom = pixel_color(canvas.get_pixel(col, row * 2 + 1));
            if top.is_none() && bottom.is_none() {
                continue;
            }

            let cell = frame
                .buffer_mut()
                .cell_mut((area.x + col as u16, area.y + row as u16));
            if let Some(cell) = cell {
                let to_color = |c: Option<Rgb>| c.map_or(Color::Reset, |(r, g, b)| Color::Rgb(r, g, b));
                cell.set_char('▀');
                cell.set_fg(to_color(top));
                cell.set_bg(to_color(bottom));
            }
        }
    }
}
