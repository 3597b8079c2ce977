/// Terminal plot display for a point cloud and its planar projections
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use planeproj_core::{Plane, PointCloud, Projection};
use std::io::{self, stdout, Write};
use std::time::Duration;
use tracing::debug;

pub mod renderer;
pub mod view;

pub use renderer::{Canvas, PanelStyle, Range};
pub use view::{OrbitCamera, OrbitState};

/// Degrees the 3-D view turns per key press
const ORBIT_STEP: f64 = 5.0;

/// Interactive 2x2 scatter display: the cloud and its XY, XZ, YZ projections
pub struct PlotApp<'a> {
    cloud: &'a PointCloud,
    xy: &'a Projection,
    xz: &'a Projection,
    yz: &'a Projection,
    camera: OrbitCamera,
    running: bool,
    dirty: bool,
}

impl<'a> PlotApp<'a> {
    pub fn new(
        cloud: &'a PointCloud,
        xy: &'a Projection,
        xz: &'a Projection,
        yz: &'a Projection,
    ) -> Self {
        Self {
            cloud,
            xy,
            xz,
            yz,
            camera: OrbitCamera::default(),
            running: true,
            dirty: true,
        }
    }

    /// Show the display until the user dismisses it, then restore the terminal
    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let result = execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)
            .and_then(|_| self.main_loop());

        // Cleanup runs even when the loop failed
        let raw = terminal::disable_raw_mode();
        let screen = execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show);

        first_error([result, raw, screen])
    }

    fn main_loop(&mut self) -> io::Result<()> {
        while self.running {
            if self.dirty {
                let (width, height) = terminal::size()?;
                let mut stdout = stdout();
                queue!(stdout, terminal::Clear(ClearType::All))?;
                self.draw_frame(&mut stdout, width, height)?;
                stdout.flush()?;
                self.dirty = false;
            }

            // Nothing animates, so block on input between redraws
            if event::poll(Duration::from_millis(250))? {
                self.handle_event(event::read()?);
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => {
                self.handle_key(code)
            }
            Event::Resize(width, height) => {
                debug!(width, height, "terminal resized");
                self.dirty = true;
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        let (d_elevation, d_azimuth) = match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
                return;
            }
            KeyCode::Char('w') | KeyCode::Up => (ORBIT_STEP, 0.0),
            KeyCode::Char('s') | KeyCode::Down => (-ORBIT_STEP, 0.0),
            KeyCode::Char('a') | KeyCode::Left => (0.0, -ORBIT_STEP),
            KeyCode::Char('d') | KeyCode::Right => (0.0, ORBIT_STEP),
            _ => return,
        };
        self.camera.orbit.orbit(d_elevation, d_azimuth);
        self.dirty = true;
    }

    /// Render one complete frame of `width` x `height` cells into `writer`.
    ///
    /// Row 0 is the status line; the remaining rows hold the 2x2 panel grid.
    pub fn draw_frame<W: Write>(&self, writer: &mut W, width: u16, height: u16) -> io::Result<()> {
        let half_w = width / 2;
        let half_h = height.saturating_sub(1) / 2;

        let panels = [
            (0, 1, width - half_w),
            (half_w, 1, half_w),
            (0, 1 + half_h, width - half_w),
            (half_w, 1 + half_h, half_w),
        ];

        for (index, (col, row, panel_w)) in panels.into_iter().enumerate() {
            // One blank column separates neighbouring panels
            let mut canvas = Canvas::new(panel_w.saturating_sub(1) as usize, half_h as usize);
            match index {
                0 => {
                    renderer::draw_scatter_3d(&mut canvas, self.cloud, &self.camera, &cloud_style())
                }
                1 => renderer::draw_scatter_2d(&mut canvas, self.xy, &projection_style(self.xy)),
                2 => renderer::draw_scatter_2d(&mut canvas, self.xz, &projection_style(self.xz)),
                _ => renderer::draw_scatter_2d(&mut canvas, self.yz, &projection_style(self.yz)),
            }
            canvas.draw(writer, col, row)?;
        }

        let orbit = self.camera.orbit;
        let status = format!(
            "planeproj | {} points | elev {:.0} azim {:.0} | \
             Controls: WASD/Arrows=Orbit Q=Quit",
            self.cloud.len(),
            orbit.elevation,
            orbit.azimuth
        );
        // Clip to one row so a narrow terminal does not wrap into the panels
        let status: String = status.chars().take(width as usize).collect();
        queue!(
            writer,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(status),
            ResetColor
        )?;
        Ok(())
    }
}

/// The first failure among steps that all had to run, or `Ok` if none failed
fn first_error(results: impl IntoIterator<Item = io::Result<()>>) -> io::Result<()> {
    results
        .into_iter()
        .find(|result| result.is_err())
        .unwrap_or(Ok(()))
}

fn cloud_style() -> PanelStyle {
    PanelStyle::new("Original Point Cloud", "X", "Y", Color::Red)
}

fn projection_style(projection: &Projection) -> PanelStyle {
    let (u, v) = projection.plane().axes();
    let color = match projection.plane() {
        Plane::XY => Color::Green,
        Plane::XZ => Color::Blue,
        Plane::YZ => Color::Magenta,
    };
    PanelStyle::new(format!("{} Projection", projection.plane()), u.label(), v.label(), color)
}

/// Display the cloud and its three projections, returning once dismissed
pub fn plot_projections(
    cloud: &PointCloud,
    xy: &Projection,
    xz: &Projection,
    yz: &Projection,
) -> io::Result<()> {
    PlotApp::new(cloud, xy, xz, yz).run()
}
