mod canvas;

use anyhow::{Context as _, Result, bail};
use canvas::{CELL_HEIGHT, CELL_WIDTH, CanvasSurface, cell_to_pixel};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use mindmap_config::Config;
use mindmap_engine::{DiagramRef, Host, LayoutStrategy, PlainTextNotes, io, layout::Point};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, canvas::Canvas},
};
use std::{
    env,
    io::{Stdout, stdout},
    path::PathBuf,
    process,
};

/// Surface size used for `--svg` exports.
const EXPORT_WIDTH: f64 = 1200.0;
const EXPORT_HEIGHT: f64 = 800.0;
/// Pan distance of one arrow key press, in pixels.
const PAN_STEP: f64 = 40.0;
/// Note panel width change of one `[` / `]` press, in pixels.
const NOTE_WIDTH_STEP: u32 = 40;

const USAGE: &str = "Usage: mindmap-cli <FILE> [--layout outline|radial|curve] [--svg OUT] [--block N]";

#[derive(Debug, PartialEq)]
struct Args {
    file: PathBuf,
    layout: Option<LayoutStrategy>,
    svg: Option<PathBuf>,
    /// 1-based index of the mind map block to show.
    block: usize,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut file = None;
    let mut layout = None;
    let mut svg = None;
    let mut block = 1;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--layout" => {
                let value = iter.next().context("--layout needs a value")?;
                layout = Some(value.parse::<LayoutStrategy>()?);
            }
            "--svg" => {
                let value = iter.next().context("--svg needs an output path")?;
                svg = Some(PathBuf::from(value));
            }
            "--block" => {
                let value = iter.next().context("--block needs a number")?;
                block = value
                    .parse::<usize>()
                    .ok()
                    .filter(|&n| n > 0)
                    .with_context(|| format!("invalid block number: {value}"))?;
            }
            flag if flag.starts_with("--") => bail!("unknown option: {flag}"),
            path if file.is_none() => file = Some(PathBuf::from(path)),
            extra => bail!("unexpected argument: {extra}"),
        }
    }

    Ok(Args {
        file: file.context("no input file given")?,
        layout,
        svg,
        block,
    })
}

struct App {
    host: Host,
    config: Config,
    diagram: DiagramRef,
    export_name: String,
    /// Transient message shown in the status line until the next key.
    status: Option<String>,
    /// Top-left cell of the diagram canvas, for mouse mapping.
    canvas_origin: (u16, u16),
    press: Option<Point>,
    moved: bool,
}

impl App {
    fn new(host: Host, config: Config, diagram: DiagramRef, export_name: String) -> Self {
        diagram.borrow_mut().set_note_renderer(PlainTextNotes);
        Self {
            host,
            config,
            diagram,
            export_name,
            status: None,
            canvas_origin: (0, 0),
            press: None,
            moved: false,
        }
    }

    /// Returns false when the app should quit.
    fn on_key(&mut self, key: KeyEvent) -> bool {
        self.status = None;
        let mut d = self.diagram.borrow_mut();
        match key.code {
            KeyCode::Char('q') => return false,
            KeyCode::Char('+') | KeyCode::Char('=') => d.zoom_in(),
            KeyCode::Char('-') => d.zoom_out(),
            KeyCode::Left => d.pan_by(PAN_STEP, 0.0),
            KeyCode::Right => d.pan_by(-PAN_STEP, 0.0),
            KeyCode::Up => d.pan_by(0.0, PAN_STEP),
            KeyCode::Down => d.pan_by(0.0, -PAN_STEP),
            KeyCode::Char('r') => d.reset_view(),
            KeyCode::Char('e') => d.expand_all(),
            KeyCode::Char('c') => d.collapse_all(),
            KeyCode::Char('l') => {
                let strategy = d.cycle_strategy();
                self.status = Some(format!("Layout: {strategy}"));
            }
            KeyCode::Tab => d.select_next(),
            KeyCode::BackTab => d.select_prev(),
            KeyCode::Enter => {
                if let Some(id) = d.selected().cloned() {
                    d.toggle(&id);
                }
            }
            KeyCode::Char('n') => {
                if d.note_panel().is_some() {
                    d.close_note();
                } else if let Some(id) = d.selected().cloned() {
                    if d.open_note(&id).is_none() {
                        self.status = Some("No note on this node".to_string());
                    }
                } else {
                    self.status = Some("Select a node with Tab first".to_string());
                }
            }
            KeyCode::Char('[') => {
                drop(d);
                self.change_note_width(false);
            }
            KeyCode::Char(']') => {
                drop(d);
                self.change_note_width(true);
            }
            KeyCode::Char('s') => {
                drop(d);
                self.export();
            }
            _ => {}
        }
        true
    }

    fn change_note_width(&mut self, wider: bool) {
        let current = self.host.settings().note_panel_width;
        let width = if wider {
            current.saturating_add(NOTE_WIDTH_STEP)
        } else {
            current.saturating_sub(NOTE_WIDTH_STEP)
        };
        self.host.set_note_panel_width(width);
        self.config.note_panel_width = self.host.settings().note_panel_width;
        if let Err(e) = self.config.save() {
            self.status = Some(format!("Could not save config: {e}"));
        }
    }

    fn export(&mut self) {
        let path = self.config.export_path(&self.export_name);
        self.status = Some(match io::export_svg(&self.diagram.borrow(), &path) {
            Ok(()) => format!("Exported {}", path.display()),
            Err(e) => format!("Export failed: {e}"),
        });
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        let at = cell_to_pixel(mouse.column, mouse.row, self.canvas_origin);
        let mut d = self.diagram.borrow_mut();
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.press = Some(at);
                self.moved = false;
                d.begin_drag(at);
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.moved = true;
                d.drag_to(at);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                d.end_drag();
                if let Some(press) = self.press.take()
                    && !self.moved
                {
                    d.click(press);
                }
            }
            MouseEventKind::ScrollUp => {
                d.wheel(-1.0, at);
            }
            MouseEventKind::ScrollDown => {
                d.wheel(1.0, at);
            }
            _ => {}
        }
    }
}

/// The TUI owns the terminal, so anything written to stderr would land on the
/// alternate screen. Problems there are reported in the status line instead.
fn log_level(args: &Args) -> log::LevelFilter {
    if args.svg.is_some() {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Off
    }
}

fn init_logging(level: log::LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };

    init_logging(log_level(&args));

    let config = match Config::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("Warning: {e}; using default settings");
            Config::default()
        }
    };
    let mut settings = config.to_settings();
    if let Some(layout) = args.layout {
        settings.default_layout = layout;
    }

    let sources = io::load_sources(&args.file)?;
    let Some(source) = sources.get(args.block - 1) else {
        bail!(
            "{} has {} mindmap block(s), block {} requested",
            args.file.display(),
            sources.len(),
            args.block
        );
    };
    let mut host = Host::new(settings);

    if let Some(out) = &args.svg {
        let diagram = host.open(source, EXPORT_WIDTH, EXPORT_HEIGHT);
        io::export_svg(&diagram.borrow(), out)?;
        return Ok(());
    }

    // Setup terminal
    let (columns, rows) = crossterm::terminal::size()?;
    let diagram = host.open(
        source,
        f64::from(columns) * CELL_WIDTH,
        f64::from(rows.saturating_sub(1)) * CELL_HEIGHT,
    );
    let export_name = args
        .file
        .file_stem()
        .map(|stem| format!("{}.svg", stem.to_string_lossy()))
        .unwrap_or_else(|| "mindmap.svg".to_string());
    let mut app = App::new(host, config, diagram, export_name);

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        match event::read()? {
            Event::Key(key) => {
                if !app.on_key(key) {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => app.on_mouse(mouse),
            _ => {}
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(f.area());

    let note_columns = app
        .diagram
        .borrow()
        .note_panel()
        .map(|panel| (f64::from(panel.width) / CELL_WIDTH) as u16 + 2);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(note_columns.unwrap_or(0))].as_ref())
        .split(rows[0]);

    draw_diagram(f, app, columns[0]);
    draw_note(f, app, columns[1]);
    draw_status(f, app, rows[1]);
}

fn draw_diagram(f: &mut Frame, app: &mut App, area: Rect) {
    app.canvas_origin = (area.x, area.y);
    let width = f64::from(area.width) * CELL_WIDTH;
    let height = f64::from(area.height) * CELL_HEIGHT;

    let mut d = app.diagram.borrow_mut();
    d.resize(width, height);
    let mut surface = CanvasSurface::new(height);
    d.draw(&mut surface);

    let canvas = Canvas::default()
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| surface.paint(ctx));
    f.render_widget(canvas, area);
}

fn draw_note(f: &mut Frame, app: &App, area: Rect) {
    let d = app.diagram.borrow();
    let Some(panel) = d.note_panel() else {
        return;
    };
    let lines: Vec<Line> = panel.body.lines().map(Line::from).collect();
    let note = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(panel.title.as_str()),
    );
    f.render_widget(note, area);
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let d = app.diagram.borrow();
    let text = match &app.status {
        Some(message) => Span::styled(message.clone(), Style::default().fg(Color::Yellow)),
        None => Span::raw(format!(
            "{} {:.0}% | q quit  +/- zoom  r reset  e/c expand/collapse  l layout  Tab select  Enter toggle  n note  [/] note width  s export",
            d.strategy(),
            d.transform().scale * 100.0
        )),
    };
    f.render_widget(Paragraph::new(Line::from(text)), area);
}
