use clap::Parser;
use crossterm::event::{self, Event, KeyEvent};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::{Frame, Terminal};
use spacescope::cache::SizeCache;
use spacescope::config::{Args, Config};
use spacescope::input::{intent_for_key, Intent};
use spacescope::loader::{LoadController, LoadState};
use spacescope::nav::{DrillRequest, NavigationState};
use spacescope::scanner::Scanner;
use spacescope::{launcher, ui};
use std::io::{self, stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

const SPINNER_INTERVAL: Duration = Duration::from_millis(100);

struct App {
    loader: LoadController,
    nav: Option<NavigationState>,
    show_files: bool,
    viewport_height: usize,
    status: Option<String>,
    spinner_index: usize,
    last_spinner_tick: Instant,
    should_quit: bool,
}

impl App {
    fn new(config: Config, viewport_height: usize) -> Self {
        let scanner = Arc::new(Scanner::new(Arc::new(SizeCache::new())));
        let mut loader = LoadController::new(scanner, config.show_files);
        loader.request(config.root);

        Self {
            loader,
            nav: None,
            show_files: config.show_files,
            viewport_height,
            status: None,
            spinner_index: 0,
            last_spinner_tick: Instant::now(),
            should_quit: false,
        }
    }

    fn tick_spinner(&mut self) {
        if self.loader.is_loading() && self.last_spinner_tick.elapsed() >= SPINNER_INTERVAL {
            self.spinner_index = (self.spinner_index + 1) % ui::SPINNER_FRAMES.len();
            self.last_spinner_tick = Instant::now();
        }
    }

    fn poll_loader(&mut self) {
        if let Some(root) = self.loader.poll() {
            match self.nav.as_mut() {
                Some(nav) => nav.apply_load_result(root),
                None => {
                    self.nav = Some(NavigationState::new(
                        root,
                        self.viewport_height,
                        self.show_files,
                    ));
                }
            }
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        let Some(intent) = intent_for_key(key) else {
            return;
        };

        if intent == Intent::Quit {
            self.should_quit = true;
            return;
        }

        // A load in flight swallows everything except quit.
        if self.loader.is_loading() {
            return;
        }

        self.status = None;
        let Some(nav) = self.nav.as_mut() else {
            return;
        };

        match intent {
            Intent::Up => nav.move_cursor(-1),
            Intent::Down => nav.move_cursor(1),
            Intent::Home => nav.move_to_start(),
            Intent::End => nav.move_to_end(),
            Intent::PageUp => nav.page_move(-1),
            Intent::PageDown => nav.page_move(1),
            Intent::Select => {
                let request = nav.select();
                self.handle_drill(request);
            }
            Intent::Back => {
                let request = nav.drill_up();
                self.handle_drill(request);
            }
            Intent::Quit => {}
        }
    }

    fn handle_drill(&mut self, request: Option<DrillRequest>) {
        match request {
            Some(DrillRequest::Load(path)) => self.loader.request(path),
            Some(DrillRequest::Launch(path)) => {
                self.status = Some(match launcher::launch(&path) {
                    Ok(()) => format!("Opened {}", path.display()),
                    Err(err) => err.to_string(),
                });
            }
            None => {}
        }
    }

    fn on_resize(&mut self, height: usize) {
        self.viewport_height = height;
        if let Some(nav) = self.nav.as_mut() {
            nav.resize(height);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        match self.loader.state() {
            LoadState::Loading(path) => ui::draw_loading(frame, path, self.spinner_index),
            LoadState::Failed(err) => ui::draw_error(frame, err),
            LoadState::Idle => {
                if let Some(nav) = self.nav.as_ref() {
                    ui::draw_browser(frame, nav, self.status.as_deref());
                }
            }
        }
    }
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        app.tick_spinner();
        app.poll_loader();

        terminal.draw(|frame| app.draw(frame))?;

        if app.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => app.on_key(key),
                Event::Resize(_, height) => app.on_resize(height as usize),
                Event::Mouse(_) => {}
                Event::FocusGained | Event::FocusLost | Event::Paste(_) => {}
            }
        }
    }

    Ok(())
}

fn print_integration_command() {
    let exe = match std::env::current_exe() {
        Ok(path) => path,
        Err(err) => {
            eprintln!("Error getting executable path: {}", err);
            return;
        }
    };
    let bin_dir = match exe.parent() {
        Some(dir) => dir.display().to_string(),
        None => return,
    };

    println!("To add this application to your PATH, run the following command:\n");
    println!("export PATH=\"{}:$PATH\"\n", bin_dir);
    println!("To make this permanent, add the above line to your shell profile:");
    println!("  ~/.bashrc (for bash)");
    println!("  ~/.zshrc (for zsh)");
    println!("  ~/.profile (for general use)\n");
    println!("Example:");
    println!("echo 'export PATH=\"{}:$PATH\"' >> ~/.bashrc", bin_dir);
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    if args.integrate {
        print_integration_command();
        return Ok(());
    }

    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };

    enable_raw_mode()?;
    crossterm::execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let height = terminal.size()?.height as usize;
    let mut app = App::new(config, height);
    let app_result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app_result
}
