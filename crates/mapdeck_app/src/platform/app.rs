use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use deck_logging::{deck_debug, deck_info, deck_warn};
use mapdeck_core::{update, AppState, Msg};
use mapdeck_engine::ReqwestBackend;

use super::config::{self, Cli};
use super::effects::EffectRunner;
use super::logging;
use super::ui::input::{self, Input};
use super::ui::render::ConsoleRenderer;

const TICK_INTERVAL: Duration = Duration::from_millis(75);

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();
    // Logging is configured by the file, so a bad file is reported once it is up.
    let (file_config, config_problem) = match config::load(&cli.config) {
        Ok(file_config) => (file_config, None),
        Err(err) => (config::AppConfig::default(), Some(err)),
    };
    let resolved = config::resolve(&cli, file_config).context("invalid configuration")?;

    logging::initialize(resolved.log);
    if let Some(problem) = config_problem {
        deck_warn!("using default configuration: {problem}");
    }
    deck_info!("mapdeck starting; backend {}", resolved.backend.base_url);

    let backend = ReqwestBackend::new(resolved.backend).context("failed to build HTTP client")?;
    let (inbox_tx, inbox_rx) = mpsc::channel::<Input>();
    let runner = EffectRunner::new(Arc::new(backend), inbox_tx.clone())
        .context("failed to start engine")?;

    spawn_stdin_reader(inbox_tx.clone())?;
    spawn_ticker(inbox_tx.clone())?;

    println!("{}", input::HELP);
    let _ = inbox_tx.send(Input::Msg(Msg::Started));
    drop(inbox_tx);

    let mut console = Console {
        state: AppState::default(),
        runner,
        renderer: ConsoleRenderer::default(),
    };
    console.render(true);

    let mut input_closed = false;
    while let Ok(next) = inbox_rx.recv() {
        match next {
            Input::Msg(Msg::Tick) => console.render(false),
            Input::Msg(msg) => console.dispatch(msg),
            Input::Help => println!("{}", input::HELP),
            Input::Invalid(reason) => println!("{reason}"),
            Input::Closed => {
                deck_debug!("stdin closed");
                input_closed = true;
            }
            Input::Quit => break,
        }
        if ready_to_exit(input_closed, &console.state) {
            console.render(false);
            break;
        }
    }

    deck_info!("mapdeck exiting");
    Ok(())
}

struct Console {
    state: AppState,
    runner: EffectRunner,
    renderer: ConsoleRenderer,
}

impl Console {
    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.run(effects);
    }

    fn render(&mut self, force: bool) {
        if !self.state.consume_dirty() && !force {
            return;
        }
        let output = self.renderer.render(&self.state.view());
        if output.is_empty() {
            return;
        }
        let mut stdout = io::stdout().lock();
        let _ = stdout.write_all(output.as_bytes());
        let _ = stdout.flush();
    }
}

/// After end of input the console stays up until the running job finishes.
fn ready_to_exit(input_closed: bool, state: &AppState) -> bool {
    input_closed && state.session().is_idle()
}

fn spawn_stdin_reader(inbox: mpsc::Sender<Input>) -> io::Result<()> {
    thread::Builder::new()
        .name("mapdeck-stdin".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if let Some(parsed) = input::parse(&line) {
                    if inbox.send(parsed).is_err() {
                        return;
                    }
                }
            }
            let _ = inbox.send(Input::Closed);
        })?;
    Ok(())
}

fn spawn_ticker(inbox: mpsc::Sender<Input>) -> io::Result<()> {
    thread::Builder::new()
        .name("mapdeck-tick".to_string())
        .spawn(move || {
            // Ticks throttle rendering.
            while inbox.send(Input::Msg(Msg::Tick)).is_ok() {
                thread::sleep(TICK_INTERVAL);
            }
        })?;
    Ok(())
}
