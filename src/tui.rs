// src/tui.rs
//! Terminal lifecycle and the event loop.

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{Event, EventStream};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use futures::{Stream, StreamExt};
use ratatui::backend::Backend;
use ratatui::prelude::*;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::api::ApiClient;
use crate::app::{App, BackendEvent, Job};
use crate::config::AppConfig;
use crate::error::Result;
use crate::ui;

/// Redraw interval while nothing else happens.
const TICK: Duration = Duration::from_millis(100);

type Term = Terminal<CrosstermBackend<Stdout>>;

fn setup() -> Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore(terminal: &mut Term) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

pub async fn run(config: &AppConfig) -> Result<()> {
    let client = ApiClient::new(config)?;
    let mut app = App::new(config);
    let (tx, rx) = mpsc::unbounded_channel();

    let mut terminal = setup()?;
    let outcome = event_loop(&mut terminal, &mut app, &client, EventStream::new(), tx, rx).await;
    // restore even when the loop failed
    restore(&mut terminal)?;
    outcome
}

async fn event_loop<B, S>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    client: &ApiClient,
    mut events: S,
    tx: UnboundedSender<BackendEvent>,
    mut rx: UnboundedReceiver<BackendEvent>,
) -> Result<()>
where
    B: Backend,
    S: Stream<Item = io::Result<Event>> + Unpin,
{
    tracing::info!(backend = %client.base_url(), "tui started");
    let mut tick = tokio::time::interval(TICK);
    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, app))?;

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) => {
                    if let Some(job) = app.handle_key(key) {
                        spawn_job(job, client, &tx);
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            Some(done) = rx.recv() => app.apply(done),
            _ = tick.tick() => {}
        }
    }
    tracing::info!("tui stopped");
    Ok(())
}

fn spawn_job(job: Job, client: &ApiClient, tx: &UnboundedSender<BackendEvent>) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let done = job.run(client).await;
        // the receiver is gone once the UI has quit
        let _ = tx.send(done);
    });
}
