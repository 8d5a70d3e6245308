//! A terminal whale counter: press a key, get a whale. Optionally asks a
//! calendar server about your commits every time you do.

/// The "functional core" to the main module's "imperative shell"
mod app;

/// Configuration and argument parsing
mod config;

use app::{App, EffectContext};
use clap::Parser;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use std::{io, process::ExitCode, sync::Arc};
use tokio::{
    sync::mpsc::{unbounded_channel, UnboundedSender},
    task::JoinHandle,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> io::Result<ExitCode> {
    let config = config::Config::parse();

    // The terminal belongs to ratatui while we run, so logs go to a file.
    let log_dir = config.log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let (log_writer, _log_guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(&log_dir, "whales.log"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(log_writer)
                .with_ansi(false),
        )
        .init();

    let mut terminal = ratatui::init();
    terminal.clear()?;
    let res = run(terminal, &config).await;
    ratatui::restore();
    res
}

/// Manage the lifecycle of the app
async fn run(mut terminal: DefaultTerminal, config: &config::Config) -> io::Result<ExitCode> {
    let mut app = App::new(config).map_err(io::Error::other)?;
    let ctx = Arc::new(EffectContext::new());

    // Side-effectful behaviors (the calendar query) run on spawned tasks and
    // report back over this channel. We keep track of outstanding effects so
    // we can exit cleanly.
    let (effect_tx, mut effect_rx) = unbounded_channel();
    let mut outstanding_effects: Vec<JoinHandle<()>> = Vec::with_capacity(1);

    terminal.draw(|frame| app.render(frame))?;

    let mut event_stream = EventStream::new();

    // Start our event loop!
    loop {
        // First thing we do is wait for an event: either external input or
        // the async result of an effect. This is an `Option<_>` because not
        // every terminal event needs handling.
        let next_action_opt = tokio::select! {
            event_opt = event_stream.next() => {
                match event_opt {
                    Some(Ok(Event::Key(key_event))) => {
                        Some(app::Action::Key(key_event))
                    }
                    Some(Err(err)) => {
                        Some(app::Action::Problem(err.to_string()))
                    }
                    _ => None,
                }
            },

            action_opt = effect_rx.recv() => action_opt,
        };

        // Once we have an action, we send it to `app.handle` to get any next
        // effects, each of which runs on its own task.
        if let Some(action) = next_action_opt {
            for effect in app.handle(action) {
                outstanding_effects.push(spawn_effect_task(
                    effect_tx.clone(),
                    Arc::clone(&ctx),
                    effect,
                ));
            }
        }

        // Now that we've handled the event, re-render to display any changes
        // the app cares about.
        terminal.draw(|frame| app.render(frame))?;

        // Completed effect tasks drop out of the tracking list on every pass,
        // so it never grows past the handful of queries in flight.
        outstanding_effects.retain(|handle| !handle.is_finished());

        // Finally, if the app indicates that it should exit, wait for any
        // outstanding effects to finish before leaving the loop with the exit
        // code from the app.
        if let Some(code) = app.should_exit() {
            for effect in outstanding_effects.drain(..) {
                let _ = effect.await;
            }

            return Ok(code);
        }
    }
}

/// Spawn a task to run an effect and send the resulting action back to the
/// app. Nothing blocks on the task; the channel is the observable part.
fn spawn_effect_task(
    effect_tx: UnboundedSender<app::Action>,
    ctx: Arc<EffectContext>,
    effect: app::Effect,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Some(action) = effect.run(&ctx).await {
            // A closed channel means we're shutting down, and dropping the
            // action is fine then.
            let _ = effect_tx.send(action);
        }
    })
}
