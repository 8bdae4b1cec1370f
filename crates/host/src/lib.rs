//! Polling host for `nerdbar`.
//!
//! Owns the tokio runtime and wires together all background tasks:
//! - One poll task per widget, each on its own interval
//! - Config file watcher (live reload on change)
//! - Ctrl-C handler (graceful shutdown)
//!
//! Status lines go to stdout; logs go to stderr.

use nerdbar_config::{default_path, load as load_config, ConfigWatcher, PanelConfig};
use nerdbar_core::{Message, PanelError, PanelWidget, Result};
use nerdbar_renderer::{BarLayout, StatusLine};
use nerdbar_theme::Theme;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::{self, MissedTickBehavior};
use tracing::{error, info, warn};

// ── Entry point ───────────────────────────────────────────────────────────────

/// How long in-flight blocking polls get to finish once the panel stops.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

/// Start the panel.  Returns only on Ctrl-C or when stdout goes away.
pub fn run() -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(serve(default_path(), tokio::io::stdout()));
    shutdown(runtime);
    result
}

/// Drop the runtime without waiting on a helper process that never exits.
fn shutdown(runtime: tokio::runtime::Runtime) {
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
}

/// Poll widgets described by the config at `config_path` and write status
/// lines to `out` until shutdown.
pub async fn serve<W>(config_path: PathBuf, mut out: W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let (control_tx, mut control_rx) = mpsc::channel::<Message>(4);
    let _watcher = spawn_config_stream(&config_path, control_tx.clone());
    spawn_shutdown_signal(control_tx);

    write_line(&mut out, &StatusLine::preamble()).await?;

    let config = initial_config(&config_path);
    let mut panel = Panel::start(&config);

    loop {
        tokio::select! {
            Some(msg) = panel.blocks.recv() => {
                if let Message::BlockUpdated { slot, block } = msg {
                    if panel.status.update(slot, block) {
                        let line = panel.status.render().map_err(|e| PanelError::System(e.to_string()))?;
                        write_line(&mut out, &line).await?;
                    }
                }
            }
            msg = control_rx.recv() => match msg {
                Some(Message::ConfigReloaded) => match load_config(&config_path) {
                    Ok(cfg) => {
                        info!("Config reloaded");
                        panel = Panel::start(&cfg);
                    }
                    Err(e) => warn!("Config reload failed: {e}"),
                },
                Some(Message::Shutdown) | None => break,
                Some(Message::BlockUpdated { .. }) => {}
            },
        }
    }

    info!("Shutting down");
    Ok(())
}

// ── Panel ─────────────────────────────────────────────────────────────────────

/// Running widgets for one config generation.
///
/// Dropping it aborts every poll task; blocks still queued from a previous
/// generation are discarded with their channel.
struct Panel {
    status: StatusLine,
    blocks: mpsc::Receiver<Message>,
    _tasks: JoinSet<()>,
}

impl Panel {
    fn start(config: &PanelConfig) -> Self {
        let layout = BarLayout::from_config(config);
        let theme = Theme::from_config(&config.theme);
        let (tx, blocks) = mpsc::channel(32);
        let mut tasks = JoinSet::new();

        for (slot, kind) in layout.slots.iter().enumerate() {
            match nerdbar_widgets::build(kind, config, &theme) {
                Some(widget) => {
                    tasks.spawn(poll_loop(slot, widget, tx.clone()));
                }
                None => warn!("Unknown widget '{kind}' skipped"),
            }
        }
        info!("Started {} widget(s)", tasks.len());

        Self {
            status: StatusLine::new(&layout),
            blocks,
            _tasks: tasks,
        }
    }
}

/// Poll `widget` every `widget.interval()` and forward its blocks.
///
/// Each poll runs on the blocking pool: sysfs reads and helper processes
/// must not stall the executor.  The widget is moved there and back, so
/// polls of one widget never overlap.  A slow poll delays the next tick
/// instead of queueing a burst.
async fn poll_loop(slot: usize, mut widget: Box<dyn PanelWidget>, tx: mpsc::Sender<Message>) {
    let id = widget.id().to_string();
    let mut ticker = time::interval(widget.interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let polled = tokio::task::spawn_blocking(move || {
            let block = widget.poll();
            (widget, block)
        })
        .await;

        let block = match polled {
            Ok((w, block)) => {
                widget = w;
                block
            }
            Err(e) => {
                error!("{id} poll task failed: {e}");
                return;
            }
        };

        if tx.send(Message::BlockUpdated { slot, block }).await.is_err() {
            break; // panel restarted or shutting down
        }
    }
}

// ── Background streams ────────────────────────────────────────────────────────

/// Watches the config file and sends `ConfigReloaded` on every change.
fn spawn_config_stream(path: &Path, tx: mpsc::Sender<Message>) -> ConfigWatcher {
    let (watcher, mut rx) = ConfigWatcher::spawn(path);

    tokio::spawn(async move {
        while rx.recv().await.is_some() {
            if tx.send(Message::ConfigReloaded).await.is_err() {
                break;
            }
        }
    });

    watcher
}

fn spawn_shutdown_signal(tx: mpsc::Sender<Message>) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                let _ = tx.send(Message::Shutdown).await;
            }
            Err(e) => error!("Cannot listen for Ctrl-C: {e}"),
        }
    });
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Startup never fails on config: a broken file falls back to defaults.
fn initial_config(path: &Path) -> PanelConfig {
    load_config(path).unwrap_or_else(|e| {
        warn!("{e}; using defaults");
        PanelConfig::default()
    })
}

async fn write_line<W: AsyncWrite + Unpin>(out: &mut W, line: &str) -> Result<()> {
    out.write_all(line.as_bytes()).await?;
    out.write_all(b"\n").await?;
    out.flush().await?;
    Ok(())
}
