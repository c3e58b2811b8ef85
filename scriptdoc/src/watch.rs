//! Regenerate the documentation when a script changes.
//!
//! The notify callback only forwards a unit message; the regeneration loop
//! owns the throttle and runs one [`crate::generate`] at a time.

use crate::scan::SCRIPT_EXTENSION;
use crate::{GenerateOptions, Report, Result};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

/// Minimum spacing between two regenerations.
#[derive(Debug, Clone)]
pub struct Throttle {
    min_interval: Duration,
    last_run: Option<Instant>,
}

impl Throttle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_run: None,
        }
    }

    /// Time left before another run is allowed, `None` if it may run now.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        let elapsed = now.saturating_duration_since(self.last_run?);
        self.min_interval.checked_sub(elapsed).filter(|d| !d.is_zero())
    }

    pub fn record(&mut self, now: Instant) {
        self.last_run = Some(now);
    }
}

/// Should this event trigger a regeneration?
pub fn is_script_event(event: &notify::Event) -> bool {
    matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) && event
        .paths
        .iter()
        .any(|p| p.extension().and_then(|e| e.to_str()) == Some(SCRIPT_EXTENSION))
}

/// Watch `input` recursively, sending a message for every script change.
/// **The watcher stops when dropped, so hang onto the return value.**
pub fn watch(input: &Path, changes: mpsc::UnboundedSender<()>) -> notify::Result<RecommendedWatcher> {
    let on_event = move |result: notify::Result<notify::Event>| match result {
        Ok(event) if is_script_event(&event) => {
            debug!(paths = ?event.paths, "script changed");
            // Receiver gone means the server is shutting down
            let _ = changes.send(());
        }
        Ok(_) => {}
        Err(err) => error!(error = %err, "error watching scripts"),
    };

    let mut watcher = notify::recommended_watcher(on_event)?;
    watcher.watch(input, RecursiveMode::Recursive)?;
    info!(path = %input.display(), "watching scripts for changes");
    Ok(watcher)
}

/// Regenerate once per burst of change messages, never more often than
/// `min_interval`. Returns when the sending side is dropped.
pub async fn regenerate_loop(
    changes: mpsc::UnboundedReceiver<()>,
    options: GenerateOptions,
    min_interval: Duration,
) {
    throttled(changes, min_interval, move || crate::generate(&options)).await
}

async fn throttled<F>(
    mut changes: mpsc::UnboundedReceiver<()>,
    min_interval: Duration,
    regenerate: F,
) where
    F: Fn() -> Result<Report> + Send + Sync + 'static,
{
    let regenerate = Arc::new(regenerate);
    let mut throttle = Throttle::new(min_interval);

    while changes.recv().await.is_some() {
        if let Some(wait) = throttle.remaining(Instant::now()) {
            tokio::time::sleep(wait).await;
        }
        // Everything queued up to here is covered by this run
        while changes.try_recv().is_ok() {}
        throttle.record(Instant::now());

        info!("change detected, regenerating documentation");
        let run = Arc::clone(&regenerate);
        match tokio::task::spawn_blocking(move || run()).await {
            Ok(Ok(report)) => info!(scripts = report.scripts.len(), "documentation regenerated"),
            Ok(Err(e)) => error!(error = %e, "documentation regeneration failed"),
            Err(e) => error!(error = %e, "regeneration task failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderOptions;
    use notify::event::{AccessKind, CreateKind, ModifyKind};
    use std::fs;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    fn counting(runs: &Arc<AtomicUsize>) -> impl Fn() -> Result<Report> + Send + Sync + 'static {
        let runs = Arc::clone(runs);
        move || {
            runs.fetch_add(1, Ordering::SeqCst);
            Ok(Report {
                scripts: Vec::new(),
                files: Vec::new(),
            })
        }
    }

    #[test]
    fn first_run_is_immediate() {
        let throttle = Throttle::new(Duration::from_secs(2));
        assert_eq!(throttle.remaining(Instant::now()), None);
    }

    #[test]
    fn runs_are_spaced() {
        let mut throttle = Throttle::new(Duration::from_secs(2));
        let start = Instant::now();
        throttle.record(start);

        assert_eq!(
            throttle.remaining(start + Duration::from_millis(500)),
            Some(Duration::from_millis(1500))
        );
        assert_eq!(throttle.remaining(start + Duration::from_secs(2)), None);
        assert_eq!(throttle.remaining(start + Duration::from_secs(5)), None);
    }

    #[test]
    fn script_events_only() {
        let modify = notify::Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(PathBuf::from("/src/Python/install.sh"));
        assert!(is_script_event(&modify));

        let create = notify::Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("/src/new.sh"));
        assert!(is_script_event(&create));

        let other_file = notify::Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(PathBuf::from("/src/README.md"));
        assert!(!is_script_event(&other_file));

        let access = notify::Event::new(EventKind::Access(AccessKind::Any))
            .add_path(PathBuf::from("/src/install.sh"));
        assert!(!is_script_event(&access));
    }

    #[tokio::test]
    async fn change_regenerates_output() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in");
        let output = dir.path().join("out");
        fs::create_dir_all(&input).unwrap();
        fs::write(input.join("tool.sh"), "# @doc\n# @name: Tool\n# @/doc\n").unwrap();

        let (tx, rx) = mpsc::unbounded_channel();
        for _ in 0..3 {
            tx.send(()).unwrap();
        }
        drop(tx);

        let options = GenerateOptions {
            input,
            output: output.clone(),
            render: RenderOptions::default(),
        };
        regenerate_loop(rx, options, Duration::from_millis(10)).await;

        let components = fs::read_to_string(output.join("components.md")).unwrap();
        assert!(components.contains("### Tool"));
    }

    #[tokio::test]
    async fn queued_burst_is_one_run() {
        let runs = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = mpsc::unbounded_channel();
        for _ in 0..3 {
            tx.send(()).unwrap();
        }
        drop(tx);

        throttled(rx, Duration::from_millis(10), counting(&runs)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn changes_during_a_run_trigger_one_more() {
        let runs = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(throttled(rx, Duration::from_millis(20), counting(&runs)));

        tx.send(()).unwrap();
        while runs.load(Ordering::SeqCst) == 0 {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        // Both land inside the throttle window and collapse into one run
        tx.send(()).unwrap();
        tx.send(()).unwrap();
        drop(tx);

        task.await.unwrap();
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }
}
