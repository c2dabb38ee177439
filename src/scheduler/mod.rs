//! Refresh scheduling for the almanac menu.

mod handle;
mod state;

pub use handle::{RefreshHandle, RefreshTrigger};
pub use state::RefreshState;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::menu::parse_menu;
use crate::presenter::MenuPresenter;
use crate::runner::run_script;
use crate::script::{locate_script, parse_refresh_interval, ScriptHandle};
use crate::types::RefreshError;

/// Why a refresh was started; logged with each attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshReason {
    Scheduled,
    Wake,
    Manual,
}

enum LoopEvent {
    Tick,
    Trigger(RefreshTrigger),
    Closed,
}

/// Drives the whole refresh pipeline on every tick or trigger, from
/// locating the script through presenting the parsed menu.
///
/// Refreshes run to completion inside the scheduler loop, so two
/// invocations can never overlap; triggers arriving in the meantime
/// wait in the single-slot channel or are dropped.
pub struct RefreshScheduler {
    config: Config,
    presenter: Arc<dyn MenuPresenter>,
    state: RefreshState,
    triggers: mpsc::Receiver<RefreshTrigger>,
}

impl RefreshScheduler {
    /// Build a scheduler and the trigger handle for the UI
    /// collaborator. The scheduler stops once every handle is dropped.
    pub fn new(config: Config, presenter: Arc<dyn MenuPresenter>) -> (Self, RefreshHandle) {
        let (tx, rx) = mpsc::channel(1);
        let scheduler = Self {
            config,
            presenter,
            state: RefreshState::default(),
            triggers: rx,
        };
        (scheduler, RefreshHandle::new(tx))
    }

    /// Resolve the script, derive its interval and loop forever.
    ///
    /// The first timer tick fires immediately, which doubles as the
    /// initial load. Returns an error when no script can be found at
    /// startup, or cleanly when every trigger handle is gone.
    pub async fn run(mut self) -> Result<(), RefreshError> {
        let scripts_dir = self.config.scripts_dir_path()?;
        let script = locate_script(&scripts_dir, &self.config.script_extension).await?;
        let interval = parse_refresh_interval(&script.file_name);
        info!(
            script = %script.file_name,
            interval_secs = interval.as_secs(),
            "Almanac script scheduled"
        );

        let mut ticker = time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            let event = tokio::select! {
                _ = ticker.tick() => LoopEvent::Tick,
                trigger = self.triggers.recv() => match trigger {
                    Some(trigger) => LoopEvent::Trigger(trigger),
                    None => LoopEvent::Closed,
                },
            };

            match event {
                LoopEvent::Tick => self.refresh(&script, RefreshReason::Scheduled).await,
                LoopEvent::Trigger(RefreshTrigger::Wake) => {
                    self.refresh_on_wake(&script, interval).await;
                }
                LoopEvent::Trigger(RefreshTrigger::Manual) => self.refresh_manual().await,
                LoopEvent::Closed => {
                    info!("Trigger channel closed; stopping scheduler");
                    return Ok(());
                }
            }
        }
    }

    /// Wake events refresh only when the configured interval has fully
    /// elapsed since the last successful refresh.
    async fn refresh_on_wake(&mut self, script: &ScriptHandle, interval: Duration) {
        if !self.state.wake_due(interval) {
            debug!("Wake-triggered check skipped; interval has not elapsed");
            return;
        }
        self.refresh(script, RefreshReason::Wake).await;
    }

    /// Unconditional refresh that re-resolves the script path first, so
    /// a swapped-out script file is picked up without a restart.
    pub async fn refresh_manual(&mut self) {
        let scripts_dir = match self.config.scripts_dir_path() {
            Ok(dir) => dir,
            Err(err) => {
                self.fail(err).await;
                return;
            }
        };
        match locate_script(&scripts_dir, &self.config.script_extension).await {
            Ok(script) => self.refresh(&script, RefreshReason::Manual).await,
            Err(err) => self.fail(err).await,
        }
    }

    async fn refresh(&mut self, script: &ScriptHandle, reason: RefreshReason) {
        info!(reason = ?reason, script = %script.file_name, "Refreshing almanac menu");
        match run_script(&self.config, &script.path).await {
            Ok(output) => {
                if !output.stderr.is_empty() {
                    warn!(stderr = %output.stderr, "Almanac script wrote to stderr");
                }
                debug!(stdout = %output.stdout, "Almanac script output");
                let menu = parse_menu(&output.stdout);
                if menu.is_empty() {
                    warn!("Almanac script produced no usable menu content");
                }
                self.presenter.present(&menu).await;
                self.state.mark_success();
            }
            Err(err) => self.fail(err).await,
        }
    }

    /// Failed refreshes keep the previously presented menu; the
    /// presenter is told how stale it has become.
    async fn fail(&mut self, err: RefreshError) {
        let failures = self.state.mark_failure();
        warn!(
            error = ?err,
            consecutive_failures = failures,
            "Refresh failed; keeping previous menu"
        );
        self.presenter.present_stale(failures, &err).await;
    }
}
