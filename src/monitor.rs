//! The poll loop: fetch, validate, format, notify, sleep.
//!
//! [`Monitor`] owns the cursor and the two dedup strings in [`MonitorState`].
//! A status or error message is only handed to the notifier when it differs
//! from the last one of its kind, and errors never move the cursor.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::error::CycleError;
use crate::format::parse_status;
use crate::practicum::StatusSource;
use crate::telegram::Notifier;
use crate::validate::{check_response, next_cursor};

pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(600);

/// Everything the monitor remembers between cycles. Lives for the process
/// lifetime only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonitorState {
    /// Lower bound (epoch seconds) sent as `from_date` on the next request.
    pub cursor: i64,
    /// Last status message handed to the notifier.
    pub last_status: Option<String>,
    /// Last error message handed to the notifier.
    pub last_error: Option<String>,
}

impl MonitorState {
    pub fn starting_at(cursor: i64) -> Self {
        Self {
            cursor,
            ..Default::default()
        }
    }
}

/// What a single cycle ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A new status message was handed to the notifier.
    Notified { message: String, delivered: bool },
    /// The status message matched the last one sent.
    Unchanged,
    /// A new error message was handed to the notifier.
    ErrorNotified { error: CycleError, delivered: bool },
    /// The error message matched the last one sent.
    ErrorSuppressed(CycleError),
    /// An empty homework list while empty results are not reported.
    Quiet,
}

/// Drives the poll cycle: fetch, validate, format, notify, sleep.
pub struct Monitor<S, N> {
    source: S,
    notifier: N,
    chat_id: i64,
    retry_interval: Duration,
    report_empty: bool,
    state: MonitorState,
}

impl<S: StatusSource, N: Notifier> Monitor<S, N> {
    /// Create a monitor whose first request asks for changes since `cursor`.
    pub fn new(source: S, notifier: N, chat_id: i64, cursor: i64) -> Self {
        Self {
            source,
            notifier,
            chat_id,
            retry_interval: DEFAULT_RETRY_INTERVAL,
            report_empty: true,
            state: MonitorState::starting_at(cursor),
        }
    }

    pub fn with_retry_interval(mut self, retry_interval: Duration) -> Self {
        self.retry_interval = retry_interval;
        self
    }

    /// When false, an empty homework list is logged and never sent.
    pub fn with_report_empty(mut self, report_empty: bool) -> Self {
        self.report_empty = report_empty;
        self
    }

    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    /// Run cycles until `shutdown` resolves.
    ///
    /// Shutdown is only observed while sleeping between cycles; a cycle that
    /// has started always runs to completion.
    pub async fn run(&mut self, shutdown: impl Future<Output = ()>) {
        info!(
            cursor = self.state.cursor,
            interval_secs = self.retry_interval.as_secs(),
            "starting poll loop"
        );
        tokio::pin!(shutdown);

        loop {
            let outcome = self.run_cycle().await;
            debug!(?outcome, cursor = self.state.cursor, "cycle finished");

            tokio::select! {
                _ = &mut shutdown => {
                    info!("shutdown requested, leaving poll loop");
                    return;
                }
                _ = sleep(self.retry_interval) => {}
            }
        }
    }

    /// Perform exactly one cycle, updating cursor and dedup state.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self.poll().await {
            Ok((message, cursor)) => {
                // Only a fully successful cycle moves the cursor.
                if let Some(cursor) = cursor {
                    self.state.cursor = cursor;
                }
                self.report_status(message).await
            }
            Err(err) if err.is_benign() && !self.report_empty => {
                debug!("no new homework");
                CycleOutcome::Quiet
            }
            Err(err) => self.report_error(err).await,
        }
    }

    async fn poll(&self) -> Result<(String, Option<i64>), CycleError> {
        let response = self.source.fetch(self.state.cursor).await?;
        let item = check_response(&response)?;
        let message = parse_status(item)?;
        Ok((message, next_cursor(&response)))
    }

    async fn report_status(&mut self, message: String) -> CycleOutcome {
        if self.state.last_status.as_deref() == Some(message.as_str()) {
            debug!("status unchanged");
            return CycleOutcome::Unchanged;
        }
        let delivered = self.deliver(&message).await;
        // The watermark moves even if delivery failed.
        self.state.last_status = Some(message.clone());
        CycleOutcome::Notified { message, delivered }
    }

    async fn report_error(&mut self, err: CycleError) -> CycleOutcome {
        let text = err.to_string();
        if err.is_benign() {
            info!(error = %text, "cycle produced no status");
        } else {
            error!(error = %text, "poll cycle failed");
        }

        if self.state.last_error.as_deref() == Some(text.as_str()) {
            debug!("same error already reported");
            return CycleOutcome::ErrorSuppressed(err);
        }
        let delivered = self.deliver(&text).await;
        self.state.last_error = Some(text);
        CycleOutcome::ErrorNotified {
            error: err,
            delivered,
        }
    }

    async fn deliver(&self, text: &str) -> bool {
        match self.notifier.send(self.chat_id, text).await {
            Ok(()) => {
                info!(chat_id = self.chat_id, message = text, "notification sent");
                true
            }
            Err(e) => {
                error!(chat_id = self.chat_id, error = %e, "failed to send notification");
                false
            }
        }
    }
}

/// Current time as epoch seconds, used as the cursor on startup.
pub fn now_cursor() -> i64 {
    chrono::Utc::now().timestamp()
}

impl std::fmt::Display for CycleOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CycleOutcome::Notified { message, delivered } => {
                write!(f, "sent: {message}")?;
                if !delivered {
                    write!(f, " (delivery failed)")?;
                }
                Ok(())
            }
            CycleOutcome::Unchanged => write!(f, "status unchanged"),
            CycleOutcome::ErrorNotified { error, delivered } => {
                write!(f, "error sent: {error}")?;
                if !delivered {
                    write!(f, " (delivery failed)")?;
                }
                Ok(())
            }
            CycleOutcome::ErrorSuppressed(error) => write!(f, "error already reported: {error}"),
            CycleOutcome::Quiet => write!(f, "no new homework"),
        }
    }
}

impl CycleOutcome {
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            CycleOutcome::ErrorNotified { .. } | CycleOutcome::ErrorSuppressed(_)
        )
    }
}

/// Zero would make the loop spin; it is bumped to one second.
pub fn effective_interval(configured: Duration) -> Duration {
    if configured.is_zero() {
        warn!("retry interval of zero requested, using 1s");
        Duration::from_secs(1)
    } else {
        configured
    }
}
