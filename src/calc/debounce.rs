//! Debounced recompute of the editor summary.
//!
//! Every edit sends a snapshot of the rows to a single worker task. The worker
//! keeps only the latest snapshot and pushes its deadline out by the quiet
//! period on each arrival; once the deadline passes without new edits it
//! recomputes and publishes the display on a `watch` channel.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::{mpsc, watch};
use tokio::time::{Duration, Instant};

use crate::calc::row::calculate_row;
use crate::calc::summary::{DEFAULT_CURRENCY, currency_or_default, summarize};
use crate::domain::line_item::{RowId, RowInput};
use crate::dto::summary::{EditorDisplay, RowDisplay, SummaryDisplay};

/// Quiet period used when none is configured.
pub const QUIET_PERIOD_MS: u64 = 300;

/// Rows and currency as they were at the moment of an edit.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    pub rows: Vec<(RowId, RowInput)>,
    pub currency: String,
}

/// Handle to the recompute worker of one editing session.
///
/// Dropping the handle stops the worker; a recompute still waiting for its
/// quiet period is discarded.
pub struct SummaryAggregator {
    requests: mpsc::UnboundedSender<Snapshot>,
    display: watch::Receiver<EditorDisplay>,
    symbol: Arc<watch::Sender<String>>,
    recomputes: Arc<AtomicUsize>,
}

impl SummaryAggregator {
    /// Starts the worker on the current tokio runtime.
    pub fn spawn(quiet_period: Duration) -> Self {
        let (requests, receiver) = mpsc::unbounded_channel();
        let (display_tx, display) = watch::channel(EditorDisplay {
            summary: SummaryDisplay::from_totals(&summarize(std::iter::empty::<&RowInput>(), "")),
            rows: Vec::new(),
        });
        let (symbol, _) = watch::channel(DEFAULT_CURRENCY.to_string());
        let symbol = Arc::new(symbol);
        let recomputes = Arc::new(AtomicUsize::new(0));

        tokio::spawn(run(
            receiver,
            quiet_period,
            display_tx,
            Arc::clone(&symbol),
            Arc::clone(&recomputes),
        ));

        Self {
            requests,
            display,
            symbol,
            recomputes,
        }
    }

    /// Requests a recompute, cancelling any that is still waiting.
    pub fn schedule(&self, snapshot: Snapshot) {
        if self.requests.send(snapshot).is_err() {
            log::warn!("Summary worker is gone; dropping recompute request");
        }
    }

    /// Publishes a new currency symbol right away, without waiting for the
    /// quiet period.
    pub fn refresh_symbol(&self, currency: &str) {
        self.symbol.send_replace(currency_or_default(currency));
    }

    /// Latest published display.
    pub fn display(&self) -> EditorDisplay {
        self.display.borrow().clone()
    }

    /// Receiver notified on every published display.
    pub fn subscribe(&self) -> watch::Receiver<EditorDisplay> {
        self.display.clone()
    }

    /// Currency symbol currently shown next to amounts.
    pub fn symbol(&self) -> String {
        self.symbol.borrow().clone()
    }

    pub fn subscribe_symbol(&self) -> watch::Receiver<String> {
        self.symbol.subscribe()
    }

    /// Number of recomputes performed so far.
    pub fn recompute_count(&self) -> usize {
        self.recomputes.load(Ordering::SeqCst)
    }
}

async fn run(
    mut requests: mpsc::UnboundedReceiver<Snapshot>,
    quiet_period: Duration,
    display: watch::Sender<EditorDisplay>,
    symbol: Arc<watch::Sender<String>>,
    recomputes: Arc<AtomicUsize>,
) {
    let mut pending: Option<Snapshot> = None;
    let mut deadline: Option<Instant> = None;
    let mut previous: HashMap<RowId, RowDisplay> = HashMap::new();

    loop {
        let sleep_until = deadline.unwrap_or_else(|| Instant::now() + quiet_period);

        tokio::select! {
            request = requests.recv() => match request {
                Some(snapshot) => {
                    pending = Some(snapshot);
                    deadline = Some(Instant::now() + quiet_period);
                }
                None => break,
            },

            _ = tokio::time::sleep_until(sleep_until), if deadline.is_some() => {
                deadline = None;
                if let Some(snapshot) = pending.take() {
                    let rendered = render(&snapshot, &previous);
                    previous = rendered
                        .rows
                        .iter()
                        .map(|row| (row.row_id, row.clone()))
                        .collect();
                    symbol.send_replace(rendered.summary.currency.clone());
                    display.send_replace(rendered);
                    let count = recomputes.fetch_add(1, Ordering::SeqCst) + 1;
                    log::debug!("Recomputed editor summary ({count} so far)");
                }
            }
        }
    }
}

/// Computes the display for `snapshot`.
///
/// Rows that cannot be computed keep their cells from `previous`.
pub fn render(snapshot: &Snapshot, previous: &HashMap<RowId, RowDisplay>) -> EditorDisplay {
    let rows = snapshot
        .rows
        .iter()
        .map(|(row_id, input)| match calculate_row(input) {
            Some(totals) => RowDisplay {
                row_id: *row_id,
                tax_amount: totals.tax_display(),
                row_total: totals.total_display(),
            },
            None => previous
                .get(row_id)
                .cloned()
                .unwrap_or_else(|| RowDisplay::blank(*row_id)),
        })
        .collect();

    let totals = summarize(snapshot.rows.iter().map(|(_, row)| row), &snapshot.currency);

    EditorDisplay {
        summary: SummaryDisplay::from_totals(&totals),
        rows,
    }
}
