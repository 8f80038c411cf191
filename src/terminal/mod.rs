//! Terminal: drives the dashboard. Fetches through the cache, renders, attaches
//! notices.
//!
//! A [`Terminal`] owns the session's [`ViewState`] and request parameters.
//! Each [`Terminal::tick`] produces a [`Frame`]; no error escapes a tick.
//! Configuration errors stop the data panels, recoverable errors fall back to
//! the last good snapshot for the same parameters.

pub mod frame;
pub mod refresh;

pub use frame::{Frame, Notice, Severity, StatusLine};
pub use refresh::RefreshTimer;

use crate::client::CmcClient;
use crate::domain::listing::Snapshot;
use crate::error::TerminalError;
use crate::shared::{Currency, SnapshotKey};
use crate::view::{self, detail, AssetDetail, FormatOptions, MarketSummary, ViewState};
use chrono::Utc;
use futures_util::Stream;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_LIMIT: u32 = 100;
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct TerminalOptions {
    pub limit: u32,
    pub currency: Currency,
    pub page_size: usize,
    pub format: FormatOptions,
    pub refresh_interval: Duration,
}

impl Default for TerminalOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            currency: Currency::usd(),
            page_size: view::state::DEFAULT_PAGE_SIZE,
            format: FormatOptions::default(),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
        }
    }
}

pub struct Terminal {
    client: CmcClient,
    key: SnapshotKey,
    view: ViewState,
    format: FormatOptions,
    refresh: RefreshTimer,
}

impl Terminal {
    pub fn new(client: CmcClient, options: TerminalOptions) -> Result<Self, TerminalError> {
        let key = SnapshotKey::new(options.limit, options.currency.as_str())?;
        Ok(Self {
            client,
            key,
            view: ViewState::default().with_page_size(options.page_size),
            format: options.format,
            refresh: RefreshTimer::new(options.refresh_interval),
        })
    }

    pub fn key(&self) -> &SnapshotKey {
        &self.key
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    pub fn format(&self) -> &FormatOptions {
        &self.format
    }

    pub fn set_format(&mut self, format: FormatOptions) {
        self.format = format;
    }

    pub fn refresh_timer(&self) -> &RefreshTimer {
        &self.refresh
    }

    pub fn set_refresh_interval(&mut self, interval: Duration) {
        self.refresh.set_interval(interval);
    }

    /// New rank window. Rows change, so paging restarts.
    pub fn set_limit(&mut self, limit: u32) -> Result<(), TerminalError> {
        self.key = SnapshotKey::new(limit, self.key.currency.as_str())?;
        self.view.reset_page();
        Ok(())
    }

    /// New conversion currency. Sort and extra-column keys carrying the old
    /// currency prefix are moved to the new one.
    pub fn set_currency(&mut self, currency: &str) -> Result<(), TerminalError> {
        let key = SnapshotKey::new(self.key.limit, currency)?;
        let old = self.key.currency.field_prefix();
        let new = key.currency.field_prefix();
        let remap = |k: &str| match k.strip_prefix(&old) {
            Some(rest) => format!("{}{}", new, rest),
            None => k.to_string(),
        };

        if let Some(sort) = self.view.sort.as_mut() {
            sort.key = remap(&sort.key);
        }
        self.view.extra_columns = self.view.extra_columns.iter().map(|k| remap(k)).collect();
        self.view.reset_page();
        self.key = key;
        Ok(())
    }

    /// Fetch (through the cache) and render one frame.
    pub async fn tick(&mut self) -> Frame {
        let mut frame = Frame::blank(self.key.clone());

        let result = self.client.listings().get(&self.key).await;
        self.refresh.mark();

        let snapshot = match result {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Tick failed");
                frame.notices.push(Notice::from_error(&e));
                if !e.is_recoverable() {
                    return frame;
                }
                match self.client.listings().cached(&self.key).await {
                    Some(snapshot) => {
                        frame.stale = true;
                        snapshot
                    }
                    None => return frame,
                }
            }
        };

        self.fill(&mut frame, &snapshot);
        frame
    }

    /// Re-render the cached snapshot after a view change, without fetching.
    /// Falls back to a full tick when nothing is cached for the current key.
    pub async fn rerender(&mut self) -> Frame {
        let Some(snapshot) = self.client.listings().cached(&self.key).await else {
            return self.tick().await;
        };
        let mut frame = Frame::blank(self.key.clone());
        frame.stale = (Utc::now() - snapshot.fetched_at)
            .to_std()
            .map(|age| age > self.client.cache_ttl())
            .unwrap_or(false);
        self.fill(&mut frame, &snapshot);
        frame
    }

    /// One frame per refresh interval, the first immediately. Each tick
    /// finishes before the next wait starts.
    pub fn frames(&mut self) -> Pin<Box<dyn Stream<Item = Frame> + Send + '_>> {
        Box::pin(futures_util::stream::unfold(
            (self, true),
            |(terminal, first)| async move {
                if !first {
                    futures_timer::Delay::new(terminal.refresh.remaining()).await;
                }
                let frame = terminal.tick().await;
                Some((frame, (terminal, false)))
            },
        ))
    }

    fn fill(&mut self, frame: &mut Frame, snapshot: &Arc<Snapshot>) {
        let table = view::render(snapshot, &self.view, &self.format);
        self.view.page_index = table.page.index;

        if snapshot.is_empty() || table.columns.is_empty() {
            frame.notices.push(Notice::empty(format!(
                "No listings to display for {}",
                snapshot.key
            )));
        }

        let rows = view::visible_rows(snapshot, &self.view);
        frame.symbol_options = detail::symbol_options(&rows);
        frame.detail = self
            .view
            .selected_symbol
            .as_deref()
            .and_then(|symbol| AssetDetail::find(&rows, symbol, &snapshot.key.currency));

        let summary = MarketSummary::from_snapshot(snapshot);
        frame.metrics = summary.metrics(snapshot);
        frame.summary = Some(summary);
        frame.status = Some(StatusLine::new(
            snapshot.fetched_at,
            snapshot.status.as_ref(),
        ));
        frame.table = Some(table);
        frame.rendered_at = Utc::now();
    }
}

impl std::fmt::Debug for Terminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Terminal")
            .field("key", &self.key)
            .field("view", &self.view)
            .finish_non_exhaustive()
    }
}
