use chrono::{DateTime, Duration, Utc};
use parser::{match_episode, MatchOutcome, ParsedTitle, TitleParser};
use rss::RssItem;
use std::sync::Arc;
use thiserror::Error;

use crate::models::{Candidate, FeedSettings, Settings, TrackedRelease};
use crate::repositories::{StoreError, TrackedStore};
use crate::services::{
    Clock, DispatchError, DispatchLedger, Dispatcher, FeedFetcher, FeedProvider, FetchError,
};

/// Failure while processing a single record; never aborts the tick
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),
    #[error("store update failed: {0}")]
    Store(#[from] StoreError),
}

/// Statistics for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    pub due: usize,
    pub matched: usize,
    pub advanced: usize,
    pub retired: usize,
    pub recaps: usize,
    pub failed: usize,
}

/// What happened to one due record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    NoMatch,
    Advanced,
    Retired,
    Recap,
}

/// Options read from `[reconcile]`
#[derive(Debug, Clone)]
pub struct ReconcileOptions {
    pub feeds: FeedSettings,
    pub cooldown: Duration,
    pub skip_repeat_recaps: bool,
}

impl From<&Settings> for ReconcileOptions {
    fn from(settings: &Settings) -> Self {
        let cooldown = i64::try_from(settings.reconcile.cooldown_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX);

        Self {
            feeds: settings.feeds.clone(),
            cooldown,
            skip_repeat_recaps: settings.reconcile.skip_repeat_recaps,
        }
    }
}

/// Compares due tracked releases against their feeds and applies the resulting transitions.
///
/// Records are processed one after another. Each record's failures are logged
/// and counted without touching the others.
pub struct ReconcileService {
    store: Arc<dyn TrackedStore>,
    fetcher: Arc<dyn FeedFetcher>,
    dispatcher: Arc<dyn Dispatcher>,
    clock: Arc<dyn Clock>,
    options: ReconcileOptions,
    parser: TitleParser,
    ledger: DispatchLedger,
}

impl ReconcileService {
    pub fn new(
        store: Arc<dyn TrackedStore>,
        fetcher: Arc<dyn FeedFetcher>,
        dispatcher: Arc<dyn Dispatcher>,
        clock: Arc<dyn Clock>,
        options: ReconcileOptions,
    ) -> Self {
        Self {
            store,
            fetcher,
            dispatcher,
            clock,
            options,
            parser: TitleParser::new(),
            ledger: DispatchLedger::new(),
        }
    }

    /// Run one pass over the due set.
    ///
    /// Only a failed due-set read is returned as an error; nothing has been
    /// touched at that point.
    pub async fn run_tick(&self) -> Result<TickStats, StoreError> {
        let now = self.clock.now();
        let due = self.store.list_due(now).await?;

        let mut stats = TickStats {
            due: due.len(),
            ..Default::default()
        };

        if due.is_empty() {
            tracing::debug!("No tracked releases due");
            return Ok(stats);
        }

        for record in &due {
            match self.process_record(record).await {
                Ok(RecordOutcome::NoMatch) => {}
                Ok(outcome) => {
                    stats.matched += 1;
                    match outcome {
                        RecordOutcome::Advanced => stats.advanced += 1,
                        RecordOutcome::Retired => stats.retired += 1,
                        RecordOutcome::Recap => stats.recaps += 1,
                        RecordOutcome::NoMatch => {}
                    }
                }
                Err(e) => {
                    stats.failed += 1;
                    tracing::error!("[{}] {}", record.name, e);
                }
            }
        }

        Ok(stats)
    }

    pub async fn process_record(
        &self,
        record: &TrackedRelease,
    ) -> Result<RecordOutcome, ReconcileError> {
        let provider = FeedProvider::select(record.site, record.quality, &self.options.feeds)?;
        let items = provider.fetch_items(self.fetcher.as_ref()).await?;
        tracing::debug!("[{}] Fetched {} items from {}", record.name, items.len(), provider.site());

        let Some((outcome, parsed, item)) = self.find_match(record, &provider, &items) else {
            tracing::debug!(
                "[{}] Episode {} not published yet",
                record.name,
                record.expected_episode
            );
            return Ok(RecordOutcome::NoMatch);
        };

        tracing::info!(
            "[{}] Found {} episode {} ({})",
            record.name,
            outcome,
            parsed.episode_label(),
            item.title()
        );

        let candidate = provider
            .into_candidate(self.fetcher.as_ref(), parsed, item)
            .await?;
        self.dispatcher.dispatch(&candidate).await?;

        self.apply_transition(record, outcome, &candidate).await
    }

    /// First item in provider order that matches; later items are not looked at
    fn find_match<'a>(
        &self,
        record: &TrackedRelease,
        provider: &FeedProvider,
        items: &'a [RssItem],
    ) -> Option<(MatchOutcome, ParsedTitle, &'a RssItem)> {
        for item in items {
            let parsed = match provider.parse_item(&self.parser, item) {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::debug!("[{}] Skipping '{}': {}", record.name, item.title(), e);
                    continue;
                }
            };

            let outcome = match_episode(&record.name, record.expected_episode, &parsed);
            if !outcome.is_match() {
                continue;
            }

            if outcome == MatchOutcome::Recap
                && self.ledger.contains(&record.name, parsed.first_episode())
            {
                if self.options.skip_repeat_recaps {
                    tracing::debug!(
                        "[{}] Recap {} already queued, skipping",
                        record.name,
                        parsed.episode_label()
                    );
                    continue;
                }
                tracing::info!(
                    "[{}] Recap {} was already queued in this window",
                    record.name,
                    parsed.episode_label()
                );
            }

            return Some((outcome, parsed, item));
        }

        None
    }

    async fn apply_transition(
        &self,
        record: &TrackedRelease,
        outcome: MatchOutcome,
        candidate: &Candidate,
    ) -> Result<RecordOutcome, ReconcileError> {
        match outcome {
            MatchOutcome::Final => {
                if !self.store.delete(&record.name).await? {
                    tracing::warn!("[{}] Record vanished before it could be retired", record.name);
                }
                self.ledger.clear(&record.name);
                tracing::info!("[{}] Series finished, no longer tracked", record.name);
                Ok(RecordOutcome::Retired)
            }
            MatchOutcome::Normal => {
                let next_episode = record.expected_episode.saturating_add(1);
                let next_check = self.next_check(record, candidate.published_at);

                if !self
                    .store
                    .advance(&record.name, next_episode, next_check)
                    .await?
                {
                    tracing::warn!("[{}] Record vanished before it could advance", record.name);
                }
                self.ledger.clear(&record.name);
                tracing::info!(
                    "[{}] Now waiting for episode {} after {}",
                    record.name,
                    next_episode,
                    next_check
                );
                Ok(RecordOutcome::Advanced)
            }
            MatchOutcome::Recap => {
                self.ledger.record(&record.name, candidate.first_episode());
                Ok(RecordOutcome::Recap)
            }
            MatchOutcome::None => Ok(RecordOutcome::NoMatch),
        }
    }

    /// `published_at + cooldown`, never earlier than the current next check
    fn next_check(&self, record: &TrackedRelease, published_at: DateTime<Utc>) -> DateTime<Utc> {
        let next = published_at
            .checked_add_signed(self.options.cooldown)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        next.max(record.next_check_not_before)
    }
}
