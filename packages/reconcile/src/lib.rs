#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Canonicalization and fuzzy deduplication of property ledger records.
//!
//! The upstream ledger is known to contain duplicates, truncated labels,
//! test fixtures and internally tagged shadow rows. [`reconcile`] collapses
//! every representation of the same property into one best-available
//! record and drops fixtures for good.
//!
//! # Architecture
//!
//! 1. **Exclude**: placeholder rows are dropped.
//! 2. **Strict pass**: records are grouped by the canonical key of their
//!    shadow-stripped label; the highest [`score`](score::score) wins.
//! 3. **Loose pass**: survivors are bucketed by `(base key, locality)`.
//!    A survivor that looks incomplete is dropped when a compatible bucket
//!    holds a strictly better record. Complete records always stay.
//! 4. **Sweep**: labels that only read as placeholders once stripped are
//!    dropped, the rest are sorted by display label.
//!
//! The transform is pure and allocates only per-call state, so it can be
//! called concurrently from independent threads.
//!
//! # Usage
//!
//! ```rust
//! use property_ledger_reconcile::reconcile;
//! use property_ledger_source_models::InputRecord;
//!
//! let records = vec![
//!     InputRecord::new("a", "Elm Street 12 Metroville"),
//!     InputRecord::new("b", "Elm Street ..."),
//!     InputRecord::new("c", "rls test object"),
//! ];
//! let kept = reconcile(&records);
//! assert_eq!(kept.len(), 1);
//! assert_eq!(kept[0].id, "a");
//! ```

pub mod identifier;
pub mod locality;
pub mod normalize;
pub mod placeholder;
pub mod score;
pub mod segment;
pub mod synonyms;

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

pub use property_ledger_reconcile_models::{DropReason, DroppedRecord, ReconcileReport};
use property_ledger_source_models::InputRecord;

use locality::localities_compatible;
use normalize::collation_key;
use placeholder::{is_placeholder, strip_shadow_marker};
use score::{Score, looks_incomplete, score};
pub use segment::{HeuristicSegmenter, LabelSegmenter};

/// A record still in the running, with the values every pass needs.
#[derive(Debug)]
struct Candidate<'a> {
    /// Position in the input list; the tie-breaker.
    position: usize,
    record: &'a InputRecord,
    /// Shadow-stripped label shown to the consumer.
    display: String,
    score: Score,
}

impl Candidate<'_> {
    /// Whether `self` outranks `other`: strictly higher score, or equal
    /// score and seen first.
    fn outranks(&self, other: &Self) -> bool {
        self.score > other.score || (self.score == other.score && self.position < other.position)
    }

    fn dropped(&self, reason: DropReason) -> (usize, DroppedRecord) {
        (
            self.position,
            DroppedRecord {
                id: self.record.id.clone(),
                label: self.record.label.clone(),
                reason,
            },
        )
    }
}

/// Deduplication engine, generic over how labels are segmented.
#[derive(Debug, Clone, Default)]
pub struct Reconciler<S = HeuristicSegmenter> {
    segmenter: S,
}

impl Reconciler {
    /// Creates an engine with the default heuristic segmentation.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            segmenter: HeuristicSegmenter,
        }
    }
}

impl<S: LabelSegmenter> Reconciler<S> {
    /// Creates an engine with a custom segmenter.
    #[must_use]
    pub const fn with_segmenter(segmenter: S) -> Self {
        Self { segmenter }
    }

    /// Reconciles `records` and returns only the kept records.
    #[must_use]
    pub fn reconcile(&self, records: &[InputRecord]) -> Vec<InputRecord> {
        self.reconcile_with_report(records).records
    }

    /// Reconciles `records` and reports every drop decision.
    ///
    /// Kept records carry their shadow-stripped label. Dropped records are
    /// listed in input order.
    #[must_use]
    pub fn reconcile_with_report(&self, records: &[InputRecord]) -> ReconcileReport {
        let mut dropped = Vec::new();

        let candidates = exclude_placeholders(records, &mut dropped);
        let placeholder_count = dropped.len();
        log::debug!("Exclude stage dropped {placeholder_count} placeholder rows");

        let candidates = self.strict_pass(candidates, &mut dropped);
        let strict_count = dropped.len() - placeholder_count;
        log::debug!(
            "Strict pass dropped {strict_count} duplicates, {} remain",
            candidates.len()
        );

        let candidates = self.loose_pass(candidates, &mut dropped);
        let loose_count = dropped.len() - placeholder_count - strict_count;
        log::debug!(
            "Loose pass dropped {loose_count} incomplete duplicates, {} remain",
            candidates.len()
        );

        let (mut kept, revealed): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .partition(|candidate| !is_placeholder(&candidate.display));
        for candidate in &revealed {
            log::trace!("Dropping {} as placeholder after stripping", candidate.record.id);
            dropped.push(candidate.dropped(DropReason::Placeholder));
        }

        kept.sort_by_cached_key(|candidate| {
            (
                collation_key(&candidate.display),
                candidate.display.clone(),
                candidate.position,
            )
        });
        dropped.sort_by_key(|(position, _)| *position);

        log::info!(
            "Reconciled {} records into {} ({} placeholders, {strict_count} strict duplicates, {loose_count} loose duplicates)",
            records.len(),
            kept.len(),
            placeholder_count + revealed.len(),
        );

        ReconcileReport {
            records: kept
                .into_iter()
                .map(|candidate| InputRecord {
                    label: candidate.display,
                    ..candidate.record.clone()
                })
                .collect(),
            dropped: dropped.into_iter().map(|(_, record)| record).collect(),
        }
    }

    /// Keeps the best record per canonical key. Survivors stay in input
    /// order.
    fn strict_pass<'a>(
        &self,
        candidates: Vec<Candidate<'a>>,
        dropped: &mut Vec<(usize, DroppedRecord)>,
    ) -> Vec<Candidate<'a>> {
        let keys: Vec<String> = candidates
            .iter()
            .map(|candidate| self.segmenter.canonical_key(&candidate.display))
            .collect();

        let mut winners: BTreeMap<&str, usize> = BTreeMap::new();
        for (idx, key) in keys.iter().enumerate() {
            match winners.entry(key.as_str()) {
                Entry::Vacant(entry) => {
                    entry.insert(idx);
                }
                Entry::Occupied(mut entry) => {
                    if candidates[idx].outranks(&candidates[*entry.get()]) {
                        entry.insert(idx);
                    }
                }
            }
        }

        let winner_of: Vec<usize> = keys.iter().map(|key| winners[key.as_str()]).collect();

        let mut survivors = Vec::with_capacity(winners.len());
        for (idx, candidate) in candidates.iter().enumerate() {
            let winner = winner_of[idx];
            if winner != idx {
                let winner_id = candidates[winner].record.id.clone();
                log::trace!(
                    "Dropping {} as strict duplicate of {winner_id}",
                    candidate.record.id
                );
                dropped.push(candidate.dropped(DropReason::StrictDuplicate { winner_id }));
            }
        }
        for (idx, candidate) in candidates.into_iter().enumerate() {
            if winner_of[idx] == idx {
                survivors.push(candidate);
            }
        }
        survivors
    }

    /// Drops incomplete records outranked by a record in a compatible
    /// `(base key, locality)` bucket. Complete records always survive.
    fn loose_pass<'a>(
        &self,
        candidates: Vec<Candidate<'a>>,
        dropped: &mut Vec<(usize, DroppedRecord)>,
    ) -> Vec<Candidate<'a>> {
        let buckets: Vec<(String, String)> = candidates
            .iter()
            .map(|candidate| {
                (
                    self.segmenter.base_key(&candidate.display),
                    self.segmenter.locality(&candidate.display),
                )
            })
            .collect();

        let mut best_by_bucket: BTreeMap<(&str, &str), usize> = BTreeMap::new();
        for (idx, (base, locality)) in buckets.iter().enumerate() {
            match best_by_bucket.entry((base.as_str(), locality.as_str())) {
                Entry::Vacant(entry) => {
                    entry.insert(idx);
                }
                Entry::Occupied(mut entry) => {
                    if candidates[idx].outranks(&candidates[*entry.get()]) {
                        entry.insert(idx);
                    }
                }
            }
        }

        let mut keep = vec![true; candidates.len()];
        for (idx, candidate) in candidates.iter().enumerate() {
            if !looks_incomplete(&candidate.display) {
                continue;
            }

            let (base, locality) = &buckets[idx];
            let best = best_by_bucket
                .range((base.as_str(), "")..)
                .take_while(|((bucket_base, _), _)| *bucket_base == base.as_str())
                .filter(|((_, bucket_locality), _)| {
                    localities_compatible(locality, bucket_locality)
                })
                .map(|(_, best)| *best)
                .reduce(|a, b| {
                    if candidates[b].outranks(&candidates[a]) {
                        b
                    } else {
                        a
                    }
                });

            if let Some(best) = best
                && best != idx
                && candidates[best].score > candidate.score
            {
                let winner_id = candidates[best].record.id.clone();
                log::trace!(
                    "Dropping {} as incomplete duplicate of {winner_id}",
                    candidate.record.id
                );
                dropped.push(candidate.dropped(DropReason::LooseDuplicate { winner_id }));
                keep[idx] = false;
            }
        }

        candidates
            .into_iter()
            .zip(keep)
            .filter_map(|(candidate, keep)| keep.then_some(candidate))
            .collect()
    }
}

/// Drops placeholder rows and prepares the rest for matching.
fn exclude_placeholders<'a>(
    records: &'a [InputRecord],
    dropped: &mut Vec<(usize, DroppedRecord)>,
) -> Vec<Candidate<'a>> {
    let mut candidates = Vec::with_capacity(records.len());
    for (position, record) in records.iter().enumerate() {
        let candidate = Candidate {
            position,
            record,
            display: strip_shadow_marker(&record.label),
            score: score(record),
        };
        if is_placeholder(&record.label) {
            log::trace!("Dropping {} as placeholder", record.id);
            dropped.push(candidate.dropped(DropReason::Placeholder));
        } else {
            candidates.push(candidate);
        }
    }
    candidates
}

/// Reconciles `records` with the default heuristics.
///
/// Returns one record per logical entity, with placeholders removed and
/// shadow markers stripped from labels, sorted by display label.
#[must_use]
pub fn reconcile(records: &[InputRecord]) -> Vec<InputRecord> {
    Reconciler::new().reconcile(records)
}

/// Like [`reconcile`], also reporting every dropped record.
#[must_use]
pub fn reconcile_with_report(records: &[InputRecord]) -> ReconcileReport {
    Reconciler::new().reconcile_with_report(records)
}
