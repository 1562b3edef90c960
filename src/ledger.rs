//! Position Ledger
//!
//! Serializes all claim/release operations on a campaign's position set so
//! the "at most one active claimant per position" invariant never breaks,
//! even under concurrent submissions.
//!
//! # Concurrency model
//!
//! Each campaign owns an independent book behind its own mutex; claims on
//! different campaigns never contend. Within a campaign, a claim is an
//! atomic check-and-insert inside one critical section: under concurrent
//! claims for the same position exactly one caller observes success and
//! the rest observe `PositionAlreadyTaken`; a claim is never silently
//! overwritten. Payment confirmations are idempotent per entry, and
//! the expiry sweep re-checks claim state inside the same critical section
//! so a concurrently settling payment always wins over expiry.
//!
//! Reads for rendering are snapshots cloned under a short lock; the lock is
//! never held across plan generation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::campaign::{Campaign, CampaignUpdate};
use crate::claim_state::ClaimRecord;
use crate::error::{Result, SponsorBoardError};
use crate::position::{Position, PositionTemplate};
use crate::sponsor::{SponsorDraft, SponsorEntry};
use crate::types::{
    CampaignId, EntryId, PaymentOutcome, PaymentStatus, PositionId,
};

/// Snapshot of a campaign's position availability
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    pub total: usize,
    pub claimed: usize,
    pub remaining: usize,
    /// Ids of currently claimable positions, in template order
    pub open_positions: Vec<PositionId>,
}

/// Per-campaign state guarded by one mutex
#[derive(Debug)]
struct CampaignBook {
    campaign: Campaign,
    /// Template order preserved; never mutated after registration
    positions: Vec<Position>,
    /// Active claims only; releasing removes the record
    claims: HashMap<PositionId, ClaimRecord>,
    entries: HashMap<EntryId, SponsorEntry>,
}

impl CampaignBook {
    fn position(&self, position_id: &str) -> Option<&Position> {
        self.positions.iter().find(|p| p.id == position_id)
    }

    fn release(&mut self, position_id: &str) {
        if self.claims.remove(position_id).is_some() {
            log::info!(
                "position '{}' released in campaign '{}'",
                position_id,
                self.campaign.id
            );
        }
    }
}

/// The Position Ledger: sole writer of position occupancy.
///
/// Cheap to share: clone an `Arc<Ledger>` across request handlers.
#[derive(Debug, Default)]
pub struct Ledger {
    books: RwLock<HashMap<CampaignId, Arc<Mutex<CampaignBook>>>>,
    /// Maps entry ids to their campaign so payment callbacks need no hint
    entry_index: RwLock<HashMap<EntryId, CampaignId>>,
    next_entry_id: AtomicU64,
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            books: RwLock::new(HashMap::new()),
            entry_index: RwLock::new(HashMap::new()),
            next_entry_id: AtomicU64::new(1),
        }
    }

    /// Register a campaign and its position template.
    ///
    /// # Errors
    ///
    /// - `Validation` if the campaign or template is invalid, a positional
    ///   campaign has no positions, or the id/slug is already registered
    pub fn register_campaign(&self, campaign: Campaign, positions: Vec<Position>) -> Result<()> {
        campaign.validate()?;

        let positions = if campaign.campaign_type.uses_positions() {
            PositionTemplate::from_positions(positions).build()?
        } else {
            if !positions.is_empty() {
                return Err(SponsorBoardError::validation(
                    "pay-what-you-want campaigns do not have positions",
                ));
            }
            positions
        };

        let mut books = self.books.write().expect("ledger books lock poisoned");
        if books.contains_key(&campaign.id) {
            return Err(SponsorBoardError::validation(format!(
                "campaign '{}' is already registered",
                campaign.id
            )));
        }
        if books
            .values()
            .any(|b| b.lock().expect("campaign book lock poisoned").campaign.slug == campaign.slug)
        {
            return Err(SponsorBoardError::validation(format!(
                "campaign slug '{}' is already registered",
                campaign.slug
            )));
        }

        log::info!(
            "campaign '{}' registered: {} positions, style {}",
            campaign.id,
            positions.len(),
            campaign.layout_style
        );
        books.insert(
            campaign.id.clone(),
            Arc::new(Mutex::new(CampaignBook {
                campaign,
                positions,
                claims: HashMap::new(),
                entries: HashMap::new(),
            })),
        );
        Ok(())
    }

    /// Provisionally reserve a position for a sponsor.
    ///
    /// The occupancy check and the creation of the pending entry happen in
    /// one atomic step. No retry is performed on conflict; the caller
    /// decides whether to offer an alternative position.
    ///
    /// # Errors
    ///
    /// - `Validation` if the campaign is not positional/fixed, is closed,
    ///   or is outside its date window
    /// - `NotFound` for unknown campaign or position
    /// - `Conflict(PositionAlreadyTaken)` if another sponsor holds an
    ///   active claim
    pub fn claim(
        &self,
        campaign_id: &str,
        position_id: &str,
        draft: SponsorDraft,
    ) -> Result<SponsorEntry> {
        draft.validate()?;
        let book = self.book(campaign_id)?;
        let now = unix_now();

        let mut book = book.lock().expect("campaign book lock poisoned");
        if !book.campaign.campaign_type.uses_positions() {
            return Err(SponsorBoardError::validation(format!(
                "campaign '{}' is {}; positions are not claimable",
                campaign_id, book.campaign.campaign_type
            )));
        }
        if !book.campaign.is_open_at(now) {
            return Err(SponsorBoardError::validation(format!(
                "campaign '{}' is closed",
                campaign_id
            )));
        }
        let position = book.position(position_id).cloned().ok_or_else(|| {
            SponsorBoardError::not_found(format!(
                "position '{}' in campaign '{}'",
                position_id, campaign_id
            ))
        })?;

        // The race-sensitive step: occupancy check and claim insert under
        // the same lock. Exactly one concurrent caller gets past this.
        if book
            .claims
            .get(position_id)
            .map_or(false, |c| c.state().occupies())
        {
            return Err(SponsorBoardError::position_taken(position_id));
        }

        let entry_id = self.next_entry_id.fetch_add(1, Ordering::Relaxed);
        let entry = SponsorEntry::from_draft(
            entry_id,
            campaign_id.to_string(),
            Some(position_id.to_string()),
            position.price,
            draft,
            now,
        );
        book.claims.insert(
            position_id.to_string(),
            ClaimRecord::pending(position_id.to_string(), entry_id, now),
        );
        book.entries.insert(entry_id, entry.clone());
        drop(book);

        self.entry_index
            .write()
            .expect("entry index lock poisoned")
            .insert(entry_id, campaign_id.to_string());

        log::info!(
            "position '{}' claimed by entry {} in campaign '{}'",
            position_id,
            entry_id,
            campaign_id
        );
        Ok(entry)
    }

    /// Accept a pay-what-you-want contribution (no position involved).
    ///
    /// # Errors
    ///
    /// - `Validation` if the campaign uses positions, is closed, or the
    ///   amount is below the campaign minimum
    pub fn contribute(&self, campaign_id: &str, draft: SponsorDraft) -> Result<SponsorEntry> {
        draft.validate()?;
        let book = self.book(campaign_id)?;
        let now = unix_now();

        let mut book = book.lock().expect("campaign book lock poisoned");
        if book.campaign.campaign_type.uses_positions() {
            return Err(SponsorBoardError::validation(format!(
                "campaign '{}' sells positions; use claim instead",
                campaign_id
            )));
        }
        if !book.campaign.is_open_at(now) {
            return Err(SponsorBoardError::validation(format!(
                "campaign '{}' is closed",
                campaign_id
            )));
        }
        let min = book.campaign.minimum_amount().unwrap_or(1);
        if draft.amount < min {
            return Err(SponsorBoardError::validation(format!(
                "amount {} is below the campaign minimum {}",
                draft.amount, min
            )));
        }

        let entry_id = self.next_entry_id.fetch_add(1, Ordering::Relaxed);
        let amount = draft.amount;
        let entry = SponsorEntry::from_draft(
            entry_id,
            campaign_id.to_string(),
            None,
            amount,
            draft,
            now,
        );
        book.entries.insert(entry_id, entry.clone());
        drop(book);

        self.entry_index
            .write()
            .expect("entry index lock poisoned")
            .insert(entry_id, campaign_id.to_string());

        log::info!(
            "contribution of {} accepted as entry {} in campaign '{}'",
            amount,
            entry_id,
            campaign_id
        );
        Ok(entry)
    }

    /// Apply a payment-processor outcome to an entry.
    ///
    /// Idempotent under at-least-once delivery: a repeated delivery of an
    /// already-applied outcome returns the settled entry unchanged. A
    /// failed outcome releases the position (positional entries) and keeps
    /// the entry for audit.
    ///
    /// # Errors
    ///
    /// - `NotFound` for an unknown entry
    /// - `State` if the entry settled with the *opposite* outcome (e.g. a
    ///   success callback after the claim already failed or expired)
    pub fn confirm_payment(&self, entry_id: EntryId, outcome: PaymentOutcome) -> Result<SponsorEntry> {
        let campaign_id = self
            .entry_index
            .read()
            .expect("entry index lock poisoned")
            .get(&entry_id)
            .cloned()
            .ok_or_else(|| {
                SponsorBoardError::not_found(format!("sponsor entry {}", entry_id))
            })?;
        let book = self.book(&campaign_id)?;
        let mut book = book.lock().expect("campaign book lock poisoned");

        let entry = book.entries.get(&entry_id).cloned().ok_or_else(|| {
            SponsorBoardError::not_found(format!("sponsor entry {}", entry_id))
        })?;

        // Idempotent replay: same terminal status, no transition, no error
        let settled = match (entry.payment_status, outcome) {
            (PaymentStatus::Paid, PaymentOutcome::Succeeded)
            | (PaymentStatus::Failed, PaymentOutcome::Failed) => Some(entry.clone()),
            (PaymentStatus::Paid, PaymentOutcome::Failed)
            | (PaymentStatus::Failed, PaymentOutcome::Succeeded) => {
                return Err(SponsorBoardError::state(format!(
                    "entry {} already settled as {}; conflicting outcome {} ignored",
                    entry_id, entry.payment_status, outcome
                )));
            }
            (PaymentStatus::Pending, _) => None,
        };
        if let Some(settled) = settled {
            log::debug!(
                "duplicate payment callback for entry {} absorbed ({})",
                entry_id,
                outcome
            );
            return Ok(settled);
        }

        match outcome {
            PaymentOutcome::Succeeded => {
                if let Some(position_id) = entry.position_id.clone() {
                    if let Some(claim) = book.claims.get_mut(&position_id) {
                        claim.settle()?;
                    }
                }
                let entry = book
                    .entries
                    .get_mut(&entry_id)
                    .expect("entry existed above");
                entry.payment_status = PaymentStatus::Paid;
                let entry = entry.clone();
                log::info!(
                    "payment confirmed for entry {} in campaign '{}'",
                    entry_id,
                    campaign_id
                );
                Ok(entry)
            }
            PaymentOutcome::Failed => {
                if let Some(position_id) = entry.position_id.clone() {
                    book.release(&position_id);
                }
                let entry = book
                    .entries
                    .get_mut(&entry_id)
                    .expect("entry existed above");
                entry.payment_status = PaymentStatus::Failed;
                let entry = entry.clone();
                log::warn!(
                    "payment failed for entry {} in campaign '{}'; position returned to pool",
                    entry_id,
                    campaign_id
                );
                Ok(entry)
            }
        }
    }

    /// Release pending claims older than `older_than_secs`.
    ///
    /// The only mechanism that auto-releases a position absent an explicit
    /// payment failure; prevents an abandoned checkout from locking a
    /// position forever. Claim state is re-checked under the book lock, so
    /// a payment settling concurrently always wins: a paid claim is never
    /// swept. Returns the number of claims released.
    pub fn expire_pending_claims(&self, campaign_id: &str, older_than_secs: u64) -> Result<usize> {
        let book = self.book(campaign_id)?;
        let now = unix_now();
        let mut book = book.lock().expect("campaign book lock poisoned");

        let expired: Vec<(PositionId, EntryId)> = book
            .claims
            .values()
            .filter(|claim| {
                claim.releasable().is_ok() && claim.age_at(now) >= older_than_secs
            })
            .map(|claim| (claim.position_id().clone(), claim.entry_id()))
            .collect();

        for (position_id, entry_id) in &expired {
            book.release(position_id);
            if let Some(entry) = book.entries.get_mut(entry_id) {
                entry.payment_status = PaymentStatus::Failed;
            }
            log::info!(
                "pending claim on '{}' (entry {}) expired in campaign '{}'",
                position_id,
                entry_id,
                campaign_id
            );
        }
        Ok(expired.len())
    }

    /// Snapshot of position availability for a campaign
    pub fn availability(&self, campaign_id: &str) -> Result<Availability> {
        let book = self.book(campaign_id)?;
        let book = book.lock().expect("campaign book lock poisoned");

        let total = book.positions.len();
        let claimed = book
            .claims
            .values()
            .filter(|c| c.state().occupies())
            .count();
        let open_positions = book
            .positions
            .iter()
            .filter(|p| {
                !book
                    .claims
                    .get(&p.id)
                    .map_or(false, |c| c.state().occupies())
            })
            .map(|p| p.id.clone())
            .collect();
        Ok(Availability {
            total,
            claimed,
            remaining: total - claimed,
            open_positions,
        })
    }

    /// Snapshot of all sponsor entries for a campaign, creation order
    pub fn entries(&self, campaign_id: &str) -> Result<Vec<SponsorEntry>> {
        let book = self.book(campaign_id)?;
        let book = book.lock().expect("campaign book lock poisoned");
        let mut entries: Vec<SponsorEntry> = book.entries.values().cloned().collect();
        entries.sort_by_key(|e| e.id);
        Ok(entries)
    }

    /// Snapshot of the campaign's position template
    pub fn positions(&self, campaign_id: &str) -> Result<Vec<Position>> {
        let book = self.book(campaign_id)?;
        let book = book.lock().expect("campaign book lock poisoned");
        Ok(book.positions.clone())
    }

    /// Campaign definition snapshot
    pub fn campaign(&self, campaign_id: &str) -> Result<Campaign> {
        let book = self.book(campaign_id)?;
        let book = book.lock().expect("campaign book lock poisoned");
        Ok(book.campaign.clone())
    }

    /// Resolve a public slug to a campaign id
    pub fn campaign_id_for_slug(&self, slug: &str) -> Result<CampaignId> {
        let books = self.books.read().expect("ledger books lock poisoned");
        for (id, book) in books.iter() {
            if book.lock().expect("campaign book lock poisoned").campaign.slug == slug {
                return Ok(id.clone());
            }
        }
        Err(SponsorBoardError::not_found(format!("campaign '{}'", slug)))
    }

    /// Sum of confirmed contributions for a campaign
    pub fn raised_total(&self, campaign_id: &str) -> Result<u64> {
        let book = self.book(campaign_id)?;
        let book = book.lock().expect("campaign book lock poisoned");
        Ok(book
            .entries
            .values()
            .filter(|e| e.payment_status == PaymentStatus::Paid)
            .map(|e| e.amount)
            .sum())
    }

    /// Apply an organizer edit under the post-sales mutation guard
    pub fn update_campaign(&self, campaign_id: &str, update: CampaignUpdate) -> Result<Campaign> {
        let book = self.book(campaign_id)?;
        let mut book = book.lock().expect("campaign book lock poisoned");
        let has_sponsors = !book.entries.is_empty();
        book.campaign.apply_update(update, has_sponsors)?;
        Ok(book.campaign.clone())
    }

    /// Run a closure over a mutable sponsor entry (moderation actions).
    ///
    /// The closure's mutation is applied under the campaign lock; its
    /// error aborts the mutation.
    pub fn with_entry_mut<F>(&self, entry_id: EntryId, f: F) -> Result<SponsorEntry>
    where
        F: FnOnce(&mut SponsorEntry) -> Result<()>,
    {
        let campaign_id = self
            .entry_index
            .read()
            .expect("entry index lock poisoned")
            .get(&entry_id)
            .cloned()
            .ok_or_else(|| {
                SponsorBoardError::not_found(format!("sponsor entry {}", entry_id))
            })?;
        let book = self.book(&campaign_id)?;
        let mut book = book.lock().expect("campaign book lock poisoned");
        let entry = book.entries.get_mut(&entry_id).ok_or_else(|| {
            SponsorBoardError::not_found(format!("sponsor entry {}", entry_id))
        })?;
        f(entry)?;
        Ok(entry.clone())
    }

    fn book(&self, campaign_id: &str) -> Result<Arc<Mutex<CampaignBook>>> {
        self.books
            .read()
            .expect("ledger books lock poisoned")
            .get(campaign_id)
            .cloned()
            .ok_or_else(|| {
                SponsorBoardError::not_found(format!("campaign '{}'", campaign_id))
            })
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
