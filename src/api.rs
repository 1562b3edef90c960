//! Public facade over the ledger, moderation, and layout engine.
//!
//! `SponsorBoard` is what embedding code talks to: the public surface keys
//! campaigns by slug and only ever exposes publicly visible state, while the
//! organizer surface keys by campaign id and additionally sees pending
//! sponsorships and the moderation queue.

use std::sync::Arc;

use crate::campaign::{Campaign, CampaignFile, CampaignUpdate, PricingConfig};
use crate::engine::layout::{self, PlacementPlan};
use crate::error::Result;
use crate::ledger::{Availability, Ledger};
use crate::logic::pricing;
use crate::moderation;
use crate::position::Position;
use crate::sponsor::{SponsorDraft, SponsorEntry, SponsorSeed};
use crate::types::{
    EntryId, LogoApprovalStatus, PaymentOutcome, PaymentStatus, PlanAudience, SponsorType,
};

/// Fundraising progress snapshot for a campaign
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignProgress {
    /// Confirmed contributions, minor currency units
    pub raised: u64,
    pub goal: Option<u64>,
    /// Whole percent of goal reached; `None` without a goal
    pub percent: Option<u64>,
    pub sponsor_count: usize,
}

/// The sponsorship board: campaigns, sponsors, moderation, and rendering
/// behind one shareable handle.
#[derive(Debug, Clone, Default)]
pub struct SponsorBoard {
    ledger: Arc<Ledger>,
}

impl SponsorBoard {
    pub fn new() -> Self {
        Self {
            ledger: Arc::new(Ledger::new()),
        }
    }

    // ========================================================================
    // Organizer surface (campaign id)
    // ========================================================================

    /// Register a campaign and its position template
    pub fn register(&self, campaign: Campaign, positions: Vec<Position>) -> Result<()> {
        self.ledger.register_campaign(campaign, positions)
    }

    /// Register a campaign file and replay its seed sponsors through the
    /// ledger: claim or contribute, confirm payment, then apply the seeded
    /// moderation outcome. Seeds go through the exact same code paths as
    /// live submissions.
    pub fn register_file(&self, file: CampaignFile) -> Result<()> {
        let campaign_id = file.campaign.id.clone();
        let uses_positions = file.campaign.campaign_type.uses_positions();
        self.ledger
            .register_campaign(file.campaign, file.positions)?;

        for seed in &file.sponsors {
            self.replay_seed(&campaign_id, uses_positions, seed)?;
        }
        Ok(())
    }

    fn replay_seed(
        &self,
        campaign_id: &str,
        uses_positions: bool,
        seed: &SponsorSeed,
    ) -> Result<()> {
        let draft = seed.to_draft();
        let entry = if uses_positions {
            let position = seed.position.as_deref().ok_or_else(|| {
                crate::error::SponsorBoardError::validation(format!(
                    "seed sponsor '{}' needs a position in campaign '{}'",
                    seed.name, campaign_id
                ))
            })?;
            self.ledger.claim(campaign_id, position, draft)?
        } else {
            self.ledger.contribute(campaign_id, draft)?
        };

        if seed.paid {
            self.ledger
                .confirm_payment(entry.id, PaymentOutcome::Succeeded)?;
        }
        if entry.sponsor_type == SponsorType::Logo {
            match seed.logo_approved {
                Some(true) => {
                    self.approve_logo(entry.id)?;
                }
                Some(false) => {
                    self.reject_logo(entry.id, "rejected during review")?;
                }
                None => {}
            }
        }
        Ok(())
    }

    /// Apply an organizer edit to a campaign
    pub fn update_campaign(&self, campaign_id: &str, update: CampaignUpdate) -> Result<Campaign> {
        self.ledger.update_campaign(campaign_id, update)
    }

    /// All sponsor entries regardless of visibility, for organizer tooling.
    ///
    /// Cached display metrics on each entry are refreshed against the
    /// current paid population before returning; they are a read
    /// convenience, never authoritative.
    pub fn all_sponsors(&self, campaign_id: &str) -> Result<Vec<SponsorEntry>> {
        let campaign = self.ledger.campaign(campaign_id)?;
        let positions = self.ledger.positions(campaign_id)?;
        let mut entries = self.ledger.entries(campaign_id)?;

        let paid: Vec<u64> = entries
            .iter()
            .filter(|e| e.payment_status == PaymentStatus::Paid)
            .map(|e| e.amount)
            .collect();
        let template_prices: Vec<u64> = positions.iter().map(|p| p.price).collect();
        for entry in &mut entries {
            let metrics = match &campaign.pricing {
                PricingConfig::PayWhatYouWant { tier_policy, .. } => {
                    pricing::size_for_amount(*tier_policy, entry.amount, &paid)
                }
                PricingConfig::Fixed { .. } | PricingConfig::PerPosition => {
                    pricing::size_for_position_price(&template_prices, entry.amount)
                }
            };
            entry.display_size = Some(metrics.size);
            entry.font_size_px = Some(metrics.font_px);
            entry.logo_width_px = Some(metrics.logo_width_px);
        }
        Ok(entries)
    }

    /// Logo entries awaiting review, oldest first
    pub fn pending_logos(&self, campaign_id: &str) -> Result<Vec<SponsorEntry>> {
        let mut pending: Vec<SponsorEntry> = self
            .ledger
            .entries(campaign_id)?
            .into_iter()
            .filter(|e| {
                e.sponsor_type == SponsorType::Logo
                    && e.logo_approval == LogoApprovalStatus::Pending
                    && e.is_active()
            })
            .collect();
        pending.sort_by_key(|e| e.created_at);
        Ok(pending)
    }

    /// Owner preview plan: includes pending sponsorships
    pub fn owner_plan(&self, campaign_id: &str) -> Result<PlacementPlan> {
        self.plan(campaign_id, PlanAudience::Owner)
    }

    /// Release pending claims older than the hold window (seconds).
    /// Returns how many positions were returned to the pool.
    pub fn expire_pending_claims(&self, campaign_id: &str, hold_secs: u64) -> Result<usize> {
        self.ledger.expire_pending_claims(campaign_id, hold_secs)
    }

    // ========================================================================
    // Moderation surface (entry id)
    // ========================================================================

    /// Approve a pending logo for public display
    pub fn approve_logo(&self, entry_id: EntryId) -> Result<SponsorEntry> {
        self.ledger
            .with_entry_mut(entry_id, |entry| Ok(moderation::approve(entry)?))
    }

    /// Reject a pending logo; the reason is surfaced to the sponsor
    pub fn reject_logo(&self, entry_id: EntryId, reason: &str) -> Result<SponsorEntry> {
        self.ledger
            .with_entry_mut(entry_id, |entry| Ok(moderation::reject(entry, reason)?))
    }

    /// Replace a logo and re-enter review
    pub fn resubmit_logo(&self, entry_id: EntryId, logo_url: &str) -> Result<SponsorEntry> {
        self.ledger
            .with_entry_mut(entry_id, |entry| Ok(moderation::resubmit(entry, logo_url)?))
    }

    // ========================================================================
    // Payment processor surface (entry id)
    // ========================================================================

    /// Apply a payment-processor outcome; idempotent per entry
    pub fn confirm_payment(&self, entry_id: EntryId, outcome: PaymentOutcome) -> Result<SponsorEntry> {
        self.ledger.confirm_payment(entry_id, outcome)
    }

    // ========================================================================
    // Public surface (slug)
    // ========================================================================

    /// Claim a position on a fixed/positional campaign
    pub fn claim_position(
        &self,
        slug: &str,
        position_id: &str,
        draft: SponsorDraft,
    ) -> Result<SponsorEntry> {
        let campaign_id = self.ledger.campaign_id_for_slug(slug)?;
        self.ledger.claim(&campaign_id, position_id, draft)
    }

    /// Contribute to a pay-what-you-want campaign
    pub fn contribute(&self, slug: &str, draft: SponsorDraft) -> Result<SponsorEntry> {
        let campaign_id = self.ledger.campaign_id_for_slug(slug)?;
        self.ledger.contribute(&campaign_id, draft)
    }

    /// Publicly renderable placement plan
    pub fn public_plan(&self, slug: &str) -> Result<PlacementPlan> {
        let campaign_id = self.ledger.campaign_id_for_slug(slug)?;
        self.plan(&campaign_id, PlanAudience::Public)
    }

    /// Position availability for the selection UI
    pub fn available_positions(&self, slug: &str) -> Result<Availability> {
        let campaign_id = self.ledger.campaign_id_for_slug(slug)?;
        self.ledger.availability(&campaign_id)
    }

    /// Fundraising progress against the campaign goal
    pub fn campaign_progress(&self, slug: &str) -> Result<CampaignProgress> {
        let campaign_id = self.ledger.campaign_id_for_slug(slug)?;
        let campaign = self.ledger.campaign(&campaign_id)?;
        let raised = self.ledger.raised_total(&campaign_id)?;
        let sponsor_count = self
            .ledger
            .entries(&campaign_id)?
            .iter()
            .filter(|e| e.is_visible_to(PlanAudience::Public))
            .count();
        let goal = campaign.goal_amount;
        let percent = goal.filter(|g| *g > 0).map(|g| raised * 100 / g);
        Ok(CampaignProgress {
            raised,
            goal,
            percent,
            sponsor_count,
        })
    }

    /// Campaign definition by slug
    pub fn campaign(&self, slug: &str) -> Result<Campaign> {
        let campaign_id = self.ledger.campaign_id_for_slug(slug)?;
        self.ledger.campaign(&campaign_id)
    }

    fn plan(&self, campaign_id: &str, audience: PlanAudience) -> Result<PlacementPlan> {
        let campaign = self.ledger.campaign(campaign_id)?;
        let positions = self.ledger.positions(campaign_id)?;
        let entries = self.ledger.entries(campaign_id)?;
        layout::build_plan(&campaign, &positions, &entries, audience)
    }
}
