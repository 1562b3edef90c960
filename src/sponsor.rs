//! Sponsor entries and submission drafts.
//!
//! A `SponsorEntry` is one sponsor's contribution record, possibly bound to
//! a position. Entries are created from a validated `SponsorDraft` by the
//! ledger, transition payment status on processor confirmation, and are
//! never deleted while the underlying payment record exists.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SponsorBoardError};
use crate::types::{
    CampaignId, DisplaySize, EntryId, LogoApprovalStatus, PaymentMethod, PaymentStatus,
    PlanAudience, PositionId, SponsorType,
};

/// What a sponsor submits when contributing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SponsorDraft {
    pub name: String,
    /// Name rendered on the layout; falls back to `name` when empty
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub message: String,
    /// Contribution in minor currency units. Ignored for fixed/positional
    /// claims, where the position price is authoritative.
    #[serde(default)]
    pub amount: u64,
    #[serde(default)]
    pub sponsor_type: SponsorType,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

impl SponsorDraft {
    /// Plain text sponsor draft
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: String::new(),
            message: String::new(),
            amount: 0,
            sponsor_type: SponsorType::Text,
            logo_url: None,
            payment_method: PaymentMethod::Card,
        }
    }

    /// Logo sponsor draft; `logo_url` must point at an already-uploaded
    /// image (the upload collaborator runs before the ledger is involved)
    pub fn logo(name: impl Into<String>, logo_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: String::new(),
            message: String::new(),
            amount: 0,
            sponsor_type: SponsorType::Logo,
            logo_url: Some(logo_url.into()),
            payment_method: PaymentMethod::Card,
        }
    }

    /// Set the contribution amount (pay-what-you-want campaigns)
    pub fn with_amount(mut self, amount: u64) -> Self {
        self.amount = amount;
        self
    }

    /// Validate the draft before the ledger accepts it.
    ///
    /// # Errors
    ///
    /// `Validation` if the name is empty or a logo draft carries no URL.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(SponsorBoardError::validation("sponsor name is required"));
        }
        if self.sponsor_type == SponsorType::Logo
            && self.logo_url.as_deref().map_or(true, |u| u.trim().is_empty())
        {
            return Err(SponsorBoardError::validation(
                "logo sponsors must supply a stored logo URL",
            ));
        }
        Ok(())
    }
}

/// One sponsor's contribution record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SponsorEntry {
    pub id: EntryId,
    pub campaign_id: CampaignId,
    /// Set iff the campaign is fixed/positional
    pub position_id: Option<PositionId>,
    pub name: String,
    pub display_name: String,
    #[serde(default)]
    pub message: String,
    /// Minor currency units
    pub amount: u64,
    pub sponsor_type: SponsorType,
    pub logo_url: Option<String>,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
    /// Meaningful only when `sponsor_type` is `Logo`
    pub logo_approval: LogoApprovalStatus,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    /// Unix seconds at creation; tie-breaker for deterministic ordering
    pub created_at: u64,
    /// Last computed display metrics. Derived view state: recomputed on
    /// every render, persisted only for fast reads.
    #[serde(default)]
    pub display_size: Option<DisplaySize>,
    #[serde(default)]
    pub font_size_px: Option<u32>,
    #[serde(default)]
    pub logo_width_px: Option<u32>,
}

impl SponsorEntry {
    /// Build a new pending entry from a validated draft
    pub fn from_draft(
        id: EntryId,
        campaign_id: CampaignId,
        position_id: Option<PositionId>,
        amount: u64,
        draft: SponsorDraft,
        created_at: u64,
    ) -> Self {
        let display_name = if draft.display_name.trim().is_empty() {
            draft.name.clone()
        } else {
            draft.display_name.clone()
        };
        Self {
            id,
            campaign_id,
            position_id,
            name: draft.name,
            display_name,
            message: draft.message,
            amount,
            sponsor_type: draft.sponsor_type,
            logo_url: draft.logo_url,
            payment_status: PaymentStatus::Pending,
            payment_method: draft.payment_method,
            logo_approval: LogoApprovalStatus::Pending,
            rejection_reason: None,
            created_at,
            display_size: None,
            font_size_px: None,
            logo_width_px: None,
        }
    }

    /// Check if this entry holds a position claim (pending or paid)
    pub fn is_active(&self) -> bool {
        self.payment_status.is_active()
    }

    /// Visibility rule shared by all layout strategies.
    ///
    /// Public: `paid` AND (text OR approved logo). Owner: additionally
    /// pending entries, so organizers can preview in-flight sponsorships.
    pub fn is_visible_to(&self, audience: PlanAudience) -> bool {
        let payment_ok = match audience {
            PlanAudience::Public => self.payment_status == PaymentStatus::Paid,
            PlanAudience::Owner => self.payment_status.is_active(),
        };
        if !payment_ok {
            return false;
        }
        match self.sponsor_type {
            SponsorType::Text => true,
            SponsorType::Logo => match audience {
                PlanAudience::Public => self.logo_approval == LogoApprovalStatus::Approved,
                // Owners see their own moderation backlog elsewhere; the
                // preview plan still only places approved or pending logos
                PlanAudience::Owner => self.logo_approval != LogoApprovalStatus::Rejected,
            },
        }
    }
}

/// Seed sponsor for campaign fixture files: declarative description of an
/// entry that the CLI replays through the ledger (claim, then confirm)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SponsorSeed {
    #[serde(default)]
    pub position: Option<PositionId>,
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub amount: u64,
    #[serde(default)]
    pub sponsor_type: SponsorType,
    #[serde(default)]
    pub logo_url: Option<String>,
    /// Whether the seed is replayed as a confirmed payment
    #[serde(default = "default_true")]
    pub paid: bool,
    /// Moderation outcome to apply after creation (logo seeds only)
    #[serde(default)]
    pub logo_approved: Option<bool>,
}

fn default_true() -> bool {
    true
}

impl SponsorSeed {
    /// Convert the seed into a submission draft
    pub fn to_draft(&self) -> SponsorDraft {
        SponsorDraft {
            name: self.name.clone(),
            display_name: self.display_name.clone(),
            message: self.message.clone(),
            amount: self.amount,
            sponsor_type: self.sponsor_type,
            logo_url: self.logo_url.clone(),
            payment_method: PaymentMethod::Card,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paid_text_entry() -> SponsorEntry {
        let mut entry = SponsorEntry::from_draft(
            1,
            "c1".to_string(),
            Some("3".to_string()),
            5000,
            SponsorDraft::text("Acme Corp"),
            1000,
        );
        entry.payment_status = PaymentStatus::Paid;
        entry
    }

    #[test]
    fn test_draft_validation_requires_name() {
        assert!(SponsorDraft::text("  ").validate().is_err());
        assert!(SponsorDraft::text("Acme").validate().is_ok());
    }

    #[test]
    fn test_logo_draft_requires_url() {
        let mut draft = SponsorDraft::logo("Acme", "https://cdn.example/acme.png");
        assert!(draft.validate().is_ok());

        draft.logo_url = None;
        assert!(draft.validate().is_err());

        draft.logo_url = Some("   ".to_string());
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_display_name_falls_back_to_name() {
        let entry = paid_text_entry();
        assert_eq!(entry.display_name, "Acme Corp");

        let mut draft = SponsorDraft::text("Acme Corp");
        draft.display_name = "ACME".to_string();
        let entry =
            SponsorEntry::from_draft(2, "c1".to_string(), None, 100, draft, 1000);
        assert_eq!(entry.display_name, "ACME");
    }

    #[test]
    fn test_paid_text_entry_is_public() {
        let entry = paid_text_entry();
        assert!(entry.is_visible_to(PlanAudience::Public));
        assert!(entry.is_visible_to(PlanAudience::Owner));
    }

    #[test]
    fn test_pending_entry_owner_only() {
        let mut entry = paid_text_entry();
        entry.payment_status = PaymentStatus::Pending;
        assert!(!entry.is_visible_to(PlanAudience::Public));
        assert!(entry.is_visible_to(PlanAudience::Owner));
    }

    #[test]
    fn test_unapproved_logo_never_public() {
        let mut entry = paid_text_entry();
        entry.sponsor_type = SponsorType::Logo;
        entry.logo_url = Some("https://cdn.example/logo.png".to_string());

        entry.logo_approval = LogoApprovalStatus::Pending;
        assert!(!entry.is_visible_to(PlanAudience::Public));

        entry.logo_approval = LogoApprovalStatus::Rejected;
        assert!(!entry.is_visible_to(PlanAudience::Public));
        assert!(!entry.is_visible_to(PlanAudience::Owner));

        entry.logo_approval = LogoApprovalStatus::Approved;
        assert!(entry.is_visible_to(PlanAudience::Public));
    }

    #[test]
    fn test_failed_entry_invisible_everywhere() {
        let mut entry = paid_text_entry();
        entry.payment_status = PaymentStatus::Failed;
        assert!(!entry.is_visible_to(PlanAudience::Public));
        assert!(!entry.is_visible_to(PlanAudience::Owner));
    }

    #[test]
    fn test_seed_to_draft() {
        let seed = SponsorSeed {
            position: Some("2".to_string()),
            name: "Acme".to_string(),
            display_name: String::new(),
            message: "Go team".to_string(),
            amount: 5000,
            sponsor_type: SponsorType::Text,
            logo_url: None,
            paid: true,
            logo_approved: None,
        };
        let draft = seed.to_draft();
        assert_eq!(draft.name, "Acme");
        assert_eq!(draft.message, "Go team");
        draft.validate().unwrap();
    }
}
