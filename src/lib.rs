//! Sponsorboard Library
//!
//! Core functionality for slot-based sponsorship campaigns: position
//! claiming, pricing tiers, logo moderation, and layout rendering.

pub mod api;
pub mod campaign;
pub mod claim_state;
pub mod cli;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod logic;
pub mod moderation;
pub mod position;
pub mod sponsor;
pub mod types;

// Re-export main types for convenience
pub use api::{CampaignProgress, SponsorBoard};
pub use campaign::{Campaign, CampaignFile, CampaignUpdate, PricingConfig, TierPolicy};
pub use claim_state::{ClaimError, ClaimRecord, ClaimState};
pub use error::SponsorBoardError;
pub use ledger::{Availability, Ledger};
pub use moderation::ModerationError;
pub use position::{Position, PositionTemplate};
pub use sponsor::{SponsorDraft, SponsorEntry, SponsorSeed};
pub use types::{
    CampaignType, DisplaySize, EntryId, LayoutStyle, LogoApprovalStatus, PaymentMethod,
    PaymentOutcome, PaymentStatus, PlanAudience, PositionId, SponsorDisplayType, SponsorType,
};

// Layout engine
pub use engine::layout::{build_plan, PlacedSponsor, PlacementPlan, PlacementSlot};

// Pricing calculator
pub use logic::pricing::{size_for_amount, size_for_position_price, DisplayMetrics};
