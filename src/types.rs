//! Type-safe campaign and sponsor vocabulary for sponsorboard
//!
//! This module replaces stringly-typed configuration with proper Rust enums
//! that provide compile-time validation and exhaustive matching.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Identifier of a sponsor entry, assigned by the ledger.
pub type EntryId = u64;

/// Identifier of a position within a campaign's layout template.
pub type PositionId = String;

/// Identifier of a campaign.
pub type CampaignId = String;

/// How a campaign prices and allocates its slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
pub enum CampaignType {
    /// Every slot costs the same fixed price; sponsors pick a position
    #[default]
    #[strum(serialize = "fixed")]
    Fixed,
    /// Slots carry individual prices; sponsors pick a position
    #[strum(serialize = "positional")]
    Positional,
    /// No positions; sponsors contribute any amount at or above a minimum
    #[strum(serialize = "pay_what_you_want")]
    PayWhatYouWant,
}

impl CampaignType {
    /// Check if this campaign type allocates positions through the ledger
    pub fn uses_positions(&self) -> bool {
        matches!(self, Self::Fixed | Self::Positional)
    }
}

/// Rendering strategy for a campaign's public sponsor display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
pub enum LayoutStyle {
    /// Strict 1:1 template-position-to-claimant mapping, template order
    #[default]
    #[strum(serialize = "grid")]
    Grid,
    /// Sorted by display size descending
    #[strum(serialize = "size_ordered")]
    SizeOrdered,
    /// Sorted by contribution amount descending
    #[strum(serialize = "amount_ordered")]
    AmountOrdered,
    /// Positions grouped by section tag with availability counts
    #[strum(serialize = "section_based")]
    SectionBased,
    /// Deterministic packed word cloud driven by display size
    #[strum(serialize = "word_cloud")]
    WordCloud,
}

impl LayoutStyle {
    /// Check if this style renders from the position template (as opposed
    /// to a flowed list of displayable sponsors)
    pub fn is_template_driven(&self) -> bool {
        matches!(self, Self::Grid | Self::SectionBased)
    }
}

/// What kind of sponsor representation a campaign accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
pub enum SponsorDisplayType {
    #[strum(serialize = "text_only")]
    TextOnly,
    #[strum(serialize = "logo_only")]
    LogoOnly,
    #[default]
    #[strum(serialize = "both")]
    Both,
}

impl SponsorDisplayType {
    /// Check if this display type admits the given sponsor kind
    pub fn admits(&self, sponsor_type: SponsorType) -> bool {
        match self {
            Self::TextOnly => sponsor_type == SponsorType::Text,
            Self::LogoOnly => sponsor_type == SponsorType::Logo,
            Self::Both => true,
        }
    }
}

/// Kind of a single sponsor entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum SponsorType {
    #[default]
    #[strum(serialize = "text")]
    Text,
    #[strum(serialize = "logo")]
    Logo,
}

/// Payment lifecycle of a sponsor entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    #[strum(serialize = "pending")]
    Pending,
    #[strum(serialize = "paid")]
    Paid,
    #[strum(serialize = "failed")]
    Failed,
}

impl PaymentStatus {
    /// Check if this status still holds a position claim
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Paid)
    }

    /// Check if this status is settled (no further payment transitions)
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Paid | Self::Failed)
    }
}

/// Outcome reported by the payment collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum PaymentOutcome {
    #[strum(serialize = "succeeded")]
    Succeeded,
    #[strum(serialize = "failed")]
    Failed,
}

/// Payment method recorded on an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
pub enum PaymentMethod {
    #[default]
    #[strum(serialize = "card")]
    Card,
    #[strum(serialize = "bank_transfer")]
    BankTransfer,
    #[strum(serialize = "cash")]
    Cash,
    #[strum(serialize = "other")]
    Other,
}

/// Moderation state of an uploaded logo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum LogoApprovalStatus {
    #[default]
    #[strum(serialize = "pending")]
    Pending,
    #[strum(serialize = "approved")]
    Approved,
    #[strum(serialize = "rejected")]
    Rejected,
}

impl LogoApprovalStatus {
    /// Check if this is a terminal moderation state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

/// Discrete visual prominence bucket for a sponsor
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[derive(Serialize, Deserialize, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum DisplaySize {
    #[default]
    #[strum(serialize = "small")]
    Small,
    #[strum(serialize = "medium")]
    Medium,
    #[strum(serialize = "large")]
    Large,
    #[strum(serialize = "xlarge")]
    XLarge,
}

impl DisplaySize {
    /// Numeric rank: xlarge:4 > large:3 > medium:2 > small:1
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Small => 1,
            Self::Medium => 2,
            Self::Large => 3,
            Self::XLarge => 4,
        }
    }

    /// Font size in pixels for text sponsors.
    ///
    /// The pixel table is campaign-independent: every campaign maps the
    /// four tiers to the same metrics, so two campaigns never disagree on
    /// what "large" means visually.
    pub const fn font_px(self) -> u32 {
        match self {
            Self::Small => 14,
            Self::Medium => 18,
            Self::Large => 24,
            Self::XLarge => 32,
        }
    }

    /// Logo width in pixels for logo sponsors (same fixed table)
    pub const fn logo_width_px(self) -> u32 {
        match self {
            Self::Small => 60,
            Self::Medium => 90,
            Self::Large => 120,
            Self::XLarge => 160,
        }
    }

    /// All tiers in ascending prominence order
    pub const fn all_tiers() -> &'static [Self] {
        &[Self::Small, Self::Medium, Self::Large, Self::XLarge]
    }
}

/// Who a placement plan is rendered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum PlanAudience {
    /// Anonymous visitors: paid entries with approved logos only
    #[default]
    #[strum(serialize = "public")]
    Public,
    /// Campaign organizer: additionally sees pending entries, marked as such
    #[strum(serialize = "owner")]
    Owner,
}
