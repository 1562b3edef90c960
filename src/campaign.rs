//! Campaign definition, pricing configuration, and file handling.
//!
//! A campaign is the unit of fundraising: it owns a pricing model, a layout
//! style, and (for fixed/positional campaigns) a position template. Campaign
//! definitions are serde-(de)serializable so organizers can keep them as
//! JSON files; see [`CampaignFile`].

use anyhow::{Context, Result as AnyResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Result, SponsorBoardError};
use crate::position::Position;
use crate::sponsor::SponsorSeed;
use crate::types::{CampaignId, CampaignType, LayoutStyle, SponsorDisplayType};

/// Pricing rules for a campaign.
///
/// The variant must agree with the campaign's `campaign_type`; see
/// [`Campaign::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum PricingConfig {
    /// Every position costs the same price (minor currency units)
    Fixed { price: u64 },
    /// Prices live on the individual positions of the template
    PerPosition,
    /// Sponsors choose their amount, at or above `min`
    PayWhatYouWant {
        min: u64,
        suggested: u64,
        /// Tier assignment rule for the size calculator
        #[serde(default)]
        tier_policy: TierPolicy,
    },
}

/// How pay-what-you-want amounts are bucketed into display tiers.
///
/// The assignment rule is deliberately a policy, not a hard-coded formula:
/// organizers who want stable tiers regardless of the sponsor population
/// use `Thresholds`; everyone else gets relative `Percentile` ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum TierPolicy {
    /// Rank within the currently paid amounts, quartile buckets.
    ///
    /// Because the population evolves, two sponsors who paid the same
    /// amount at different times may sit in different tiers until the
    /// ranking stabilizes. Accepted property of relative sizing.
    #[default]
    Percentile,
    /// Fixed cut points: below `cuts[0]` small, below `cuts[1]` medium,
    /// below `cuts[2]` large, otherwise xlarge.
    Thresholds { cuts: [u64; 3] },
}

/// A single fundraising drive with its own pricing, layout, and position set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: CampaignId,
    /// URL-safe handle used by the public API
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub campaign_type: CampaignType,
    pub pricing: PricingConfig,
    #[serde(default)]
    pub layout_style: LayoutStyle,
    #[serde(default)]
    pub sponsor_display: SponsorDisplayType,
    /// ISO 4217 code, e.g. "USD" - passed through to renderers untouched
    pub currency: String,
    #[serde(default)]
    pub is_closed: bool,
    /// Unix seconds; campaign accepts claims from this instant
    #[serde(default)]
    pub start_date: Option<u64>,
    /// Unix seconds; claims are refused after this instant
    #[serde(default)]
    pub end_date: Option<u64>,
    /// Fundraising target in minor units, for progress reporting
    #[serde(default)]
    pub goal_amount: Option<u64>,
}

impl Campaign {
    /// Validate internal consistency of the campaign definition.
    ///
    /// # Errors
    ///
    /// `Validation` if the pricing variant disagrees with the campaign
    /// type, a price/minimum is zero, or the date window is inverted.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() || self.slug.is_empty() {
            return Err(SponsorBoardError::validation(
                "campaign id and slug must be non-empty",
            ));
        }

        match (&self.campaign_type, &self.pricing) {
            (CampaignType::Fixed, PricingConfig::Fixed { price }) => {
                if *price == 0 {
                    return Err(SponsorBoardError::validation(
                        "fixed campaign price must be greater than zero",
                    ));
                }
            }
            (CampaignType::Positional, PricingConfig::PerPosition) => {}
            (
                CampaignType::PayWhatYouWant,
                PricingConfig::PayWhatYouWant { min, suggested, tier_policy },
            ) => {
                if *min == 0 {
                    return Err(SponsorBoardError::validation(
                        "pay-what-you-want minimum must be greater than zero",
                    ));
                }
                if suggested < min {
                    return Err(SponsorBoardError::validation(format!(
                        "suggested amount {} is below the minimum {}",
                        suggested, min
                    )));
                }
                if let TierPolicy::Thresholds { cuts } = tier_policy {
                    if !(cuts[0] < cuts[1] && cuts[1] < cuts[2]) {
                        return Err(SponsorBoardError::validation(
                            "threshold cuts must be strictly ascending",
                        ));
                    }
                }
            }
            (ty, pricing) => {
                return Err(SponsorBoardError::validation(format!(
                    "campaign type {} does not match pricing model {:?}",
                    ty, pricing
                )));
            }
        }

        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(SponsorBoardError::validation(
                    "end date is before start date",
                ));
            }
        }

        Ok(())
    }

    /// Check whether the campaign accepts new claims/contributions at `now`
    /// (unix seconds)
    pub fn is_open_at(&self, now: u64) -> bool {
        if self.is_closed {
            return false;
        }
        if let Some(start) = self.start_date {
            if now < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if now > end {
                return false;
            }
        }
        true
    }

    /// Minimum acceptable contribution for pay-what-you-want campaigns
    pub fn minimum_amount(&self) -> Option<u64> {
        match self.pricing {
            PricingConfig::PayWhatYouWant { min, .. } => Some(min),
            _ => None,
        }
    }

    /// Apply an organizer edit, refusing changes that would retroactively
    /// reinterpret sold positions.
    ///
    /// Changing `campaign_type` or pricing after any sponsor entry exists
    /// is rejected outright rather than attempted and reconciled.
    ///
    /// # Errors
    ///
    /// `Validation` if the update touches type/pricing while sponsors
    /// exist, or if the updated campaign fails [`Campaign::validate`].
    pub fn apply_update(&mut self, update: CampaignUpdate, has_sponsors: bool) -> Result<()> {
        if has_sponsors {
            if let Some(new_type) = update.campaign_type {
                if new_type != self.campaign_type {
                    return Err(SponsorBoardError::validation(
                        "cannot change campaign type after sponsors exist",
                    ));
                }
            }
            if let Some(ref new_pricing) = update.pricing {
                if *new_pricing != self.pricing {
                    return Err(SponsorBoardError::validation(
                        "cannot change pricing after sponsors exist",
                    ));
                }
            }
        }

        let mut updated = self.clone();
        if let Some(ty) = update.campaign_type {
            updated.campaign_type = ty;
        }
        if let Some(pricing) = update.pricing {
            updated.pricing = pricing;
        }
        if let Some(description) = update.description {
            updated.description = description;
        }
        if let Some(start) = update.start_date {
            updated.start_date = start;
        }
        if let Some(end) = update.end_date {
            updated.end_date = end;
        }
        if let Some(closed) = update.is_closed {
            updated.is_closed = closed;
        }

        updated.validate()?;
        *self = updated;
        Ok(())
    }
}

/// Partial organizer edit of a campaign.
///
/// `None` fields are left untouched. Date fields use a nested `Option` so
/// an update can clear a date (`Some(None)`) as well as set one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignUpdate {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<Option<u64>>,
    #[serde(default)]
    pub end_date: Option<Option<u64>>,
    #[serde(default)]
    pub is_closed: Option<bool>,
    #[serde(default)]
    pub campaign_type: Option<CampaignType>,
    #[serde(default)]
    pub pricing: Option<PricingConfig>,
}

/// On-disk campaign definition: the campaign, its position template, and
/// optional seed sponsors (fixtures for demos and tests)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignFile {
    pub campaign: Campaign,
    #[serde(default)]
    pub positions: Vec<Position>,
    #[serde(default)]
    pub sponsors: Vec<SponsorSeed>,
}

impl CampaignFile {
    /// Load a campaign definition from a JSON file
    pub fn load(path: &Path) -> AnyResult<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read campaign file: {}", path.display()))?;
        let file: CampaignFile = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse campaign file: {}", path.display()))?;
        Ok(file)
    }

    /// Save the campaign definition to a JSON file (pretty-printed)
    pub fn save(&self, path: &Path) -> AnyResult<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize campaign")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write campaign file: {}", path.display()))?;
        Ok(())
    }
}
