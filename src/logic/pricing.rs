//! Pricing & Size-Tier Calculator
//!
//! Translates contribution amounts into display prominence. Pure functions
//! throughout: given the same pricing config and sponsor population, the
//! output is identical, so callers may recompute on every render.
//!
//! # Policy
//!
//! | Campaign type     | Tier source |
//! |-------------------|-------------|
//! | Fixed/Positional  | Position price, bracketed over the template's distinct prices |
//! | PayWhatYouWant    | `TierPolicy`: percentile rank among paid amounts, or fixed thresholds |
//!
//! Pixel metrics come from the fixed, campaign-independent table on
//! [`DisplaySize`]; they are derived view state, never authoritative.
//!
//! # Design
//!
//! - **Pure logic**: No I/O, no side effects - only computes tiers
//! - **Deterministic**: identical price ⇒ identical size, always
//! - **Monotonic**: a higher amount never maps to a smaller tier

use crate::campaign::TierPolicy;
use crate::types::DisplaySize;

/// Computed display metrics for one sponsor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayMetrics {
    pub size: DisplaySize,
    pub font_px: u32,
    pub logo_width_px: u32,
}

impl DisplayMetrics {
    fn of(size: DisplaySize) -> Self {
        Self {
            size,
            font_px: size.font_px(),
            logo_width_px: size.logo_width_px(),
        }
    }
}

/// Tier for a fixed/positional sponsor, from its position price.
///
/// The distinct prices of the template are split into four equal runs;
/// a position's tier is the run its price falls into. With fewer than
/// four distinct prices the lower tiers are used first, so a single-price
/// template renders uniformly small and a two-price template splits
/// small/large.
pub fn size_for_position_price(template_prices: &[u64], price: u64) -> DisplayMetrics {
    let mut distinct: Vec<u64> = template_prices.to_vec();
    distinct.sort_unstable();
    distinct.dedup();

    if distinct.is_empty() {
        return DisplayMetrics::of(DisplaySize::Small);
    }

    // Index of the price among the distinct prices; unknown prices slot
    // in by rank so the mapping stays monotonic
    let rank = distinct.iter().filter(|p| **p < price).count();
    let tier_index = (rank * 4) / distinct.len();
    DisplayMetrics::of(tier_from_index(tier_index))
}

/// Tier for a pay-what-you-want sponsor under the campaign's policy.
///
/// `paid_amounts` is the current population of confirmed amounts in the
/// same campaign (including this sponsor's, if already paid). Because the
/// population evolves, the same amount may land in different tiers at
/// different times under the percentile policy; that relativity is the
/// point of the policy.
pub fn size_for_amount(
    policy: TierPolicy,
    amount: u64,
    paid_amounts: &[u64],
) -> DisplayMetrics {
    let size = match policy {
        TierPolicy::Thresholds { cuts } => {
            if amount < cuts[0] {
                DisplaySize::Small
            } else if amount < cuts[1] {
                DisplaySize::Medium
            } else if amount < cuts[2] {
                DisplaySize::Large
            } else {
                DisplaySize::XLarge
            }
        }
        TierPolicy::Percentile => {
            if paid_amounts.is_empty() {
                DisplaySize::Small
            } else {
                let below = paid_amounts.iter().filter(|a| **a < amount).count();
                let tier_index = (below * 4) / paid_amounts.len();
                tier_from_index(tier_index)
            }
        }
    };
    DisplayMetrics::of(size)
}

fn tier_from_index(index: usize) -> DisplaySize {
    match index {
        0 => DisplaySize::Small,
        1 => DisplaySize::Medium,
        2 => DisplaySize::Large,
        _ => DisplaySize::XLarge,
    }
}
