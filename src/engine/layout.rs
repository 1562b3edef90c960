//! Layout Rendering Engine
//!
//! Translates a campaign's sponsor set, layout style, and position template
//! into an ordered `PlacementPlan` ready to render.
//!
//! # Supported Strategies
//!
//! | Style         | Output |
//! |---------------|--------|
//! | Grid          | Every template position in natural order, claimant or empty |
//! | SizeOrdered   | Displayable sponsors, size desc → amount desc → created asc |
//! | AmountOrdered | Displayable sponsors, amount desc → created asc |
//! | SectionBased  | Sections with price, totals, and open selection targets |
//! | WordCloud     | Deterministic non-overlapping shelf packing, largest first |
//!
//! # Design
//!
//! - **Pure logic**: No I/O, no side effects - only generates the plan
//! - **Deterministic**: identical input produces identical output; the
//!   word cloud uses no randomness, so layouts are reproducible for tests
//!   and caching
//! - **Recomputed**: display metrics are derived on every build, never
//!   trusted from persisted state

use std::collections::BTreeMap;
use std::fmt;

use crate::campaign::{Campaign, PricingConfig};
use crate::error::{Result, SponsorBoardError};
use crate::logic::pricing;
use crate::position::Position;
use crate::sponsor::SponsorEntry;
use crate::types::{
    CampaignId, DisplaySize, EntryId, LayoutStyle, PaymentStatus, PlanAudience, PositionId,
    SponsorType,
};

/// Canvas width (abstract px) for word-cloud packing
const CLOUD_CANVAS_WIDTH: u32 = 1000;
/// Padding around each packed cloud item
const CLOUD_ITEM_PADDING: u32 = 8;

/// A sponsor as placed by the engine, with freshly computed metrics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedSponsor {
    pub entry_id: EntryId,
    pub display_name: String,
    pub message: String,
    pub sponsor_type: SponsorType,
    /// Present only when the logo may actually be shown to this audience
    pub logo_url: Option<String>,
    pub amount: u64,
    pub size: DisplaySize,
    pub font_px: u32,
    pub logo_width_px: u32,
    /// True in owner plans for entries whose payment has not settled
    pub pending: bool,
}

/// One slot of a placement plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementSlot {
    /// A template position and its claimant, if any (grid style)
    Position {
        position_id: PositionId,
        section: Option<String>,
        price: u64,
        occupant: Option<PlacedSponsor>,
    },
    /// A sponsor in a flowed, ordered layout (size/amount ordered)
    Flow { rank: usize, sponsor: PlacedSponsor },
    /// A section summary with selection targets (section-based style)
    Section {
        name: String,
        price: u64,
        total: usize,
        taken: usize,
        remaining: usize,
        /// Unclaimed positions, the only valid click/selection targets
        open_positions: Vec<PositionId>,
    },
    /// A packed word-cloud item with its bounding box
    Cloud {
        sponsor: PlacedSponsor,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

impl fmt::Display for PlacementSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Position { position_id, occupant, .. } => match occupant {
                Some(s) => write!(f, "Position({} -> {})", position_id, s.display_name),
                None => write!(f, "Position({} -> empty)", position_id),
            },
            Self::Flow { rank, sponsor } => {
                write!(f, "Flow(#{} {} {})", rank, sponsor.display_name, sponsor.size)
            }
            Self::Section { name, taken, total, .. } => {
                write!(f, "Section({} {}/{})", name, taken, total)
            }
            Self::Cloud { sponsor, x, y, width, height } => write!(
                f,
                "Cloud({} @{},{} {}x{})",
                sponsor.display_name, x, y, width, height
            ),
        }
    }
}

/// A complete placement plan: an ordered list of slots.
#[derive(Debug, Clone)]
pub struct PlacementPlan {
    pub campaign_id: CampaignId,
    pub style: LayoutStyle,
    pub audience: PlanAudience,
    /// Ordered sequence of placement slots
    pub slots: Vec<PlacementSlot>,
}

impl PlacementPlan {
    /// Number of sponsors actually placed (empty grid cells excluded)
    pub fn placed_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| match slot {
                PlacementSlot::Position { occupant, .. } => occupant.is_some(),
                PlacementSlot::Flow { .. } | PlacementSlot::Cloud { .. } => true,
                PlacementSlot::Section { .. } => false,
            })
            .count()
    }

    /// Returns a summary of the plan for logging/display.
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Placement Plan: {} ({})", self.style, self.audience),
            format!("  Campaign: {}", self.campaign_id),
            format!("  Slots ({}):", self.slots.len()),
        ];
        for (i, slot) in self.slots.iter().enumerate() {
            lines.push(format!("    {}. {}", i + 1, slot));
        }
        lines.join("\n")
    }
}

/// Build the placement plan for a campaign snapshot.
///
/// `positions` is the campaign's template (empty for pay-what-you-want);
/// `entries` is a snapshot of all sponsor entries. Display metrics are
/// recomputed here from the current paid population.
///
/// # Errors
///
/// Returns an error if a template-driven style is requested for a
/// campaign without positions.
pub fn build_plan(
    campaign: &Campaign,
    positions: &[Position],
    entries: &[SponsorEntry],
    audience: PlanAudience,
) -> Result<PlacementPlan> {
    if campaign.layout_style.is_template_driven() && positions.is_empty() {
        return Err(SponsorBoardError::validation(format!(
            "layout style {} requires a position template",
            campaign.layout_style
        )));
    }

    let slots = match campaign.layout_style {
        LayoutStyle::Grid => plan_grid(campaign, positions, entries, audience),
        LayoutStyle::SizeOrdered => plan_size_ordered(campaign, positions, entries, audience),
        LayoutStyle::AmountOrdered => plan_amount_ordered(campaign, positions, entries, audience),
        LayoutStyle::SectionBased => plan_section_based(positions, entries),
        LayoutStyle::WordCloud => plan_word_cloud(campaign, positions, entries, audience),
    };

    let plan = PlacementPlan {
        campaign_id: campaign.id.clone(),
        style: campaign.layout_style,
        audience,
        slots,
    };
    log::debug!(
        "built {} plan for campaign '{}': {} slots, {} placed",
        plan.style,
        plan.campaign_id,
        plan.slots.len(),
        plan.placed_count()
    );
    Ok(plan)
}

// ============================================================================
// Strategy Implementations
// ============================================================================

/// Grid: strict 1:1 mapping of every template position to its claimant, in
/// the template's natural placement order. Never sorted by amount.
fn plan_grid(
    campaign: &Campaign,
    positions: &[Position],
    entries: &[SponsorEntry],
    audience: PlanAudience,
) -> Vec<PlacementSlot> {
    let mut ordered: Vec<&Position> = positions.iter().collect();
    ordered.sort_by_key(|p| p.order);

    ordered
        .iter()
        .map(|position| {
            let occupant = entries
                .iter()
                .find(|e| {
                    e.position_id.as_deref() == Some(position.id.as_str())
                        && e.is_active()
                        && e.is_visible_to(audience)
                })
                .map(|e| place(campaign, positions, entries, e, audience));
            PlacementSlot::Position {
                position_id: position.id.clone(),
                section: position.section.clone(),
                price: position.price,
                occupant,
            }
        })
        .collect()
}

/// SizeOrdered: displayable sponsors sorted by display size descending,
/// tie-broken by amount descending, then creation time ascending. The
/// total order is deterministic so renders are reproducible.
fn plan_size_ordered(
    campaign: &Campaign,
    positions: &[Position],
    entries: &[SponsorEntry],
    audience: PlanAudience,
) -> Vec<PlacementSlot> {
    let mut placed = displayable(campaign, positions, entries, audience);
    placed.sort_by(|a, b| {
        b.0.size
            .ordinal()
            .cmp(&a.0.size.ordinal())
            .then(b.0.amount.cmp(&a.0.amount))
            .then(a.1.cmp(&b.1))
            .then(a.0.entry_id.cmp(&b.0.entry_id))
    });
    placed
        .into_iter()
        .enumerate()
        .map(|(i, (sponsor, _))| PlacementSlot::Flow { rank: i + 1, sponsor })
        .collect()
}

/// AmountOrdered: same filter, sorted purely by amount descending with the
/// creation-time tie-break.
fn plan_amount_ordered(
    campaign: &Campaign,
    positions: &[Position],
    entries: &[SponsorEntry],
    audience: PlanAudience,
) -> Vec<PlacementSlot> {
    let mut placed = displayable(campaign, positions, entries, audience);
    placed.sort_by(|a, b| {
        b.0.amount
            .cmp(&a.0.amount)
            .then(a.1.cmp(&b.1))
            .then(a.0.entry_id.cmp(&b.0.entry_id))
    });
    placed
        .into_iter()
        .enumerate()
        .map(|(i, (sponsor, _))| PlacementSlot::Flow { rank: i + 1, sponsor })
        .collect()
}

/// SectionBased: template positions grouped by section tag, each reporting
/// its price, slot totals, and the open positions a sponsor may select.
fn plan_section_based(positions: &[Position], entries: &[SponsorEntry]) -> Vec<PlacementSlot> {
    // BTreeMap keyed by (first order, name) keeps section output in
    // template order and deterministic
    let mut sections: BTreeMap<(u32, String), Vec<&Position>> = BTreeMap::new();
    for position in positions {
        let name = position
            .section
            .clone()
            .unwrap_or_else(|| "general".to_string());
        let first_order = positions
            .iter()
            .filter(|p| p.section.as_deref().unwrap_or("general") == name)
            .map(|p| p.order)
            .min()
            .unwrap_or(position.order);
        sections.entry((first_order, name)).or_default().push(position);
    }

    sections
        .into_iter()
        .map(|((_, name), group)| {
            let taken: Vec<&PositionId> = entries
                .iter()
                .filter(|e| e.is_active())
                .filter_map(|e| e.position_id.as_ref())
                .collect();
            let mut open_positions: Vec<&Position> = group
                .iter()
                .filter(|p| !taken.contains(&&p.id))
                .copied()
                .collect();
            open_positions.sort_by_key(|p| p.order);

            let total = group.len();
            let remaining = open_positions.len();
            PlacementSlot::Section {
                name,
                // Sections are priced uniformly; mixed prices report the low end
                price: group.iter().map(|p| p.price).min().unwrap_or(0),
                total,
                taken: total - remaining,
                remaining,
                open_positions: open_positions.iter().map(|p| p.id.clone()).collect(),
            }
        })
        .collect()
}

/// WordCloud: size-ordered filter plus deterministic shelf packing.
///
/// Items are packed left-to-right into rows of a fixed-width canvas,
/// largest sizes first; a row wraps when the next item would overflow.
/// Every eligible sponsor appears exactly once and identical input yields
/// an identical layout.
fn plan_word_cloud(
    campaign: &Campaign,
    positions: &[Position],
    entries: &[SponsorEntry],
    audience: PlanAudience,
) -> Vec<PlacementSlot> {
    let ordered = plan_size_ordered(campaign, positions, entries, audience);

    let mut slots = Vec::with_capacity(ordered.len());
    let mut x = 0u32;
    let mut y = 0u32;
    let mut row_height = 0u32;

    for slot in ordered {
        let sponsor = match slot {
            PlacementSlot::Flow { sponsor, .. } => sponsor,
            _ => continue,
        };
        let (width, height) = cloud_item_extent(&sponsor);

        if x + width > CLOUD_CANVAS_WIDTH && x > 0 {
            // Wrap to the next shelf
            x = 0;
            y += row_height;
            row_height = 0;
        }

        slots.push(PlacementSlot::Cloud {
            x,
            y,
            width,
            height,
            sponsor,
        });
        x += width;
        row_height = row_height.max(height);
    }
    slots
}

/// Bounding box of one cloud item, derived from its display metrics
fn cloud_item_extent(sponsor: &PlacedSponsor) -> (u32, u32) {
    let (w, h) = match sponsor.sponsor_type {
        SponsorType::Logo => {
            // Logos render at tier width with a 3:2 aspect box
            (sponsor.logo_width_px, (sponsor.logo_width_px * 2) / 3)
        }
        SponsorType::Text => {
            // Text width approximates glyph advance at ~60% of font size
            let chars = sponsor.display_name.chars().count().max(1) as u32;
            ((sponsor.font_px * 6 * chars) / 10, sponsor.font_px)
        }
    };
    let w = (w + 2 * CLOUD_ITEM_PADDING).min(CLOUD_CANVAS_WIDTH);
    (w, h + 2 * CLOUD_ITEM_PADDING)
}

// ============================================================================
// Shared filtering and sizing
// ============================================================================

/// Filter entries to those displayable for the audience and compute fresh
/// metrics for each. Returns (placed sponsor, created_at) pairs so sort
/// strategies can tie-break on submission time.
fn displayable(
    campaign: &Campaign,
    positions: &[Position],
    entries: &[SponsorEntry],
    audience: PlanAudience,
) -> Vec<(PlacedSponsor, u64)> {
    entries
        .iter()
        .filter(|e| e.is_visible_to(audience))
        .filter(|e| campaign.sponsor_display.admits(e.sponsor_type))
        .map(|e| (place(campaign, positions, entries, e, audience), e.created_at))
        .collect()
}

/// Compute fresh display metrics and build the placed representation
fn place(
    campaign: &Campaign,
    positions: &[Position],
    entries: &[SponsorEntry],
    entry: &SponsorEntry,
    audience: PlanAudience,
) -> PlacedSponsor {
    let metrics = match &campaign.pricing {
        PricingConfig::Fixed { .. } | PricingConfig::PerPosition => {
            let template_prices: Vec<u64> = positions.iter().map(|p| p.price).collect();
            pricing::size_for_position_price(&template_prices, entry.amount)
        }
        PricingConfig::PayWhatYouWant { tier_policy, .. } => {
            let paid: Vec<u64> = entries
                .iter()
                .filter(|e| e.payment_status == PaymentStatus::Paid)
                .map(|e| e.amount)
                .collect();
            pricing::size_for_amount(*tier_policy, entry.amount, &paid)
        }
    };

    // A logo URL leaves the engine only when the logo is actually showable
    let logo_url = match entry.sponsor_type {
        SponsorType::Logo if entry.is_visible_to(PlanAudience::Public) => entry.logo_url.clone(),
        SponsorType::Logo if audience == PlanAudience::Owner => entry.logo_url.clone(),
        _ => None,
    };

    PlacedSponsor {
        entry_id: entry.id,
        display_name: entry.display_name.clone(),
        message: entry.message.clone(),
        sponsor_type: entry.sponsor_type,
        logo_url,
        amount: entry.amount,
        size: metrics.size,
        font_px: metrics.font_px,
        logo_width_px: metrics.logo_width_px,
        pending: entry.payment_status == PaymentStatus::Pending,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::TierPolicy;
    use crate::sponsor::SponsorDraft;
    use crate::types::{CampaignType, LogoApprovalStatus, SponsorDisplayType};

    fn pwyw_campaign(style: LayoutStyle) -> Campaign {
        Campaign {
            id: "c1".to_string(),
            slug: "banner".to_string(),
            name: "Banner".to_string(),
            description: String::new(),
            campaign_type: CampaignType::PayWhatYouWant,
            pricing: PricingConfig::PayWhatYouWant {
                min: 100,
                suggested: 2500,
                tier_policy: TierPolicy::Percentile,
            },
            layout_style: style,
            sponsor_display: SponsorDisplayType::Both,
            currency: "USD".to_string(),
            is_closed: false,
            start_date: None,
            end_date: None,
            goal_amount: None,
        }
    }

    fn paid_entry(id: EntryId, name: &str, amount: u64, created_at: u64) -> SponsorEntry {
        let mut entry = SponsorEntry::from_draft(
            id,
            "c1".to_string(),
            None,
            amount,
            SponsorDraft::text(name),
            created_at,
        );
        entry.payment_status = PaymentStatus::Paid;
        entry
    }

    fn sample_entries() -> Vec<SponsorEntry> {
        // Paid amounts [$10, $25, $100, $500] in submission order
        vec![
            paid_entry(1, "Ten", 1000, 100),
            paid_entry(2, "TwentyFive", 2500, 200),
            paid_entry(3, "Hundred", 10_000, 300),
            paid_entry(4, "FiveHundred", 50_000, 400),
        ]
    }

    fn flow_amounts(plan: &PlacementPlan) -> Vec<u64> {
        plan.slots
            .iter()
            .filter_map(|s| match s {
                PlacementSlot::Flow { sponsor, .. } => Some(sponsor.amount),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_amount_ordered_descending() {
        let campaign = pwyw_campaign(LayoutStyle::AmountOrdered);
        let plan =
            build_plan(&campaign, &[], &sample_entries(), PlanAudience::Public).unwrap();
        assert_eq!(flow_amounts(&plan), vec![50_000, 10_000, 2500, 1000]);
    }

    #[test]
    fn test_size_ordered_tiers() {
        let campaign = pwyw_campaign(LayoutStyle::SizeOrdered);
        let plan =
            build_plan(&campaign, &[], &sample_entries(), PlanAudience::Public).unwrap();

        let sizes: Vec<DisplaySize> = plan
            .slots
            .iter()
            .filter_map(|s| match s {
                PlacementSlot::Flow { sponsor, .. } => Some(sponsor.size),
                _ => None,
            })
            .collect();
        assert_eq!(sizes[0], DisplaySize::XLarge);
        assert_eq!(sizes[3], DisplaySize::Small);
        // Non-increasing prominence down the plan
        for w in sizes.windows(2) {
            assert!(w[0] >= w[1]);
        }
    }

    #[test]
    fn test_amount_tie_breaks_by_creation_time() {
        let campaign = pwyw_campaign(LayoutStyle::AmountOrdered);
        let entries = vec![
            paid_entry(2, "Later", 5000, 200),
            paid_entry(1, "Earlier", 5000, 100),
        ];
        let plan = build_plan(&campaign, &[], &entries, PlanAudience::Public).unwrap();
        let names: Vec<&str> = plan
            .slots
            .iter()
            .filter_map(|s| match s {
                PlacementSlot::Flow { sponsor, .. } => Some(sponsor.display_name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec!["Earlier", "Later"]);
    }

    #[test]
    fn test_pending_entries_public_vs_owner() {
        let campaign = pwyw_campaign(LayoutStyle::AmountOrdered);
        let mut entries = sample_entries();
        entries.push({
            let mut e = paid_entry(5, "InFlight", 7500, 500);
            e.payment_status = PaymentStatus::Pending;
            e
        });

        let public = build_plan(&campaign, &[], &entries, PlanAudience::Public).unwrap();
        assert_eq!(public.placed_count(), 4);

        let owner = build_plan(&campaign, &[], &entries, PlanAudience::Owner).unwrap();
        assert_eq!(owner.placed_count(), 5);
        let pending_marked = owner.slots.iter().any(|s| match s {
            PlacementSlot::Flow { sponsor, .. } => {
                sponsor.display_name == "InFlight" && sponsor.pending
            }
            _ => false,
        });
        assert!(pending_marked);
    }

    #[test]
    fn test_unapproved_logo_filtered_until_approved() {
        let campaign = pwyw_campaign(LayoutStyle::AmountOrdered);
        let mut logo = SponsorEntry::from_draft(
            9,
            "c1".to_string(),
            None,
            5000,
            SponsorDraft::logo("Acme", "https://cdn.example/a.png"),
            100,
        );
        logo.payment_status = PaymentStatus::Paid;
        let mut entries = vec![logo];

        let plan = build_plan(&campaign, &[], &entries, PlanAudience::Public).unwrap();
        assert_eq!(plan.placed_count(), 0);

        // Approval alone flips inclusion on the next computed plan
        entries[0].logo_approval = LogoApprovalStatus::Approved;
        let plan = build_plan(&campaign, &[], &entries, PlanAudience::Public).unwrap();
        assert_eq!(plan.placed_count(), 1);
    }

    #[test]
    fn test_display_type_filter() {
        let mut campaign = pwyw_campaign(LayoutStyle::AmountOrdered);
        campaign.sponsor_display = SponsorDisplayType::LogoOnly;

        let plan =
            build_plan(&campaign, &[], &sample_entries(), PlanAudience::Public).unwrap();
        assert_eq!(plan.placed_count(), 0);
    }

    #[test]
    fn test_grid_template_order_with_empty_cells() {
        let mut campaign = pwyw_campaign(LayoutStyle::Grid);
        campaign.campaign_type = CampaignType::Positional;
        campaign.pricing = PricingConfig::PerPosition;

        let positions = vec![
            Position { id: "1".into(), price: 5000, section: None, order: 0 },
            Position { id: "2".into(), price: 5000, section: None, order: 1 },
            Position { id: "3".into(), price: 10_000, section: None, order: 2 },
        ];
        let mut entry = paid_entry(1, "Acme", 10_000, 100);
        entry.position_id = Some("3".to_string());

        let plan =
            build_plan(&campaign, &positions, &[entry], PlanAudience::Public).unwrap();
        assert_eq!(plan.slots.len(), 3);
        assert!(matches!(
            &plan.slots[0],
            PlacementSlot::Position { occupant: None, .. }
        ));
        assert!(matches!(
            &plan.slots[2],
            PlacementSlot::Position { occupant: Some(s), .. } if s.display_name == "Acme"
        ));
        assert_eq!(plan.placed_count(), 1);
    }

    #[test]
    fn test_grid_requires_template() {
        let campaign = pwyw_campaign(LayoutStyle::Grid);
        let err = build_plan(&campaign, &[], &[], PlanAudience::Public).unwrap_err();
        assert!(matches!(err, SponsorBoardError::Validation(_)));
    }

    #[test]
    fn test_section_plan_counts_and_targets() {
        let mut campaign = pwyw_campaign(LayoutStyle::SectionBased);
        campaign.campaign_type = CampaignType::Positional;
        campaign.pricing = PricingConfig::PerPosition;

        let positions = vec![
            Position { id: "sleeve-1".into(), price: 10_000, section: Some("sleeve".into()), order: 0 },
            Position { id: "sleeve-2".into(), price: 10_000, section: Some("sleeve".into()), order: 1 },
            Position { id: "back-1".into(), price: 5000, section: Some("back".into()), order: 2 },
        ];
        let mut entry = paid_entry(1, "Acme", 10_000, 100);
        entry.position_id = Some("sleeve-1".to_string());

        let plan =
            build_plan(&campaign, &positions, &[entry], PlanAudience::Public).unwrap();
        assert_eq!(plan.slots.len(), 2);

        match &plan.slots[0] {
            PlacementSlot::Section { name, price, total, taken, remaining, open_positions } => {
                assert_eq!(name, "sleeve");
                assert_eq!(*price, 10_000);
                assert_eq!(*total, 2);
                assert_eq!(*taken, 1);
                assert_eq!(*remaining, 1);
                assert_eq!(open_positions, &vec!["sleeve-2".to_string()]);
            }
            other => panic!("expected sleeve section first, got {}", other),
        }
    }

    #[test]
    fn test_word_cloud_places_everyone_once_largest_first() {
        let campaign = pwyw_campaign(LayoutStyle::WordCloud);
        let plan =
            build_plan(&campaign, &[], &sample_entries(), PlanAudience::Public).unwrap();

        assert_eq!(plan.placed_count(), 4);

        let mut seen = Vec::new();
        let mut last_ordinal = u8::MAX;
        for slot in &plan.slots {
            if let PlacementSlot::Cloud { sponsor, .. } = slot {
                assert!(!seen.contains(&sponsor.entry_id), "sponsor placed twice");
                seen.push(sponsor.entry_id);
                assert!(sponsor.size.ordinal() <= last_ordinal);
                last_ordinal = sponsor.size.ordinal();
            }
        }
    }

    #[test]
    fn test_word_cloud_no_overlap() {
        let campaign = pwyw_campaign(LayoutStyle::WordCloud);
        let mut entries = sample_entries();
        for i in 5..30u64 {
            entries.push(paid_entry(i, &format!("Sponsor{}", i), i * 100, i * 10));
        }
        let plan = build_plan(&campaign, &[], &entries, PlanAudience::Public).unwrap();

        let boxes: Vec<(u32, u32, u32, u32)> = plan
            .slots
            .iter()
            .filter_map(|s| match s {
                PlacementSlot::Cloud { x, y, width, height, .. } => {
                    Some((*x, *y, *width, *height))
                }
                _ => None,
            })
            .collect();
        for (i, a) in boxes.iter().enumerate() {
            for b in boxes.iter().skip(i + 1) {
                let overlap_x = a.0 < b.0 + b.2 && b.0 < a.0 + a.2;
                let overlap_y = a.1 < b.1 + b.3 && b.1 < a.1 + a.3;
                assert!(!(overlap_x && overlap_y), "boxes {:?} and {:?} overlap", a, b);
            }
        }
    }

    #[test]
    fn test_word_cloud_deterministic() {
        let campaign = pwyw_campaign(LayoutStyle::WordCloud);
        let entries = sample_entries();
        let a = build_plan(&campaign, &[], &entries, PlanAudience::Public).unwrap();
        let b = build_plan(&campaign, &[], &entries, PlanAudience::Public).unwrap();
        assert_eq!(a.slots, b.slots);
    }

    #[test]
    fn test_plan_summary_not_empty() {
        let campaign = pwyw_campaign(LayoutStyle::AmountOrdered);
        let plan =
            build_plan(&campaign, &[], &sample_entries(), PlanAudience::Public).unwrap();
        let summary = plan.summary();
        assert!(summary.contains("amount_ordered"));
        assert!(summary.contains("FiveHundred"));
    }
}
