//! Positions and layout templates.
//!
//! A position is one addressable, finite slot within a campaign's layout.
//! Positions are created at campaign setup from a template and never
//! deleted while a paid sponsor entry references them. Occupancy is owned
//! by the ledger, not stored here.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{Result, SponsorBoardError};
use crate::types::PositionId;

/// One slot in a campaign's layout template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub id: PositionId,
    /// Price in minor currency units
    pub price: u64,
    /// Optional grouping tag for section-based layouts
    #[serde(default)]
    pub section: Option<String>,
    /// Natural placement order within the template
    pub order: u32,
}

/// Builder for a campaign's position set.
///
/// Two shapes cover the layouts organizers actually use: a uniform grid
/// (rows x cols at one price) and a sectioned template (named groups, each
/// with its own slot count and price).
#[derive(Debug, Clone)]
pub struct PositionTemplate {
    positions: Vec<Position>,
}

impl PositionTemplate {
    /// Uniform grid: `rows * cols` positions, ids "1".."n", one price
    pub fn uniform(rows: u32, cols: u32, price: u64) -> Self {
        let count = rows * cols;
        let positions = (1..=count)
            .map(|n| Position {
                id: n.to_string(),
                price,
                section: None,
                order: n - 1,
            })
            .collect();
        Self { positions }
    }

    /// Sectioned template: each `(name, slots, price)` tuple becomes a
    /// group of positions with ids "<name>-1".."<name>-n"
    pub fn sectioned(sections: &[(&str, u32, u64)]) -> Self {
        let mut positions = Vec::new();
        let mut order = 0u32;
        for (name, slots, price) in sections {
            for n in 1..=*slots {
                positions.push(Position {
                    id: format!("{}-{}", name, n),
                    price: *price,
                    section: Some((*name).to_string()),
                    order,
                });
                order += 1;
            }
        }
        Self { positions }
    }

    /// Explicit position list, as loaded from a campaign file
    pub fn from_positions(positions: Vec<Position>) -> Self {
        Self { positions }
    }

    /// Validate and return the position set.
    ///
    /// # Errors
    ///
    /// `Validation` if the template is empty, has duplicate ids, or
    /// contains a zero-priced position.
    pub fn build(self) -> Result<Vec<Position>> {
        if self.positions.is_empty() {
            return Err(SponsorBoardError::validation(
                "position template must contain at least one position",
            ));
        }

        let mut seen = HashSet::new();
        for position in &self.positions {
            if position.id.is_empty() {
                return Err(SponsorBoardError::validation(
                    "position ids must be non-empty",
                ));
            }
            if !seen.insert(position.id.clone()) {
                return Err(SponsorBoardError::validation(format!(
                    "duplicate position id '{}'",
                    position.id
                )));
            }
            if position.price == 0 {
                return Err(SponsorBoardError::validation(format!(
                    "position '{}' has zero price",
                    position.id
                )));
            }
        }

        Ok(self.positions)
    }
}
