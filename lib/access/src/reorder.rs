//! Moving a row up or down in the admin lists.
//!
//! A move swaps the `display_order` of two neighbouring rows with two
//! independent update calls. Nothing makes the pair atomic: if the second
//! call fails, the first row already carries its neighbour's order and the
//! two rows share an order until someone fixes it by hand.

use crate::api::{AdminApi, UpdateRequest, UpdateResponse};
use crate::error::ReorderError;
use folio_content::{ContentTable, PortfolioProject, Skill};
use folio_core::{DiscordId, RecordId};
use rootcause::prelude::Report;
use serde_json::json;
use tracing::{instrument, warn};

/// The part of an ordered row a move needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderedRow {
    pub id: RecordId,
    pub display_order: i32,
}

impl From<&Skill> for OrderedRow {
    fn from(skill: &Skill) -> Self {
        Self {
            id: skill.id,
            display_order: skill.display_order,
        }
    }
}

impl From<&PortfolioProject> for OrderedRow {
    fn from(project: &PortfolioProject) -> Self {
        Self {
            id: project.id,
            display_order: project.display_order,
        }
    }
}

/// Which way to move a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the start of the list.
    Up,
    /// Towards the end of the list.
    Down,
}

/// Returns the row `id` would swap with, given rows in display order.
///
/// `None` if `id` is absent or already at that end of the list.
#[must_use]
pub fn adjacent(rows: &[OrderedRow], id: RecordId, direction: Direction) -> Option<OrderedRow> {
    let index = rows.iter().position(|row| row.id == id)?;
    let neighbour = match direction {
        Direction::Up => index.checked_sub(1)?,
        Direction::Down => index + 1,
    };
    rows.get(neighbour).copied()
}

/// Swaps the display order of `current` and `target`.
///
/// Issues exactly two update calls: `current` takes `target`'s order, then
/// `target` takes `current`'s. A failed second call surfaces as
/// `ReorderError::SecondUpdate` with the first write left in place.
#[instrument(skip(api), fields(table = %table))]
pub async fn swap_display_order<A: AdminApi + ?Sized>(
    api: &A,
    discord_id: &DiscordId,
    table: ContentTable,
    current: OrderedRow,
    target: OrderedRow,
) -> Result<(), Report<ReorderError>> {
    if !table.is_ordered() {
        return Err(ReorderError::NotOrdered { table }.into());
    }

    set_order(api, discord_id, table, current.id, target.display_order)
        .await
        .map_err(|reason| ReorderError::FirstUpdate { reason })?;

    set_order(api, discord_id, table, target.id, current.display_order)
        .await
        .map_err(|reason| {
            warn!(
                first = %current.id,
                second = %target.id,
                "reorder left two rows sharing a display order"
            );
            ReorderError::SecondUpdate { reason }
        })?;

    Ok(())
}

async fn set_order<A: AdminApi + ?Sized>(
    api: &A,
    discord_id: &DiscordId,
    table: ContentTable,
    id: RecordId,
    display_order: i32,
) -> Result<(), String> {
    let request = UpdateRequest::new(
        discord_id.clone(),
        table.as_str(),
        json!({ "display_order": display_order }),
        Some(id.as_ulid().to_string()),
    );
    match api.update(&request).await {
        Ok(UpdateResponse { success: true, .. }) => Ok(()),
        Ok(UpdateResponse { error, .. }) => {
            Err(error.unwrap_or_else(|| "update rejected".to_string()))
        }
        Err(report) => Err(report.current_context().to_string()),
    }
}
