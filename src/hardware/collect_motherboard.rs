use tracing::{debug, warn};

use crate::error::QueryError;
use crate::hardware::source::HardwareManagement;
use crate::hardware::types::{Collected, Sentinel};

pub const MOTHERBOARD_NOT_FOUND: &str = "Motherboard info not found";

/// Product name of the first enumerated system board.
pub fn collect_motherboard(management: &dyn HardwareManagement) -> Collected<String> {
    if !management.is_available() {
        warn!("{} not available, skipping motherboard", management.name());
        return Collected::Sentinel(Sentinel::from_query_error(&QueryError::unavailable(
            management.name(),
        )));
    }

    let boards = match management.base_boards() {
        Ok(boards) => boards,
        Err(e) => {
            warn!("Base board query failed: {}", e);
            return Collected::Sentinel(Sentinel::from_query_error(&e));
        }
    };
    debug!("Found {} base board record(s)", boards.len());

    let clean = |s: Option<String>| s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
    let name = boards.into_iter().next().and_then(|board| {
        // Boards without a product string still usually carry a vendor
        clean(board.product).or_else(|| clean(board.manufacturer))
    });

    match name {
        Some(name) => Collected::Value(name),
        None => Collected::Sentinel(Sentinel::not_found(MOTHERBOARD_NOT_FOUND)),
    }
}
