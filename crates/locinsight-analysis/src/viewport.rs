//! Map viewport: center plus zoom, moved only through selection changes.

use locinsight_core::{LatLng, StoreRecord};
use serde::Serialize;

pub const NATIONWIDE_CENTER: LatLng = LatLng {
    lat: 36.5,
    lng: 127.5,
};
pub const NATIONWIDE_ZOOM: u8 = 7;
pub const PROVINCE_ZOOM: u8 = 10;
pub const DISTRICT_ZOOM: u8 = 13;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: u8,
}

impl Viewport {
    #[must_use]
    pub const fn nationwide() -> Self {
        Self {
            center: NATIONWIDE_CENTER,
            zoom: NATIONWIDE_ZOOM,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::nationwide()
    }
}

/// Viewport centered on the first store (in dataset order) matching `predicate`.
///
/// This is not a centroid or bounds fit. Returns `None` when nothing matches
/// or when the first match has unusable coordinates; callers keep the current
/// viewport in that case.
pub(crate) fn first_match<F>(stores: &[StoreRecord], predicate: F, zoom: u8) -> Option<Viewport>
where
    F: Fn(&StoreRecord) -> bool,
{
    let target = stores.iter().find(|s| predicate(s))?;
    match target.coordinates() {
        Some(center) => Some(Viewport { center, zoom }),
        None => {
            tracing::warn!(
                store = %target.name,
                "first matching store has malformed coordinates; keeping viewport"
            );
            None
        }
    }
}
