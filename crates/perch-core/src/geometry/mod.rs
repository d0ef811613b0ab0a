//! Panel placement computation.
//!
//! Pure input -> output: a monitor snapshot, the current settings, and the
//! shell's tracked edge actors go in; a placement rectangle plus orientation
//! and dock sizing come out. The component re-runs this on every monitor or
//! settings change and applies the result wholesale, so the computation must
//! be idempotent and total over all four edges.

use crate::config::{DashSettings, Edge, Orientation};

/// Fraction of the monitor width an actor must span to count as an edge bar.
const WIDE_ACTOR_RATIO: f64 = 0.8;
/// Exclusive height bounds for an actor to count as an edge bar.
const BAR_HEIGHT_MIN: i32 = 20;
const BAR_HEIGHT_MAX: i32 = 200;
/// Distance from a monitor edge within which a bar is attributed to it.
const EDGE_SLACK: i32 = 50;

/// Primary monitor geometry, snapshotted fresh on every recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorGeometry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Geometry of one shell-tracked screen actor. The tracker carries no
/// semantic tags, so bars are recognized by shape alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorGeometry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub visible: bool,
}

/// Worst-case occlusion on the top and bottom monitor edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeOffsets {
    pub top: i32,
    pub bottom: i32,
}

/// Classify tracked actors into top/bottom edge bars and fold out the
/// maximum height per edge. Actors that are invisible, narrower than
/// [`WIDE_ACTOR_RATIO`] of the monitor, or outside the bar height range are
/// ignored; an edge with no match contributes 0.
pub fn edge_offsets(monitor: &MonitorGeometry, actors: &[ActorGeometry]) -> EdgeOffsets {
    let mut offsets = EdgeOffsets::default();

    for actor in actors {
        if !actor.visible {
            continue;
        }

        let wide_enough = actor.width as f64 >= monitor.width as f64 * WIDE_ACTOR_RATIO;
        let bar_like = actor.height > BAR_HEIGHT_MIN && actor.height < BAR_HEIGHT_MAX;
        if !wide_enough || !bar_like {
            continue;
        }

        if actor.y <= monitor.y + EDGE_SLACK {
            offsets.top = offsets.top.max(actor.height);
        } else if actor.y >= monitor.y + monitor.height - actor.height - EDGE_SLACK {
            offsets.bottom = offsets.bottom.max(actor.height);
        }
    }

    offsets
}

/// Computed placement for the managed panel and the dock inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub orientation: Orientation,
    /// Cross-axis space left for the dock after padding. May go
    /// non-positive; clamping is left to the dock widget downstream.
    pub available_size: i32,
    pub icon_size: i32,
}

/// Place the panel on the configured edge, shifted and shrunk around the
/// detected edge bars.
///
/// Top/bottom placements span the full monitor width at `dash_size`
/// thickness; left/right placements span the height remaining between the
/// top and bottom offsets. A `dash_size` larger than the space left by an
/// opposite-edge bar is not clamped and can still overlap it.
pub fn compute_placement(
    monitor: &MonitorGeometry,
    settings: &DashSettings,
    actors: &[ActorGeometry],
) -> Placement {
    let offsets = edge_offsets(monitor, actors);
    let thickness = settings.dash_size;

    let (x, y, width, height) = match settings.dash_position {
        Edge::Top => (
            monitor.x,
            monitor.y + offsets.top,
            monitor.width,
            thickness,
        ),
        Edge::Bottom => (
            monitor.x,
            monitor.y + monitor.height - thickness - offsets.bottom,
            monitor.width,
            thickness,
        ),
        Edge::Left => (
            monitor.x,
            monitor.y + offsets.top,
            thickness,
            monitor.height - offsets.top - offsets.bottom,
        ),
        Edge::Right => (
            monitor.x + monitor.width - thickness,
            monitor.y + offsets.top,
            thickness,
            monitor.height - offsets.top - offsets.bottom,
        ),
    };

    let available_size = width.min(height) - 2 * settings.panel_padding;
    let icon_size = settings.icon_size.min(available_size);

    Placement {
        x,
        y,
        width,
        height,
        orientation: settings.dash_position.orientation(),
        available_size,
        icon_size,
    }
}
