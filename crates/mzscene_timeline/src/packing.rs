// SPDX-License-Identifier: MIT OR Apache-2.0
//! Sub-row packing of overlapping events for timeline rendering.
//!
//! Each lane is split into as many sub-rows as needed so that no two events
//! in the same sub-row overlap on screen. The resulting layout also carries
//! the derived pixel geometry (lane heights and offsets) so every render
//! computes identical positions.

use crate::event::{Lane, TimelineEvent};

/// Pixel height of one sub-row.
pub const LANE_HEIGHT: u32 = 24;

/// Where one event renders: its lane and sub-row within that lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Lane the event belongs to
    pub lane: Lane,
    /// Sub-row within the lane, 0-based
    pub sub_row: usize,
}

/// Derived render layout for the whole timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineLayout {
    /// One placement per event, parallel to the input slice
    pub placements: Vec<Placement>,
    /// Sub-rows in use per lane, at least 1 each
    pub max_sub_rows: [usize; Lane::COUNT],
}

impl TimelineLayout {
    /// Get the pixel height of one lane
    pub fn lane_height(&self, lane: Lane) -> u32 {
        self.max_sub_rows[lane.index()] as u32 * LANE_HEIGHT
    }

    /// Get the pixel offset of each lane's first sub-row
    pub fn lane_offsets(&self) -> [u32; Lane::COUNT] {
        let mut offsets = [0; Lane::COUNT];
        for i in 1..Lane::COUNT {
            offsets[i] = offsets[i - 1] + self.max_sub_rows[i - 1] as u32 * LANE_HEIGHT;
        }
        offsets
    }

    /// Get the total pixel height of all lanes
    pub fn total_height(&self) -> u32 {
        self.max_sub_rows
            .iter()
            .map(|&rows| rows as u32 * LANE_HEIGHT)
            .sum()
    }
}

/// Assign each event a sub-row within its lane, first-fit in array order.
///
/// Events occupy the half-open interval `[start, start + duration)`. Text
/// events always land in sub-row 0 of the text lane; the text lane renders
/// as a single always-visible row and overlap between messages is a
/// data-entry concern, not a packing one.
pub fn pack_events(events: &[TimelineEvent]) -> TimelineLayout {
    let mut rows: [Vec<Vec<(i64, i64)>>; Lane::COUNT] = Default::default();
    let mut placements = Vec::with_capacity(events.len());

    for event in events {
        let start = i64::from(event.start_frame);
        let end = event.end_frame();
        let lane = event.lane();
        let lane_rows = &mut rows[lane.index()];

        if event.is_text() {
            if lane_rows.is_empty() {
                lane_rows.push(Vec::new());
            }
            lane_rows[0].push((start, end));
            placements.push(Placement { lane, sub_row: 0 });
            continue;
        }

        let mut sub_row = 0;
        loop {
            if sub_row == lane_rows.len() {
                lane_rows.push(Vec::new());
            }
            let overlaps = lane_rows[sub_row]
                .iter()
                .any(|&(s, e)| !(end <= s || start >= e));
            if !overlaps {
                break;
            }
            sub_row += 1;
        }
        lane_rows[sub_row].push((start, end));
        placements.push(Placement { lane, sub_row });
    }

    let mut max_sub_rows = [1; Lane::COUNT];
    for (lane_rows, max) in rows.iter().zip(max_sub_rows.iter_mut()) {
        *max = lane_rows.len().max(1);
    }

    TimelineLayout {
        placements,
        max_sub_rows,
    }
}
