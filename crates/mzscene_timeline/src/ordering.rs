// SPDX-License-Identifier: MIT OR Apache-2.0
//! Total ordering of timeline events.

use crate::event::TimelineEvent;
use std::cmp::Ordering;

/// Compare two events: start frame ascending, then fixed kind priority,
/// then newest-first among same-frame, same-kind events.
pub fn compare_events(a: &TimelineEvent, b: &TimelineEvent) -> Ordering {
    a.start_frame
        .cmp(&b.start_frame)
        .then_with(|| a.kind.sort_priority().cmp(&b.kind.sort_priority()))
        .then_with(|| b.insert_order.cmp(&a.insert_order))
}

/// Sort events in place.
///
/// The sort is stable, so events tied on all three keys (possible only with
/// duplicated insert orders, e.g. after a malformed load) keep their
/// relative order.
pub fn sort_events(events: &mut [TimelineEvent]) {
    events.sort_by(compare_events);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{
        EventKind, MovePicture, ShowPicture, ShowText, TimelineEvent, Wait,
    };

    fn picture(start_frame: u32, insert_order: u64) -> TimelineEvent {
        TimelineEvent::new(
            start_frame,
            insert_order,
            EventKind::ShowPicture(ShowPicture::default()),
        )
    }

    fn text(start_frame: u32, insert_order: u64) -> TimelineEvent {
        TimelineEvent::new(
            start_frame,
            insert_order,
            EventKind::ShowText(ShowText::default()),
        )
    }

    #[test]
    fn sorts_by_frame_ascending() {
        let mut events = vec![picture(100, 1), picture(50, 2), picture(200, 3)];
        sort_events(&mut events);
        let frames: Vec<u32> = events.iter().map(|e| e.start_frame).collect();
        assert_eq!(frames, [50, 100, 200]);
    }

    #[test]
    fn same_frame_sorts_by_kind_priority() {
        let mut events = vec![
            text(0, 1),
            picture(0, 2),
            TimelineEvent::new(0, 3, EventKind::Wait(Wait::default())),
            TimelineEvent::new(0, 4, EventKind::MovePicture(MovePicture::default())),
        ];
        sort_events(&mut events);
        let priorities: Vec<u8> = events.iter().map(|e| e.kind.sort_priority()).collect();
        assert_eq!(priorities, [0, 1, 6, 7]);
    }

    #[test]
    fn unknown_kind_sorts_with_pictures() {
        let mut events = vec![text(0, 1), TimelineEvent::new(0, 2, EventKind::Unknown)];
        sort_events(&mut events);
        assert_eq!(events[0].kind, EventKind::Unknown);
        assert!(events[1].is_text());
    }

    #[test]
    fn same_frame_and_kind_newest_first() {
        let mut events = vec![picture(0, 1), picture(0, 3), picture(0, 2)];
        sort_events(&mut events);
        let orders: Vec<u64> = events.iter().map(|e| e.insert_order).collect();
        assert_eq!(orders, [3, 2, 1]);
    }

    #[test]
    fn all_three_keys_combined() {
        let mut events = vec![
            text(60, 1),
            picture(0, 2),
            picture(60, 3),
            text(0, 4),
            picture(0, 5),
        ];
        sort_events(&mut events);
        let keys: Vec<(u32, u64)> = events
            .iter()
            .map(|e| (e.start_frame, e.insert_order))
            .collect();
        assert_eq!(keys, [(0, 5), (0, 2), (0, 4), (60, 3), (60, 1)]);
    }

    #[test]
    fn sort_is_idempotent() {
        let mut events = vec![
            picture(60, 2),
            text(0, 3),
            picture(0, 1),
            TimelineEvent::new(0, 4, EventKind::Wait(Wait::default())),
        ];
        sort_events(&mut events);
        let once = events.clone();
        sort_events(&mut events);
        assert_eq!(events, once);
    }

    #[test]
    fn duplicate_insert_orders_keep_relative_order() {
        let a = TimelineEvent::new(
            0,
            5,
            EventKind::ShowPicture(ShowPicture {
                image_name: "first".into(),
                ..Default::default()
            }),
        );
        let b = TimelineEvent::new(
            0,
            5,
            EventKind::ShowPicture(ShowPicture {
                image_name: "second".into(),
                ..Default::default()
            }),
        );
        let mut events = vec![a.clone(), b.clone()];
        sort_events(&mut events);
        assert_eq!(events, [a, b]);
    }

    #[test]
    fn empty_and_single_are_fine() {
        let mut events: Vec<TimelineEvent> = Vec::new();
        sort_events(&mut events);
        assert!(events.is_empty());

        let mut events = vec![picture(0, 1)];
        sort_events(&mut events);
        assert_eq!(events.len(), 1);
    }
}
