//! Merge detection and the animation registry that schedules the grow
//! effect played when previously separate groups coalesce.

use crate::constants::{MERGE_DURATION_MS, SETTLE_BUFFER_MS};
use crate::types::{Group, GroupId, MergeAnimation};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Compares the grouping captured at drag start against the grouping after
/// drag end, returning one [`MergeAnimation`] per group that absorbed two or
/// more previous groups.
///
/// Singleton current groups are never merge results. An empty `previous`
/// grouping (first mount) produces no merges. Multiple simultaneous merges
/// across independent groups are all recorded.
pub fn detect_merges(
    previous: &[Group],
    current: &[Group],
    now: Instant,
) -> HashMap<GroupId, MergeAnimation> {
    let mut merges = HashMap::new();
    if previous.is_empty() {
        return merges;
    }

    for group in current.iter().filter(|g| !g.is_single) {
        let sources: Vec<&Group> = previous
            .iter()
            .filter(|prev| prev.members.iter().any(|id| group.contains(*id)))
            .collect();

        if sources.len() >= 2 {
            merges.insert(
                group.id,
                MergeAnimation {
                    target: group.clone(),
                    sources: sources.into_iter().cloned().collect(),
                    started: now,
                    duration: Duration::from_millis(MERGE_DURATION_MS),
                },
            );
        }
    }

    merges
}

/// Registry of in-flight merge animations.
///
/// Entries are keyed by the merged group's id and pruned each frame once
/// their duration plus the settle buffer has elapsed; no timers are
/// involved, so tests can drive time explicitly.
#[derive(Debug, Default)]
pub struct MergeTracker {
    active: HashMap<GroupId, MergeAnimation>,
}

impl MergeTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs merge detection for a drag release and arms the resulting
    /// animations. Must be called exactly once per release, after the new
    /// clustering is available.
    pub fn record_release(&mut self, previous: &[Group], current: &[Group], now: Instant) {
        let merges = detect_merges(previous, current, now);
        if !merges.is_empty() {
            log::debug!("detected {} group merge(s)", merges.len());
        }
        self.active.extend(merges);
    }

    /// Drops animations whose lifetime (duration + settle buffer) has
    /// elapsed. Call once per frame.
    pub fn prune(&mut self, now: Instant) {
        let settle = Duration::from_millis(SETTLE_BUFFER_MS);
        self.active.retain(|_, anim| !anim.is_expired(now, settle));
    }

    /// Animation progress for the given group in `[0, 1]`, or `None` when no
    /// merge animation is active for it.
    pub fn progress(&self, id: GroupId, now: Instant) -> Option<f32> {
        self.active.get(&id).map(|anim| anim.progress(now))
    }

    /// Number of in-flight animations.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// True when no animation is in flight.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clustering::cluster;
    use crate::types::Item;

    fn item(id: u32, x: f32, y: f32) -> Item {
        Item::new(id, "cat", x, y)
    }

    #[test]
    fn no_previous_groups_means_no_merges() {
        let items = vec![item(1, 0.0, 0.0), item(2, 50.0, 0.0)];
        let current = cluster(&items, 80.0);
        assert!(detect_merges(&[], &current, Instant::now()).is_empty());
    }

    #[test]
    fn unchanged_grouping_never_fires() {
        let items = vec![item(1, 0.0, 0.0), item(2, 50.0, 0.0), item(3, 500.0, 500.0)];
        let groups = cluster(&items, 80.0);
        assert!(detect_merges(&groups, &groups, Instant::now()).is_empty());
    }

    #[test]
    fn dragging_singleton_into_pair_fires_one_merge() {
        let before = vec![item(1, 0.0, 0.0), item(2, 50.0, 0.0), item(3, 500.0, 500.0)];
        let previous = cluster(&before, 80.0);

        let mut after = before.clone();
        after[2].x = 40.0;
        after[2].y = 0.0;
        let current = cluster(&after, 80.0);
        assert_eq!(current.len(), 1);

        let merges = detect_merges(&previous, &current, Instant::now());
        assert_eq!(merges.len(), 1);

        let anim = merges.get(&current[0].id).expect("keyed by new group id");
        assert_eq!(anim.target.members, vec![1, 2, 3]);
        assert_eq!(anim.sources.len(), 2);
        assert_eq!(anim.duration, Duration::from_millis(MERGE_DURATION_MS));
    }

    #[test]
    fn moving_within_a_group_does_not_fire() {
        let before = vec![item(1, 0.0, 0.0), item(2, 50.0, 0.0)];
        let previous = cluster(&before, 80.0);

        let mut after = before.clone();
        after[1].x = 60.0; // still within threshold, same membership
        let current = cluster(&after, 80.0);

        assert!(detect_merges(&previous, &current, Instant::now()).is_empty());
    }

    #[test]
    fn singleton_result_never_fires() {
        // A pair splits apart; the resulting singletons intersect the old
        // pair but singles are skipped.
        let before = vec![item(1, 0.0, 0.0), item(2, 50.0, 0.0)];
        let previous = cluster(&before, 80.0);

        let mut after = before.clone();
        after[1].x = 900.0;
        let current = cluster(&after, 80.0);
        assert_eq!(current.len(), 2);

        assert!(detect_merges(&previous, &current, Instant::now()).is_empty());
    }

    #[test]
    fn independent_merges_are_all_recorded() {
        let before = vec![
            item(1, 0.0, 0.0),
            item(2, 50.0, 0.0),
            item(3, 200.0, 0.0),
            item(10, 1000.0, 0.0),
            item(11, 1050.0, 0.0),
            item(12, 1200.0, 0.0),
        ];
        let previous = cluster(&before, 80.0);
        assert_eq!(previous.len(), 4);

        let mut after = before.clone();
        after[2].x = 100.0; // 3 joins {1,2}
        after[5].x = 1100.0; // 12 joins {10,11}
        let current = cluster(&after, 80.0);
        assert_eq!(current.len(), 2);

        let merges = detect_merges(&previous, &current, Instant::now());
        assert_eq!(merges.len(), 2);
    }

    #[test]
    fn tracker_prunes_after_settle_time() {
        let before = vec![item(1, 0.0, 0.0), item(2, 50.0, 0.0), item(3, 500.0, 500.0)];
        let previous = cluster(&before, 80.0);
        let mut after = before.clone();
        after[2].x = 40.0;
        after[2].y = 0.0;
        let current = cluster(&after, 80.0);

        let released = Instant::now();
        let mut tracker = MergeTracker::new();
        tracker.record_release(&previous, &current, released);
        assert_eq!(tracker.len(), 1);
        assert!(tracker.progress(current[0].id, released).is_some());

        // Mid-flight: still present.
        tracker.prune(released + Duration::from_millis(400));
        assert_eq!(tracker.len(), 1);

        // Duration (800) + settle (100) elapsed: gone 1000 ms later.
        tracker.prune(released + Duration::from_millis(1000));
        assert!(tracker.is_empty());
        assert!(tracker.progress(current[0].id, released).is_none());
    }

    #[test]
    fn expired_entries_do_not_block_new_merges() {
        let before = vec![item(1, 0.0, 0.0), item(2, 50.0, 0.0), item(3, 500.0, 500.0)];
        let previous = cluster(&before, 80.0);
        let mut after = before.clone();
        after[2].x = 40.0;
        after[2].y = 0.0;
        let current = cluster(&after, 80.0);

        let mut tracker = MergeTracker::new();
        let t0 = Instant::now();
        tracker.record_release(&previous, &current, t0);
        tracker.prune(t0 + Duration::from_millis(1000));
        assert!(tracker.is_empty());

        // The same merge detected again later is recorded afresh.
        tracker.record_release(&previous, &current, t0 + Duration::from_millis(2000));
        assert_eq!(tracker.len(), 1);
    }
}
