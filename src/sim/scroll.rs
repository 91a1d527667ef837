//! Ring scrolling
//!
//! Road segments and obstacles are fixed pools that scroll toward the camera
//! along +Z. Anything past the off-screen threshold is moved back behind the
//! rearmost on-screen element instead of being destroyed. One routine serves
//! both pools; they differ only in their `RecycleRule` and recycle hook.

use super::state::{Obstacle, TrackSegment};

/// Anything that rides the scrolling ring
pub trait RingElement {
    fn travel(&self) -> f32;
    fn set_travel(&mut self, z: f32);
}

impl RingElement for TrackSegment {
    #[inline]
    fn travel(&self) -> f32 {
        self.z
    }

    #[inline]
    fn set_travel(&mut self, z: f32) {
        self.z = z;
    }
}

impl RingElement for Obstacle {
    #[inline]
    fn travel(&self) -> f32 {
        self.pos.z
    }

    #[inline]
    fn set_travel(&mut self, z: f32) {
        self.pos.z = z;
    }
}

/// Where recycled elements land
#[derive(Debug, Clone, Copy)]
pub struct RecycleRule {
    /// Elements with travel > threshold are off-screen
    pub threshold: f32,
    /// Gap kept behind the rearmost on-screen element
    pub spacing: f32,
    /// Recycled elements never land closer than this
    pub ceiling: Option<f32>,
    /// Stand-in for the rearmost position when nothing is on-screen
    pub fallback: f32,
}

impl RecycleRule {
    /// Landing position for the first recycled element given the on-screen minimum
    pub fn target(&self, min_on_screen: Option<f32>) -> f32 {
        let anchor = min_on_screen.unwrap_or(self.fallback);
        let target = anchor - self.spacing;
        match self.ceiling {
            Some(ceiling) => target.min(ceiling),
            None => target,
        }
    }
}

/// Advance every element by `distance`, then recycle the ones that left the screen.
///
/// The on/off-screen split is taken once, after advancing; each off-screen
/// element is relocated exactly once. When several leave together, the k-th
/// (in pool order) lands `k * spacing` behind the first so they never stack.
/// `on_recycle` runs on each relocated element after its travel is set.
/// Returns how many elements were recycled.
pub fn advance_and_recycle<T, F>(items: &mut [T], distance: f32, rule: &RecycleRule, mut on_recycle: F) -> usize
where
    T: RingElement,
    F: FnMut(&mut T),
{
    for item in items.iter_mut() {
        item.set_travel(item.travel() + distance);
    }

    let mut off_screen = Vec::new();
    let mut min_on_screen: Option<f32> = None;
    for (idx, item) in items.iter().enumerate() {
        let z = item.travel();
        if z > rule.threshold {
            off_screen.push(idx);
        } else {
            min_on_screen = Some(min_on_screen.map_or(z, |m| m.min(z)));
        }
    }

    if off_screen.is_empty() {
        return 0;
    }

    let target = rule.target(min_on_screen);
    for (k, &idx) in off_screen.iter().enumerate() {
        let item = &mut items[idx];
        item.set_travel(target - k as f32 * rule.spacing);
        on_recycle(item);
    }
    off_screen.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn segments(zs: &[f32]) -> Vec<TrackSegment> {
        zs.iter()
            .enumerate()
            .map(|(i, &z)| TrackSegment { id: i as u32, z })
            .collect()
    }

    fn road_rule() -> RecycleRule {
        RecycleRule {
            threshold: 20.0,
            spacing: 25.0,
            ceiling: Some(-50.0),
            fallback: -100.0,
        }
    }

    #[test]
    fn test_advance_without_recycle() {
        let mut ring = segments(&[-45.0, -20.0, 5.0]);
        let recycled = advance_and_recycle(&mut ring, 1.5, &road_rule(), |_| {});
        assert_eq!(recycled, 0);
        assert_eq!(ring[0].z, -43.5);
        assert_eq!(ring[2].z, 6.5);
    }

    #[test]
    fn test_segment_lands_behind_rearmost_with_ceiling() {
        // Rearmost on-screen at -20 → -45 would be too close, ceiling wins
        let mut ring = segments(&[-20.0, 0.0, 19.9]);
        advance_and_recycle(&mut ring, 0.2, &road_rule(), |_| {});
        assert_eq!(ring[2].z, -50.0);

        // Rearmost far back → spacing wins
        let mut ring = segments(&[-200.0, 19.9]);
        advance_and_recycle(&mut ring, 0.2, &road_rule(), |_| {});
        assert!((ring[1].z - (-224.8)).abs() < 1e-3);
    }

    #[test]
    fn test_all_off_screen_uses_fallback() {
        let mut ring = segments(&[30.0, 40.0]);
        advance_and_recycle(&mut ring, 0.0, &road_rule(), |_| {});
        assert_eq!(ring[0].z, -125.0);
        assert_eq!(ring[1].z, -150.0);
    }

    #[test]
    fn test_simultaneous_recycles_do_not_stack() {
        let mut ring = segments(&[-45.0, -20.0, 5.0, 30.0, 55.0, 80.0]);
        let mut hooked = Vec::new();
        let recycled = advance_and_recycle(&mut ring, 0.0, &road_rule(), |s| hooked.push(s.id));
        assert_eq!(recycled, 3);
        assert_eq!(hooked, vec![3, 4, 5]);
        assert_eq!(ring[3].z, -70.0);
        assert_eq!(ring[4].z, -95.0);
        assert_eq!(ring[5].z, -120.0);
    }

    #[test]
    fn test_obstacle_rule_without_ceiling() {
        let rule = RecycleRule {
            threshold: 20.0,
            spacing: 10.0,
            ceiling: None,
            fallback: -30.0,
        };
        assert_eq!(rule.target(Some(-5.0)), -15.0);
        assert_eq!(rule.target(None), -40.0);
    }

    proptest! {
        #[test]
        fn prop_recycled_elements_land_on_screen(
            zs in proptest::collection::vec(-300.0f32..100.0, 1..16),
            distance in 0.0f32..2.0,
        ) {
            let rule = road_rule();
            let mut ring = segments(&zs);
            let was_off: Vec<bool> = ring.iter().map(|s| s.z + distance > rule.threshold).collect();
            advance_and_recycle(&mut ring, distance, &rule, |_| {});
            prop_assert_eq!(ring.len(), zs.len());
            for (seg, off) in ring.iter().zip(was_off) {
                if off {
                    prop_assert!(seg.z < rule.threshold);
                }
                prop_assert!(seg.z <= rule.threshold);
            }
        }
    }
}
