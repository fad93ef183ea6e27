use crate::math;

/// How much a medium item may flex to bring the large items closer to their target size.
const MEDIUM_ITEM_FLEX_PERCENTAGE: f32 = 0.1;

/// Item counts and sizes for each size class, fitted into an available space.
///
/// An arrangement is consumed once by a [`crate::Strategy`] to emit keylines.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arrangement {
    /// Candidate order in the search; lower wins ties and scales the cost.
    pub priority: u32,
    pub small_size: f32,
    pub small_count: usize,
    pub medium_size: f32,
    pub medium_count: usize,
    pub large_size: f32,
    pub large_count: usize,
    /// Distance from the target large size, scaled by priority. `f32::MAX` when invalid.
    pub cost: f32,
}

/// Search input for [`Arrangement::find_lowest_cost`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrangementTargets<'a> {
    pub available_space: f32,
    pub small_size: f32,
    pub small_size_min: f32,
    pub small_size_max: f32,
    pub small_counts: &'a [usize],
    pub medium_size: f32,
    pub medium_counts: &'a [usize],
    pub large_size: f32,
    pub large_counts: &'a [usize],
}

impl Arrangement {
    /// An arrangement with explicit sizes; no fitting is applied.
    pub fn fixed(
        large_size: f32,
        large_count: usize,
        medium_size: f32,
        medium_count: usize,
        small_size: f32,
        small_count: usize,
    ) -> Self {
        Self {
            priority: 0,
            small_size,
            small_count,
            medium_size,
            medium_count,
            large_size,
            large_count,
            cost: 0.0,
        }
    }

    fn fitted(
        priority: u32,
        targets: &ArrangementTargets<'_>,
        small_count: usize,
        medium_count: usize,
        large_count: usize,
    ) -> Self {
        let mut a = Self {
            priority,
            small_size: targets
                .small_size
                .clamp(targets.small_size_min, targets.small_size_max),
            small_count,
            medium_size: targets.medium_size,
            medium_count,
            large_size: targets.large_size,
            large_count,
            cost: 0.0,
        };
        a.fit(targets);
        a.cost = if a.is_valid() {
            math::abs(targets.large_size - a.large_size) * priority as f32
        } else {
            f32::MAX
        };
        a
    }

    /// Adjusts sizes so the arrangement fills `available_space`.
    ///
    /// Small items flex first within their bounds, large items absorb the rest, and medium items
    /// give up to 10% of their size to move large items toward their target.
    fn fit(&mut self, targets: &ArrangementTargets<'_>) {
        let delta = targets.available_space - self.space();
        if self.small_count > 0 {
            let per_item = delta / self.small_count as f32;
            if delta > 0.0 {
                self.small_size += per_item.min(targets.small_size_max - self.small_size);
            } else if delta < 0.0 {
                self.small_size += per_item.max(targets.small_size_min - self.small_size);
            }
        } else {
            self.small_size = 0.0;
        }

        let small = self.small_count as f32;
        let medium = self.medium_count as f32;
        let large = self.large_count as f32;
        self.large_size = (targets.available_space - (small + medium / 2.0) * self.small_size)
            / (large + medium / 2.0);
        self.medium_size = (self.large_size + self.small_size) / 2.0;

        if self.medium_count > 0 && self.large_size != targets.large_size {
            let target_adjustment = (targets.large_size - self.large_size) * large;
            let available_flex = MEDIUM_ITEM_FLEX_PERCENTAGE * self.medium_size * medium;
            let distribute = math::abs(target_adjustment).min(available_flex);
            if target_adjustment > 0.0 {
                self.medium_size -= distribute / medium;
                self.large_size += distribute / large;
            } else {
                self.medium_size += distribute / medium;
                self.large_size -= distribute / large;
            }
        }
    }

    /// Whether sizes strictly decrease from large to medium to small.
    pub fn is_valid(&self) -> bool {
        if self.large_count == 0 || !self.large_size.is_finite() || self.large_size <= 0.0 {
            return false;
        }
        if self.medium_count > 0
            && (self.medium_size <= 0.0 || self.large_size <= self.medium_size)
        {
            return false;
        }
        if self.small_count > 0 {
            if self.small_size <= 0.0 || self.large_size <= self.small_size {
                return false;
            }
            if self.medium_count > 0 && self.medium_size <= self.small_size {
                return false;
            }
        }
        true
    }

    pub fn item_count(&self) -> usize {
        self.small_count + self.medium_count + self.large_count
    }

    /// Total space taken by all items at their current sizes.
    pub fn space(&self) -> f32 {
        self.large_size * self.large_count as f32
            + self.medium_size * self.medium_count as f32
            + self.small_size * self.small_count as f32
    }

    /// Tries every combination of counts and returns the cheapest fitted arrangement.
    ///
    /// Large counts form the outer loop, then medium, then small; earlier candidates get a lower
    /// priority multiplier. The search stops at the first zero-cost arrangement. Returns `None`
    /// only when a count list is empty.
    pub fn find_lowest_cost(targets: &ArrangementTargets<'_>) -> Option<Arrangement> {
        let mut best: Option<Arrangement> = None;
        let mut priority = 1u32;
        for &large_count in targets.large_counts {
            for &medium_count in targets.medium_counts {
                for &small_count in targets.small_counts {
                    let candidate =
                        Self::fitted(priority, targets, small_count, medium_count, large_count);
                    ctrace!(
                        large_count,
                        medium_count,
                        small_count,
                        cost = candidate.cost,
                        "Arrangement candidate"
                    );
                    let better = best.is_none_or(|b| candidate.cost < b.cost);
                    if better {
                        best = Some(candidate);
                        if candidate.cost == 0.0 {
                            return best;
                        }
                    }
                    priority += 1;
                }
            }
        }
        best
    }
}
