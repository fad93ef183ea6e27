use crate::arrangement::ArrangementTargets;
use crate::math;
use crate::{Arrangement, BuildError, KeylineState, KeylineStateBuilder};

/// Size-class bounds shared by every strategy.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrategyParams {
    pub small_size_min: f32,
    pub small_size_max: f32,
    /// Size of the anchor keylines at either end. Never larger than the smallest item.
    pub extra_small_size: f32,
    /// Skips the arrangement search and uses these counts and sizes as-is.
    pub fixed_arrangement: Option<Arrangement>,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            small_size_min: 40.0,
            small_size_max: 56.0,
            extra_small_size: 40.0,
            fixed_arrangement: None,
        }
    }
}

impl StrategyParams {
    pub fn with_small_size_bounds(mut self, min: f32, max: f32) -> Self {
        self.small_size_min = min;
        self.small_size_max = max;
        self
    }

    pub fn with_extra_small_size(mut self, size: f32) -> Self {
        self.extra_small_size = size;
        self
    }

    pub fn with_fixed_arrangement(mut self, arrangement: Arrangement) -> Self {
        self.fixed_arrangement = Some(arrangement);
        self
    }
}

/// How keylines are placed inside the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// The focal range starts at the leading edge; smaller items trail it.
    StartAligned(StrategyParams),
    /// The focal range is centered; smaller items are split evenly on both sides.
    CenterAligned(StrategyParams),
}

impl Default for Strategy {
    fn default() -> Self {
        Self::StartAligned(StrategyParams::default())
    }
}

impl Strategy {
    pub fn params(&self) -> &StrategyParams {
        match self {
            Self::StartAligned(p) | Self::CenterAligned(p) => p,
        }
    }

    pub fn is_center_aligned(&self) -> bool {
        matches!(self, Self::CenterAligned(_))
    }

    /// Picks item counts and sizes for a viewport.
    ///
    /// `item_count` caps the number of keylines that hold items; `0` means no cap.
    pub fn arrangement(
        &self,
        item_size: f32,
        viewport_extent: f32,
        item_count: usize,
    ) -> Result<Arrangement, BuildError> {
        if !item_size.is_finite() || item_size <= 0.0 {
            return Err(BuildError::InvalidItemSize(item_size));
        }
        if !viewport_extent.is_finite() || viewport_extent <= 0.0 {
            return Err(BuildError::InvalidViewportExtent(viewport_extent));
        }
        let params = self.params();
        if let Some(fixed) = params.fixed_arrangement {
            return Ok(fixed);
        }

        let available = viewport_extent;
        let large = item_size.min(available);
        let small_min = params.small_size_min.min(large);
        let small_max = params.small_size_max.min(large).max(small_min);
        let small = (item_size / 3.0).clamp(small_min, small_max);
        let medium = (large + small) / 2.0;

        let factor = if self.is_center_aligned() { 2 } else { 1 };
        let small_counts: [usize; 1] = if available < small_min * 2.0 {
            [0]
        } else {
            [factor]
        };
        let medium_counts = [factor, 0];

        let min_medium = medium * medium_counts[0] as f32;
        let min_small = small_max * small_counts[0] as f32;
        let large_min = math::floor((available - min_medium - min_small) / large).max(1.0) as usize;
        let large_max = (math::ceil(available / large) as usize).max(large_min);
        let mut large_counts = alloc::vec::Vec::with_capacity(large_max - large_min + 1);
        large_counts.extend((large_min..=large_max).rev());

        let targets = ArrangementTargets {
            available_space: available,
            small_size: small,
            small_size_min: small_min,
            small_size_max: small_max,
            small_counts: &small_counts,
            medium_size: medium,
            medium_counts: &medium_counts,
            large_size: large,
            large_counts: &large_counts,
        };

        let mut best = Arrangement::find_lowest_cost(&targets)
            .filter(Arrangement::is_valid)
            .or_else(|| {
                Arrangement::find_lowest_cost(&ArrangementTargets {
                    small_counts: &[0],
                    ..targets
                })
            })
            .ok_or(BuildError::NoFocalKeyline)?;

        if item_count > 0 && best.item_count() > item_count {
            let mut s = best.small_count;
            let mut m = best.medium_count;
            let mut l = best.large_count;
            while s + m + l > item_count {
                if s > 0 {
                    s -= 1;
                } else if m > 0 {
                    m -= 1;
                } else if l > 1 {
                    l -= 1;
                } else {
                    break;
                }
            }
            cdebug!(
                item_count,
                from = best.item_count(),
                to = s + m + l,
                "Strategy: reducing arrangement to item count"
            );
            let reduced = Arrangement::find_lowest_cost(&ArrangementTargets {
                small_counts: &[s],
                medium_counts: &[m],
                large_counts: &[l],
                ..targets
            });
            best = match reduced {
                Some(a) if a.is_valid() => a,
                _ => Arrangement::find_lowest_cost(&ArrangementTargets {
                    small_counts: &[0],
                    medium_counts: &[0],
                    large_counts: &[l],
                    ..targets
                })
                .ok_or(BuildError::NoFocalKeyline)?,
            };
        }

        Ok(best)
    }

    /// Runs the arrangement search and turns the result into a validated keyline state.
    pub fn keyline_state(
        &self,
        item_size: f32,
        viewport_extent: f32,
        item_count: usize,
        leading_padding: f32,
    ) -> Result<KeylineState, BuildError> {
        let arrangement = self.arrangement(item_size, viewport_extent, item_count)?;
        cdebug!(
            large = arrangement.large_size,
            large_count = arrangement.large_count,
            medium = arrangement.medium_size,
            medium_count = arrangement.medium_count,
            small = arrangement.small_size,
            small_count = arrangement.small_count,
            "Strategy::keyline_state"
        );
        self.keyline_state_for_arrangement(&arrangement, viewport_extent, leading_padding)
    }

    /// Emits keylines for `arrangement`: head anchor, leading small and medium runs, the focal
    /// run, trailing medium and small runs, then the tail anchor.
    pub fn keyline_state_for_arrangement(
        &self,
        arrangement: &Arrangement,
        viewport_extent: f32,
        leading_padding: f32,
    ) -> Result<KeylineState, BuildError> {
        let large = arrangement.large_size;
        let medium = arrangement.medium_size;
        let small = arrangement.small_size;

        let (lead_medium, trail_medium) = self.split(arrangement.medium_count);
        let (lead_small, trail_small) = self.split(arrangement.small_count);

        let mut smallest = large;
        if arrangement.medium_count > 0 {
            smallest = smallest.min(medium);
        }
        if arrangement.small_count > 0 {
            smallest = smallest.min(small);
        }
        let extra_small = self.params().extra_small_size.min(smallest);

        let mask = |size: f32| if large > 0.0 { 1.0 - size / large } else { 0.0 };

        let focal_width = large * arrangement.large_count as f32;
        let focal_start = if self.is_center_aligned() {
            viewport_extent / 2.0 - focal_width / 2.0
        } else {
            0.0
        };

        let lead_medium_width = medium * lead_medium as f32;
        let lead_small_width = small * lead_small as f32;
        let medium_start = focal_start - lead_medium_width;
        let small_start = medium_start - lead_small_width;

        let head = small_start.min(0.0) - extra_small / 2.0;

        let mut builder = KeylineStateBuilder::new(large, viewport_extent)
            .leading_padding(leading_padding)
            .add_anchor_keyline(head, mask(extra_small), extra_small)
            .add_keyline_range(small_start + small / 2.0, mask(small), small, lead_small, false)
            .add_keyline_range(
                medium_start + medium / 2.0,
                mask(medium),
                medium,
                lead_medium,
                false,
            )
            .add_keyline_range(
                focal_start + large / 2.0,
                0.0,
                large,
                arrangement.large_count,
                true,
            );

        let mut cursor = focal_start + focal_width;
        builder = builder.add_keyline_range(
            cursor + medium / 2.0,
            mask(medium),
            medium,
            trail_medium,
            false,
        );
        cursor += medium * trail_medium as f32;
        builder = builder.add_keyline_range(
            cursor + small / 2.0,
            mask(small),
            small,
            trail_small,
            false,
        );
        cursor += small * trail_small as f32;

        let tail = cursor.max(viewport_extent) + extra_small / 2.0;
        builder
            .add_anchor_keyline(tail, mask(extra_small), extra_small)
            .build()
    }

    /// Splits a run between the leading and trailing side of the focal range.
    fn split(&self, count: usize) -> (usize, usize) {
        if self.is_center_aligned() {
            (count / 2, count - count / 2)
        } else {
            (0, count)
        }
    }
}
