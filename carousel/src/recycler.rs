use alloc::collections::BTreeSet;

use crate::{AttachedRange, CarouselHost};

/// Tracks which indexes the host currently has attached.
///
/// [`AttachedSet::sync`] moves the set to a target range with the minimal number of host calls:
/// - indexes leaving the range are detached in ascending order
/// - indexes entering the range are attached in ascending order
/// - indexes already attached are left alone
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttachedSet {
    attached: BTreeSet<usize>,
}

impl AttachedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.attached.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.attached.contains(&index)
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.attached.iter().copied()
    }

    /// Brings the attached set in line with `range`. Returns `true` when anything changed.
    pub fn sync(&mut self, range: AttachedRange, host: &mut dyn CarouselHost) -> bool {
        let mut changed = false;

        let leaving: alloc::vec::Vec<usize> = self
            .attached
            .iter()
            .copied()
            .filter(|&i| !range.contains(i))
            .collect();
        for index in leaving {
            self.attached.remove(&index);
            ctrace!(index, "detach");
            host.detach(index);
            changed = true;
        }

        for index in range.start_index..range.end_index {
            if self.attached.insert(index) {
                ctrace!(index, "attach");
                host.attach(index);
                changed = true;
            }
        }

        changed
    }

    /// Detaches everything.
    pub fn clear(&mut self, host: &mut dyn CarouselHost) {
        let range = AttachedRange::default();
        self.sync(range, host);
    }
}
