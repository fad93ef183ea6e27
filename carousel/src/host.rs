use crate::ItemPlacement;

/// The container side of the layout engine.
///
/// The engine never holds item views. It tells the host which indexes to attach or detach and
/// where to put each attached one; indexes are the only handles exchanged.
pub trait CarouselHost {
    fn attach(&mut self, index: usize);
    fn detach(&mut self, index: usize);
    fn place(&mut self, placement: &ItemPlacement);
}

/// A host that ignores every call, for callers that only need the engine's bookkeeping.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHost;

impl CarouselHost for NoopHost {
    fn attach(&mut self, _index: usize) {}
    fn detach(&mut self, _index: usize) {}
    fn place(&mut self, _placement: &ItemPlacement) {}
}
