/// Registered shader pipeline. Issued by a [`RenderBackend`](super::RenderBackend).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShaderId(pub u32);

/// Registered offscreen target. Scenes without one draw to the main target.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u32);

impl ShaderId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl TargetId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}
