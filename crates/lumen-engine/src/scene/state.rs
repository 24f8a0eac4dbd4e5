use super::SceneContext;

/// Illegal scene transition.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("begin_scene called while a scene is already open")]
    AlreadyOpen,
    #[error("no scene is open")]
    NotOpen,
}

/// Scene bracket state machine.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub enum SceneState {
    #[default]
    Closed,
    Open(SceneContext),
}

impl SceneState {
    /// `Closed → Open(ctx)`.
    pub fn open(&mut self, ctx: SceneContext) -> Result<(), SceneError> {
        match self {
            SceneState::Closed => {
                *self = SceneState::Open(ctx);
                Ok(())
            }
            SceneState::Open(_) => Err(SceneError::AlreadyOpen),
        }
    }

    /// `Open(ctx) → Closed`, returning the context that was open.
    pub fn close(&mut self) -> Result<SceneContext, SceneError> {
        match std::mem::take(self) {
            SceneState::Open(ctx) => Ok(ctx),
            SceneState::Closed => Err(SceneError::NotOpen),
        }
    }

    #[inline]
    pub fn current(&self) -> Option<&SceneContext> {
        match self {
            SceneState::Open(ctx) => Some(ctx),
            SceneState::Closed => None,
        }
    }

    /// The open scene, or `NotOpen`.
    #[inline]
    pub fn require(&self) -> Result<&SceneContext, SceneError> {
        self.current().ok_or(SceneError::NotOpen)
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        matches!(self, SceneState::Open(_))
    }
}

#[cfg(test)]
mod tests {
    use glam::Mat4;

    use super::*;
    use crate::coords::Viewport;
    use crate::render::ShaderId;

    fn ctx(shader: u32) -> SceneContext {
        SceneContext::new(ShaderId(shader), Mat4::IDENTITY, None, Viewport::new(10.0, 10.0))
    }

    #[test]
    fn starts_closed() {
        let state = SceneState::default();
        assert!(!state.is_open());
        assert_eq!(state.require(), Err(SceneError::NotOpen));
    }

    #[test]
    fn open_then_close_returns_context() {
        let mut state = SceneState::default();
        state.open(ctx(3)).unwrap();
        assert_eq!(state.current().map(|c| c.shader), Some(ShaderId(3)));
        assert_eq!(state.close().unwrap(), ctx(3));
        assert!(!state.is_open());
    }

    #[test]
    fn nested_open_is_rejected_and_keeps_first_scene() {
        let mut state = SceneState::default();
        state.open(ctx(1)).unwrap();
        assert_eq!(state.open(ctx(2)), Err(SceneError::AlreadyOpen));
        assert_eq!(state.current().map(|c| c.shader), Some(ShaderId(1)));
    }

    #[test]
    fn close_without_open_is_rejected() {
        let mut state = SceneState::default();
        assert_eq!(state.close(), Err(SceneError::NotOpen));
        assert_eq!(state, SceneState::Closed);
    }
}
