//! Boundary between the engine and whatever animates falling pieces.

/// Reports whether the piece currently dropping has reached its resting
/// position.
///
/// Implemented by the rendering layer, which owns every position and
/// interpolation. The engine only ever reads this one bit per tick.
pub trait AnimationGate {
    /// Returns `true` once the falling piece is at rest.
    fn piece_at_rest(&self) -> bool;
}

impl AnimationGate for bool {
    fn piece_at_rest(&self) -> bool {
        *self
    }
}

impl<G: AnimationGate + ?Sized> AnimationGate for &G {
    fn piece_at_rest(&self) -> bool {
        (**self).piece_at_rest()
    }
}
