/// One-shot latch flipped after the first client-side render.
///
/// Wallet-dependent controls stay hidden while `NotReady` so the first paint
/// never depends on wallet state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MountGate {
    #[default]
    NotReady,
    Ready,
}

impl MountGate {
    /// Flip to `Ready`. Returns false if the gate was already open.
    pub fn open(&mut self) -> bool {
        match self {
            MountGate::NotReady => {
                *self = MountGate::Ready;
                true
            }
            MountGate::Ready => false,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, MountGate::Ready)
    }
}
