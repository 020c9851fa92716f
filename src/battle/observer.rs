//! Snapshot observers
//!
//! Hosts that render or persist battle state register an observer; it sees
//! the full state after every call that changed it.

use super::state::BattleState;

pub trait SnapshotObserver {
    fn on_snapshot(&mut self, state: &BattleState);
}

impl<F> SnapshotObserver for F
where
    F: FnMut(&BattleState),
{
    fn on_snapshot(&mut self, state: &BattleState) {
        self(state)
    }
}
