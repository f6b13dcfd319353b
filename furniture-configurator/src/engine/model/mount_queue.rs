use crate::engine::assets::resource_cache::ResourceStatus;

/// A model load waiting to be mounted, tagged with the selection generation
/// that requested it.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingMount<H> {
    pub model_id: String,
    pub generation: u64,
    pub handle: H,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MountOutcome<H> {
    /// Loaded and still the current selection.
    Ready(PendingMount<H>),
    /// The selection moved on before this load could be mounted.
    Stale(PendingMount<H>),
    Failed(PendingMount<H>),
}

/// In-flight model loads. Only a load whose generation matches the current
/// selection may ever be mounted.
#[derive(Debug)]
pub struct MountQueue<H> {
    pending: Vec<PendingMount<H>>,
}

impl<H> Default for MountQueue<H> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<H> MountQueue<H> {
    pub fn enqueue(&mut self, model_id: impl Into<String>, generation: u64, handle: H) {
        self.pending.push(PendingMount {
            model_id: model_id.into(),
            generation,
            handle,
        });
    }

    pub fn is_waiting_for(&self, model_id: &str, generation: u64) -> bool {
        self.pending
            .iter()
            .any(|p| p.model_id == model_id && p.generation == generation)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take every entry that no longer needs waiting for. Entries from an older
    /// generation come out as `Stale` whatever their load state.
    pub fn drain_resolved(
        &mut self,
        current_generation: u64,
        mut status: impl FnMut(&H) -> ResourceStatus,
    ) -> Vec<MountOutcome<H>> {
        let mut resolved = Vec::new();
        let mut waiting = Vec::with_capacity(self.pending.len());

        for pending in self.pending.drain(..) {
            if pending.generation != current_generation {
                resolved.push(MountOutcome::Stale(pending));
                continue;
            }
            match status(&pending.handle) {
                ResourceStatus::Ready => resolved.push(MountOutcome::Ready(pending)),
                ResourceStatus::Failed => resolved.push(MountOutcome::Failed(pending)),
                ResourceStatus::Pending => waiting.push(pending),
            }
        }

        self.pending = waiting;
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_for_superseded_selection_is_discarded() {
        let mut queue = MountQueue::<&str>::default();
        queue.enqueue("bedside", 1, "a.glb");
        queue.enqueue("tv-panel", 2, "b.glb");

        let first = queue.drain_resolved(2, |handle| match *handle {
            "a.glb" => ResourceStatus::Ready,
            _ => ResourceStatus::Pending,
        });
        assert!(matches!(first.as_slice(), [MountOutcome::Stale(p)] if p.model_id == "bedside"));
        assert!(queue.is_waiting_for("tv-panel", 2));

        let second = queue.drain_resolved(2, |_| ResourceStatus::Ready);
        assert!(matches!(second.as_slice(), [MountOutcome::Ready(p)] if p.model_id == "tv-panel"));
        assert!(queue.is_empty());
    }

    #[test]
    fn failures_are_reported_once() {
        let mut queue = MountQueue::<u32>::default();
        queue.enqueue("desk", 4, 7);

        let outcome = queue.drain_resolved(4, |_| ResourceStatus::Failed);
        assert_eq!(
            outcome,
            vec![MountOutcome::Failed(PendingMount {
                model_id: "desk".into(),
                generation: 4,
                handle: 7,
            })]
        );
        assert!(queue.drain_resolved(4, |_| ResourceStatus::Failed).is_empty());
    }

    #[test]
    fn waiting_is_per_generation() {
        let mut queue = MountQueue::<u8>::default();
        queue.enqueue("desk", 1, 0);

        assert!(queue.is_waiting_for("desk", 1));
        assert!(!queue.is_waiting_for("desk", 2));
        assert_eq!(queue.len(), 1);
    }
}
