use std::cell::RefCell;
use std::rc::Weak;

use super::ctx::DrawCtx;
use super::error::ChainError;
use super::object::RenderObject;

/// Outcome counters for one pass over the chain.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PassStats {
    /// Objects whose draw succeeded.
    pub rendered: usize,
    /// Objects whose draw returned an error.
    pub failed: usize,
    /// Slots whose owner dropped the object; removed from the chain.
    pub expired: usize,
}

/// Ordered dispatch list over weakly-referenced objects.
///
/// The chain observes objects owned elsewhere (normally by the scene). It
/// never extends an object's lifetime and never destroys one: dropping the
/// last strong reference is the owner's business, and the chain notices the
/// next time it walks its slots. Expired slots are compacted in place during
/// a pass, preserving the order of the survivors.
///
/// Generic over the slot type so the traversal logic is exercised without a
/// GPU; the engine uses `RenderChain<dyn RenderObject>`.
pub struct RenderChain<T: ?Sized = dyn RenderObject> {
    slots: Vec<Weak<RefCell<T>>>,
    limit: Option<usize>,
}

impl<T: ?Sized> Default for RenderChain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> RenderChain<T> {
    /// An unbounded chain; slot storage grows as objects attach.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            limit: None,
        }
    }

    /// A chain that holds at most `limit` slots. Slot storage is reserved up
    /// front and never reallocates.
    pub fn bounded(limit: usize) -> Self {
        Self {
            slots: Vec::with_capacity(limit),
            limit: Some(limit),
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Number of slots, including ones whose object has since expired.
    pub fn attached(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots whose object is still alive.
    pub fn live(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Appends a slot at the end of the chain.
    ///
    /// Fails if the reference is already dead, or if a bounded chain is full
    /// even after reclaiming expired slots. On failure the chain is unchanged.
    pub fn attach(&mut self, slot: Weak<RefCell<T>>) -> Result<(), ChainError> {
        if slot.strong_count() == 0 {
            return Err(ChainError::DeadObject);
        }
        if let Some(limit) = self.limit {
            if self.slots.len() >= limit {
                self.slots.retain(|s| s.strong_count() > 0);
            }
            if self.slots.len() >= limit {
                return Err(ChainError::CapacityExhausted { limit });
            }
        }
        self.slots.push(slot);
        Ok(())
    }

    /// Drops every slot. Objects themselves are untouched; their owners keep
    /// them alive or not, as before.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Walks the chain in order, invoking `f` on each live object.
    ///
    /// Expired slots are compacted out. A failing object is counted and
    /// logged, and the walk continues with the next slot; one bad object
    /// never takes the rest of the pass down with it.
    pub fn dispatch<E: std::fmt::Display>(
        &mut self,
        mut f: impl FnMut(&T) -> Result<(), E>,
    ) -> PassStats {
        let mut stats = PassStats::default();
        self.slots.retain(|slot| match slot.upgrade() {
            Some(object) => {
                match f(&object.borrow()) {
                    Ok(()) => stats.rendered += 1,
                    Err(err) => {
                        stats.failed += 1;
                        log::error!("render chain: {err}");
                    }
                }
                true
            }
            None => {
                stats.expired += 1;
                false
            }
        });
        stats
    }
}

impl RenderChain<dyn RenderObject> {
    /// Draws every live object into the pass, in attach order.
    pub fn render(&mut self, ctx: &mut DrawCtx<'_>) -> PassStats {
        self.dispatch(|object| {
            object
                .draw(ctx)
                .map_err(|err| format!("object '{}' failed to draw: {err}", object.label()))
        })
    }
}

// ── tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Probe {
        name: &'static str,
        draws: Cell<usize>,
        fail: bool,
    }

    impl Probe {
        fn ok(name: &'static str) -> Rc<RefCell<Probe>> {
            Rc::new(RefCell::new(Probe {
                name,
                draws: Cell::new(0),
                fail: false,
            }))
        }

        fn failing(name: &'static str) -> Rc<RefCell<Probe>> {
            Rc::new(RefCell::new(Probe {
                name,
                draws: Cell::new(0),
                fail: true,
            }))
        }
    }

    fn walk(chain: &mut RenderChain<Probe>, order: &mut Vec<&'static str>) -> PassStats {
        let mut seen = Vec::new();
        let stats = chain.dispatch(|probe| {
            probe.draws.set(probe.draws.get() + 1);
            seen.push(probe.name);
            if probe.fail {
                Err(format!("probe '{}' refused", probe.name))
            } else {
                Ok(())
            }
        });
        *order = seen;
        stats
    }

    #[test]
    fn renders_in_attach_order() {
        let (a, b, c) = (Probe::ok("a"), Probe::ok("b"), Probe::ok("c"));
        let mut chain = RenderChain::new();
        chain.attach(Rc::downgrade(&a)).unwrap();
        chain.attach(Rc::downgrade(&b)).unwrap();
        chain.attach(Rc::downgrade(&c)).unwrap();

        let mut order = Vec::new();
        let stats = walk(&mut chain, &mut order);
        assert_eq!(order, ["a", "b", "c"]);
        assert_eq!(
            stats,
            PassStats {
                rendered: 3,
                failed: 0,
                expired: 0
            }
        );
    }

    #[test]
    fn expired_slots_are_skipped_and_compacted() {
        let (a, b, c) = (Probe::ok("a"), Probe::ok("b"), Probe::ok("c"));
        let mut chain = RenderChain::new();
        chain.attach(Rc::downgrade(&a)).unwrap();
        chain.attach(Rc::downgrade(&b)).unwrap();
        chain.attach(Rc::downgrade(&c)).unwrap();

        drop(b);
        assert_eq!(chain.attached(), 3);
        assert_eq!(chain.live(), 2);

        let mut order = Vec::new();
        let stats = walk(&mut chain, &mut order);
        assert_eq!(order, ["a", "c"]);
        assert_eq!(stats.expired, 1);
        assert_eq!(chain.attached(), 2);
    }

    #[test]
    fn attaching_a_dead_reference_fails_without_side_effects() {
        let ghost = Rc::downgrade(&Probe::ok("ghost"));
        let mut chain = RenderChain::<Probe>::new();

        assert_eq!(chain.attach(ghost), Err(ChainError::DeadObject));
        assert!(chain.is_empty());
    }

    #[test]
    fn bounded_chain_rejects_attach_past_limit() {
        let (a, b, c) = (Probe::ok("a"), Probe::ok("b"), Probe::ok("c"));
        let mut chain = RenderChain::bounded(2);
        chain.attach(Rc::downgrade(&a)).unwrap();
        chain.attach(Rc::downgrade(&b)).unwrap();

        assert_eq!(
            chain.attach(Rc::downgrade(&c)),
            Err(ChainError::CapacityExhausted { limit: 2 })
        );
        assert_eq!(chain.attached(), 2);
    }

    #[test]
    fn bounded_chain_reclaims_expired_slots_before_rejecting() {
        let (a, b, c) = (Probe::ok("a"), Probe::ok("b"), Probe::ok("c"));
        let mut chain = RenderChain::bounded(2);
        chain.attach(Rc::downgrade(&a)).unwrap();
        chain.attach(Rc::downgrade(&b)).unwrap();

        drop(a);
        chain.attach(Rc::downgrade(&c)).unwrap();
        assert_eq!(chain.attached(), 2);
        assert_eq!(chain.live(), 2);
    }

    #[test]
    fn failing_object_does_not_stop_the_pass() {
        let (a, bad, c) = (Probe::ok("a"), Probe::failing("bad"), Probe::ok("c"));
        let mut chain = RenderChain::new();
        chain.attach(Rc::downgrade(&a)).unwrap();
        chain.attach(Rc::downgrade(&bad)).unwrap();
        chain.attach(Rc::downgrade(&c)).unwrap();

        let mut order = Vec::new();
        let stats = walk(&mut chain, &mut order);
        assert_eq!(order, ["a", "bad", "c"]);
        assert_eq!(stats.rendered, 2);
        assert_eq!(stats.failed, 1);
        assert_eq!(a.borrow().draws.get(), 1);
        assert_eq!(c.borrow().draws.get(), 1);
        // A failing slot stays attached and gets another chance next pass.
        assert_eq!(chain.attached(), 3);
    }

    #[test]
    fn clear_detaches_without_destroying_objects() {
        let a = Probe::ok("a");
        let mut chain = RenderChain::new();
        chain.attach(Rc::downgrade(&a)).unwrap();

        chain.clear();
        assert!(chain.is_empty());
        assert_eq!(Rc::strong_count(&a), 1);
    }

    #[test]
    fn double_attach_draws_twice() {
        let a = Probe::ok("a");
        let mut chain = RenderChain::new();
        chain.attach(Rc::downgrade(&a)).unwrap();
        chain.attach(Rc::downgrade(&a)).unwrap();

        let mut order = Vec::new();
        walk(&mut chain, &mut order);
        assert_eq!(a.borrow().draws.get(), 2);
    }
}
