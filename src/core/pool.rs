/// Indexed slots of graphical object handles sized to match the data.
///
/// Growing calls `create` with the index of each new slot; shrinking pops the
/// tail slots and hands each one to `dispose`. Both callbacks receive the same
/// context (usually the drawing surface). Retained slots are never touched,
/// so their objects keep identity across resizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotPool<T> {
    slots: Vec<T>,
}

impl<T> Default for SlotPool<T> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<T> SlotPool<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resize_with<C: ?Sized>(
        &mut self,
        desired_len: usize,
        context: &mut C,
        mut create: impl FnMut(&mut C, usize) -> T,
        mut dispose: impl FnMut(&mut C, T),
    ) {
        while self.slots.len() < desired_len {
            let index = self.slots.len();
            let slot = create(context, index);
            self.slots.push(slot);
        }
        while self.slots.len() > desired_len {
            if let Some(slot) = self.slots.pop() {
                dispose(context, slot);
            }
        }
    }

    /// Disposes every slot, last first.
    pub fn clear_with<C: ?Sized>(&mut self, context: &mut C, mut dispose: impl FnMut(&mut C, T)) {
        while let Some(slot) = self.slots.pop() {
            dispose(context, slot);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.slots.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.slots
    }
}

impl<'a, T> IntoIterator for &'a SlotPool<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}
