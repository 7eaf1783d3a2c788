//! Homogeneous entity pools
//!
//! Every entity kind lives in its own `Pool`, owned by value. Dead entries
//! stay in place until `prune` so later checks in the same frame can skip
//! them by their alive flag.

/// Shared lifecycle contract for pooled entities
pub trait Entity {
    /// Advance by `dt` seconds. May kill the entity (e.g. out of bounds).
    fn update(&mut self, dt: f32);
    fn is_alive(&self) -> bool;
    /// Mark dead. Killing a dead entity is a no-op.
    fn kill(&mut self);
}

/// A homogeneous container of entities
#[derive(Debug, Clone)]
pub struct Pool<T> {
    items: Vec<T>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Entity> Pool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Append a batch, then drop the oldest entries to stay within `cap`
    pub fn extend_bounded(&mut self, items: impl IntoIterator<Item = T>, cap: usize) {
        self.items.extend(items);
        let excess = self.items.len().saturating_sub(cap);
        if excess > 0 {
            self.items.drain(..excess);
        }
    }

    /// Advance every alive entity
    pub fn update_all(&mut self, dt: f32) {
        for item in self.items.iter_mut().filter(|e| e.is_alive()) {
            item.update(dt);
        }
    }

    /// Drop dead entities
    pub fn prune(&mut self) {
        self.items.retain(|e| e.is_alive());
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Iterate only the alive entities
    pub fn alive(&self) -> impl Iterator<Item = &T> {
        self.items.iter().filter(|e| e.is_alive())
    }
}

impl<'a, T: Entity> IntoIterator for &'a Pool<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Counter {
        ticks: u32,
        alive: bool,
    }

    impl Entity for Counter {
        fn update(&mut self, _dt: f32) {
            self.ticks += 1;
            if self.ticks >= 3 {
                self.kill();
            }
        }
        fn is_alive(&self) -> bool {
            self.alive
        }
        fn kill(&mut self) {
            self.alive = false;
        }
    }

    fn counter() -> Counter {
        Counter { ticks: 0, alive: true }
    }

    #[test]
    fn test_update_skips_dead() {
        let mut pool = Pool::new();
        pool.push(counter());
        let mut dead = counter();
        dead.kill();
        pool.push(dead);

        pool.update_all(0.016);
        let ticks: Vec<u32> = pool.iter().map(|c| c.ticks).collect();
        assert_eq!(ticks, vec![1, 0]);
        assert_eq!(pool.alive().count(), 1);
    }

    #[test]
    fn test_prune_after_lifetime() {
        let mut pool = Pool::new();
        pool.push(counter());
        for _ in 0..3 {
            pool.update_all(0.016);
        }
        assert_eq!(pool.len(), 1);
        pool.prune();
        assert!(pool.is_empty());
    }

    #[test]
    fn test_extend_bounded_drops_oldest() {
        let mut pool = Pool::new();
        pool.extend_bounded((0..2).map(|i| Counter { ticks: i, alive: true }), 3);
        assert_eq!(pool.len(), 2);

        pool.extend_bounded((2..5).map(|i| Counter { ticks: i, alive: true }), 3);
        let ticks: Vec<u32> = pool.iter().map(|c| c.ticks).collect();
        assert_eq!(ticks, vec![2, 3, 4]);

        // A burst larger than the cap keeps only its newest entries
        pool.extend_bounded((10..20).map(|i| Counter { ticks: i, alive: true }), 3);
        let ticks: Vec<u32> = pool.iter().map(|c| c.ticks).collect();
        assert_eq!(ticks, vec![17, 18, 19]);

        pool.extend_bounded([counter()], 0);
        assert!(pool.is_empty());
    }
}
