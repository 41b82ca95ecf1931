use parking_lot::Mutex;
use std::sync::Arc;

/// A cloneable sink for values reported through
/// [`on_value`](crate::combinators::on_value) callbacks.
///
/// Clones share the same storage, so a grammar can hold one handle while the
/// caller drains another after the parse.
#[derive(Debug)]
pub struct Collector<T> {
    items: Arc<Mutex<Vec<T>>>,
}

impl<T> Clone for Collector<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T> Default for Collector<T> {
    fn default() -> Self {
        Self {
            items: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<T: Send + 'static> Collector<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, item: T) {
        self.items.lock().push(item);
    }

    /// Removes and returns everything collected so far.
    pub fn take(&self) -> Vec<T> {
        std::mem::take(&mut *self.items.lock())
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A callback pushing into this collector.
    pub fn sink(&self) -> impl Fn(T) + Send + Sync + 'static {
        let this = self.clone();
        move |item| this.push(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_clones_share_storage() {
        let a = Collector::new();
        let b = a.clone();
        a.push(1);
        b.push(2);
        assert_eq!(a.len(), 2);
        assert_eq!(b.take(), vec![1, 2]);
        assert!(a.is_empty());
    }

    #[test]
    fn test_collector_sink() {
        let c = Collector::new();
        let sink = c.sink();
        sink("x");
        sink("y");
        assert_eq!(c.take(), vec!["x", "y"]);
    }
}
