use std::sync::atomic::{AtomicI32, Ordering};

/// Hands out the `custom_model_data` handles that bind bones to their
/// pre-baked shapes. Values are unique for the cursor's whole lifetime,
/// also when several documents are read in parallel against the same
/// cursor. The starting value is caller-supplied so multiple cursors can
/// partition one handle space.
#[derive(Debug)]
pub struct ModelDataCursor {
    counter: AtomicI32,
}

impl ModelDataCursor {
    pub fn new(start: i32) -> Self {
        Self {
            counter: AtomicI32::new(start),
        }
    }

    /// Returns the current value and advances by one.
    pub fn next(&self) -> i32 {
        self.counter.fetch_add(1, Ordering::SeqCst)
    }
}

impl Default for ModelDataCursor {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn sequential_values_are_dense_and_unique() {
        let cursor = ModelDataCursor::new(100);
        let values: Vec<i32> = (0..16).map(|_| cursor.next()).collect();
        assert_eq!(values, (100..116).collect::<Vec<i32>>());
    }

    #[test]
    fn zero_calls_consume_nothing() {
        let cursor = ModelDataCursor::new(7);
        assert_eq!(cursor.next(), 7);
    }

    #[test]
    fn concurrent_callers_never_collide() {
        let cursor = Arc::new(ModelDataCursor::new(0));
        let mut handles = Vec::new();
        for _ in 0..8 {
            let cursor = Arc::clone(&cursor);
            handles.push(std::thread::spawn(move || {
                (0..250).map(|_| cursor.next()).collect::<Vec<i32>>()
            }));
        }
        let mut seen = HashSet::new();
        for handle in handles {
            for value in handle.join().unwrap() {
                assert!(seen.insert(value), "duplicate handle {}", value);
            }
        }
        assert_eq!(seen.len(), 2000);
        assert_eq!(seen.iter().min(), Some(&0));
        assert_eq!(seen.iter().max(), Some(&1999));
    }
}
