//! Bounded, descending result list.

/// Anything with a rating the bounded list can order by.
pub trait Scored {
    fn score(&self) -> f64;
}

/// Keeps the `capacity` best items in descending score order.
///
/// An item tied with one already present lands after it, so insertion order
/// breaks ties. When full, a new item must strictly beat the current minimum.
#[derive(Clone, Debug)]
pub struct TopK<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T: Scored> TopK<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Offer an item; returns whether it was kept.
    pub fn push(&mut self, item: T) -> bool {
        let score = item.score();
        if self.capacity == 0 || score.is_nan() {
            return false;
        }
        if self.items.len() == self.capacity {
            match self.items.last() {
                Some(min) if score <= min.score() => return false,
                _ => {}
            }
        }
        let pos = self.items.partition_point(|x| x.score() >= score);
        self.items.insert(pos, item);
        if self.items.len() > self.capacity {
            self.items.pop();
        }
        true
    }

    /// Lowest kept score, if any.
    pub fn min_score(&self) -> Option<f64> {
        self.items.last().map(Scored::score)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Scored> Extend<T> for TopK<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}
