//! Array-backed binary min-heap used as the priority queue of the Huffman construction.
//!
//! Positions are 1-based: the element at position `i` has parent `i/2` and children `2i`, `2i+1`.
//! Position `i` is stored at index `i-1` of the underlying vector.

/// Element of [`MinHeapQueue`].
///
/// The queue is ordered by `Ord`, which must be consistent with [`weight`](Weighted::weight)
/// (i.e. `a.weight() < b.weight()` implies `a < b`) and should be total among
/// the elements that are in the queue at the same time, so that ties are broken deterministically.
pub trait Weighted: Ord {
    /// Returns the weight (number of occurrences) of `self`.
    fn weight(&self) -> u64;
}

/// Binary min-heap of [`Weighted`] elements.
#[derive(Clone, Debug)]
pub struct MinHeapQueue<T> {
    elements: Vec<T>
}

impl<T> Default for MinHeapQueue<T> {
    #[inline] fn default() -> Self { Self { elements: Vec::new() } }
}

impl<T> MinHeapQueue<T> {
    /// Constructs an empty queue.
    #[inline] pub fn new() -> Self { Self::default() }

    /// Constructs an empty queue able to hold `capacity` elements without reallocation.
    #[inline] pub fn with_capacity(capacity: usize) -> Self { Self { elements: Vec::with_capacity(capacity) } }

    /// Returns the number of elements in the queue.
    #[inline] pub fn size(&self) -> usize { self.elements.len() }

    /// Returns whether the queue is empty.
    #[inline] pub fn is_empty(&self) -> bool { self.elements.is_empty() }

    /// Returns the elements in array (level) order.
    #[inline] pub fn as_slice(&self) -> &[T] { &self.elements }

    /// Returns the minimum without removing it, or `None` if the queue is empty.
    #[inline] pub fn peek(&self) -> Option<&T> { self.elements.first() }

    /// Replaces each element `e` with `f(e)`, keeping positions unchanged.
    ///
    /// The heap property is preserved if `f` preserves the relative order of the elements.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> MinHeapQueue<U> {
        MinHeapQueue { elements: self.elements.into_iter().map(f).collect() }
    }

    #[inline(always)] fn at(&self, pos: usize) -> &T { &self.elements[pos - 1] }

    #[inline(always)] fn swap(&mut self, a: usize, b: usize) { self.elements.swap(a - 1, b - 1) }
}

impl<T: Weighted> MinHeapQueue<T> {
    /// Constructs a queue that holds the `elements` in the given (arbitrary) order.
    /// [`build_heap`](MinHeapQueue::build_heap) must be called before the queue is used as a heap.
    #[inline] pub fn from_unordered(elements: Vec<T>) -> Self { Self { elements } }

    /// Constructs a heap from `elements` in linear time.
    pub fn from_vec(elements: Vec<T>) -> Self {
        let mut result = Self::from_unordered(elements);
        result.build_heap();
        result
    }

    /// Appends `element` at the first free position and sifts it up.
    pub fn insert(&mut self, element: T) {
        self.elements.push(element);
        let mut pos = self.size();
        while pos > 1 && self.at(pos) < self.at(pos / 2) {
            self.swap(pos, pos / 2);
            pos /= 2;
        }
    }

    /// Removes and returns the minimum, or returns `None` if the queue is empty.
    pub fn extract_min(&mut self) -> Option<T> {
        let n = self.size();
        if n == 0 { return None; }
        self.swap(1, n);
        let result = self.elements.pop();
        self.sift_down(1, n - 1);
        result
    }

    /// Establishes the heap property over the whole (arbitrarily ordered) array in linear time.
    pub fn build_heap(&mut self) {
        let n = self.size();
        for i in (1..=n / 2).rev() {
            self.sift_down(i, n);
        }
    }

    /// Sorts the array in place by non-increasing weight (the minimum lands at the end).
    ///
    /// The array must satisfy the heap property, and does not satisfy it afterwards
    /// (unless it is trivial); call [`build_heap`](MinHeapQueue::build_heap) to restore it.
    pub fn heap_sort_descending(&mut self) {
        for last in (2..=self.size()).rev() {
            self.swap(1, last);
            self.sift_down(1, last - 1);
        }
    }

    /// Removes elements from the end of the array as long as `pred` is satisfied by the last one.
    /// Returns the number of removed elements.
    pub fn truncate_tail_while<P: FnMut(&T) -> bool>(&mut self, mut pred: P) -> usize {
        let before = self.size();
        while self.elements.last().map_or(false, &mut pred) {
            self.elements.pop();
        }
        before - self.size()
    }

    /// Returns whether the heap property holds at every position.
    pub fn is_heap(&self) -> bool {
        (2..=self.size()).all(|i| self.at(i / 2) <= self.at(i))
    }

    /// Restores the heap property of the subtree rooted at position `j`,
    /// considering only positions up to `n`.
    fn sift_down(&mut self, mut j: usize, n: usize) {
        loop {
            let mut k = j;
            let l = 2 * j;
            if l <= n && self.at(l) < self.at(k) { k = l; }
            if l + 1 <= n && self.at(l + 1) < self.at(k) { k = l + 1; }
            if k == j { return; }
            self.swap(j, k);
            j = k;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
    struct Item { weight: u64, rank: u32 }

    impl Weighted for Item {
        #[inline] fn weight(&self) -> u64 { self.weight }
    }

    fn items(weights: &[u64]) -> Vec<Item> {
        weights.iter().enumerate().map(|(rank, &weight)| Item { weight, rank: rank as u32 }).collect()
    }

    fn drain(mut queue: MinHeapQueue<Item>) -> Vec<Item> {
        let mut result = Vec::new();
        while let Some(item) = queue.extract_min() { result.push(item); }
        result
    }

    #[test]
    fn empty_queue() {
        let mut queue = MinHeapQueue::<Item>::new();
        assert_eq!(queue.size(), 0);
        assert_eq!(queue.extract_min(), None);
        assert!(queue.is_heap());
        queue.heap_sort_descending();
        queue.build_heap();
        assert!(queue.is_empty());
    }

    #[test]
    fn build_heap_establishes_heap_property() {
        let mut queue = MinHeapQueue::from_unordered(items(&[9, 4, 7, 1, 8, 2, 2, 6, 0, 5]));
        assert!(!queue.is_heap());
        queue.build_heap();
        assert!(queue.is_heap());
        assert_eq!(queue.peek().map(Weighted::weight), Some(0));
    }

    #[test]
    fn insert_sifts_up() {
        let mut queue = MinHeapQueue::new();
        for item in items(&[5, 3, 8, 1, 9, 1]) {
            queue.insert(item);
            assert!(queue.is_heap());
        }
        assert_eq!(queue.size(), 6);
        assert_eq!(queue.peek(), Some(&Item { weight: 1, rank: 3 }));
    }

    #[test]
    fn extract_min_in_order() {
        let queue = MinHeapQueue::from_vec(items(&[3, 1, 4, 1, 5, 9, 2, 6]));
        let weights: Vec<u64> = drain(queue).iter().map(Weighted::weight).collect();
        assert_eq!(weights, [1, 1, 2, 3, 4, 5, 6, 9]);
    }

    #[test]
    fn ties_broken_by_rank() {
        // many elements of the same weight, as in the case of rare bytes
        let queue = MinHeapQueue::from_vec(items(&[1, 1, 1, 0, 1, 1, 1, 1]));
        let ranks: Vec<u32> = drain(queue).iter().map(|i| i.rank).collect();
        assert_eq!(ranks, [3, 0, 1, 2, 4, 5, 6, 7]);
    }

    #[test]
    fn ties_independent_of_insertion_order() {
        let mut forward = MinHeapQueue::new();
        let mut backward = MinHeapQueue::new();
        let all = items(&[2, 2, 1, 2, 1, 2]);
        for item in all.iter() { forward.insert(*item); }
        for item in all.iter().rev() { backward.insert(*item); }
        assert_eq!(drain(forward), drain(backward));
    }

    #[test]
    fn heap_sort_descending() {
        let mut queue = MinHeapQueue::from_vec(items(&[0, 7, 3, 0, 3, 12, 1, 0]));
        queue.heap_sort_descending();
        let weights: Vec<u64> = queue.as_slice().iter().map(Weighted::weight).collect();
        assert_eq!(weights, [12, 7, 3, 3, 1, 0, 0, 0]);
        assert_eq!(queue.truncate_tail_while(|i| i.weight == 0), 3);
        assert_eq!(queue.size(), 5);
        queue.build_heap();
        assert!(queue.is_heap());
        assert_eq!(queue.peek().map(Weighted::weight), Some(1));
    }

    #[test]
    fn map_keeps_positions() {
        let queue = MinHeapQueue::from_vec(items(&[4, 2, 6]));
        let before: Vec<u32> = queue.as_slice().iter().map(|i| i.rank).collect();
        let mapped = queue.map(|i| Item { weight: i.weight * 2, rank: i.rank });
        assert!(mapped.is_heap());
        assert_eq!(mapped.as_slice().iter().map(|i| i.rank).collect::<Vec<_>>(), before);
    }
}
