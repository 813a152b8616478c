//! Bounded best-K container.
//!
//! Keeps at most K items, ordered best to worst by a caller-supplied
//! relation, under a stream of insertion attempts. Insertion is O(K) in the
//! worst case, which is fine because K is a handful of results while the
//! stream is millions of candidates — almost every offer is rejected after a
//! single comparison against the current worst.
//!
//! The links are indices into a slot arena rather than pointers; an evicted
//! item's slot is reused in place for the incoming one.

/// Index-linked node. `prev` leads toward the best end, `next` toward the
/// worst.
#[derive(Debug)]
struct Node<T> {
    item: T,
    prev: Option<usize>,
    next: Option<usize>,
}

/// A fixed-capacity list of the best items seen so far, best first.
///
/// `better(a, b)` must return true when `a` ranks strictly ahead of `b`.
/// Not safe for concurrent use; the search pipeline funnels all offers
/// through a single drain loop.
#[derive(Debug)]
pub struct SortedFixedList<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    capacity: usize,
    better: F,
    nodes: Vec<Node<T>>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl<T, F> SortedFixedList<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    pub fn new(capacity: usize, better: F) -> SortedFixedList<T, F> {
        SortedFixedList {
            capacity,
            better,
            nodes: Vec::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Offer an item. While under capacity it is always kept. At capacity it
    /// displaces the current worst item only if it ranks ahead of it.
    ///
    /// Returns the item the caller gets back for recycling: `None` if the
    /// list simply grew, otherwise either the evicted worst item or the
    /// rejected offer itself.
    pub fn offer(&mut self, item: T) -> Option<T> {
        if self.nodes.len() < self.capacity {
            let index = self.nodes.len();
            self.nodes.push(Node {
                item,
                prev: None,
                next: None,
            });
            self.link(index);
            return None;
        }

        let tail = match self.tail {
            Some(tail) => tail,
            None => return Some(item), // capacity 0
        };
        if (self.better)(&item, &self.nodes[tail].item) {
            self.unlink_tail();
            let evicted = std::mem::replace(&mut self.nodes[tail].item, item);
            self.link(tail);
            Some(evicted)
        } else {
            Some(item)
        }
    }

    /// Iterate best to worst. Only meaningful once insertion is finished.
    pub fn iter(&self) -> Iter<'_, T, F> {
        Iter {
            list: self,
            current: self.head,
        }
    }

    /// Consume the list into a best-first vector.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut current = self.head;
        // Drain in link order; indices shift as nodes are removed, so walk
        // by item identity instead: repeatedly pop the head slot.
        while let Some(index) = current {
            current = self.nodes[index].next;
            out.push(index);
        }
        let mut items: Vec<Option<T>> = self.nodes.drain(..).map(|n| Some(n.item)).collect();
        out.into_iter()
            .map(|index| items[index].take().expect("each slot linked once"))
            .collect()
    }

    /// Place the node at `index` into the chain at its sorted position.
    fn link(&mut self, index: usize) {
        let head = match self.head {
            Some(head) => head,
            None => {
                self.head = Some(index);
                self.tail = Some(index);
                self.nodes[index].prev = None;
                self.nodes[index].next = None;
                return;
            }
        };

        if (self.better)(&self.nodes[index].item, &self.nodes[head].item) {
            self.nodes[index].prev = None;
            self.nodes[index].next = Some(head);
            self.nodes[head].prev = Some(index);
            self.head = Some(index);
            return;
        }

        // Walk up from the worst end to the first member that does not rank
        // behind the new item, and append after it.
        let mut current = self.tail.expect("nonempty list has a tail");
        while (self.better)(&self.nodes[index].item, &self.nodes[current].item) {
            current = self.nodes[current].prev.expect("head ranks ahead of item");
        }

        let next = self.nodes[current].next;
        self.nodes[index].prev = Some(current);
        self.nodes[index].next = next;
        self.nodes[current].next = Some(index);
        match next {
            Some(next) => self.nodes[next].prev = Some(index),
            None => self.tail = Some(index),
        }
    }

    fn unlink_tail(&mut self) {
        let tail = self.tail.expect("unlink_tail on nonempty list");
        match self.nodes[tail].prev {
            Some(prev) => {
                self.nodes[prev].next = None;
                self.tail = Some(prev);
            }
            None => {
                self.head = None;
                self.tail = None;
            }
        }
        self.nodes[tail].prev = None;
        self.nodes[tail].next = None;
    }
}

pub struct Iter<'a, T, F>
where
    F: Fn(&T, &T) -> bool,
{
    list: &'a SortedFixedList<T, F>,
    current: Option<usize>,
}

impl<'a, T, F> Iterator for Iter<'a, T, F>
where
    F: Fn(&T, &T) -> bool,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let index = self.current?;
        self.current = self.list.nodes[index].next;
        Some(&self.list.nodes[index].item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents<F: Fn(&i32, &i32) -> bool>(list: &SortedFixedList<i32, F>) -> Vec<i32> {
        list.iter().copied().collect()
    }

    #[test]
    fn keeps_largest_with_greater_is_better() {
        let mut list = SortedFixedList::new(3, |a: &i32, b: &i32| a > b);
        for v in [1, 2, 3, 4, 5] {
            list.offer(v);
        }
        assert_eq!(contents(&list), vec![5, 4, 3]);
    }

    #[test]
    fn out_of_order_offers_greater_is_better() {
        let mut list = SortedFixedList::new(3, |a: &i32, b: &i32| a > b);
        for v in [3, 13, 1, 8, 25, 7] {
            list.offer(v);
        }
        assert_eq!(contents(&list), vec![25, 13, 8]);
    }

    #[test]
    fn out_of_order_offers_smaller_is_better() {
        let mut list = SortedFixedList::new(3, |a: &i32, b: &i32| a < b);
        for v in [3, 13, 1, 8, 25, 7] {
            list.offer(v);
        }
        assert_eq!(contents(&list), vec![1, 3, 7]);
    }

    #[test]
    fn offer_returns_displaced_item() {
        let mut list = SortedFixedList::new(2, |a: &i32, b: &i32| a < b);
        assert_eq!(list.offer(10), None);
        assert_eq!(list.offer(20), None);
        // Better than the worst: the worst comes back.
        assert_eq!(list.offer(5), Some(20));
        // Not better: the offer comes back.
        assert_eq!(list.offer(30), Some(30));
        assert_eq!(contents(&list), vec![5, 10]);
    }

    #[test]
    fn never_exceeds_capacity_and_stays_sorted() {
        let mut list = SortedFixedList::new(4, |a: &i32, b: &i32| a < b);
        let mut seen = Vec::new();
        // Deterministic scramble of 0..100.
        for i in 0..100i32 {
            let v = (i * 37 + 11) % 100;
            seen.push(v);
            list.offer(v);

            assert!(list.len() <= 4);
            let held = contents(&list);
            assert!(held.windows(2).all(|w| w[0] <= w[1]));

            let mut best = seen.clone();
            best.sort_unstable();
            best.truncate(list.len());
            assert_eq!(held, best);
        }
    }

    #[test]
    fn handles_duplicate_values() {
        let mut list = SortedFixedList::new(3, |a: &i32, b: &i32| a < b);
        for v in [5, 5, 5, 5, 1] {
            list.offer(v);
        }
        assert_eq!(contents(&list), vec![1, 5, 5]);
    }

    #[test]
    fn fewer_offers_than_capacity() {
        let mut list = SortedFixedList::new(10, |a: &i32, b: &i32| a < b);
        list.offer(2);
        list.offer(1);
        assert_eq!(list.len(), 2);
        assert_eq!(contents(&list), vec![1, 2]);
    }

    #[test]
    fn into_sorted_vec_preserves_order() {
        let mut list = SortedFixedList::new(3, |a: &i32, b: &i32| a < b);
        for v in [9, 2, 7, 4] {
            list.offer(v);
        }
        assert_eq!(list.into_sorted_vec(), vec![2, 4, 7]);
    }
}
