use crate::list::{move_node, move_nodes, List, Node};
use std::cmp::Ordering;
use std::ptr::NonNull;

const INSERTION_SORT_THRESHOLD: usize = 8;

impl<T> List<T> {
    /// Sort the list.
    ///
    /// This sort is stable (i.e., does not reorder equal elements).
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* * log(*n*)) time and *O*(1) memory.
    ///
    /// # Current Implementation
    ///
    /// The current algorithm is a top-down merge sort over the links, with an
    /// insertion sort for short ranges. Nodes are only relinked, never moved in
    /// memory or reallocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    /// let mut list = List::from_iter([5, 2, 4, 3, 1]);
    ///
    /// list.sort();
    ///
    /// assert_eq!(Vec::from_iter(list), vec![1, 2, 3, 4, 5]);
    /// ```
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        merge_sort(self, |a, b| a.lt(b));
    }

    /// Sort the list with a comparator function.
    ///
    /// This sort is stable (i.e., does not reorder equal elements).
    ///
    /// The comparator function must define a total ordering for the
    /// elements in the list. If the ordering is not total, the order
    /// of the elements is unspecified.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    /// let mut v = List::from_iter([5, 4, 1, 3, 2]);
    /// v.sort_by(|a, b| a.cmp(b));
    /// assert_eq!(Vec::from_iter(v.iter().copied()), vec![1, 2, 3, 4, 5]);
    ///
    /// // reverse sorting
    /// v.sort_by(|a, b| b.cmp(a));
    /// assert_eq!(Vec::from_iter(v), vec![5, 4, 3, 2, 1]);
    /// ```
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        merge_sort(self, |a, b| compare(a, b) == Ordering::Less)
    }

    /// Moves all elements of `other` into `self`, where both lists are
    /// already sorted by `compare`, keeping the result sorted.
    ///
    /// The merge is stable: on equal keys, elements of `self` come before
    /// elements of `other`, and each side keeps its relative order. After
    /// this operation, `other` becomes empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* + *m*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 3, 5]);
    /// let mut other = List::from_iter([2, 4]);
    /// list.merge_by(&mut other, |a, b| a.cmp(b));
    ///
    /// assert!(other.is_empty());
    /// assert_eq!(Vec::from_iter(list), vec![1, 2, 3, 4, 5]);
    /// ```
    pub fn merge_by<F>(&mut self, other: &mut List<T>, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            self.append(other);
            return;
        }
        let mid = other.front_node();
        self.append(other);
        let (start, end) = (self.front_node(), self.ghost_node());
        let mut less = |a: &T, b: &T| compare(a, b) == Ordering::Less;
        // SAFETY: `start..mid` and `mid..end` are both non-empty sorted ranges of `self`.
        unsafe { merge_range(start, mid, end, &mut less) };
    }
}

fn merge_sort<T, F>(list: &mut List<T>, mut less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    let (start, end) = (list.front_node(), list.ghost_node());
    // SAFETY: `start..end` covers the whole list.
    unsafe {
        if start == end || start.as_ref().next == end {
            return;
        }
        merge_sort_range(start, end, &mut less);
    }
}

unsafe fn mid_of_range<T>(
    mut start: NonNull<Node<T>>,
    end: NonNull<Node<T>>,
) -> (NonNull<Node<T>>, usize) {
    let mut mid = start;
    let mut len = 0;
    while start != end {
        len += 1;
        start = start.as_ref().next;
        if start != end {
            len += 1;
            start = start.as_ref().next;
            mid = mid.as_ref().next;
        }
    }
    (mid, len)
}

/// Sort `start..end` and return the new first node of the range.
///
/// The nodes outside the range, including `end`, are not moved.
unsafe fn merge_sort_range<T, F>(
    mut start: NonNull<Node<T>>,
    end: NonNull<Node<T>>,
    less: &mut F,
) -> NonNull<Node<T>>
where
    F: FnMut(&T, &T) -> bool,
{
    let (mut mid, len) = mid_of_range(start, end);
    if len <= INSERTION_SORT_THRESHOLD {
        return insertion_sort_range(start, end, less);
    }

    start = merge_sort_range(start, mid, less);
    mid = merge_sort_range(mid, end, less);
    merge_range(start, mid, end, less)
}

/// Merge the sorted ranges `start..mid` and `mid..end`, both non-empty, and
/// return the new first node of `start..end`.
unsafe fn merge_range<T, F>(
    mut start: NonNull<Node<T>>,
    mid: NonNull<Node<T>>,
    end: NonNull<Node<T>>,
    less: &mut F,
) -> NonNull<Node<T>>
where
    F: FnMut(&T, &T) -> bool,
{
    // This algorithm first logically partitions the range into
    // two sub-range, both of which are internal sorted:
    // - merged range: `start..mid`,
    // - unmerged range: `mid..end`.
    //
    // Then merge the nodes in the unmerged range run by run
    // into the merged range.
    let (mut merged, merged_back, mut to_merge) = (start, mid.as_ref().prev, mid);
    // If the back of merged range <= the front of unmerged range,
    // it is fully sorted, the algorithm stops here.
    while to_merge != end && less(&to_merge.as_ref().element, &merged_back.as_ref().element) {
        // Find a position of `merged` in the merged range,
        // where the element of the current node to merge < `*merged`.
        while !less(&to_merge.as_ref().element, &merged.as_ref().element) {
            merged = merged.as_ref().next;
        }

        // Find a sub-range `to_merge..next_to_merge` in the unmerged range,
        // where all the element in it is < `*merged`.
        let mut next_to_merge = to_merge.as_ref().next;
        while next_to_merge != end
            && less(&next_to_merge.as_ref().element, &merged.as_ref().element)
        {
            next_to_merge = next_to_merge.as_ref().next;
        }
        if merged == start {
            start = to_merge;
        }
        // Move the sub-range `to_merge..next_to_merge` to the
        // node before `merged`.
        move_nodes(to_merge, next_to_merge.as_ref().prev, merged);
        to_merge = next_to_merge;
    }
    start
}

unsafe fn insertion_sort_range<T, F>(
    mut start: NonNull<Node<T>>,
    end: NonNull<Node<T>>,
    less: &mut F,
) -> NonNull<Node<T>>
where
    F: FnMut(&T, &T) -> bool,
{
    if start == end {
        return start;
    }
    let (mut sorted_back, mut to_sort) = (start, start.as_ref().next);
    loop {
        // If the back of sorted range <= the current node to sort,
        // then it is already sorted. Move on to sort the next node.
        while to_sort != end && !less(&to_sort.as_ref().element, &sorted_back.as_ref().element) {
            sorted_back = to_sort;
            to_sort = to_sort.as_ref().next;
        }
        if to_sort == end {
            break;
        }
        // Find a position of `sorted` in the sorted range,
        // where the element of the current node to sort < `*sorted`.
        let mut sorted = start;
        while !less(&to_sort.as_ref().element, &sorted.as_ref().element) {
            sorted = sorted.as_ref().next;
        }
        if sorted == start {
            start = to_sort;
        }
        let next = to_sort.as_ref().next;
        // move the node `to_sort` to the node before `sorted`.
        move_node(std::mem::replace(&mut to_sort, next), sorted);
    }
    start
}

#[cfg(test)]
mod tests {
    use crate::List;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use std::iter::FromIterator;

    #[test]
    fn sort_matches_slice_sort() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for len in [0, 1, 2, 3, 8, 9, 17, 64, 257] {
            let input: Vec<u8> = (0..len).map(|_| rng.random_range(0..16)).collect();
            let mut list = List::from_iter(input.iter().copied());
            let mut expected = input.clone();
            expected.sort();
            list.sort();
            list.assert_well_formed();
            assert_eq!(Vec::from_iter(list), expected);
        }
    }

    #[test]
    fn sort_is_stable() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let input: Vec<(u8, usize)> = (0..200).map(|i| (rng.random_range(0..5), i)).collect();
        let mut list = List::from_iter(input.iter().copied());
        let mut expected = input.clone();
        expected.sort_by(|a, b| b.0.cmp(&a.0));
        list.sort_by(|a, b| b.0.cmp(&a.0));
        list.assert_well_formed();
        assert_eq!(Vec::from_iter(list), expected);
    }

    #[test]
    fn merge_keeps_self_first_on_ties() {
        let mut list = List::from_iter([(1, 'a'), (2, 'a'), (2, 'b')]);
        let mut other = List::from_iter([(0, 'c'), (2, 'c'), (3, 'c')]);
        list.merge_by(&mut other, |a, b| a.0.cmp(&b.0));
        list.assert_well_formed();
        other.assert_well_formed();
        assert!(other.is_empty());
        assert_eq!(
            Vec::from_iter(list),
            vec![(0, 'c'), (1, 'a'), (2, 'a'), (2, 'b'), (2, 'c'), (3, 'c')]
        );

        let mut empty = List::new();
        let mut other = List::from_iter([1, 2]);
        empty.merge_by(&mut other, |a, b| a.cmp(b));
        assert_eq!(Vec::from_iter(empty), vec![1, 2]);
    }
}
