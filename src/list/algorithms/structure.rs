//! Algorithms that reorder the nodes of a list by relinking only.

use crate::list::{move_node, List};
use std::mem;

impl<T> List<T> {
    /// Removes the middle element and returns it, or `None` if the list is
    /// empty.
    ///
    /// The middle element of a list of length *n* is the ⌊*n* / 2⌋-th one,
    /// counting from zero. It is found in a single pass, by walking inwards
    /// from both ends in turn until the two walks meet.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter(0..6);
    /// assert_eq!(list.remove_middle(), Some(3));
    /// assert_eq!(list.remove_middle(), Some(2));
    /// assert_eq!(Vec::from_iter(list), vec![0, 1, 4, 5]);
    /// ```
    pub fn remove_middle(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let (mut forward, mut backward) = (self.front_node(), self.back_node());
        let mut step_forward = true;
        // SAFETY: both walks stay inside the non-empty range `front..=back`,
        // and the gap between them shrinks by one on each step.
        unsafe {
            while forward != backward {
                if step_forward {
                    forward = forward.as_ref().next;
                } else {
                    backward = backward.as_ref().prev;
                }
                step_forward = !step_forward;
            }
            Some(self.detach_node(forward).into_element())
        }
    }

    /// Swaps every two adjacent elements: the 1st with the 2nd, the 3rd with
    /// the 4th, and so on. A trailing odd element stays in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter(1..=5);
    /// list.swap_pairs();
    /// assert_eq!(Vec::from_iter(list), vec![2, 1, 4, 3, 5]);
    /// ```
    pub fn swap_pairs(&mut self) {
        let mut cursor = self.cursor_start_mut();
        while cursor.swap_next() {
            // the cursor now sits on the second node of the swapped pair
            cursor.move_next_cyclic();
        }
    }

    /// Reverses the order of the list, by exchanging the `next` and `prev`
    /// links of every node, the ghost node included.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter(1..=3);
    /// list.reverse();
    /// assert_eq!(Vec::from_iter(list), vec![3, 2, 1]);
    /// ```
    pub fn reverse(&mut self) {
        let ghost = self.ghost_node();
        let mut node = ghost;
        // SAFETY: every node of the ring is visited exactly once.
        unsafe {
            loop {
                let links = node.as_mut();
                mem::swap(&mut links.next, &mut links.prev);
                // the old `next`
                node = links.prev;
                if node == ghost {
                    break;
                }
            }
        }
    }

    /// Reverses the order of the elements inside each consecutive group of
    /// `k` elements, counting from the front. A final group shorter than `k`
    /// keeps its order, and `k <= 1` changes nothing.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter(1..=8);
    /// list.reverse_groups(3);
    /// assert_eq!(Vec::from_iter(list), vec![3, 2, 1, 6, 5, 4, 7, 8]);
    /// ```
    pub fn reverse_groups(&mut self, k: usize) {
        if k <= 1 {
            return;
        }
        let ghost = self.ghost_node();
        // the node right before the group being reversed
        let mut anchor = ghost;
        // SAFETY: all the nodes touched are inside `anchor.next..ghost`, and the
        // group is checked to hold `k` nodes before being relinked.
        unsafe {
            loop {
                let mut probe = anchor.as_ref().next;
                let mut count = 0;
                while count < k && probe != ghost {
                    probe = probe.as_ref().next;
                    count += 1;
                }
                if count < k {
                    break;
                }
                // Pull each following node of the group in front of it; the
                // original first node ends up last.
                let first = anchor.as_ref().next;
                for _ in 1..k {
                    move_node(first.as_ref().next, anchor.as_ref().next);
                }
                anchor = first;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::List;
    use std::iter::FromIterator;

    fn reversed_in_groups(input: &[u32], k: usize) -> Vec<u32> {
        let mut expected = Vec::new();
        let mut chunks = input.chunks_exact(k.max(1));
        for chunk in &mut chunks {
            if k > 1 {
                expected.extend(chunk.iter().rev());
            } else {
                expected.extend(chunk);
            }
        }
        expected.extend(chunks.remainder());
        expected
    }

    #[test]
    fn remove_middle_picks_lower_middle_index() {
        for len in 1..10_u32 {
            let mut list = List::from_iter(0..len);
            assert_eq!(list.remove_middle(), Some(len / 2));
            list.assert_well_formed();
            assert_eq!(list.len(), len as usize - 1);
        }
        assert_eq!(List::<u32>::new().remove_middle(), None);
    }

    #[test]
    fn swap_pairs_even_and_odd() {
        for len in 0..8_u32 {
            let mut list = List::from_iter(0..len);
            list.swap_pairs();
            list.assert_well_formed();
            let expected = Vec::from_iter((0..len).map(|i| match i % 2 {
                0 if i + 1 < len => i + 1,
                0 => i,
                _ => i - 1,
            }));
            assert_eq!(Vec::from_iter(list), expected);
        }
    }

    #[test]
    fn reverse_twice_restores_order() {
        for len in 0..6_u32 {
            let mut list = List::from_iter(0..len);
            list.reverse();
            list.assert_well_formed();
            assert_eq!(Vec::from_iter(list.iter().copied()), Vec::from_iter((0..len).rev()));
            list.reverse();
            assert_eq!(Vec::from_iter(list), Vec::from_iter(0..len));
        }
    }

    #[test]
    fn reverse_groups_of_every_size() {
        let input = Vec::from_iter(0..11_u32);
        for k in 0..14 {
            let mut list = List::from_iter(input.iter().copied());
            list.reverse_groups(k);
            list.assert_well_formed();
            assert_eq!(Vec::from_iter(list), reversed_in_groups(&input, k), "k = {}", k);
        }
    }

    #[test]
    fn reverse_groups_of_full_length_is_reverse() {
        let mut grouped = List::from_iter(0..7);
        let mut reversed = grouped.clone();
        grouped.reverse_groups(7);
        reversed.reverse();
        assert_eq!(grouped, reversed);
    }
}
