use crate::list::List;

impl<T> List<T> {
    /// Removes every element that belongs to a run of two or more adjacent
    /// equal elements, so that no copy of a repeated value is left.
    ///
    /// On a sorted list this keeps exactly the values that occurred once.
    /// Returns the number of elements removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 1, 2, 3, 3, 3, 4]);
    /// assert_eq!(list.remove_duplicate_runs_by(|a, b| a == b), 5);
    /// assert_eq!(Vec::from_iter(list), vec![2, 4]);
    /// ```
    pub fn remove_duplicate_runs_by<F>(&mut self, mut same: F) -> usize
    where
        F: FnMut(&T, &T) -> bool,
    {
        let ghost = self.ghost_node();
        let mut current = self.front_node();
        let mut removed = 0;
        // SAFETY: `current` and `run_end` only walk forward over live nodes, and
        // the nodes of `current..run_end` are released one by one after the run
        // has been measured.
        unsafe {
            while current != ghost {
                let mut run_end = current.as_ref().next;
                while run_end != ghost && same(&current.as_ref().element, &run_end.as_ref().element)
                {
                    run_end = run_end.as_ref().next;
                }
                if run_end == current.as_ref().next {
                    current = run_end;
                    continue;
                }
                while current != run_end {
                    let next = current.as_ref().next;
                    drop(self.detach_node(current));
                    removed += 1;
                    current = next;
                }
            }
        }
        removed
    }

    /// Removes every element that has a *dominating* element anywhere after
    /// it, i.e. an element `later` such that `dominates(later, element)`.
    ///
    /// With `dominates = |later, x| later < x` the surviving elements form a
    /// non-decreasing sequence, and with `|later, x| later > x` a
    /// non-increasing one. Returns the number of elements removed.
    ///
    /// The list is scanned once from the back, keeping the last survivor as
    /// the running extremum, so `dominates` must be transitive.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([5, 2, 13, 3, 8]);
    /// assert_eq!(list.remove_dominated_by(|later, x| later > x), 3);
    /// assert_eq!(Vec::from_iter(list), vec![13, 8]);
    /// ```
    pub fn remove_dominated_by<F>(&mut self, mut dominates: F) -> usize
    where
        F: FnMut(&T, &T) -> bool,
    {
        let ghost = self.ghost_node();
        let mut extremum = self.back_node();
        if extremum == ghost {
            return 0;
        }
        let mut removed = 0;
        // SAFETY: `node` walks backward over live nodes, and `extremum` is
        // always a survivor located after `node`.
        unsafe {
            let mut node = extremum.as_ref().prev;
            while node != ghost {
                let prev = node.as_ref().prev;
                if dominates(&extremum.as_ref().element, &node.as_ref().element) {
                    drop(self.detach_node(node));
                    removed += 1;
                } else {
                    extremum = node;
                }
                node = prev;
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use crate::List;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use std::iter::FromIterator;

    fn naive_remove_dominated(input: &[u8], dominates: fn(&u8, &u8) -> bool) -> Vec<u8> {
        input
            .iter()
            .enumerate()
            .filter(|&(i, x)| !input[i + 1..].iter().any(|later| dominates(later, x)))
            .map(|(_, x)| *x)
            .collect()
    }

    #[test]
    fn duplicate_runs_are_dropped_entirely() {
        let mut list = List::from_iter(["a", "a", "b"]);
        assert_eq!(list.remove_duplicate_runs_by(|a, b| a == b), 2);
        list.assert_well_formed();
        assert_eq!(Vec::from_iter(list), vec!["b"]);

        let mut list = List::from_iter([1, 1, 1]);
        assert_eq!(list.remove_duplicate_runs_by(|a, b| a == b), 3);
        assert!(list.is_empty());
        list.assert_well_formed();

        let mut list = List::from_iter([1]);
        assert_eq!(list.remove_duplicate_runs_by(|a, b| a == b), 0);
        let mut list = List::<i32>::new();
        assert_eq!(list.remove_duplicate_runs_by(|a, b| a == b), 0);
    }

    #[test]
    fn dominated_elements_match_naive_definition() {
        let ascend: fn(&u8, &u8) -> bool = |later, x| later < x;
        let descend: fn(&u8, &u8) -> bool = |later, x| later > x;
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for len in 0..40 {
            let input: Vec<u8> = (0..len).map(|_| rng.random_range(0..10)).collect();
            for dominates in [ascend, descend] {
                let mut list = List::from_iter(input.iter().copied());
                let expected = naive_remove_dominated(&input, dominates);
                let removed = list.remove_dominated_by(dominates);
                list.assert_well_formed();
                assert_eq!(removed, input.len() - expected.len());
                assert_eq!(Vec::from_iter(list), expected);
            }
        }
    }
}
