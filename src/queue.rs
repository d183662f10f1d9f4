use crate::element::Element;
use crate::error::{AllocError, QueueError};
use crate::{Iter, List};
use std::cmp::Ordering;
use std::fmt;
use tracing::{debug, trace};

/// A double-ended queue of owned strings.
///
/// Elements are compared by the bytes of their text. Every reordering
/// operation relinks the existing nodes; only the deleting operations
/// ([`delete_mid`], [`delete_dup`], [`ascend`], [`descend`]) release
/// elements.
///
/// # Examples
///
/// ```
/// use cyclic_queue::Queue;
///
/// let mut queue = Queue::new();
/// queue.insert_tail("c").unwrap();
/// queue.insert_tail("a").unwrap();
/// queue.insert_tail("b").unwrap();
/// queue.sort(false);
/// assert_eq!(queue.to_string(), "[a b c]");
///
/// let mut buf = [0_u8; 8];
/// let removed = queue.remove_head(Some(&mut buf[..])).unwrap();
/// assert_eq!(removed.value(), "a");
/// assert_eq!(&buf[..2], b"a\0");
/// ```
///
/// [`delete_mid`]: Queue::delete_mid
/// [`delete_dup`]: Queue::delete_dup
/// [`ascend`]: Queue::ascend
/// [`descend`]: Queue::descend
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Queue {
    list: List<Element>,
}

fn ordering(descend: bool) -> impl Fn(&Element, &Element) -> Ordering {
    move |a: &Element, b: &Element| if descend { b.cmp(a) } else { a.cmp(b) }
}

impl Queue {
    pub fn new() -> Self {
        Self { list: List::new() }
    }

    /// Create an empty queue, or return an error if its ghost node cannot be
    /// allocated.
    pub fn try_new() -> Result<Self, AllocError> {
        Ok(Self {
            list: List::try_new()?,
        })
    }

    /// Build a queue holding a copy of every string of `values`, in order.
    pub fn try_from_strs<I, S>(values: I) -> Result<Self, QueueError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut queue = Self::try_new()?;
        for value in values {
            queue.insert_tail(value.as_ref())?;
        }
        Ok(queue)
    }

    /// Insert a copy of `value` at the head of the queue.
    ///
    /// On error the queue is left unchanged.
    pub fn insert_head(&mut self, value: &str) -> Result<(), QueueError> {
        let element = Element::try_new(value)?;
        self.list.try_push_front(element)?;
        Ok(())
    }

    /// Insert a copy of `value` at the tail of the queue.
    ///
    /// On error the queue is left unchanged.
    pub fn insert_tail(&mut self, value: &str) -> Result<(), QueueError> {
        let element = Element::try_new(value)?;
        self.list.try_push_back(element)?;
        Ok(())
    }

    /// Unlink the head element and hand it over to the caller, or return
    /// `None` if the queue is empty.
    ///
    /// If `buf` is given, the text is also copied into it as a NUL-terminated
    /// byte string, see [`Element::copy_to`].
    pub fn remove_head(&mut self, buf: Option<&mut [u8]>) -> Option<Element> {
        let element = self.list.pop_front()?;
        if let Some(buf) = buf {
            element.copy_to(buf);
        }
        Some(element)
    }

    /// Unlink the tail element and hand it over to the caller, or return
    /// `None` if the queue is empty.
    ///
    /// If `buf` is given, the text is also copied into it as a NUL-terminated
    /// byte string, see [`Element::copy_to`].
    pub fn remove_tail(&mut self, buf: Option<&mut [u8]>) -> Option<Element> {
        let element = self.list.pop_back()?;
        if let Some(buf) = buf {
            element.copy_to(buf);
        }
        Some(element)
    }

    /// Number of elements in the queue.
    pub fn size(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Element> {
        self.list.iter()
    }

    /// Iterate over the texts of the elements, from head to tail.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &str> + '_ {
        self.list.iter().map(Element::value)
    }

    pub fn as_list(&self) -> &List<Element> {
        &self.list
    }

    /// Delete the ⌊*n* / 2⌋-th element (counting from zero).
    ///
    /// Returns [`QueueError::Empty`] if there is nothing to delete.
    pub fn delete_mid(&mut self) -> Result<(), QueueError> {
        let element = self.list.remove_middle().ok_or(QueueError::Empty)?;
        trace!(value = element.value(), "deleted middle element");
        Ok(())
    }

    /// Delete every element whose text equals a neighbour's, leaving none of
    /// the repeated values. The queue is expected to be sorted ascending; on
    /// other orders only adjacent repeats are found.
    ///
    /// Returns the number of elements deleted.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::try_from_strs(["a", "a", "b"]).unwrap();
    /// queue.sort(false);
    /// assert_eq!(queue.delete_dup(), 2);
    /// assert_eq!(queue.to_string(), "[b]");
    /// ```
    pub fn delete_dup(&mut self) -> usize {
        let removed = self.list.remove_duplicate_runs_by(|a, b| a == b);
        trace!(removed, "deleted duplicate runs");
        removed
    }

    /// Swap every two adjacent elements.
    pub fn swap(&mut self) {
        self.list.swap_pairs();
    }

    pub fn reverse(&mut self) {
        self.list.reverse();
    }

    /// Reverse the elements inside each group of `k`, leaving a trailing
    /// partial group as is.
    pub fn reverse_k(&mut self, k: usize) {
        self.list.reverse_groups(k);
    }

    /// Stable sort by the bytes of the text, ascending unless `descend`.
    pub fn sort(&mut self, descend: bool) {
        self.list.sort_by(ordering(descend));
    }

    /// Delete every element that has a strictly smaller element anywhere
    /// after it. Returns the number of elements deleted.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::try_from_strs(["5", "2", "8", "1"]).unwrap();
    /// assert_eq!(queue.ascend(), 3);
    /// assert_eq!(queue.to_string(), "[1]");
    /// ```
    pub fn ascend(&mut self) -> usize {
        let removed = self.list.remove_dominated_by(|later, element| later < element);
        trace!(removed, "deleted elements with a smaller successor");
        removed
    }

    /// Delete every element that has a strictly greater element anywhere
    /// after it. Returns the number of elements deleted.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::try_from_strs(["5", "2", "8", "1"]).unwrap();
    /// assert_eq!(queue.descend(), 2);
    /// assert_eq!(queue.to_string(), "[8 1]");
    /// ```
    pub fn descend(&mut self) -> usize {
        let removed = self.list.remove_dominated_by(|later, element| later > element);
        trace!(removed, "deleted elements with a greater successor");
        removed
    }

    /// Move every element of `other` into `self`, both already sorted in the
    /// given direction.
    fn absorb(&mut self, other: &mut Queue, descend: bool) {
        self.list.merge_by(&mut other.list, ordering(descend));
    }
}

/// Merge every queue of `chain`, each already sorted in the given direction,
/// into the first one. The other queues are left empty but still usable.
///
/// Returns the total number of elements, which all end up in the first queue.
/// Elements with equal text keep the order of the queues they came from, and
/// their order within each queue.
///
/// Queues are merged pairwise in rounds (the 1st absorbs the 2nd, the 3rd
/// absorbs the 4th, then the 1st absorbs the 3rd, ...), so the whole merge
/// takes *O*(*n* log *k*) comparisons for *n* elements in *k* queues.
///
/// # Examples
///
/// ```
/// use cyclic_queue::{merge, List, Queue};
///
/// let mut chain = List::new();
/// chain.push_back(Queue::try_from_strs(["1", "3", "5"]).unwrap());
/// chain.push_back(Queue::try_from_strs(["2", "4"]).unwrap());
///
/// assert_eq!(merge(&mut chain, false), 5);
/// let mut queues = chain.iter();
/// assert_eq!(queues.next().unwrap().to_string(), "[1 2 3 4 5]");
/// assert!(queues.next().unwrap().is_empty());
/// ```
pub fn merge(chain: &mut List<Queue>, descend: bool) -> usize {
    let mut queues: Vec<&mut Queue> = chain.iter_mut().collect();
    if queues.is_empty() {
        return 0;
    }
    let mut step = 1;
    while step < queues.len() {
        let mut i = 0;
        while i + step < queues.len() {
            let (left, right) = queues.split_at_mut(i + step);
            left[i].absorb(&mut *right[0], descend);
            i += 2 * step;
        }
        step *= 2;
    }
    let total = queues[0].size();
    debug!(queues = queues.len(), total, descend, "merged sorted queues");
    total
}

impl fmt::Display for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.values().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(value)?;
        }
        f.write_str("]")
    }
}

impl FromIterator<Element> for Queue {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        Self {
            list: List::from_iter(iter),
        }
    }
}

impl<'a> IntoIterator for &'a Queue {
    type Item = &'a Element;
    type IntoIter = Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
