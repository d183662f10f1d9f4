use crate::error::AllocError;
use crate::list::{move_node, List, Node};
use std::fmt;
use std::fmt::Formatter;
use std::ptr::NonNull;

/// A cursor over a `List`.
///
/// A `Cursor` is like an iterator, except that it can freely seek back-and-forth.
///
/// In a list with length *n*, there are *n* + 1 valid locations for the cursor,
/// where the last one is the ghost node of the list.
///
/// # Examples
///
/// Here is a simple example showing how the cursors work. (The ghost node of the
/// list is denoted by `#`).
/// ```
/// use cyclic_queue::List;
/// use std::iter::FromIterator;
///
/// // Create a list: [ A B C D #]
/// let list = List::from_iter(['A', 'B', 'C', 'D']);
///
/// // Create a cursor at start: [|A B C D #]
/// let mut cursor = list.cursor_start();
/// assert_eq!(cursor.current(), Some(&'A'));
///
/// // Move cursor forward: [ A|B C D #]
/// assert!(cursor.move_next().is_ok());
/// assert_eq!(cursor.current(), Some(&'B'));
///
/// // Create a cursor in the end: [ A B C D|#]
/// let mut cursor = list.cursor_end();
/// assert_eq!(cursor.current(), None);
/// assert!(cursor.move_next().is_err());
///
/// // Move cursor forward, cyclically: [|A B C D #]
/// cursor.move_next_cyclic();
/// assert_eq!(cursor.current(), Some(&'A'));
/// ```
#[derive(Clone)]
pub struct Cursor<'a, T: 'a> {
    pub(crate) current: NonNull<Node<T>>,
    pub(crate) list: &'a List<T>,
}

/// A cursor over a `List` with editing operations.
///
/// The editing operations are the node-level primitives of the list: inserting
/// a node before or after the cursor, unlinking the node at the cursor, and
/// swapping it with its successor. None of them copies an element.
pub struct CursorMut<'a, T: 'a> {
    pub(crate) current: NonNull<Node<T>>,
    pub(crate) list: &'a mut List<T>,
}

macro_rules! impl_cursor {
    ($CURSOR:ident) => {
        // Private methods
        impl<'a, T: 'a> $CURSOR<'a, T> {
            pub(crate) fn is_ghost_node(&self) -> bool {
                self.current == self.list.ghost_node()
            }
            pub(crate) fn is_front_node(&self) -> bool {
                self.prev_node() == self.list.ghost_node()
            }
            pub(crate) fn next_node(&self) -> NonNull<Node<T>> {
                // SAFETY: `current.next` is always valid since it is a cyclic list.
                unsafe { self.current.as_ref().next }
            }
            pub(crate) fn prev_node(&self) -> NonNull<Node<T>> {
                // SAFETY: `current.prev` is always valid since it is a cyclic list.
                unsafe { self.current.as_ref().prev }
            }
        }

        impl<'a, T: 'a> $CURSOR<'a, T> {
            /// Returns `true` if the `List` is empty. See [`List::is_empty`].
            pub fn is_empty(&self) -> bool {
                self.list.is_empty()
            }

            /// Move the cursor to the next position, where passing
            /// through the ghost node is allowed.
            pub fn move_next_cyclic(&mut self) {
                self.current = self.next_node();
            }

            /// Move the cursor to the previous position, where passing
            /// through the ghost node is allowed.
            pub fn move_prev_cyclic(&mut self) {
                self.current = self.prev_node();
            }

            /// Move the cursor to the next position, or return an error
            /// when passing through the ghost node is happened.
            pub fn move_next(&mut self) -> Result<(), &'static str> {
                if !self.is_ghost_node() {
                    self.move_next_cyclic();
                    return Ok(());
                }
                Err("`move_next` across ghost boundary")
            }

            /// Move the cursor to the previous position, or return an error
            /// when passing through the ghost node is happened.
            pub fn move_prev(&mut self) -> Result<(), &'static str> {
                if !self.is_empty() && !self.is_front_node() {
                    self.move_prev_cyclic();
                    return Ok(());
                }
                Err("`move_prev` across ghost boundary")
            }

            /// Set the cursor to the start of the list (i.e. the first node).
            #[inline]
            pub fn move_to_start(&mut self) {
                self.current = self.list.front_node();
            }

            /// Set the cursor to the end of the list (i.e. the ghost node).
            #[inline]
            pub fn move_to_end(&mut self) {
                self.current = self.list.ghost_node();
            }

            /// Return an immutable reference of current node of the cursor,
            /// or return `None` if it is located at the ghost node.
            pub fn current(&self) -> Option<&'a T> {
                if self.is_ghost_node() {
                    return None;
                }
                // SAFETY: it is safe because non-ghost nodes must hold a
                // valid element.
                unsafe { Some(&self.current.as_ref().element) }
            }

            /// Return an immutable reference of previous node of the cursor,
            /// or return `None` if it is located at the first node.
            pub fn previous(&self) -> Option<&'a T> {
                if self.is_front_node() {
                    return None;
                }
                // SAFETY: it is safe because the previous node of a non-first node
                // is never a ghost node, and non-ghost nodes must hold a valid element.
                Some(unsafe { &self.prev_node().as_ref().element })
            }

            /// Return an immutable reference of next node of the cursor,
            /// or return `None` if the next node is the ghost node.
            pub fn peek_next(&self) -> Option<&'a T> {
                let next = self.next_node();
                if next == self.list.ghost_node() {
                    return None;
                }
                // SAFETY: `next` is a non-ghost node.
                Some(unsafe { &next.as_ref().element })
            }
        }

        impl<'a, T: fmt::Debug + 'a> fmt::Debug for $CURSOR<'a, T> {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($CURSOR))
                    .field("list", &self.list)
                    .field("current", &self.current())
                    .finish()
            }
        }
    };
}

impl_cursor!(CursorMut);
impl_cursor!(Cursor);

impl<'a, T: 'a> Cursor<'a, T> {
    pub(crate) fn new(list: &'a List<T>, current: NonNull<Node<T>>) -> Self {
        Self { current, list }
    }
}

impl<'a, T: 'a> CursorMut<'a, T> {
    pub(crate) fn new(list: &'a mut List<T>, current: NonNull<Node<T>>) -> Self {
        Self { current, list }
    }
}

// Methods that might change the linking structure of the list.
impl<'a, T: 'a> CursorMut<'a, T> {
    /// Add an element before the cursor position. The cursor stays put.
    ///
    /// The list is untouched if the node cannot be allocated.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// let mut cursor = list.cursor_start_mut();
    /// assert!(cursor.move_next().is_ok());
    ///
    /// cursor.try_insert(4).unwrap(); // becomes [1, 4, 2, 3]
    /// assert_eq!(cursor.current(), Some(&2));
    ///
    /// cursor.move_to_end();
    /// cursor.try_insert(5).unwrap(); // becomes [1, 4, 2, 3, 5]
    /// assert_eq!(cursor.previous(), Some(&5));
    ///
    /// assert_eq!(Vec::from_iter(list), vec![1, 4, 2, 3, 5]);
    /// ```
    pub fn try_insert(&mut self, item: T) -> Result<(), AllocError> {
        let node = Node::try_new_detached(item)?;
        // SAFETY: `self.current.prev` and `self.current` are adjacent nodes of the list.
        unsafe { self.list.attach_node(self.prev_node(), self.current, node) };
        Ok(())
    }

    /// Add an element after the cursor position. The cursor stays put.
    ///
    /// If the cursor is at the ghost node, the element becomes the first one.
    pub fn try_insert_after(&mut self, item: T) -> Result<(), AllocError> {
        let node = Node::try_new_detached(item)?;
        // SAFETY: `self.current` and `self.current.next` are adjacent nodes of the list.
        unsafe { self.list.attach_node(self.current, self.next_node(), node) };
        Ok(())
    }

    /// Unlink the element at the cursor and return it, or return `None`
    /// if the cursor is at the ghost node. After removal, the cursor
    /// is moved to the next node.
    ///
    /// This operation should compute in *O*(*1*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter(0..5);
    /// let mut cursor = list.cursor_start_mut();
    /// assert!(cursor.move_next().is_ok());
    ///
    /// assert_eq!(cursor.remove(), Some(1)); // becomes [0, 2, 3, 4]
    /// assert_eq!(cursor.current(), Some(&2));
    ///
    /// cursor.move_to_end();
    /// assert_eq!(cursor.remove(), None);
    ///
    /// assert_eq!(Vec::from_iter(list), vec![0, 2, 3, 4]);
    /// ```
    pub fn remove(&mut self) -> Option<T> {
        if self.is_ghost_node() {
            return None;
        }
        let next = self.next_node();
        // SAFETY: `self.current` is a valid non-ghost node in the list, so it is safe.
        let node = unsafe { self.list.detach_node(self.current) };
        self.current = next;
        Some(Node::into_element(node))
    }

    /// Unlink the element before the cursor and return it, or return `None` if
    /// the cursor is at the first node. The cursor is not moved.
    pub fn backspace(&mut self) -> Option<T> {
        if self.is_front_node() {
            return None;
        }
        // SAFETY: the previous node of a non-first node is a non-ghost node in the list.
        let node = unsafe { self.list.detach_node(self.prev_node()) };
        Some(Node::into_element(node))
    }

    /// Exchange the node at the cursor with the node after it, by relinking
    /// only. The cursor follows its element, so it ends up one position
    /// further. Returns `false` if there is no such pair.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// let mut cursor = list.cursor_start_mut();
    ///
    /// assert!(cursor.swap_next()); // becomes [2, 1, 3]
    /// assert_eq!(cursor.current(), Some(&1));
    /// assert!(cursor.swap_next()); // becomes [2, 3, 1]
    /// assert!(!cursor.swap_next());
    ///
    /// assert_eq!(Vec::from_iter(list), vec![2, 3, 1]);
    /// ```
    pub fn swap_next(&mut self) -> bool {
        let next = self.next_node();
        if self.is_ghost_node() || next == self.list.ghost_node() {
            return false;
        }
        // SAFETY: both nodes are adjacent non-ghost nodes of the list.
        unsafe { move_node(next, self.current) };
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::List;
    use std::iter::FromIterator;

    #[test]
    fn cursor_insert_after_and_backspace() {
        let mut list = List::from_iter([1, 3]);
        let mut cursor = list.cursor_start_mut();
        cursor.try_insert_after(2).unwrap();
        assert_eq!(cursor.peek_next(), Some(&2));
        cursor.move_to_end();
        cursor.try_insert_after(0).unwrap();
        assert_eq!(cursor.backspace(), Some(3));
        cursor.move_to_start();
        assert_eq!(cursor.backspace(), None);
        list.assert_well_formed();
        assert_eq!(Vec::from_iter(list), vec![0, 1, 2]);
    }

    #[test]
    fn cursor_swap_single() {
        let mut list = List::from_iter([7]);
        assert!(!list.cursor_start_mut().swap_next());
        assert!(!list.cursor_end_mut().swap_next());
        list.assert_well_formed();
    }
}
