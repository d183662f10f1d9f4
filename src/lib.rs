//! This crate provides a queue of owned strings, built on a doubly-linked list
//! with owned nodes, implemented as a cyclic list.
//!
//! The [`Queue`] inserts and removes elements at both ends in constant time.
//! Its other operations (sorting, k-group reversal, duplicate and dominated
//! element deletion, merging of sorted queues) reorder the elements by
//! relinking the nodes of the list, never by moving or copying the elements.
//!
//! Here is a quick example showing how the queue works.
//!
//! ```
//! use cyclic_queue::Queue;
//!
//! let mut queue = Queue::try_from_strs(["b", "a", "c", "a"]).unwrap();
//! queue.insert_head("d").unwrap();
//! assert_eq!(queue.to_string(), "[d b a c a]");
//!
//! queue.sort(false); // [a a b c d]
//! assert_eq!(queue.delete_dup(), 2);
//! assert_eq!(queue.to_string(), "[b c d]");
//!
//! queue.reverse();
//! let mut buf = [0_u8; 16];
//! assert_eq!(queue.remove_head(Some(&mut buf[..])).unwrap().value(), "d");
//! assert_eq!(&buf[..2], b"d\0");
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of the underlying list is like the following graph:
//! ```text
//!          ┌─────────────────────────────────────────────────────────────────────┐
//!          ↓                                                     (Ghost) Node N  │
//!    ╔═══════════╗           ╔═══════════╗                        ┌───────────┐  │
//!    ║   next    ║ ────────→ ║   next    ║ ────────→ ┄┄ ────────→ │   next    │ ─┘
//!    ╟───────────╢           ╟───────────╢     Node 2, 3, ...     ├───────────┤
//! ┌─ ║   prev    ║ ←──────── ║   prev    ║ ←──────── ┄┄ ←──────── │   prev    │
//! │  ╟───────────╢           ╟───────────╢                        ├───────────┤
//! │  ║ payload T ║           ║ payload T ║                        ┊No payload ┊
//! │  ╚═══════════╝           ╚═══════════╝                        └╌╌╌╌╌╌╌╌╌╌╌┘
//! │      Node 0                  Node 1                               ↑   ↑
//! └───────────────────────────────────────────────────────────────────┘   │
//! ╔═══════════╗                                                           │
//! ║   ghost   ║ ──────────────────────────────────────────────────────────┘
//! ╟───────────╢
//! ║   (len)   ║
//! ╚═══════════╝
//!     List
//! ```
//! The `List` contains:
//! - a pointer `ghost` that points to the ghost node;
//! - a length field `len` indicating the length of the list. It can be disabled by
//!   disabling the `length` feature in your `Cargo.toml`, in which case the
//!   length is counted on demand:
//! ```text
//! [dependencies]
//! cyclic_queue = { default-features = false }
//! ```
//!
//! Each node of the list `List<T>` is allocated on heap, which contains:
//! - the `next` pointer that points to the next element (or the ghost node if it
//!   is the last element in the list);
//! - the `prev` pointer that points to the previous element (or the ghost node if
//!   it is the first element in the list);
//! - the actual payload `T`, except in the ghost node.
//!
//! Initially, there is a ghost node in an empty list, of which the `next` and `prev`
//! pointer point to itself. As elements are inserted into the list, `ghost.next`
//! points to the first element, and `ghost.prev` points to the last one.
//!
//! A [`Queue`] is a `List<Element>`, where each [`Element`] owns a copy of
//! the text it was inserted with.
//!
//! # Iteration
//!
//! Iterating over a list is by the [`Iter`] and [`IterMut`] iterators. These are
//! double-ended iterators and iterate the list like an array (fused and non-cyclic).
//!
//! ```
//! use cyclic_queue::List;
//! use std::iter::FromIterator;
//!
//! let mut list = List::from_iter([1, 2, 3]);
//! let mut iter = list.iter();
//! assert_eq!(iter.next(), Some(&1));
//! assert_eq!(iter.next_back(), Some(&3));
//! assert_eq!(iter.next(), Some(&2));
//! assert_eq!(iter.next(), None);
//!
//! list.iter_mut().for_each(|item| *item *= 2);
//! assert_eq!(Vec::from_iter(list), vec![2, 4, 6]);
//! ```
//!
//! # Cursors
//!
//! The cursors [`Cursor`] and [`CursorMut`] walk over a list in both
//! directions. In a list with length *n*, there are *n* + 1 valid locations
//! for a cursor, the last one being the ghost node. [`CursorMut`] also inserts
//! and removes elements at its position.
//!
//! ```
//! use cyclic_queue::List;
//! use std::iter::FromIterator;
//!
//! let mut list = List::from_iter([1, 2, 3, 4]);
//! let mut cursor = list.cursor_start_mut();
//!
//! cursor.try_insert(5).unwrap(); // becomes [5, 1, 2, 3, 4], points to 1
//! assert_eq!(cursor.current(), Some(&1));
//!
//! cursor.move_next().unwrap();
//! assert_eq!(cursor.remove(), Some(2)); // becomes [5, 1, 3, 4], points to 3
//! assert_eq!(cursor.backspace(), Some(1)); // becomes [5, 3, 4], points to 3
//!
//! assert_eq!(Vec::from_iter(list), vec![5, 3, 4]);
//! ```
//!
//! [`Cursor`]: crate::list::cursor::Cursor
//! [`CursorMut`]: crate::list::cursor::CursorMut

#[doc(inline)]
pub use list::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use list::List;

pub use element::Element;
pub use error::{AllocError, QueueError};
pub use queue::{merge, Queue};

pub mod list;

mod element;
mod error;
mod queue;
