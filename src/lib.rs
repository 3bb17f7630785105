//! This crate provides a double-ended byte-string queue built on a
//! doubly-linked list with owned nodes, implemented as a cyclic list,
//! together with the in-place algorithms that rearrange such a list by
//! link surgery alone.
//!
//! Two layers are exposed:
//!
//! - [`List`], the generic cyclic list. It allows inserting and removing
//!   elements at both ends in constant time, and carries the structural
//!   algorithms: [`remove_middle`], [`purge_duplicates`], [`swap_pairs`],
//!   [`reverse`], the stable [`sort`] family and a uniform [`shuffle`].
//!   Each of them relinks the existing nodes in place, allocating nothing
//!   and copying no element.
//! - [`Queue`], a byte-string container over the list. Insertion copies
//!   the caller's bytes into exactly-sized owned storage; removal unlinks
//!   an element, hands its ownership to the caller and, on request,
//!   copies the payload into a caller buffer with a NUL terminator.
//!
//! Here is a quick example showing how the queue works.
//!
//! ```
//! use cyclic_queue::Queue;
//!
//! let mut queue = Queue::new();
//! queue.insert_head("bravo")?;
//! queue.insert_head("alpha")?;
//! queue.insert_tail("charlie")?;
//! assert_eq!(queue.size(), 3);
//!
//! let mut buf = [0u8; 8];
//! let element = queue.remove_head(Some(&mut buf))?;
//! assert_eq!(&buf[..6], b"alpha\0");
//! assert_eq!(element.value(), b"alpha");
//! assert_eq!(queue.size(), 2);
//! # Ok::<(), cyclic_queue::Error>(())
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of the list is like the following graph:
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
//! ╚═══════════╝
//!     List
//! ```
//! The `List` owns the ghost node:
//! - `ghost.next` points to the first element, or to the ghost node itself
//!   if the list is empty;
//! - `ghost.prev` points to the last element, or to the ghost node itself
//!   if the list is empty.
//!
//! Each node of the list `List<T>` is allocated on heap, which contains:
//! - the `next` pointer that points to the next element (or the ghost node
//!   if it is the last element in the list);
//! - the `prev` pointer that points to the previous element (or the ghost
//!   node if it is the first element in the list);
//! - the actual payload `T` that depends on the element type of the list,
//!   except the ghost node.
//!
//! Note that the ghost node has *NO* payload to save memory.
//!
//! In a well-formed list, every node's successor's predecessor is the node
//! itself, and symmetrically in the other direction; every operation of
//! this crate keeps it that way, for every length. The length is not
//! cached anywhere: [`List::len`] and [`Queue::size`] count by traversal.
//!
//! # Iteration
//!
//! Iterating over a list is by the [`Iter`] and [`IterMut`] iterators.
//! These are double-ended iterators and iterate the list like an array
//! (fused and non-cyclic). [`IterMut`] provides mutability of the
//! elements (but not the linked structure of the list).
//!
//! ## Examples
//!
//! ```
//! use cyclic_queue::List;
//! use std::iter::FromIterator;
//!
//! let mut list = List::from_iter([1, 2, 3]);
//! let mut iter = list.iter();
//! assert_eq!(iter.next(), Some(&1));
//! assert_eq!(iter.next(), Some(&2));
//! assert_eq!(iter.next(), Some(&3));
//! assert_eq!(iter.next(), None);
//! assert_eq!(iter.next(), None); // Fused and non-cyclic
//!
//! list.iter_mut().for_each(|item| *item *= 2);
//! assert_eq!(Vec::from_iter(list), vec![2, 4, 6]);
//! ```
//!
//! # Algorithms
//!
//! Every structural algorithm consumes and returns the same list, in
//! place; none of them builds a second list, and all of them are safe
//! no-ops on empty and singleton lists. The sort is an iterative
//! bottom-up merge sort, and the shuffle is a Fisher–Yates over link
//! relocation driven by a caller-supplied random generator.
//!
//! ## Examples
//!
//! ```
//! use cyclic_queue::List;
//! use std::iter::FromIterator;
//!
//! let mut list = List::from_iter(["d", "b", "a", "c", "b"]);
//!
//! list.sort(); // ["a", "b", "b", "c", "d"]
//! list.purge_duplicates(); // values occurring more than once are removed
//! assert_eq!(Vec::from_iter(&list), vec![&"a", &"c", &"d"]);
//!
//! list.reverse();
//! assert_eq!(Vec::from_iter(list), vec!["d", "c", "a"]);
//! ```
//!
//! [`List`]: crate::List
//! [`Queue`]: crate::Queue
//! [`Iter`]: crate::Iter
//! [`IterMut`]: crate::IterMut
//! [`remove_middle`]: crate::List::remove_middle
//! [`purge_duplicates`]: crate::List::purge_duplicates
//! [`swap_pairs`]: crate::List::swap_pairs
//! [`reverse`]: crate::List::reverse
//! [`sort`]: crate::List::sort
//! [`shuffle`]: crate::List::shuffle

#[doc(inline)]
pub use list::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use list::List;
#[doc(inline)]
pub use queue::{Element, Error, Queue};

pub mod list;
pub mod queue;
