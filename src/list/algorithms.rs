use crate::list::{connect, List, Node};
use rand::Rng;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::ptr::NonNull;

mod sort;

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other)
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: PartialOrd> PartialOrd for List<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T: Ord> Ord for List<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: Hash> Hash for List<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut len = 0_usize;
        for elt in self {
            elt.hash(state);
            len += 1;
        }
        len.hash(state);
    }
}

impl<T> List<T> {
    /// Removes the middle node and returns its element, or `None` if the
    /// list is empty.
    ///
    /// The middle node of a list with length *n* is the node at 0-based
    /// index ⌊*n* / 2⌋. It is located by a two-speed traversal: two
    /// references start at the front node, one advancing one link and the
    /// other two links per step, until the fast one reaches the ghost node
    /// or its successor is the ghost node; the slow one then sits on the
    /// middle node.
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
    /// let mut list = List::from_iter(["a", "b", "c", "d", "e", "f"]);
    /// assert_eq!(list.remove_middle(), Some("d"));
    /// assert_eq!(Vec::from_iter(list), vec!["a", "b", "c", "e", "f"]);
    /// ```
    pub fn remove_middle(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let ghost = self.ghost_node();
        let mut slow = self.front_node();
        let mut fast = self.front_node();
        // SAFETY: both traversals follow successor links of a well-formed
        // ring, so every node read is valid; `slow` stops on a non-ghost
        // node belonging to this list.
        unsafe {
            while fast != ghost && fast.as_ref().next != ghost {
                slow = slow.as_ref().next;
                fast = fast.as_ref().next.as_ref().next;
            }
            Some(self.detach_node(slow).into_element())
        }
    }

    /// Removes every element whose value occurs more than once, assuming
    /// the list is sorted ascending.
    ///
    /// A single forward pass compares each node with its successor and
    /// deletes a node when it equals its successor, or when it equaled its
    /// predecessor in the previous comparison. Values occurring more than
    /// once are removed *entirely*; only values occurring exactly once
    /// survive. For `["a", "a", "b"]` the result is `["b"]`, not
    /// `["a", "b"]`.
    ///
    /// The list must already be sorted ascending; this is the caller's
    /// responsibility and is not verified. On an unsorted list only
    /// adjacent equal runs are detected.
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
    /// let mut list = List::from_iter(["a", "a", "b", "c", "c"]);
    /// list.purge_duplicates();
    /// assert_eq!(Vec::from_iter(list), vec!["b"]);
    /// ```
    pub fn purge_duplicates(&mut self)
    where
        T: PartialEq,
    {
        if self.is_empty() || self.is_singular() {
            return;
        }
        let ghost = self.ghost_node();
        let mut node = self.front_node();
        let mut found_dup = false;
        // SAFETY: `node` walks the non-ghost nodes of the ring; `next` is
        // captured before `node` is detached, so the walk never reads a
        // freed node.
        unsafe {
            while node != ghost {
                let next = node.as_ref().next;
                let dup = next != ghost && node.as_ref().element == next.as_ref().element;
                if dup || found_dup {
                    drop(self.detach_node(node));
                    found_dup = dup;
                }
                node = next;
            }
        }
    }

    /// Swaps every two adjacent elements by relinking the pair, so that
    /// `[1, 2, 3, 4, 5]` becomes `[2, 1, 4, 3, 5]`.
    ///
    /// Only link fields move; no element is copied or allocated. If the
    /// length is odd, the final unpaired element stays where it is.
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
    /// let mut list = List::from_iter([1, 2, 3, 4, 5]);
    /// list.swap_pairs();
    /// assert_eq!(Vec::from_iter(list), vec![2, 1, 4, 3, 5]);
    /// ```
    pub fn swap_pairs(&mut self) {
        if self.is_empty() || self.is_singular() {
            return;
        }
        let ghost = self.ghost_node();
        let mut node = self.front_node();
        // SAFETY: `node` and its successor belong to this list whenever
        // they are relinked, and the walk re-reads successor links after
        // each relink.
        unsafe {
            loop {
                let next = node.as_ref().next;
                if next == ghost {
                    break;
                }
                // Move the successor in front of `node`; the pair is now
                // swapped and `node.next` starts the next pair.
                move_node(next, node);
                node = node.as_ref().next;
                if node == ghost {
                    break;
                }
            }
        }
    }

    /// Reverses the order of the elements, in place.
    ///
    /// Every node in the ring, the ghost node included, has its successor
    /// and predecessor links exchanged; nothing is allocated, freed or
    /// copied. Reversing twice restores the original order exactly.
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
    /// let mut list = List::from_iter([1, 2, 3]);
    /// list.reverse();
    /// assert_eq!(Vec::from_iter(list), vec![3, 2, 1]);
    /// ```
    pub fn reverse(&mut self) {
        if self.is_empty() || self.is_singular() {
            return;
        }
        let ghost = self.ghost_node();
        let mut node = ghost;
        // SAFETY: the walk visits each node of the ring exactly once,
        // following the successor link captured by the exchange.
        unsafe {
            loop {
                let current = &mut *node.as_ptr();
                std::mem::swap(&mut current.next, &mut current.prev);
                // the old successor now sits in `prev`
                node = current.prev;
                if node == ghost {
                    break;
                }
            }
        }
    }

    /// Rearranges the elements into a uniformly random permutation, using
    /// only link relocation.
    ///
    /// This is a Fisher–Yates shuffle over the ring: with `remaining`
    /// counting down from *n*, a uniform index in `[0, remaining)` is
    /// drawn, the node at that distance from the current tail is located
    /// by walking predecessor links, and it is relinked in front of the
    /// not-yet-fixed region. No node is allocated or freed, and no element
    /// is copied.
    ///
    /// The generator is passed in rather than created here; seed one
    /// generator per process and reuse it across calls.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*²) time and *O*(1) memory:
    /// the list has no random access, so locating each drawn node is a
    /// link walk.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use rand::SeedableRng;
    /// use rand_xoshiro::Xoshiro256StarStar;
    /// use std::iter::FromIterator;
    ///
    /// let mut rng = Xoshiro256StarStar::seed_from_u64(7);
    /// let mut list = List::from_iter(0..8);
    /// list.shuffle(&mut rng);
    ///
    /// let mut contents = Vec::from_iter(list);
    /// contents.sort();
    /// assert_eq!(contents, Vec::from_iter(0..8));
    /// ```
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.is_empty() || self.is_singular() {
            return;
        }
        let ghost = self.ghost_node();
        let mut pivot = self.front_node();
        let mut remaining = self.len();
        // Nodes before `pivot` are fixed; `pivot..=tail` is the
        // not-yet-fixed region, holding `remaining` nodes. Each round
        // fixes one uniformly drawn node of the region, so the final
        // permutation is uniform. The last remaining node needs no draw.
        while remaining > 1 {
            let index = rng.random_range(0..remaining);
            // SAFETY: `index < remaining`, so the predecessor walk from
            // the tail stays inside the not-yet-fixed region and `drawn`
            // is a non-ghost node of this list.
            unsafe {
                let mut drawn = ghost.as_ref().prev;
                for _ in 0..index {
                    drawn = drawn.as_ref().prev;
                }
                if drawn == pivot {
                    pivot = pivot.as_ref().next;
                } else {
                    move_node(drawn, pivot);
                }
            }
            remaining -= 1;
        }
    }

    /// Sorts the list.
    ///
    /// This sort is stable (i.e., does not reorder equal elements).
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* * log(*n*)) time and *O*(1) memory.
    ///
    /// # Current Implementation
    ///
    /// The current algorithm is an iterative bottom-up merge sort. The
    /// ring is temporarily opened into a successor-linked chain while the
    /// pending runs are threaded through the predecessor links, so there
    /// is no extra temporary storage during merging.
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
        sort::merge_sort(self, |a, b| a.lt(b));
    }

    /// Sorts the list with a comparator function.
    ///
    /// This sort is stable (i.e., does not reorder equal elements).
    ///
    /// The comparator function must define a total ordering for the
    /// elements in the list. If the ordering is not total, the order
    /// of the elements is unspecified. An order is a total order if
    /// it is (for all `a`, `b` and `c`):
    /// - total and antisymmetric: exactly one of `a < b`, `a == b`
    ///   or `a > b` is true, and
    /// - transitive, `a < b` and `b < c` implies `a < c`. The same
    ///   must hold for both `==` and `>`.
    ///
    /// For example, while [`f64`] doesn't implement [`Ord`] because
    /// `NaN != NaN`, we can use `partial_cmp` as our sort function
    /// when we know the list doesn't contain a `NaN`.
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    /// let mut floats = List::from_iter([5f64, 4.0, 1.0, 3.0, 2.0]);
    /// floats.sort_by(|a, b| a.partial_cmp(b).unwrap());
    /// assert_eq!(Vec::from_iter(floats), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    /// ```
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* * log(*n*)) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    /// let mut v = List::from_iter([5, 4, 1, 3, 2]);
    /// v.sort_by(|a, b| a.cmp(b));
    /// assert_eq!(Vec::from_iter(&v), vec![&1, &2, &3, &4, &5]);
    ///
    /// // reverse sorting
    /// v.sort_by(|a, b| b.cmp(a));
    /// assert_eq!(Vec::from_iter(v), vec![5, 4, 3, 2, 1]);
    /// ```
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        sort::merge_sort(self, |a, b| compare(a, b) == Ordering::Less)
    }

    /// Sorts the list with a key extraction function.
    ///
    /// This sort is stable (i.e., does not reorder equal elements)
    /// and *O*(*m* \* *n* \* log(*n*)) worst-case, where the
    /// key function is *O*(*m*).
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    /// let mut v = List::from_iter([-5i32, 4, 1, -3, 2]);
    ///
    /// v.sort_by_key(|k| k.abs());
    /// assert_eq!(Vec::from_iter(v), vec![1, 2, -3, 4, -5]);
    /// ```
    pub fn sort_by_key<K, F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> K,
        K: Ord,
    {
        sort::merge_sort(self, |a, b| f(a).lt(&f(b)));
    }
}

/// Detach `node` from its position and re-attach it immediately before
/// `to`, preserving the order of every other node.
///
/// It is unsafe because it does not check whether `node` and `to` belong
/// to the same list.
unsafe fn move_node<T>(node: NonNull<Node<T>>, to: NonNull<Node<T>>) {
    connect(node.as_ref().prev, node.as_ref().next);
    connect(to.as_ref().prev, node);
    connect(node, to);
}
