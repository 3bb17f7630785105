//! A double-ended byte-string queue over the cyclic list.
//!
//! [`Queue`] owns the payload-copy boundary: insertion copies the
//! caller-supplied bytes into exactly-sized owned storage, and removal
//! unlinks the element, hands its ownership to the caller as an
//! [`Element`], and optionally copies the payload into a caller buffer
//! with a NUL terminator.

use std::collections::TryReserveError;
use std::fmt::{self, Debug, Formatter};

use rand::Rng;
use thiserror::Error;

use crate::List;

/// Errors reported by the fallible [`Queue`] operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The queue holds no elements.
    #[error("queue is empty")]
    Empty,
    /// Storage for a payload copy could not be allocated.
    #[error("failed to allocate payload storage")]
    Alloc(#[from] TryReserveError),
}

/// A double-ended queue of byte strings, stored as a cyclic
/// doubly-linked list.
///
/// Insertion copies the caller-supplied bytes into freshly allocated
/// storage sized to fit exactly; removal unlinks the element and
/// transfers its ownership to the caller as an [`Element`]. The
/// structural algorithms of [`List`] are exposed on the queue directly,
/// with elements compared byte-lexicographically. Dropping the queue
/// releases every element still linked into it.
///
/// # Examples
///
/// ```
/// use cyclic_queue::Queue;
///
/// let mut queue = Queue::new();
/// queue.insert_tail("hello")?;
/// queue.insert_tail("world")?;
///
/// queue.reverse();
///
/// let element = queue.remove_head(None)?;
/// assert_eq!(element.value(), b"world");
/// assert_eq!(queue.size(), 1);
/// # Ok::<(), cyclic_queue::Error>(())
/// ```
pub struct Queue {
    list: List<Box<[u8]>>,
}

/// An element unlinked from a [`Queue`].
///
/// [`remove_head`] and [`remove_tail`] only unlink: the element and its
/// payload stay allocated, owned by the returned handle, and are
/// released when it is dropped. Use [`into_value`] to keep the payload
/// alive instead.
///
/// [`remove_head`]: Queue::remove_head
/// [`remove_tail`]: Queue::remove_tail
/// [`into_value`]: Element::into_value
#[derive(PartialEq, Eq)]
pub struct Element {
    value: Box<[u8]>,
}

impl Queue {
    /// Creates an empty `Queue`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let queue = Queue::new();
    /// assert!(queue.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self { list: List::new() }
    }

    /// Returns `true` if the queue holds no elements.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns the number of elements, counted by traversal.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// queue.insert_head("a")?;
    /// queue.insert_head("b")?;
    /// assert_eq!(queue.size(), 2);
    /// # Ok::<(), cyclic_queue::Error>(())
    /// ```
    #[inline]
    pub fn size(&self) -> usize {
        self.list.len()
    }

    /// Copies `value` into a new element and links it as the new first
    /// element.
    ///
    /// The payload storage is allocated, exactly sized, before any link
    /// is touched, so a failed insert leaves the queue unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Alloc`] if the payload storage cannot be
    /// allocated.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// queue.insert_head("world")?;
    /// queue.insert_head("hello")?;
    /// assert_eq!(queue.remove_head(None)?.value(), b"hello");
    /// # Ok::<(), cyclic_queue::Error>(())
    /// ```
    pub fn insert_head(&mut self, value: impl AsRef<[u8]>) -> Result<(), Error> {
        let payload = copy_payload(value.as_ref())?;
        self.list.push_front(payload);
        Ok(())
    }

    /// Copies `value` into a new element and links it as the new last
    /// element.
    ///
    /// See [`insert_head`](Queue::insert_head); only the end differs.
    pub fn insert_tail(&mut self, value: impl AsRef<[u8]>) -> Result<(), Error> {
        let payload = copy_payload(value.as_ref())?;
        self.list.push_back(payload);
        Ok(())
    }

    /// Unlinks the first element and returns it, copying its payload
    /// into `out` when a buffer is provided.
    ///
    /// At most `out.len() - 1` payload bytes are copied, followed by one
    /// NUL terminator; an empty buffer receives nothing. The element
    /// itself is handed to the caller, who owns it from here on —
    /// dropping it releases the payload storage.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the queue holds no elements.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// queue.insert_tail("hello")?;
    ///
    /// let mut buf = [0u8; 16];
    /// let element = queue.remove_head(Some(&mut buf))?;
    /// assert_eq!(&buf[..6], b"hello\0");
    /// assert_eq!(element.value(), b"hello");
    /// assert_eq!(queue.size(), 0);
    /// # Ok::<(), cyclic_queue::Error>(())
    /// ```
    pub fn remove_head(&mut self, out: Option<&mut [u8]>) -> Result<Element, Error> {
        let value = self.list.pop_front().ok_or(Error::Empty)?;
        let element = Element { value };
        if let Some(out) = out {
            element.copy_to(out);
        }
        Ok(element)
    }

    /// Unlinks the last element and returns it, copying its payload into
    /// `out` when a buffer is provided.
    ///
    /// See [`remove_head`](Queue::remove_head); only the end differs.
    pub fn remove_tail(&mut self, out: Option<&mut [u8]>) -> Result<Element, Error> {
        let value = self.list.pop_back().ok_or(Error::Empty)?;
        let element = Element { value };
        if let Some(out) = out {
            element.copy_to(out);
        }
        Ok(element)
    }

    /// Deletes the element at 0-based index ⌊*n* / 2⌋, releasing its
    /// storage, and returns `true`; returns `false` if the queue is
    /// empty.
    ///
    /// See [`List::remove_middle`] for how the middle is located.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// for value in ["a", "b", "c", "d", "e", "f"].iter() {
    ///     queue.insert_tail(value)?;
    /// }
    /// assert!(queue.delete_mid()); // deletes "d"
    /// assert_eq!(queue.size(), 5);
    /// # Ok::<(), cyclic_queue::Error>(())
    /// ```
    pub fn delete_mid(&mut self) -> bool {
        self.list.remove_middle().is_some()
    }

    /// Deletes every element whose value occurs more than once, assuming
    /// the queue is sorted ascending (call [`sort`](Queue::sort) first).
    ///
    /// Only values occurring exactly once survive; see
    /// [`List::purge_duplicates`] for the exact contract.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// for value in ["a", "a", "b", "c", "c"].iter() {
    ///     queue.insert_tail(value)?;
    /// }
    /// queue.delete_duplicates();
    /// assert_eq!(queue.size(), 1);
    /// assert_eq!(queue.remove_head(None)?.value(), b"b");
    /// # Ok::<(), cyclic_queue::Error>(())
    /// ```
    pub fn delete_duplicates(&mut self) {
        self.list.purge_duplicates();
    }

    /// Swaps every two adjacent elements; a trailing unpaired element
    /// stays where it is. See [`List::swap_pairs`].
    pub fn swap_pairs(&mut self) {
        self.list.swap_pairs();
    }

    /// Reverses the order of the elements, in place. See
    /// [`List::reverse`].
    pub fn reverse(&mut self) {
        self.list.reverse();
    }

    /// Sorts the elements ascending, comparing payloads
    /// byte-lexicographically. The sort is stable; see [`List::sort`].
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// for value in ["pear", "apple", "fig"].iter() {
    ///     queue.insert_tail(value)?;
    /// }
    /// queue.sort();
    /// assert_eq!(queue.remove_head(None)?.value(), b"apple");
    /// # Ok::<(), cyclic_queue::Error>(())
    /// ```
    pub fn sort(&mut self) {
        self.list.sort();
    }

    /// Rearranges the elements into a uniformly random permutation. See
    /// [`List::shuffle`].
    ///
    /// The generator is passed in rather than created here; seed one
    /// generator per process and reuse it across calls.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.list.shuffle(rng);
    }

    /// Iterates over the stored byte strings, front to back.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// queue.insert_tail("a")?;
    /// queue.insert_tail("b")?;
    ///
    /// let mut iter = queue.iter();
    /// assert_eq!(iter.next(), Some(&b"a"[..]));
    /// assert_eq!(iter.next(), Some(&b"b"[..]));
    /// assert_eq!(iter.next(), None);
    /// # Ok::<(), cyclic_queue::Error>(())
    /// ```
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.list.iter().map(|value| &**value)
    }
}

impl Default for Queue {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Queue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Element {
    /// The stored payload bytes.
    #[inline]
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Consumes the element, returning the payload without copying it.
    #[inline]
    pub fn into_value(self) -> Box<[u8]> {
        self.value
    }

    /// Copies at most `out.len() - 1` payload bytes into `out`, plus one
    /// NUL terminator. An empty buffer receives nothing.
    fn copy_to(&self, out: &mut [u8]) {
        if out.is_empty() {
            return;
        }
        let len = self.value.len().min(out.len() - 1);
        out[..len].copy_from_slice(&self.value[..len]);
        out[len] = 0;
    }
}

impl Debug for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Element").field(&self.value).finish()
    }
}

/// Copies `value` into freshly allocated storage sized to fit exactly.
///
/// The allocation goes through the fallible reservation path, so
/// exhaustion reports an error instead of aborting.
fn copy_payload(value: &[u8]) -> Result<Box<[u8]>, TryReserveError> {
    let mut payload = Vec::new();
    payload.try_reserve_exact(value.len())?;
    payload.extend_from_slice(value);
    Ok(payload.into_boxed_slice())
}

#[cfg(test)]
mod tests {
    use super::{Error, Queue};
    use crate::list::assert_ring_valid;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    fn queue_of(values: &[&str]) -> Queue {
        let mut queue = Queue::new();
        for value in values {
            queue.insert_tail(value).unwrap();
        }
        queue
    }

    fn contents(queue: &Queue) -> Vec<String> {
        queue
            .iter()
            .map(|value| String::from_utf8(value.to_vec()).unwrap())
            .collect()
    }

    #[test]
    fn round_trip() {
        let mut queue = Queue::new();
        queue.insert_tail("hello").unwrap();
        let mut buf = [0_u8; 16];
        let element = queue.remove_head(Some(&mut buf)).unwrap();
        assert_eq!(&buf[..6], b"hello\0");
        assert_eq!(element.value(), b"hello");
        assert_eq!(queue.size(), 0);
    }

    #[test]
    fn insert_and_remove_at_both_ends() {
        let mut queue = Queue::new();
        queue.insert_head("b").unwrap();
        queue.insert_head("a").unwrap();
        queue.insert_tail("c").unwrap();
        assert_ring_valid(&queue.list);
        assert_eq!(contents(&queue), ["a", "b", "c"]);

        assert_eq!(queue.remove_tail(None).unwrap().value(), b"c");
        assert_eq!(queue.remove_head(None).unwrap().value(), b"a");
        assert_eq!(queue.remove_head(None).unwrap().value(), b"b");
        assert!(matches!(queue.remove_head(None), Err(Error::Empty)));
    }

    #[test]
    fn remove_from_empty() {
        let mut queue = Queue::new();
        assert!(matches!(queue.remove_head(None), Err(Error::Empty)));
        assert!(matches!(queue.remove_tail(None), Err(Error::Empty)));
    }

    #[test]
    fn copy_out_truncates_to_capacity() {
        let mut queue = queue_of(&["hello"]);
        let mut buf = [0xff_u8; 4];
        let element = queue.remove_head(Some(&mut buf)).unwrap();
        assert_eq!(&buf, b"hel\0");
        // the element still owns the whole payload
        assert_eq!(element.value(), b"hello");
    }

    #[test]
    fn copy_out_stops_at_short_payload() {
        let mut queue = queue_of(&["hi"]);
        let mut buf = [0xff_u8; 8];
        queue.remove_head(Some(&mut buf)).unwrap();
        assert_eq!(&buf[..3], b"hi\0");
        assert_eq!(&buf[3..], [0xff_u8; 5]);
    }

    #[test]
    fn copy_out_empty_buffer() {
        let mut queue = queue_of(&["hello"]);
        let mut buf: [u8; 0] = [];
        let element = queue.remove_head(Some(&mut buf)).unwrap();
        assert_eq!(element.value(), b"hello");
    }

    #[test]
    fn size_counts_by_traversal() {
        let mut queue = Queue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.size(), 0);
        for n in 1..=5 {
            queue.insert_tail("x").unwrap();
            assert_eq!(queue.size(), n);
        }
        queue.remove_tail(None).unwrap();
        assert_eq!(queue.size(), 4);
    }

    #[test]
    fn delete_mid_deletes_floor_half() {
        let mut queue = queue_of(&["a", "b", "c", "d", "e", "f"]);
        assert!(queue.delete_mid());
        assert_ring_valid(&queue.list);
        assert_eq!(contents(&queue), ["a", "b", "c", "e", "f"]);
        assert_eq!(queue.size(), 5);
    }

    #[test]
    fn delete_mid_of_empty() {
        let mut queue = Queue::new();
        assert!(!queue.delete_mid());
    }

    #[test]
    fn delete_duplicates_removes_repeated_values_entirely() {
        let mut queue = queue_of(&["a", "a", "b", "c", "c"]);
        queue.delete_duplicates();
        assert_ring_valid(&queue.list);
        assert_eq!(contents(&queue), ["b"]);
    }

    #[test]
    fn swap_pairs_and_reverse() {
        let mut queue = queue_of(&["1", "2", "3", "4", "5"]);
        queue.swap_pairs();
        assert_eq!(contents(&queue), ["2", "1", "4", "3", "5"]);
        queue.reverse();
        assert_ring_valid(&queue.list);
        assert_eq!(contents(&queue), ["5", "3", "4", "1", "2"]);
    }

    #[test]
    fn sort_is_byte_lexicographic() {
        let mut queue = queue_of(&["pear", "apple", "fig", "apple", "banana"]);
        queue.sort();
        assert_ring_valid(&queue.list);
        assert_eq!(contents(&queue), ["apple", "apple", "banana", "fig", "pear"]);
    }

    #[test]
    fn shuffle_preserves_contents() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(11);
        let mut queue = queue_of(&["a", "b", "c", "d", "e"]);
        queue.shuffle(&mut rng);
        assert_ring_valid(&queue.list);
        let mut shuffled = contents(&queue);
        shuffled.sort();
        assert_eq!(shuffled, ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn element_into_value() {
        let mut queue = queue_of(&["payload"]);
        let value = queue.remove_head(None).unwrap().into_value();
        assert_eq!(&*value, b"payload");
    }
}
