use crate::list::{connect, List, Node};
use std::ptr::NonNull;

/// Sorts the ring by an iterative bottom-up merge sort.
///
/// The ring is opened into a chain first: from then on only successor
/// links are trusted, with the ghost pointer standing in for the chain
/// terminator, and predecessor fields become scratch space that threads
/// the stack of pending runs. `merge_restore` rebuilds the predecessor
/// links and closes the ring again at the very end, so the list is a
/// valid ring whenever this function is not on the stack.
pub(crate) fn merge_sort<T, F>(list: &mut List<T>, mut less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    if list.is_empty() || list.is_singular() {
        return;
    }
    let ghost = list.ghost_node();

    // SAFETY: the ring is well-formed and holds at least two nodes, so
    // every link followed below reaches a valid node, and at least two
    // runs are pending when the input is exhausted.
    unsafe {
        let mut input = ghost.as_ref().next;
        let mut pending = ghost;
        let mut count = 0_usize;

        while input != ghost {
            // The sizes of the pending runs are the set bits of `count`,
            // newest run first. Walk down to the least-significant clear
            // bit; if any set bits were skipped, two runs of equal size
            // wait there and must merge first, like a binary-counter
            // carry. This keeps at most one run of each size pending, so
            // the stack is O(log n) deep and comparisons total
            // O(n log n).
            let mut tail: *mut NonNull<Node<T>> = &mut pending;
            let mut bits = count;
            while bits & 1 != 0 {
                tail = &mut (*(*tail).as_ptr()).prev;
                bits >>= 1;
            }
            if bits != 0 {
                let b = *tail;
                let a = (*b.as_ptr()).prev;
                let run = merge(ghost, a, b, &mut less);
                (*run.as_ptr()).prev = (*a.as_ptr()).prev;
                *tail = run;
            }

            // Push the next input node as a single-element run.
            let next = (*input.as_ptr()).next;
            (*input.as_ptr()).prev = pending;
            pending = input;
            (*input.as_ptr()).next = ghost;
            input = next;
            count += 1;
        }

        // Input exhausted; fold the pending runs together, newest into
        // oldest, leaving the oldest for the restoring merge.
        let mut run = pending;
        pending = (*pending.as_ptr()).prev;
        loop {
            let next = (*pending.as_ptr()).prev;
            if next == ghost {
                break;
            }
            run = merge(ghost, pending, run, &mut less);
            pending = next;
        }
        merge_restore(ghost, pending, run, &mut less);
    }
}

/// Merge two ghost-terminated chains into one ascending chain, using
/// successor links only.
///
/// Ties take a node from `a`, the run that was formed earlier, which
/// keeps the sort stable.
unsafe fn merge<T, F>(
    ghost: NonNull<Node<T>>,
    mut a: NonNull<Node<T>>,
    mut b: NonNull<Node<T>>,
    less: &mut F,
) -> NonNull<Node<T>>
where
    F: FnMut(&T, &T) -> bool,
{
    let mut head = ghost;
    let mut tail: *mut NonNull<Node<T>> = &mut head;
    loop {
        if !less(&b.as_ref().element, &a.as_ref().element) {
            *tail = a;
            tail = &mut (*a.as_ptr()).next;
            a = *tail;
            if a == ghost {
                *tail = b;
                break;
            }
        } else {
            *tail = b;
            tail = &mut (*b.as_ptr()).next;
            b = *tail;
            if b == ghost {
                *tail = a;
                break;
            }
        }
    }
    head
}

/// The final merge: the same ascending thread as [`merge`], but
/// rebuilding predecessor links on the way and closing the ring through
/// the ghost node again.
unsafe fn merge_restore<T, F>(
    ghost: NonNull<Node<T>>,
    mut a: NonNull<Node<T>>,
    mut b: NonNull<Node<T>>,
    less: &mut F,
) where
    F: FnMut(&T, &T) -> bool,
{
    let mut tail = ghost;
    loop {
        if !less(&b.as_ref().element, &a.as_ref().element) {
            connect(tail, a);
            tail = a;
            a = tail.as_ref().next;
            if a == ghost {
                break;
            }
        } else {
            connect(tail, b);
            tail = b;
            b = tail.as_ref().next;
            if b == ghost {
                b = a;
                break;
            }
        }
    }
    // Whatever remains is a tail of a single run; thread it on, then
    // close the ring.
    loop {
        connect(tail, b);
        tail = b;
        b = tail.as_ref().next;
        if b == ghost {
            break;
        }
    }
    connect(tail, ghost);
}

#[cfg(test)]
mod tests {
    use crate::list::assert_ring_valid;
    use crate::List;
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoshiro256StarStar;
    use std::iter::FromIterator;

    fn scrambled(n: usize, seed: u64) -> Vec<u32> {
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        (0..n).map(|_| rng.random_range(0..64)).collect()
    }

    #[test]
    fn sort_matches_slice_sort() {
        let sizes = [
            0, 1, 2, 3, 4, 5, 7, 8, 9, 15, 16, 17, 31, 32, 33, 63, 64, 65, 100,
        ];
        for &n in sizes.iter() {
            let input = scrambled(n, n as u64 + 1);
            let mut list = List::from_iter(input.iter().copied());
            list.sort();
            assert_ring_valid(&list);
            let mut expected = input;
            expected.sort();
            assert_eq!(Vec::from_iter(list), expected, "length {}", n);
        }
    }

    #[test]
    fn sort_sorted_and_reversed_inputs() {
        let mut list = List::from_iter(0..33);
        list.sort();
        assert_ring_valid(&list);
        assert_eq!(Vec::from_iter(list), Vec::from_iter(0..33));

        let mut list = List::from_iter((0..33).rev());
        list.sort();
        assert_ring_valid(&list);
        assert_eq!(Vec::from_iter(list), Vec::from_iter(0..33));
    }

    #[test]
    fn sort_is_stable() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(3);
        let input: Vec<(u32, usize)> = (0..200_usize)
            .map(|id| (rng.random_range(0..8), id))
            .collect();
        let mut list = List::from_iter(input.iter().copied());
        list.sort_by_key(|&(key, _)| key);
        let mut expected = input;
        expected.sort_by_key(|&(key, _)| key);
        assert_eq!(Vec::from_iter(list), expected);
    }

    #[test]
    fn sort_by_reverse_comparator() {
        let mut list = List::from_iter([5, 4, 1, 3, 2]);
        list.sort_by(|a, b| b.cmp(a));
        assert_ring_valid(&list);
        assert_eq!(Vec::from_iter(list), vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn sort_all_equal() {
        let mut list = List::from_iter(std::iter::repeat(7).take(17));
        list.sort();
        assert_ring_valid(&list);
        assert_eq!(list.len(), 17);
    }
}
