use std::mem;

use crossbeam::scope;
use rand::Rng;

use super::{Droppable, drop_counter, drops};
use crate::{Error, SimpleVector};

#[test]
fn test_new_is_empty() {
    let v: SimpleVector<i32> = SimpleVector::new();
    assert_eq!(v.len(), 0);
    assert_eq!(v.capacity(), 0);
    assert!(v.is_empty());
    assert_eq!(v.to_string(), "");
}

#[test]
fn test_from_elem() {
    let v = SimpleVector::from_elem(4, 7u8);
    assert_eq!(v.len(), 4);
    assert_eq!(v.capacity(), 4);
    assert_eq!(v, [7, 7, 7, 7]);
}

#[test]
fn test_with_len_defaults() {
    let v: SimpleVector<String> = SimpleVector::with_len(3);
    assert_eq!(v.len(), 3);
    assert_eq!(v.capacity(), 3);
    assert!(v.iter().all(String::is_empty));
}

#[test]
fn test_initializer_exact_capacity() {
    let v = simple_vector![1, 2, 3, 4, 5];
    assert_eq!(v.len(), 5);
    assert_eq!(v.capacity(), 5);

    let from_slice = SimpleVector::from(&[1, 2, 3][..]);
    assert_eq!(from_slice.capacity(), 3);

    let from_vec = SimpleVector::from(vec![9; 6]);
    assert_eq!(from_vec.capacity(), 6);

    let filled: SimpleVector<i32> = simple_vector![0; 2];
    assert_eq!(filled, [0, 0]);
}

#[test]
fn test_push_back_preserves_order() {
    let mut v = SimpleVector::new();
    for i in 0..100 {
        v.push_back(i);
        assert_eq!(v.len(), i + 1);
    }
    assert!(v.iter().copied().eq(0..100));
}

#[test]
fn test_push_back_doubles_capacity() {
    let mut v = SimpleVector::new();
    let mut seen = Vec::new();
    for i in 0..9 {
        v.push_back(i);
        seen.push(v.capacity());
    }
    assert_eq!(seen, [1, 2, 4, 4, 8, 8, 8, 8, 16]);
}

#[test]
fn test_pop_back() {
    let mut v = simple_vector![1, 2, 3];
    assert_eq!(v.pop_back(), Some(3));
    assert_eq!(v.pop_back(), Some(2));
    assert_eq!(v.pop_back(), Some(1));
    assert_eq!(v.pop_back(), None);
    assert_eq!(v.len(), 0);
    assert_eq!(v.capacity(), 3);
}

#[test]
fn test_at_checked() {
    let mut v = simple_vector![10, 20, 30];
    assert_eq!(v.at(0), Ok(&10));
    assert_eq!(v.at(2), Ok(&30));
    assert_eq!(v.at(3), Err(Error::OutOfRange { index: 3, len: 3 }));
    assert_eq!(v.at(usize::MAX), Err(Error::OutOfRange { index: usize::MAX, len: 3 }));

    *v.at_mut(1).unwrap() = 21;
    assert_eq!(v[1], 21);
    assert!(v.at_mut(3).is_err());
}

#[test]
fn test_out_of_range_message() {
    let v: SimpleVector<i32> = SimpleVector::new();
    let err = v.at(0).unwrap_err();
    assert_eq!(err.to_string(), "index 0 out of range for length 0");
}

#[test]
fn test_get_unchecked() {
    let mut v = simple_vector![1, 2, 3];
    unsafe {
        assert_eq!(*v.get_unchecked(1), 2);
        *v.get_unchecked_mut(2) = 4;
    }
    assert_eq!(v, [1, 2, 4]);
}

#[test]
fn test_reserve_smaller_is_noop() {
    let mut v = simple_vector![1, 2, 3];
    v.reserve(10);
    let ptr = v.as_ptr();
    let cursor = v.begin() + 1;

    v.reserve(5);
    v.reserve(10);
    assert_eq!(v.capacity(), 10);
    assert_eq!(v.as_ptr(), ptr);
    assert_eq!(v.get_at(cursor), Some(&2));
}

#[test]
fn test_reserve_exact() {
    let mut v = simple_vector![1, 2, 3];
    v.reserve(7);
    assert_eq!(v.capacity(), 7);
    assert_eq!(v.len(), 3);
    assert_eq!(v, [1, 2, 3]);
}

#[test]
fn test_resize_scenario() {
    let mut v = simple_vector![5, 5, 5];
    v.resize(5);
    assert_eq!(v, [5, 5, 5, 0, 0]);
    assert_eq!(v.capacity(), 5);

    v.resize(2);
    assert_eq!(v, [5, 5]);
    assert_eq!(v.capacity(), 5);
}

#[test]
fn test_resize_within_capacity() {
    let mut v: SimpleVector<i32> = SimpleVector::with_capacity(8);
    v.push_back(1);
    v.resize(4);
    assert_eq!(v, [1, 0, 0, 0]);
    assert_eq!(v.capacity(), 8);
}

#[test]
fn test_resize_drops_truncated() {
    let counter = drop_counter();
    let mut v: SimpleVector<Option<Droppable>> = SimpleVector::new();
    for _ in 0..5 {
        v.push_back(Some(Droppable(counter.clone())));
    }
    v.resize(2);
    assert_eq!(drops(&counter), 3);
    v.resize(4);
    assert!(v[2].is_none() && v[3].is_none());
    drop(v);
    assert_eq!(drops(&counter), 5);
}

#[test]
fn test_push_erase_scenario() {
    let mut v = SimpleVector::new();
    v.push_back(1);
    v.push_back(2);
    v.push_back(3);
    assert_eq!(v.len(), 3);
    assert!(v.capacity() >= 3);
    assert_eq!(v.to_string(), "1 2 3");

    let pos = v.find(&2);
    let next = v.erase(pos);
    assert_eq!(v, [1, 3]);
    assert_eq!(v.len(), 2);
    assert_eq!(v.get_at(next), Some(&3));
}

#[test]
fn test_erase_last_returns_end() {
    let mut v = simple_vector![1, 2, 3];
    let last = v.end() - 1;
    let next = v.erase(last);
    assert_eq!(next, v.end());
    assert_eq!(v, [1, 2]);
}

#[test]
fn test_insert_returns_cursor_to_value() {
    let mut v = simple_vector![1, 3];
    let pos = v.insert(v.begin() + 1, 2);
    assert_eq!(v.get_at(pos), Some(&2));
    assert_eq!(v, [1, 2, 3]);

    let front = v.insert(v.begin(), 0);
    assert_eq!(v.get_at(front), Some(&0));
    let back = v.insert(v.end(), 4);
    assert_eq!(v.get_at(back), Some(&4));
    assert_eq!(v, [0, 1, 2, 3, 4]);
}

#[test]
fn test_insert_into_empty_allocates_one() {
    let mut v = SimpleVector::new();
    v.insert(v.end(), "x");
    assert_eq!(v.capacity(), 1);
    v.insert(v.begin(), "w");
    assert_eq!(v.capacity(), 2);
    assert_eq!(v, ["w", "x"]);
}

#[test]
fn test_insert_erase_round_trip() {
    let mut v = simple_vector![1, 2, 3, 4];
    let before = v.clone();
    for offset in 0..=4 {
        let pos = v.insert(v.begin() + offset, 99);
        assert_eq!(v.len(), 5);
        v.erase(pos);
        assert_eq!(v, before);
    }
}

#[test]
fn test_insert_move_only() {
    let mut v: SimpleVector<Box<i32>> = SimpleVector::new();
    v.push_back(Box::new(1));
    v.push_back(Box::new(3));
    v.insert(v.begin() + 1, Box::new(2));
    let values: Vec<i32> = v.iter().map(|b| **b).collect();
    assert_eq!(values, [1, 2, 3]);
}

#[test]
fn test_insert_at_remove() {
    let mut v = SimpleVector::new();
    v.push_back(1);
    v.push_back(3);
    v.insert_at(1, 2);
    assert_eq!(v.as_ref(), &[1, 2, 3]);
    assert_eq!(v.remove(1), 2);
    assert_eq!(v.as_ref(), &[1, 3]);
}

#[test]
fn test_clear_keeps_capacity() {
    let counter = drop_counter();
    let mut v = SimpleVector::new();
    for _ in 0..3 {
        v.push_back(Droppable(counter.clone()));
    }
    let cap = v.capacity();
    v.clear();
    assert!(v.is_empty());
    assert_eq!(v.capacity(), cap);
    assert_eq!(drops(&counter), 3);
}

#[test]
fn test_clone_mirrors_capacity() {
    let mut v = simple_vector![1, 2, 3];
    v.reserve(10);
    let copy = v.clone();
    assert_eq!(copy.len(), 3);
    assert_eq!(copy.capacity(), 10);
    assert_eq!(copy, v);
    assert_ne!(copy.as_ptr(), v.as_ptr());

    let mut empty: SimpleVector<i32> = SimpleVector::with_capacity(4);
    empty.clear();
    assert_eq!(empty.clone().capacity(), 4);
}

#[test]
fn test_take_leaves_source_empty() {
    let mut source = simple_vector![1, 2, 3];
    let ptr = source.as_ptr();
    let moved = mem::take(&mut source);
    assert_eq!(moved, [1, 2, 3]);
    assert_eq!(moved.as_ptr(), ptr);
    assert_eq!(source.len(), 0);
    assert_eq!(source.capacity(), 0);
}

#[test]
fn test_swap() {
    let mut a = simple_vector![1, 2];
    let mut b = simple_vector![3, 4, 5];
    mem::swap(&mut a, &mut b);
    assert_eq!(a, [3, 4, 5]);
    assert_eq!(b, [1, 2]);
}

#[test]
fn test_equality_and_ordering() {
    let a = simple_vector![1, 2, 3];
    let b = simple_vector![1, 2, 3];
    let shorter = simple_vector![1, 2];
    let bigger = simple_vector![1, 2, 4];

    assert_eq!(a, a);
    assert_eq!(a, b);
    assert_eq!(b, a);
    assert_ne!(a, shorter);
    assert!(a < bigger);
    assert!(shorter < a);
    assert!(bigger > a);
    assert_eq!(a.cmp(&b), std::cmp::Ordering::Equal);
}

#[test]
fn test_equality_ignores_capacity() {
    let a = simple_vector![1, 2, 3];
    let mut b = SimpleVector::with_capacity(64);
    b.extend([1, 2, 3]);
    assert_eq!(a, b);
}

#[test]
fn test_rendering() {
    let v = simple_vector![1, 2, 3];
    assert_eq!(format!("{v}"), "1 2 3");
    assert_eq!(format!("{v:?}"), "[1, 2, 3]");

    let single = simple_vector!["only"];
    assert_eq!(single.to_string(), "only");
}

#[test]
fn test_try_reserve() {
    let mut v: SimpleVector<i32> = SimpleVector::new();
    assert!(v.try_reserve(10).is_ok());
    assert!(v.capacity() >= 10);
    assert_eq!(v.try_reserve(usize::MAX), Err(Error::CapacityOverflow));
}

#[test]
fn test_shrink_to_fit() {
    let mut v = SimpleVector::with_capacity(2);
    v.push_back(1);
    v.push_back(2);
    v.push_back(3);
    assert_eq!(v.capacity(), 4);
    v.shrink_to_fit();
    assert_eq!(v.capacity(), 3);
    v.clear();
    v.shrink_to_fit();
    assert_eq!(v.capacity(), 0);
}

#[test]
fn test_raii_drop() {
    let counter = drop_counter();
    {
        let mut v = SimpleVector::new();
        for _ in 0..10 {
            v.push_back(Droppable(counter.clone()));
        }
    }
    assert_eq!(drops(&counter), 10);
}

#[test]
fn test_into_iter_drops_remaining() {
    let counter = drop_counter();
    let mut v = SimpleVector::new();
    for _ in 0..4 {
        v.push_back(Droppable(counter.clone()));
    }
    let mut it = v.into_iter();
    drop(it.next());
    drop(it.next_back());
    assert_eq!(drops(&counter), 2);
    assert_eq!(it.len(), 2);
    drop(it);
    assert_eq!(drops(&counter), 4);
}

#[test]
fn test_iterators() {
    let mut v = SimpleVector::new();
    v.push_back(10);
    v.push_back(20);
    v.push_back(30);

    let mut sum = 0;
    for &x in &v {
        sum += x;
    }
    assert_eq!(sum, 60);

    for x in &mut v {
        *x += 1;
    }
    assert_eq!(v[0], 11);

    let collected: Vec<i32> = v.into_iter().collect();
    assert_eq!(collected, vec![11, 21, 31]);

    let gathered: SimpleVector<i32> = (0..5).collect();
    assert_eq!(gathered, [0, 1, 2, 3, 4]);
}

#[test]
fn test_zero_sized_elements() {
    let mut v = SimpleVector::new();
    for _ in 0..10 {
        v.push_back(());
    }
    assert_eq!(v.len(), 10);
    v.insert_at(3, ());
    assert_eq!(v.pop_back(), Some(()));
    assert_eq!(v.len(), 10);
}

#[test]
fn test_shared_reads_across_threads() {
    let v: SimpleVector<i32> = (0..100).collect();

    scope(|s| {
        s.spawn(|_| assert_eq!(v.iter().sum::<i32>(), 4950));
        s.spawn(|_| assert_eq!(v.at(99), Ok(&99)));
    })
    .unwrap();
}

#[test]
fn test_matches_std_vec_under_random_ops() {
    let mut rng = rand::rng();
    let mut ours: SimpleVector<i64> = SimpleVector::new();
    let mut model: Vec<i64> = Vec::new();

    for _ in 0..2_000 {
        match rng.random_range(0..6) {
            0 | 1 => {
                let value = rng.random::<i64>();
                ours.push_back(value);
                model.push(value);
            }
            2 => assert_eq!(ours.pop_back(), model.pop()),
            3 => {
                let index = rng.random_range(0..=model.len());
                let value = rng.random::<i64>();
                ours.insert(ours.begin() + index as isize, value);
                model.insert(index, value);
            }
            4 if !model.is_empty() => {
                let index = rng.random_range(0..model.len());
                ours.erase(ours.cursor(index));
                model.remove(index);
            }
            _ => {
                let new_len = rng.random_range(0..=model.len() + 4);
                ours.resize(new_len);
                model.resize(new_len, 0);
            }
        }
        assert_eq!(ours.as_slice(), model.as_slice());
        assert!(ours.len() <= ours.capacity());
    }
}

#[test]
#[should_panic(expected = "Index out of bounds")]
fn test_out_of_bounds_remove() {
    let mut v: SimpleVector<i32> = SimpleVector::new();
    v.remove(0);
}

#[test]
#[should_panic(expected = "Index out of bounds")]
fn test_out_of_bounds_insert() {
    let mut v: SimpleVector<i32> = SimpleVector::new();
    v.insert(v.begin() + 1, 10);
}

#[test]
#[should_panic(expected = "Index out of bounds")]
fn test_erase_end() {
    let mut v = simple_vector![1];
    v.erase(v.end());
}

#[test]
#[should_panic(expected = "stale cursor")]
fn test_insert_with_stale_cursor() {
    let mut v = simple_vector![1];
    let stale = v.begin();
    v.push_back(2);
    v.insert(stale, 0);
}

#[test]
#[should_panic(expected = "stale cursor")]
fn test_erase_with_detached_cursor() {
    let mut v = simple_vector![1];
    v.erase(crate::Cursor::detached());
}
