//! A growable contiguous array with checked access and epoch-stamped cursors.
//!
//! [`SimpleVector`] owns one heap buffer through an [`ArrayPtr`] handle and
//! grows it by doubling. Positions are expressed as [`Cursor`]s, which stop
//! resolving once the buffer they were issued for has been reallocated.
//!
//! ```rust
//! use simple_vector::{simple_vector, SimpleVector};
//!
//! let mut v: SimpleVector<i32> = simple_vector![1, 2, 3];
//! let two = v.find(&2);
//! v.erase(two);
//! assert_eq!(v.to_string(), "1 3");
//! assert!(v.at(2).is_err());
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem::{self, ManuallyDrop};
use std::ops::{Deref, DerefMut};
use std::ptr;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::trace;

mod array_ptr;
mod cursor;
mod error;

pub use array_ptr::ArrayPtr;
pub use cursor::Cursor;
pub use error::Error;

use array_ptr::capacity_overflow;

/// Epoch source shared by every vector in the process; 0 is the detached cursor.
static NEXT_EPOCH: AtomicU64 = AtomicU64::new(1);

fn next_epoch() -> u64 {
    NEXT_EPOCH.fetch_add(1, Ordering::Relaxed)
}

/// Builds a [`SimpleVector`] whose capacity equals its length.
#[macro_export]
macro_rules! simple_vector {
    () => {
        $crate::SimpleVector::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::SimpleVector::from_elem($n, $elem)
    };
    ($($x:expr),+ $(,)?) => {
        $crate::SimpleVector::from([$($x),+])
    };
}

/// Owning, resizable, contiguous sequence.
///
/// Elements `[0, len)` are live, slots `[len, capacity)` are uninitialised.
/// Appending into a full buffer doubles its capacity (one slot when empty);
/// `reserve` and `resize` allocate exactly what they are asked for.
pub struct SimpleVector<T> {
    buf: ArrayPtr<T>,
    len: usize,
    epoch: u64,
}

impl<T> SimpleVector<T> {
    /// Creates an empty vector without allocating.
    pub fn new() -> Self {
        Self {
            buf: ArrayPtr::empty(),
            len: 0,
            epoch: next_epoch(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: ArrayPtr::allocate(capacity),
            len: 0,
            epoch: next_epoch(),
        }
    }

    /// `count` copies of `value`; capacity is exactly `count`.
    pub fn from_elem(count: usize, value: T) -> Self
    where
        T: Clone,
    {
        let mut v = Self::with_capacity(count);
        if count > 0 {
            for _ in 1..count {
                // SAFETY: capacity is `count`, fewer than `count` slots are written.
                unsafe { v.write_next(value.clone()) };
            }
            // SAFETY: this fills the last of the `count` slots.
            unsafe { v.write_next(value) };
        }
        v
    }

    /// `count` default values; capacity is exactly `count`.
    pub fn with_len(count: usize) -> Self
    where
        T: Default,
    {
        let mut v = Self::with_capacity(count);
        for _ in 0..count {
            // SAFETY: capacity is `count`.
            unsafe { v.write_next(T::default()) };
        }
        v
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[T] {
        self
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }

    pub fn as_ptr(&self) -> *const T {
        self.buf.as_ptr()
    }

    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.as_mut_ptr()
    }

    /// Checked access.
    pub fn at(&self, index: usize) -> Result<&T, Error> {
        let len = self.len;
        self.as_slice().get(index).ok_or(Error::OutOfRange { index, len })
    }

    /// Checked mutable access.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, Error> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(Error::OutOfRange { index, len })
    }

    /// Unchecked access.
    ///
    /// # Safety
    ///
    /// `index` must be less than `len()`.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len);
        // SAFETY: the caller guarantees `index` addresses a live element.
        unsafe { &*self.buf.as_ptr().add(index) }
    }

    /// Unchecked mutable access.
    ///
    /// # Safety
    ///
    /// `index` must be less than `len()`.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len);
        // SAFETY: the caller guarantees `index` addresses a live element.
        unsafe { &mut *self.buf.as_mut_ptr().add(index) }
    }

    /// Grows the buffer to exactly `new_cap` slots. Does nothing when the
    /// current capacity is already large enough.
    pub fn reserve(&mut self, new_cap: usize) {
        if new_cap <= self.capacity() {
            return;
        }
        self.relocate(ArrayPtr::allocate(new_cap));
    }

    /// Makes room for `additional` more elements, reporting failure instead
    /// of aborting.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), Error> {
        let required = self
            .len
            .checked_add(additional)
            .ok_or(Error::CapacityOverflow)?;
        if required > self.capacity() {
            self.relocate(ArrayPtr::try_allocate(required)?);
        }
        Ok(())
    }

    /// Drops the spare capacity.
    pub fn shrink_to_fit(&mut self) {
        if self.len == self.capacity() {
            return;
        }
        self.relocate(ArrayPtr::allocate(self.len));
    }

    /// Sets the length to `new_len`, default-filling new slots and dropping
    /// truncated elements. Shrinking keeps the capacity.
    pub fn resize(&mut self, new_len: usize)
    where
        T: Default,
    {
        if new_len > self.capacity() {
            self.reserve(new_len);
        }
        if new_len > self.len {
            while self.len < new_len {
                // SAFETY: capacity is at least `new_len`.
                unsafe { self.write_next(T::default()) };
            }
        } else {
            self.truncate(new_len);
        }
    }

    /// Drops every element from `len` onwards.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let tail_len = self.len - len;
        // Shorten first so a panicking destructor cannot cause a double drop.
        self.len = len;
        // SAFETY: `[len, len + tail_len)` were live and are no longer reachable.
        unsafe {
            let tail = ptr::slice_from_raw_parts_mut(self.buf.as_mut_ptr().add(len), tail_len);
            ptr::drop_in_place(tail);
        }
    }

    /// Appends `value`, doubling the capacity when the buffer is full.
    pub fn push_back(&mut self, value: T) {
        if self.len == self.capacity() {
            self.grow();
        }
        // SAFETY: `grow` guarantees a spare slot.
        unsafe { self.write_next(value) };
    }

    /// Removes the last element. Returns `None` on an empty vector.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: the slot at the old `len - 1` is live and is now outside the vector.
        Some(unsafe { ptr::read(self.buf.as_ptr().add(self.len)) })
    }

    /// Inserts `value` before `pos` and returns a cursor to it.
    ///
    /// `pos` may be anywhere in `[begin, end]`. A full buffer is doubled
    /// first, which invalidates every earlier cursor.
    ///
    /// # Panics
    ///
    /// Panics when `pos` is detached, stale or past `end()`.
    pub fn insert(&mut self, pos: Cursor, value: T) -> Cursor {
        let index = self.checked_offset(pos, self.len);
        self.insert_at(index, value);
        self.cursor(index)
    }

    /// Inserts `value` at `index`, shifting the tail right.
    pub fn insert_at(&mut self, index: usize, value: T) {
        assert!(index <= self.len, "Index out of bounds");
        if self.len == self.capacity() {
            self.grow();
        }
        // SAFETY: there is a spare slot and `index <= len`.
        unsafe {
            let p = self.buf.as_mut_ptr().add(index);
            ptr::copy(p, p.add(1), self.len - index);
            ptr::write(p, value);
        }
        self.len += 1;
    }

    /// Removes the element at `pos` and returns a cursor to the element that
    /// took its place (`end()` when the last element was erased).
    ///
    /// # Panics
    ///
    /// Panics when `pos` is detached, stale or not dereferenceable.
    pub fn erase(&mut self, pos: Cursor) -> Cursor {
        let index = self.checked_offset(pos, self.len);
        assert!(index < self.len, "Index out of bounds");
        drop(self.remove(index));
        self.cursor(index)
    }

    /// Removes and returns the element at `index`, shifting the tail left.
    pub fn remove(&mut self, index: usize) -> T {
        assert!(index < self.len, "Index out of bounds");
        // SAFETY: `index` is live; the tail is moved bitwise over it.
        unsafe {
            self.len -= 1;
            let p = self.buf.as_mut_ptr().add(index);
            let removed = ptr::read(p);
            ptr::copy(p.add(1), p, self.len - index);
            removed
        }
    }

    /// Drops all elements, keeping the capacity.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    pub fn begin(&self) -> Cursor {
        self.cursor(0)
    }

    pub fn end(&self) -> Cursor {
        self.cursor(self.len)
    }

    /// Cursor at `index` in the current epoch. No bounds check happens here.
    pub fn cursor(&self, index: usize) -> Cursor {
        Cursor::new(index, self.epoch)
    }

    /// Cursor to the first element equal to `value`, or `end()`.
    pub fn find(&self, value: &T) -> Cursor
    where
        T: PartialEq,
    {
        let index = self.iter().position(|x| x == value).unwrap_or(self.len);
        self.cursor(index)
    }

    /// Whether `pos` was issued for the current buffer and lies in `[begin, end]`.
    pub fn is_current(&self, pos: Cursor) -> bool {
        pos.epoch() == self.epoch && pos.offset() <= self.len
    }

    /// The element under `pos`, if the cursor is current and dereferenceable.
    pub fn get_at(&self, pos: Cursor) -> Option<&T> {
        if pos.epoch() != self.epoch {
            return None;
        }
        self.as_slice().get(pos.offset())
    }

    pub fn get_at_mut(&mut self, pos: Cursor) -> Option<&mut T> {
        if pos.epoch() != self.epoch {
            return None;
        }
        self.as_mut_slice().get_mut(pos.offset())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.deref().iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.deref_mut().iter_mut()
    }

    fn checked_offset(&self, pos: Cursor, limit: usize) -> usize {
        assert!(pos.epoch() == self.epoch, "stale cursor");
        assert!(pos.offset() <= limit, "Index out of bounds");
        pos.offset()
    }

    fn grow(&mut self) {
        let new_cap = match self.capacity() {
            0 => 1,
            cap => cap.checked_mul(2).unwrap_or_else(|| capacity_overflow()),
        };
        self.relocate(ArrayPtr::allocate(new_cap));
    }

    /// Moves the live elements into `fresh` and frees the old buffer.
    #[cold]
    fn relocate(&mut self, mut fresh: ArrayPtr<T>) {
        debug_assert!(fresh.capacity() >= self.len);
        trace!(
            from = self.capacity(),
            to = fresh.capacity(),
            len = self.len,
            "relocating buffer"
        );
        // SAFETY: both buffers hold at least `len` slots and do not overlap.
        unsafe { ptr::copy_nonoverlapping(self.buf.as_ptr(), fresh.as_mut_ptr(), self.len) };
        self.buf.swap(&mut fresh);
        self.epoch = next_epoch();
        // `fresh` now owns the old slots, whose contents were moved out; dropping
        // it only releases memory.
    }

    /// # Safety
    ///
    /// `len` must be less than `capacity`.
    #[inline]
    unsafe fn write_next(&mut self, value: T) {
        debug_assert!(self.len < self.capacity());
        // SAFETY: the caller guarantees a spare slot at `len`.
        unsafe { ptr::write(self.buf.as_mut_ptr().add(self.len), value) };
        // Only count the slot once the write happened.
        self.len += 1;
    }
}

impl<T> Drop for SimpleVector<T> {
    fn drop(&mut self) {
        // SAFETY: exactly the live prefix is dropped; `buf` frees the memory afterwards.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.buf.as_mut_ptr(), self.len));
        }
    }
}

impl<T> Default for SimpleVector<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// The copy mirrors the source capacity, not just its length.
impl<T: Clone> Clone for SimpleVector<T> {
    fn clone(&self) -> Self {
        let mut copy = Self::with_capacity(self.capacity());
        for item in self.iter() {
            // SAFETY: capacity matches the source, which holds `len <= capacity` items.
            unsafe { copy.write_next(item.clone()) };
        }
        copy
    }
}

impl<T> Deref for SimpleVector<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        // SAFETY: `[0, len)` are live and the pointer is non-null and aligned.
        unsafe { std::slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }
}

impl<T> DerefMut for SimpleVector<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        // SAFETY: as in `deref`, and `&mut self` gives exclusive access.
        unsafe { std::slice::from_raw_parts_mut(self.buf.as_mut_ptr(), self.len) }
    }
}

impl<T> AsRef<[T]> for SimpleVector<T> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T> AsMut<[T]> for SimpleVector<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T: PartialEq> PartialEq for SimpleVector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for SimpleVector<T> {}

impl<T: PartialEq> PartialEq<[T]> for SimpleVector<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for SimpleVector<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialOrd> PartialOrd for SimpleVector<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord> Ord for SimpleVector<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash> Hash for SimpleVector<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

/// Space separated, e.g. `1 2 3`.
impl<T: fmt::Display> fmt::Display for SimpleVector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut items = self.iter();
        if let Some(first) = items.next() {
            write!(f, "{first}")?;
            for item in items {
                write!(f, " {item}")?;
            }
        }
        Ok(())
    }
}

/// Bracketed, e.g. `[1, 2, 3]`.
impl<T: fmt::Debug> fmt::Debug for SimpleVector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, const N: usize> From<[T; N]> for SimpleVector<T> {
    fn from(items: [T; N]) -> Self {
        let mut v = Self::with_capacity(N);
        for item in items {
            // SAFETY: capacity is exactly `N`.
            unsafe { v.write_next(item) };
        }
        v
    }
}

impl<T: Clone> From<&[T]> for SimpleVector<T> {
    fn from(items: &[T]) -> Self {
        let mut v = Self::with_capacity(items.len());
        for item in items {
            // SAFETY: capacity is exactly `items.len()`.
            unsafe { v.write_next(item.clone()) };
        }
        v
    }
}

impl<T> From<Vec<T>> for SimpleVector<T> {
    fn from(items: Vec<T>) -> Self {
        let mut v = Self::with_capacity(items.len());
        for item in items {
            // SAFETY: capacity is exactly the source length.
            unsafe { v.write_next(item) };
        }
        v
    }
}

impl<T> FromIterator<T> for SimpleVector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut v = Self::new();
        v.extend(iter);
        v
    }
}

impl<T> Extend<T> for SimpleVector<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

/// Owning iterator; unconsumed elements are dropped with it.
pub struct IntoIter<T> {
    buf: ArrayPtr<T>,
    start: usize,
    end: usize,
}

impl<T> IntoIterator for SimpleVector<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        // The elements now belong to the iterator; the vector must not drop them.
        let mut this = ManuallyDrop::new(self);
        let buf = mem::take(&mut this.buf);
        IntoIter {
            buf,
            start: 0,
            end: this.len,
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: `start` is live and is read exactly once.
        let item = unsafe { ptr::read(self.buf.as_ptr().add(self.start)) };
        self.start += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.start;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        // SAFETY: `end` was live and is read exactly once.
        Some(unsafe { ptr::read(self.buf.as_ptr().add(self.end)) })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        // SAFETY: `[start, end)` were never handed out.
        unsafe {
            let rest = ptr::slice_from_raw_parts_mut(
                self.buf.as_mut_ptr().add(self.start),
                self.end - self.start,
            );
            ptr::drop_in_place(rest);
        }
    }
}

impl<'a, T> IntoIterator for &'a SimpleVector<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut SimpleVector<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests;
