use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::mem::{self, ManuallyDrop};
use std::ptr::NonNull;

use crate::Error;

/// Single-owner handle over `capacity` uninitialised slots of `T`.
///
/// Dropping the handle returns the memory to the allocator exactly once. It
/// never runs element destructors: the owner of the handle decides which
/// slots are live. Zero-sized requests (no slots, or a zero-sized `T`) never
/// reach the allocator.
pub struct ArrayPtr<T> {
    ptr: NonNull<T>,
    cap: usize,
    _marker: PhantomData<T>,
}

// SAFETY: the handle owns its slots; moving it to another thread moves the
// `T`s it may hold, which is fine whenever `T: Send`.
unsafe impl<T: Send> Send for ArrayPtr<T> {}
// SAFETY: shared access only ever hands out `&T`.
unsafe impl<T: Sync> Sync for ArrayPtr<T> {}

impl<T> ArrayPtr<T> {
    /// A handle with no slots and no allocation.
    pub const fn empty() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            _marker: PhantomData,
        }
    }

    /// Allocates exactly `capacity` slots.
    ///
    /// Panics on capacity overflow and aborts through
    /// [`std::alloc::handle_alloc_error`] when the allocator fails.
    pub fn allocate(capacity: usize) -> Self {
        let layout = match Self::layout(capacity) {
            Ok(layout) => layout,
            Err(_) => capacity_overflow(),
        };
        match Self::allocate_layout(layout, capacity) {
            Some(buf) => buf,
            None => alloc::handle_alloc_error(layout),
        }
    }

    /// Fallible counterpart of [`ArrayPtr::allocate`].
    pub fn try_allocate(capacity: usize) -> Result<Self, Error> {
        let layout = Self::layout(capacity)?;
        Self::allocate_layout(layout, capacity).ok_or(Error::AllocFailed { capacity })
    }

    fn allocate_layout(layout: Layout, capacity: usize) -> Option<Self> {
        if layout.size() == 0 {
            return Some(Self {
                ptr: NonNull::dangling(),
                cap: capacity,
                _marker: PhantomData,
            });
        }

        // SAFETY: the layout has a non-zero size.
        let raw = unsafe { alloc::alloc(layout) };
        NonNull::new(raw.cast::<T>()).map(|ptr| Self {
            ptr,
            cap: capacity,
            _marker: PhantomData,
        })
    }

    fn layout(capacity: usize) -> Result<Layout, Error> {
        Layout::array::<T>(capacity).map_err(|_| Error::CapacityOverflow)
    }

    /// Number of slots owned by this handle.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Gives up ownership of the allocation without freeing it.
    ///
    /// The returned pointer and slot count must be handed back to
    /// [`ArrayPtr::from_raw_parts`] or the memory leaks.
    pub fn release(self) -> (NonNull<T>, usize) {
        let this = ManuallyDrop::new(self);
        (this.ptr, this.cap)
    }

    /// Rebuilds a handle from the parts returned by [`ArrayPtr::release`].
    ///
    /// # Safety
    ///
    /// `ptr` and `capacity` must come from a single earlier call to
    /// `release` on an `ArrayPtr<T>`, and no other handle may own them.
    pub unsafe fn from_raw_parts(ptr: NonNull<T>, capacity: usize) -> Self {
        Self {
            ptr,
            cap: capacity,
            _marker: PhantomData,
        }
    }
}

impl<T> Default for ArrayPtr<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Drop for ArrayPtr<T> {
    fn drop(&mut self) {
        // The layout was valid when the handle was created.
        let Ok(layout) = Self::layout(self.cap) else {
            return;
        };
        if layout.size() != 0 {
            // SAFETY: `ptr` was returned by `alloc::alloc` with this layout.
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast::<u8>(), layout) };
        }
    }
}

#[cold]
#[inline(never)]
pub(crate) fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}
