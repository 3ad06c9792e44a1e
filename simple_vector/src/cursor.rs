use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Sub, SubAssign};

const DETACHED: u64 = 0;

/// A position in a [`SimpleVector`](crate::SimpleVector).
///
/// A cursor is an offset stamped with the epoch of the buffer it was issued
/// for. Epochs are unique within the process: every new container and every
/// reallocation takes a fresh one, so a container refuses cursors issued by
/// another container or for a buffer it has since replaced. `Cursor::default()` is the
/// detached cursor, which no container accepts.
///
/// Arithmetic wraps and is never checked; a cursor moved outside
/// `[begin, end]` simply stops resolving to an element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cursor {
    offset: usize,
    epoch: u64,
}

impl Cursor {
    pub(crate) const fn new(offset: usize, epoch: u64) -> Self {
        Self { offset, epoch }
    }

    pub const fn detached() -> Self {
        Self {
            offset: 0,
            epoch: DETACHED,
        }
    }

    pub const fn is_detached(&self) -> bool {
        self.epoch == DETACHED
    }

    /// Element distance from the start of the container.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub(crate) const fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn step_forward(&mut self) -> &mut Self {
        self.offset = self.offset.wrapping_add(1);
        self
    }

    pub fn step_back(&mut self) -> &mut Self {
        self.offset = self.offset.wrapping_sub(1);
        self
    }
}

impl Add<isize> for Cursor {
    type Output = Cursor;

    fn add(self, n: isize) -> Cursor {
        Cursor::new(self.offset.wrapping_add_signed(n), self.epoch)
    }
}

impl AddAssign<isize> for Cursor {
    fn add_assign(&mut self, n: isize) {
        *self = *self + n;
    }
}

impl Sub<isize> for Cursor {
    type Output = Cursor;

    fn sub(self, n: isize) -> Cursor {
        Cursor::new(self.offset.wrapping_add_signed(n.wrapping_neg()), self.epoch)
    }
}

impl SubAssign<isize> for Cursor {
    fn sub_assign(&mut self, n: isize) {
        *self = *self - n;
    }
}

/// Signed element distance `self - origin`.
impl Sub for Cursor {
    type Output = isize;

    fn sub(self, origin: Cursor) -> isize {
        self.offset.wrapping_sub(origin.offset) as isize
    }
}

/// Cursors from different epochs are unordered.
impl PartialOrd for Cursor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.epoch != other.epoch {
            return None;
        }
        self.offset.partial_cmp(&other.offset)
    }
}
