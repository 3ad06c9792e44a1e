use simple_vector::SimpleVector;
use std::ptr;

/// Create a new, empty vector of i64
#[unsafe(no_mangle)]
pub extern "C" fn simple_vector_new_i64() -> *mut SimpleVector<i64> {
    Box::into_raw(Box::new(SimpleVector::<i64>::new()))
}

/// Append an element, doubling the capacity when full
///
/// # Safety
///
/// `arr_ptr` must come from `simple_vector_new_i64` and not be dropped yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn simple_vector_push_i64(arr_ptr: *mut SimpleVector<i64>, elem: i64) -> i64 {
    let arr = unsafe { &mut *arr_ptr };
    arr.push_back(elem);
    0
}

/// Remove the last element; an empty vector yields 0
///
/// # Safety
///
/// See [`simple_vector_push_i64`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn simple_vector_pop_i64(arr_ptr: *mut SimpleVector<i64>) -> i64 {
    let arr = unsafe { &mut *arr_ptr };
    arr.pop_back().unwrap_or(0)
}

/// # Safety
///
/// See [`simple_vector_push_i64`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn simple_vector_len_i64(arr_ptr: *const SimpleVector<i64>) -> usize {
    let arr = unsafe { &*arr_ptr };
    arr.len()
}

/// # Safety
///
/// See [`simple_vector_push_i64`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn simple_vector_cap_i64(arr_ptr: *const SimpleVector<i64>) -> usize {
    let arr = unsafe { &*arr_ptr };
    arr.capacity()
}

/// Checked read: writes the element to `out` and returns 0, or returns -1
/// when `index` is out of range
///
/// # Safety
///
/// See [`simple_vector_push_i64`]; `out` must be valid for writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn simple_vector_at_i64(
    arr_ptr: *const SimpleVector<i64>,
    index: usize,
    out: *mut i64,
) -> i64 {
    let arr = unsafe { &*arr_ptr };
    match arr.at(index) {
        Ok(value) => {
            unsafe { out.write(*value) };
            0
        }
        Err(_) => -1,
    }
}

/// Pointer to the element at `index`, or null when out of range
///
/// The pointer dangles after the next push that reallocates.
///
/// # Safety
///
/// See [`simple_vector_push_i64`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn simple_vector_get_ptr_i64(
    arr_ptr: *mut SimpleVector<i64>,
    index: usize,
) -> *mut i64 {
    let arr = unsafe { &mut *arr_ptr };
    match arr.at_mut(index) {
        Ok(slot) => slot as *mut i64,
        Err(_) => ptr::null_mut(),
    }
}

/// Overwrite the element at `index`; out-of-range writes are ignored
///
/// # Safety
///
/// See [`simple_vector_push_i64`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn simple_vector_set_i64(
    arr_ptr: *mut SimpleVector<i64>,
    index: usize,
    value: i64,
) -> i64 {
    let arr = unsafe { &mut *arr_ptr };
    if let Ok(slot) = arr.at_mut(index) {
        *slot = value;
    }
    0
}

/// Drop the vector; null is accepted
///
/// # Safety
///
/// `arr_ptr` must be null or come from `simple_vector_new_i64`, and must not
/// be used afterwards.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn simple_vector_drop_i64(arr_ptr: *mut SimpleVector<i64>) -> i64 {
    if !arr_ptr.is_null() {
        unsafe {
            let _ = Box::from_raw(arr_ptr);
        }
    }
    0
}
