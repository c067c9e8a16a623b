//! Opaque handles.
//!
//! A handle is the address of a heap cell that starts with a [`Handle`]
//! header followed by the value. The header stores the monomorphized drop
//! routine, so [`release`] (and the exported `gen_release`) can destroy any
//! handle without knowing the value's type. Foreign code sees only
//! `gen_handle*`.
//!
//! There is no runtime type tag: dereferencing a handle as a type other than
//! the one it was created with is undefined behaviour, as is using a handle
//! after release or releasing it twice.

use std::mem;
use std::ptr;

use crate::error::BindError;

/// Class types that cross the boundary behind an opaque handle.
///
/// Implemented by `#[derive(Opaque)]`, which also generates the parameter
/// and return conversions for the type.
pub trait Opaque: Sized + 'static {
    /// The type name, used in error messages.
    const NAME: &'static str;
}

/// Header of every handle cell; `gen_handle` on the C side.
#[repr(C)]
pub struct Handle {
    release: unsafe fn(*mut Handle),
}

#[repr(C)]
struct Cell<T> {
    header: Handle,
    value: T,
}

unsafe fn release_cell<T>(handle: *mut Handle) {
    drop(unsafe { Box::from_raw(handle.cast::<Cell<T>>()) });
}

/// Move a value to the heap and return its handle.
pub fn into_handle<T: Opaque>(value: T) -> *mut Handle {
    let cell = Box::new(Cell {
        header: Handle {
            release: release_cell::<T>,
        },
        value,
    });
    Box::into_raw(cell).cast::<Handle>()
}

/// Pointer to the value behind a handle; null for a null handle.
///
/// # Safety
///
/// `handle` must be null or a live handle created from a `T`.
pub unsafe fn value_ptr<T: Opaque>(handle: *mut Handle) -> *mut T {
    if handle.is_null() {
        return ptr::null_mut();
    }
    let cell = handle.cast::<Cell<T>>();
    unsafe { &raw mut (*cell).value }
}

/// Borrow the value behind a handle.
///
/// # Safety
///
/// `handle` must be null or a live handle created from a `T`, not mutably
/// aliased for `'a`.
pub unsafe fn deref<'a, T: Opaque>(handle: *mut Handle) -> Result<&'a T, BindError> {
    let value = unsafe { value_ptr::<T>(handle) };
    if value.is_null() {
        return Err(BindError::NullHandle { type_name: T::NAME });
    }
    Ok(unsafe { &*value })
}

/// Mutably borrow the value behind a handle.
///
/// # Safety
///
/// `handle` must be null or a live handle created from a `T`, not aliased
/// for `'a`.
pub unsafe fn deref_mut<'a, T: Opaque>(handle: *mut Handle) -> Result<&'a mut T, BindError> {
    let value = unsafe { value_ptr::<T>(handle) };
    if value.is_null() {
        return Err(BindError::NullHandle { type_name: T::NAME });
    }
    Ok(unsafe { &mut *value })
}

/// Move the value out of a handle, leaving `T::default()` in its place.
///
/// The handle stays live and must still be released.
///
/// # Safety
///
/// Same as [`deref_mut`].
pub unsafe fn take<T: Opaque + Default>(handle: *mut Handle) -> Result<T, BindError> {
    let value = unsafe { deref_mut::<T>(handle) }?;
    Ok(mem::take(value))
}

/// Destroy the value behind a handle and free its storage.
///
/// Null is a no-op.
///
/// # Safety
///
/// `handle` must be null or a live handle; it is dangling afterwards.
pub unsafe fn release(handle: *mut Handle) {
    if handle.is_null() {
        return;
    }
    let release = unsafe { (*handle).release };
    unsafe { release(handle) };
}

/// Release a handle from foreign code.
///
/// # Safety
///
/// See [`release`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn gen_release(handle: *mut Handle) {
    unsafe { release(handle) }
}

/// A class parameter the callee takes ownership of.
///
/// The handle passed by the caller stays valid and holds `T::default()`
/// after the call.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Taken<T>(pub T);

impl<T> Taken<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for Taken<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> std::ops::DerefMut for Taken<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell as StdCell;
    use std::rc::Rc;

    #[derive(Debug, Default, PartialEq)]
    struct Counter {
        value: i32,
    }

    impl Opaque for Counter {
        const NAME: &'static str = "Counter";
    }

    struct DropProbe(Rc<StdCell<u32>>);

    impl Opaque for DropProbe {
        const NAME: &'static str = "DropProbe";
    }

    impl Drop for DropProbe {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn lifecycle() {
        let handle = into_handle(Counter { value: 1 });
        unsafe {
            assert_eq!(deref::<Counter>(handle).unwrap().value, 1);
            deref_mut::<Counter>(handle).unwrap().value = 5;
            assert_eq!(deref::<Counter>(handle).unwrap().value, 5);
            release(handle);
        }
    }

    #[test]
    fn release_drops_exactly_once() {
        let drops = Rc::new(StdCell::new(0));
        let handle = into_handle(DropProbe(drops.clone()));
        assert_eq!(drops.get(), 0);
        unsafe { gen_release(handle) };
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn null_handles() {
        unsafe {
            release(ptr::null_mut());
            assert!(value_ptr::<Counter>(ptr::null_mut()).is_null());
            assert_eq!(
                deref::<Counter>(ptr::null_mut()).unwrap_err(),
                BindError::NullHandle { type_name: "Counter" }
            );
        }
    }

    #[test]
    fn take_leaves_default() {
        let handle = into_handle(Counter { value: 9 });
        unsafe {
            assert_eq!(take::<Counter>(handle).unwrap(), Counter { value: 9 });
            assert_eq!(deref::<Counter>(handle).unwrap(), &Counter::default());
            release(handle);
        }
    }
}
