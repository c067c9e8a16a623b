//! Error reporting at the exported boundary.
//!
//! Exported functions cannot return a `Result`. When conversion fails the
//! generated function calls [`complete`], which logs the error, stores its
//! message in a thread-local slot, and returns the zero value of the mapped
//! return type. Foreign callers read the message through `gen_last_error()`;
//! Rust callers through [`last_error`]. A successful call clears the slot.

use std::cell::RefCell;
use std::ffi::{CString, c_char};
use std::ptr;

use crate::error::BindError;
use crate::param::ForeignReturn;

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn store(message: Option<String>) {
    let message = message.map(|message| {
        // Interior NULs cannot be represented in a C string.
        CString::new(message.replace('\0', " ")).unwrap_or_default()
    });
    LAST_ERROR.with_borrow_mut(|slot| *slot = message);
}

/// Finish an exported call: unwrap the converted result or record the error.
pub fn complete<R: ForeignReturn>(export: &str, result: Result<R::Foreign, BindError>) -> R::Foreign {
    match result {
        Ok(value) => {
            store(None);
            value
        }
        Err(err) => {
            log::error!("{export}: {err}");
            store(Some(format!("{export}: {err}")));
            R::error_value()
        }
    }
}

/// The last boundary error of the calling thread.
pub fn last_error() -> Option<String> {
    LAST_ERROR.with_borrow(|slot| slot.as_ref().map(|message| message.to_string_lossy().into_owned()))
}

/// Clear the calling thread's last error.
pub fn clear_last_error() {
    store(None);
}

/// The last boundary error of the calling thread, or null.
///
/// The string stays valid until the next exported call on the same thread.
#[unsafe(no_mangle)]
pub extern "C" fn gen_last_error() -> *const c_char {
    LAST_ERROR.with_borrow(|slot| slot.as_ref().map_or(ptr::null(), |message| message.as_ptr()))
}

#[cfg(test)]
mod tests {
    use std::ffi::CStr;

    use super::*;

    #[test]
    fn error_is_recorded_and_cleared() {
        let value = complete::<i32>("scale", Err(BindError::NullDescriptor));
        assert_eq!(value, 0);
        assert_eq!(last_error().as_deref(), Some("scale: null array descriptor"));

        let message = unsafe { CStr::from_ptr(gen_last_error()) };
        assert_eq!(message.to_str(), Ok("scale: null array descriptor"));

        assert!(complete::<bool>("flag", Ok(true)));
        assert_eq!(last_error(), None);
        assert!(gen_last_error().is_null());
    }

    #[test]
    fn slot_is_per_thread() {
        complete::<()>("here", Err(BindError::custom("boom")));
        let other = std::thread::spawn(last_error).join().unwrap();
        assert_eq!(other, None);
        assert_eq!(last_error().as_deref(), Some("here: boom"));
        clear_last_error();
    }
}
