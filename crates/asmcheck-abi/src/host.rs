//! Host libc bindings used as the reference side of the differential.
//!
//! String and I/O references are the platform libc itself, reached through
//! thin `extern "C"` wrappers so their addresses fit the registry slots.
//! The conversion reference is the in-crate oracle wrapped to the C calling
//! convention, since no libc exports `atoi_base`.

use std::ffi::{CStr, c_char, c_int, c_void};

// ---------------------------------------------------------------------------
// errno
// ---------------------------------------------------------------------------

#[cfg(target_os = "linux")]
fn errno_location() -> *mut c_int {
    unsafe { libc::__errno_location() }
}

#[cfg(target_os = "macos")]
fn errno_location() -> *mut c_int {
    unsafe { libc::__error() }
}

/// Current thread's errno value.
#[must_use]
pub fn errno() -> c_int {
    unsafe { *errno_location() }
}

/// Resets the current thread's errno to zero.
pub fn clear_errno() {
    unsafe { *errno_location() = 0 };
}

/// Runs `f` with errno cleared and returns its result paired with the
/// errno value observed afterwards.
pub fn with_errno<T>(f: impl FnOnce() -> T) -> (T, c_int) {
    clear_errno();
    let value = f();
    (value, errno())
}

// ---------------------------------------------------------------------------
// Host references
// ---------------------------------------------------------------------------

/// Host `strlen`.
///
/// # Safety
///
/// `s` must be a valid NUL-terminated string.
pub unsafe extern "C" fn host_strlen(s: *const c_char) -> usize {
    unsafe { libc::strlen(s) }
}

/// Host `strcpy`.
///
/// # Safety
///
/// `src` must be a valid NUL-terminated string and `dst` writable for its
/// length plus the terminator.
pub unsafe extern "C" fn host_strcpy(dst: *mut c_char, src: *const c_char) -> *mut c_char {
    unsafe { libc::strcpy(dst, src) }
}

/// Host `strcmp`.
///
/// # Safety
///
/// Both arguments must be valid NUL-terminated strings.
pub unsafe extern "C" fn host_strcmp(a: *const c_char, b: *const c_char) -> c_int {
    unsafe { libc::strcmp(a, b) }
}

/// Host `write`.
///
/// # Safety
///
/// `buf` must be readable for `count` bytes when `count` is nonzero.
pub unsafe extern "C" fn host_write(fd: c_int, buf: *const c_void, count: usize) -> isize {
    unsafe { libc::write(fd, buf, count) }
}

/// Host `read`.
///
/// # Safety
///
/// `buf` must be writable for `count` bytes when `count` is nonzero.
pub unsafe extern "C" fn host_read(fd: c_int, buf: *mut c_void, count: usize) -> isize {
    unsafe { libc::read(fd, buf, count) }
}

/// Host `strdup`.
///
/// # Safety
///
/// `s` must be a valid NUL-terminated string; the caller owns the returned
/// allocation and frees it with libc's `free`.
pub unsafe extern "C" fn host_strdup(s: *const c_char) -> *mut c_char {
    unsafe { libc::strdup(s) }
}

/// Reference `atoi_base`: the conversion oracle behind a C signature.
///
/// A null string or base yields 0 rather than a fault, matching the
/// null-tolerance the grading contract assigns to the reference side.
///
/// # Safety
///
/// Non-null arguments must be valid NUL-terminated strings.
pub unsafe extern "C" fn ref_atoi_base(s: *const c_char, base: *const c_char) -> c_int {
    if s.is_null() || base.is_null() {
        return 0;
    }
    let s = unsafe { CStr::from_ptr(s) };
    let base = unsafe { CStr::from_ptr(base) };
    asmcheck_core::convert::atoi_base(s.to_bytes(), base.to_bytes())
}

// ---------------------------------------------------------------------------
// File descriptor redirection
// ---------------------------------------------------------------------------

/// RAII redirection of one file descriptor onto another.
///
/// While the guard lives, `target` is a duplicate of `replacement`; dropping
/// the guard restores the original descriptor. Used to capture writes to
/// stdout in a scratch file.
pub struct FdRedirect {
    target: c_int,
    saved: c_int,
}

impl FdRedirect {
    /// Points `target` at `replacement` until the guard is dropped.
    pub fn install(target: c_int, replacement: c_int) -> std::io::Result<Self> {
        let saved = unsafe { libc::dup(target) };
        if saved < 0 {
            return Err(std::io::Error::last_os_error());
        }
        if unsafe { libc::dup2(replacement, target) } < 0 {
            let err = std::io::Error::last_os_error();
            unsafe { libc::close(saved) };
            return Err(err);
        }
        Ok(Self { target, saved })
    }
}

impl Drop for FdRedirect {
    fn drop(&mut self) {
        unsafe {
            libc::dup2(self.saved, self.target);
            libc::close(self.saved);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_strlen_matches_byte_length() {
        let s = c"Hello World";
        assert_eq!(unsafe { host_strlen(s.as_ptr()) }, 11);
    }

    #[test]
    fn test_host_strcpy_copies_and_returns_dst() {
        let src = c"copied";
        let mut dst: [c_char; 32] = [0; 32];
        let ret = unsafe { host_strcpy(dst.as_mut_ptr(), src.as_ptr()) };
        assert_eq!(ret, dst.as_mut_ptr());
        let copied = unsafe { CStr::from_ptr(dst.as_ptr()) };
        assert_eq!(copied, src);
    }

    #[test]
    fn test_host_strdup_allocates_fresh_copy() {
        let s = c"dup me";
        let dup = unsafe { host_strdup(s.as_ptr()) };
        assert!(!dup.is_null());
        assert_ne!(dup.cast_const(), s.as_ptr());
        assert_eq!(unsafe { CStr::from_ptr(dup) }, s);
        unsafe { libc::free(dup.cast()) };
    }

    #[test]
    fn test_ref_atoi_base_handles_null_and_values() {
        assert_eq!(unsafe { ref_atoi_base(std::ptr::null(), c"01".as_ptr()) }, 0);
        assert_eq!(unsafe { ref_atoi_base(c"42".as_ptr(), std::ptr::null()) }, 0);
        assert_eq!(unsafe { ref_atoi_base(c"101".as_ptr(), c"01".as_ptr()) }, 5);
        assert_eq!(
            unsafe { ref_atoi_base(c"-ff".as_ptr(), c"0123456789abcdef".as_ptr()) },
            -255
        );
    }

    #[test]
    fn test_with_errno_observes_failures() {
        let (ret, err) = with_errno(|| unsafe {
            host_write(-1, b"x".as_ptr().cast(), 1)
        });
        assert_eq!(ret, -1);
        assert_eq!(err, libc::EBADF);
    }

    #[test]
    fn test_fd_redirect_restores_on_drop() {
        use std::io::{Read, Seek};
        use std::os::unix::io::AsRawFd;

        let mut original = tempfile_in_scratch("orig");
        let mut capture = tempfile_in_scratch("capture");
        let target = original.as_raw_fd();
        {
            let _guard =
                FdRedirect::install(target, capture.as_raw_fd()).expect("install redirect");
            let msg = b"redirected";
            let wrote = unsafe { host_write(target, msg.as_ptr().cast(), msg.len()) };
            assert_eq!(wrote, msg.len() as isize);
        }
        let msg = b"restored";
        let wrote = unsafe { host_write(target, msg.as_ptr().cast(), msg.len()) };
        assert_eq!(wrote, msg.len() as isize);

        let mut contents = String::new();
        capture.rewind().expect("rewind capture");
        capture.read_to_string(&mut contents).expect("read capture");
        assert_eq!(contents, "redirected");

        contents.clear();
        original.rewind().expect("rewind original");
        original.read_to_string(&mut contents).expect("read original");
        assert_eq!(contents, "restored");
    }

    fn tempfile_in_scratch(tag: &str) -> std::fs::File {
        let path = std::env::temp_dir().join(format!(
            "asmcheck-host-test-{tag}-{}",
            std::process::id()
        ));
        let file = std::fs::OpenOptions::new()
            .create(true)
            .truncate(true)
            .read(true)
            .write(true)
            .open(&path)
            .expect("open scratch file");
        let _ = std::fs::remove_file(&path);
        file
    }
}
