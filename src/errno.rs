//! Platform error-code classification.
//!
//! Maps an `errno` value to a classified [`Status`]. Used by the file
//! endpoints wherever the OS surfaces a failure; the message keeps both the
//! caller-supplied context and the OS error text.

use std::io;

use crate::status::{Status, StatusCode};

/// Converts an errno value and a context message to a [`Status`].
///
/// Values without a specific mapping classify as [`StatusCode::Unknown`].
pub fn errno_to_status(error_number: i32, message: &str) -> Status {
    let code = errno_to_code(error_number);
    let os = io::Error::from_raw_os_error(error_number);
    Status::new(code, format!("{message}: {os}"))
}

fn errno_to_code(error_number: i32) -> StatusCode {
    match error_number {
        libc::EINVAL | libc::ENAMETOOLONG | libc::E2BIG | libc::EDESTADDRREQ | libc::EDOM
        | libc::EFAULT | libc::EILSEQ | libc::ENOPROTOOPT | libc::ENOTSOCK | libc::ENOTTY
        | libc::EPROTOTYPE | libc::ESPIPE => StatusCode::InvalidArgument,
        libc::ETIMEDOUT => StatusCode::DeadlineExceeded,
        libc::ENODEV | libc::ENOENT | libc::ENXIO | libc::ESRCH => StatusCode::NotFound,
        libc::EEXIST | libc::EADDRINUSE => StatusCode::AlreadyExists,
        libc::EACCES | libc::EPERM | libc::EROFS => StatusCode::PermissionDenied,
        libc::EMFILE | libc::ENFILE | libc::ENOBUFS | libc::ENOMEM | libc::ENOSPC
        | libc::EMLINK => StatusCode::ResourceExhausted,
        libc::EBADF | libc::EBUSY | libc::ECHILD | libc::EISDIR | libc::ENOTDIR
        | libc::ENOTEMPTY | libc::ETXTBSY => StatusCode::FailedPrecondition,
        libc::EPIPE | libc::ECONNABORTED | libc::ECONNRESET | libc::EDEADLK => StatusCode::Aborted,
        libc::ERANGE | libc::EFBIG | libc::EOVERFLOW => StatusCode::OutOfRange,
        libc::ENOSYS | libc::EOPNOTSUPP => StatusCode::Unimplemented,
        libc::EAGAIN | libc::EINTR | libc::ECONNREFUSED | libc::EHOSTUNREACH
        | libc::ENETDOWN | libc::ENETUNREACH => StatusCode::Unavailable,
        _ => StatusCode::Unknown,
    }
}
