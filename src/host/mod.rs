//! Host context: who is running dcx and from where
//!
//! Both lookups happen before anything is created in the runtime, so a
//! failure here needs no cleanup.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::{DcxError, Result};

/// Working directory and login name of the invoking user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostContext {
    pub working_directory: PathBuf,
    pub user_name: String,
}

impl HostContext {
    /// Resolve the absolute working directory and the current login name.
    pub fn resolve() -> Result<Self> {
        let working_directory = std::env::current_dir().map_err(DcxError::WorkingDirectory)?;
        let user_name = current_user_name()?;
        Ok(Self {
            working_directory,
            user_name,
        })
    }
}

#[cfg(unix)]
fn current_user_name() -> Result<String> {
    use std::ffi::CStr;

    // SAFETY: geteuid never fails and has no side effects.
    let uid = unsafe { libc::geteuid() };

    let mut buf = vec![0 as libc::c_char; 1024];
    loop {
        // SAFETY: passwd is plain data; getpwuid_r writes into it and `buf` only.
        let mut pwd: libc::passwd = unsafe { std::mem::zeroed() };
        let mut result: *mut libc::passwd = std::ptr::null_mut();
        let rc = unsafe {
            libc::getpwuid_r(uid, &mut pwd, buf.as_mut_ptr(), buf.len(), &mut result)
        };

        if rc == libc::ERANGE && buf.len() < 1 << 20 {
            buf.resize(buf.len() * 2, 0);
            continue;
        }
        if rc != 0 {
            return Err(DcxError::UserLookup(
                std::io::Error::from_raw_os_error(rc).to_string(),
            ));
        }
        if result.is_null() || pwd.pw_name.is_null() {
            return Err(DcxError::UserLookup(format!("unknown userid {}", uid)));
        }

        // SAFETY: on success pw_name points into `buf` and is NUL-terminated.
        let name = unsafe { CStr::from_ptr(pwd.pw_name) };
        return Ok(name.to_string_lossy().into_owned());
    }
}

#[cfg(not(unix))]
fn current_user_name() -> Result<String> {
    std::env::var("USERNAME")
        .or_else(|_| std::env::var("USER"))
        .map_err(|e| DcxError::UserLookup(e.to_string()))
}
