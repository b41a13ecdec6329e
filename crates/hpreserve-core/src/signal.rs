//! Synchronous interrupt delivery.
//!
//! Instead of running release logic inside a signal handler, the interrupt
//! signal is blocked on the calling thread and later consumed with
//! `sigwait`. Everything after the wait runs as ordinary code.

use std::io;
use std::mem::MaybeUninit;

use log::debug;

/// Something the holder can block on until it is told to stop.
pub trait Interrupt {
    /// Blocks until the interrupt arrives and returns the signal number.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if waiting fails.
    fn wait(&mut self) -> io::Result<libc::c_int>;
}

/// Blocks a set of signals on the current thread and waits for them.
///
/// The signals must be blocked before any other thread is spawned so every
/// thread inherits the mask and the signal stays pending until
/// [`wait()`](Interrupt::wait) consumes it. The previous mask is restored on
/// drop.
pub struct SignalWaiter {
    set: libc::sigset_t,
    old: libc::sigset_t,
}

fn check(rc: libc::c_int) -> io::Result<()> {
    // pthread_* functions return the error number instead of setting errno.
    if rc != 0 {
        return Err(io::Error::from_raw_os_error(rc));
    }
    Ok(())
}

impl SignalWaiter {
    /// Blocks `signals` on the calling thread.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if a signal number is invalid or the mask
    /// cannot be changed.
    pub fn block(signals: &[libc::c_int]) -> io::Result<Self> {
        let mut set = MaybeUninit::<libc::sigset_t>::uninit();
        let mut old = MaybeUninit::<libc::sigset_t>::uninit();
        unsafe {
            if libc::sigemptyset(set.as_mut_ptr()) != 0 {
                return Err(io::Error::last_os_error());
            }
            for &signal in signals {
                if libc::sigaddset(set.as_mut_ptr(), signal) != 0 {
                    return Err(io::Error::last_os_error());
                }
            }
            check(libc::pthread_sigmask(
                libc::SIG_BLOCK,
                set.as_ptr(),
                old.as_mut_ptr(),
            ))?;
            debug!("Blocked signals {:?}", signals);
            Ok(SignalWaiter {
                set: set.assume_init(),
                old: old.assume_init(),
            })
        }
    }

    /// Blocks `SIGINT` on the calling thread.
    ///
    /// # Errors
    ///
    /// See [`block()`](SignalWaiter::block).
    pub fn interrupt() -> io::Result<Self> {
        Self::block(&[libc::SIGINT])
    }
}

impl Interrupt for SignalWaiter {
    fn wait(&mut self) -> io::Result<libc::c_int> {
        let mut signal: libc::c_int = 0;
        loop {
            match check(unsafe { libc::sigwait(&self.set, &mut signal) }) {
                Ok(()) => return Ok(signal),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

impl Drop for SignalWaiter {
    fn drop(&mut self) {
        unsafe { libc::pthread_sigmask(libc::SIG_SETMASK, &self.old, std::ptr::null_mut()) };
    }
}
