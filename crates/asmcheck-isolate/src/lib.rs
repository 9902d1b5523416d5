//! # asmcheck-isolate
//!
//! Fault isolation for undefined-behavior probes.
//!
//! [`run_isolated`] executes a probe closure in a forked child process so a
//! real fault (NULL dereference, heap overrun) cannot take down the caller.
//! The parent polls for the child's termination under a deadline and
//! classifies the result as a normal exit, a fatal-signal death, or a
//! timeout. Children killed by the deadline are reaped before returning.
//!
//! Only fork-capable Unix targets are supported. On other platforms
//! [`run_isolated`] returns [`IsolateError::Unsupported`]; a port would
//! substitute a supervised subprocess and accept that exact signal fidelity
//! may differ.

use std::time::Duration;

use thiserror::Error;

/// Classified fatal signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    /// SIGSEGV.
    Segv,
    /// SIGABRT.
    Abort,
    /// Any other fatal signal, by number.
    Other(i32),
}

impl SignalKind {
    #[must_use]
    pub fn from_raw(signal: i32) -> Self {
        match signal {
            libc::SIGSEGV => SignalKind::Segv,
            libc::SIGABRT => SignalKind::Abort,
            other => SignalKind::Other(other),
        }
    }
}

impl std::fmt::Display for SignalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalKind::Segv => f.write_str("SIGSEGV"),
            SignalKind::Abort => f.write_str("SIGABRT"),
            SignalKind::Other(n) => write!(f, "signal {n}"),
        }
    }
}

/// Terminal state of an isolated probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// The child called `_exit`; the code is informational only.
    ExitedNormally { exit_code: i32 },
    /// The child was killed by a fatal signal.
    KilledBySignal { kind: SignalKind },
    /// The child outlived the deadline and was killed by the parent.
    /// Counts as not-crashed; callers surface it as an anomaly.
    TimedOut,
}

impl ExecutionOutcome {
    /// Coarse crash classification: any fatal signal counts.
    #[must_use]
    pub fn crashed(&self) -> bool {
        matches!(self, ExecutionOutcome::KilledBySignal { .. })
    }

    /// True only for a SIGSEGV death.
    #[must_use]
    pub fn segfaulted(&self) -> bool {
        matches!(
            self,
            ExecutionOutcome::KilledBySignal {
                kind: SignalKind::Segv
            }
        )
    }

    #[must_use]
    pub fn timed_out(&self) -> bool {
        matches!(self, ExecutionOutcome::TimedOut)
    }
}

impl std::fmt::Display for ExecutionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionOutcome::ExitedNormally { exit_code } => {
                write!(f, "exited normally (code {exit_code})")
            }
            ExecutionOutcome::KilledBySignal { kind } => write!(f, "killed by {kind}"),
            ExecutionOutcome::TimedOut => f.write_str("timed out"),
        }
    }
}

/// Failure to establish or observe isolation. Distinct from a probe crash.
#[derive(Debug, Error)]
pub enum IsolateError {
    #[error("fork failed: {0}")]
    Fork(#[source] std::io::Error),
    #[error("waitpid failed: {0}")]
    Wait(#[source] std::io::Error),
    #[error("fault isolation is not supported on this platform")]
    Unsupported,
}

/// Child-poll granularity while waiting under the deadline.
const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Runs `probe` in a forked child and classifies its termination.
///
/// The child executes the probe, then `_exit(0)`s; a panic inside the probe
/// is caught so unwinding can never continue into parent frames in the
/// child's copy of the address space. The parent never blocks past
/// `timeout`: a straggler child is SIGKILLed and reaped, yielding
/// [`ExecutionOutcome::TimedOut`].
#[cfg(unix)]
pub fn run_isolated<F>(timeout: Duration, probe: F) -> Result<ExecutionOutcome, IsolateError>
where
    F: FnOnce(),
{
    use std::time::Instant;

    let pid = unsafe { libc::fork() };
    if pid < 0 {
        return Err(IsolateError::Fork(std::io::Error::last_os_error()));
    }

    if pid == 0 {
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(probe));
        unsafe { libc::_exit(0) };
    }

    let deadline = Instant::now() + timeout;
    loop {
        let mut status: libc::c_int = 0;
        let rc = unsafe { libc::waitpid(pid, &mut status, libc::WNOHANG) };
        if rc == pid {
            return Ok(classify_status(status));
        }
        if rc == -1 {
            let err = std::io::Error::last_os_error();
            if err.raw_os_error() == Some(libc::EINTR) {
                continue;
            }
            return Err(IsolateError::Wait(err));
        }

        if Instant::now() >= deadline {
            unsafe { libc::kill(pid, libc::SIGKILL) };
            reap_blocking(pid)?;
            return Ok(ExecutionOutcome::TimedOut);
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

#[cfg(not(unix))]
pub fn run_isolated<F>(_timeout: Duration, _probe: F) -> Result<ExecutionOutcome, IsolateError>
where
    F: FnOnce(),
{
    Err(IsolateError::Unsupported)
}

#[cfg(unix)]
fn classify_status(status: libc::c_int) -> ExecutionOutcome {
    if libc::WIFSIGNALED(status) {
        ExecutionOutcome::KilledBySignal {
            kind: SignalKind::from_raw(libc::WTERMSIG(status)),
        }
    } else {
        ExecutionOutcome::ExitedNormally {
            exit_code: libc::WEXITSTATUS(status),
        }
    }
}

#[cfg(unix)]
fn reap_blocking(pid: libc::pid_t) -> Result<(), IsolateError> {
    loop {
        let mut status: libc::c_int = 0;
        let rc = unsafe { libc::waitpid(pid, &mut status, 0) };
        if rc == pid {
            return Ok(());
        }
        if rc == -1 {
            let err = std::io::Error::last_os_error();
            if err.raw_os_error() == Some(libc::EINTR) {
                continue;
            }
            return Err(IsolateError::Wait(err));
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
