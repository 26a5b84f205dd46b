//! Waiting on child processes, optionally with a deadline.

use std::io;
use std::process::Child;
use std::thread;
use std::time::{Duration, Instant};

use super::test_interfaces::RunStatus;

/// How often a bounded wait polls the child.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Wait for `child` to finish.
///
/// Without a timeout this blocks until the child exits. With one, the child is killed once the deadline
/// passes and [`RunStatus::TimedOut`] is returned. A child that exits on its own between the last poll and
/// the kill keeps its real status.
pub fn wait_with_timeout(child: &mut Child, timeout: Option<Duration>) -> io::Result<RunStatus> {
    let Some(limit) = timeout else {
        return child.wait().map(RunStatus::from);
    };

    let deadline = Instant::now() + limit;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(RunStatus::from(status));
        }

        let now = Instant::now();
        if now >= deadline {
            let killed = child.kill();
            let status = child.wait()?;
            return match killed {
                Ok(()) => {
                    tracing::debug!(pid = child.id(), "killed child after {:?}", limit);
                    Ok(RunStatus::TimedOut)
                }
                Err(_) => Ok(RunStatus::from(status)),
            };
        }

        thread::sleep(POLL_INTERVAL.min(deadline - now));
    }
}

#[cfg(all(test, unix))]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::process::Command;

    #[test]
    fn test_unbounded_wait_reports_exit_code() {
        let mut child = Command::new("sh").args(["-c", "exit 3"]).spawn().unwrap();
        assert_eq!(wait_with_timeout(&mut child, None).unwrap(), RunStatus::Exited(3));
    }

    #[test]
    fn test_fast_child_finishes_before_deadline() {
        let mut child = Command::new("sh").args(["-c", "exit 0"]).spawn().unwrap();
        let status = wait_with_timeout(&mut child, Some(Duration::from_secs(10))).unwrap();
        assert_eq!(status, RunStatus::Exited(0));
    }

    #[test]
    fn test_slow_child_is_killed() {
        let mut child = Command::new("sleep").arg("10").spawn().unwrap();
        let started = Instant::now();
        let status = wait_with_timeout(&mut child, Some(Duration::from_millis(100))).unwrap();
        assert_eq!(status, RunStatus::TimedOut);
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
