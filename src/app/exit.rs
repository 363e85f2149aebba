//! Exit code policy for `--fail-on`.

use crate::check::ServiceReport;
use crate::config::FailOn;

/// Exit code when a report was produced and the policy is satisfied.
pub const EXIT_OK: i32 = 0;
/// Exit code for startup errors (bad arguments, client build failure).
pub const EXIT_STARTUP_ERROR: i32 = 1;
/// Exit code when `--fail-on any-failure` is set and an entry failed.
pub const EXIT_CHECK_FAILED: i32 = 2;

/// Maps a completed report to a process exit code.
pub fn evaluate_exit_code(fail_on: &FailOn, report: &ServiceReport) -> i32 {
    match fail_on {
        FailOn::Never => EXIT_OK,
        FailOn::AnyFailure => {
            if report.passed() {
                EXIT_OK
            } else {
                EXIT_CHECK_FAILED
            }
        }
    }
}
