//! Operator alarm.
//!
//! Renders a [`PenError`] on the controller display, flashes the status
//! light red and plays the alarm sound.  The report has three rows:
//!
//! ```text
//! 1  ERROR: Pen.moveTo
//! 2  Invalid Parameters
//! 3  location 300 outside 0-285
//! ```
//!
//! The pen has already stopped its motors by the time an error reaches the
//! alarm; raising it does not resume anything.

use log::error;

use crate::app::ports::{AlarmPort, StatusLight};
use crate::error::{MAX_MESSAGE_LEN, PenError, push_truncated, write_truncated};

/// Width of the first display row: `"ERROR: "` plus the function name.
const HEADER_LEN: usize = 48;

/// The three display rows of an alarm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmReport {
    pub header: heapless::String<HEADER_LEN>,
    pub reason: &'static str,
    pub message: heapless::String<MAX_MESSAGE_LEN>,
}

impl From<&PenError> for AlarmReport {
    fn from(err: &PenError) -> Self {
        let mut header = heapless::String::new();
        // Overlong function names are cut off at the display width.
        write_truncated(&mut header, format_args!("ERROR: {}", err.function()));

        let mut message = heapless::String::new();
        push_truncated(&mut message, err.message());

        Self {
            header,
            reason: err.reason().as_str(),
            message,
        }
    }
}

/// Raise the alarm for `err` on `port`.  Returns the rendered report.
pub fn raise(port: &mut impl AlarmPort, err: &PenError) -> AlarmReport {
    error!("ALARM | {err}");
    let report = AlarmReport::from(err);

    port.clear_screen();
    port.set_status_light(StatusLight::RedFlash);

    port.show_line(&report.header, 1);
    port.show_line(report.reason, 2);
    port.show_line(&report.message, 3);

    port.play_alarm_sound();
    report
}
