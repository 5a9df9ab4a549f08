pub mod attendance;
pub mod event;
pub mod record;
pub mod requests;
pub mod status;
pub mod student;

pub use attendance::{Attendance, RosterEntry};
pub use event::Event;
pub use record::AttendanceRecord;
pub use requests::{BulkStatusRequest, BulkTargets, EventInput, StatusUpdate, StudentInput};
pub use status::AttendanceStatus;
pub use student::Student;
