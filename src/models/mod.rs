pub mod attendance;
pub mod event;
pub mod feedback;
pub mod registration;
pub mod user;

pub use attendance::{Attendance, AttendanceDetails};
pub use event::{Event, EventDetails};
pub use feedback::{Feedback, FeedbackDetails};
pub use registration::{Registration, RegistrationDetails};
pub use user::{User, UserProfile};
