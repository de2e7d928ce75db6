pub mod admin;
pub mod desk;
pub mod session;
pub mod submission;

pub use admin::{appointment_row, appointment_rows};
pub use desk::BookingDesk;
pub use session::BookingSession;
pub use submission::{AppointmentBook, BookingSubmitter};
