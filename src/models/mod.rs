pub mod guestbook;
pub mod rsvp;

pub use guestbook::{
    ContactMessage, ContactSubmission, GuestbookEntry, GuestbookSubmission, MAX_MESSAGE_CHARS,
};
pub use rsvp::{
    AttendanceCode, FieldValue, RsvpRecord, RsvpResponse, RsvpSubmission, ValidationError,
    MAX_GUESTS, MIN_GUESTS,
};
