pub mod bill;
pub mod booking;
pub mod doctor;
pub mod drug;
pub mod hospital;
pub mod patient;
pub mod treatment;

pub use bill::{Bill, BillDraft, BillItem, BillItemKind};
pub use booking::{Booking, BookingStatus};
pub use doctor::Doctor;
pub use drug::Drug;
pub use hospital::Hospital;
pub use patient::Patient;
pub use treatment::Treatment;
