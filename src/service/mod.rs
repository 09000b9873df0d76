//! Services: generic CRUD plus the two fixed statements behind login and booking.

mod booking;
mod credentials;
mod crud;
mod validation;
pub use booking::{BookingForm, BookingService, INITIAL_STATUS};
pub use credentials::{AdminIdentity, CredentialService};
pub use crud::CrudService;
pub use validation::{scalar_string, RequestValidator};
