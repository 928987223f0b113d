pub mod booking_wizard;
pub mod floating_bar;
pub mod footer;
pub mod hero;
pub mod modal;
pub mod navbar;
pub mod receipt;
pub mod service_grid;
