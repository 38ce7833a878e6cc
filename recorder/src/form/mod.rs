pub mod console;
pub mod sighting_form;
