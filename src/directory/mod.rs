mod cleaning;

pub use cleaning::delete_and_create_output;
