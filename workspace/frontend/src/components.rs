pub mod layout;
pub mod top_locations;
pub mod travel_mode;
pub mod updates;
