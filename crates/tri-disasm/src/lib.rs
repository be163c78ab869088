pub mod listing;
pub mod model;

// Re-export commonly used types/functions for consumers
pub use listing::{render_text, Listing, ListingLine};
pub use model::{load_hex_image, parse_hex_image, Image};
