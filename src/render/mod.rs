pub mod html;
pub mod stars;

pub use html::render_page;
pub use stars::rating_to_stars;
