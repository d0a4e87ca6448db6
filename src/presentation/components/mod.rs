mod draft;
mod footer;
mod layout;
mod list;
mod popup;

pub use draft::render_draft;
pub use footer::render_footer;
pub use list::render_list;
pub use popup::render_popup;
