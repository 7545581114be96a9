//! HTML template rendering handlers.

mod accounts;
mod category;
mod home;
mod page;
mod profile;
mod restricted;

pub use accounts::{
    login_handler, login_page_handler, logout_handler, register_handler, register_page_handler,
};
pub use category::{
    add_category_handler, add_category_page_handler, like_category_handler,
    search_category_handler, show_category_handler, suggest_category_handler,
};
pub use home::{about_handler, index_handler};
pub use page::{goto_handler, search_add_page_handler};
pub use profile::{
    list_profiles_handler, profile_handler, register_profile_handler,
    register_profile_page_handler, update_profile_handler,
};
pub use restricted::restricted_handler;
