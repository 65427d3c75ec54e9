//! [`Command`] definition.

pub mod authorize_user_session;
pub mod create_inquiry;
pub mod create_property;
pub mod create_user;
pub mod create_user_session;
pub mod delete_property;
pub mod delete_saved_search;
pub mod record_property_view;
pub mod save_search;
pub mod toggle_saved_property;
pub mod update_property;
pub mod update_user_lists;
pub mod update_user_profile;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    authorize_user_session::AuthorizeUserSession,
    create_inquiry::CreateInquiry, create_property::CreateProperty,
    create_user::CreateUser, create_user_session::CreateUserSession,
    delete_property::DeleteProperty, delete_saved_search::DeleteSavedSearch,
    record_property_view::RecordPropertyView, save_search::SaveSearch,
    toggle_saved_property::ToggleSavedProperty,
    update_property::UpdateProperty, update_user_lists::UpdateUserLists,
    update_user_profile::UpdateUserProfile,
};
