//! Request/response records for every resource the mobile app syncs.
//!
//! All entities are plain serde records keyed by an application-assigned
//! integer `id` plus the `user_id` that owns them (`Setting` is one-per-user
//! and keyed by `user_id` alone). The document store's native id is never
//! carried on the entity.

pub mod appointment;
pub mod contact;
pub mod frequency;
pub mod medication;
pub mod notification;
pub mod setting;
pub mod user;

pub use appointment::Appointment;
pub use contact::EmergencyContact;
pub use frequency::Frequency;
pub use medication::Medication;
pub use notification::Notification;
pub use setting::Setting;
pub use user::User;

use serde::Serialize;

/// A document-store resource scoped to one user.
///
/// Drives the generic reconciler: collection name, message label, and the
/// logical key `(user_id, id)`, or `user_id` alone when `logical_id` is
/// `None`.
pub trait Resource: Serialize {
    const COLLECTION: &'static str;
    /// Label used in response messages ("Medication updated successfully!").
    const LABEL: &'static str;

    fn user_id(&self) -> &str;
    /// Application-assigned id; `None` for singleton-per-user resources.
    fn logical_id(&self) -> Option<i64>;
}
