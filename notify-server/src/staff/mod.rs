//! Staff lifecycle: create, update, activation toggle, removal and push-token
//! registration, keeping the identity store, the staff documents and table
//! assignments consistent.

pub mod cascade;
pub mod commands;

pub use cascade::StaffCascadeManager;
pub use commands::{
    CreateStaff, CreateStaffCommand, PushTokenCommand, RemoveStaffCommand, SetActiveCommand,
    UpdateStaff, UpdateStaffCommand,
};
