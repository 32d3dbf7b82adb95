//! Domain layer for the zadmin console.
//!
//! This module contains the record types shown by the console pages and the
//! form model used by dialogs, independent of Zellij-specific APIs. The table
//! engine in [`crate::table`] is generic over the [`Record`] trait defined here.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`record`]: The `Record` trait, columns, filters and row actions
//! - [`form`]: Dialog forms and field rules
//! - [`page`]: Console pages and navigation targets
//! - [`user`], [`transaction`], [`qr_code`], [`plan`], [`notification`],
//!   [`plan_change`]: Concrete records
//!
//! # Examples
//!
//! ```
//! use zadmin::domain::{Form, FieldRule, Result};
//!
//! fn reason_form() -> Result<Form> {
//!     let form = Form::new("Delete user")
//!         .field("reason", "Reason", FieldRule::Required, "spam account");
//!     form.validate()?;
//!     Ok(form)
//! }
//! # assert!(reason_form().is_ok());
//! ```

pub mod error;
pub mod form;
pub mod notification;
pub mod page;
pub mod plan;
pub mod plan_change;
pub mod qr_code;
pub mod record;
pub mod transaction;
pub mod user;

pub use error::{Result, ZadminError};
pub use form::{FieldRule, Form, FormField};
pub use notification::{Audience, Channel, DeliveryStatus, Notification};
pub use page::{NavTarget, PageKind};
pub use plan::{BillingCycle, Plan, PlanDiff, PlanStatus};
pub use plan_change::PlanChange;
pub use qr_code::{QrCode, QrKind, QrStatus};
pub use record::{
    ActionKind, Column, FieldValue, FilterKind, FilterSpec, Record, RecordId, SEARCH_FILTER,
};
pub use transaction::{PaymentMethod, PaymentStatus, Transaction};
pub use user::{Role, User, UserStatus, PLAN_NAMES};
