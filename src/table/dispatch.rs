//! Row action dispatch and dialog commits.
//!
//! [`DataTable::dispatch`] maps `{record, action}` to one of four outcomes:
//! an immediate mutation, a confirmation dialog, a cross-page navigation or a
//! read-only details projection. [`DataTable::submit`] commits the open
//! dialog. Commits are prepared against the unchanged collection first and
//! only then applied, so a failed commit leaves nothing half-done.

use super::dialog::{PendingAction, PendingKind};
use super::DataTable;
use crate::domain::error::{Result, ZadminError};
use crate::domain::form::{FieldRule, Form};
use crate::domain::page::NavTarget;
use crate::domain::record::{ActionKind, Record, RecordId};

/// Read-only projection of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsView {
    pub title: String,
    pub rows: Vec<(String, String)>,
}

/// Outcome of a row action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The collection changed immediately.
    Mutated { message: String },
    /// A dialog was opened for the pending action.
    Confirm(PendingAction),
    /// Hand off to another page.
    Navigate(NavTarget),
    /// Show a details overlay.
    Inform(DetailsView),
    /// The record type does not offer this action, or it does not apply to
    /// the record's current state.
    Unsupported,
}

/// A change applied to the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change<R> {
    Replaced { before: R, after: R },
    Removed(Vec<R>),
    Inserted(R),
}

/// A committed dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied<R> {
    /// Notice text for the user.
    pub message: String,
    pub change: Change<R>,
}

/// Outcome of [`DataTable::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted<R> {
    /// The table applied the change itself.
    Applied(Applied<R>),
    /// The form is valid and the dialog closed, but the action belongs to the
    /// application layer (plan assignment, date filter).
    External(PendingAction),
}

/// A validated, not yet applied collection change.
enum Mutation<R> {
    Replace(R),
    Remove(Vec<RecordId>),
    Insert(R),
}

enum Prepared<R> {
    Mutation { mutation: Mutation<R>, message: String },
    External(PendingAction),
}

impl<R: Record> DataTable<R> {
    /// Runs row action `kind` on record `id`.
    ///
    /// # Errors
    ///
    /// - [`ZadminError::NotFound`] when `id` is not in the collection
    /// - [`ZadminError::DialogBusy`] when the action needs a dialog and one is
    ///   already open
    pub fn dispatch(&mut self, id: RecordId, kind: ActionKind) -> Result<Dispatch> {
        let _span = tracing::debug_span!("dispatch", kind = R::KIND, record_id = id, action = ?kind)
            .entered();

        let record = self.get(id).ok_or(ZadminError::NotFound { id })?;
        if !R::actions().contains(&kind) {
            return Ok(Dispatch::Unsupported);
        }
        let label = record.label();

        let pending = match kind {
            ActionKind::View => {
                return Ok(record
                    .view_target()
                    .map_or(Dispatch::Unsupported, Dispatch::Navigate));
            }
            ActionKind::Details => {
                return Ok(Dispatch::Inform(DetailsView {
                    title: label,
                    rows: record
                        .details()
                        .into_iter()
                        .map(|(k, v)| (k.to_string(), v))
                        .collect(),
                }));
            }
            ActionKind::ToggleStatus => {
                let Some(after) = record.transition(kind) else {
                    return Ok(Dispatch::Unsupported);
                };
                self.apply(Mutation::Replace(after));
                tracing::debug!("status toggled");
                return Ok(Dispatch::Mutated {
                    message: format!("{label} status updated"),
                });
            }
            ActionKind::Deactivate | ActionKind::Send => {
                if record.transition(kind).is_none() {
                    return Ok(Dispatch::Unsupported);
                }
                let verb = if kind == ActionKind::Send { "Send" } else { "Deactivate" };
                let form = Form::new(format!("{verb} {label}?"))
                    .message(format!("Press Enter to {} this {}", verb.to_lowercase(), R::KIND));
                let pending_kind = if kind == ActionKind::Send {
                    PendingKind::Send
                } else {
                    PendingKind::Deactivate
                };
                PendingAction::new(pending_kind, Some(id), form)
            }
            ActionKind::Delete => {
                let form = Form::new(format!("Delete {label}"))
                    .message(format!("This {} will be removed", R::KIND))
                    .field("reason", "Reason", FieldRule::Required, "");
                PendingAction::new(PendingKind::Delete, Some(id), form)
            }
            ActionKind::Edit => {
                let Some(form) = record.edit_form() else {
                    return Ok(Dispatch::Unsupported);
                };
                let form = self.with_choices(form);
                PendingAction::new(PendingKind::Edit, Some(id), form)
            }
        };

        self.dialog.open(pending.clone())?;
        Ok(Dispatch::Confirm(pending))
    }

    /// Validates and commits the open dialog.
    ///
    /// Returns `Ok(None)` when no dialog is open.
    ///
    /// # Errors
    ///
    /// - [`ZadminError::Validation`] when the form is invalid; the dialog stays
    ///   open and the collection is unchanged
    /// - [`ZadminError::NotFound`] when the target record disappeared; the
    ///   dialog closes
    pub fn submit(&mut self) -> Result<Option<Submitted<R>>> {
        let _span = tracing::debug_span!("submit", kind = R::KIND).entered();

        let records = &self.records;
        let next_id = records.iter().map(Record::id).max().map_or(1, |id| id + 1);
        let Some(prepared) = self
            .dialog
            .submit(|pending| prepare(records, next_id, pending))?
        else {
            return Ok(None);
        };

        match prepared {
            Prepared::Mutation { mutation, message } => {
                let change = self.apply(mutation);
                tracing::debug!(%message, "dialog committed");
                Ok(Some(Submitted::Applied(Applied { message, change })))
            }
            Prepared::External(pending) => Ok(Some(Submitted::External(pending))),
        }
    }

    /// Applies a prepared mutation and restores the table invariants.
    fn apply(&mut self, mutation: Mutation<R>) -> Change<R> {
        let change = match mutation {
            Mutation::Replace(after) => {
                let id = after.id();
                let slot = self.records.iter_mut().find(|r| r.id() == id);
                match slot {
                    Some(slot) => {
                        let before = std::mem::replace(slot, after.clone());
                        Change::Replaced { before, after }
                    }
                    None => Change::Removed(Vec::new()),
                }
            }
            Mutation::Remove(ids) => {
                let (removed, kept): (Vec<R>, Vec<R>) = std::mem::take(&mut self.records)
                    .into_iter()
                    .partition(|r| ids.contains(&r.id()));
                self.records = kept;
                for id in &ids {
                    self.selection.remove(*id);
                }
                Change::Removed(removed)
            }
            Mutation::Insert(record) => {
                self.records.push(record.clone());
                Change::Inserted(record)
            }
        };
        self.sync();
        change
    }
}

fn find<R: Record>(records: &[R], id: Option<RecordId>) -> Result<&R> {
    let id = id.ok_or_else(|| ZadminError::Config("pending action has no record".to_string()))?;
    records
        .iter()
        .find(|r| r.id() == id)
        .ok_or(ZadminError::NotFound { id })
}

fn prepare<R: Record>(
    records: &[R],
    next_id: RecordId,
    pending: &PendingAction,
) -> Result<Prepared<R>> {
    let (mutation, message) = match &pending.kind {
        PendingKind::Delete => {
            let record = find(records, pending.record_id)?;
            (
                Mutation::Remove(vec![record.id()]),
                format!("Deleted {} {}", R::KIND, record.label()),
            )
        }
        PendingKind::BulkDelete(ids) => {
            let present: Vec<RecordId> = ids
                .iter()
                .copied()
                .filter(|id| records.iter().any(|r| r.id() == *id))
                .collect();
            if present.is_empty() {
                return Err(ZadminError::validation(
                    "selection",
                    "The selected records no longer exist",
                ));
            }
            let message = format!("Deleted {} {}s", present.len(), R::KIND);
            (Mutation::Remove(present), message)
        }
        PendingKind::Deactivate | PendingKind::Send => {
            let record = find(records, pending.record_id)?;
            let action = if pending.kind == PendingKind::Send {
                ActionKind::Send
            } else {
                ActionKind::Deactivate
            };
            let after = record.transition(action).ok_or_else(|| {
                ZadminError::validation("status", format!("{} cannot be changed now", record.label()))
            })?;
            let verb = if action == ActionKind::Send { "Sent" } else { "Deactivated" };
            (Mutation::Replace(after), format!("{verb} {}", record.label()))
        }
        PendingKind::Edit => {
            let record = find(records, pending.record_id)?;
            let after = record.apply_form(&pending.form)?;
            let message = format!("Updated {} {}", R::KIND, after.label());
            (Mutation::Replace(after), message)
        }
        PendingKind::Create => {
            let record = R::from_form(next_id, &pending.form)?;
            let message = format!("Created {} {}", R::KIND, record.label());
            (Mutation::Insert(record), message)
        }
        PendingKind::AssignPlan(_) | PendingKind::DateFilter(_) => {
            return Ok(Prepared::External(pending.clone()));
        }
    };
    Ok(Prepared::Mutation { mutation, message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TablePage;
    use crate::domain::{QrCode, QrKind, QrStatus, Role, Transaction, User, UserStatus};
    use crate::domain::{PageKind, PaymentMethod, PaymentStatus};
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn users() -> DataTable<User> {
        let user = |id, name: &str| User {
            id,
            name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            role: Role::Viewer,
            status: UserStatus::Active,
            plan: "Free".into(),
            joined: day(),
        };
        DataTable::new(vec![user(1, "John"), user(2, "Jane"), user(3, "Bob")], 10)
    }

    fn type_into(table: &mut DataTable<User>, text: &str) {
        for c in text.chars() {
            table.dialog_mut().push_char(c);
        }
    }

    #[test]
    fn delete_requires_reason_then_removes_record_and_selection() {
        let mut table = users();
        table.move_cursor(1);
        table.toggle_row();
        assert_eq!(table.selected_ids(), vec![2]);

        let outcome = table.dispatch(2, ActionKind::Delete).unwrap();
        assert!(matches!(outcome, Dispatch::Confirm(_)));

        assert!(matches!(table.submit(), Err(ZadminError::Validation { .. })));
        assert_eq!(table.len(), 3);
        assert!(table.dialog().is_open());

        type_into(&mut table, "duplicate");
        let submitted = table.submit().unwrap().unwrap();
        let Submitted::Applied(applied) = submitted else {
            panic!("delete is committed by the table");
        };
        assert_eq!(applied.message, "Deleted user Jane");
        assert!(table.get(2).is_none());
        assert!(table.selected_ids().is_empty());
        assert!(!table.dialog().is_open());
    }

    #[test]
    fn toggle_status_mutates_without_dialog() {
        let mut table = users();
        let outcome = table.dispatch(1, ActionKind::ToggleStatus).unwrap();
        assert_eq!(
            outcome,
            Dispatch::Mutated {
                message: "John status updated".into()
            }
        );
        assert_eq!(table.get(1).unwrap().status, UserStatus::Suspended);
        assert!(!table.dialog().is_open());
    }

    #[test]
    fn unsupported_and_missing_records() {
        let mut table = users();
        assert_eq!(
            table.dispatch(1, ActionKind::Send).unwrap(),
            Dispatch::Unsupported
        );
        assert!(matches!(
            table.dispatch(42, ActionKind::Delete),
            Err(ZadminError::NotFound { id: 42 })
        ));
    }

    #[test]
    fn second_dialog_is_busy() {
        let mut table = users();
        table.dispatch(1, ActionKind::Delete).unwrap();
        assert!(matches!(
            table.dispatch(2, ActionKind::Edit),
            Err(ZadminError::DialogBusy)
        ));
        assert_eq!(table.dialog().pending().unwrap().record_id, Some(1));
    }

    #[test]
    fn record_deleted_while_confirming_closes_dialog() {
        let mut table = users();
        table.dispatch(3, ActionKind::Delete).unwrap();
        type_into(&mut table, "spam");
        table.records.retain(|u| u.id != 3);

        assert!(matches!(table.submit(), Err(ZadminError::NotFound { id: 3 })));
        assert!(!table.dialog().is_open());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn edit_reports_before_and_after() {
        let mut table = users();
        table.dispatch(3, ActionKind::Edit).unwrap();
        type_into(&mut table, "by");

        let Some(Submitted::Applied(applied)) = table.submit().unwrap() else {
            panic!("edit is committed by the table");
        };
        let Change::Replaced { before, after } = applied.change else {
            panic!("edit replaces the record");
        };
        assert_eq!(before.name, "Bob");
        assert_eq!(after.name, "Bobby");
        assert_eq!(table.get(3).unwrap().name, "Bobby");
    }

    #[test]
    fn navigation_and_details() {
        let mut payments = DataTable::new(
            vec![Transaction {
                id: 1,
                user_email: "jane@example.com".into(),
                amount: 999,
                method: PaymentMethod::Card,
                status: PaymentStatus::Paid,
                date: day(),
            }],
            10,
        );
        assert_eq!(
            payments.dispatch(1, ActionKind::View).unwrap(),
            Dispatch::Navigate(NavTarget::new(PageKind::Users, "jane@example.com"))
        );
        let Dispatch::Inform(details) = payments.dispatch(1, ActionKind::Details).unwrap() else {
            panic!("details is informational");
        };
        assert_eq!(details.title, "INV-0001");
        assert!(details.rows.contains(&("Amount".to_string(), "$9.99".to_string())));
    }

    #[test]
    fn deactivate_confirms_then_applies() {
        let mut codes = DataTable::new(
            vec![QrCode {
                id: 5,
                label: "Flyer".into(),
                owner: "bob@example.com".into(),
                kind: QrKind::Static,
                status: QrStatus::Active,
                scans: 10,
                unique_scans: 4,
                created: day(),
            }],
            10,
        );
        assert!(matches!(
            codes.dispatch(5, ActionKind::Deactivate).unwrap(),
            Dispatch::Confirm(_)
        ));
        codes.submit().unwrap();
        assert_eq!(codes.get(5).unwrap().status, QrStatus::Inactive);
        assert_eq!(
            codes.dispatch(5, ActionKind::Deactivate).unwrap(),
            Dispatch::Unsupported
        );
    }
}
