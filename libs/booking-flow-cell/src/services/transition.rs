use tracing::{debug, warn};

use directory_cell::ReferenceDataProvider;

use crate::error::BookingFlowError;
use crate::models::{BookingEvent, BookingPreset, BookingSelection, BookingStep, ConfirmedBooking};

/// Result of applying one event to a selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub selection: BookingSelection,
    /// Present only when the event was a successful `Confirm`.
    pub confirmed: Option<ConfirmedBooking>,
}

impl Transition {
    fn to(selection: BookingSelection) -> Self {
        Self {
            selection,
            confirmed: None,
        }
    }
}

/// Apply `event` to `current`, returning the next selection.
///
/// Every field change is followed by the same ordered checks:
/// 1. a doctor must belong to the selected hospital,
/// 2. a date must be one of the doctor's available dates,
/// 3. a slot must be offered for the doctor on that date.
///
/// `SelectSlot` goes through the same checks, so a slot that is not offered is
/// cleared rather than stored.
///
/// `Confirm` needs a complete selection and the wizard on its last step. A
/// confirmed selection is frozen: every event is rejected with
/// [`BookingFlowError::AlreadyConfirmed`].
pub fn reduce<P>(
    current: &BookingSelection,
    event: BookingEvent,
    provider: &P,
) -> Result<Transition, BookingFlowError>
where
    P: ReferenceDataProvider + ?Sized,
{
    if current.confirmed {
        return Err(BookingFlowError::AlreadyConfirmed);
    }

    let mut next = current.clone();

    match event {
        BookingEvent::SelectHospital { hospital_id } => {
            next.hospital_id = non_empty(hospital_id);
            enforce_invariants(&mut next, provider);
        }
        BookingEvent::SelectDoctor { doctor_id } => {
            next.doctor_id = non_empty(doctor_id);
            enforce_invariants(&mut next, provider);
        }
        BookingEvent::SelectDate { date } => {
            next.date = non_empty(date);
            enforce_invariants(&mut next, provider);
        }
        BookingEvent::SelectSlot { slot } => {
            next.slot = non_empty(slot);
            enforce_invariants(&mut next, provider);
        }
        BookingEvent::UpdateNotes { notes } => {
            next.notes = notes;
        }
        BookingEvent::Advance => {
            if can_advance(&next, next.step, provider) {
                if let Some(step) = next.step.next() {
                    next.step = step;
                }
            }
        }
        BookingEvent::Retreat => {
            if let Some(step) = next.step.previous() {
                next.step = step;
            }
        }
        BookingEvent::Confirm => {
            let (selection, booking) = confirm_selection(current)?;
            return Ok(Transition {
                selection,
                confirmed: Some(booking),
            });
        }
    }

    Ok(Transition::to(next))
}

/// Confirm `current`, returning the frozen selection and the booking to
/// record. Missing fields are reported before an unfinished wizard.
pub fn confirm_selection(
    current: &BookingSelection,
) -> Result<(BookingSelection, ConfirmedBooking), BookingFlowError> {
    if current.confirmed {
        return Err(BookingFlowError::AlreadyConfirmed);
    }

    let booking = completed_booking(current)?;
    if !current.step.is_last() {
        return Err(BookingFlowError::ConfirmBeforeFinalStep { step: current.step });
    }

    let mut selection = current.clone();
    selection.confirmed = true;
    Ok((selection, booking))
}

/// Step gate. A hospital id that is not in the directory counts as no
/// hospital, so the first step stays closed.
pub fn can_advance<P>(selection: &BookingSelection, step: BookingStep, provider: &P) -> bool
where
    P: ReferenceDataProvider + ?Sized,
{
    match step {
        BookingStep::Hospital => selection
            .hospital_id
            .as_deref()
            .is_some_and(|hospital_id| provider.hospital(hospital_id).is_some()),
        _ => selection.is_filled(step),
    }
}

/// Build the starting selection for a new session.
///
/// Preset values go through the same events as interactive selection, in the
/// order hospital, doctor, date, slot. Ids that do not exist in the directory
/// are dropped instead of being trusted.
pub fn seed_selection<P>(preset: BookingPreset, provider: &P) -> BookingSelection
where
    P: ReferenceDataProvider + ?Sized,
{
    let mut selection = BookingSelection::default();

    let hospital_id = preset.hospital_id.and_then(|id| {
        if provider.hospital(&id).is_some() {
            Some(id)
        } else {
            warn!("Preset hospital '{}' does not exist, leaving hospital unset", id);
            None
        }
    });
    let doctor_id = preset.doctor_id.and_then(|id| {
        if provider.doctor(&id).is_some() {
            Some(id)
        } else {
            warn!("Preset doctor '{}' does not exist, leaving doctor unset", id);
            None
        }
    });

    let events = [
        hospital_id.map(|hospital_id| BookingEvent::SelectHospital { hospital_id }),
        doctor_id.map(|doctor_id| BookingEvent::SelectDoctor { doctor_id }),
        preset.date.map(|date| BookingEvent::SelectDate { date }),
        preset.slot.map(|slot| BookingEvent::SelectSlot { slot }),
    ];

    for event in events.into_iter().flatten() {
        // A fresh selection is never confirmed, so selection events cannot fail.
        if let Ok(transition) = reduce(&selection, event, provider) {
            selection = transition.selection;
        }
    }

    selection
}

fn enforce_invariants<P>(selection: &mut BookingSelection, provider: &P)
where
    P: ReferenceDataProvider + ?Sized,
{
    if let (Some(hospital_id), Some(doctor_id)) = (&selection.hospital_id, &selection.doctor_id) {
        let belongs = provider
            .doctor(doctor_id)
            .is_some_and(|doctor| doctor.works_at(hospital_id));
        if !belongs {
            debug!("Doctor {} is not at hospital {}, clearing doctor", doctor_id, hospital_id);
            selection.doctor_id = None;
            selection.date = None;
            selection.slot = None;
        }
    }

    if let Some(doctor_id) = &selection.doctor_id {
        let dates = provider.available_dates(doctor_id);
        let still_valid = selection
            .date
            .as_ref()
            .is_some_and(|date| dates.contains(date));
        if !still_valid {
            let first = dates.into_iter().next();
            debug!("Date {:?} unavailable for doctor {}, moving to {:?}", selection.date, doctor_id, first);
            selection.date = first;
            selection.slot = None;
        }
    }

    if let Some(slot) = &selection.slot {
        let offered = match (&selection.doctor_id, &selection.date) {
            (Some(doctor_id), Some(date)) => provider.slots(doctor_id, date).contains(slot),
            _ => false,
        };
        if !offered {
            debug!("Slot {} is not offered for the current doctor and date, clearing slot", slot);
            selection.slot = None;
        }
    }
}

fn completed_booking(selection: &BookingSelection) -> Result<ConfirmedBooking, BookingFlowError> {
    let missing = |missing| BookingFlowError::IncompleteSelection { missing };

    let slot = selection.slot.clone().ok_or(missing(BookingStep::Slot))?;
    let hospital_id = selection.hospital_id.clone().ok_or(missing(BookingStep::Hospital))?;
    let doctor_id = selection.doctor_id.clone().ok_or(missing(BookingStep::Doctor))?;
    let date = selection.date.clone().ok_or(missing(BookingStep::Date))?;

    Ok(ConfirmedBooking {
        hospital_id,
        doctor_id,
        date,
        slot,
        notes: selection.notes.clone(),
    })
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
