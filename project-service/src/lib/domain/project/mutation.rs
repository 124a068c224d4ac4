//! Index-addressed edits over a project's embedded phases and checklists.
//!
//! Every function either applies its edit completely or returns an error with
//! the project untouched, so a failed edit never needs rolling back before the
//! document is persisted.

use super::errors::ProjectError;
use super::models::CheckListPatch;
use super::models::Phase;
use super::models::PhaseCheckList;
use super::models::Project;

fn position(index: i64, len: usize) -> Option<usize> {
    usize::try_from(index).ok().filter(|&i| i < len)
}

fn phase_mut(project: &mut Project, phase_index: i64) -> Result<(usize, &mut Phase), ProjectError> {
    let len = project.phases.len();
    let slot = position(phase_index, len).ok_or(ProjectError::PhaseIndexOutOfRange {
        index: phase_index,
        len,
    })?;
    Ok((slot, &mut project.phases[slot]))
}

/// Append a phase to the end of the project. Returns its position.
pub fn append_phase(project: &mut Project, phase: Phase) -> usize {
    project.phases.push(phase);
    project.phases.len() - 1
}

/// Append a checklist item to the phase at `phase_index`. Returns the item's
/// position within that phase.
///
/// # Errors
/// * `PhaseIndexOutOfRange` - `phase_index` is negative or not below the phase count
pub fn append_check_list(
    project: &mut Project,
    phase_index: i64,
    item: PhaseCheckList,
) -> Result<usize, ProjectError> {
    let (_, phase) = phase_mut(project, phase_index)?;
    phase.check_lists.push(item);
    Ok(phase.check_lists.len() - 1)
}

/// Overwrite `comment1`, `comment2` and `is_checked` of one checklist item.
///
/// # Errors
/// * `PhaseIndexOutOfRange` - `phase_index` does not address a phase
/// * `CheckListIndexOutOfRange` - `check_list_index` does not address an item of that phase
pub fn update_check_list(
    project: &mut Project,
    phase_index: i64,
    check_list_index: i64,
    patch: CheckListPatch,
) -> Result<&PhaseCheckList, ProjectError> {
    let (phase_slot, phase) = phase_mut(project, phase_index)?;
    let len = phase.check_lists.len();
    let slot = position(check_list_index, len).ok_or(ProjectError::CheckListIndexOutOfRange {
        phase_index: phase_slot,
        index: check_list_index,
        len,
    })?;

    let item = &mut phase.check_lists[slot];
    item.comment1 = patch.comment1;
    item.comment2 = patch.comment2;
    item.is_checked = patch.is_checked;

    Ok(item)
}
