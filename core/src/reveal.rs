use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::ops::BitOr;

use crate::*;

/// Reveals `pos`, flooding outward through zero-valued cells.
///
/// Every cell whose state changed is appended to `changed`.
pub fn reveal(grid: &mut Grid, pos: Pos, changed: &mut Vec<Pos>) -> Result<RevealOutcome> {
    let pos = grid.validate(pos)?;
    Ok(reveal_cell(grid, pos, changed))
}

/// Reveals the unflagged neighbors of a satisfied number.
///
/// Only acts on a revealed cell whose adjacent mine count equals its number of flagged neighbors
/// exactly, anything else is a no-op.
pub fn chord(grid: &mut Grid, pos: Pos, changed: &mut Vec<Pos>) -> Result<RevealOutcome> {
    let pos = grid.validate(pos)?;
    let cell = grid.cell(pos);

    if !cell.is_revealed || cell.adjacent_mines == 0 {
        return Ok(RevealOutcome::AlreadySettled);
    }

    let flagged = grid.count_neighbors(pos, Cell::is_flagged);
    if flagged != cell.adjacent_mines {
        log::trace!(
            "Chord at {:?} unsatisfied, {} flags for {} mines",
            pos,
            flagged,
            cell.adjacent_mines
        );
        return Ok(RevealOutcome::AlreadySettled);
    }

    Ok(grid
        .iter_neighbors(pos)
        .map(|neighbor| reveal_cell(grid, neighbor, changed))
        .fold(RevealOutcome::AlreadySettled, BitOr::bitor))
}

pub fn toggle_flag(grid: &mut Grid, pos: Pos, changed: &mut Vec<Pos>) -> Result<FlagOutcome> {
    let pos = grid.validate(pos)?;
    let cell = grid.cell(pos);

    if cell.is_revealed {
        return Ok(FlagOutcome::Rejected);
    }

    grid.set_flagged(pos, !cell.is_flagged);
    changed.push(pos);
    Ok(if cell.is_flagged {
        FlagOutcome::Unflagged
    } else {
        FlagOutcome::Flagged
    })
}

fn reveal_cell(grid: &mut Grid, pos: Pos, changed: &mut Vec<Pos>) -> RevealOutcome {
    let cell = grid.cell(pos);
    if cell.is_settled() {
        return RevealOutcome::AlreadySettled;
    }

    grid.mark_revealed(pos);
    changed.push(pos);

    if cell.is_mine {
        log::debug!("Revealed mine at {:?}", pos);
        return RevealOutcome::Mine;
    }

    log::trace!("Revealed {:?}, adjacent mines: {}", pos, cell.adjacent_mines);
    if cell.adjacent_mines > 0 {
        return RevealOutcome::Cleared;
    }

    let mut to_visit: VecDeque<Pos> = grid
        .iter_neighbors(pos)
        .filter(|&neighbor| grid.cell(neighbor).is_hidden())
        .collect();
    log::trace!(
        "Starting flood-fill from {:?}, initial neighbors: {:?}",
        pos,
        to_visit
    );

    while let Some(visit_pos) = to_visit.pop_front() {
        let visit_cell = grid.cell(visit_pos);

        // queued more than once, or flagged
        if visit_cell.is_settled() {
            continue;
        }

        // neighbors of a zero are never mines
        debug_assert!(!visit_cell.is_mine);
        grid.mark_revealed(visit_pos);
        changed.push(visit_pos);
        log::trace!(
            "Flood revealed {:?}, adjacent mines: {}",
            visit_pos,
            visit_cell.adjacent_mines
        );

        if visit_cell.adjacent_mines == 0 {
            to_visit.extend(
                grid.iter_neighbors(visit_pos)
                    .filter(|&neighbor| grid.cell(neighbor).is_hidden()),
            );
        }
    }

    RevealOutcome::Cleared
}
