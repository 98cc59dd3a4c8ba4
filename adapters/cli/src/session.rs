//! Interactive loop that feeds prompt lines into an encounter.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use catchball_core::{Clock, EncounterState, ThrowError, ThrowOutcome};
use catchball_encounter::{query, Encounter};
use catchball_rendering::RenderingBackend;
use log::debug;

use crate::input::{parse_line, PromptCommand};

/// Plays the encounter until it ends, the player quits or input runs dry.
///
/// Snapshots go to the backend while prompts and outcome messages go to
/// `messages`. Returns the state the encounter was left in.
pub(crate) fn play<C, R, M>(
    encounter: &mut Encounter<C>,
    input: R,
    backend: &mut dyn RenderingBackend,
    mut messages: M,
) -> Result<EncounterState>
where
    C: Clock,
    R: BufRead,
    M: Write,
{
    let name = query::profile(encounter).name().to_owned();
    writeln!(
        messages,
        "You have {} seconds to catch {name}",
        query::profile(encounter).max_time().as_secs()
    )?;
    backend.present(&query::snapshot(encounter))?;

    let mut lines = input.lines();
    while !query::state(encounter).is_over() {
        write!(messages, "velocity angle> ")?;
        messages.flush()?;

        let Some(line) = lines.next() else {
            debug!("input closed with {name} still active");
            break;
        };
        let line = line.context("failed to read throw from input")?;

        let request = match parse_line(&line) {
            Ok(PromptCommand::Throw(request)) => request,
            Ok(PromptCommand::Quit) => {
                writeln!(messages, "You walked away from {name}.")?;
                break;
            }
            Err(error) => {
                writeln!(messages, "{error}")?;
                continue;
            }
        };

        match encounter.throw(request) {
            Ok(ThrowOutcome::Hit { point, distance }) => writeln!(
                messages,
                "Hit at {:.2}x{:.2} with a distance of {distance:.2}. You caught {name}!",
                point.x, point.y
            )?,
            Ok(ThrowOutcome::Miss {
                target_position,
                remaining_throws,
                remaining_time,
            }) => writeln!(
                messages,
                "Missed! {name} moved to {:.0}x{:.0}. {remaining_throws} throw(s) and {} seconds left",
                target_position.x,
                target_position.y,
                remaining_time.as_secs()
            )?,
            Err(error @ ThrowError::InvalidParameters { .. }) => {
                writeln!(messages, "{error}")?;
                continue;
            }
            Err(error) => writeln!(messages, "{error}")?,
        }

        backend.present(&query::snapshot(encounter))?;
    }

    Ok(query::state(encounter))
}
