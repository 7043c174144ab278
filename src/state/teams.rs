//! Team roster model and the randomized assignment engine behind the team generator.

use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Roster offered by the "fill sample" action of the team generator.
pub const SAMPLE_PLAYERS: [&str; 6] = ["Ali", "Veli", "Can", "Cem", "Efe", "Ege"];

/// A named bucket of players produced by the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Display label (never blank once built through [`team_names`]).
    pub name: String,
    /// Members in assignment order, unless reordered by a manual move.
    pub members: Vec<String>,
}

impl Team {
    /// Build an empty team with the given display name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }
}

/// Errors raised by the assignment engine and the manual roster edits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TeamError {
    /// The team count cannot produce any team.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// A team or member index no longer points at anything.
    #[error("index out of range: {what} {index} (len {len})")]
    IndexOutOfRange {
        /// Which index was stale (`team` or `member`).
        what: &'static str,
        /// The offending index.
        index: usize,
        /// Length of the collection it was checked against.
        len: usize,
    },
    /// Fewer players than teams; generation is blocked until more names are entered.
    #[error("not enough players: {players} player(s) for {teams} team(s)")]
    InsufficientInput {
        /// Number of usable players in the input.
        players: usize,
        /// Requested team count.
        teams: usize,
    },
}

/// Live counters shown next to the player input before generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterPreview {
    /// Usable (non-blank) lines in the input.
    pub player_count: usize,
    /// Requested team count.
    pub team_count: usize,
}

impl RosterPreview {
    /// Generation is only offered once every team can receive at least one player.
    pub fn can_generate(&self) -> bool {
        self.team_count > 0 && self.player_count >= self.team_count
    }
}

/// Split a newline separated roster, trimming each entry and dropping blank lines.
pub fn parse_players(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Compute the preview counters for a raw roster and team count.
pub fn roster_preview(raw: &str, team_count: usize) -> RosterPreview {
    RosterPreview {
        player_count: parse_players(raw).len(),
        team_count,
    }
}

/// Resolve one display name per team, falling back to `Team {n}` for missing or blank entries.
pub fn team_names(count: usize, provided: &[String]) -> Vec<String> {
    (0..count)
        .map(|index| {
            provided
                .get(index)
                .map(|name| name.trim())
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("Team {}", index + 1))
        })
        .collect()
}

/// Shuffle `players` uniformly and deal them round-robin into `team_count` teams.
pub fn assign(
    players: &[String],
    team_count: usize,
    names: &[String],
) -> Result<Vec<Team>, TeamError> {
    assign_with_rng(players, team_count, names, &mut rand::rng())
}

/// Same as [`assign`] with an explicit random source.
pub fn assign_with_rng<R: Rng + ?Sized>(
    players: &[String],
    team_count: usize,
    names: &[String],
    rng: &mut R,
) -> Result<Vec<Team>, TeamError> {
    if team_count == 0 {
        return Err(TeamError::InvalidConfiguration(
            "team count must be at least 1".into(),
        ));
    }

    let mut teams: Vec<Team> = team_names(team_count, names)
        .into_iter()
        .map(Team::new)
        .collect();

    // Fisher-Yates; every permutation is equally likely.
    let mut shuffled = players.to_vec();
    shuffled.shuffle(rng);

    for (position, player) in shuffled.into_iter().enumerate() {
        teams[position % team_count].members.push(player);
    }

    Ok(teams)
}

/// Reconstruct the reveal order of a fresh assignment: one player per team, cycling.
///
/// Only meaningful for teams produced by [`assign`], where the shuffled position `i`
/// sits at `teams[i % n].members[i / n]`.
pub fn draw_order(teams: &[Team]) -> Vec<(String, usize)> {
    let total: usize = teams.iter().map(|team| team.members.len()).sum();
    let mut order = Vec::with_capacity(total);
    let deepest = teams.iter().map(|team| team.members.len()).max().unwrap_or(0);

    for depth in 0..deepest {
        for (team_index, team) in teams.iter().enumerate() {
            if let Some(player) = team.members.get(depth) {
                order.push((player.clone(), team_index));
            }
        }
    }

    order
}

/// Copy of `teams` with every member list emptied; the starting point of a staged reveal.
pub fn empty_shells(teams: &[Team]) -> Vec<Team> {
    teams.iter().map(|team| Team::new(team.name.clone())).collect()
}

/// Move the member at `from_index` of `from_team` to the end of `to_team`.
///
/// Returns the moved player's name.
pub fn move_member(
    teams: &mut [Team],
    from_team: usize,
    from_index: usize,
    to_team: usize,
) -> Result<String, TeamError> {
    check_team(teams, to_team)?;
    let player = take_member(teams, from_team, from_index)?;
    teams[to_team].members.push(player.clone());
    Ok(player)
}

/// Remove exactly one member, returning its name.
pub fn remove_member(
    teams: &mut [Team],
    team_index: usize,
    member_index: usize,
) -> Result<String, TeamError> {
    take_member(teams, team_index, member_index)
}

fn take_member(
    teams: &mut [Team],
    team_index: usize,
    member_index: usize,
) -> Result<String, TeamError> {
    check_team(teams, team_index)?;
    let members = &mut teams[team_index].members;
    if member_index >= members.len() {
        return Err(TeamError::IndexOutOfRange {
            what: "member",
            index: member_index,
            len: members.len(),
        });
    }
    Ok(members.remove(member_index))
}

fn check_team(teams: &[Team], index: usize) -> Result<(), TeamError> {
    if index >= teams.len() {
        return Err(TeamError::IndexOutOfRange {
            what: "team",
            index,
            len: teams.len(),
        });
    }
    Ok(())
}
