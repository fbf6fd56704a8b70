/// Runs scored by a team, in a half inning or over a game.
pub type Runs = u32;
