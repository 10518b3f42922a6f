mod menu;
mod state;

pub use state::{AppState, EditTarget, Focus, InputAction, PotCandidate, Scene};
