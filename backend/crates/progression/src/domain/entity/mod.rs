pub mod player;
pub mod rank_change;
pub mod requirement;
