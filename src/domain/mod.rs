pub mod board;
pub mod error;
pub mod meta;

pub use board::{fresh_id, Board, Card, CardLocation, CardPatch, CardSpec, Column};
pub use error::BoardError;
pub use meta::{CardMeta, MatchOutcome, RecentMatch, TeamAnalytics, WltRecord};
