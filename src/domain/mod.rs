//! Доменная модель покера: карты, шуз, игроки, блайнды, конфиг стола, турнир.

pub mod blinds;
pub mod card;
pub mod chips;
pub mod hand;
pub mod player;
pub mod shoe;
pub mod table;
pub mod tournament;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use blinds::*;
pub use card::*;
pub use chips::*;
pub use hand::*;
pub use player::*;
pub use shoe::*;
pub use table::*;
pub use tournament::*;
