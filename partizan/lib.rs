//! Algebra of short partizan game values.
//!
//! Games are built from [left and right option sets](crate::game::Game::new),
//! compared in the [game-theoretic partial order](crate::game::order) where
//! confusion between positions is an ordinary outcome, reduced to
//! [canonical form](crate::game::Game::canonical_form), and combined with
//! the usual [sums and products](crate::game::arithmetic).
//!
//! ```
//! use partizan::game::Game;
//!
//! let switch = Game::new(vec![Game::from(1)], vec![Game::from(-1)]);
//! assert!(switch.confused_with(&Game::zero()));
//! assert_eq!(switch.to_string(), "±1");
//! assert_eq!((&switch - &switch).to_string(), "0");
//! ```

#![warn(missing_docs)]

pub mod game;
pub mod numeric;

mod display;
