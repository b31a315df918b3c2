//! Partizan game values built from left and right option sets.
//!
//! A [Game] is a recursively defined position: the options each player may
//! move to are themselves games, bottoming out at the zero game `{|}`.
//! Values are immutable and structurally shared, so cloning a game or using
//! one node as an option of many parents is cheap. Equality and ordering are
//! the game-theoretic relations, not structural identity; see [order] for
//! the comparison engine and [canonical] for the reduction to canonical form.

pub mod arithmetic;
pub mod canonical;
pub mod nus;
pub mod order;
pub mod value;

use crate::{
    game::order::NodeId,
    numeric::{dyadic_rational_number::DyadicRationalNumber, nimber::Nimber, rational::Rational},
};
use std::{
    cmp::Ordering,
    collections::HashMap,
    fmt::Display,
    sync::{Arc, LazyLock, OnceLock},
};

/// Outcome class of a game: who wins under optimal play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// Left wins no matter who moves first
    Left,

    /// Right wins no matter who moves first
    Right,

    /// The player moving second wins
    Previous,

    /// The player moving first wins
    Next,
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Left => write!(f, "L"),
            Outcome::Right => write!(f, "R"),
            Outcome::Previous => write!(f, "P"),
            Outcome::Next => write!(f, "N"),
        }
    }
}

impl PartialOrd for Outcome {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Outcome::Left, Outcome::Left)
            | (Outcome::Right, Outcome::Right)
            | (Outcome::Previous, Outcome::Previous)
            | (Outcome::Next, Outcome::Next) => Some(Ordering::Equal),
            (Outcome::Left, _) | (_, Outcome::Right) => Some(Ordering::Greater),
            (Outcome::Right, _) | (_, Outcome::Left) => Some(Ordering::Less),
            (Outcome::Previous, Outcome::Next) | (Outcome::Next, Outcome::Previous) => None,
        }
    }
}

struct GameInner {
    left: Vec<Game>,
    right: Vec<Game>,
    canonical: OnceLock<CachedCanonical>,
}

/// Result of canonicalizing a node, cached on the node itself.
///
/// Canonical forms reference only fresh nodes or strict descendants of the
/// node they reduce, so the link can never close a reference cycle.
enum CachedCanonical {
    /// The node is its own canonical form
    Canonical,

    /// The canonical form is a structurally different node
    Reduced(Game),
}

/// A short partizan game value.
///
/// Games compare by the game-theoretic partial order: [PartialEq] is
/// equivalence of values and [PartialOrd] returns [None] for games that are
/// confused with each other. Because equality is not structural, `Game`
/// implements no `Hash`. Construction never fails except when a general
/// rational is not dyadic, see [Game::new_rational].
#[derive(Clone)]
pub struct Game {
    inner: Arc<GameInner>,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("left", &self.left_moves())
            .field("right", &self.right_moves())
            .finish()
    }
}

static ZERO: LazyLock<Game> = LazyLock::new(|| Game::from_parts_canonical(Vec::new(), Vec::new()));

impl Game {
    /// The zero game `{|}`, the only game with no options and the identity
    /// for sum
    #[inline]
    pub fn zero() -> Game {
        ZERO.clone()
    }

    /// Construct a game from its left and right options.
    ///
    /// Options are stored as given; equivalent or dominated options are
    /// removed only when a canonical form is requested. Numeric options can
    /// be coerced with [From]/[Into].
    pub fn new(left: Vec<Game>, right: Vec<Game>) -> Game {
        Game::from_parts(left, right)
    }

    /// Construct the canonical form of an integer
    pub fn new_integer(integer: i64) -> Game {
        let mut game = Game::zero();
        for _ in 0..integer.unsigned_abs() {
            game = if integer >= 0 {
                Game::from_parts_canonical(vec![game], Vec::new())
            } else {
                Game::from_parts_canonical(Vec::new(), vec![game])
            };
        }
        game
    }

    /// Construct the canonical form of a dyadic rational, by the simplest
    /// number rule
    pub fn new_dyadic(number: DyadicRationalNumber) -> Game {
        match number.to_integer() {
            Some(integer) => Game::new_integer(integer),
            None => {
                // Both neighbours normalize to strictly coarser dyadics,
                // so the recursion loses a bit of precision every step
                let left = Game::new_dyadic(number.step(-1));
                let right = Game::new_dyadic(number.step(1));
                Game::from_parts_canonical(vec![left], vec![right])
            }
        }
    }

    /// Construct a number game from a general rational.
    ///
    /// # Errors
    /// - [UnsupportedValue] if the rational is infinite or not a dyadic
    ///   fraction. Values are never rounded.
    pub fn new_rational(rational: Rational) -> Result<Game, UnsupportedValue> {
        let number = DyadicRationalNumber::from_rational(rational)
            .ok_or(UnsupportedValue { value: rational })?;
        Ok(Game::new_dyadic(number))
    }

    /// Construct the canonical form of a nimber: `∗k = {0,∗,...,∗(k-1) | 0,∗,...,∗(k-1)}`
    pub fn new_nimber(nimber: Nimber) -> Game {
        let mut game = Game::zero();
        let mut options = Vec::with_capacity(nimber.value() as usize);
        for _ in 0..nimber.value() {
            options.push(game);
            game = Game::from_parts_canonical(options.clone(), options.clone());
        }
        game
    }

    /// The game `∗ = {0|0}`, confused with zero
    pub fn star() -> Game {
        Game::new_nimber(Nimber::new(1))
    }

    /// The game `↑ = {0|∗}`, a positive infinitesimal
    pub fn up() -> Game {
        Game::from_parts_canonical(vec![Game::zero()], vec![Game::star()])
    }

    /// The game `↓ = {∗|0}`, the negative of [Game::up]
    pub fn down() -> Game {
        -&Game::up()
    }

    /// Construct a tiny game `➕_x = {0 || 0 | -x}` for a positive number `x`.
    ///
    /// Tiny games are positive but infinitesimal with respect to every
    /// positive number.
    pub fn tiny(number: DyadicRationalNumber) -> Game {
        debug_assert!(
            number > DyadicRationalNumber::new_integer(0),
            "tiny of a non-positive number"
        );
        let reversal = Game::from_parts_canonical(
            vec![Game::zero()],
            vec![Game::new_dyadic(-number)],
        );
        Game::from_parts_canonical(vec![Game::zero()], vec![reversal])
    }

    /// Construct a miny game `➖_x`, the negative of [Game::tiny]
    pub fn miny(number: DyadicRationalNumber) -> Game {
        -&Game::tiny(number)
    }

    /// Get the positions Left can move to
    #[inline]
    pub fn left_moves(&self) -> &[Game] {
        &self.inner.left
    }

    /// Get the positions Right can move to
    #[inline]
    pub fn right_moves(&self) -> &[Game] {
        &self.inner.right
    }

    /// Outcome class of the game under optimal play, decided by comparing
    /// against zero
    pub fn outcome(&self) -> Outcome {
        match self.partial_cmp(&Game::zero()) {
            Some(Ordering::Equal) => Outcome::Previous,
            Some(Ordering::Greater) => Outcome::Left,
            Some(Ordering::Less) => Outcome::Right,
            None => Outcome::Next,
        }
    }

    /// Check if both players have the same options everywhere in the game
    /// tree
    pub fn is_impartial(&self) -> bool {
        fn impartial(game: &Game, cache: &mut HashMap<NodeId, bool, ahash::RandomState>) -> bool {
            let id = NodeId::new(game);
            if let Some(&known) = cache.get(&id) {
                return known;
            }

            let left = game.left_moves();
            let right = game.right_moves();
            let known = left.len() == right.len()
                && left
                    .iter()
                    .zip(right)
                    .all(|(l, r)| l.total_cmp(r) == Ordering::Equal)
                && left.iter().all(|option| impartial(option, cache));
            cache.insert(id, known);
            known
        }

        // Canonical option lists are sorted, so sets compare elementwise,
        // and shared nodes are checked once
        impartial(&self.canonical_form(), &mut HashMap::default())
    }

    /// Check if the game is a switch, a position both players are eager to
    /// move in: `{a|b}` with numbers `a > b`
    pub fn is_switch(&self) -> bool {
        let canonical = self.canonical_form();
        if let ([gl], [gr]) = (canonical.left_moves(), canonical.right_moves())
            && let (Some(l), Some(r)) = (gl.to_number(), gr.to_number())
        {
            l > r
        } else {
            false
        }
    }

    /// Rank of the canonical game tree: zero for the zero game, otherwise
    /// one more than the highest option birthday.
    ///
    /// Computed on the canonical form, so extra options of an equivalent
    /// representation do not inflate it.
    pub fn birthday(&self) -> u32 {
        fn rank(game: &Game, cache: &mut HashMap<NodeId, u32, ahash::RandomState>) -> u32 {
            let id = NodeId::new(game);
            if let Some(&rank) = cache.get(&id) {
                return rank;
            }

            let rank = game
                .left_moves()
                .iter()
                .chain(game.right_moves())
                .map(|option| rank(option, cache))
                .max()
                .map_or(0, |birthday| birthday + 1);
            cache.insert(id, rank);
            rank
        }

        rank(&self.canonical_form(), &mut HashMap::default())
    }

    pub(crate) fn from_parts(left: Vec<Game>, right: Vec<Game>) -> Game {
        Game {
            inner: Arc::new(GameInner {
                left,
                right,
                canonical: OnceLock::new(),
            }),
        }
    }

    /// Build a node already known to be in canonical form
    pub(crate) fn from_parts_canonical(mut left: Vec<Game>, mut right: Vec<Game>) -> Game {
        left.sort_by(|lhs, rhs| lhs.total_cmp(rhs));
        right.sort_by(|lhs, rhs| lhs.total_cmp(rhs));
        let game = Game::from_parts(left, right);
        game.mark_canonical();
        game
    }

    pub(crate) fn mark_canonical(&self) {
        let _ = self.inner.canonical.set(CachedCanonical::Canonical);
    }

    pub(crate) fn is_marked_canonical(&self) -> bool {
        matches!(self.inner.canonical.get(), Some(CachedCanonical::Canonical))
    }

    pub(crate) fn same_node(&self, other: &Game) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn node_addr(&self) -> usize {
        Arc::as_ptr(&self.inner) as usize
    }

    /// Total order on the tree structure, unrelated to the game order. Used
    /// to sort and deduplicate option lists deterministically.
    pub(crate) fn total_cmp(&self, other: &Game) -> Ordering {
        fn cmp_options(lhs: &[Game], rhs: &[Game]) -> Ordering {
            for (l, r) in lhs.iter().zip(rhs) {
                match l.total_cmp(r) {
                    Ordering::Equal => {}
                    ordering => return ordering,
                }
            }
            lhs.len().cmp(&rhs.len())
        }

        if self.same_node(other) {
            return Ordering::Equal;
        }

        cmp_options(self.left_moves(), other.left_moves())
            .then_with(|| cmp_options(self.right_moves(), other.right_moves()))
    }
}

/// Error of constructing a game from a value outside the dyadic rationals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsupportedValue {
    value: Rational,
}

impl UnsupportedValue {
    /// Get the rejected value
    pub const fn value(&self) -> Rational {
        self.value
    }
}

impl Display for UnsupportedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} is not a finite dyadic rational", self.value)
    }
}

impl std::error::Error for UnsupportedValue {}

impl From<i64> for Game {
    fn from(value: i64) -> Self {
        Game::new_integer(value)
    }
}

impl From<DyadicRationalNumber> for Game {
    fn from(value: DyadicRationalNumber) -> Self {
        Game::new_dyadic(value)
    }
}

impl TryFrom<Rational> for Game {
    type Error = UnsupportedValue;

    fn try_from(value: Rational) -> Result<Self, Self::Error> {
        Game::new_rational(value)
    }
}

// Games serialize as nested option lists; structural sharing is not
// preserved across a round trip
#[cfg(feature = "serde")]
impl serde::Serialize for Game {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Game", 2)?;
        state.serialize_field("left", self.left_moves())?;
        state.serialize_field("right", self.right_moves())?;
        state.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Game {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Parts {
            left: Vec<Game>,
            right: Vec<Game>,
        }

        let parts = Parts::deserialize(deserializer)?;
        Ok(Game::new(parts.left, parts.right))
    }
}

#[cfg(any(test, feature = "quickcheck"))]
impl Game {
    fn arbitrary_sized(g: &mut quickcheck::Gen, mut size: i64) -> Game {
        use quickcheck::Arbitrary;

        let mut left = Vec::new();
        let mut right = Vec::new();

        while size > 0 {
            let opt = if bool::arbitrary(g) {
                let n = i64::arbitrary(g).rem_euclid(size.min(4));
                size -= n + 1;
                if bool::arbitrary(g) {
                    Game::new_integer(n)
                } else {
                    Game::new_integer(-n)
                }
            } else {
                let n = i64::arbitrary(g).rem_euclid(size);
                size -= n + 1;
                Game::arbitrary_sized(g, n)
            };

            if bool::arbitrary(g) {
                left.push(opt);
            } else {
                right.push(opt);
            }
        }

        Game::new(left, right)
    }
}

#[cfg(any(test, feature = "quickcheck"))]
impl quickcheck::Arbitrary for Game {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let size = (g.size() / 8) as i64;
        Game::arbitrary_sized(g, size)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        use itertools::Itertools;

        if self.left_moves().is_empty() && self.right_moves().is_empty() {
            return quickcheck::empty_shrinker();
        }

        Box::new(
            self.left_moves()
                .to_vec()
                .shrink()
                .chain(std::iter::once(Vec::new()))
                .cartesian_product(
                    self.right_moves()
                        .to_vec()
                        .shrink()
                        .chain(std::iter::once(Vec::new()))
                        .collect::<Vec<_>>(),
                )
                .map(|(left, right)| Game::new(left, right)),
        )
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn games_round_trip_through_serde() {
        assert_eq!(
            serde_json::to_string(&Game::star()).unwrap(),
            r#"{"left":[{"left":[],"right":[]}],"right":[{"left":[],"right":[]}]}"#
        );

        let game = Game::new(vec![Game::up(), Game::from(-2)], vec![Game::star()]);
        let encoded = serde_json::to_string(&game).unwrap();
        let decoded: Game = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.total_cmp(&game), Ordering::Equal);
    }
}
