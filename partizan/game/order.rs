//! The partial order of games.
//!
//! `G <= H` holds iff no left option of `G` is `>= H` and no right option of
//! `H` is `<= G`, recursively. Two games with neither `<=` nor `>=` between
//! them are confused, a first class outcome exposed through
//! [Game::confused_with] and a [None] from [PartialOrd::partial_cmp].

use crate::{game::Game, numeric::dyadic_rational_number::DyadicRationalNumber};
use std::{
    cmp::Ordering,
    collections::HashMap,
    hash::{Hash, Hasher},
};

/// Identity of a shared game node, usable as a cache key.
///
/// Holds a handle to the node, so the address cannot be reused by another
/// allocation while a cache entry refers to it.
pub(crate) struct NodeId(Game);

impl NodeId {
    #[inline]
    pub(crate) fn new(game: &Game) -> NodeId {
        NodeId(game.clone())
    }
}

impl PartialEq for NodeId {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0.node_addr() == other.0.node_addr()
    }
}

impl Eq for NodeId {}

impl Hash for NodeId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.0.node_addr());
    }
}

/// Comparison memo for one top level operation.
///
/// Naive recursion revisits shared subtrees exponentially often; keying
/// finished comparisons by node identity makes each pair cost constant after
/// the first visit. The cache lives only as long as the operation that
/// created it.
pub(crate) struct OrderCache {
    leq: HashMap<(NodeId, NodeId), bool, ahash::RandomState>,
}

impl OrderCache {
    pub(crate) fn new() -> OrderCache {
        OrderCache {
            leq: HashMap::default(),
        }
    }

    pub(crate) fn leq(&mut self, lhs: &Game, rhs: &Game) -> bool {
        if lhs.same_node(rhs) {
            return true;
        }

        let key = (NodeId::new(lhs), NodeId::new(rhs));
        if let Some(&cached) = self.leq.get(&key) {
            return cached;
        }

        let mut leq = true;

        for lhs_l in lhs.left_moves() {
            if self.leq(rhs, lhs_l) {
                leq = false;
                break;
            }
        }

        if leq {
            for rhs_r in rhs.right_moves() {
                if self.leq(rhs_r, lhs) {
                    leq = false;
                    break;
                }
            }
        }

        self.leq.insert(key, leq);
        leq
    }
}

impl Game {
    /// Less than or equals comparison on two games.
    ///
    /// The foundational relation everything else derives from. Both defining
    /// conditions are vacuously true at the zero game, which terminates the
    /// recursion at the leaves of the trees.
    pub fn leq(&self, rhs: &Game) -> bool {
        OrderCache::new().leq(self, rhs)
    }

    /// Check if two games are confused with each other, i.e. neither `<=`
    /// nor `>=` holds in either direction.
    ///
    /// Confusion is common and meaningful, e.g. `∗` is confused with zero
    /// and a switch is confused with every number inside its range.
    pub fn confused_with(&self, rhs: &Game) -> bool {
        let mut cache = OrderCache::new();
        !cache.leq(self, rhs) && !cache.leq(rhs, self)
    }
}

impl PartialEq for Game {
    fn eq(&self, other: &Self) -> bool {
        let mut cache = OrderCache::new();
        cache.leq(self, other) && cache.leq(other, self)
    }
}

impl PartialOrd for Game {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let mut cache = OrderCache::new();
        match (cache.leq(self, other), cache.leq(other, self)) {
            (true, true) => Some(Ordering::Equal),
            (true, false) => Some(Ordering::Less),
            (false, true) => Some(Ordering::Greater),
            (false, false) => None,
        }
    }

    fn le(&self, other: &Self) -> bool {
        Game::leq(self, other)
    }

    fn ge(&self, other: &Self) -> bool {
        Game::leq(other, self)
    }
}

impl PartialEq<i64> for Game {
    fn eq(&self, other: &i64) -> bool {
        *self == Game::new_integer(*other)
    }
}

impl PartialEq<Game> for i64 {
    fn eq(&self, other: &Game) -> bool {
        Game::new_integer(*self) == *other
    }
}

impl PartialOrd<i64> for Game {
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        self.partial_cmp(&Game::new_integer(*other))
    }
}

impl PartialOrd<Game> for i64 {
    fn partial_cmp(&self, other: &Game) -> Option<Ordering> {
        Game::new_integer(*self).partial_cmp(other)
    }
}

impl PartialEq<DyadicRationalNumber> for Game {
    fn eq(&self, other: &DyadicRationalNumber) -> bool {
        *self == Game::new_dyadic(*other)
    }
}

impl PartialEq<Game> for DyadicRationalNumber {
    fn eq(&self, other: &Game) -> bool {
        Game::new_dyadic(*self) == *other
    }
}

impl PartialOrd<DyadicRationalNumber> for Game {
    fn partial_cmp(&self, other: &DyadicRationalNumber) -> Option<Ordering> {
        self.partial_cmp(&Game::new_dyadic(*other))
    }
}

impl PartialOrd<Game> for DyadicRationalNumber {
    fn partial_cmp(&self, other: &Game) -> Option<Ordering> {
        Game::new_dyadic(*self).partial_cmp(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::nimber::Nimber;
    use quickcheck::QuickCheck;

    #[test]
    fn partial_order() {
        assert_eq!(
            Game::zero().partial_cmp(&Game::zero()),
            Some(Ordering::Equal)
        );
        assert_eq!(
            Game::star().partial_cmp(&Game::star()),
            Some(Ordering::Equal)
        );
        assert_eq!(
            Game::new_integer(1).partial_cmp(&Game::new_integer(2)),
            Some(Ordering::Less)
        );
        assert_eq!(Game::star().partial_cmp(&Game::zero()), None);
        assert_eq!(
            Game::up().partial_cmp(&Game::zero()),
            Some(Ordering::Greater)
        );
        assert_eq!(Game::up().partial_cmp(&Game::star()), None);
        assert_eq!(
            Game::new_nimber(Nimber::new(2)).partial_cmp(&Game::star()),
            None
        );
        assert_eq!(
            Game::new_integer(-1).partial_cmp(&Game::star()),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn star_is_confused_with_zero() {
        assert!(Game::star().confused_with(&Game::zero()));
        assert!(!(Game::star() <= Game::zero()));
        assert!(!(Game::star() >= Game::zero()));
        assert!(!Game::star().confused_with(&Game::star()));
    }

    #[test]
    fn switches_are_confused_with_their_range() {
        let pm = Game::new(vec![Game::from(1)], vec![Game::from(-1)]);
        assert!(pm.confused_with(&Game::zero()));
        assert!(pm.confused_with(&Game::new_integer(1)));
        assert!(pm.confused_with(&Game::new_integer(-1)));
        assert!(pm < Game::new_integer(2));
        assert!(pm > Game::new_integer(-2));
    }

    #[test]
    fn numeric_operands_coerce() {
        assert!(Game::new_integer(2) == 2);
        assert!(2 > Game::new_integer(1));
        assert!(Game::up() > 0);
        assert!(Game::star() != 0);
        assert!(!(Game::star() <= 0) && !(Game::star() >= 0));
        assert!(Game::new_dyadic(DyadicRationalNumber::new(1, 1)) < DyadicRationalNumber::new_integer(1));
        assert!(DyadicRationalNumber::new(1, 1) == Game::new_dyadic(DyadicRationalNumber::new(1, 1)));
    }

    #[test]
    fn games_equal_their_copies() {
        let mut qc = QuickCheck::new();
        let test = |game: Game| {
            assert!(game.leq(&game));
            let copy = Game::new(game.left_moves().to_vec(), game.right_moves().to_vec());
            assert_eq!(game.partial_cmp(&copy), Some(Ordering::Equal));
            assert!(game == copy);
        };
        qc.quickcheck(test as fn(Game));
    }

    #[test]
    fn order_is_transitive() {
        let mut qc = QuickCheck::new();
        let test = |a: Game, b: Game, c: Game| {
            if a.leq(&b) && b.leq(&c) {
                assert!(a.leq(&c));
            }
        };
        qc.quickcheck(test as fn(Game, Game, Game));
    }

    #[test]
    fn number_order_agrees_with_game_order() {
        let mut qc = QuickCheck::new();
        let test = |lhs: DyadicRationalNumber, rhs: DyadicRationalNumber| {
            assert_eq!(
                Game::new_dyadic(lhs).partial_cmp(&Game::new_dyadic(rhs)),
                Some(lhs.cmp(&rhs))
            );
        };
        qc.quickcheck(test as fn(DyadicRationalNumber, DyadicRationalNumber));
    }
}
