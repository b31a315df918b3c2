//! Number-up-star values.
//!
//! A surprising amount of games collapse to a sum of a number, a multiple
//! of `↑`, and a nimber. The closed form makes those sums exact: no game
//! trees are compared to add or negate them, and the value formatter can
//! print them without braces.

use crate::{
    game::{Game, order::NodeId},
    numeric::{dyadic_rational_number::DyadicRationalNumber, nimber::Nimber},
};
use auto_ops::impl_op_ex;
use std::{cmp::Ordering, collections::HashMap};

/// A value of the form `number + up-multiple·↑ + nimber`.
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nus {
    number: DyadicRationalNumber,
    up_multiple: i32,
    nimber: Nimber,
}

impl Nus {
    /// Create a new number-up-star sum
    #[inline]
    pub const fn new(number: DyadicRationalNumber, up_multiple: i32, nimber: Nimber) -> Self {
        Self {
            number,
            up_multiple,
            nimber,
        }
    }

    /// Create a sum equal to an integer
    #[inline]
    pub const fn new_integer(integer: i64) -> Self {
        Self::new(
            DyadicRationalNumber::new_integer(integer),
            0,
            Nimber::new(0),
        )
    }

    /// Create a sum equal to a number
    #[inline]
    pub const fn new_number(number: DyadicRationalNumber) -> Self {
        Self::new(number, 0, Nimber::new(0))
    }

    /// Create a sum equal to a nimber
    #[inline]
    pub const fn new_nimber(nimber: Nimber) -> Self {
        Self::new(DyadicRationalNumber::new_integer(0), 0, nimber)
    }

    /// Get the number part of the sum
    #[inline]
    pub const fn number(self) -> DyadicRationalNumber {
        self.number
    }

    /// Get the up part of the sum. Positive for ups, negative for downs
    #[inline]
    pub const fn up_multiple(self) -> i32 {
        self.up_multiple
    }

    /// Get the nimber part of the sum
    #[inline]
    pub const fn nimber(self) -> Nimber {
        self.nimber
    }

    /// Check if only the number part is present
    #[inline]
    pub const fn is_number(self) -> bool {
        self.up_multiple == 0 && self.nimber.value() == 0
    }

    /// Check if the sum is an integer
    #[inline]
    pub fn is_integer(self) -> bool {
        self.is_number() && self.number.to_integer().is_some()
    }

    /// Check if only the nimber part is present
    #[inline]
    pub fn is_nimber(self) -> bool {
        self.number == DyadicRationalNumber::new_integer(0) && self.up_multiple == 0
    }
}

impl_op_ex!(+|lhs: &Nus, rhs: &Nus| -> Nus {
    Nus {
        number: lhs.number + rhs.number,
        up_multiple: lhs.up_multiple + rhs.up_multiple,
        nimber: lhs.nimber + rhs.nimber,
    }
});

impl_op_ex!(-|lhs: &Nus| -> Nus {
    Nus {
        number: -lhs.number,
        up_multiple: -lhs.up_multiple,
        // Nimber is its own negative
        nimber: lhs.nimber,
    }
});

impl Game {
    /// Construct the canonical form of a number-up-star sum.
    ///
    /// ```
    /// use partizan::{game::{Game, nus::Nus}, numeric::nimber::Nimber};
    ///
    /// let up_star = Game::new_nus(Nus::new(0.into(), 1, Nimber::new(1)));
    /// assert_eq!(up_star, Game::up() + Game::star());
    /// ```
    pub fn new_nus(nus: Nus) -> Game {
        if nus.is_number() {
            return Game::new_dyadic(nus.number());
        }

        if nus.up_multiple() == 0 {
            // A nimber with every option translated by the number
            let mut game = Game::new_dyadic(nus.number());
            let mut options = Vec::with_capacity(nus.nimber().value() as usize);
            for _ in 0..nus.nimber().value() {
                options.push(game);
                game = Game::from_parts_canonical(options.clone(), options.clone());
            }
            return game;
        }

        let number = Game::new_dyadic(nus.number());
        let sign = if nus.up_multiple() >= 0 { 1 } else { -1 };
        let prev_up = nus.up_multiple() - sign;
        let up_parity = (nus.up_multiple() & 1) as u32;
        let prev_nimber = nus.nimber().value() ^ up_parity ^ (prev_up as u32 & 1);

        if nus.up_multiple() == 1 && nus.nimber() == Nimber::new(1) {
            // n↑∗ = {n, n∗ | n}
            let star_move = Game::new_nus(Nus::new(nus.number(), 0, Nimber::new(1)));
            Game::from_parts_canonical(vec![number.clone(), star_move], vec![number])
        } else if nus.up_multiple() == -1 && nus.nimber() == Nimber::new(1) {
            // n↓∗ = {n | n, n∗}
            let star_move = Game::new_nus(Nus::new(nus.number(), 0, Nimber::new(1)));
            Game::from_parts_canonical(vec![number.clone()], vec![number, star_move])
        } else if nus.up_multiple() > 0 {
            let prev = Game::new_nus(Nus::new(nus.number(), prev_up, Nimber::new(prev_nimber)));
            Game::from_parts_canonical(vec![number], vec![prev])
        } else {
            let prev = Game::new_nus(Nus::new(nus.number(), prev_up, Nimber::new(prev_nimber)));
            Game::from_parts_canonical(vec![prev], vec![number])
        }
    }

    /// Express the game as a number-up-star sum, if it is one.
    ///
    /// Recognition runs on the canonical form, so any representation works:
    /// `{0|∗2}` comes back as `↑∗3`.
    pub fn to_nus(&self) -> Option<Nus> {
        recognize(&self.canonical_form(), &mut HashMap::default())
    }

    /// Get the number the game is equal to, if it is one
    pub fn to_number(&self) -> Option<DyadicRationalNumber> {
        self.to_nus().filter(|nus| nus.is_number()).map(Nus::number)
    }

    /// Check if the game is equal to a number
    pub fn is_number(&self) -> bool {
        self.to_number().is_some()
    }

    /// Check if the game is a sum of a number, ups, and a nimber
    pub fn is_number_up_star(&self) -> bool {
        self.to_nus().is_some()
    }
}

/// Match a canonical game against the handful of shapes number-up-star
/// sums canonicalize to. Inverse of the casework in [Game::new_nus].
///
/// Shared nodes are recognized once per top level call.
fn recognize(
    game: &Game,
    cache: &mut HashMap<NodeId, Option<Nus>, ahash::RandomState>,
) -> Option<Nus> {
    let id = NodeId::new(game);
    if let Some(&known) = cache.get(&id) {
        return known;
    }

    let nus = recognize_node(game, cache);
    cache.insert(id, nus);
    nus
}

fn recognize_node(
    game: &Game,
    cache: &mut HashMap<NodeId, Option<Nus>, ahash::RandomState>,
) -> Option<Nus> {
    let left = game.left_moves();
    let right = game.right_moves();

    if left.is_empty() && right.is_empty() {
        return Some(Nus::new_integer(0));
    }

    if left.is_empty() {
        // Canonical games without left options are non-positive integers
        debug_assert!(right.len() == 1, "not a canonical form");
        let number = recognize(&right[0], cache)?.number() - DyadicRationalNumber::new_integer(1);
        return Some(Nus::new_number(number));
    }

    if right.is_empty() {
        debug_assert!(left.len() == 1, "not a canonical form");
        let number = recognize(&left[0], cache)?.number() + DyadicRationalNumber::new_integer(1);
        return Some(Nus::new_number(number));
    }

    if let ([left_move], [right_move]) = (left, right)
        && let Some(left_nus) = recognize(left_move, cache)
        && let Some(right_nus) = recognize(right_move, cache)
    {
        if left_nus.is_number()
            && right_nus.is_number()
            && left_nus.number() < right_nus.number()
        {
            // {n|m} with n < m. The options of a canonical form leave the
            // mean as the simplest number in between
            return Some(Nus::new_number(
                left_nus.number().mean(&right_nus.number()),
            ));
        }

        if left_nus.is_number()
            && !right_nus.is_number()
            && left_nus.number() == right_nus.number()
            && right_nus.up_multiple() >= 0
        {
            // {n|G} one up step above G
            return Some(Nus::new(
                left_nus.number(),
                right_nus.up_multiple() + 1,
                right_nus.nimber() + Nimber::new(1),
            ));
        }

        if right_nus.is_number()
            && !left_nus.is_number()
            && left_nus.number() == right_nus.number()
            && left_nus.up_multiple() <= 0
        {
            // {G|n} one down step below G
            return Some(Nus::new(
                right_nus.number(),
                left_nus.up_multiple() - 1,
                left_nus.nimber() + Nimber::new(1),
            ));
        }
    }

    if let ([a, b], [right_move]) = (left, right)
        && let Some(right_nus) = recognize(right_move, cache)
        && right_nus.is_number()
    {
        // {n, n∗ | n} = n↑∗
        let (number_move, star_move) = if a.total_cmp(right_move) == Ordering::Equal {
            (a, b)
        } else {
            (b, a)
        };
        if number_move.total_cmp(right_move) == Ordering::Equal
            && let Some(star_nus) = recognize(star_move, cache)
            && star_nus.number() == right_nus.number()
            && star_nus.up_multiple() == 0
            && star_nus.nimber() == Nimber::new(1)
        {
            return Some(Nus::new(right_nus.number(), 1, Nimber::new(1)));
        }
    }

    if let ([left_move], [a, b]) = (left, right)
        && let Some(left_nus) = recognize(left_move, cache)
        && left_nus.is_number()
    {
        // {n | n, n∗} = n↓∗
        let (number_move, star_move) = if a.total_cmp(left_move) == Ordering::Equal {
            (a, b)
        } else {
            (b, a)
        };
        if number_move.total_cmp(left_move) == Ordering::Equal
            && let Some(star_nus) = recognize(star_move, cache)
            && star_nus.number() == left_nus.number()
            && star_nus.up_multiple() == 0
            && star_nus.nimber() == Nimber::new(1)
        {
            return Some(Nus::new(left_nus.number(), -1, Nimber::new(1)));
        }
    }

    if left.len() != right.len() {
        return None;
    }

    // {n, n∗, n∗2, ... | n, n∗, n∗2, ...} = n + ∗k. Canonical option lists
    // are sorted with the nimber part increasing, so positions line up
    let number = recognize(&left[0], cache).filter(|nus| nus.is_number())?.number();
    for (i, (l, r)) in left.iter().zip(right).enumerate() {
        if l.total_cmp(r) != Ordering::Equal {
            return None;
        }
        let nus = recognize(l, cache)?;
        if nus.number() != number
            || nus.up_multiple() != 0
            || nus.nimber() != Nimber::new(i as u32)
        {
            return None;
        }
    }
    Some(Nus::new(number, 0, Nimber::new(left.len() as u32)))
}

#[cfg(any(test, feature = "quickcheck"))]
impl quickcheck::Arbitrary for Nus {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        // Small components keep pairwise sum trees small
        Nus::new(
            DyadicRationalNumber::new(i64::arbitrary(g) % 8, u32::arbitrary(g) % 3),
            i32::arbitrary(g) % 6,
            Nimber::new(u32::arbitrary(g) % 4),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::QuickCheck;

    macro_rules! nus {
        ($number:expr, $up:expr, $nimber:expr) => {
            Nus::new(
                DyadicRationalNumber::new_integer($number),
                $up,
                Nimber::new($nimber),
            )
        };
    }

    #[test]
    fn well_known_values() {
        assert_eq!(Game::new_nus(nus!(0, 0, 0)), Game::zero());
        assert_eq!(Game::new_nus(nus!(0, 1, 0)), Game::up());
        assert_eq!(Game::new_nus(nus!(0, 0, 1)), Game::star());
        assert_eq!(Game::new_nus(nus!(0, 2, 1)), 2 * Game::up() + Game::star());
        assert_eq!(
            Game::new_nus(nus!(2, 0, 0)),
            Game::new_integer(2)
        );
    }

    #[test]
    fn round_trips() {
        let cases = [
            nus!(0, 1, 1),
            nus!(0, -2, 1),
            nus!(1, -3, 0),
            nus!(-2, 5, 3),
            Nus::new(DyadicRationalNumber::new(1, 1), 0, Nimber::new(2)),
        ];
        for nus in cases {
            assert_eq!(Game::new_nus(nus).to_nus(), Some(nus), "{nus:?}");
        }
    }

    #[test]
    fn recognizes_star_towers() {
        let game = Game::new(vec![Game::zero()], vec![Game::new_nimber(Nimber::new(2))]);
        assert_eq!(game.to_nus(), Some(nus!(0, 1, 3)));

        let game = Game::new(vec![Game::new_nimber(Nimber::new(2))], vec![Game::zero()]);
        assert_eq!(game.to_nus(), Some(nus!(0, -1, 3)));
    }

    #[test]
    fn recognizes_numbers() {
        let game = Game::new(
            vec![Game::from(DyadicRationalNumber::new(1, 1))],
            vec![Game::from(2)],
        );
        assert_eq!(game.to_nus(), Some(Nus::new_integer(1)));
        assert_eq!(game.to_number(), Some(DyadicRationalNumber::new_integer(1)));
        assert!(game.is_number());

        assert_eq!(Game::star().to_number(), None);
        assert!(Game::up().is_number_up_star());
        assert_eq!(Game::new(vec![Game::from(1)], vec![Game::from(-1)]).to_nus(), None);
    }

    #[test]
    fn sums_match_game_sums() {
        let mut qc = QuickCheck::new();
        let test = |a: Nus, b: Nus| {
            assert_eq!(Game::new_nus(a) + Game::new_nus(b), Game::new_nus(a + b));
        };
        qc.quickcheck(test as fn(Nus, Nus));
    }

    #[test]
    fn round_trips_through_games() {
        let mut qc = QuickCheck::new();
        let test = |nus: Nus| {
            assert_eq!(Game::new_nus(nus).to_nus(), Some(nus));
        };
        qc.quickcheck(test as fn(Nus));
    }

    #[test]
    fn negation_mirrors_components() {
        assert_eq!(-nus!(1, 2, 3), Nus::new(DyadicRationalNumber::new_integer(-1), -2, Nimber::new(3)));

        let mut qc = QuickCheck::new();
        let test = |nus: Nus| {
            assert_eq!(Game::new_nus(-nus), -Game::new_nus(nus));
        };
        qc.quickcheck(test as fn(Nus));
    }
}
