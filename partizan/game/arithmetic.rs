//! Sums, negatives, and products of games.
//!
//! All operations build the defining option-for-option trees and rely on
//! structural sharing plus per-invocation memoization to stay polynomial in
//! the number of distinct positions. Results are raw games; canonicalize or
//! compare them as needed.

use crate::{
    game::{Game, order::NodeId},
    numeric::dyadic_rational_number::DyadicRationalNumber,
};
use auto_ops::{impl_op_ex, impl_op_ex_commutative};
use itertools::Itertools;
use std::{collections::HashMap, iter::Sum};

/// Memo tables for one top level arithmetic invocation.
///
/// Sums and products are commutative in value, so their keys are ordered by
/// node address and each unordered pair is computed once.
struct ArithCache {
    sums: HashMap<(NodeId, NodeId), Game, ahash::RandomState>,
    negatives: HashMap<NodeId, Game, ahash::RandomState>,
    products: HashMap<(NodeId, NodeId), Game, ahash::RandomState>,
}

fn pair_key(g: &Game, h: &Game) -> (NodeId, NodeId) {
    if g.node_addr() <= h.node_addr() {
        (NodeId::new(g), NodeId::new(h))
    } else {
        (NodeId::new(h), NodeId::new(g))
    }
}

impl ArithCache {
    fn new() -> ArithCache {
        ArithCache {
            sums: HashMap::default(),
            negatives: HashMap::default(),
            products: HashMap::default(),
        }
    }

    /// `G + H = { GL+H, G+HL | GR+H, G+HR }`
    fn sum(&mut self, g: &Game, h: &Game) -> Game {
        if g.left_moves().is_empty() && g.right_moves().is_empty() {
            return h.clone();
        }
        if h.left_moves().is_empty() && h.right_moves().is_empty() {
            return g.clone();
        }

        let key = pair_key(g, h);
        if let Some(cached) = self.sums.get(&key) {
            return cached.clone();
        }

        let mut left = Vec::with_capacity(g.left_moves().len() + h.left_moves().len());
        let mut right = Vec::with_capacity(g.right_moves().len() + h.right_moves().len());

        for g_l in g.left_moves() {
            left.push(self.sum(g_l, h));
        }
        for h_l in h.left_moves() {
            left.push(self.sum(g, h_l));
        }
        for g_r in g.right_moves() {
            right.push(self.sum(g_r, h));
        }
        for h_r in h.right_moves() {
            right.push(self.sum(g, h_r));
        }

        let sum = Game::from_parts(left, right);
        self.sums.insert(key, sum.clone());
        sum
    }

    /// `-G = { -GR | -GL }`, the same game with the players swapped
    fn negative(&mut self, game: &Game) -> Game {
        if game.left_moves().is_empty() && game.right_moves().is_empty() {
            return Game::zero();
        }

        let key = NodeId::new(game);
        if let Some(cached) = self.negatives.get(&key) {
            return cached.clone();
        }

        let left: Vec<Game> = game
            .right_moves()
            .iter()
            .map(|option| self.negative(option))
            .collect();
        let right: Vec<Game> = game
            .left_moves()
            .iter()
            .map(|option| self.negative(option))
            .collect();

        // Negation maps canonical forms to canonical forms
        let negative = if game.is_marked_canonical() {
            Game::from_parts_canonical(left, right)
        } else {
            Game::from_parts(left, right)
        };
        self.negatives.insert(key, negative.clone());
        negative
    }

    /// Conway product,
    /// `G×H = { GL×H + G×HL - GL×HL, GR×H + G×HR - GR×HR | GL×H + G×HR - GL×HR, GR×H + G×HL - GR×HL }`.
    ///
    /// Well behaved on numbers. For general games the value of the product
    /// depends on the forms of the factors, so canonicalize the operands
    /// first if a value-level product is wanted.
    fn product(&mut self, g: &Game, h: &Game) -> Game {
        if (g.left_moves().is_empty() && g.right_moves().is_empty())
            || (h.left_moves().is_empty() && h.right_moves().is_empty())
        {
            return Game::zero();
        }

        let key = pair_key(g, h);
        if let Some(cached) = self.products.get(&key) {
            return cached.clone();
        }

        let mut left = Vec::new();
        let mut right = Vec::new();

        for (g_opt, h_opt) in g.left_moves().iter().cartesian_product(h.left_moves()) {
            left.push(self.product_part(g, h, g_opt, h_opt));
        }
        for (g_opt, h_opt) in g.right_moves().iter().cartesian_product(h.right_moves()) {
            left.push(self.product_part(g, h, g_opt, h_opt));
        }
        for (g_opt, h_opt) in g.left_moves().iter().cartesian_product(h.right_moves()) {
            right.push(self.product_part(g, h, g_opt, h_opt));
        }
        for (g_opt, h_opt) in g.right_moves().iter().cartesian_product(h.left_moves()) {
            right.push(self.product_part(g, h, g_opt, h_opt));
        }

        let product = Game::from_parts(left, right);
        self.products.insert(key, product.clone());
        product
    }

    /// One option of a product, `A×H + G×B - A×B` for the option pair `(A, B)`
    fn product_part(&mut self, g: &Game, h: &Game, g_opt: &Game, h_opt: &Game) -> Game {
        let by_g = self.product(g_opt, h);
        let by_h = self.product(g, h_opt);
        let by_both = self.product(g_opt, h_opt);
        let sum = self.sum(&by_g, &by_h);
        let negative = self.negative(&by_both);
        self.sum(&sum, &negative)
    }

    fn multiple(&mut self, n: i64, game: &Game) -> Game {
        let unit = if n < 0 {
            self.negative(game)
        } else {
            game.clone()
        };
        let mut total = Game::zero();
        for _ in 0..n.unsigned_abs() {
            total = self.sum(&total, &unit);
        }
        total
    }
}

impl Game {
    /// Construct a sum of two games. Alias of the `+` operator
    pub fn construct_sum(g: &Game, h: &Game) -> Game {
        ArithCache::new().sum(g, h)
    }

    /// Construct the negative of a game. Alias of the unary `-` operator
    pub fn construct_negative(&self) -> Game {
        ArithCache::new().negative(self)
    }

    /// Construct the Conway product of two games. Alias of the `*` operator.
    ///
    /// Faithful to multiplication on number games; for other games the
    /// result depends on the operand forms, not only their values.
    pub fn construct_product(g: &Game, h: &Game) -> Game {
        ArithCache::new().product(g, h)
    }

    /// Construct the sum of `n` copies of the game, negated for negative
    /// `n`. Alias of the `*` operator with an integer operand
    pub fn construct_multiple(&self, n: i64) -> Game {
        ArithCache::new().multiple(n, self)
    }
}

impl_op_ex!(+|g: &Game, h: &Game| -> Game { Game::construct_sum(g, h) });
impl_op_ex!(+=|g: &mut Game, h: &Game| { *g = Game::construct_sum(g, h) });
impl_op_ex!(-|g: &Game| -> Game { Game::construct_negative(g) });
impl_op_ex!(-|g: &Game, h: &Game| -> Game {
    Game::construct_sum(g, &Game::construct_negative(h))
});
impl_op_ex!(-=|g: &mut Game, h: &Game| {
    *g = Game::construct_sum(g, &Game::construct_negative(h));
});
impl_op_ex!(*|g: &Game, h: &Game| -> Game { Game::construct_product(g, h) });
impl_op_ex_commutative!(*|g: &Game, n: &i64| -> Game { g.construct_multiple(*n) });
impl_op_ex_commutative!(*|g: &Game, n: &DyadicRationalNumber| -> Game {
    Game::construct_product(g, &Game::new_dyadic(*n))
});

impl_op_ex_commutative!(+|g: &Game, n: &i64| -> Game { g + Game::new_integer(*n) });
impl_op_ex_commutative!(+|g: &Game, n: &DyadicRationalNumber| -> Game { g + Game::new_dyadic(*n) });
impl_op_ex!(-|g: &Game, n: &i64| -> Game { g - Game::new_integer(*n) });
impl_op_ex!(-|n: &i64, g: &Game| -> Game { Game::new_integer(*n) - g });
impl_op_ex!(-|g: &Game, n: &DyadicRationalNumber| -> Game { g - Game::new_dyadic(*n) });
impl_op_ex!(-|n: &DyadicRationalNumber, g: &Game| -> Game { Game::new_dyadic(*n) - g });

impl Sum for Game {
    fn sum<I: Iterator<Item = Game>>(iter: I) -> Game {
        iter.fold(Game::zero(), |acc, game| acc + game)
    }
}

impl<'a> Sum<&'a Game> for Game {
    fn sum<I: Iterator<Item = &'a Game>>(iter: I) -> Game {
        iter.fold(Game::zero(), |acc, game| acc + game)
    }
}
