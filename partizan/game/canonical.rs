//! Reduction of games to canonical form.
//!
//! Every game value has a unique simplest representative, reached by
//! repeatedly removing dominated options and bypassing reversible ones.
//! Both reductions preserve the value of the game, so they may be checked
//! against the original position throughout.

use crate::game::{CachedCanonical, Game, order::OrderCache};
use std::cmp::Ordering;

impl Game {
    /// Get the canonical form of the game, the unique simplest game with
    /// the same value.
    ///
    /// Results are cached on the nodes themselves, so canonicalizing a game
    /// twice, or canonicalizing a parent after a child, does no repeated
    /// work and always returns the same shared node.
    pub fn canonical_form(&self) -> Game {
        let mut cache = OrderCache::new();
        self.canonicalize(&mut cache)
    }

    fn canonicalize(&self, cache: &mut OrderCache) -> Game {
        if let Some(canonical) = self.canonical_link() {
            return canonical;
        }

        let left: Vec<Game> = self
            .left_moves()
            .iter()
            .map(|option| option.canonicalize(cache))
            .collect();
        let right: Vec<Game> = self
            .right_moves()
            .iter()
            .map(|option| option.canonicalize(cache))
            .collect();

        let left = bypass_reversible_moves_left(cache, eliminate_duplicates(left), self);
        let left = eliminate_dominated_moves(cache, left, true);
        let right = bypass_reversible_moves_right(cache, eliminate_duplicates(right), self);
        let right = eliminate_dominated_moves(cache, right, false);

        let unchanged = left.len() == self.left_moves().len()
            && right.len() == self.right_moves().len()
            && left.iter().zip(self.left_moves()).all(|(a, b)| a.same_node(b))
            && right.iter().zip(self.right_moves()).all(|(a, b)| a.same_node(b));

        if unchanged {
            self.mark_canonical();
            return self.clone();
        }

        let canonical = Game::from_parts_canonical(left, right);
        let _ = self
            .inner
            .canonical
            .set(CachedCanonical::Reduced(canonical.clone()));
        canonical
    }

    fn canonical_link(&self) -> Option<Game> {
        self.inner.canonical.get().map(|cached| match cached {
            CachedCanonical::Canonical => self.clone(),
            CachedCanonical::Reduced(canonical) => canonical.clone(),
        })
    }
}

fn eliminate_duplicates(mut moves: Vec<Game>) -> Vec<Game> {
    moves.sort_by(|lhs, rhs| lhs.total_cmp(rhs));
    moves.dedup_by(|lhs, rhs| lhs.total_cmp(rhs) == Ordering::Equal);
    moves
}

/// Remove options no player would pick: for Left a move `<=` another left
/// move, for Right a move `>=` another right move.
///
/// Options must hold no equal pair, otherwise both copies get removed.
/// Canonical options are structurally unique per value, so the structural
/// dedup before this pass guarantees that.
fn eliminate_dominated_moves(
    cache: &mut OrderCache,
    moves: Vec<Game>,
    eliminate_smaller_moves: bool,
) -> Vec<Game> {
    let mut moves: Vec<Option<Game>> = moves.into_iter().map(Some).collect();

    'outer: for i in 0..moves.len() {
        'inner: for j in 0..i {
            let Some(move_i) = moves[i].clone() else {
                continue 'outer;
            };
            let Some(move_j) = moves[j].clone() else {
                continue 'inner;
            };

            let remove_i = (eliminate_smaller_moves && cache.leq(&move_i, &move_j))
                || (!eliminate_smaller_moves && cache.leq(&move_j, &move_i));

            let remove_j = (eliminate_smaller_moves && cache.leq(&move_j, &move_i))
                || (!eliminate_smaller_moves && cache.leq(&move_i, &move_j));

            if remove_i {
                moves[i] = None;
            }

            if remove_j {
                moves[j] = None;
            }
        }
    }

    moves.into_iter().flatten().collect()
}

/// Replace every reversible left option by the left options of its
/// reversing position.
///
/// A left option `GL` is reversible when some `GLR <= G`: Right would
/// answer Left's move to `GL` with `GLR`, so Left may as well move straight
/// to any left option of `GLR`. Replacements are appended and revisited,
/// since they can be reversible again; each is two levels deeper in a
/// canonical tree, so the loop terminates.
fn bypass_reversible_moves_left(
    cache: &mut OrderCache,
    moves: Vec<Game>,
    game: &Game,
) -> Vec<Game> {
    let mut moves: Vec<Option<Game>> = moves.into_iter().map(Some).collect();

    let mut i = 0;
    while i < moves.len() {
        let Some(g_l) = moves[i].clone() else {
            i += 1;
            continue;
        };
        for g_lr in g_l.right_moves() {
            if cache.leq(g_lr, game) {
                moves[i] = None;
                for g_lrl in g_lr.left_moves() {
                    let seen = moves
                        .iter()
                        .flatten()
                        .any(|existing| existing.total_cmp(g_lrl) == Ordering::Equal);
                    if !seen {
                        moves.push(Some(g_lrl.clone()));
                    }
                }
                break;
            }
        }
        i += 1;
    }

    moves.into_iter().flatten().collect()
}

fn bypass_reversible_moves_right(
    cache: &mut OrderCache,
    moves: Vec<Game>,
    game: &Game,
) -> Vec<Game> {
    let mut moves: Vec<Option<Game>> = moves.into_iter().map(Some).collect();

    let mut i = 0;
    while i < moves.len() {
        let Some(g_r) = moves[i].clone() else {
            i += 1;
            continue;
        };
        for g_rl in g_r.left_moves() {
            if cache.leq(game, g_rl) {
                moves[i] = None;
                for g_rlr in g_rl.right_moves() {
                    let seen = moves
                        .iter()
                        .flatten()
                        .any(|existing| existing.total_cmp(g_rlr) == Ordering::Equal);
                    if !seen {
                        moves.push(Some(g_rlr.clone()));
                    }
                }
                break;
            }
        }
        i += 1;
    }

    moves.into_iter().flatten().collect()
}
