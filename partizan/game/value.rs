//! Rendering of game values.
//!
//! [Game]'s [Display] canonicalizes first and then writes the value the way
//! the literature does: numbers and number-up-star sums in closed form,
//! switches as mean and spread, tiny and miny with subscripts, and plain
//! brace notation when nothing shorter applies.

use crate::{
    display,
    game::{Game, nus::Nus},
    numeric::dyadic_rational_number::DyadicRationalNumber,
};
use std::fmt::{self, Display, Write};

impl Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&value_string(&self.canonical_form()))
    }
}

fn value_string(game: &Game) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_value(&mut out, game);
    out
}

fn write_value(w: &mut impl Write, game: &Game) -> fmt::Result {
    if let Some(nus) = game.to_nus()
        && displays_compactly(nus)
    {
        return write_nus(w, nus);
    }

    if let Some(subscript) = tiny_subscript(game) {
        return write!(w, "➕_{}", subscript);
    }

    if let Some(subscript) = miny_subscript(game) {
        return write!(w, "➖_{}", subscript);
    }

    if let Some((mean, spread)) = switch_parts(game) {
        if mean != DyadicRationalNumber::new_integer(0) {
            write!(w, "{}", mean)?;
        }
        return write!(w, "±{}", spread);
    }

    let mut left: Vec<String> = game.left_moves().iter().map(value_string).collect();
    let mut right: Vec<String> = game.right_moves().iter().map(value_string).collect();
    left.sort();
    right.sort();

    display::braces(w, |w| {
        display::commas(w, &left)?;
        w.write_char('|')?;
        display::commas(w, &right)
    })
}

/// Closed forms stay readable only while at most one component needs a
/// multiplier: `13·↑∗2` could be read as three different sums. Everything
/// else goes through brace notation.
fn displays_compactly(nus: Nus) -> bool {
    nus.up_multiple() == 0
        || (nus.nimber().value() <= 1
            && (nus.number() == DyadicRationalNumber::new_integer(0)
                || nus.up_multiple().abs() == 1))
}

fn write_nus(w: &mut impl Write, nus: Nus) -> fmt::Result {
    if nus.is_number() {
        return write!(w, "{}", nus.number());
    }

    if nus.number() != DyadicRationalNumber::new_integer(0) {
        write!(w, "{}", nus.number())?;
    }

    match nus.up_multiple() {
        0 => {}
        1 => w.write_char('↑')?,
        -1 => w.write_char('↓')?,
        n if n > 0 => write!(w, "{}·↑", n)?,
        n => write!(w, "{}·↓", -n)?,
    }

    if nus.nimber().value() != 0 {
        write!(w, "{}", nus.nimber())?;
    }

    Ok(())
}

/// `➕_x = {0 || 0 | -x}` for a positive number `x`
fn tiny_subscript(game: &Game) -> Option<DyadicRationalNumber> {
    if let ([left], [right]) = (game.left_moves(), game.right_moves())
        && is_zero(left)
        && let ([inner_left], [inner_right]) = (right.left_moves(), right.right_moves())
        && is_zero(inner_left)
        && let Some(number) = inner_right.to_number()
        && number < DyadicRationalNumber::new_integer(0)
    {
        Some(-number)
    } else {
        None
    }
}

fn miny_subscript(game: &Game) -> Option<DyadicRationalNumber> {
    if let ([left], [right]) = (game.left_moves(), game.right_moves())
        && is_zero(right)
        && let ([inner_left], [inner_right]) = (left.left_moves(), left.right_moves())
        && is_zero(inner_right)
        && let Some(number) = inner_left.to_number()
        && number > DyadicRationalNumber::new_integer(0)
    {
        Some(number)
    } else {
        None
    }
}

fn is_zero(game: &Game) -> bool {
    game.left_moves().is_empty() && game.right_moves().is_empty()
}

/// A switch `{a|b}` with numbers `a > b` shows as mean plus-or-minus spread
fn switch_parts(game: &Game) -> Option<(DyadicRationalNumber, DyadicRationalNumber)> {
    if let ([left], [right]) = (game.left_moves(), game.right_moves())
        && let Some(a) = left.to_number()
        && let Some(b) = right.to_number()
        && a > b
    {
        Some((a.mean(&b), a.mean(&-b)))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::nimber::Nimber;

    macro_rules! assert_displays {
        ($game:expr, $expected:expr) => {
            assert_eq!(($game).to_string(), $expected);
        };
    }

    #[test]
    fn nimbers() {
        assert_displays!(Game::star(), "∗");
        assert_displays!(Game::new_nimber(Nimber::new(2)), "∗2");
        assert_displays!(Game::new(vec![Game::zero()], vec![Game::zero()]), "∗");
    }

    #[test]
    fn ups_and_downs() {
        assert_displays!(Game::up(), "↑");
        assert_displays!(Game::up() + Game::star(), "↑∗");
        assert_displays!(2 * Game::up(), "2·↑");
        assert_displays!(2 * Game::up() + Game::star(), "2·↑∗");
        assert_displays!(Game::down(), "↓");
        assert_displays!(Game::down() + Game::star(), "↓∗");
        assert_displays!(2 * Game::down(), "2·↓");
        assert_displays!(2 * Game::down() + Game::star(), "2·↓∗");
    }

    #[test]
    fn numbers_with_stars() {
        assert_displays!(Game::from(1) + Game::star(), "1∗");
        assert_displays!(Game::from(1) + Game::up() + Game::star(), "1↑∗");
        assert_displays!(
            Game::new_nus(Nus::new(
                DyadicRationalNumber::new(1, 1),
                0,
                Nimber::new(2)
            )),
            "1/2∗2"
        );
    }

    #[test]
    fn switches() {
        assert_displays!(Game::new(vec![Game::from(1)], vec![Game::from(-1)]), "±1");
        assert_displays!(Game::new(vec![Game::from(3)], vec![Game::from(1)]), "2±1");
        assert_displays!(Game::new(vec![Game::from(0)], vec![Game::from(-4)]), "-2±2");
        assert_displays!(
            Game::new(vec![Game::from(-1)], vec![Game::from(-2)]),
            "-3/2±1/2"
        );
    }

    #[test]
    fn tiny_and_miny() {
        assert_displays!(Game::tiny(DyadicRationalNumber::new_integer(2)), "➕_2");
        assert_displays!(Game::miny(DyadicRationalNumber::new_integer(2)), "➖_2");
        assert_displays!(Game::tiny(DyadicRationalNumber::new(1, 1)), "➕_1/2");
    }

    #[test]
    fn star_towers_need_braces() {
        let game = Game::new(vec![Game::zero()], vec![Game::new_nimber(Nimber::new(2))]);
        assert_displays!(game, "{0|∗2}");

        let game = Game::new(vec![Game::new_nimber(Nimber::new(2))], vec![Game::zero()]);
        assert_displays!(game, "{∗2|0}");
    }

    #[test]
    fn brace_options_are_sorted_and_compact() {
        let game = Game::new(
            vec![
                Game::new(vec![Game::from(4)], vec![Game::from(2)]),
                Game::from(DyadicRationalNumber::new(5, 1)),
            ],
            vec![
                Game::new(vec![Game::from(0)], vec![Game::from(-4)]),
                Game::new(vec![Game::from(-1)], vec![Game::from(-2)]),
            ],
        );
        assert_displays!(game, "{3±1,5/2|-2±2,-3/2±1/2}");
    }
}
