use partizan::{
    game::{Game, Outcome, nus::Nus},
    numeric::{dyadic_rational_number::DyadicRationalNumber, nimber::Nimber},
};

#[test]
fn one_is_positive() {
    let one = Game::new_integer(1);
    assert!(one >= Game::zero());
    assert!(one > Game::zero());
    assert!(!(Game::zero() >= one));
    assert_eq!(one.outcome(), Outcome::Left);

    let half = Game::new_dyadic(DyadicRationalNumber::new(1, 1));
    assert!(half > Game::zero());
    assert!(half < one);
}

#[test]
fn star_is_confused_with_zero() {
    let star = Game::star();
    assert!(star.confused_with(&Game::zero()));
    assert_eq!(star.partial_cmp(&Game::zero()), None);
    assert_eq!(star.outcome(), Outcome::Next);
}

#[test]
fn star_options_cancel() {
    // Left's only move reverses out through the zero option of ∗
    let game = Game::new(vec![Game::star()], Vec::new());
    assert_eq!(game.canonical_form(), Game::zero());
    assert_eq!(Game::new(Vec::new(), vec![Game::star()]), Game::zero());

    let game = Game::new(vec![Game::star()], vec![Game::star()]);
    assert_eq!(game.canonical_form(), Game::zero());
    assert_eq!(game.to_string(), "0");
}

#[test]
fn star_is_impartial_and_switches_are_not() {
    assert!(Game::star().is_impartial());
    assert!(!Game::star().is_switch());

    let switch = Game::new(vec![Game::from(1)], vec![Game::from(-1)]);
    assert!(switch.is_switch());
    assert!(!switch.is_impartial());
}

#[test]
fn birthdays_measure_canonical_rank() {
    assert_eq!(Game::up().birthday(), 2);
    assert_eq!((Game::up() + Game::star()).birthday(), 2);
    assert_eq!(
        Game::new_dyadic(DyadicRationalNumber::new(1, 1)).birthday(),
        2
    );
}

#[test]
fn classic_display_forms() {
    assert_eq!((Game::from(1) + Game::star()).to_string(), "1∗");
    assert_eq!(
        Game::new(vec![Game::from(1)], vec![Game::from(-1)]).to_string(),
        "±1"
    );
    assert_eq!((Game::up() + Game::up()).to_string(), "2·↑");
    assert_eq!(
        Game::tiny(DyadicRationalNumber::new_integer(2)).to_string(),
        "➕_2"
    );
    assert_eq!(
        Game::new(vec![Game::new_nimber(Nimber::new(2))], vec![Game::zero()]).to_string(),
        "{∗2|0}"
    );
}

#[test]
fn simplest_number_rule() {
    // 1 is the simplest number strictly between 1/2 and 2
    let game = Game::new(
        vec![Game::from(DyadicRationalNumber::new(1, 1))],
        vec![Game::from(2)],
    );
    assert_eq!(game.canonical_form(), Game::new_integer(1));
    assert_eq!(game.to_string(), "1");
}

#[test]
fn values_form_a_partial_order_with_confusion() {
    let up = Game::up();
    let star = Game::star();
    assert_eq!(up.partial_cmp(&star), None);
    assert!(2 * &up > star);
    assert!(up.leq(&Game::from(1)));
    assert!(Game::down() < Game::zero());
}

#[test]
fn tiny_values_are_smaller_than_every_positive_value() {
    let tiny = Game::tiny(DyadicRationalNumber::new_integer(1));
    assert!(tiny > Game::zero());
    assert!(tiny < Game::new_dyadic(DyadicRationalNumber::new(1, 6)));
    assert!(tiny < Game::up());
    assert_eq!(tiny.outcome(), Outcome::Left);
}

#[test]
fn infinitesimals_cancel() {
    assert_eq!(Game::up() + Game::down(), Game::zero());
    assert_eq!(Game::up() + Game::star() + Game::star(), Game::up());
    assert_eq!(
        Game::from(1) + Game::star(),
        Game::new(vec![Game::from(1)], vec![Game::from(1)])
    );
}

#[test]
fn products_match_the_tables() {
    assert_eq!(Game::star() * Game::star(), Game::star());
    assert_eq!(Game::from(2) * Game::from(1), Game::from(1) + Game::from(1));
    assert_eq!(Game::up() * Game::zero(), Game::zero());
    assert_eq!(
        Game::from(DyadicRationalNumber::new(1, 1)) * Game::from(DyadicRationalNumber::new(1, 1)),
        Game::from(DyadicRationalNumber::new(1, 2))
    );
}

#[test]
fn nim_positions_reduce_to_nimbers() {
    let heap = Game::new_nimber(Nimber::new(3));
    assert!(heap.is_impartial());
    assert_eq!(heap.to_nus(), Some(Nus::new_nimber(Nimber::new(3))));
    assert_eq!((heap + Game::new_nimber(Nimber::new(2))).to_string(), "∗");
}

#[test]
fn dyadic_display_sweep() {
    for numerator in -7..=7_i64 {
        for exponent in 0..=3_u32 {
            let number = DyadicRationalNumber::new(numerator, exponent);
            let game = Game::new_dyadic(number);
            assert_eq!(
                game.to_string(),
                expected_number_string(numerator, exponent),
                "{numerator}/2^{exponent}"
            );
            assert_eq!(game.to_number(), Some(number));
        }
    }
}

fn expected_number_string(mut numerator: i64, mut exponent: u32) -> String {
    while numerator % 2 == 0 && exponent > 0 {
        numerator /= 2;
        exponent -= 1;
    }
    if exponent == 0 {
        numerator.to_string()
    } else {
        format!("{}/{}", numerator, 1_u64 << exponent)
    }
}
