mod common;

use common::{sample, stance};
use vota_informado::dataset::{Axis, Party};
use vota_informado::scoring::compass::{
    axis_score, PARTY_MARKER_SIZE, USER_MARKER_COLOR, USER_MARKER_SIZE,
};
use vota_informado::scoring::{
    compass_view, compute_user_position, CompassPosition, CompassReference, MarkerName,
};
use vota_informado::session::UserAnswers;

#[test]
fn no_concrete_answers_sits_at_the_origin() {
    let dataset = sample();
    let mut answers = UserAnswers::new();
    assert_eq!(
        compute_user_position(&answers, &dataset),
        CompassPosition::new(0.0, 0.0)
    );

    answers.skip("eco-impuestos");
    answers.skip("soc-eutanasia");
    assert_eq!(
        compute_user_position(&answers, &dataset),
        CompassPosition::new(0.0, 0.0)
    );
}

#[test]
fn axis_average_is_scaled_by_five() {
    let dataset = sample();
    let mut answers = UserAnswers::new();
    // economic sign -1, social sign 0
    answers.answer("eco-impuestos", stance(2));
    assert_eq!(axis_score(&answers, &dataset, Axis::Economic), -10.0);
    assert_eq!(axis_score(&answers, &dataset, Axis::Social), 0.0);

    // economic sign +1
    answers.answer("eco-regulacion", stance(1));
    assert_eq!(axis_score(&answers, &dataset, Axis::Economic), -2.5);
}

#[test]
fn questions_load_only_on_their_signed_axes() {
    let dataset = sample();
    let mut answers = UserAnswers::new();
    // social +1 and social -1
    answers.answer("soc-eutanasia", stance(2));
    answers.answer("ter-financiacion", stance(-1));

    let position = compute_user_position(&answers, &dataset);
    assert_eq!(position.social, 7.5);
    assert_eq!(position.economic, 0.0);
}

#[test]
fn skipped_questions_do_not_move_the_user() {
    let dataset = sample();
    let mut answers = UserAnswers::new();
    answers.answer("soc-eutanasia", stance(2));
    let before = compute_user_position(&answers, &dataset);

    answers.skip("soc-inmigracion");
    answers.skip("soc-concertada");
    assert_eq!(compute_user_position(&answers, &dataset), before);
}

#[test]
fn view_puts_the_user_first_then_every_party_with_coordinates() {
    let dataset = sample();
    let mut answers = UserAnswers::new();
    answers.answer("eco-impuestos", stance(-2));

    let markers = compass_view(&answers, &dataset, &CompassReference::standard());
    assert_eq!(markers.len(), dataset.parties.len() + 1);

    let user = &markers[0];
    assert_eq!(user.name, MarkerName::User);
    assert_eq!(user.name.label(), "Tú");
    assert_eq!(user.color, USER_MARKER_COLOR);
    assert_eq!(user.size, USER_MARKER_SIZE);
    assert_eq!(user.coords, CompassPosition::new(10.0, 0.0));

    let vox = markers
        .iter()
        .find(|marker| marker.name == MarkerName::Party(Party::Vox))
        .expect("Vox marker");
    assert_eq!(vox.coords, CompassPosition::new(7.0, -9.0));
    assert_eq!(vox.size, PARTY_MARKER_SIZE);
    assert_eq!(vox.color, dataset.party_color(Party::Vox));
}

#[test]
fn parties_missing_from_the_reference_are_omitted() {
    let dataset = sample();
    let reference = CompassReference::standard().without(Party::Cc);

    let markers = compass_view(&UserAnswers::new(), &dataset, &reference);
    assert_eq!(markers.len(), dataset.parties.len());
    assert!(markers
        .iter()
        .all(|marker| marker.name != MarkerName::Party(Party::Cc)));
}

#[test]
fn injected_coordinates_replace_the_standard_table() {
    let dataset = sample();
    let reference =
        CompassReference::standard().with_position(Party::Junts, CompassPosition::new(4.0, 1.5));

    let markers = compass_view(&UserAnswers::new(), &dataset, &reference);
    let junts = markers
        .iter()
        .find(|marker| marker.name == MarkerName::Party(Party::Junts))
        .expect("Junts marker");
    assert_eq!(junts.coords, CompassPosition::new(4.0, 1.5));
}
