mod common;

use common::{party, question, sample, single_party_dataset, stance, topic};
use vota_informado::dataset::{Party, PoliticalDataset};
use vota_informado::scoring::{compute_affinity, compute_affinity_breakdown, score_party};
use vota_informado::session::{Answer, Importance, UserAnswers, UserWeights};

fn answers(entries: &[(&str, i8)]) -> UserAnswers {
    entries
        .iter()
        .map(|&(id, value)| (id, Answer::Answered(stance(value))))
        .collect()
}

#[test]
fn matching_every_answer_scores_one_hundred() {
    let dataset = single_party_dataset();
    let weights = UserWeights::for_dataset(&dataset);
    let ranking = compute_affinity(&answers(&[("q1", 2), ("q2", -2)]), &weights, &dataset);

    assert_eq!(ranking.len(), 1);
    assert_eq!(ranking[0].party, Party::Pp);
    assert_eq!(ranking[0].score, 100.0);
}

#[test]
fn one_opposed_answer_halves_the_topic() {
    let dataset = single_party_dataset();
    let weights = UserWeights::for_dataset(&dataset);
    let ranking = compute_affinity(&answers(&[("q1", 2), ("q2", 2)]), &weights, &dataset);

    assert_eq!(ranking[0].score, 50.0);

    let breakdown = score_party(
        &answers(&[("q1", 2), ("q2", 2)]),
        &weights,
        &dataset,
        Party::Pp,
    );
    assert_eq!(breakdown.components.len(), 1);
    assert_eq!(breakdown.components[0].affinity, 0.5);
    assert_eq!(breakdown.components[0].effective_weight, 3.0);
    assert_eq!(breakdown.components[0].scored_questions, 2);
}

#[test]
fn missing_answers_are_not_penalised() {
    let dataset = single_party_dataset();
    let weights = UserWeights::for_dataset(&dataset);

    let only_first = compute_affinity(&answers(&[("q1", 2)]), &weights, &dataset);
    assert_eq!(only_first[0].score, 100.0);

    let mut skipped = answers(&[("q1", 2)]);
    skipped.skip("q2");
    let with_skip = compute_affinity(&skipped, &weights, &dataset);
    assert_eq!(with_skip, only_first);
}

#[test]
fn no_answers_scores_every_party_zero_in_dataset_order() {
    let dataset = sample();
    let weights = UserWeights::for_dataset(&dataset);
    let ranking = compute_affinity(&UserAnswers::new(), &weights, &dataset);

    assert_eq!(ranking.len(), dataset.parties.len());
    assert!(ranking.iter().all(|result| result.score == 0.0));
    let order: Vec<Party> = ranking.iter().map(|result| result.party).collect();
    let expected: Vec<Party> = dataset.parties.iter().map(|info| info.name).collect();
    assert_eq!(order, expected);
}

#[test]
fn ranking_is_descending_and_stable_for_ties() {
    let dataset = PoliticalDataset::new(
        vec![topic(
            "t1",
            vec![
                question("q1", &[(Party::Psoe, -2), (Party::Pp, 2)], 0, 0),
                question("q2", &[(Party::Psoe, 2), (Party::Pp, -2)], 0, 0),
            ],
        )],
        vec![party(Party::Psoe, "#DC2626"), party(Party::Pp, "#1D4ED8")],
    )
    .expect("valid dataset");
    let weights = UserWeights::for_dataset(&dataset);

    let decided = compute_affinity(&answers(&[("q1", 2), ("q2", -2)]), &weights, &dataset);
    assert_eq!(decided[0].party, Party::Pp);
    assert_eq!(decided[0].score, 100.0);
    assert_eq!(decided[1].party, Party::Psoe);
    assert_eq!(decided[1].score, 0.0);

    let tied = compute_affinity(&answers(&[("q1", 2), ("q2", 2)]), &weights, &dataset);
    assert_eq!(tied[0].score, tied[1].score);
    assert_eq!(tied[0].party, Party::Psoe);
    assert_eq!(tied[1].party, Party::Pp);
}

#[test]
fn parties_without_a_stance_skip_that_question() {
    let dataset = PoliticalDataset::new(
        vec![topic(
            "t1",
            vec![
                question("q1", &[(Party::Cc, 1), (Party::Pnv, 1)], 0, 0),
                question("q2", &[(Party::Pnv, -2)], 0, 0),
            ],
        )],
        vec![party(Party::Cc, "#FACC15"), party(Party::Pnv, "#15803D")],
    )
    .expect("valid dataset");
    let weights = UserWeights::for_dataset(&dataset);
    let ranking = compute_affinity(&answers(&[("q1", 1), ("q2", 2)]), &weights, &dataset);

    assert_eq!(ranking[0].party, Party::Cc);
    assert_eq!(ranking[0].score, 100.0);
    assert_eq!(ranking[1].party, Party::Pnv);
    assert_eq!(ranking[1].score, 50.0);
}

#[test]
fn raising_a_topic_weight_widens_the_gap_it_explains() {
    let dataset = PoliticalDataset::new(
        vec![
            topic("t1", vec![question("q1", &[(Party::Pp, 2), (Party::Vox, -2)], 0, 0)]),
            topic("t2", vec![question("q2", &[(Party::Pp, 2), (Party::Vox, 2)], 0, 0)]),
        ],
        vec![party(Party::Pp, "#1D4ED8"), party(Party::Vox, "#16A34A")],
    )
    .expect("valid dataset");
    let user = answers(&[("q1", 2), ("q2", 2)]);

    let mut previous_gap = f64::NEG_INFINITY;
    for level in 0..=Importance::MAX {
        let mut weights = UserWeights::for_dataset(&dataset);
        weights.set("t1", Importance::new(level));
        let ranking = compute_affinity(&user, &weights, &dataset);

        assert_eq!(ranking[0].party, Party::Pp);
        assert_eq!(ranking[0].score, 100.0);
        let gap = ranking[0].score - ranking[1].score;
        assert!(gap > previous_gap, "gap {gap} did not grow at level {level}");
        previous_gap = gap;
    }
}

#[test]
fn scores_stay_within_bounds_on_the_sample_dataset() {
    let dataset = sample();
    let weights = UserWeights::for_dataset(&dataset);

    for value in -2..=2 {
        let user: UserAnswers = dataset
            .questions()
            .map(|question| (question.id.clone(), Answer::Answered(stance(value))))
            .collect();
        for result in compute_affinity(&user, &weights, &dataset) {
            assert!(
                (0.0..=100.0).contains(&result.score),
                "{} scored {}",
                result.party,
                result.score
            );
        }
    }
}

#[test]
fn repeated_calls_are_identical() {
    let dataset = sample();
    let mut weights = UserWeights::for_dataset(&dataset);
    weights.set("social", Importance::new(4));
    let user = answers(&[
        ("eco-impuestos", 1),
        ("ter-referendum", -2),
        ("soc-eutanasia", 2),
    ]);

    assert_eq!(
        compute_affinity_breakdown(&user, &weights, &dataset),
        compute_affinity_breakdown(&user, &weights, &dataset)
    );
}

#[test]
fn breakdown_lists_only_scored_topics() {
    let dataset = sample();
    let weights = UserWeights::for_dataset(&dataset);
    let user = answers(&[("eco-impuestos", 2)]);

    for entry in compute_affinity_breakdown(&user, &weights, &dataset) {
        assert_eq!(entry.components.len(), 1, "{}", entry.party);
        assert_eq!(entry.components[0].topic_id, "economia");
        assert_eq!(entry.result().score, entry.score);
    }
}
