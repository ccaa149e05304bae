use quiz_core::model::{Question, QuizSettings};
use rand::Rng;
use rand::seq::SliceRandom;

/// Working set chosen for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionPlan {
    pub questions: Vec<Question>,
    /// Number of questions the bank offered before the cap.
    pub bank_size: usize,
}

impl SessionPlan {
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Questions dropped by the cap.
    #[must_use]
    pub fn left_out(&self) -> usize {
        self.bank_size.saturating_sub(self.questions.len())
    }
}

/// Builds a session's working set: options shuffled per question, questions
/// shuffled, then capped at `max_questions`.
pub struct SessionBuilder {
    max_questions: usize,
}

impl SessionBuilder {
    #[must_use]
    pub fn new(max_questions: usize) -> Self {
        Self { max_questions }
    }

    #[must_use]
    pub fn from_settings(settings: &QuizSettings) -> Self {
        Self::new(usize::try_from(settings.max_questions()).unwrap_or(usize::MAX))
    }

    /// Draw a fresh working set. Every call consumes new randomness.
    pub fn build<R: Rng + ?Sized>(self, mut questions: Vec<Question>, rng: &mut R) -> SessionPlan {
        let bank_size = questions.len();

        for question in &mut questions {
            question.options_mut().shuffle(rng);
        }
        questions.shuffle(rng);
        questions.truncate(self.max_questions);

        SessionPlan {
            questions,
            bank_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionId;
    use quiz_core::parse_bank;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::{HashMap, HashSet};

    fn bank(n: usize) -> Vec<Question> {
        let text = (0..n)
            .map(|i| format!("Q{i}=====a{i}=====#b{i}=====c{i}=====d{i}"))
            .collect::<Vec<_>>()
            .join("+++++");
        parse_bank(&text)
    }

    fn option_indexes(question: &Question) -> Vec<u32> {
        question.options().iter().map(|o| o.id().index()).collect()
    }

    #[test]
    fn caps_large_bank_at_fifty() {
        let mut rng = StdRng::seed_from_u64(1);
        let plan = SessionBuilder::from_settings(&QuizSettings::default()).build(bank(200), &mut rng);

        assert_eq!(plan.total(), 50);
        assert_eq!(plan.bank_size, 200);
        assert_eq!(plan.left_out(), 150);
        let ids: HashSet<QuestionId> = plan.questions.iter().map(Question::id).collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn small_bank_is_used_whole() {
        let mut rng = StdRng::seed_from_u64(2);
        let plan = SessionBuilder::new(50).build(bank(7), &mut rng);
        assert_eq!(plan.total(), 7);
        assert_eq!(plan.left_out(), 0);
    }

    #[test]
    fn empty_bank_gives_empty_plan() {
        let mut rng = StdRng::seed_from_u64(3);
        let plan = SessionBuilder::new(50).build(Vec::new(), &mut rng);
        assert!(plan.is_empty());
    }

    #[test]
    fn shuffling_keeps_each_questions_options() {
        let source = bank(30);
        let mut rng = StdRng::seed_from_u64(4);
        let plan = SessionBuilder::new(30).build(source.clone(), &mut rng);

        for question in &plan.questions {
            let original = source.iter().find(|q| q.id() == question.id()).unwrap();
            let mut before: Vec<_> = original.options().iter().map(|o| o.id()).collect();
            let mut after: Vec<_> = question.options().iter().map(|o| o.id()).collect();
            before.sort();
            after.sort();
            assert_eq!(before, after);
            assert_eq!(question.correct_count(), 1);
        }
    }

    #[test]
    fn options_leave_bank_order() {
        let mut rng = StdRng::seed_from_u64(6);
        let plan = SessionBuilder::new(30).build(bank(30), &mut rng);

        // Identity survives a fair 4-way shuffle 1 time in 24.
        let reordered = plan
            .questions
            .iter()
            .filter(|q| option_indexes(q) != [0, 1, 2, 3])
            .count();
        assert!(reordered > 20, "only {reordered} of 30 questions had options reordered");
    }

    #[test]
    fn correct_option_lands_anywhere() {
        const BUILDS: usize = 30;
        let source = bank(200);
        let mut rng = StdRng::seed_from_u64(7);
        let mut positions = [0_usize; 4];

        for _ in 0..BUILDS {
            let plan = SessionBuilder::new(200).build(source.clone(), &mut rng);
            for question in &plan.questions {
                let at = question.options().iter().position(|o| o.is_correct()).unwrap();
                positions[at] += 1;
            }
        }

        let expected = BUILDS * 200 / 4;
        for (at, count) in positions.iter().enumerate() {
            assert!(
                count.abs_diff(expected) < expected / 10,
                "correct option at {at} seen {count} times, expected about {expected}"
            );
        }
    }

    #[test]
    fn question_orders_are_uniform() {
        const TRIALS: usize = 24_000;
        let source = bank(3);
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut counts: HashMap<Vec<QuestionId>, usize> = HashMap::new();

        for _ in 0..TRIALS {
            let plan = SessionBuilder::new(3).build(source.clone(), &mut rng);
            let order = plan.questions.iter().map(Question::id).collect();
            *counts.entry(order).or_default() += 1;
        }

        assert_eq!(counts.len(), 6);
        let expected = TRIALS / 6;
        for (order, count) in counts {
            assert!(
                count.abs_diff(expected) < expected / 10,
                "{order:?} seen {count} times, expected about {expected}"
            );
        }
    }

    #[test]
    fn same_seed_same_plan() {
        let source = bank(20);
        let first = SessionBuilder::new(10).build(source.clone(), &mut StdRng::seed_from_u64(42));
        let second = SessionBuilder::new(10).build(source, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn successive_builds_draw_new_orders() {
        let source = bank(40);
        let mut rng = StdRng::seed_from_u64(5);
        let first = SessionBuilder::new(40).build(source.clone(), &mut rng);
        let second = SessionBuilder::new(40).build(source, &mut rng);

        let order = |plan: &SessionPlan| plan.questions.iter().map(Question::id).collect::<Vec<_>>();
        assert_ne!(order(&first), order(&second));
    }
}
