//! Picking the next quiz question.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::db::{Question, QuestionFilter};

/// Which questions a quiz draws from. The web client sends category id `0` for "all".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizScope {
    All,
    Category(i64),
}

impl QuizScope {
    pub fn from_category_id(id: i64) -> Self {
        if id == 0 {
            QuizScope::All
        } else {
            QuizScope::Category(id)
        }
    }

    pub fn filter(&self) -> QuestionFilter {
        match *self {
            QuizScope::All => QuestionFilter::All,
            QuizScope::Category(id) => QuestionFilter::Category(id),
        }
    }

    pub fn label(&self) -> String {
        match self {
            QuizScope::All => "all".to_owned(),
            QuizScope::Category(id) => id.to_string(),
        }
    }
}

/// Returns a uniformly random candidate whose id is not in `previous`, or `None` once every
/// candidate has been served. Each candidate is looked at no more than once.
pub fn pick_unseen<R: Rng + ?Sized>(
    mut candidates: Vec<Question>,
    previous: &HashSet<i64>,
    rng: &mut R,
) -> Option<Question> {
    candidates.shuffle(rng);
    candidates.into_iter().find(|q| !previous.contains(&q.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn question(id: i64) -> Question {
        Question {
            id,
            question: format!("question {id}"),
            answer: format!("answer {id}"),
            category: 1,
            difficulty: 1,
            rating: 1,
        }
    }

    fn candidates(ids: &[i64]) -> Vec<Question> {
        ids.iter().copied().map(question).collect()
    }

    #[test]
    fn category_zero_means_all() {
        assert_eq!(QuizScope::from_category_id(0), QuizScope::All);
        assert_eq!(QuizScope::from_category_id(3), QuizScope::Category(3));
        assert_eq!(QuizScope::All.label(), "all");
        assert_eq!(QuizScope::Category(3).label(), "3");
    }

    #[test]
    fn picks_any_candidate_without_history() {
        let mut rng = StdRng::seed_from_u64(7);
        let picked = pick_unseen(candidates(&[1, 2, 3]), &HashSet::new(), &mut rng).unwrap();
        assert!([1, 2, 3].contains(&picked.id));
    }

    #[test]
    fn only_unseen_question_is_always_picked() {
        let previous: HashSet<i64> = [1, 2, 4, 5].into_iter().collect();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let picked = pick_unseen(candidates(&[1, 2, 3, 4, 5]), &previous, &mut rng);
            assert_eq!(picked.map(|q| q.id), Some(3));
        }
    }

    #[test]
    fn exhausted_candidates_yield_none() {
        let previous: HashSet<i64> = [1, 2, 3].into_iter().collect();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(pick_unseen(candidates(&[1, 2, 3]), &previous, &mut rng).is_none());
        assert!(pick_unseen(Vec::new(), &HashSet::new(), &mut rng).is_none());
    }

    #[test]
    fn history_outside_candidates_is_ignored() {
        let previous: HashSet<i64> = [10, 11].into_iter().collect();
        let mut rng = StdRng::seed_from_u64(3);
        assert!(pick_unseen(candidates(&[1]), &previous, &mut rng).is_some());
    }

    #[test]
    fn every_candidate_can_come_first() {
        let mut seen = HashSet::new();
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let picked = pick_unseen(candidates(&[1, 2, 3]), &HashSet::new(), &mut rng).unwrap();
            seen.insert(picked.id);
        }
        assert_eq!(seen.len(), 3);
    }
}
