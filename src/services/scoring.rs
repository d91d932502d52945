// src/services/scoring.rs

use crate::models::{
    question::Question,
    submission::{QuestionResult, QuizResult, SubmittedAnswer},
};

/// Integer percentage of `correct` out of `total`, rounding halves up.
/// An empty quiz scores 0.
pub fn percentage(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let (correct, total) = (u64::from(correct), u64::from(total));
    // round(c / t * 100) == floor((200c + t) / 2t)
    ((correct * 200 + total) / (total * 2)) as u32
}

/// Grades a submission against the quiz's answer key.
///
/// `questions` must already be in display order; the breakdown follows it,
/// not the order of `answers`. Unanswered questions count as wrong, and so
/// does an entry whose `selected_answer` is `None`. When a question id appears
/// more than once in `answers`, the first entry is used.
pub fn score_submission(quiz_title: &str, questions: &[Question], answers: &[SubmittedAnswer]) -> QuizResult {
    let mut score = 0u32;
    let mut results = Vec::with_capacity(questions.len());

    for question in questions {
        let selected = answers
            .iter()
            .find(|a| a.question_id == question.id)
            .and_then(|a| a.selected_answer.as_deref());

        // Strict string matching
        let is_correct = selected == Some(question.correct_answer.as_str());
        if is_correct {
            score += 1;
        }

        results.push(QuestionResult {
            question_id: question.id,
            text: question.text.clone(),
            user_answer: selected.map(str::to_string),
            correct_answer: question.correct_answer.clone(),
            is_correct,
        });
    }

    let total_questions = questions.len() as u32;

    QuizResult {
        score,
        total_questions,
        percentage: percentage(score, total_questions),
        results,
        quiz_title: quiz_title.to_string(),
    }
}
