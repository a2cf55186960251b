//! The fixed interview question bank and per-session sampling.

use rand::seq::SliceRandom;

/// Ordered bank of interview prompts. Questions have no identity beyond
/// their text; the bank never changes at runtime.
pub const QUESTION_BANK: &[&str] = &[
    "Tell us something about yourself.",
    "Why are you interested in this internship, and how does it align with your career goals?",
    "What specific skills or knowledge do you hope to gain from this internship?",
    "Can you provide an example of a time when you had to work as part of a team? What was your approach to collaboration, and how did you handle any conflicts or challenges?",
    "Can you describe a project or task from your previous experience (or academic work) that you are particularly proud of? What was your role, and what did you learn from it?",
    "Describe a situation where you had to quickly learn something new or adapt to a change. How did you handle it, and what was the outcome?",
    "What motivated you to apply for this internship, and what interests you about our company or the role?",
    "What skills or strengths do you believe you bring to this internship, and how do you think they will help you succeed?",
    "How do you handle challenges or setbacks, especially when you’re working on something unfamiliar or difficult?",
    "Can you tell us about your educational background and any relevant coursework or projects you have completed?",
    "What are your strengths and weaknesses, and how do you plan to address your weaknesses during this internship?",
    "How do you handle feedback and criticism, and can you give an example of how you have used feedback to improve your work?",
    "How would you approach a project or task if you were unfamiliar with the topic or required specific knowledge?",
    "What tools or software are you familiar with that are relevant to this internship role?",
    "What are your long-term career goals, and how does this internship help you achieve them?",
    "Can you give an example of a situation where you had to communicate complex information to someone with less expertise?",
    "How would you handle a situation where you were given unclear instructions or expectations for a task?",
    "What extracurricular activities or volunteer experiences have you been involved in, and how do they relate to this internship?",
    "How do you plan to balance this internship with any other commitments you may have?",
];

/// Draw `count` questions uniformly without replacement.
///
/// Asking for more questions than the bank holds returns the whole bank
/// rather than failing.
pub fn sample_questions(count: usize) -> Vec<String> {
    let mut rng = rand::thread_rng();
    let n = count.min(QUESTION_BANK.len());
    QUESTION_BANK
        .choose_multiple(&mut rng, n)
        .map(|q| q.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sample_has_requested_size() {
        assert_eq!(sample_questions(2).len(), 2);
        assert_eq!(sample_questions(6).len(), 6);
    }

    #[test]
    fn oversized_request_returns_whole_bank() {
        let sample = sample_questions(QUESTION_BANK.len() + 100);
        assert_eq!(sample.len(), QUESTION_BANK.len());
    }

    #[test]
    fn sample_contains_only_bank_members_without_duplicates() {
        let sample = sample_questions(6);
        let unique: HashSet<&str> = sample.iter().map(String::as_str).collect();
        assert_eq!(unique.len(), sample.len());
        for question in &sample {
            assert!(QUESTION_BANK.contains(&question.as_str()));
        }
    }

    #[test]
    fn zero_sample_is_empty() {
        assert!(sample_questions(0).is_empty());
    }
}
