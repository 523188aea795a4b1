#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::{Question, Role, Test};

    /// Builds a stored test whose answer key is `correct_answers`.
    pub fn test_with_key(id: &str, correct_answers: &[u8]) -> Test {
        Test {
            id: id.to_string(),
            subject: "Math".to_string(),
            duration: 15,
            questions: correct_answers
                .iter()
                .enumerate()
                .map(|(i, &correct_answer)| Question {
                    text: format!("Question {}", i + 1),
                    options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                    correct_answer,
                })
                .collect(),
            available_for: vec![Role::Student],
            created_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixture_builds_four_option_questions() {
        let test = test_with_key("t-1", &[0, 3]);

        assert_eq!(test.id, "t-1");
        assert_eq!(test.questions.len(), 2);
        assert!(test.questions.iter().all(|q| q.options.len() == 4));
        assert_eq!(test.questions[1].correct_answer, 3);
    }
}
