//! In-memory backing data for the mock backend.

use std::collections::HashMap;

use serde::Serialize;

#[derive(Clone, Debug)]
pub struct Account {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
    pub active: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct AnswerRecord {
    pub id: i64,
    pub correct: bool,
    pub text: String,
    pub feedback: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct QuestionRecord {
    pub question_id: i64,
    pub question_type: String,
    pub question_text: String,
    pub answers: Vec<AnswerRecord>,
    #[serde(skip)]
    pub media_path: String,
}

#[derive(Clone, Copy, Debug)]
pub struct Attempt {
    pub user_id: i64,
    pub correct: bool,
    pub response_time_ms: i64,
}

#[derive(Debug, Default)]
pub struct Store {
    pub accounts: Vec<Account>,
    pub questions: Vec<QuestionRecord>,
    pub scores: HashMap<i64, i64>,
    pub attempts: Vec<Attempt>,
    next_question: usize,
}

impl Store {
    pub fn seeded() -> Self {
        Self {
            questions: seed_questions(),
            ..Self::default()
        }
    }

    pub fn account(&self, user_id: i64) -> Option<&Account> {
        self.accounts.iter().find(|a| a.user_id == user_id)
    }

    pub fn account_by_name(&self, username: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.username == username)
    }

    /// Active account whose password matches.
    pub fn authenticate(&mut self, username: &str, password: &str) -> Option<&mut Account> {
        self.accounts
            .iter_mut()
            .find(|a| a.active && a.username == username && a.password == password)
    }

    pub fn add_account(&mut self, username: String, email: String, password: String) -> i64 {
        let user_id = self.accounts.iter().map(|a| a.user_id).max().unwrap_or(0) + 1;
        self.accounts.push(Account {
            user_id,
            username,
            email,
            password,
            active: true,
        });
        user_id
    }

    pub fn question(&self, question_id: i64) -> Option<&QuestionRecord> {
        self.questions.iter().find(|q| q.question_id == question_id)
    }

    /// Questions are handed out round-robin so runs are reproducible.
    pub fn next_question(&mut self) -> Option<&QuestionRecord> {
        if self.questions.is_empty() {
            return None;
        }
        let index = self.next_question % self.questions.len();
        self.next_question += 1;
        self.questions.get(index)
    }

    /// `None` until the user has answered at least one question.
    pub fn tier(&self, user_id: i64) -> Option<&'static str> {
        let attempts: Vec<&Attempt> = self.attempts.iter().filter(|a| a.user_id == user_id).collect();
        if attempts.is_empty() {
            return None;
        }
        let total = attempts.len() as f64;
        let accuracy = attempts.iter().filter(|a| a.correct).count() as f64 / total;
        let mean_ms = attempts.iter().map(|a| a.response_time_ms as f64).sum::<f64>() / total;
        Some(if accuracy >= 0.8 && mean_ms <= 10_000.0 {
            "Easy"
        } else if accuracy >= 0.5 {
            "Medium"
        } else {
            "Hard"
        })
    }

    /// Best scores of active users, highest first.
    pub fn standings(&self, limit: usize) -> Vec<(String, i64, Option<&'static str>)> {
        let mut rows: Vec<(String, i64, Option<&'static str>)> = self
            .scores
            .iter()
            .filter_map(|(user_id, score)| {
                let account = self.account(*user_id).filter(|a| a.active)?;
                Some((account.username.clone(), *score, self.tier(*user_id)))
            })
            .collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        rows.truncate(limit);
        rows
    }
}

fn seed_questions() -> Vec<QuestionRecord> {
    let answer = |id, correct, text: &str, feedback: &str| AnswerRecord {
        id,
        correct,
        text: text.to_string(),
        feedback: Some(feedback.to_string()),
    };
    vec![
        QuestionRecord {
            question_id: 1,
            question_type: "image".to_string(),
            question_text: "Which portrait was generated by a model?".to_string(),
            answers: vec![
                answer(1, true, "Left", "Look at the mismatched earrings."),
                answer(2, false, "Right", "This one is a real photograph."),
            ],
            media_path: "questions/1.png".to_string(),
        },
        QuestionRecord {
            question_id: 2,
            question_type: "video".to_string(),
            question_text: "Is this interview clip real or a deepfake?".to_string(),
            answers: vec![
                answer(3, false, "Real", "The lip sync drifts around the 4 second mark."),
                answer(4, true, "Deepfake", "Right, the blinking rate is unnatural."),
            ],
            media_path: "questions/2.mp4".to_string(),
        },
        QuestionRecord {
            question_id: 3,
            question_type: "audio".to_string(),
            question_text: "Was this voice message synthesized?".to_string(),
            answers: vec![
                answer(5, true, "Real", "Background noise and breathing are consistent."),
                answer(6, false, "Synthesized", "This one was recorded by a person."),
            ],
            media_path: "questions/3.mp3".to_string(),
        },
    ]
}
