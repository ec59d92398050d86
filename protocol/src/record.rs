use serde::{Deserialize, Serialize};

/// Everything remembered about one calendar date's puzzle.
///
/// Every field has a default so records written by older builds, or only
/// partially written, still load.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DailyRecord {
    /// `YYYY-MM-DD`
    pub date: String,
    pub seed: u32,
    pub is_completed: bool,
    pub first_score: i32,
    pub best_score: i32,
    pub attempts: u32,
    pub longest_word_length: u32,
    pub longest_word: String,
    pub all_words_found: Vec<String>,
}

impl DailyRecord {
    pub fn fresh(date: impl Into<String>, seed: u32) -> Self {
        Self {
            date: date.into(),
            seed,
            ..Default::default()
        }
    }

    /// Records a finished game. The very first attempt also fixes the first score.
    pub fn mark_completed(&mut self, score: i32) {
        self.is_completed = true;
        if self.attempts == 0 {
            self.first_score = score;
        }
        self.record_attempt(score);
    }

    /// Counts an attempt, keeping the best score seen so far.
    pub fn record_attempt(&mut self, score: i32) {
        self.best_score = if self.attempts == 0 {
            score
        } else {
            self.best_score.max(score)
        };
        self.attempts += 1;
    }

    /// Merges words into the distinct word list and tracks the longest one.
    pub fn record_words<'a>(&mut self, words: impl IntoIterator<Item = &'a str>) {
        for word in words {
            let length = word.chars().count() as u32;
            if length > self.longest_word_length {
                self.longest_word_length = length;
                self.longest_word = word.to_owned();
            }
            if !self.all_words_found.iter().any(|found| found == word) {
                self.all_words_found.push(word.to_owned());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decode, encode};

    #[test]
    fn first_completion_sets_first_and_best_score() {
        let mut record = DailyRecord::fresh("2025-03-14", 7);

        record.mark_completed(-12);

        assert!(record.is_completed);
        assert_eq!(record.first_score, -12);
        assert_eq!(record.best_score, -12);
        assert_eq!(record.attempts, 1);
    }

    #[test]
    fn later_attempts_keep_first_score_and_raise_best() {
        let mut record = DailyRecord::fresh("2025-03-14", 7);
        record.mark_completed(30);
        record.mark_completed(45);
        record.mark_completed(10);

        assert_eq!(record.first_score, 30);
        assert_eq!(record.best_score, 45);
        assert_eq!(record.attempts, 3);
    }

    #[test]
    fn words_are_distinct_and_longest_is_tracked() {
        let mut record = DailyRecord::default();
        record.record_words(["CAT", "STONE", "CAT"]);
        record.record_words(["DOG", "TREES"]);

        assert_eq!(record.all_words_found, ["CAT", "STONE", "DOG", "TREES"]);
        assert_eq!(record.longest_word, "STONE");
        assert_eq!(record.longest_word_length, 5);
    }

    #[test]
    fn partial_record_loads_with_defaults() {
        let record: DailyRecord = decode(r#"{"isCompleted":true,"bestScore":52}"#).unwrap();

        assert!(record.is_completed);
        assert_eq!(record.best_score, 52);
        assert_eq!(record.attempts, 0);
        assert!(record.all_words_found.is_empty());
    }

    #[test]
    fn record_uses_camel_case_keys() {
        let json = encode(&DailyRecord::fresh("2025-03-14", 1)).unwrap();
        assert!(json.contains(r#""longestWordLength":0"#));
        assert!(json.contains(r#""allWordsFound":[]"#));
    }
}
