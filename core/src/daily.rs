use core::fmt;
use core::str::FromStr;

use hashbrown::HashMap;
use serde::Serialize;
use time::{Date, OffsetDateTime};
use wordstack_protocol::{decode, encode};

use crate::*;

const DATE_FORMAT: &str = "[year]-[month]-[day]";

/// Saved mid-session state older than this is thrown away on load.
pub const SNAPSHOT_TTL_MS: u64 = 24 * 60 * 60 * 1000;

/// Calendar date that names a daily puzzle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DailyDate(Date);

impl DailyDate {
    pub const fn new(date: Date) -> Self {
        Self(date)
    }

    /// Parses `YYYY-MM-DD`.
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = || GameError::InvalidDate(text.to_owned());
        let format = time::format_description::parse(DATE_FORMAT).map_err(|_| invalid())?;
        Date::parse(text, &format).map(Self).map_err(|_| invalid())
    }

    /// Today's date in UTC.
    pub fn today_utc() -> Self {
        Self(OffsetDateTime::now_utc().date())
    }

    pub fn date(self) -> Date {
        self.0
    }

    /// Seed of this date's puzzle, stable forever.
    pub fn seed(self) -> u32 {
        daily_seed(&self.to_string())
    }
}

impl fmt::Display for DailyDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            u8::from(self.0.month()),
            self.0.day()
        )
    }
}

impl FromStr for DailyDate {
    type Err = GameError;

    fn from_str(text: &str) -> Result<Self> {
        Self::parse(text)
    }
}

/// Host storage for daily records and resumable games, keyed by date.
///
/// Loads report a missing or unreadable entry as `None`. Saves never fail
/// the game; a store that cannot write logs and moves on.
pub trait PuzzleStore {
    fn load_record(&self, date: &DailyDate) -> Option<DailyRecord>;
    fn save_record(&mut self, record: &DailyRecord);
    fn load_snapshot(&self, date: &DailyDate) -> Option<SessionSnapshot>;
    fn save_snapshot(&mut self, date: &DailyDate, snapshot: &SessionSnapshot);
    fn clear_snapshot(&mut self, date: &DailyDate);
}

/// Key-value store holding JSON text, laid out like browser local storage.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn record_key(date: &DailyDate) -> String {
        format!("daily-{}", date)
    }

    pub fn snapshot_key(date: &DailyDate) -> String {
        format!("daily-game-{}", date)
    }

    pub fn get_raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set_raw(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn write<T: Serialize>(&mut self, key: String, value: &T) {
        match encode(value) {
            Ok(json) => {
                self.entries.insert(key, json);
            }
            Err(err) => log::error!("Could not save {}: {:?}", key, err),
        }
    }
}

impl PuzzleStore for MemoryStore {
    fn load_record(&self, date: &DailyDate) -> Option<DailyRecord> {
        decode(self.get_raw(&Self::record_key(date))?)
    }

    fn save_record(&mut self, record: &DailyRecord) {
        self.write(format!("daily-{}", record.date), record);
    }

    fn load_snapshot(&self, date: &DailyDate) -> Option<SessionSnapshot> {
        decode(self.get_raw(&Self::snapshot_key(date))?)
    }

    fn save_snapshot(&mut self, date: &DailyDate, snapshot: &SessionSnapshot) {
        self.write(Self::snapshot_key(date), snapshot);
    }

    fn clear_snapshot(&mut self, date: &DailyDate) {
        self.entries.remove(&Self::snapshot_key(date));
    }
}

/// The stored record for `date`, or a fresh one. Date and seed always come
/// from `date`, whatever was stored.
pub fn load_record<S: PuzzleStore + ?Sized>(store: &S, date: &DailyDate) -> DailyRecord {
    match store.load_record(date) {
        Some(mut record) => {
            record.date = date.to_string();
            record.seed = date.seed();
            record
        }
        None => DailyRecord::fresh(date.to_string(), date.seed()),
    }
}

/// Saved game for `date` if it is younger than [`SNAPSHOT_TTL_MS`].
/// Stale snapshots are removed from the store.
pub fn resume_snapshot<S: PuzzleStore + ?Sized>(
    store: &mut S,
    date: &DailyDate,
    now_ms: u64,
) -> Option<SessionSnapshot> {
    let snapshot = store.load_snapshot(date)?;
    if snapshot.is_stale(now_ms, SNAPSHOT_TTL_MS) {
        log::debug!("Discarding saved game for {} from {}", date, snapshot.saved_at_ms);
        store.clear_snapshot(date);
        return None;
    }
    Some(snapshot)
}

/// Resumes the saved daily game when there is a usable one, otherwise deals
/// the day's puzzle from scratch.
pub fn open_daily<S, D>(
    store: &mut S,
    date: &DailyDate,
    config: GameConfig,
    dictionary: D,
    now_ms: u64,
) -> Session<D>
where
    S: PuzzleStore + ?Sized,
    D: Dictionary + Clone,
{
    if let Some(snapshot) = resume_snapshot(store, date, now_ms) {
        match Session::restore(&snapshot, dictionary.clone(), 0) {
            Ok(session) if session.mode().is_daily() => return session,
            Ok(_) => log::warn!("Saved game for {} is not a daily game", date),
            Err(err) => log::warn!("Could not resume game for {}: {}", date, err),
        }
        store.clear_snapshot(date);
    }
    Session::daily(date, config, dictionary)
}

pub fn save_progress<S, D>(store: &mut S, date: &DailyDate, session: &Session<D>, now_ms: u64)
where
    S: PuzzleStore + ?Sized,
{
    store.save_snapshot(date, &session.snapshot(now_ms));
}

/// Books a finished daily game into the record and drops the saved game.
/// An unfinished session leaves the store untouched.
pub fn finish_daily<S, D>(store: &mut S, date: &DailyDate, session: &Session<D>) -> DailyRecord
where
    S: PuzzleStore + ?Sized,
{
    let mut record = load_record(store, date);
    if !session.is_finished() {
        log::warn!("Game for {} has not ended, nothing recorded", date);
        return record;
    }

    record.mark_completed(session.final_score());
    record.record_words(session.used_words().iter().map(|used| used.word.as_str()));
    store.save_record(&record);
    store.clear_snapshot(date);
    log::debug!(
        "Recorded attempt {} for {} with score {}",
        record.attempts,
        date,
        session.final_score()
    );
    record
}

/// Starts the day over. Scores already recorded are kept.
pub fn replay<S: PuzzleStore + ?Sized>(store: &mut S, date: &DailyDate) {
    store.clear_snapshot(date);
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR_MS: u64 = 60 * 60 * 1000;

    fn date() -> DailyDate {
        DailyDate::parse("2025-03-14").unwrap()
    }

    /// Accepts anything, so every played word scores.
    #[derive(Clone)]
    struct AnyWord;

    impl Dictionary for AnyWord {
        fn contains(&self, _word: &str) -> bool {
            true
        }
    }

    /// Plays the first three top-layer tiles of each row `y`, then ends the game.
    fn finished(rows: &[Coord]) -> Session<AnyWord> {
        let mut session = Session::daily(&date(), GameConfig::default(), AnyWord);
        for &y in rows {
            for x in [0, 2, 4] {
                session.activate(Coord3::new(x, y, 0)).unwrap();
            }
            session.submit().unwrap();
        }
        session.request_end().unwrap();
        session.confirm_end().unwrap();
        session
    }

    #[test]
    fn date_parses_and_prints_iso() {
        let date = date();
        assert_eq!(date.to_string(), "2025-03-14");
        assert_eq!("2025-03-14".parse::<DailyDate>().unwrap(), date);
        assert_eq!(date.seed(), daily_seed("2025-03-14"));
    }

    #[test]
    fn malformed_dates_are_rejected() {
        for text in ["2025-3-14", "2025-02-30", "yesterday", ""] {
            assert_eq!(
                DailyDate::parse(text),
                Err(GameError::InvalidDate(text.to_owned())),
                "{}",
                text
            );
        }
    }

    #[test]
    fn missing_or_garbled_record_starts_fresh() {
        let mut store = MemoryStore::default();
        assert_eq!(load_record(&store, &date()), DailyRecord::fresh("2025-03-14", date().seed()));

        store.set_raw(MemoryStore::record_key(&date()), "{not json");
        let record = load_record(&store, &date());
        assert_eq!(record.attempts, 0);
        assert_eq!(record.seed, date().seed());
    }

    #[test]
    fn stored_record_keeps_progress_but_not_foreign_date() {
        let mut store = MemoryStore::default();
        store.set_raw(
            MemoryStore::record_key(&date()),
            r#"{"date":"1999-01-01","seed":1,"attempts":2,"bestScore":50}"#,
        );

        let record = load_record(&store, &date());

        assert_eq!(record.date, "2025-03-14");
        assert_eq!(record.seed, date().seed());
        assert_eq!(record.attempts, 2);
        assert_eq!(record.best_score, 50);
    }

    #[test]
    fn finishing_records_score_and_words() {
        let mut store = MemoryStore::default();
        save_progress(&mut store, &date(), &finished(&[]), 0);
        let session = finished(&[0, 2]);

        let record = finish_daily(&mut store, &date(), &session);

        let mut words: Vec<String> = session.used_words().iter().map(|used| used.word.clone()).collect();
        words.dedup();
        assert!(record.is_completed);
        assert_eq!(record.attempts, 1);
        assert_eq!(record.first_score, session.final_score());
        assert_eq!(record.best_score, session.final_score());
        assert_eq!(record.longest_word_length, 3);
        assert_eq!(record.all_words_found, words);
        assert_eq!(store.load_record(&date()), Some(record));
        assert!(store.load_snapshot(&date()).is_none());
    }

    #[test]
    fn second_attempt_keeps_first_score() {
        let mut store = MemoryStore::default();
        finish_daily(&mut store, &date(), &finished(&[]));

        let better = finished(&[0]);
        let record = finish_daily(&mut store, &date(), &better);

        assert_eq!(record.attempts, 2);
        assert_eq!(record.first_score, -87);
        assert_eq!(record.best_score, better.final_score());
        assert_eq!(record.all_words_found, [better.used_words()[0].word.clone()]);
    }

    #[test]
    fn unfinished_game_is_not_recorded() {
        let mut store = MemoryStore::default();
        let session = Session::daily(&date(), GameConfig::default(), WordSet::default());

        let record = finish_daily(&mut store, &date(), &session);

        assert_eq!(record.attempts, 0);
        assert!(store.is_empty());
    }

    #[test]
    fn snapshot_expires_after_a_day() {
        let mut store = MemoryStore::default();
        let session = Session::daily(&date(), GameConfig::default(), WordSet::default());
        save_progress(&mut store, &date(), &session, 1_000);

        assert!(resume_snapshot(&mut store, &date(), 1_000 + 23 * HOUR_MS).is_some());
        assert!(resume_snapshot(&mut store, &date(), 1_000 + 24 * HOUR_MS).is_none());
        assert!(store.get_raw(&MemoryStore::snapshot_key(&date())).is_none());
    }

    #[test]
    fn open_daily_resumes_saved_game() {
        let mut store = MemoryStore::default();
        let mut session = open_daily(&mut store, &date(), GameConfig::default(), WordSet::default(), 0);
        session.activate(Coord3::new(0, 0, 0)).unwrap();
        save_progress(&mut store, &date(), &session, 0);

        let resumed = open_daily(&mut store, &date(), GameConfig::default(), WordSet::default(), HOUR_MS);

        assert_eq!(resumed.selection(), session.selection());
        assert_eq!(resumed.board(), session.board());
    }

    #[test]
    fn open_daily_deals_fresh_when_save_is_broken() {
        let mut store = MemoryStore::default();
        store.set_raw(MemoryStore::snapshot_key(&date()), "[]");

        let session = open_daily(&mut store, &date(), GameConfig::default(), WordSet::default(), 0);

        assert!(session.selection().is_empty());
        assert_eq!(session.board().tile_count(), 29);
        assert_eq!(session.mode(), &GameMode::daily(&date()));
    }

    #[test]
    fn replay_drops_saved_game_only() {
        let mut store = MemoryStore::default();
        finish_daily(&mut store, &date(), &finished(&[0]));
        save_progress(
            &mut store,
            &date(),
            &Session::daily(&date(), GameConfig::default(), WordSet::default()),
            0,
        );

        replay(&mut store, &date());

        assert!(store.load_snapshot(&date()).is_none());
        assert_eq!(store.load_record(&date()).unwrap().attempts, 1);
    }
}
