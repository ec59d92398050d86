use serde::{Deserialize, Serialize};

use crate::*;

mod snapshot;

/// Where the letters come from and whether the game can be replayed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Board and swap draws fixed by the calendar date.
    Daily { date: String, seed: u32 },
    /// Board dealt from host-provided entropy.
    FreePlay { seed: u64 },
}

impl GameMode {
    pub fn daily(date: &DailyDate) -> Self {
        Self::Daily {
            date: date.to_string(),
            seed: date.seed(),
        }
    }

    pub const fn is_daily(&self) -> bool {
        matches!(self, Self::Daily { .. })
    }

    fn draw_source(&self) -> DrawSource {
        match *self {
            Self::Daily { seed, .. } => DrawSource::Seeded(SeededRandom::new(seed)),
            Self::FreePlay { seed } => DrawSource::Entropy(EntropySource::from_seed(seed)),
        }
    }
}

/// The single random stream of a session, shared by dealing and swapping.
#[derive(Clone, Debug)]
enum DrawSource {
    Seeded(SeededRandom),
    Entropy(EntropySource),
}

impl RandomSource for DrawSource {
    fn next_f64(&mut self) -> f64 {
        match self {
            Self::Seeded(rng) => rng.next_f64(),
            Self::Entropy(rng) => rng.next_f64(),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Active,
    Ended,
}

impl SessionState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Ended)
    }
}

/// Outcome of a tile activation or an edit of the word in progress.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    NoChange,
    Selected,
    /// `cascaded` counts tiles dropped because they lost their covering tiles.
    Deselected { cascaded: usize },
    Reordered,
    Cleared { count: usize },
    Swapped { letter: Letter },
}

impl SelectOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    NoChange,
    Accepted { score: Score },
    Rejected,
    /// Word accepted and it cleared the board.
    Completed { score: Score, final_score: Score },
}

impl SubmitOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EndOutcome {
    NoChange,
    Requested,
    Cancelled,
    Ended { final_score: Score },
}

/// End-of-game numbers, also meaningful mid-game as a running tally.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub total_score: Score,
    pub penalty_score: Score,
    pub final_score: Score,
    pub tiles_left: usize,
    pub used_words: Vec<UsedWord>,
    pub best_word: Option<UsedWord>,
}

/// One game from deal to end, driven by discrete player actions.
#[derive(Clone, Debug)]
pub struct Session<D> {
    config: GameConfig,
    mode: GameMode,
    dictionary: D,
    board: Board,
    selection: Selection,
    pool: SwapPool,
    original_bag_len: usize,
    rng: DrawSource,
    total_score: Score,
    used_words: Vec<UsedWord>,
    best_word: Option<UsedWord>,
    swaps_remaining: u8,
    swap_mode: bool,
    end_requested: bool,
    state: SessionState,
    penalty_score: Score,
    final_score: Score,
    feedback: Feedback,
}

impl<D> Session<D> {
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn mode(&self) -> &GameMode {
        &self.mode
    }

    pub fn dictionary(&self) -> &D {
        &self.dictionary
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn swap_pool(&self) -> &SwapPool {
        &self.pool
    }

    pub fn pool_status(&self) -> PoolStatus {
        self.pool.status(self.original_bag_len)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn total_score(&self) -> Score {
        self.total_score
    }

    pub fn penalty_score(&self) -> Score {
        self.penalty_score
    }

    pub fn final_score(&self) -> Score {
        self.final_score
    }

    pub fn used_words(&self) -> &[UsedWord] {
        &self.used_words
    }

    pub fn best_word(&self) -> Option<&UsedWord> {
        self.best_word.as_ref()
    }

    pub fn swaps_remaining(&self) -> u8 {
        self.swaps_remaining
    }

    pub fn is_swap_mode(&self) -> bool {
        self.swap_mode
    }

    pub fn is_end_requested(&self) -> bool {
        self.end_requested
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    /// Position of the daily generator, `None` in free play.
    pub fn rng_checkpoint(&self) -> Option<RngCheckpoint> {
        match &self.rng {
            DrawSource::Seeded(rng) => Some(rng.checkpoint()),
            DrawSource::Entropy(_) => None,
        }
    }

    /// The word in progress, always derived from the selected tiles.
    pub fn current_word(&self) -> String {
        self.selection.word(&self.board)
    }

    /// What the word in progress would score if accepted.
    pub fn current_word_score(&self) -> Score {
        if self.selection.is_empty() {
            0
        } else {
            self.config.scoring.score(&self.current_word())
        }
    }

    pub fn tile_state(&self, id: TileId) -> Option<TileState> {
        self.board.tile_state(id)
    }

    /// Letters the next `count` swaps would draw. Daily mode only, empty otherwise.
    pub fn upcoming_swaps(&self, count: usize) -> Vec<Letter> {
        match &self.rng {
            DrawSource::Seeded(rng) => self.pool.preview(rng, count),
            DrawSource::Entropy(_) => Vec::new(),
        }
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            total_score: self.total_score,
            penalty_score: self.penalty_score,
            final_score: self.final_score,
            tiles_left: self.board.tile_count(),
            used_words: self.used_words.clone(),
            best_word: self.best_word.clone(),
        }
    }

    /// Handles a click or tap on a tile.
    pub fn activate(&mut self, id: TileId) -> Result<SelectOutcome> {
        self.check_active()?;

        if self.swap_mode {
            return self.swap(id);
        }

        let Some(state) = self.board.tile_state(id) else {
            return Ok(SelectOutcome::NoChange);
        };
        Ok(match state {
            TileState::Selected => SelectOutcome::Deselected {
                cascaded: self.deselect(id),
            },
            state if state.can_select() => {
                self.selection.push(id);
                self.board.set_selected(id, true);
                log::debug!("Selected tile {} ({:?})", id, state);
                SelectOutcome::Selected
            }
            _ => SelectOutcome::NoChange,
        })
    }

    /// Drops the most recently added tile from the word.
    pub fn backspace(&mut self) -> Result<SelectOutcome> {
        self.check_active()?;

        let Some(id) = self.selection.pop() else {
            return Ok(SelectOutcome::NoChange);
        };
        self.board.set_selected(id, false);
        log::debug!("Backspace removed tile {}", id);
        Ok(SelectOutcome::Deselected {
            cascaded: self.drop_stranded(),
        })
    }

    /// Drops the tile at `index` of the word, out of range is a no-op.
    pub fn remove_from_word(&mut self, index: usize) -> Result<SelectOutcome> {
        self.check_active()?;

        let Some(id) = self.selection.remove_at(index) else {
            return Ok(SelectOutcome::NoChange);
        };
        self.board.set_selected(id, false);
        log::debug!("Removed tile {} at position {}", id, index);
        Ok(SelectOutcome::Deselected {
            cascaded: self.drop_stranded(),
        })
    }

    /// Moves the tile at `from` to position `to` in the word.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<SelectOutcome> {
        self.check_active()?;

        Ok(if self.selection.move_tile(from, to) {
            log::trace!("Moved word tile {} -> {}", from, to);
            SelectOutcome::Reordered
        } else {
            SelectOutcome::NoChange
        })
    }

    pub fn clear_selection(&mut self) -> Result<SelectOutcome> {
        self.check_active()?;

        Ok(match self.clear_word() {
            0 => SelectOutcome::NoChange,
            count => SelectOutcome::Cleared { count },
        })
    }

    /// Flips swap mode. Refused once the swap budget is spent.
    pub fn toggle_swap_mode(&mut self) -> Result<bool> {
        self.check_active()?;

        if self.swaps_remaining == 0 {
            return self.reject(GameError::NoSwapsRemaining);
        }
        self.swap_mode = !self.swap_mode;
        self.feedback = if self.swap_mode {
            Feedback::info("Click a tile to swap it for a new one")
        } else {
            Feedback::neutral("Swap mode cancelled")
        };
        Ok(self.swap_mode)
    }

    /// Replaces the letter of an available tile with one drawn from the swap pool.
    pub fn swap(&mut self, id: TileId) -> Result<SelectOutcome> {
        self.check_active()?;

        if !self.swap_mode {
            return self.reject(GameError::NotInSwapMode);
        }
        if self.swaps_remaining == 0 {
            return self.reject(GameError::NoSwapsRemaining);
        }
        match self.board.tile_state(id) {
            None => return Ok(SelectOutcome::NoChange),
            Some(TileState::Available) => {}
            Some(_) => return self.reject(GameError::TileNotSwappable),
        }
        let Some(letter) = self.pool.draw(&mut self.rng) else {
            return self.reject(GameError::SwapPoolExhausted);
        };

        self.board.set_letter(id, letter);
        self.swaps_remaining -= 1;
        self.swap_mode = false;
        self.feedback = Feedback::success(format!(
            "Swapped to {}! {} swaps remaining ({} tiles left)",
            letter,
            self.swaps_remaining,
            self.pool.len()
        ));
        log::debug!("Swapped tile {} to {}, {} letters left", id, letter, self.pool.len());
        Ok(SelectOutcome::Swapped { letter })
    }

    /// First step of ending the game by hand.
    pub fn request_end(&mut self) -> Result<EndOutcome> {
        self.check_active()?;

        if self.end_requested {
            return Ok(EndOutcome::NoChange);
        }
        self.end_requested = true;
        Ok(EndOutcome::Requested)
    }

    pub fn cancel_end(&mut self) -> EndOutcome {
        if self.end_requested {
            self.end_requested = false;
            EndOutcome::Cancelled
        } else {
            EndOutcome::NoChange
        }
    }

    /// Second step of ending the game, ignored unless an end was requested.
    pub fn confirm_end(&mut self) -> Result<EndOutcome> {
        self.check_active()?;

        if !self.end_requested {
            return Ok(EndOutcome::NoChange);
        }
        Ok(EndOutcome::Ended {
            final_score: self.end_game(),
        })
    }

    fn end_game(&mut self) -> Score {
        self.clear_word();
        self.swap_mode = false;
        self.end_requested = false;

        let tiles_left = self.board.tile_count();
        self.penalty_score = tiles_left as Score * self.config.penalty_per_tile;
        self.final_score = self.total_score - self.penalty_score;
        self.state = SessionState::Ended;

        let severity = if self.final_score >= 0 {
            Severity::Success
        } else {
            Severity::Error
        };
        self.feedback = Feedback::new(
            format!(
                "Game Over! Final Score: {} ({} - {} penalty)",
                self.final_score, self.total_score, self.penalty_score
            ),
            severity,
        );
        log::debug!(
            "Game ended with {} tiles left, final score {}",
            tiles_left,
            self.final_score
        );
        self.final_score
    }

    fn deselect(&mut self, id: TileId) -> usize {
        if self.selection.remove(id).is_none() {
            return 0;
        }
        self.board.set_selected(id, false);
        log::debug!("Deselected tile {}", id);
        self.drop_stranded()
    }

    /// Deselects partly covered tiles whose covering tiles are no longer all
    /// selected, until none are left. Returns how many were dropped.
    fn drop_stranded(&mut self) -> usize {
        let mut dropped = 0;
        loop {
            let stranded = self
                .selection
                .tiles()
                .iter()
                .copied()
                .find(|&id| self.is_stranded(id));
            let Some(id) = stranded else {
                break;
            };
            self.selection.remove(id);
            self.board.set_selected(id, false);
            dropped += 1;
            log::trace!("Tile {} lost a covering tile, deselected", id);
        }
        dropped
    }

    fn is_stranded(&self, id: TileId) -> bool {
        self.board.tile(id).is_some_and(|tile| !tile.is_selectable())
            && !self.board.is_temp_selectable(id)
    }

    fn clear_word(&mut self) -> usize {
        let tiles = self.selection.take();
        for &id in &tiles {
            self.board.set_selected(id, false);
        }
        tiles.len()
    }

    /// First selected tile that is partly covered by a tile outside the word.
    fn missing_cover(&self) -> Option<Letter> {
        self.selection.tiles().iter().find_map(|&id| {
            let tile = self.board.tile(id)?;
            if tile.is_selectable() {
                return None;
            }
            let covering = self.board.covering_tiles(id);
            let complete = covering.iter().all(|&cover| self.selection.contains(cover));
            (!complete).then(|| tile.letter())
        })
    }

    fn reject<T>(&mut self, err: GameError) -> Result<T> {
        log::debug!("Rejected: {}", err);
        self.feedback = Feedback::error(err.to_string());
        Err(err)
    }

    fn check_active(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

impl<D: Dictionary> Session<D> {
    /// Deals a new game from `bag`.
    pub fn new(mode: GameMode, config: GameConfig, bag: &LetterBag, dictionary: D) -> Self {
        let mut rng = mode.draw_source();
        let Deal { board, swap_pool } =
            BagGenerator::new(bag, &mut rng, config.min_swap_pool).generate(config.shape);
        log::debug!("New {:?} session on a {:?} board", mode, config.shape);

        Self {
            config,
            mode,
            dictionary,
            board,
            selection: Selection::default(),
            pool: swap_pool,
            original_bag_len: bag.len(),
            rng,
            total_score: 0,
            used_words: Vec::new(),
            best_word: None,
            swaps_remaining: config.swaps,
            swap_mode: false,
            end_requested: false,
            state: SessionState::Active,
            penalty_score: 0,
            final_score: 0,
            feedback: Feedback::default(),
        }
    }

    /// The puzzle of the day, identical for every player on that date.
    pub fn daily(date: &DailyDate, config: GameConfig, dictionary: D) -> Self {
        Self::new(GameMode::daily(date), config, &LetterBag::standard(), dictionary)
    }

    /// A one-off game dealt from host entropy.
    pub fn free_play(seed: u64, config: GameConfig, dictionary: D) -> Self {
        Self::new(GameMode::FreePlay { seed }, config, &LetterBag::standard(), dictionary)
    }

    /// Checks the word in progress and, if it is a word, removes its tiles.
    pub fn submit(&mut self) -> Result<SubmitOutcome> {
        self.check_active()?;

        if self.selection.is_empty() {
            return Ok(SubmitOutcome::NoChange);
        }
        if let Some(letter) = self.missing_cover() {
            return self.reject(GameError::CoveringTileNotUsed {
                letter: letter.as_char(),
            });
        }

        let word = self.current_word();
        if !is_valid_word(&self.dictionary, &word) {
            log::debug!("Rejected word {:?}", word);
            self.feedback = Feedback::error(format!("\"{}\" is not a valid word.", word));
            self.clear_word();
            return Ok(SubmitOutcome::Rejected);
        }

        let score = self.config.scoring.score(&word);
        log::debug!("Accepted word {:?} for {} points", word, score);
        self.total_score += score;
        let used = UsedWord {
            word: word.clone(),
            score,
        };
        if self.best_word.as_ref().is_none_or(|best| score > best.score) {
            self.best_word = Some(used.clone());
        }
        self.used_words.push(used);
        self.feedback = Feedback::success(format!("\"{}\" is a valid word!", word));

        for id in self.selection.take() {
            self.board.remove_tile(id);
        }
        self.board.refresh();

        if self.board.is_empty() {
            let final_score = self.end_game();
            Ok(SubmitOutcome::Completed { score, final_score })
        } else {
            Ok(SubmitOutcome::Accepted { score })
        }
    }
}
