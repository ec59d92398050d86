use super::*;

impl<D> Session<D> {
    /// Captures everything needed to resume this game later.
    pub fn snapshot(&self, saved_at_ms: u64) -> SessionSnapshot {
        let config = serde_json::to_value(self.config).unwrap_or_else(|err| {
            log::error!("Could not serialize game config: {:?}", err);
            serde_json::Value::Null
        });
        let (date, seed) = match &self.mode {
            GameMode::Daily { date, seed } => (Some(date.clone()), Some(*seed)),
            GameMode::FreePlay { .. } => (None, None),
        };

        SessionSnapshot {
            saved_at_ms,
            config,
            date,
            seed,
            rng: self.rng_checkpoint(),
            current_word: self.current_word(),
            selected: self.selection.tiles().iter().map(|&id| id.into()).collect(),
            layers: self
                .board
                .layers()
                .iter()
                .map(|layer| LayerSnapshot {
                    size: layer.spec().size,
                    offset: layer.spec().offset,
                    tiles: layer
                        .tiles()
                        .iter()
                        .map(|tile| TileSnapshot {
                            anchor: tile.id().into(),
                            letter: tile.letter().as_char(),
                            selected: tile.is_selected(),
                            visible: tile.is_visible(),
                            selectable: tile.is_selectable(),
                        })
                        .collect(),
                })
                .collect(),
            all_visible: self.board.all_visible(),
            used_words: self.used_words.clone(),
            best_word: self.best_word.clone(),
            total_score: self.total_score,
            swaps_remaining: self.swaps_remaining,
            swap_mode: self.swap_mode,
            swap_pool: self.pool.letters().iter().map(|&letter| letter.as_char()).collect(),
            original_bag_len: self.original_bag_len,
            feedback: self.feedback.clone(),
            game_over: self.state.is_finished(),
            show_end_game_confirmation: self.end_requested,
            final_score: self.final_score,
            penalty_score: self.penalty_score,
        }
    }
}

impl<D: Dictionary> Session<D> {
    /// Rebuilds a session from a snapshot.
    ///
    /// Daily games continue the saved random stream, or replay the deal and
    /// the swaps made so far when the save lacks one. Free play has no saved
    /// stream, further swaps draw from `entropy_seed`.
    pub fn restore(snapshot: &SessionSnapshot, dictionary: D, entropy_seed: u64) -> Result<Self> {
        let config: GameConfig = serde_json::from_value(snapshot.config.clone())
            .map_err(|err| GameError::InvalidSnapshot(format!("config: {}", err)))?;

        let (mode, rng) = match (&snapshot.date, snapshot.seed) {
            (Some(date), Some(seed)) => {
                let rng = match snapshot.rng {
                    Some(checkpoint) => SeededRandom::restore(checkpoint),
                    None => {
                        let swaps_used = config.swaps.saturating_sub(snapshot.swaps_remaining);
                        let calls = deal_calls(snapshot.original_bag_len, config.shape)
                            .saturating_add(u64::from(swaps_used));
                        log::warn!(
                            "Daily snapshot for {} has no generator position, replaying {} draws",
                            date,
                            calls
                        );
                        let mut rng = SeededRandom::new(seed);
                        rng.fast_forward(calls);
                        rng
                    }
                };
                let mode = GameMode::Daily {
                    date: date.clone(),
                    seed,
                };
                (mode, DrawSource::Seeded(rng))
            }
            _ => (
                GameMode::FreePlay { seed: entropy_seed },
                DrawSource::Entropy(EntropySource::from_seed(entropy_seed)),
            ),
        };

        let layers = snapshot
            .layers
            .iter()
            .map(restore_layer)
            .collect::<Result<Vec<_>>>()?;
        let mut board = Board::validated(layers, snapshot.all_visible)?;

        let mut selection = Selection::default();
        for &key in &snapshot.selected {
            let id = TileId::from(key);
            if board.tile(id).is_some_and(Tile::is_visible) && !selection.contains(id) {
                selection.push(id);
            } else {
                log::warn!("Dropping saved selection of tile {}", id);
            }
        }
        let ids: Vec<TileId> = board.tiles().map(Tile::id).collect();
        for id in ids {
            board.set_selected(id, selection.contains(id));
        }

        let pool = snapshot
            .swap_pool
            .iter()
            .map(|&ch| Letter::new(ch))
            .collect::<Result<Vec<_>>>()?;

        let state = if snapshot.game_over {
            SessionState::Ended
        } else {
            SessionState::Active
        };
        log::debug!(
            "Restored {:?} session with {} tiles and {} words",
            mode,
            board.tile_count(),
            snapshot.used_words.len()
        );

        Ok(Self {
            config,
            mode,
            dictionary,
            board,
            selection,
            pool: SwapPool::new(pool),
            original_bag_len: snapshot.original_bag_len,
            rng,
            total_score: snapshot.total_score,
            used_words: snapshot.used_words.clone(),
            best_word: snapshot.best_word.clone(),
            swaps_remaining: snapshot.swaps_remaining.min(config.swaps),
            swap_mode: snapshot.swap_mode && snapshot.swaps_remaining > 0,
            end_requested: snapshot.show_end_game_confirmation,
            state,
            penalty_score: snapshot.penalty_score,
            final_score: snapshot.final_score,
            feedback: snapshot.feedback.clone(),
        })
    }
}

fn restore_layer(layer: &LayerSnapshot) -> Result<Layer> {
    let tiles = layer
        .tiles
        .iter()
        .map(|tile| {
            let letter = Letter::new(tile.letter)?;
            Ok(Tile::with_flags(
                TileId::from(tile.anchor),
                letter,
                tile.selected,
                tile.visible,
                tile.selectable,
            ))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Layer::new(LayerSpec::new(layer.size, layer.offset), tiles))
}
