use hashbrown::HashSet;
use smallvec::SmallVec;

/// Membership test over a finished set of uppercase words.
pub trait Dictionary {
    fn contains(&self, word: &str) -> bool;
}

impl<D: Dictionary + ?Sized> Dictionary for &D {
    fn contains(&self, word: &str) -> bool {
        (**self).contains(word)
    }
}

/// In-memory word set, words are trimmed and uppercased on insertion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WordSet(HashSet<String>);

impl WordSet {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            words
                .into_iter()
                .map(|word| word.as_ref().trim().to_uppercase())
                .filter(|word| !word.is_empty())
                .collect(),
        )
    }

    /// One word per line, as word lists are usually shipped.
    pub fn parse(text: &str) -> Self {
        Self::from_words(text.lines())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Dictionary for WordSet {
    fn contains(&self, word: &str) -> bool {
        self.0.contains(word)
    }
}

/// Every spelling of `word` with each `*` replaced by `A..=Z`.
///
/// Yields the uppercased word itself when it has no wildcard.
#[derive(Clone, Debug)]
pub struct WildcardExpansions {
    chars: Vec<char>,
    slots: SmallVec<[usize; 2]>,
    done: bool,
}

impl WildcardExpansions {
    pub fn new(word: &str) -> Self {
        let mut chars: Vec<char> = word.to_uppercase().chars().collect();
        let slots: SmallVec<[usize; 2]> = chars
            .iter()
            .enumerate()
            .filter(|&(_, &ch)| ch == '*')
            .map(|(i, _)| i)
            .collect();
        for &slot in &slots {
            chars[slot] = 'A';
        }
        Self {
            chars,
            slots,
            done: false,
        }
    }
}

impl Iterator for WildcardExpansions {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let current = self.chars.iter().collect();

        // odometer over the wildcard slots, last slot turns fastest
        self.done = true;
        for &slot in self.slots.iter().rev() {
            if self.chars[slot] == 'Z' {
                self.chars[slot] = 'A';
            } else {
                self.chars[slot] = char::from(self.chars[slot] as u8 + 1);
                self.done = false;
                break;
            }
        }
        Some(current)
    }
}

pub fn wildcard_expansions(word: &str) -> Vec<String> {
    WildcardExpansions::new(word).collect()
}

/// Whether any spelling of `word` is in `dictionary`.
pub fn is_valid_word<D: Dictionary + ?Sized>(dictionary: &D, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    WildcardExpansions::new(word).any(|candidate| dictionary.contains(&candidate))
}
