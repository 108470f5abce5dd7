//! Letter work queue for the reduce phase.
//!
//! The alphabet is fixed work (26 output files) and the reducer count is
//! arbitrary, so reducers pull letters from one shared queue instead of being
//! handed a static slice of the alphabet.

use parking_lot::Mutex;
use std::collections::VecDeque;

use crate::types::{alphabet, ALPHABET_LEN};

/// Each letter `'a'..='z'` is handed out exactly once.
#[derive(Debug)]
pub struct LetterWorkQueue {
    letters: Mutex<VecDeque<char>>,
}

impl Default for LetterWorkQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl LetterWorkQueue {
    /// A full queue, in ascending order.
    pub fn new() -> Self {
        let mut letters = VecDeque::with_capacity(ALPHABET_LEN);
        letters.extend(alphabet());
        Self {
            letters: Mutex::new(letters),
        }
    }

    /// Pop the next letter, or `None` when the alphabet is exhausted.
    pub fn try_claim(&self) -> Option<char> {
        self.letters.lock().pop_front()
    }

    pub fn remaining(&self) -> usize {
        self.letters.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}
